// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
pub mod api;
pub mod bit_reader;
pub mod decode;
pub mod entropy_coding;
pub mod error;
pub mod frame;
pub mod headers;
pub mod image;
pub mod render;
pub mod util;
