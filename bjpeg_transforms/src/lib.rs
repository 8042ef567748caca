// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Fixed-point 8x8 inverse DCT used by the baseline decoder.

pub mod idct8;

pub use idct8::*;
