// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

mod decoder;
mod info;
mod options;
mod output;
mod signature;

pub use decoder::*;
pub use info::*;
pub use options::*;
pub use output::*;
pub use signature::*;
