// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod block;
pub mod component;
pub mod scan;

pub use block::BlockTables;
pub use component::Component;
pub use scan::{ScanDecoder, ScanState, ScanSummary};
