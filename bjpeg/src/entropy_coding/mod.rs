// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod huffman;

pub use huffman::{HuffmanTable, NUM_HUFFMAN_TABLES, parse_huffman_tables};
