// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    error::{Error, Result},
    headers::markers::DQT,
    util::tracing_wrappers::*,
};

/// Natural (row-major) index of each zig-zag position.
pub const ZIGZAG_TO_NATURAL: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, //
    17, 24, 32, 25, 18, 11, 4, 5, //
    12, 19, 26, 33, 40, 48, 41, 34, //
    27, 20, 13, 6, 7, 14, 21, 28, //
    35, 42, 49, 56, 57, 50, 43, 36, //
    29, 22, 15, 23, 30, 37, 44, 51, //
    58, 59, 52, 45, 38, 31, 39, 46, //
    53, 60, 61, 54, 47, 55, 62, 63, //
];

pub const NATURAL_TO_ZIGZAG: [usize; 64] = {
    let mut table = [0usize; 64];
    let mut i = 0;
    while i < 64 {
        table[ZIGZAG_TO_NATURAL[i]] = i;
        i += 1;
    }
    table
};

pub const NUM_QUANT_TABLES: usize = 4;

const TABLE_BYTES: usize = 1 + 64;

/// 64 dequantization factors, stored in natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantTable {
    factors: [u16; 64],
}

impl QuantTable {
    /// Builds a table from factors given in zig-zag (transmission) order.
    pub fn from_zigzag(zigzag: &[u8]) -> QuantTable {
        debug_assert_eq!(zigzag.len(), 64);
        let mut factors = [0u16; 64];
        for (k, &q) in zigzag.iter().enumerate() {
            factors[ZIGZAG_TO_NATURAL[k]] = q as u16;
        }
        QuantTable { factors }
    }

    /// Factor for natural-order coefficient index `index`.
    #[inline]
    pub fn factor(&self, index: usize) -> i32 {
        self.factors[index] as i32
    }

    pub fn factors(&self) -> &[u16; 64] {
        &self.factors
    }
}

/// Parses a DQT payload, which may define several tables, into `tables`.
pub fn parse_quant_tables(
    mut payload: &[u8],
    tables: &mut [Option<QuantTable>; NUM_QUANT_TABLES],
) -> Result<()> {
    while payload.len() >= TABLE_BYTES {
        let spec = payload[0];
        let precision = spec >> 4;
        let index = spec & 0xf;
        if precision != 0 {
            return Err(Error::UnsupportedQuantPrecision(precision));
        }
        if index as usize >= NUM_QUANT_TABLES {
            return Err(Error::InvalidQuantTableIndex(index));
        }
        trace!(index, "quantization table");
        tables[index as usize] = Some(QuantTable::from_zigzag(&payload[1..TABLE_BYTES]));
        payload = &payload[TABLE_BYTES..];
    }
    if !payload.is_empty() {
        return Err(Error::TrailingSegmentBytes(DQT, payload.len()));
    }
    Ok(())
}
