// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg_transforms::BLOCK_SIZE;

use crate::{
    bit_reader::BitReader,
    entropy_coding::HuffmanTable,
    error::{Error, Result},
    headers::{QuantTable, quant_table::ZIGZAG_TO_NATURAL},
};

const MAX_DC_CATEGORY: u8 = 11;
const END_OF_BLOCK: u8 = 0x00;
const ZERO_RUN: u8 = 0xf0;

/// Tables used for the blocks of one component.
#[derive(Debug, Clone, Copy)]
pub struct BlockTables<'t> {
    pub dc: &'t HuffmanTable,
    pub ac: &'t HuffmanTable,
    pub quant: &'t QuantTable,
}

/// Maps the `size`-bit magnitude `bits` to a signed value: patterns with a
/// leading 0 are negative.
/// ```
/// # use bjpeg::frame::block::extend;
/// assert_eq!(extend(0, 0), 0);
/// assert_eq!(extend(0b1, 1), 1);
/// assert_eq!(extend(0b0, 1), -1);
/// assert_eq!(extend(0b010, 3), -5);
/// assert_eq!(extend(0b110, 3), 6);
/// ```
#[inline]
pub fn extend(bits: u32, size: u8) -> i32 {
    if size == 0 {
        return 0;
    }
    let bits = bits as i32;
    if bits < 1 << (size - 1) {
        bits - (1 << size) + 1
    } else {
        bits
    }
}

#[inline]
fn dequantize(value: i32, factor: i32) -> i32 {
    (value as i64 * factor as i64).clamp(i16::MIN as i64, i16::MAX as i64) as i32
}

/// Decodes one block into dequantized coefficients in natural order and
/// updates the component's DC predictor.
pub fn decode_block(
    br: &mut BitReader,
    tables: &BlockTables,
    dc_pred: &mut i32,
    block: &mut [i32; BLOCK_SIZE],
) -> Result<()> {
    block.fill(0);

    let category = tables.dc.decode(br)?;
    if category > MAX_DC_CATEGORY {
        return Err(Error::InvalidDcCategory(category));
    }
    let diff = extend(br.read(category as usize), category);
    *dc_pred = dc_pred.wrapping_add(diff);
    block[0] = dequantize(*dc_pred, tables.quant.factor(0));

    let mut k = 0;
    while k < 63 {
        let symbol = tables.ac.decode(br)?;
        if symbol == END_OF_BLOCK {
            break;
        }
        let (run, size) = ((symbol >> 4) as usize, symbol & 0xf);
        if size == 0 && symbol != ZERO_RUN {
            return Err(Error::InvalidAcSymbol(symbol));
        }
        k += run + 1;
        if k > 63 {
            return Err(Error::CoefficientOverrun);
        }
        let value = extend(br.read(size as usize), size);
        let index = ZIGZAG_TO_NATURAL[k];
        block[index] = dequantize(value, tables.quant.factor(index));
    }
    Ok(())
}
