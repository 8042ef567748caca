// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;

// 2048 * sqrt(2) * cos(k * pi / 16), rounded.
const W1: i64 = 2841;
const W2: i64 = 2676;
const W3: i64 = 2408;
const W5: i64 = 1609;
const W6: i64 = 1108;
const W7: i64 = 565;

// 256 / sqrt(2), rounded.
const R2: i64 = 181;

#[inline(always)]
pub fn clip(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

#[inline(always)]
fn clip_wide(x: i64) -> u8 {
    x.clamp(0, 255) as u8
}

/// Sample value produced by a block whose only non-zero coefficient is `dc`.
///
/// The row pass scales DC by 8, so this is `clip(((8 * dc + 32) >> 6) + 128)`.
/// ```
/// # use bjpeg_transforms::dc_only_sample;
/// assert_eq!(dc_only_sample(0), 128);
/// assert_eq!(dc_only_sample(-1024), 0);
/// assert_eq!(dc_only_sample(80), 138);
/// ```
#[inline]
pub fn dc_only_sample(dc: i32) -> u8 {
    clip((((dc << 3) + 32) >> 6) + 128)
}

fn row_idct(row: &mut [i32]) {
    let x1 = (row[4] as i64) << 11;
    let x2 = row[6] as i64;
    let x3 = row[2] as i64;
    let x4 = row[1] as i64;
    let x5 = row[7] as i64;
    let x6 = row[5] as i64;
    let x7 = row[3] as i64;
    if x1 == 0 && x2 == 0 && x3 == 0 && x4 == 0 && x5 == 0 && x6 == 0 && x7 == 0 {
        let dc = row[0] << 3;
        row[..BLOCK_DIM].fill(dc);
        return;
    }
    let mut x0 = ((row[0] as i64) << 11) + 128;

    // First stage.
    let mut x8 = W7 * (x4 + x5);
    let mut x4 = x8 + (W1 - W7) * x4;
    let mut x5 = x8 - (W1 + W7) * x5;
    x8 = W3 * (x6 + x7);
    let mut x6 = x8 - (W3 - W5) * x6;
    let mut x7 = x8 - (W3 + W5) * x7;

    // Second stage.
    x8 = x0 + x1;
    x0 -= x1;
    let mut x1 = W6 * (x3 + x2);
    let mut x2 = x1 - (W2 + W6) * x2;
    let mut x3 = x1 + (W2 - W6) * x3;
    x1 = x4 + x6;
    x4 -= x6;
    x6 = x5 + x7;
    x5 -= x7;

    // Third stage.
    x7 = x8 + x3;
    x8 -= x3;
    x3 = x0 + x2;
    x0 -= x2;
    x2 = (R2 * (x4 + x5) + 128) >> 8;
    x4 = (R2 * (x4 - x5) + 128) >> 8;

    row[0] = ((x7 + x1) >> 8) as i32;
    row[1] = ((x3 + x2) >> 8) as i32;
    row[2] = ((x0 + x4) >> 8) as i32;
    row[3] = ((x8 + x6) >> 8) as i32;
    row[4] = ((x8 - x6) >> 8) as i32;
    row[5] = ((x0 - x4) >> 8) as i32;
    row[6] = ((x3 - x2) >> 8) as i32;
    row[7] = ((x7 - x1) >> 8) as i32;
}

fn column_idct(block: &[i32; BLOCK_SIZE], column: usize, out: &mut [u8], stride: usize) {
    let at = |y: usize| block[y * BLOCK_DIM + column] as i64;
    let x1 = at(4) << 8;
    let x2 = at(6);
    let x3 = at(2);
    let x4 = at(1);
    let x5 = at(7);
    let x6 = at(5);
    let x7 = at(3);
    if x1 == 0 && x2 == 0 && x3 == 0 && x4 == 0 && x5 == 0 && x6 == 0 && x7 == 0 {
        let value = clip_wide(((at(0) + 32) >> 6) + 128);
        for y in 0..BLOCK_DIM {
            out[y * stride + column] = value;
        }
        return;
    }
    let mut x0 = (at(0) << 8) + 8192;

    let mut x8 = W7 * (x4 + x5) + 4;
    let mut x4 = (x8 + (W1 - W7) * x4) >> 3;
    let mut x5 = (x8 - (W1 + W7) * x5) >> 3;
    x8 = W3 * (x6 + x7) + 4;
    let mut x6 = (x8 - (W3 - W5) * x6) >> 3;
    let mut x7 = (x8 - (W3 + W5) * x7) >> 3;

    x8 = x0 + x1;
    x0 -= x1;
    let mut x1 = W6 * (x3 + x2) + 4;
    let mut x2 = (x1 - (W2 + W6) * x2) >> 3;
    let mut x3 = (x1 + (W2 - W6) * x3) >> 3;
    x1 = x4 + x6;
    x4 -= x6;
    x6 = x5 + x7;
    x5 -= x7;

    x7 = x8 + x3;
    x8 -= x3;
    x3 = x0 + x2;
    x0 -= x2;
    x2 = (R2 * (x4 + x5) + 128) >> 8;
    x4 = (R2 * (x4 - x5) + 128) >> 8;

    let samples = [
        x7 + x1,
        x3 + x2,
        x0 + x4,
        x8 + x6,
        x8 - x6,
        x0 - x4,
        x3 - x2,
        x7 - x1,
    ];
    for (y, sample) in samples.into_iter().enumerate() {
        out[y * stride + column] = clip_wide((sample >> 14) + 128);
    }
}

/// Runs the row and column butterfly networks unconditionally.
///
/// `block` holds dequantized coefficients in natural order and is used as
/// scratch space. Inputs are expected to fit in 16 bits; intermediates are
/// 64-bit so no input in that range can overflow.
pub fn idct8x8_butterfly(block: &mut [i32; BLOCK_SIZE], out: &mut [u8], stride: usize) {
    debug_assert!(stride >= BLOCK_DIM);
    debug_assert!(out.len() >= (BLOCK_DIM - 1) * stride + BLOCK_DIM);
    for row in block.chunks_exact_mut(BLOCK_DIM) {
        row_idct(row);
    }
    for column in 0..BLOCK_DIM {
        column_idct(block, column, out, stride);
    }
}

/// Inverse transforms one block into an 8x8 window of `out` with the given
/// row stride, level shifting by 128 and clamping to `0..=255`.
///
/// Blocks without AC energy skip the butterflies entirely; the result is
/// bit-identical to [`idct8x8_butterfly`].
pub fn idct8x8(block: &mut [i32; BLOCK_SIZE], out: &mut [u8], stride: usize) {
    if block[1..].iter().all(|&c| c == 0) {
        let value = dc_only_sample(block[0]);
        for row in out.chunks_mut(stride).take(BLOCK_DIM) {
            row[..BLOCK_DIM].fill(value);
        }
        return;
    }
    idct8x8_butterfly(block, out, stride);
}
