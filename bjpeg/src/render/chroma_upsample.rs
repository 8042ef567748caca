// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg_transforms::clip;

use crate::{
    error::{Error, Result},
    image::Plane,
    util::tracing_wrappers::*,
};

// Filter taps in 1/128 units. Each set sums to 128.
const CF4A: i32 = -9;
const CF4B: i32 = 111;
const CF4C: i32 = 29;
const CF4D: i32 = -3;
const CF3A: i32 = 28;
const CF3B: i32 = 109;
const CF3C: i32 = -9;
const CF3X: i32 = 104;
const CF3Y: i32 = 27;
const CF3Z: i32 = -3;
const CF2A: i32 = 139;
const CF2B: i32 = -11;

#[inline]
fn cf(x: i32) -> u8 {
    clip((x + 64) >> 7)
}

/// Doubles a line of `src.len() >= 3` samples into `dst`. Interior outputs
/// use a 4-tap kernel; the first and last three use shortened kernels.
fn upsample_line(src: &[u8], dst: &mut [u8]) {
    let n = src.len();
    debug_assert!(n >= 3 && dst.len() == 2 * n);
    let s = |i: usize| src[i] as i32;
    dst[0] = cf(CF2A * s(0) + CF2B * s(1));
    dst[1] = cf(CF3X * s(0) + CF3Y * s(1) + CF3Z * s(2));
    dst[2] = cf(CF3A * s(0) + CF3B * s(1) + CF3C * s(2));
    for x in 0..n - 3 {
        dst[2 * x + 3] = cf(CF4A * s(x) + CF4B * s(x + 1) + CF4C * s(x + 2) + CF4D * s(x + 3));
        dst[2 * x + 4] = cf(CF4D * s(x) + CF4C * s(x + 1) + CF4B * s(x + 2) + CF4A * s(x + 3));
    }
    dst[2 * n - 3] = cf(CF3A * s(n - 1) + CF3B * s(n - 2) + CF3C * s(n - 3));
    dst[2 * n - 2] = cf(CF3X * s(n - 1) + CF3Y * s(n - 2) + CF3Z * s(n - 3));
    dst[2 * n - 1] = cf(CF2A * s(n - 1) + CF2B * s(n - 2));
}

/// Returns a plane of twice the width.
pub fn upsample_horizontal(plane: &Plane) -> Result<Plane> {
    let (width, height) = plane.size();
    if width < 3 {
        return Err(Error::PlaneTooSmall(0, width, height));
    }
    let mut out = Plane::new_packed((2 * width, height))?;
    for y in 0..height {
        upsample_line(plane.row(y), out.row_mut(y));
    }
    Ok(out)
}

/// Returns a plane of twice the height.
pub fn upsample_vertical(plane: &Plane) -> Result<Plane> {
    let (width, height) = plane.size();
    if height < 3 {
        return Err(Error::PlaneTooSmall(0, width, height));
    }
    let mut out = Plane::new_packed((width, 2 * height))?;
    let mut column = Vec::new();
    column.try_reserve_exact(height)?;
    column.resize(height, 0u8);
    let mut doubled = Vec::new();
    doubled.try_reserve_exact(2 * height)?;
    doubled.resize(2 * height, 0u8);
    for x in 0..width {
        for (y, sample) in column.iter_mut().enumerate() {
            *sample = plane.row(y)[x];
        }
        upsample_line(&column, &mut doubled);
        for (y, &sample) in doubled.iter().enumerate() {
            out.row_mut(y)[x] = sample;
        }
    }
    Ok(out)
}

/// Upsamples `plane` until it covers `size`, alternating horizontal and
/// vertical doubling as needed. The result may exceed `size`.
#[cfg_attr(feature = "tracing", instrument(level = "trace", err))]
pub fn reconstruct(mut plane: Plane, size: (usize, usize)) -> Result<Plane> {
    while plane.size().0 < size.0 || plane.size().1 < size.1 {
        if plane.size().0 < size.0 {
            plane = upsample_horizontal(&plane)?;
        }
        if plane.size().1 < size.1 {
            plane = upsample_vertical(&plane)?;
        }
    }
    trace!(?plane, "reconstructed");
    Ok(plane)
}
