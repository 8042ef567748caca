// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg_transforms::clip;

use crate::{
    error::{Error, Result},
    image::Plane,
    util::TryWithCapacity,
};

/// Converts one sample triple with 8-bit fixed-point weights
/// (1.402, 0.344, 0.714, 1.772).
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = (y as i32) << 8;
    let cb = cb as i32 - 128;
    let cr = cr as i32 - 128;
    [
        clip((y + 359 * cr + 128) >> 8),
        clip((y - 88 * cb - 183 * cr + 128) >> 8),
        clip((y + 454 * cb + 128) >> 8),
    ]
}

fn check_coverage(planes: &[&Plane; 3], size: (usize, usize)) -> Result<()> {
    for (c, plane) in planes.iter().enumerate() {
        let (w, h) = plane.size();
        if w < size.0 || h < size.1 {
            return Err(Error::IncompleteReconstruction(c as u8, w, h, size.0, size.1));
        }
    }
    Ok(())
}

fn interleave_with(
    planes: [&Plane; 3],
    size: (usize, usize),
    convert: impl Fn(u8, u8, u8) -> [u8; 3],
) -> Result<Vec<u8>> {
    check_coverage(&planes, size)?;
    let (width, height) = size;
    let mut out = Vec::try_with_capacity(width * height * 3)?;
    for y in 0..height {
        let rows = planes.map(|p| &p.row(y)[..width]);
        for x in 0..width {
            out.extend_from_slice(&convert(rows[0][x], rows[1][x], rows[2][x]));
        }
    }
    Ok(out)
}

/// Interleaves full-resolution Y, Cb and Cr planes into packed RGB,
/// cropping each plane to `size`.
pub fn convert_to_rgb(planes: [&Plane; 3], size: (usize, usize)) -> Result<Vec<u8>> {
    interleave_with(planes, size, ycbcr_to_rgb)
}

/// Interleaves the planes without color conversion.
pub fn interleave(planes: [&Plane; 3], size: (usize, usize)) -> Result<Vec<u8>> {
    interleave_with(planes, size, |y, cb, cr| [y, cb, cr])
}
