// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Turns decoded component planes into the interleaved output buffer.

pub mod chroma_upsample;
pub mod ycbcr;

use crate::{
    api::ColorType,
    error::{Error, Result},
    frame::Component,
    util::tracing_wrappers::*,
};

/// Reconstructs full-resolution planes and produces `color_type` output
/// for a `size` frame.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(components), err))]
pub fn render(
    components: Vec<Component>,
    size: (usize, usize),
    color_type: ColorType,
) -> Result<Vec<u8>> {
    let mut planes = Vec::with_capacity(components.len());
    for component in components {
        planes.push(chroma_upsample::reconstruct(component.plane, size)?);
    }
    match (color_type, planes.len()) {
        (ColorType::Grayscale, 1) => Ok(planes.remove(0).into_packed()),
        (ColorType::Rgb, 3) => ycbcr::convert_to_rgb([&planes[0], &planes[1], &planes[2]], size),
        (ColorType::YCbCr, 3) => ycbcr::interleave([&planes[0], &planes[1], &planes[2]], size),
        (_, n) => {
            debug!(?color_type, n, "no output for this layout");
            Err(Error::UnsupportedComponentCount(n as u8))
        }
    }
}
