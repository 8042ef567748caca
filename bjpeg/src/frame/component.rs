// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    error::Result,
    headers::{ComponentInfo, FrameHeader},
    image::Plane,
};

/// Decoding state of one frame component.
#[derive(Debug)]
pub struct Component {
    pub info: ComponentInfo,
    /// MCU-aligned sample buffer, written block by block.
    pub plane: Plane,
    pub dc_pred: i32,
}

impl Component {
    /// Allocates the plane of frame component `c`.
    pub fn new(frame: &FrameHeader, c: usize) -> Result<Component> {
        let (stride, rows) = frame.plane_storage(c);
        Ok(Component {
            info: frame.components[c],
            plane: Plane::new(frame.plane_size(c), stride, rows)?,
            dc_pred: 0,
        })
    }
}
