// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DecodeOptions {
    /// Convert 3-component images to RGB. When false, the upsampled Y, Cb
    /// and Cr samples are returned interleaved.
    pub convert_rgb: bool,
    /// Maximum `width * height` of a frame; larger frames are rejected
    /// before any plane is allocated.
    pub pixel_limit: Option<usize>,
    /// Accept a scan whose entropy-coded data ends before the last MCU,
    /// decoding the remainder from 1-bit padding.
    pub allow_truncated: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            convert_rgb: true,
            pixel_limit: None,
            allow_truncated: true,
        }
    }
}
