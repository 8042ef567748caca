// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// Layout of the samples in [`DecodedImage::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Grayscale,
    Rgb,
    /// Interleaved Y, Cb, Cr, with chroma upsampled to full resolution.
    YCbCr,
}

impl ColorType {
    pub fn channels(&self) -> usize {
        match self {
            ColorType::Grayscale => 1,
            ColorType::Rgb | ColorType::YCbCr => 3,
        }
    }
}

/// A decoded image. Rows are packed: `data` holds exactly
/// `width * height * channels` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub color_type: ColorType,
    pub data: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> usize {
        self.color_type.channels()
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width * self.channels()
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let bpr = self.bytes_per_row();
        &self.data[y * bpr..(y + 1) * bpr]
    }

    /// Replicates grayscale samples into three channels. Other images are
    /// returned unchanged.
    pub fn into_three_channels(self) -> Result<DecodedImage> {
        if self.color_type != ColorType::Grayscale {
            return Ok(self);
        }
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len() * 3)?;
        for &v in self.data.iter() {
            data.extend_from_slice(&[v, v, v]);
        }
        Ok(DecodedImage {
            color_type: ColorType::Rgb,
            data,
            ..self
        })
    }

    /// Copies the rows into `dst`, starting each row `dst_pitch` bytes
    /// after the previous one. Bytes between rows are left untouched.
    pub fn copy_to(&self, dst: &mut [u8], dst_pitch: usize) -> Result<()> {
        let bpr = self.bytes_per_row();
        if dst_pitch < bpr {
            return Err(Error::OutputBufferTooSmall(dst_pitch, bpr));
        }
        let needed = dst_pitch
            .checked_mul(self.height.saturating_sub(1))
            .and_then(|n| n.checked_add(bpr))
            .ok_or(Error::ArithmeticOverflow)?;
        if dst.len() < needed {
            return Err(Error::OutputBufferTooSmall(dst.len(), needed));
        }
        for (src, dst) in self.data.chunks_exact(bpr).zip(dst.chunks_mut(dst_pitch)) {
            dst[..bpr].copy_from_slice(src);
        }
        Ok(())
    }
}
