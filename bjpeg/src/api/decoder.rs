// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    api::{DecodeOptions, DecodedImage, JpegInfo},
    decode::Decoder,
    error::{Error, Result},
};

/// A configured decoder. Holds options only: every call decodes with fresh
/// state, so one instance may be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct JpegDecoder {
    options: DecodeOptions,
}

impl JpegDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode(&self, data: &[u8]) -> Result<DecodedImage> {
        Decoder::new(data, self.options.clone())?.decode()
    }

    pub fn read_info(&self, data: &[u8]) -> Result<JpegInfo> {
        let mut decoder = Decoder::new(data, self.options.clone())?;
        decoder.read_headers()?;
        decoder.info()
    }
}

/// Decodes a baseline JPEG with default options.
pub fn decode(data: &[u8]) -> Result<DecodedImage> {
    JpegDecoder::default().decode(data)
}

/// Decodes a frame of known size into a caller-provided 3-channel buffer
/// with rows `dst_pitch` bytes apart. Grayscale frames are replicated into
/// all three channels.
pub fn decode_frame_into(
    data: &[u8],
    expected_size: (usize, usize),
    dst: &mut [u8],
    dst_pitch: usize,
) -> Result<()> {
    let image = decode(data)?;
    if image.size() != expected_size {
        return Err(Error::FrameSizeMismatch(
            image.width,
            image.height,
            expected_size.0,
            expected_size.1,
        ));
    }
    image.into_three_channels()?.copy_to(dst, dst_pitch)
}
