// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    api::DecodeOptions,
    decode::Decoder,
    error::Result,
    headers::ComponentInfo,
};

/// An application or comment segment skipped while reading headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentInfo {
    pub marker: u8,
    /// Offset of the marker's 0xFF byte.
    pub offset: usize,
    /// Declared segment length, including the length field.
    pub length: usize,
}

/// Header information of a baseline JPEG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegInfo {
    pub width: usize,
    pub height: usize,
    pub components: Vec<ComponentInfo>,
    /// MCUs between restart markers; 0 if restarts are disabled.
    pub restart_interval: u16,
    pub segments: Vec<SegmentInfo>,
    /// Offset of the first byte of entropy-coded data.
    pub entropy_coded_offset: usize,
}

/// Parses every segment up to and including the start-of-scan header,
/// without decoding entropy-coded data.
pub fn read_info(data: &[u8]) -> Result<JpegInfo> {
    let mut decoder = Decoder::new(data, DecodeOptions::default())?;
    decoder.read_headers()?;
    decoder.info()
}
