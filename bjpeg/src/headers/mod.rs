// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub mod frame_header;
pub mod markers;
pub mod quant_table;
pub mod scan_header;
mod segment;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

pub use frame_header::{ComponentInfo, FrameHeader};
pub use markers::Marker;
pub use quant_table::QuantTable;
pub use scan_header::{ScanComponent, ScanHeader};
pub use segment::SegmentReader;

/// Parses a DRI payload. An interval of zero disables restart markers.
/// Bytes after the two-byte interval are ignored.
pub fn parse_restart_interval(payload: &[u8]) -> Result<u16> {
    if payload.len() < 2 {
        return Err(Error::SegmentTooShort {
            marker: markers::DRI,
            length: payload.len(),
            min: 2,
        });
    }
    Ok(BigEndian::read_u16(payload))
}
