// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    error::{Error, Result},
    headers::{frame_header::FrameHeader, markers::SOS},
    util::tracing_wrappers::*,
};

/// Table bindings of one component within a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanComponent {
    /// Index into the frame's component list.
    pub component: usize,
    pub dc_table: usize,
    pub ac_table: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHeader {
    pub components: Vec<ScanComponent>,
}

impl ScanHeader {
    /// Parses a start-of-scan payload against the already parsed frame.
    ///
    /// Only a single interleaved scan over every frame component, in frame
    /// order, with the full sequential spectral range is accepted.
    pub fn parse(payload: &[u8], frame: &FrameHeader) -> Result<ScanHeader> {
        let num_components = frame.components.len();
        let min = 4 + 2 * num_components;
        if payload.len() < min {
            return Err(Error::SegmentTooShort {
                marker: SOS,
                length: payload.len(),
                min,
            });
        }
        if payload[0] as usize != num_components {
            return Err(Error::UnsupportedScanComponents(
                payload[0],
                num_components as u8,
            ));
        }
        let mut components = Vec::with_capacity(num_components);
        for (c, (entry, info)) in payload[1..]
            .chunks_exact(2)
            .zip(frame.components.iter())
            .enumerate()
        {
            if entry[0] != info.id {
                return Err(Error::ScanComponentMismatch(info.id, entry[0]));
            }
            let selectors = entry[1];
            if selectors & 0xee != 0 {
                return Err(Error::InvalidScanTableSelector(selectors));
            }
            components.push(ScanComponent {
                component: c,
                dc_table: (selectors >> 4) as usize,
                ac_table: (selectors & 0xf) as usize,
            });
        }
        let tail = &payload[1 + 2 * num_components..];
        let (start, end, approx) = (tail[0], tail[1], tail[2]);
        if start != 0 || end != 63 || approx != 0 {
            return Err(Error::UnsupportedSpectralSelection(start, end, approx));
        }
        let header = ScanHeader { components };
        debug!(?header);
        Ok(header)
    }
}
