// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{Error, Result},
    headers::{markers::SOF0, quant_table::NUM_QUANT_TABLES},
    util::tracing_wrappers::*,
};

pub const MAX_SAMPLING_FACTOR: u8 = 4;

/// Per-component entry of the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentInfo {
    pub id: u8,
    pub h_samp: usize,
    pub v_samp: usize,
    pub quant_table: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub precision: u8,
    pub width: usize,
    pub height: usize,
    pub components: Vec<ComponentInfo>,
    pub max_h_samp: usize,
    pub max_v_samp: usize,
}

fn sampling_factor(id: u8, h: u8, v: u8) -> Result<()> {
    for f in [h, v] {
        if f == 0 || f > MAX_SAMPLING_FACTOR {
            return Err(Error::InvalidSampling(id, h, v));
        }
        if !f.is_power_of_two() {
            return Err(Error::UnsupportedSampling(id, h, v));
        }
    }
    Ok(())
}

impl FrameHeader {
    /// Parses a baseline (SOF0) frame header payload.
    pub fn parse(payload: &[u8]) -> Result<FrameHeader> {
        const FIXED_BYTES: usize = 6;
        if payload.len() < FIXED_BYTES + 3 {
            return Err(Error::SegmentTooShort {
                marker: SOF0,
                length: payload.len(),
                min: FIXED_BYTES + 3,
            });
        }
        let precision = payload[0];
        if precision != 8 {
            return Err(Error::UnsupportedPrecision(precision));
        }
        let height = BigEndian::read_u16(&payload[1..]) as usize;
        let width = BigEndian::read_u16(&payload[3..]) as usize;
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize(width, height));
        }
        let num_components = payload[5];
        if num_components != 1 && num_components != 3 {
            return Err(Error::UnsupportedComponentCount(num_components));
        }
        let min = FIXED_BYTES + 3 * num_components as usize;
        if payload.len() < min {
            return Err(Error::SegmentTooShort {
                marker: SOF0,
                length: payload.len(),
                min,
            });
        }

        let mut components = Vec::with_capacity(num_components as usize);
        for entry in payload[FIXED_BYTES..min].chunks_exact(3) {
            let (id, h, v) = (entry[0], entry[1] >> 4, entry[1] & 0xf);
            sampling_factor(id, h, v)?;
            let quant_table = entry[2];
            if quant_table as usize >= NUM_QUANT_TABLES {
                return Err(Error::InvalidQuantTableIndex(quant_table));
            }
            components.push(ComponentInfo {
                id,
                h_samp: h as usize,
                v_samp: v as usize,
                quant_table: quant_table as usize,
            });
        }
        if components.len() == 1 {
            // A lone component always covers the MCU with one block.
            components[0].h_samp = 1;
            components[0].v_samp = 1;
        }
        let max_h_samp = components.iter().map(|c| c.h_samp).max().unwrap_or(1);
        let max_v_samp = components.iter().map(|c| c.v_samp).max().unwrap_or(1);

        let header = FrameHeader {
            precision,
            width,
            height,
            components,
            max_h_samp,
            max_v_samp,
        };
        for (c, info) in header.components.iter().enumerate() {
            let (w, h) = header.plane_size(c);
            if (w < 3 && info.h_samp != max_h_samp) || (h < 3 && info.v_samp != max_v_samp) {
                return Err(Error::PlaneTooSmall(info.id, w, h));
            }
        }
        debug!(?header);
        Ok(header)
    }

    /// Pixel dimensions of one MCU.
    pub fn mcu_size(&self) -> (usize, usize) {
        (self.max_h_samp * 8, self.max_v_samp * 8)
    }

    /// Number of MCUs horizontally and vertically.
    pub fn mcu_grid(&self) -> (usize, usize) {
        let (mw, mh) = self.mcu_size();
        (self.width.div_ceil(mw), self.height.div_ceil(mh))
    }

    /// Size of component `c`'s plane before chroma reconstruction.
    pub fn plane_size(&self, c: usize) -> (usize, usize) {
        let info = &self.components[c];
        (
            (self.width * info.h_samp).div_ceil(self.max_h_samp),
            (self.height * info.v_samp).div_ceil(self.max_v_samp),
        )
    }

    /// Row stride and row count of component `c`'s MCU-aligned buffer.
    pub fn plane_storage(&self, c: usize) -> (usize, usize) {
        let info = &self.components[c];
        let (mcus_x, mcus_y) = self.mcu_grid();
        (mcus_x * info.h_samp * 8, mcus_y * info.v_samp * 8)
    }

    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_log::test;

    fn payload(precision: u8, width: u16, height: u16, comps: &[(u8, u8, u8)]) -> Vec<u8> {
        let mut p = vec![precision];
        p.extend_from_slice(&height.to_be_bytes());
        p.extend_from_slice(&width.to_be_bytes());
        p.push(comps.len() as u8);
        for &(id, hv, q) in comps {
            p.extend_from_slice(&[id, hv, q]);
        }
        p
    }

    #[test]
    fn ycbcr_420() {
        let header =
            FrameHeader::parse(&payload(8, 33, 17, &[(1, 0x22, 0), (2, 0x11, 1), (3, 0x11, 1)]))
                .unwrap();
        assert_eq!((header.width, header.height), (33, 17));
        assert_eq!(header.mcu_size(), (16, 16));
        assert_eq!(header.mcu_grid(), (3, 2));
        assert_eq!(header.plane_size(0), (33, 17));
        assert_eq!(header.plane_size(1), (17, 9));
        assert_eq!(header.plane_storage(0), (48, 32));
        assert_eq!(header.plane_storage(2), (24, 16));
        assert_eq!(header.components[2].quant_table, 1);
    }

    #[test]
    fn grayscale_sampling_is_forced_to_one() {
        let header = FrameHeader::parse(&payload(8, 20, 10, &[(1, 0x22, 0)])).unwrap();
        assert_eq!(header.components[0].h_samp, 1);
        assert_eq!(header.mcu_size(), (8, 8));
        assert_eq!(header.plane_storage(0), (24, 16));
    }

    #[test]
    fn twelve_bit_is_unsupported() {
        let err = FrameHeader::parse(&payload(12, 8, 8, &[(1, 0x11, 0)])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPrecision(12)));
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn component_counts() {
        let two = payload(8, 8, 8, &[(1, 0x11, 0), (2, 0x11, 0)]);
        assert_eq!(FrameHeader::parse(&two).unwrap_err().kind(), ErrorKind::Unsupported);
        let mut short = payload(8, 8, 8, &[(1, 0x11, 0), (2, 0x11, 0)]);
        short[5] = 3;
        assert_eq!(FrameHeader::parse(&short).unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn sampling_factors() {
        let three = payload(8, 64, 64, &[(1, 0x31, 0), (2, 0x11, 0), (3, 0x11, 0)]);
        assert_eq!(FrameHeader::parse(&three).unwrap_err().kind(), ErrorKind::Unsupported);
        let zero = payload(8, 64, 64, &[(1, 0x10, 0), (2, 0x11, 0), (3, 0x11, 0)]);
        assert_eq!(FrameHeader::parse(&zero).unwrap_err().kind(), ErrorKind::Syntax);
        let eight = payload(8, 64, 64, &[(1, 0x81, 0), (2, 0x11, 0), (3, 0x11, 0)]);
        assert_eq!(FrameHeader::parse(&eight).unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn zero_dimension() {
        let err = FrameHeader::parse(&payload(8, 0, 8, &[(1, 0x11, 0)])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn quant_selector_out_of_range() {
        let err = FrameHeader::parse(&payload(8, 8, 8, &[(1, 0x11, 4)])).unwrap_err();
        assert!(matches!(err, Error::InvalidQuantTableIndex(4)));
    }

    #[test]
    fn tiny_subsampled_plane() {
        // Chroma would be 2 samples wide.
        let p = payload(8, 4, 16, &[(1, 0x21, 0), (2, 0x11, 0), (3, 0x11, 0)]);
        assert!(matches!(
            FrameHeader::parse(&p),
            Err(Error::PlaneTooSmall(2, 2, 16))
        ));
    }
}
