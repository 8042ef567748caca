// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    api::{ColorType, DecodeOptions, DecodedImage, JpegInfo, SegmentInfo},
    entropy_coding::{
        HuffmanTable, NUM_HUFFMAN_TABLES, huffman::table_slot, parse_huffman_tables,
    },
    error::{Error, Result},
    frame::{BlockTables, Component, ScanDecoder},
    headers::{
        FrameHeader, Marker, QuantTable, ScanHeader, SegmentReader, markers::SOI,
        parse_restart_interval,
        quant_table::{NUM_QUANT_TABLES, parse_quant_tables},
    },
    render::render,
    util::tracing_wrappers::*,
};

/// State of a single decode: the marker stream position and every table
/// defined so far. Each call to the public API builds a fresh one.
pub struct Decoder<'a> {
    reader: SegmentReader<'a>,
    options: DecodeOptions,
    frame: Option<FrameHeader>,
    quant_tables: [Option<QuantTable>; NUM_QUANT_TABLES],
    huffman_tables: [Option<HuffmanTable>; NUM_HUFFMAN_TABLES],
    restart_interval: u16,
    skipped_segments: Vec<SegmentInfo>,
}

impl<'a> Decoder<'a> {
    /// Checks the start-of-image marker.
    pub fn new(data: &'a [u8], options: DecodeOptions) -> Result<Decoder<'a>> {
        if data.len() < 2 {
            return Err(Error::InputTooShort(data.len()));
        }
        if data[0] != 0xff || data[1] != SOI {
            return Err(Error::InvalidSignature(data[0], data[1]));
        }
        let mut reader = SegmentReader::new(data);
        reader.advance(2)?;
        Ok(Decoder {
            reader,
            options,
            frame: None,
            quant_tables: array_init::array_init(|_| None),
            huffman_tables: array_init::array_init(|_| None),
            restart_interval: 0,
            skipped_segments: Vec::new(),
        })
    }

    fn set_frame(&mut self, payload: &[u8]) -> Result<()> {
        if self.frame.is_some() {
            return Err(Error::DuplicateFrameHeader);
        }
        let frame = FrameHeader::parse(payload)?;
        if let Some(limit) = self.options.pixel_limit {
            if frame.num_pixels() > limit {
                return Err(Error::ImageSizeTooLarge(frame.width, frame.height));
            }
        }
        self.frame = Some(frame);
        Ok(())
    }

    /// Processes segments up to and including the start-of-scan header,
    /// leaving the reader at the first byte of entropy-coded data.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all, err))]
    pub fn read_headers(&mut self) -> Result<ScanHeader> {
        loop {
            let offset = self.reader.position();
            let code = self.reader.read_marker()?;
            let marker = Marker::from(code);
            trace!(?marker, offset, "segment");
            match marker {
                Marker::BaselineFrame => {
                    let payload = self.reader.read_segment(code)?;
                    self.set_frame(payload)?;
                }
                Marker::HuffmanTables => {
                    let payload = self.reader.read_segment(code)?;
                    parse_huffman_tables(payload, &mut self.huffman_tables)?;
                }
                Marker::QuantTables => {
                    let payload = self.reader.read_segment(code)?;
                    parse_quant_tables(payload, &mut self.quant_tables)?;
                }
                Marker::RestartInterval => {
                    let payload = self.reader.read_segment(code)?;
                    self.restart_interval = parse_restart_interval(payload)?;
                    debug!(interval = self.restart_interval, "restart interval");
                }
                Marker::StartOfScan => {
                    let payload = self.reader.read_segment(code)?;
                    let Some(frame) = &self.frame else {
                        return Err(Error::ScanBeforeFrame);
                    };
                    return ScanHeader::parse(payload, frame);
                }
                Marker::App(_) | Marker::Comment => {
                    let payload = self.reader.read_segment(code)?;
                    self.skipped_segments.push(SegmentInfo {
                        marker: code,
                        offset,
                        length: payload.len() + 2,
                    });
                }
                Marker::EndOfImage => return Err(Error::NoScan),
                Marker::StartOfImage | Marker::Restart(_) | Marker::Other(_) => {
                    return Err(Error::UnsupportedMarker(code));
                }
            }
        }
    }

    fn block_tables(&self, frame: &FrameHeader, scan: &ScanHeader) -> Result<Vec<BlockTables<'_>>> {
        let huffman = |slot: usize| {
            self.huffman_tables[slot]
                .as_ref()
                .ok_or(Error::UndefinedHuffmanTable(slot))
        };
        let mut tables = Vec::with_capacity(scan.components.len());
        for bindings in scan.components.iter() {
            let info = &frame.components[bindings.component];
            let quant = self.quant_tables[info.quant_table]
                .as_ref()
                .ok_or(Error::UndefinedQuantTable(info.quant_table))?;
            tables.push(BlockTables {
                dc: huffman(table_slot(0, bindings.dc_table))?,
                ac: huffman(table_slot(1, bindings.ac_table))?,
                quant,
            });
        }
        Ok(tables)
    }

    /// Header summary; valid once [`Self::read_headers`] succeeded.
    pub fn info(&self) -> Result<JpegInfo> {
        let frame = self.frame.as_ref().ok_or(Error::ScanBeforeFrame)?;
        Ok(JpegInfo {
            width: frame.width,
            height: frame.height,
            components: frame.components.clone(),
            restart_interval: self.restart_interval,
            segments: self.skipped_segments.clone(),
            entropy_coded_offset: self.reader.position(),
        })
    }

    /// Decodes the image, consuming the decoder.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all, err))]
    pub fn decode(mut self) -> Result<DecodedImage> {
        let scan = self.read_headers()?;
        let frame = self.frame.take().ok_or(Error::ScanBeforeFrame)?;
        let color_type = match (frame.components.len(), self.options.convert_rgb) {
            (1, _) => ColorType::Grayscale,
            (_, true) => ColorType::Rgb,
            (_, false) => ColorType::YCbCr,
        };

        let mut components = Vec::with_capacity(frame.components.len());
        for c in 0..frame.components.len() {
            components.push(Component::new(&frame, c)?);
        }
        let tables = self.block_tables(&frame, &scan)?;
        let scan_decoder = ScanDecoder::new(
            self.reader.remaining(),
            tables,
            frame.mcu_grid(),
            self.restart_interval as usize,
        );
        let summary = scan_decoder.run(&mut components)?;
        if summary.padding_bits > 0 {
            warn!(
                padding_bits = summary.padding_bits,
                "entropy-coded data ended before the last MCU"
            );
            if !self.options.allow_truncated {
                return Err(Error::TruncatedScan(summary.padding_bits));
            }
        }

        let size = (frame.width, frame.height);
        let data = render(components, size, color_type)?;
        Ok(DecodedImage {
            width: frame.width,
            height: frame.height,
            color_type,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use bjpeg_test_utils::{FrameComponent, HuffmanSpec, JpegBuilder};
    use test_log::test;

    fn headers() -> JpegBuilder {
        JpegBuilder::new()
            .flat_quant_table(0, 1)
            .huffman_table(0, 0, &HuffmanSpec::dc_all_categories())
            .huffman_table(1, 0, &HuffmanSpec::ac_all_symbols())
    }

    #[test]
    fn not_this_format() {
        let inputs: [&[u8]; 4] = [&[], &[0xff], &[0x89, b'P', b'N', b'G'], &[0xff, 0xd9]];
        for data in inputs {
            let err = Decoder::new(data, DecodeOptions::default()).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::NotThisFormat);
        }
    }

    #[test]
    fn records_skipped_segments() {
        let data = headers()
            .app(0, b"JFIF\0")
            .comment(b"hello")
            .restart_interval(4)
            .frame(8, 8, &[FrameComponent::new(1, 1, 1, 0)])
            .scan(&[(1, 0, 0)], &[])
            .finish();
        let mut decoder = Decoder::new(&data, DecodeOptions::default()).unwrap();
        let scan = decoder.read_headers().unwrap();
        assert_eq!(scan.components.len(), 1);
        let info = decoder.info().unwrap();
        assert_eq!(info.restart_interval, 4);
        assert_eq!(info.entropy_coded_offset, data.len());
        assert_eq!(info.segments.len(), 2);
        assert_eq!(info.segments[0].marker, 0xe0);
        assert_eq!(info.segments[1].length, 7);
    }

    #[test]
    fn scan_before_frame() {
        let data = headers().scan(&[(1, 0, 0)], &[]).finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::ScanBeforeFrame));
    }

    #[test]
    fn duplicate_frame() {
        let c = [FrameComponent::new(1, 1, 1, 0)];
        let data = headers().frame(8, 8, &c).frame(8, 8, &c).finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateFrameHeader));
    }

    #[test]
    fn end_of_image_before_scan() {
        let data = headers().eoi().finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::NoScan));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn progressive_frame_is_unsupported() {
        let data = headers().segment(0xc2, &[8, 0, 8, 0, 8, 1, 1, 0x11, 0]).finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMarker(0xc2)));
    }

    #[test]
    fn undefined_tables() {
        let c = [FrameComponent::new(1, 1, 1, 2)];
        let data = headers().frame(8, 8, &c).scan(&[(1, 0, 0)], &[]).finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::UndefinedQuantTable(2)));

        let c = [FrameComponent::new(1, 1, 1, 0)];
        let data = headers().frame(8, 8, &c).scan(&[(1, 1, 0)], &[]).finish();
        let err = Decoder::new(&data, DecodeOptions::default())
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::UndefinedHuffmanTable(1)));
    }

    #[test]
    fn pixel_limit() {
        let c = [FrameComponent::new(1, 1, 1, 0)];
        let data = headers().frame(100, 100, &c).finish();
        let mut options = DecodeOptions::default();
        options.pixel_limit = Some(9999);
        let err = Decoder::new(&data, options)
            .unwrap()
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::ImageSizeTooLarge(100, 100)));
    }
}
