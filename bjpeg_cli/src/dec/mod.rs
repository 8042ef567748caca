// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::{
    path::Path,
    time::{Duration, Instant},
};

use bjpeg::api::{DecodeOptions, DecodedImage, JpegDecoder, SignatureCheck, check_signature};
use color_eyre::eyre::{Result, WrapErr, eyre};

/// Decodes `data`, returning the image and the time spent decoding.
pub fn decode_bytes(data: &[u8], options: DecodeOptions) -> Result<(DecodedImage, Duration)> {
    match check_signature(data) {
        SignatureCheck::Jpeg => {}
        SignatureCheck::NeedsMoreInput => return Err(eyre!("Source file truncated")),
        SignatureCheck::NotJpeg => return Err(eyre!("Not a JPEG file")),
    }
    let start = Instant::now();
    let image = JpegDecoder::new(options).decode(data)?;
    Ok((image, start.elapsed()))
}

pub fn decode_file(path: &Path, options: DecodeOptions) -> Result<(DecodedImage, Duration)> {
    let data = std::fs::read(path).wrap_err_with(|| format!("Cannot read {}", path.display()))?;
    decode_bytes(&data, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bjpeg_test_utils::{EntropyWriter, FrameComponent, HuffmanSpec, JpegBuilder};

    #[test]
    fn decodes_synthetic_stream() {
        let dc = HuffmanSpec::dc_all_categories();
        let ac = HuffmanSpec::ac_all_symbols();
        let mut w = EntropyWriter::new();
        w.block(&dc, &ac, 0, &[]);
        let data = JpegBuilder::new()
            .flat_quant_table(0, 1)
            .huffman_table(0, 0, &dc)
            .huffman_table(1, 0, &ac)
            .frame(8, 8, &[FrameComponent::new(1, 1, 1, 0)])
            .scan(&[(1, 0, 0)], &w.finish())
            .eoi()
            .finish();
        let (image, _) = decode_bytes(&data, DecodeOptions::default()).unwrap();
        assert_eq!(image.data, vec![128; 64]);
    }

    #[test]
    fn rejects_other_formats() {
        let err = decode_bytes(b"\x89PNG\r\n", DecodeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Not a JPEG file");
        assert!(decode_bytes(&[0xff], DecodeOptions::default()).is_err());
    }
}
