// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg::api::{DecodeOptions, JpegDecoder, decode, read_info};
use bjpeg_test_utils::{EntropyWriter, FrameComponent, HuffmanSpec, JpegBuilder};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use test_log::test;

fn sample_stream() -> Vec<u8> {
    let dc = HuffmanSpec::standard_dc_luma();
    let ac = HuffmanSpec::ac_all_symbols();
    let mut w = EntropyWriter::new();
    // 24x16 at 2x1: 2x2 MCUs of 2 luma blocks and one block per chroma plane.
    for mcu in 0..4 {
        for block in 0..4 {
            if mcu > 0 && block == 0 {
                w.restart((mcu - 1) as u8);
            }
            let coeffs = [(1, mcu + 1), (5, -(block + 2)), (63, 1)];
            w.block(&dc, &ac, 5 - 3 * block, &coeffs);
        }
    }
    JpegBuilder::new()
        .comment(b"corruption test")
        .flat_quant_table(0, 3)
        .huffman_table(0, 0, &dc)
        .huffman_table(1, 0, &ac)
        .restart_interval(1)
        .frame(
            24,
            16,
            &[
                FrameComponent::new(1, 2, 1, 0),
                FrameComponent::new(2, 1, 1, 0),
                FrameComponent::new(3, 1, 1, 0),
            ],
        )
        .scan(&[(1, 0, 0), (2, 0, 0), (3, 0, 0)], &w.finish())
        .eoi()
        .finish()
}

#[test]
fn sample_stream_decodes() {
    let image = decode(&sample_stream()).unwrap();
    assert_eq!(image.size(), (24, 16));
    assert_eq!(image.data.len(), 24 * 16 * 3);
}

#[test]
fn corrupted_bytes_never_panic() {
    let original = sample_stream();
    let mut options = DecodeOptions::default();
    options.pixel_limit = Some(1 << 20);
    let decoder = JpegDecoder::new(options);
    let mut rng = XorShiftRng::seed_from_u64(0);
    for _ in 0..2000 {
        let mut data = original.clone();
        for _ in 0..rng.random_range(1..4) {
            let pos = rng.random_range(2..data.len());
            data[pos] = rng.random();
        }
        if let Ok(image) = decoder.decode(&data) {
            let info = read_info(&data).unwrap();
            assert_eq!(image.size(), (info.width, info.height));
            assert_eq!(
                image.data.len(),
                image.width * image.height * image.channels()
            );
        }
    }
}

#[test]
fn truncated_streams_never_panic() {
    let original = sample_stream();
    for len in 0..original.len() {
        let _ = decode(&original[..len]);
        let _ = read_info(&original[..len]);
    }
}
