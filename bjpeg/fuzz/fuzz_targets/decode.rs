// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use bjpeg::api::{DecodeOptions, JpegDecoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut options = DecodeOptions::default();
    options.pixel_limit = Some(1 << 24);
    if let Ok(image) = JpegDecoder::new(options).decode(data) {
        assert_eq!(
            image.data.len(),
            image.width * image.height * image.channels()
        );
    }
});
