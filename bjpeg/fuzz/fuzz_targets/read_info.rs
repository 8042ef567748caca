// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use bjpeg::api::read_info;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(info) = read_info(data) {
        assert!(info.entropy_coded_offset <= data.len());
        assert!(info.width > 0 && info.height > 0);
    }
});
