// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub const JPEG_SIGNATURE: [u8; 2] = [0xff, 0xd8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCheck {
    Jpeg,
    NotJpeg,
    /// The prefix matches the start of the signature but is too short.
    NeedsMoreInput,
}

/// Checks if the given buffer starts with a start-of-image marker.
pub fn check_signature(file_prefix: &[u8]) -> SignatureCheck {
    let len_to_check = file_prefix.len().min(JPEG_SIGNATURE.len());
    if file_prefix[..len_to_check] != JPEG_SIGNATURE[..len_to_check] {
        SignatureCheck::NotJpeg
    } else if file_prefix.len() >= JPEG_SIGNATURE.len() {
        SignatureCheck::Jpeg
    } else {
        SignatureCheck::NeedsMoreInput
    }
}
