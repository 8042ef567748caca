// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

pub const SOF0: u8 = 0xc0;
pub const DHT: u8 = 0xc4;
pub const RST0: u8 = 0xd0;
pub const RST7: u8 = 0xd7;
pub const SOI: u8 = 0xd8;
pub const EOI: u8 = 0xd9;
pub const SOS: u8 = 0xda;
pub const DQT: u8 = 0xdb;
pub const DRI: u8 = 0xdd;
pub const APP0: u8 = 0xe0;
pub const COM: u8 = 0xfe;

/// Classification of the code byte that follows a `0xFF` marker prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    StartOfImage,
    EndOfImage,
    BaselineFrame,
    HuffmanTables,
    QuantTables,
    RestartInterval,
    StartOfScan,
    Restart(u8),
    App(u8),
    Comment,
    /// Any other code, including the non-baseline frame types.
    Other(u8),
}

impl From<u8> for Marker {
    fn from(code: u8) -> Marker {
        match code {
            SOI => Marker::StartOfImage,
            EOI => Marker::EndOfImage,
            SOF0 => Marker::BaselineFrame,
            DHT => Marker::HuffmanTables,
            DQT => Marker::QuantTables,
            DRI => Marker::RestartInterval,
            SOS => Marker::StartOfScan,
            RST0..=RST7 => Marker::Restart(code - RST0),
            0xe0..=0xef => Marker::App(code - APP0),
            COM => Marker::Comment,
            _ => Marker::Other(code),
        }
    }
}
