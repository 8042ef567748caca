// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Bounds-checked cursor over the marker stream.
#[derive(Debug, Clone)]
pub struct SegmentReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SegmentReader<'a> {
    pub fn new(data: &'a [u8]) -> SegmentReader<'a> {
        SegmentReader { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the input.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn advance(&mut self, num: usize) -> Result<()> {
        if num > self.data.len() - self.pos {
            return Err(Error::FileTruncated(self.data.len()));
        }
        self.pos += num;
        Ok(())
    }

    /// Reads a `0xFF`-prefixed marker code. Extra `0xFF` fill bytes before
    /// the code are skipped.
    pub fn read_marker(&mut self) -> Result<u8> {
        match self.data.get(self.pos) {
            None => return Err(Error::FileTruncated(self.pos)),
            Some(&0xff) => {}
            Some(&byte) => return Err(Error::ExpectedMarker(self.pos, byte)),
        }
        loop {
            self.pos += 1;
            match self.data.get(self.pos) {
                None => return Err(Error::FileTruncated(self.pos)),
                Some(&0xff) => {}
                Some(&code) => {
                    self.pos += 1;
                    return Ok(code);
                }
            }
        }
    }

    /// Reads the big-endian length field of the segment introduced by
    /// `marker` and returns its payload, the bytes after the length field.
    pub fn read_segment(&mut self, marker: u8) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if available < 2 {
            return Err(Error::FileTruncated(self.data.len()));
        }
        let length = BigEndian::read_u16(&self.data[self.pos..]) as usize;
        if length < 2 {
            return Err(Error::InvalidSegmentLength(marker, length));
        }
        if length > available {
            return Err(Error::SegmentTooLong {
                marker,
                length,
                available,
            });
        }
        let payload = &self.data[self.pos + 2..self.pos + length];
        self.pos += length;
        Ok(payload)
    }
}
