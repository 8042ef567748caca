// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::headers::markers::{EOI, RST0, RST7};

/// Reads bits MSB-first from entropy-coded data.
///
/// Stuffed `0xFF 0x00` pairs yield a single `0xFF` data byte and `0xFF 0xFF`
/// fill bytes are skipped. Any other `0xFF xx` pair is a marker: the reader
/// stops in front of it and from then on supplies 1-bits, as it does past
/// the end of the data. Such padding bits are counted once consumed.
///
/// Only restart markers and end-of-image may legitimately end the data. If
/// padding is consumed in front of any other marker, that marker is reported
/// by [`BitReader::overrun_marker`].
#[derive(Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    bit_buf: u64,
    bits_in_buf: usize,
    // Synthesized bits sit at the low end of `bit_buf`.
    padding_in_buf: usize,
    marker: Option<u8>,
    padding_bits_consumed: usize,
    overrun_marker: Option<u8>,
}

impl Debug for BitReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitReader{{ data: [{} bytes], pos: {}, bits_in_buf: {}, marker: {:?}, padding_bits_consumed: {} }}",
            self.data.len(),
            self.pos,
            self.bits_in_buf,
            self.marker,
            self.padding_bits_consumed
        )
    }
}

pub const MAX_BITS_PER_PEEK: usize = 16;

// Refill stops once more than this many bits are buffered.
const REFILL_TARGET: usize = 48;

impl<'a> BitReader<'a> {
    /// Constructs a BitReader over the entropy-coded data that starts at `data[0]`.
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            pos: 0,
            bit_buf: 0,
            bits_in_buf: 0,
            padding_in_buf: 0,
            marker: None,
            padding_bits_consumed: 0,
            overrun_marker: None,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.marker.is_some() {
            return None;
        }
        loop {
            let byte = *self.data.get(self.pos)?;
            if byte != 0xff {
                self.pos += 1;
                return Some(byte);
            }
            match self.data.get(self.pos + 1) {
                // A lone trailing 0xFF ends the data.
                None => return None,
                Some(0x00) => {
                    self.pos += 2;
                    return Some(0xff);
                }
                Some(0xff) => self.pos += 1,
                Some(&code) => {
                    self.marker = Some(code);
                    return None;
                }
            }
        }
    }

    fn refill(&mut self) {
        while self.bits_in_buf <= REFILL_TARGET {
            let byte = match self.next_byte() {
                Some(byte) => byte,
                None => {
                    self.padding_in_buf += 8;
                    0xff
                }
            };
            self.bit_buf = (self.bit_buf << 8) | byte as u64;
            self.bits_in_buf += 8;
        }
    }

    /// Returns the next `num` bits without consuming them.
    /// ```
    /// # use bjpeg::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0b1010_0000]);
    /// assert_eq!(br.peek(3), 0b101);
    /// assert_eq!(br.peek(3), 0b101);
    /// // Past the end of the data the reader supplies 1-bits.
    /// assert_eq!(br.peek(12), 0b1010_0000_1111);
    /// ```
    pub fn peek(&mut self, num: usize) -> u32 {
        debug_assert!(num <= MAX_BITS_PER_PEEK);
        if num == 0 {
            return 0;
        }
        if self.bits_in_buf < num {
            self.refill();
        }
        ((self.bit_buf >> (self.bits_in_buf - num)) & ((1u64 << num) - 1)) as u32
    }

    /// Consumes `num` bits.
    pub fn skip(&mut self, num: usize) {
        debug_assert!(num <= MAX_BITS_PER_PEEK);
        if self.bits_in_buf < num {
            self.refill();
        }
        let real_bits = self.bits_in_buf - self.padding_in_buf;
        if num > real_bits {
            let padded = num - real_bits;
            self.padding_in_buf -= padded;
            self.padding_bits_consumed += padded;
            if let Some(code) = self.marker.filter(|&code| !ends_entropy_coded_data(code)) {
                self.overrun_marker = self.overrun_marker.or(Some(code));
            }
        }
        self.bits_in_buf -= num;
    }

    /// Reads `num` bits as an unsigned value.
    /// ```
    /// # use bjpeg::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0xff, 0x00, 0x12]);
    /// assert_eq!(br.read(4), 0xf);
    /// assert_eq!(br.read(8), 0xf1);
    /// assert_eq!(br.read(4), 0x2);
    /// assert_eq!(br.padding_bits_consumed(), 0);
    /// ```
    pub fn read(&mut self, num: usize) -> u32 {
        let ret = self.peek(num);
        self.skip(num);
        ret
    }

    /// Discards the bits left in a partially consumed byte.
    pub fn align_to_byte(&mut self) {
        self.bits_in_buf -= self.bits_in_buf % 8;
        self.padding_in_buf = self.padding_in_buf.min(self.bits_in_buf);
    }

    /// Consumes the marker that ends the current entropy-coded segment and
    /// returns its code.
    ///
    /// The reader must be byte aligned. Returns `None` if data bytes remain
    /// before the marker, or if the data ends first. The bit buffer is
    /// cleared, so reading continues with the bytes after the marker.
    pub fn read_marker(&mut self) -> Option<u8> {
        debug_assert_eq!(self.bits_in_buf % 8, 0);
        let unread_data_bytes = (self.bits_in_buf - self.padding_in_buf) / 8;
        self.bit_buf = 0;
        self.bits_in_buf = 0;
        self.padding_in_buf = 0;
        if unread_data_bytes > 0 {
            return None;
        }
        if let Some(code) = self.marker.take() {
            self.pos += 2;
            return Some(code);
        }
        while self.data.get(self.pos) == Some(&0xff) {
            match self.data.get(self.pos + 1) {
                Some(0xff) => self.pos += 1,
                Some(0x00) | None => return None,
                Some(&code) => {
                    self.pos += 2;
                    return Some(code);
                }
            }
        }
        None
    }

    /// Byte offset of the next unread byte, relative to the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of synthesized padding bits that have been consumed so far.
    pub fn padding_bits_consumed(&self) -> usize {
        self.padding_bits_consumed
    }

    /// The first marker other than `RSTn` or EOI that padding bits were
    /// consumed in front of.
    pub fn overrun_marker(&self) -> Option<u8> {
        self.overrun_marker
    }
}

fn ends_entropy_coded_data(code: u8) -> bool {
    matches!(code, RST0..=RST7 | EOI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn reads_msb_first() {
        let mut br = BitReader::new(&[0b1100_1010, 0b0101_0011]);
        assert_eq!(br.read(1), 1);
        assert_eq!(br.read(3), 0b100);
        assert_eq!(br.read(6), 0b1010_01);
        assert_eq!(br.read(6), 0b01_0011);
        assert_eq!(br.padding_bits_consumed(), 0);
        assert_eq!(br.read(5), 0b11111);
        assert_eq!(br.padding_bits_consumed(), 5);
    }

    #[test]
    fn skips_fill_bytes() {
        let mut br = BitReader::new(&[0x12, 0xff, 0xff, 0xff, 0x00, 0x34]);
        assert_eq!(br.read(8), 0x12);
        assert_eq!(br.read(8), 0xff);
        assert_eq!(br.read(8), 0x34);
        assert_eq!(br.position(), 6);
    }

    #[test]
    fn stops_at_marker() {
        let data = [0xab, 0xff, 0xd0, 0x01];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read(8), 0xab);
        // The marker is not consumed as data.
        assert_eq!(br.peek(16), 0xffff);
        assert_eq!(br.position(), 1);
        assert_eq!(br.read_marker(), Some(0xd0));
        assert_eq!(br.read(8), 0x01);
        assert_eq!(br.padding_bits_consumed(), 0);
    }

    #[test]
    fn marker_after_partial_byte() {
        let data = [0b1011_0111, 0xff, 0xd3, 0x80];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read(3), 0b101);
        br.align_to_byte();
        assert_eq!(br.read_marker(), Some(0xd3));
        assert_eq!(br.read(1), 1);
    }

    #[test]
    fn read_marker_with_data_left() {
        let data = [0x11, 0x22, 0xff, 0xd0];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read(8), 0x11);
        assert_eq!(br.read_marker(), None);
    }

    #[test]
    fn read_marker_at_end() {
        let mut br = BitReader::new(&[0x11]);
        assert_eq!(br.read(8), 0x11);
        assert_eq!(br.read_marker(), None);
    }

    #[test]
    fn padding_in_front_of_foreign_marker() {
        let data = [0xab, 0xff, 0xc4, 0x00, 0x02];
        let mut br = BitReader::new(&data);
        assert_eq!(br.read(8), 0xab);
        assert_eq!(br.overrun_marker(), None);
        assert_eq!(br.read(4), 0xf);
        assert_eq!(br.overrun_marker(), Some(0xc4));

        for code in [0xd0, 0xd7, 0xd9] {
            let data = [0xab, 0xff, code];
            let mut br = BitReader::new(&data);
            assert_eq!(br.read(16), 0xabff);
            assert_eq!(br.padding_bits_consumed(), 8);
            assert_eq!(br.overrun_marker(), None);
        }
    }

    #[test]
    fn lone_trailing_ff_ends_data() {
        let mut br = BitReader::new(&[0x0f, 0xff]);
        assert_eq!(br.read(8), 0x0f);
        assert_eq!(br.read(8), 0xff);
        assert_eq!(br.padding_bits_consumed(), 8);
    }

    #[test]
    fn random_streams_never_panic() {
        arbtest::arbtest(|u| {
            let data: Vec<u8> = u.arbitrary()?;
            let mut br = BitReader::new(&data);
            for _ in 0..64 {
                let num = u.int_in_range(0..=16)?;
                match u.int_in_range(0..=3u8)? {
                    0 => {
                        br.peek(num);
                    }
                    1 => br.skip(num),
                    2 => {
                        br.read(num);
                    }
                    _ => {
                        br.align_to_byte();
                        br.read_marker();
                    }
                }
                assert!(br.position() <= data.len());
            }
            Ok(())
        });
    }
}
