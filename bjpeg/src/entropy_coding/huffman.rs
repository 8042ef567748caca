// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{
    bit_reader::BitReader,
    error::{Error, Result},
    headers::markers::DHT,
    util::{tracing_wrappers::*, try_filled_vec},
};

pub const MAX_CODE_LENGTH: usize = 16;
pub const TABLE_SIZE: usize = 1 << MAX_CODE_LENGTH;

/// Two DC tables followed by two AC tables.
pub const NUM_HUFFMAN_TABLES: usize = 4;

/// Table slot for a DC (`class == 0`) or AC (`class == 1`) table id.
pub fn table_slot(class: usize, id: usize) -> usize {
    class * 2 + id
}

/// One entry of the flat lookup table. A `length` of 0 marks a bit pattern
/// that no code covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanEntry {
    pub length: u8,
    pub symbol: u8,
}

/// Direct lookup table indexed by the next 16 bits of the stream.
pub struct HuffmanTable {
    entries: Box<[HuffmanEntry]>,
}

impl std::fmt::Debug for HuffmanTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let covered = self.entries.iter().filter(|e| e.length != 0).count();
        write!(f, "HuffmanTable {{ covered: {covered}/{TABLE_SIZE} }}")
    }
}

impl HuffmanTable {
    /// Builds the table from the per-length code counts and the symbols in
    /// order of increasing code length.
    ///
    /// Each code of length `l` fills `2^(16 - l)` consecutive entries,
    /// starting right after the previous code. Entries past the last code
    /// stay unassigned.
    pub fn build(counts: &[u8; MAX_CODE_LENGTH], symbols: &[u8]) -> Result<HuffmanTable> {
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if total != symbols.len() {
            return Err(Error::HuffmanSymbolCount(total, symbols.len()));
        }
        let mut entries = try_filled_vec(TABLE_SIZE, HuffmanEntry::default())?;
        let mut remaining = TABLE_SIZE as isize;
        let mut spread = TABLE_SIZE;
        let mut next = 0;
        let mut symbols = symbols.iter();
        for (length, &count) in (1..=MAX_CODE_LENGTH).zip(counts.iter()) {
            spread >>= 1;
            if count == 0 {
                continue;
            }
            remaining -= (count as isize) << (MAX_CODE_LENGTH - length);
            if remaining < 0 {
                return Err(Error::OversubscribedHuffman(length));
            }
            for &symbol in symbols.by_ref().take(count as usize) {
                entries[next..next + spread].fill(HuffmanEntry {
                    length: length as u8,
                    symbol,
                });
                next += spread;
            }
        }
        Ok(HuffmanTable {
            entries: entries.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn entry(&self, bits: u16) -> HuffmanEntry {
        self.entries[bits as usize]
    }

    /// Decodes one symbol, consuming exactly its code length.
    #[inline]
    pub fn decode(&self, br: &mut BitReader) -> Result<u8> {
        let entry = self.entry(br.peek(MAX_CODE_LENGTH) as u16);
        if entry.length == 0 {
            return Err(Error::InvalidHuffman);
        }
        br.skip(entry.length as usize);
        Ok(entry.symbol)
    }
}

/// Parses a DHT payload, which may define several tables, into `tables`.
pub fn parse_huffman_tables(
    mut payload: &[u8],
    tables: &mut [Option<HuffmanTable>; NUM_HUFFMAN_TABLES],
) -> Result<()> {
    const HEADER_BYTES: usize = 1 + MAX_CODE_LENGTH;
    while payload.len() >= HEADER_BYTES {
        let spec = payload[0];
        if spec & 0xec != 0 {
            return Err(Error::InvalidHuffmanTableSpec(spec));
        }
        let (class, id) = ((spec >> 4) as usize, spec & 0x3);
        if id >= 2 {
            return Err(Error::UnsupportedHuffmanTable(id));
        }
        let mut counts = [0u8; MAX_CODE_LENGTH];
        counts.copy_from_slice(&payload[1..HEADER_BYTES]);
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if payload.len() < HEADER_BYTES + total {
            return Err(Error::SegmentTooShort {
                marker: DHT,
                length: payload.len(),
                min: HEADER_BYTES + total,
            });
        }
        let slot = table_slot(class, id as usize);
        trace!(class, id, total, "huffman table");
        tables[slot] = Some(HuffmanTable::build(
            &counts,
            &payload[HEADER_BYTES..HEADER_BYTES + total],
        )?);
        payload = &payload[HEADER_BYTES + total..];
    }
    if !payload.is_empty() {
        return Err(Error::TrailingSegmentBytes(DHT, payload.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_log::test;

    fn counts(pairs: &[(usize, u8)]) -> [u8; MAX_CODE_LENGTH] {
        let mut counts = [0; MAX_CODE_LENGTH];
        for &(length, count) in pairs {
            counts[length - 1] = count;
        }
        counts
    }

    #[test]
    fn decodes_canonical_codes() {
        // Codes: 00 -> 5, 01 -> 6, 100 -> 7.
        let table = HuffmanTable::build(&counts(&[(2, 2), (3, 1)]), &[5, 6, 7]).unwrap();
        let data = [0b0001_1000, 0b0000_0000];
        let mut br = BitReader::new(&data);
        assert_eq!(table.decode(&mut br).unwrap(), 5);
        assert_eq!(table.decode(&mut br).unwrap(), 6);
        assert_eq!(table.decode(&mut br).unwrap(), 7);
        assert_eq!(table.decode(&mut br).unwrap(), 5);
    }

    #[test]
    fn unassigned_pattern_is_invalid() {
        let table = HuffmanTable::build(&counts(&[(1, 1)]), &[9]).unwrap();
        let mut br = BitReader::new(&[0x80]);
        assert!(matches!(table.decode(&mut br), Err(Error::InvalidHuffman)));
        assert_eq!(table.entry(0x7fff).symbol, 9);
        assert_eq!(table.entry(0x8000).length, 0);
    }

    #[test]
    fn oversubscribed() {
        let err = HuffmanTable::build(&counts(&[(1, 3)]), &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::OversubscribedHuffman(1)));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn complete_sixteen_bit_code() {
        let mut c = counts(&[(8, 255)]);
        c[15] = 255;
        let symbols: Vec<u8> = (0..=254).chain(0..=254).collect();
        let table = HuffmanTable::build(&c, &symbols).unwrap();
        assert_eq!(table.entry(0x0000).length, 8);
        assert_eq!(table.entry(0xfeff).length, 8);
        assert_eq!(table.entry(0xff00).length, 16);
        assert_eq!(table.entry(0xfffe).symbol, 254);
        assert_eq!(table.entry(0xffff).length, 0);
    }

    #[test]
    fn spans_cover_codes_in_order() {
        arbtest::arbtest(|u| {
            let mut counts = [0u8; MAX_CODE_LENGTH];
            let mut remaining = TABLE_SIZE;
            let mut total = 0;
            for length in 1..=MAX_CODE_LENGTH {
                let span = 1 << (MAX_CODE_LENGTH - length);
                let max = (remaining / span).min(255).min(256 - total);
                let count = u.int_in_range(0..=max)?;
                counts[length - 1] = count as u8;
                remaining -= count * span;
                total += count;
            }
            let symbols: Vec<u8> = (0..total).map(|s| s as u8).collect();
            let table = HuffmanTable::build(&counts, &symbols).unwrap();

            let mut index = 0usize;
            let mut symbol = 0usize;
            for length in 1..=MAX_CODE_LENGTH {
                let span = 1 << (MAX_CODE_LENGTH - length);
                for _ in 0..counts[length - 1] {
                    let expected = HuffmanEntry {
                        length: length as u8,
                        symbol: symbol as u8,
                    };
                    for bits in index..index + span {
                        assert_eq!(table.entry(bits as u16), expected);
                    }
                    index += span;
                    symbol += 1;
                }
            }
            for bits in index..TABLE_SIZE {
                assert_eq!(table.entry(bits as u16).length, 0);
            }
            Ok(())
        });
    }

    fn empty_tables() -> [Option<HuffmanTable>; NUM_HUFFMAN_TABLES] {
        array_init::array_init(|_| None)
    }

    fn segment(spec: u8, counts: &[u8; MAX_CODE_LENGTH], symbols: &[u8]) -> Vec<u8> {
        let mut payload = vec![spec];
        payload.extend_from_slice(counts);
        payload.extend_from_slice(symbols);
        payload
    }

    #[test]
    fn slots() {
        let c = counts(&[(1, 1)]);
        let mut payload = segment(0x00, &c, &[1]);
        payload.extend(segment(0x11, &c, &[2]));
        payload.extend(segment(0x10, &c, &[3]));
        let mut tables = empty_tables();
        parse_huffman_tables(&payload, &mut tables).unwrap();
        let symbol = |slot: usize| tables[slot].as_ref().map(|t| t.entry(0).symbol);
        assert_eq!(symbol(0), Some(1));
        assert_eq!(symbol(1), None);
        assert_eq!(symbol(2), Some(3));
        assert_eq!(symbol(3), Some(2));
    }

    #[test]
    fn bad_class_id() {
        let c = counts(&[(1, 1)]);
        let err = parse_huffman_tables(&segment(0x20, &c, &[1]), &mut empty_tables());
        assert!(matches!(err, Err(Error::InvalidHuffmanTableSpec(0x20))));
        let err = parse_huffman_tables(&segment(0x02, &c, &[1]), &mut empty_tables());
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn truncated_symbols() {
        let c = counts(&[(2, 3)]);
        let err = parse_huffman_tables(&segment(0x00, &c, &[1, 2]), &mut empty_tables());
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn trailing_bytes() {
        let mut payload = segment(0x00, &counts(&[(1, 1)]), &[1]);
        payload.extend_from_slice(&[0, 0, 0]);
        let err = parse_huffman_tables(&payload, &mut empty_tables());
        assert!(matches!(err, Err(Error::TrailingSegmentBytes(DHT, 3))));
    }
}
