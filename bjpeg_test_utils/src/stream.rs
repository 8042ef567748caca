// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Natural-order index of each zig-zag position.
const ZIGZAG: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27,
    20, 13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58,
    59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// MSB-first bit sink with 0xFF byte stuffing.
#[derive(Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u32,
    nbits: u32,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    pub fn write(&mut self, value: u32, nbits: u32) {
        assert!(nbits <= 16);
        for i in (0..nbits).rev() {
            self.acc = (self.acc << 1) | ((value >> i) & 1);
            self.nbits += 1;
            if self.nbits == 8 {
                self.push_byte(self.acc as u8);
                self.acc = 0;
                self.nbits = 0;
            }
        }
    }

    /// Pads the current byte with 1-bits.
    pub fn align(&mut self) {
        if self.nbits > 0 {
            let pad = 8 - self.nbits;
            self.write((1 << pad) - 1, pad);
        }
    }

    /// Writes a marker without stuffing; the writer must be byte aligned.
    pub fn marker(&mut self, code: u8) {
        assert_eq!(self.nbits, 0);
        self.out.extend_from_slice(&[0xff, code]);
    }

    fn push_byte(&mut self, byte: u8) {
        self.out.push(byte);
        if byte == 0xff {
            self.out.push(0x00);
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.out
    }
}

/// A Huffman table as transmitted: code counts per length and the symbols in
/// order of increasing code length.
#[derive(Clone, Debug)]
pub struct HuffmanSpec {
    pub counts: [u8; 16],
    pub symbols: Vec<u8>,
    codes: Vec<Option<(u16, u8)>>,
}

impl HuffmanSpec {
    pub fn new(counts: [u8; 16], symbols: &[u8]) -> HuffmanSpec {
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        assert_eq!(total, symbols.len());
        let mut codes = vec![None; 256];
        let mut code = 0u32;
        let mut next = symbols.iter();
        for (length, &count) in (1..=16u8).zip(counts.iter()) {
            for _ in 0..count {
                let symbol = *next.next().unwrap();
                codes[symbol as usize] = Some((code as u16, length));
                code += 1;
            }
            code <<= 1;
        }
        HuffmanSpec {
            counts,
            symbols: symbols.to_vec(),
            codes,
        }
    }

    /// Every symbol gets a code of the same `length`.
    pub fn fixed_length(length: u8, symbols: &[u8]) -> HuffmanSpec {
        let mut counts = [0u8; 16];
        counts[length as usize - 1] = symbols.len() as u8;
        HuffmanSpec::new(counts, symbols)
    }

    /// DC table with 4-bit codes for categories 0..=11.
    pub fn dc_all_categories() -> HuffmanSpec {
        HuffmanSpec::fixed_length(4, &(0..12).collect::<Vec<_>>())
    }

    /// AC table with 8-bit codes for every run/size symbol.
    ///
    /// 256 codes do not fit in one count byte, so the last symbol gets a
    /// 9-bit code; it is never emitted by tests.
    pub fn ac_all_symbols() -> HuffmanSpec {
        let mut counts = [0u8; 16];
        counts[7] = 255;
        counts[8] = 1;
        let symbols: Vec<u8> = (0..=255).collect();
        HuffmanSpec::new(counts, &symbols)
    }

    /// Luminance DC table from the format's informative annex.
    pub fn standard_dc_luma() -> HuffmanSpec {
        HuffmanSpec::new(
            [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
            &(0..12).collect::<Vec<_>>(),
        )
    }

    pub fn code(&self, symbol: u8) -> (u16, u8) {
        self.codes[symbol as usize].unwrap_or_else(|| panic!("no code for symbol {symbol:#x}"))
    }

    fn payload(&self, class: u8, id: u8) -> Vec<u8> {
        let mut payload = vec![(class << 4) | id];
        payload.extend_from_slice(&self.counts);
        payload.extend_from_slice(&self.symbols);
        payload
    }
}

fn magnitude(value: i32) -> (u8, u32) {
    let category = 32 - value.unsigned_abs().leading_zeros();
    let bits = if value >= 0 {
        value as u32
    } else {
        (value + (1 << category) - 1) as u32
    };
    (category as u8, bits)
}

/// Writes Huffman coded blocks into entropy-coded segment bytes.
#[derive(Default)]
pub struct EntropyWriter {
    bits: BitWriter,
}

impl EntropyWriter {
    pub fn new() -> EntropyWriter {
        EntropyWriter::default()
    }

    /// Encodes one block: a DC difference and the non-zero AC coefficients
    /// as `(zigzag_position, value)` pairs in increasing position order.
    pub fn block(&mut self, dc: &HuffmanSpec, ac: &HuffmanSpec, dc_diff: i32, coeffs: &[(usize, i32)]) {
        let (category, bits) = magnitude(dc_diff);
        let (code, length) = dc.code(category);
        self.bits.write(code as u32, length as u32);
        self.bits.write(bits, category as u32);

        let mut last = 0;
        for &(position, value) in coeffs {
            assert!(position > last && position < 64 && value != 0);
            let mut run = position - last - 1;
            while run >= 16 {
                let (code, length) = ac.code(0xf0);
                self.bits.write(code as u32, length as u32);
                run -= 16;
            }
            let (size, bits) = magnitude(value);
            let (code, length) = ac.code(((run as u8) << 4) | size);
            self.bits.write(code as u32, length as u32);
            self.bits.write(bits, size as u32);
            last = position;
        }
        if last < 63 {
            let (code, length) = ac.code(0x00);
            self.bits.write(code as u32, length as u32);
        }
    }

    /// Writes raw bits, for streams that need hand-crafted corruption.
    pub fn raw_bits(&mut self, value: u32, nbits: u32) {
        self.bits.write(value, nbits);
    }

    /// Byte-aligns and emits restart marker `RSTn`.
    pub fn restart(&mut self, n: u8) {
        self.bits.align();
        self.bits.marker(0xd0 | (n & 7));
    }

    pub fn finish(self) -> Vec<u8> {
        self.bits.finish()
    }
}

/// One frame component: id, sampling factors and quantization table.
#[derive(Clone, Copy, Debug)]
pub struct FrameComponent {
    pub id: u8,
    pub h: u8,
    pub v: u8,
    pub quant: u8,
}

impl FrameComponent {
    pub fn new(id: u8, h: u8, v: u8, quant: u8) -> FrameComponent {
        FrameComponent { id, h, v, quant }
    }
}

/// Assembles a marker stream segment by segment, starting with SOI.
pub struct JpegBuilder {
    bytes: Vec<u8>,
}

impl Default for JpegBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegBuilder {
    pub fn new() -> JpegBuilder {
        JpegBuilder {
            bytes: vec![0xff, 0xd8],
        }
    }

    /// Appends a segment whose length field is computed from `payload`.
    pub fn segment(mut self, marker: u8, payload: &[u8]) -> JpegBuilder {
        let length = payload.len() + 2;
        self.bytes.extend_from_slice(&[0xff, marker, (length >> 8) as u8, length as u8]);
        self.bytes.extend_from_slice(payload);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> JpegBuilder {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn app(self, n: u8, payload: &[u8]) -> JpegBuilder {
        self.segment(0xe0 | (n & 0xf), payload)
    }

    pub fn comment(self, text: &[u8]) -> JpegBuilder {
        self.segment(0xfe, text)
    }

    /// Quantization table given in zig-zag (transmission) order.
    pub fn quant_table_zigzag(self, index: u8, values: &[u8; 64]) -> JpegBuilder {
        let mut payload = vec![index];
        payload.extend_from_slice(values);
        self.segment(0xdb, &payload)
    }

    /// Quantization table given in natural (row-major) order.
    pub fn quant_table(self, index: u8, natural: &[u8; 64]) -> JpegBuilder {
        let zigzag: [u8; 64] = std::array::from_fn(|k| natural[ZIGZAG[k]]);
        self.quant_table_zigzag(index, &zigzag)
    }

    pub fn flat_quant_table(self, index: u8, value: u8) -> JpegBuilder {
        self.quant_table_zigzag(index, &[value; 64])
    }

    pub fn huffman_table(self, class: u8, id: u8, spec: &HuffmanSpec) -> JpegBuilder {
        self.segment(0xc4, &spec.payload(class, id))
    }

    pub fn frame_with_precision(
        self,
        precision: u8,
        width: u16,
        height: u16,
        components: &[FrameComponent],
    ) -> JpegBuilder {
        let mut payload = vec![precision];
        payload.extend_from_slice(&height.to_be_bytes());
        payload.extend_from_slice(&width.to_be_bytes());
        payload.push(components.len() as u8);
        for c in components {
            payload.extend_from_slice(&[c.id, (c.h << 4) | c.v, c.quant]);
        }
        self.segment(0xc0, &payload)
    }

    pub fn frame(self, width: u16, height: u16, components: &[FrameComponent]) -> JpegBuilder {
        self.frame_with_precision(8, width, height, components)
    }

    pub fn restart_interval(self, interval: u16) -> JpegBuilder {
        self.segment(0xdd, &interval.to_be_bytes())
    }

    /// Scan header over `(component id, dc table, ac table)` triples,
    /// followed by the entropy-coded bytes.
    pub fn scan(self, components: &[(u8, u8, u8)], entropy_coded: &[u8]) -> JpegBuilder {
        let mut payload = vec![components.len() as u8];
        for &(id, dc, ac) in components {
            payload.extend_from_slice(&[id, (dc << 4) | ac]);
        }
        payload.extend_from_slice(&[0, 63, 0]);
        self.segment(0xda, &payload).raw(entropy_coded)
    }

    pub fn eoi(mut self) -> JpegBuilder {
        self.bytes.extend_from_slice(&[0xff, 0xd9]);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
