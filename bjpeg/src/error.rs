// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

/// Coarse classification of decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream does not start with a start-of-image marker.
    NotThisFormat,
    /// A recognized feature outside the baseline subset.
    Unsupported,
    /// Malformed or corrupt data.
    Syntax,
    OutOfMemory,
    /// An invariant the other checks should guarantee was violated.
    Internal,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input too short for a JPEG signature: {0} bytes")]
    InputTooShort(usize),
    #[error("Invalid signature {0:02x}{1:02x}, expected ffd8")]
    InvalidSignature(u8, u8),

    #[error("Unsupported sample precision: {0} bits")]
    UnsupportedPrecision(u8),
    #[error("Unsupported number of components: {0}")]
    UnsupportedComponentCount(u8),
    #[error("Unsupported sampling factors {1}x{2} for component {0}")]
    UnsupportedSampling(u8, u8, u8),
    #[error("Unsupported marker ff{0:02x}")]
    UnsupportedMarker(u8),
    #[error("Unsupported Huffman table id {0}")]
    UnsupportedHuffmanTable(u8),
    #[error("Unsupported quantization table precision {0}")]
    UnsupportedQuantPrecision(u8),
    #[error("Unsupported scan with {0} components in a {1}-component frame")]
    UnsupportedScanComponents(u8, u8),
    #[error("Unsupported spectral selection {0}..={1} with successive approximation {2:#04x}")]
    UnsupportedSpectralSelection(u8, u8, u8),
    #[error("Plane of component {0} is too small to reconstruct: {1}x{2}")]
    PlaneTooSmall(u8, usize, usize),
    #[error("Image size too large: {0}x{1}")]
    ImageSizeTooLarge(usize, usize),
    #[error("Output buffer too small: {0} bytes, need {1}")]
    OutputBufferTooSmall(usize, usize),

    #[error("Expected a marker at offset {0}, found {1:02x}")]
    ExpectedMarker(usize, u8),
    #[error("File truncated at offset {0}")]
    FileTruncated(usize),
    #[error("Segment ff{marker:02x} declares length {length}, but only {available} bytes remain")]
    SegmentTooLong {
        marker: u8,
        length: usize,
        available: usize,
    },
    #[error("Segment ff{0:02x} declares invalid length {1}")]
    InvalidSegmentLength(u8, usize),
    #[error("Segment ff{marker:02x} payload is {length} bytes, needs at least {min}")]
    SegmentTooShort { marker: u8, length: usize, min: usize },
    #[error("Segment ff{0:02x} has {1} unused trailing bytes")]
    TrailingSegmentBytes(u8, usize),
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Invalid sampling factors {1}x{2} for component {0}")]
    InvalidSampling(u8, u8, u8),
    #[error("Invalid quantization table index {0}")]
    InvalidQuantTableIndex(u8),
    #[error("Invalid Huffman table class/id {0:#04x}")]
    InvalidHuffmanTableSpec(u8),
    #[error("Huffman code lengths oversubscribe the code space at length {0}")]
    OversubscribedHuffman(usize),
    #[error("Huffman table declares {0} symbols, found {1}")]
    HuffmanSymbolCount(usize, usize),
    #[error("Invalid Huffman code")]
    InvalidHuffman,
    #[error("Invalid DC magnitude category {0}")]
    InvalidDcCategory(u8),
    #[error("Invalid AC symbol {0:#04x}")]
    InvalidAcSymbol(u8),
    #[error("Coefficient run past the end of the block")]
    CoefficientOverrun,
    #[error("Missing restart marker RST{0}")]
    MissingRestartMarker(u8),
    #[error("Expected restart marker RST{0}, found ff{1:02x}")]
    RestartMarkerMismatch(u8, u8),
    #[error("Marker ff{0:02x} inside entropy-coded data")]
    UnexpectedMarker(u8),
    #[error("Duplicate frame header")]
    DuplicateFrameHeader,
    #[error("Scan header before frame header")]
    ScanBeforeFrame,
    #[error("End of image before any scan")]
    NoScan,
    #[error("Scan component {1} does not match frame component {0}")]
    ScanComponentMismatch(u8, u8),
    #[error("Invalid scan table selector {0:#04x}")]
    InvalidScanTableSelector(u8),
    #[error("Quantization table {0} used before being defined")]
    UndefinedQuantTable(usize),
    #[error("Huffman table {0} used before being defined")]
    UndefinedHuffmanTable(usize),
    #[error("Entropy-coded data ended early: {0} padding bits consumed")]
    TruncatedScan(usize),
    #[error("Decoded a {0}x{1} frame, expected {2}x{3}")]
    FrameSizeMismatch(usize, usize, usize, usize),

    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("Plane of component {0} is {1}x{2} after reconstruction, frame is {3}x{4}")]
    IncompleteReconstruction(u8, usize, usize, usize, usize),
    // Generic arithmetic overflow. Prefer using other errors if possible.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            InputTooShort(..) | InvalidSignature(..) => ErrorKind::NotThisFormat,
            UnsupportedPrecision(..)
            | UnsupportedComponentCount(..)
            | UnsupportedSampling(..)
            | UnsupportedMarker(..)
            | UnsupportedHuffmanTable(..)
            | UnsupportedQuantPrecision(..)
            | UnsupportedScanComponents(..)
            | UnsupportedSpectralSelection(..)
            | PlaneTooSmall(..)
            | ImageSizeTooLarge(..)
            | OutputBufferTooSmall(..) => ErrorKind::Unsupported,
            OutOfMemory(..) => ErrorKind::OutOfMemory,
            IncompleteReconstruction(..) | ArithmeticOverflow => ErrorKind::Internal,
            _ => ErrorKind::Syntax,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::InvalidSignature(0, 0).kind(), ErrorKind::NotThisFormat);
        assert_eq!(Error::UnsupportedPrecision(12).kind(), ErrorKind::Unsupported);
        assert_eq!(Error::InvalidHuffman.kind(), ErrorKind::Syntax);
        assert_eq!(Error::MissingRestartMarker(3).kind(), ErrorKind::Syntax);
        assert_eq!(Error::UnexpectedMarker(0xc4).kind(), ErrorKind::Syntax);
        assert_eq!(Error::ArithmeticOverflow.kind(), ErrorKind::Internal);
        let oom = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(Error::from(oom).kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnsupportedMarker(0xc2).to_string(),
            "Unsupported marker ffc2"
        );
        assert_eq!(
            Error::RestartMarkerMismatch(1, 0xd3).to_string(),
            "Expected restart marker RST1, found ffd3"
        );
    }
}
