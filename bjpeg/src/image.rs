// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::{
    error::{Error, Result},
    util::{tracing_wrappers::*, try_filled_vec},
};

/// An 8-bit sample plane. Rows are `stride` samples apart; only the first
/// `width` samples of the first `height` rows are image content, the rest
/// is alignment padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl Debug for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plane {}x{} stride {} rows {}",
            self.width,
            self.height,
            self.stride,
            self.rows()
        )
    }
}

impl Plane {
    /// Allocates a zeroed plane with `rows >= height` rows of `stride >= width` samples.
    pub fn new(size: (usize, usize), stride: usize, rows: usize) -> Result<Plane> {
        let (width, height) = size;
        if width == 0 || height == 0 || stride < width || rows < height {
            return Err(Error::InvalidImageSize(width, height));
        }
        let total_size = stride
            .checked_mul(rows)
            .ok_or(Error::ImageSizeTooLarge(stride, rows))?;
        trace!(width, height, stride, rows, "allocating plane");
        Ok(Plane {
            width,
            height,
            stride,
            data: try_filled_vec(total_size, 0u8)?,
        })
    }

    /// Allocates a plane without row padding.
    pub fn new_packed(size: (usize, usize)) -> Result<Plane> {
        Plane::new(size, size.0, size.1)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn rows(&self) -> usize {
        self.data.len() / self.stride
    }

    /// The `width` content samples of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Mutable view starting at the top-left sample of the 8x8 block in
    /// block column `bx` and block row `by`, running to the end of the buffer.
    pub fn block_mut(&mut self, bx: usize, by: usize) -> &mut [u8] {
        let start = by * 8 * self.stride + bx * 8;
        &mut self.data[start..]
    }

    /// Drops row padding and returns the `width * height` content samples.
    pub fn into_packed(mut self) -> Vec<u8> {
        if self.stride != self.width {
            for y in 1..self.height {
                let start = y * self.stride;
                self.data
                    .copy_within(start..start + self.width, y * self.width);
            }
        }
        self.data.truncate(self.width * self.height);
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rows_and_blocks() -> Result<()> {
        let mut plane = Plane::new((10, 9), 16, 16)?;
        assert_eq!(plane.rows(), 16);
        plane.block_mut(1, 1)[0] = 7;
        assert_eq!(plane.row(8).len(), 10);
        assert_eq!(plane.row(8)[8], 7);
        plane.row_mut(0)[9] = 3;
        assert_eq!(plane.row(0)[9], 3);
        Ok(())
    }

    #[test]
    fn packing_drops_padding() -> Result<()> {
        let mut plane = Plane::new((3, 2), 8, 8)?;
        plane.row_mut(0).copy_from_slice(&[1, 2, 3]);
        plane.row_mut(1).copy_from_slice(&[4, 5, 6]);
        assert_eq!(plane.into_packed(), vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn invalid_geometry() {
        assert_eq!(
            Plane::new((0, 4), 8, 8).unwrap_err().kind(),
            ErrorKind::Syntax
        );
        assert!(Plane::new((9, 4), 8, 8).is_err());
        assert!(matches!(
            Plane::new((1, 1), usize::MAX, 2),
            Err(Error::ImageSizeTooLarge(..))
        ));
    }
}
