// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use bjpeg::api::DecodedImage;
use color_eyre::eyre::{Result, eyre};

/// Writes a binary PGM (1 channel) or PPM (3 channels).
pub fn to_pnm<Writer: Write>(image: &DecodedImage, buf: &mut Writer) -> Result<()> {
    let magic = match image.channels() {
        1 => "P5",
        3 => "P6",
        n => return Err(eyre!("Invalid number of channels for PNM output {n}")),
    };
    write!(buf, "{magic}\n{} {}\n255\n", image.width, image.height)?;
    buf.write_all(&image.data)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::to_pnm;
    use bjpeg::api::{ColorType, DecodedImage};

    #[test]
    fn pgm_header() {
        let image = DecodedImage {
            width: 3,
            height: 2,
            color_type: ColorType::Grayscale,
            data: vec![0, 1, 2, 3, 4, 5],
        };
        let mut out = vec![];
        to_pnm(&image, &mut out).unwrap();
        assert_eq!(out, b"P5\n3 2\n255\n\x00\x01\x02\x03\x04\x05");
    }

    #[test]
    fn ppm_header() {
        let image = DecodedImage {
            width: 1,
            height: 1,
            color_type: ColorType::Rgb,
            data: vec![255, 0, 7],
        };
        let mut out = vec![];
        to_pnm(&image, &mut out).unwrap();
        assert!(out.starts_with(b"P6\n1 1\n255\n"));
        assert_eq!(&out[out.len() - 3..], &[255, 0, 7]);
    }
}
