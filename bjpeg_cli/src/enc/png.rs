// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use bjpeg::api::DecodedImage;
use color_eyre::eyre::{Result, eyre};

fn png_color(num_channels: usize) -> Result<png::ColorType> {
    match num_channels {
        1 => Ok(png::ColorType::Grayscale),
        3 => Ok(png::ColorType::Rgb),
        _ => Err(eyre!(
            "Invalid number of channels for PNG output {:?}",
            num_channels
        )),
    }
}

pub fn to_png<Writer: Write>(image: &DecodedImage, buf: &mut Writer) -> Result<()> {
    let info = png::Info::with_size(image.width as u32, image.height as u32);
    let mut encoder = png::Encoder::with_info(buf, info)?;
    encoder.set_color(png_color(image.channels())?);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.data)?;
    writer.finish()?;
    Ok(())
}
