// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::Path;

use bjpeg::api::DecodedImage;
use color_eyre::eyre::{Result, eyre};

pub mod png;
pub mod pnm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    /// PGM for grayscale images, PPM otherwise.
    Pnm,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<OutputFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("ppm" | "pgm" | "pnm") => Ok(OutputFormat::Pnm),
            _ => Err(eyre!(
                "Output format not supported for {}, use .png, .ppm or .pgm",
                path.display()
            )),
        }
    }
}

pub fn encode(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        OutputFormat::Png => png::to_png(image, &mut out)?,
        OutputFormat::Pnm => pnm::to_pnm(image, &mut out)?,
    }
    Ok(out)
}
