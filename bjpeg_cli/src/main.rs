// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;

use bjpeg::api::DecodeOptions;
use bjpeg_cli::{
    dec::decode_file,
    enc::{OutputFormat, encode},
};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

#[derive(Parser)]
struct Opt {
    /// Input JPEG file
    input: PathBuf,

    /// Output image file, should end in .png, .ppm or .pgm
    output: Option<PathBuf>,

    /// Write upsampled Y, Cb, Cr samples instead of RGB
    #[clap(long)]
    ycbcr: bool,

    /// Fail if the entropy-coded data ends before the last MCU
    #[clap(long)]
    strict: bool,

    /// Reject images with more pixels than this
    #[clap(long)]
    pixel_limit: Option<usize>,

    /// Decode this many times and report the median speed
    #[clap(long, default_value_t = 1)]
    num_reps: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    let format = opt
        .output
        .as_deref()
        .map(OutputFormat::from_path)
        .transpose()?;

    let mut options = DecodeOptions::default();
    options.convert_rgb = !opt.ycbcr;
    options.allow_truncated = !opt.strict;
    options.pixel_limit = opt.pixel_limit;

    let mut durations = Vec::new();
    let mut image = None;
    for _ in 0..opt.num_reps.max(1) {
        let (decoded, duration) = decode_file(&opt.input, options.clone())?;
        durations.push(duration);
        image = Some(decoded);
    }
    let Some(image) = image else {
        return Ok(());
    };
    durations.sort();
    let median = durations[durations.len() / 2];
    let pixels = image.width * image.height;
    println!(
        "Decoded {}x{} {:?} image in {:.3} ms ({:.2} MP/s)",
        image.width,
        image.height,
        image.color_type,
        median.as_secs_f64() * 1e3,
        pixels as f64 / median.as_secs_f64() / 1e6,
    );

    if let (Some(path), Some(format)) = (opt.output, format) {
        let bytes = encode(&image, format)?;
        std::fs::write(&path, bytes).wrap_err_with(|| format!("Cannot write {}", path.display()))?;
    }
    Ok(())
}
