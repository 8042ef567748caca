// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg::api::{JpegInfo, read_info};
use clap::{Arg, Command};
use color_eyre::eyre::{Result, WrapErr};

fn segment_name(marker: u8) -> String {
    match marker {
        0xfe => "COM".to_string(),
        m => format!("APP{}", m & 0xf),
    }
}

fn print_info(info: &JpegInfo, verbose: bool) {
    let color = match info.components.len() {
        1 => "grayscale",
        _ => "YCbCr",
    };
    let sampling: Vec<String> = info
        .components
        .iter()
        .map(|c| format!("{}x{}", c.h_samp, c.v_samp))
        .collect();
    println!(
        "{}x{}, baseline, 8-bit {}, sampling {}",
        info.width,
        info.height,
        color,
        sampling.join(",")
    );
    if !verbose {
        return;
    }
    for c in info.components.iter() {
        println!(
            "component {}: sampling {}x{}, quantization table {}",
            c.id, c.h_samp, c.v_samp, c.quant_table
        );
    }
    if info.restart_interval > 0 {
        println!("restart interval: {} MCUs", info.restart_interval);
    }
    for s in info.segments.iter() {
        println!(
            "{} segment at offset {}, {} bytes",
            segment_name(s.marker),
            s.offset,
            s.length
        );
    }
    println!("entropy-coded data at offset {}", info.entropy_coded_offset);
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let matches = Command::new("bjpeginfo")
        .about("Provides info about a baseline JPEG file")
        .arg(
            Arg::new("filename")
                .help("The JPEG file to analyze")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Provides more verbose output")
                .num_args(0),
        )
        .get_matches();

    let filename = matches
        .get_one::<String>("filename")
        .map(String::as_str)
        .unwrap_or_default();
    let verbose = matches.get_flag("verbose");

    if verbose {
        println!("Processing file: {}", filename);
    }

    let data = std::fs::read(filename).wrap_err_with(|| format!("Cannot open {filename}"))?;
    let info = read_info(&data)?;
    print_info(&info, verbose);
    Ok(())
}
