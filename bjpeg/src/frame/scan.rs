// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use bjpeg_transforms::{BLOCK_SIZE, idct8x8};

use crate::{
    bit_reader::BitReader,
    error::{Error, Result},
    frame::{BlockTables, Component, block::decode_block},
    headers::markers::RST0,
    util::tracing_wrappers::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    AwaitingRestart,
    Finished,
}

/// What a completed scan consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub mcus: usize,
    pub restarts: usize,
    /// Padding bits decoded past the end of the entropy-coded data.
    pub padding_bits: usize,
    /// Bytes of entropy-coded data read, including restart markers.
    pub bytes_read: usize,
}

/// Walks the MCU grid of a single interleaved scan.
pub struct ScanDecoder<'a, 't> {
    br: BitReader<'a>,
    tables: Vec<BlockTables<'t>>,
    mcu_grid: (usize, usize),
    mcu: (usize, usize),
    restart_interval: usize,
    restarts_left: usize,
    next_restart: u8,
    state: ScanState,
    summary: ScanSummary,
    block: [i32; BLOCK_SIZE],
}

impl<'a, 't> ScanDecoder<'a, 't> {
    /// `tables[c]` holds the tables of frame component `c`. A
    /// `restart_interval` of 0 means the data contains no restart markers.
    pub fn new(
        data: &'a [u8],
        tables: Vec<BlockTables<'t>>,
        mcu_grid: (usize, usize),
        restart_interval: usize,
    ) -> ScanDecoder<'a, 't> {
        ScanDecoder {
            br: BitReader::new(data),
            tables,
            mcu_grid,
            mcu: (0, 0),
            restart_interval,
            restarts_left: restart_interval,
            next_restart: 0,
            state: ScanState::Scanning,
            summary: ScanSummary::default(),
            block: [0; BLOCK_SIZE],
        }
    }

    fn decode_mcu(&mut self, components: &mut [Component]) -> Result<()> {
        let (mcu_x, mcu_y) = self.mcu;
        for (component, tables) in components.iter_mut().zip(self.tables.iter()) {
            let (h, v) = (component.info.h_samp, component.info.v_samp);
            for by in 0..v {
                for bx in 0..h {
                    decode_block(
                        &mut self.br,
                        tables,
                        &mut component.dc_pred,
                        &mut self.block,
                    )?;
                    let stride = component.plane.stride();
                    let out = component
                        .plane
                        .block_mut(mcu_x * h + bx, mcu_y * v + by);
                    idct8x8(&mut self.block, out, stride);
                }
            }
        }
        Ok(())
    }

    fn process_restart(&mut self, components: &mut [Component]) -> Result<()> {
        self.br.align_to_byte();
        let expected = self.next_restart;
        match self.br.read_marker() {
            Some(code) if code == RST0 + expected => {}
            Some(code) => return Err(Error::RestartMarkerMismatch(expected, code)),
            None => return Err(Error::MissingRestartMarker(expected)),
        }
        trace!(expected, mcu = ?self.mcu, "restart marker");
        self.next_restart = (expected + 1) & 7;
        self.restarts_left = self.restart_interval;
        for component in components.iter_mut() {
            component.dc_pred = 0;
        }
        self.summary.restarts += 1;
        Ok(())
    }

    /// Decodes one MCU, or consumes one restart marker, and returns the new state.
    pub fn step(&mut self, components: &mut [Component]) -> Result<ScanState> {
        debug_assert_eq!(components.len(), self.tables.len());
        match self.state {
            ScanState::Scanning => {
                self.decode_mcu(components)?;
                if let Some(code) = self.br.overrun_marker() {
                    return Err(Error::UnexpectedMarker(code));
                }
                self.summary.mcus += 1;
                self.mcu.0 += 1;
                if self.mcu.0 == self.mcu_grid.0 {
                    self.mcu = (0, self.mcu.1 + 1);
                }
                if self.mcu.1 == self.mcu_grid.1 {
                    self.state = ScanState::Finished;
                } else if self.restart_interval > 0 {
                    self.restarts_left -= 1;
                    if self.restarts_left == 0 {
                        self.state = ScanState::AwaitingRestart;
                    }
                }
            }
            ScanState::AwaitingRestart => {
                self.process_restart(components)?;
                self.state = ScanState::Scanning;
            }
            ScanState::Finished => {}
        }
        Ok(self.state)
    }

    /// Runs the scan to completion.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all, err))]
    pub fn run(mut self, components: &mut [Component]) -> Result<ScanSummary> {
        while self.step(components)? != ScanState::Finished {}
        self.summary.padding_bits = self.br.padding_bits_consumed();
        self.summary.bytes_read = self.br.position();
        debug!(summary = ?self.summary, "scan finished");
        Ok(self.summary)
    }
}
