//! A simulated 1-Wire bus for exercising the search engine and the ROM
//! commands without hardware.
//!
//! The line is wired-AND: during a search slot every participating device
//! transmits its address bit and then the complement, and the line reads low
//! if any transmitter drives 0. Writing the branch bit drops the devices on
//! the other branch until the next reset, exactly as real devices behave in
//! search-response mode.

#![allow(dead_code)]

use std::convert::Infallible;

use onewire_core::consts::{ALARM_SEARCH_CMD, MATCH_ROM_CMD, SEARCH_ROM_CMD, SKIP_ROM_CMD};
use onewire_core::{OneWire, OneWireResult, Rom, RomSearch};

enum State {
    Idle,
    Search { bit: u8, reads: u8 },
    Match { buf: Vec<u8> },
}

pub struct SimBus {
    devices: Vec<Rom>,
    participating: Vec<bool>,
    state: State,
    mute: bool,
    pub skip_count: usize,
    pub matched: Option<Rom>,
}

impl SimBus {
    pub fn new(devices: Vec<Rom>) -> Self {
        let participating = vec![false; devices.len()];
        Self {
            devices,
            participating,
            state: State::Idle,
            mute: false,
            skip_count: 0,
            matched: None,
        }
    }

    /// Devices stay on the bus for presence detection but stop answering
    /// search slots, as if they dropped off mid-transaction.
    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
    }

    pub fn participating(&self) -> Vec<Rom> {
        self.devices
            .iter()
            .zip(&self.participating)
            .filter(|&(_, &p)| p)
            .map(|(&d, _)| d)
            .collect()
    }

    fn device_bit(rom: &Rom, bit: u8) -> bool {
        rom.as_bytes()[(bit / 8) as usize] & (1 << (bit % 8)) != 0
    }

    /// Open-drain line level when every participating device transmits the
    /// given function of its address bit.
    fn line(&self, bit: u8, complement: bool) -> bool {
        self.devices
            .iter()
            .zip(&self.participating)
            .filter(|&(_, &p)| p)
            .all(|(d, _)| Self::device_bit(d, bit) != complement)
    }
}

impl OneWire for SimBus {
    type Status = bool;
    type BusError = Infallible;

    fn reset(&mut self) -> OneWireResult<bool, Infallible> {
        self.participating = vec![true; self.devices.len()];
        self.state = State::Idle;
        Ok(!self.devices.is_empty())
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Infallible> {
        if let State::Search { bit: pos, reads } = &mut self.state {
            assert_eq!(*reads, 2, "branch bit written before both slot reads");
            let pos = *pos;
            for (i, dev) in self.devices.iter().enumerate() {
                self.participating[i] &= Self::device_bit(dev, pos) == bit;
            }
            match pos + 1 {
                64 => self.state = State::Idle,
                next => self.state = State::Search { bit: next, reads: 0 },
            }
        }
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Infallible> {
        if let State::Search { bit, reads } = &mut self.state {
            assert!(*reads < 2, "more than two reads in one search slot");
            let (pos, complement) = (*bit, *reads == 1);
            *reads += 1;
            if self.mute {
                return Ok(true);
            }
            return Ok(self.line(pos, complement));
        }
        // An idle open-drain line floats high.
        Ok(true)
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Infallible> {
        match &mut self.state {
            State::Search { .. } => panic!("byte written during a search sequence"),
            State::Match { buf } => {
                buf.push(byte);
                if buf.len() == 8 {
                    let mut bytes = [0u8; 8];
                    bytes.copy_from_slice(buf);
                    let rom = Rom::new(bytes);
                    for (i, dev) in self.devices.iter().enumerate() {
                        self.participating[i] = *dev == rom;
                    }
                    self.matched = Some(rom);
                    self.state = State::Idle;
                }
            }
            State::Idle => match byte {
                SEARCH_ROM_CMD | ALARM_SEARCH_CMD => {
                    self.state = State::Search { bit: 0, reads: 0 };
                }
                MATCH_ROM_CMD => {
                    self.state = State::Match { buf: Vec::new() };
                }
                SKIP_ROM_CMD => {
                    self.skip_count += 1;
                    self.participating = vec![true; self.devices.len()];
                }
                _ => {}
            },
        }
        Ok(())
    }
}

/// Runs the search to exhaustion, collecting one full enumeration pass.
pub fn enumerate(search: &mut RomSearch<'_, SimBus>) -> Vec<Rom> {
    let mut found = Vec::new();
    loop {
        match search.next() {
            Ok(Some(rom)) => found.push(rom),
            Ok(None) => return found,
            Err(e) => panic!("search failed: {e:?}"),
        }
    }
}

pub fn rom(family: u8, serial: [u8; 6]) -> Rom {
    Rom::with_checksum(family, serial)
}
