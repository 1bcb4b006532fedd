use crate::consts::{ALARM_SEARCH_CMD, SEARCH_ROM_CMD};
use crate::{OneWire, OneWireError, OneWireStatus, Rom};

/// Type of search performed by [RomSearch].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Normal search: every device on the bus participates.
    Normal = SEARCH_ROM_CMD,
    /// Conditional search: only devices in an alarm state participate.
    Alarmed = ALARM_SEARCH_CMD,
}

/// A resumable search over the devices sharing a 1-Wire bus.
///
/// The [1-Wire search algorithm](https://www.analog.com/en/resources/app-notes/1wire-search-algorithm.html)
/// walks the binary tree of 64-bit ROM codes one device per call: at every bit
/// position each still-participating device answers its address bit and the
/// bit's complement, the master picks a branch, and devices on the other
/// branch drop out until the next reset. The cursor carried between calls
/// (partial ROM, last discrepancy positions and exhaustion flag) makes the
/// walk resumable, visiting every device exactly once per full cycle and, for
/// a fixed set of devices, always in the same order.
///
/// The engine borrows the bus exclusively for its lifetime; the cursor is
/// never shared.
pub struct RomSearch<'a, T> {
    bus: &'a mut T,
    cmd: u8,
    exhausted: bool,
    last_discrepancy: u8,
    last_family_discrepancy: u8,
    // last_discrepancy was planted by target_search or verify rather than
    // recorded at a genuine fork of a previous pass. At a planted position
    // the walk follows the seeded ROM bit instead of forcing the 1 branch.
    seeded: bool,
    family: u8,
    rom: [u8; 8],
}

impl<'a, T> RomSearch<'a, T> {
    /// Creates a search cursor issuing normal search commands.
    pub fn new(bus: &'a mut T) -> Self {
        Self::with_kind(bus, SearchKind::Normal)
    }

    /// Creates a search cursor issuing the given search command.
    pub fn with_kind(bus: &'a mut T, kind: SearchKind) -> Self {
        Self {
            bus,
            cmd: kind as u8,
            exhausted: false,
            last_discrepancy: 0,
            last_family_discrepancy: 0,
            seeded: false,
            family: 0,
            rom: [0; 8],
        }
    }

    /// Clears the cursor, including any family filter, so the next call to
    /// [next](RomSearch::next) starts enumeration from the beginning.
    pub fn reset_search(&mut self) {
        self.exhausted = false;
        self.last_discrepancy = 0;
        self.last_family_discrepancy = 0;
        self.seeded = false;
        self.family = 0;
        self.rom = [0; 8];
    }

    /// Restricts the search to devices of one family.
    ///
    /// Seeds the ROM with the family code and parks the resumption point on
    /// the last bit of the family byte, so the next call to
    /// [next](RomSearch::next) descends directly into that family's subtree.
    /// Once the walk leaves the subtree the pass reports no device and the
    /// cursor rewinds, keeping the filter.
    pub fn target_search(&mut self, family_code: u8) {
        self.rom = [family_code, 0, 0, 0, 0, 0, 0, 0];
        self.family = family_code;
        self.exhausted = false;
        self.last_discrepancy = 8;
        self.last_family_discrepancy = 0;
        self.seeded = true;
    }

    /// Skips the remaining devices of the family currently being enumerated,
    /// resuming from the last fork inside the family byte.
    pub fn skip_family(&mut self) {
        self.last_discrepancy = self.last_family_discrepancy;
        self.last_family_discrepancy = 0;
        // No fork left above the family byte means nothing follows.
        self.exhausted = self.last_discrepancy == 0;
    }

    /// Whether the previous call returned the last device on the bus.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Rewind for a fresh pass, keeping a configured family filter.
    fn rewind(&mut self) {
        self.exhausted = false;
        self.last_discrepancy = if self.family != 0 { 8 } else { 0 };
        self.last_family_discrepancy = 0;
        self.seeded = self.family != 0;
        self.rom = [self.family, 0, 0, 0, 0, 0, 0, 0];
    }
}

impl<T: OneWire> RomSearch<'_, T> {
    /// Finds the next device on the bus.
    ///
    /// Returns `Ok(Some(rom))` with the discovered address, or `Ok(None)`
    /// once every device has been returned. After `Ok(None)` the cursor has
    /// been rewound and the following call restarts enumeration from the
    /// beginning.
    ///
    /// The address is returned exactly as read off the bus; the engine does
    /// not reject checksum failures. Callers that want to discard corrupt
    /// reads (or retry them) check [Rom::is_valid].
    ///
    /// # Errors
    /// [NoDevicePresent](OneWireError::NoDevicePresent) if the reset sees no
    /// presence pulse, [ShortCircuit](OneWireError::ShortCircuit) if the line
    /// is stuck low, or the bus error of the underlying hardware.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Rom>, OneWireError<T::BusError>> {
        if self.exhausted {
            self.rewind();
            return Ok(None);
        }
        let status = self.bus.reset()?;
        if status.short_circuit() {
            return Err(OneWireError::ShortCircuit);
        }
        if !status.presence() {
            self.exhausted = true;
            return Err(OneWireError::NoDevicePresent);
        }
        self.bus.write_byte(self.cmd)?;
        let seeded = core::mem::replace(&mut self.seeded, false);

        let mut last_zero: u8 = 0;
        let mut idx: usize = 0;
        let mut mask: u8 = 1;
        let mut complete = false;
        for bit_num in 1u8..=64 {
            let id_bit = self.bus.read_bit()?;
            let cmp_bit = self.bus.read_bit()?;
            if id_bit && cmp_bit {
                // No device answered the slot: a device dropped off or the
                // participants died out. Terminate this pass.
                break;
            }
            let dir = if id_bit != cmp_bit {
                // All participants agree; the complement read confirms it.
                id_bit
            } else {
                // Both reads low: participants disagree. Resume the branch
                // chosen on the previous pass, force the unexplored 1 branch
                // at the resumption point, and take 0 first on new forks. A
                // planted resumption point has no explored branch yet; there
                // the walk follows the seeded ROM bit instead.
                let dir = if bit_num < self.last_discrepancy
                    || (seeded && bit_num == self.last_discrepancy)
                {
                    self.rom[idx] & mask != 0
                } else {
                    bit_num == self.last_discrepancy
                };
                if !dir {
                    last_zero = bit_num;
                    if last_zero < 9 {
                        self.last_family_discrepancy = last_zero;
                    }
                }
                dir
            };
            if dir {
                self.rom[idx] |= mask;
            } else {
                self.rom[idx] &= !mask;
            }
            // Only devices matching the chosen branch keep participating.
            self.bus.write_bit(dir)?;

            mask <<= 1;
            if mask == 0 {
                idx += 1;
                mask = 1;
            }
            complete = bit_num == 64;
        }

        if !complete || self.rom[0] == 0 {
            self.rewind();
            return Ok(None);
        }
        self.last_discrepancy = last_zero;
        if last_zero == 0 {
            self.exhausted = true;
        }
        if self.family != 0 && self.rom[0] != self.family {
            // Walked past the end of the targeted family's subtree.
            self.rewind();
            return Ok(None);
        }
        Ok(Some(Rom::new(self.rom)))
    }

    /// Verifies that the device with the given ROM code is present on the bus.
    ///
    /// Seeds the cursor with the full address and runs a single search pass
    /// that can only reproduce that address. Resets the cursor on both entry
    /// and exit, so an enumeration in progress is abandoned.
    pub fn verify(&mut self, rom: Rom) -> Result<bool, OneWireError<T::BusError>> {
        self.reset_search();
        self.rom = *rom.as_bytes();
        self.last_discrepancy = 64;
        self.seeded = true;
        let found = self.next()?;
        self.reset_search();
        Ok(found == Some(rom))
    }
}
