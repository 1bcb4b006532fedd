use crate::consts::{MATCH_ROM_CMD, SKIP_ROM_CMD};
use crate::{OneWireError, OneWireResult, Rom};

/// Status of the bus as observed during a reset cycle.
pub trait OneWireStatus {
    /// Whether at least one device answered with a presence pulse.
    fn presence(&self) -> bool;

    /// Whether the line appears to be shorted (held low past the reset
    /// timing windows).
    fn short_circuit(&self) -> bool {
        false
    }
}

/// A bare presence flag is a valid reset status for buses that cannot detect
/// a short.
impl OneWireStatus for bool {
    fn presence(&self) -> bool {
        *self
    }
}

/// Trait for 1-Wire bus masters.
///
/// Implementors provide the three timing-critical primitives: [reset](OneWire::reset),
/// [write_bit](OneWire::write_bit) and [read_bit](OneWire::read_bit). Byte transfers
/// and the ROM commands are built on top of them, least-significant bit first, and
/// may be overridden by masters with native byte support.
///
/// Every operation blocks the calling thread for the fixed duration of its bus
/// slot; the line is a single exclusive resource and callers must issue operations
/// serially from one owner. A slot in progress cannot be aborted without corrupting
/// the bus framing for every device.
pub trait OneWire {
    /// The status type returned by the reset operation.
    type Status: OneWireStatus;
    /// The error type of the underlying hardware.
    type BusError;

    /// Resets the 1-Wire bus and samples the presence-detect window.
    ///
    /// Returns the observed bus status; an empty bus is reported through
    /// [presence](OneWireStatus::presence), not as an error. The reset must
    /// complete within its fixed timing windows even when no device answers
    /// or the line is held low.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a single bit slot to the bus.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit slot from the bus.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Writes a byte to the bus, least-significant bit first.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Reads a byte from the bus, least-significant bit first.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Writes a block of bytes to the bus.
    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Reads `buf.len()` bytes from the bus into `buf`.
    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for byte in buf {
            *byte = self.read_byte()?;
        }
        Ok(())
    }

    /// Writes a byte and then holds the line high for parasitically powered
    /// devices.
    ///
    /// The line stays powered until [depower](OneWire::depower), the next
    /// reset, or the next bit slot. Masters that cannot hold the line return
    /// [Unimplemented](OneWireError::Unimplemented).
    fn write_byte_powered(&mut self, _byte: u8) -> OneWireResult<(), Self::BusError> {
        Err(OneWireError::Unimplemented)
    }

    /// Stops forcing power onto the bus after a powered write.
    fn depower(&mut self) -> OneWireResult<(), Self::BusError> {
        Ok(())
    }

    /// Addresses exactly one device: reset, Match ROM command, then the 8
    /// ROM bytes.
    ///
    /// All other devices stop participating until the next reset. Fails with
    /// [NoDevicePresent](OneWireError::NoDevicePresent) if the reset sees no
    /// presence pulse.
    fn select(&mut self, rom: &Rom) -> OneWireResult<(), Self::BusError> {
        let status = self.reset()?;
        if status.short_circuit() {
            return Err(OneWireError::ShortCircuit);
        }
        if !status.presence() {
            return Err(OneWireError::NoDevicePresent);
        }
        self.write_byte(MATCH_ROM_CMD)?;
        self.write_bytes(rom.as_bytes())
    }

    /// Addresses every device at once with the Skip ROM command.
    ///
    /// The caller performs the reset first; the protocol has no acknowledgment
    /// channel, so sequencing is a documented contract rather than a runtime
    /// check.
    fn skip(&mut self) -> OneWireResult<(), Self::BusError> {
        self.write_byte(SKIP_ROM_CMD)
    }
}
