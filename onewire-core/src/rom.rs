use core::fmt;

use crate::crc::crc8;

/// A 64-bit 1-Wire ROM code: the unique address of one device on the bus.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0 | Family code (e.g., 0x28 for a DS18B20) |
/// | 1-6 | 48-bit unique serial number |
/// | 7 | CRC-8 of bytes 0-6 |
///
/// Any address actually present on the bus satisfies the checksum invariant;
/// an address failing [is_valid](Rom::is_valid) is a corrupt read, not a
/// device.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rom([u8; 8]);

impl Rom {
    /// Creates a ROM code from its raw 8-byte representation.
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Builds a ROM code from a family code and serial number, computing the
    /// checksum byte.
    pub fn with_checksum(family: u8, serial: [u8; 6]) -> Self {
        let mut bytes = [0u8; 8];
        bytes[0] = family;
        bytes[1..7].copy_from_slice(&serial);
        bytes[7] = crc8(&bytes[..7]);
        Self(bytes)
    }

    /// The family code identifying the device type.
    pub const fn family(&self) -> u8 {
        self.0[0]
    }

    /// The 48-bit serial number, bytes 1 through 6.
    pub fn serial(&self) -> &[u8] {
        &self.0[1..7]
    }

    /// The checksum byte as read from the bus.
    pub const fn crc(&self) -> u8 {
        self.0[7]
    }

    /// Whether the checksum byte matches the CRC-8 of the first 7 bytes.
    ///
    /// The search engine reports addresses as discovered and leaves
    /// acceptance policy to the caller; reads corrupted on a long or noisy
    /// line fail this check and are usually worth retrying.
    pub fn is_valid(&self) -> bool {
        crc8(&self.0[..7]) == self.0[7]
    }

    /// The raw 8 bytes, in bus transmission order (family code first).
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for Rom {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for Rom {
    fn from(value: u64) -> Self {
        Self(value.to_le_bytes())
    }
}

impl From<Rom> for u64 {
    fn from(rom: Rom) -> Self {
        u64::from_le_bytes(rom.0)
    }
}

impl fmt::Display for Rom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", u64::from(*self))
    }
}

impl fmt::Debug for Rom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rom({self})")
    }
}
