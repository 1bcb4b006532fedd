//! Dallas/Maxim checksum algorithms.
//!
//! Both checksums process input least-significant bit first with feedback on
//! bit 0 of the shift register, per the 1-Wire conventions. The 8-bit CRC
//! protects ROM codes and scratchpad data; the 16-bit CRC protects larger
//! data transfers on devices that support it, and is transmitted bitwise
//! inverted on the wire.

/// Incremental calculator for the CRC-8 used in 1-Wire communications
/// (polynomial x^8 + x^5 + x^4 + 1, bit-reflected as 0x8c, seeded at 0).
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc8(u8);

impl Crc8 {
    /// Creates a new accumulator with the zero seed.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Get the current CRC value.
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Update the CRC with the incoming byte.
    pub fn update(&mut self, byte: u8) {
        #[cfg(feature = "crc-table")]
        {
            self.0 = CRC8_TABLE[(self.0 ^ byte) as usize];
        }
        #[cfg(not(feature = "crc-table"))]
        {
            self.0 = shift_crc8(self.0, byte);
        }
    }

    /// Validate a sequence of bytes whose last byte is the 1-Wire CRC of the
    /// previous bytes. Folding the transmitted CRC into the running value
    /// leaves zero when the sequence is intact.
    pub fn validate(sequence: &[u8]) -> bool {
        let mut crc = Crc8::new();
        for &byte in sequence {
            crc.update(byte);
        }
        crc.0 == 0
    }
}

/// Computes the Dallas CRC-8 over `bytes`, seeded at 0.
///
/// This is the checksum stored in the last byte of a ROM code (over the
/// first 7 bytes) and in the last byte of a device scratchpad (over the
/// first 8 bytes).
pub fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = Crc8::new();
    for &byte in bytes {
        crc.update(byte);
    }
    crc.value()
}

#[cfg(any(test, not(feature = "crc-table")))]
fn shift_crc8(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    for _ in 0..8 {
        crc = if crc & 0x1 != 0 {
            (crc >> 1) ^ 0x8c
        } else {
            crc >> 1
        };
    }
    crc
}

#[cfg(feature = "crc-table")]
const CRC8_TABLE: [u8; 256] = crc8_table();

#[cfg(feature = "crc-table")]
const fn crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x1 != 0 {
                (crc >> 1) ^ 0x8c
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[cfg(feature = "crc16")]
const ODD_PARITY: [u8; 16] = [0, 1, 1, 0, 1, 0, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0];

/// Computes the Dallas CRC-16 over `bytes`, starting from `crc`.
///
/// The running value can be threaded through successive calls to checksum a
/// transfer in pieces. Note that this is *not* the value seen on the wire:
/// devices transmit the CRC-16 bitwise inverted, low byte first. Use
/// [check_crc16] to compare against received bytes.
#[cfg(feature = "crc16")]
pub fn crc16(bytes: &[u8], crc: u16) -> u16 {
    let mut crc = crc;
    for &byte in bytes {
        let mut cdata = (byte as u16 ^ crc) & 0xff;
        crc >>= 8;
        if ODD_PARITY[(cdata & 0x0f) as usize] ^ ODD_PARITY[(cdata >> 4) as usize] != 0 {
            crc ^= 0xc001;
        }
        cdata <<= 6;
        crc ^= cdata;
        cdata <<= 1;
        crc ^= cdata;
    }
    crc
}

/// Computes the CRC-16 of `bytes` and compares it against the two CRC bytes
/// received from a device.
///
/// `inverted_crc` is the CRC as transmitted on the wire: bitwise inverted,
/// low byte first. These bytes typically sit at the end of the received
/// buffer and can be passed by reference without reassembling an integer.
#[cfg(feature = "crc16")]
pub fn check_crc16(bytes: &[u8], inverted_crc: &[u8; 2], crc: u16) -> bool {
    let crc = !crc16(bytes, crc);
    crc.to_le_bytes() == *inverted_crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc8_known_values() {
        assert_eq!(crc8(&[]), 0);
        assert_eq!(crc8(&[0x00]), 0);
        assert_eq!(crc8(&[0x01]), 0x5e);
        assert_eq!(crc8(&[0x02]), 0xbc);
    }

    #[test]
    fn crc8_accumulator_matches_free_function() {
        let data = [0x28, 0x01, 0x4b, 0x46, 0x7f, 0xff, 0x0c];
        let mut crc = Crc8::new();
        for &byte in &data {
            crc.update(byte);
        }
        assert_eq!(crc.value(), crc8(&data));
    }

    #[test]
    fn crc8_validate_appended_checksum() {
        let mut rom = [0x28, 0x01, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x00];
        rom[7] = crc8(&rom[..7]);
        assert!(Crc8::validate(&rom));
        rom[3] ^= 0x10;
        assert!(!Crc8::validate(&rom));
    }

    #[cfg(feature = "crc-table")]
    #[test]
    fn crc8_table_matches_shift_register() {
        for state in 0..=255u8 {
            for byte in 0..=255u8 {
                assert_eq!(
                    CRC8_TABLE[(state ^ byte) as usize],
                    shift_crc8(state, byte),
                    "state {state:#04x} byte {byte:#04x}"
                );
            }
        }
    }

    #[cfg(feature = "crc16")]
    #[test]
    fn crc16_known_values() {
        assert_eq!(crc16(&[], 0), 0);
        assert_eq!(crc16(&[0x01], 0), 0xc0c1);
        assert_eq!(crc16(&[0x02], 0), 0xc181);
        assert_eq!(crc16(b"123456789", 0), 0xbb3d);
    }

    #[cfg(feature = "crc16")]
    #[test]
    fn crc16_check_against_wire_bytes() {
        let data = [0xf0, 0x88, 0x00, 0x12, 0x34];
        let inverted = (!crc16(&data, 0)).to_le_bytes();
        assert!(check_crc16(&data, &inverted, 0));
        assert!(!check_crc16(&data, &[inverted[0] ^ 1, inverted[1]], 0));
    }
}
