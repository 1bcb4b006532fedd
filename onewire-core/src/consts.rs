//! ROM command constants for 1-Wire communication.

/// Match ROM: addresses the single device whose 64-bit ROM code follows the
/// command. All other devices ignore the bus until the next reset.
pub const MATCH_ROM_CMD: u8 = 0x55;

/// Skip ROM: addresses every device on the bus at once, without transmitting
/// a ROM code. Useful on a single-drop bus, or to broadcast a command (such
/// as a simultaneous conversion start) to all devices.
pub const SKIP_ROM_CMD: u8 = 0xcc;

/// Search ROM: puts all devices into search-response mode, in which each
/// still-participating device answers one address bit and its complement per
/// bit slot.
pub const SEARCH_ROM_CMD: u8 = 0xf0;

/// Conditional search ROM: as [SEARCH_ROM_CMD], but only devices in an alarm
/// state participate.
pub const ALARM_SEARCH_CMD: u8 = 0xec;
