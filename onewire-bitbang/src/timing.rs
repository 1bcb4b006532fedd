/// Slot timings of the bit-banged line, in microseconds.
///
/// The values are the standard-speed figures from the Maxim datasheets. What
/// devices actually discriminate on is the ratio between the low pulse and
/// the remainder of the slot: a write-1 is a short low followed by a long
/// release, a write-0 the reverse. Every slot has the same total length so
/// that successive operations stay slot-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Poll interval while waiting for the line to float high before a reset.
    pub reset_poll: u32,
    /// Reset low pulse.
    pub reset_low: u32,
    /// Release-to-sample delay of the presence-detect window.
    pub presence_sample: u32,
    /// Remainder of the reset cycle after the presence sample.
    pub reset_tail: u32,
    /// Low pulse of a write-0 slot.
    pub write_0_low: u32,
    /// Release time completing a write-0 slot.
    pub write_0_high: u32,
    /// Low pulse of a write-1 slot.
    pub write_1_low: u32,
    /// Release time completing a write-1 slot.
    pub write_1_high: u32,
    /// Low pulse initiating a read slot.
    pub read_low: u32,
    /// Release-to-sample delay of a read slot.
    pub read_sample: u32,
    /// Remainder of the read slot after the sample.
    pub read_tail: u32,
}

impl Timings {
    /// Standard-speed timings.
    pub const STANDARD: Timings = Timings {
        reset_poll: 2,
        reset_low: 480,
        presence_sample: 70,
        reset_tail: 410,
        write_0_low: 65,
        write_0_high: 5,
        write_1_low: 10,
        write_1_high: 55,
        read_low: 3,
        read_sample: 10,
        read_tail: 53,
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::STANDARD
    }
}
