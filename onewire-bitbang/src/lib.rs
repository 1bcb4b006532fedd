#![no_std]
#![deny(missing_docs)]

/*! # onewire-bitbang
 *
 * Drives the 1-Wire protocol directly over a GPIO pin by bit-banging the
 * line transitions with microsecond delays.
 *
 * The pin is treated as open-drain: `set_low` pulls the shared line down and
 * `set_high` releases it to the external pull-up. Any pin implementing the
 * [`InputPin`](embedded_hal::digital::InputPin) and
 * [`OutputPin`](embedded_hal::digital::OutputPin) traits with those
 * semantics works; a push-pull capable pin additionally turns the parasitic
 * power hold into a strong pull-up.
 *
 * Bit slots block the calling thread for their full duration and must not be
 * preempted mid-slot: a paused write corrupts the framing for every device
 * on the line, which no amount of locking can repair. Keep one owner per
 * physical line.
 */

pub use onewire_core::{OneWire, OneWireError, OneWireResult};

mod onewire;
mod timing;

pub use timing::Timings;

use onewire_core::OneWireStatus;

/// Result of a bit-banged reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetStatus {
    pub(crate) presence: bool,
    pub(crate) stuck_low: bool,
}

impl OneWireStatus for ResetStatus {
    fn presence(&self) -> bool {
        self.presence
    }

    fn short_circuit(&self) -> bool {
        self.stuck_low
    }
}

/// A 1-Wire bus master bit-banged over a single GPIO pin.
///
/// Takes ownership of the pin and of a timer object implementing the
/// [`DelayNs`](embedded_hal::delay::DelayNs) trait. The delay only needs to
/// guarantee that at least the requested time elapses.
pub struct BitBang<P, D> {
    pub(crate) pin: P,
    pub(crate) delay: D,
    pub(crate) timings: Timings,
}

impl<P, D> BitBang<P, D> {
    /// Creates a new bit-banged bus over the given pin with the standard
    /// protocol timings.
    pub fn new(pin: P, delay: D) -> Self {
        BitBang {
            pin,
            delay,
            timings: Timings::STANDARD,
        }
    }

    /// Replace the slot timings.
    ///
    /// Devices discriminate bits on the relative shape of the slots, so the
    /// standard table should only be adjusted to compensate for known
    /// per-platform delay overhead.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Releases the pin and the delay timer.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
