use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};
use onewire_core::{OneWire, OneWireResult};

use crate::{BitBang, ResetStatus};

/// Number of [Timings::reset_poll](crate::Timings::reset_poll) intervals the
/// line may stay low before a reset gives up on it.
const RESET_RETRIES: u16 = 125;

impl<P: InputPin + OutputPin, D: DelayNs> OneWire for BitBang<P, D> {
    type Status = ResetStatus;

    type BusError = P::Error;

    fn reset(&mut self) -> OneWireResult<ResetStatus, P::Error> {
        // Wait for the line to float high first; a previous powered write or
        // a slow device may still be holding it. A line that never rises is
        // shorted, and the fixed retry budget keeps this from hanging.
        let mut retries = RESET_RETRIES;
        while self.pin.is_low()? {
            retries -= 1;
            if retries == 0 {
                return Ok(ResetStatus {
                    presence: false,
                    stuck_low: true,
                });
            }
            self.delay.delay_us(self.timings.reset_poll);
        }
        self.pin.set_low()?;
        self.delay.delay_us(self.timings.reset_low);
        self.pin.set_high()?;
        self.delay.delay_us(self.timings.presence_sample);
        let presence = self.pin.is_low()?;
        self.delay.delay_us(self.timings.reset_tail);
        Ok(ResetStatus {
            presence,
            stuck_low: false,
        })
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), P::Error> {
        let (low, high) = if bit {
            (self.timings.write_1_low, self.timings.write_1_high)
        } else {
            (self.timings.write_0_low, self.timings.write_0_high)
        };
        self.pin.set_low()?;
        self.delay.delay_us(low);
        self.pin.set_high()?;
        self.delay.delay_us(high);
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, P::Error> {
        self.pin.set_low()?;
        self.delay.delay_us(self.timings.read_low);
        self.pin.set_high()?;
        self.delay.delay_us(self.timings.read_sample);
        let bit = self.pin.is_high()?;
        // Wait out the rest of the slot so the next operation stays aligned.
        self.delay.delay_us(self.timings.read_tail);
        Ok(bit)
    }

    fn write_byte_powered(&mut self, byte: u8) -> OneWireResult<(), P::Error> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        // Hold the line high for parasitically powered devices. On an
        // open-drain pin this is the released pull-up level; a push-pull
        // stage turns it into a strong pull-up.
        self.pin.set_high()?;
        Ok(())
    }

    fn depower(&mut self) -> OneWireResult<(), P::Error> {
        self.pin.set_high()?;
        Ok(())
    }
}
