//! Synthesizer programmer
//!
//! Drives both synthesizers from a resolved table entry and runs the two
//! diagnostic loops. The programmer owns its pin driver and indicator for
//! the whole invocation.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::LED_DELAY_UNITS;
use crate::encoder;
use crate::hal::{PinDriver, StatusIndicator};
use crate::resolver::Resolution;
use crate::types::{
    Channel, ChannelSelection, LedMode, OperatingMode, PinDirection, TableEntry, TestPattern,
};

/// Cancellation signal for the diagnostic loops
pub trait Cancel {
    /// True once the loop should stop
    fn is_cancelled(&self) -> bool;
}

impl Cancel for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: Cancel + ?Sized> Cancel for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Token that is never cancelled
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl Cancel for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// What a dispatch did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Synthesizers were programmed
    Programmed(ChannelSelection),
    /// A diagnostic loop ran until cancelled
    Cancelled(OperatingMode),
    /// Nothing to do for this index
    Skipped,
}

/// MB1501 pair programmer
pub struct SynthesizerProgrammer<D, S> {
    driver: D,
    indicator: S,
    led_delay_units: u32,
}

impl<D: PinDriver, S: StatusIndicator> SynthesizerProgrammer<D, S> {
    /// Create a programmer with the default LED test period
    #[must_use]
    pub fn new(driver: D, indicator: S) -> Self {
        Self {
            driver,
            indicator,
            led_delay_units: LED_DELAY_UNITS,
        }
    }

    /// Set the number of delay units per LED test half-cycle
    #[must_use]
    pub fn with_led_delay(mut self, units: u32) -> Self {
        self.led_delay_units = units;
        self
    }

    /// Delay units per LED test half-cycle
    #[must_use]
    pub const fn led_delay_units(&self) -> u32 {
        self.led_delay_units
    }

    /// Pin driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Status indicator
    pub fn indicator_mut(&mut self) -> &mut S {
        &mut self.indicator
    }

    /// Destroy the programmer and return the driver and indicator
    pub fn release(self) -> (D, S) {
        (self.driver, self.indicator)
    }

    /// Act on a resolved table index
    ///
    /// Programming modes return once both channels are done. The test
    /// modes loop until `cancel` trips.
    pub fn dispatch<C: Cancel>(&mut self, resolution: &Resolution, cancel: &C) -> Outcome {
        log::info!("Table entry {}: {}", resolution.index, resolution.mode);

        match resolution.mode {
            OperatingMode::Amateur
            | OperatingMode::TxTuning
            | OperatingMode::RxTuning
            | OperatingMode::Commercial => {
                self.program(&resolution.entry, resolution.channels);
                Outcome::Programmed(resolution.channels)
            }
            OperatingMode::TestMode => match resolution.test_pattern() {
                Some(pattern) => {
                    self.run_test_mode(pattern, cancel);
                    Outcome::Cancelled(OperatingMode::TestMode)
                }
                None => Outcome::Skipped,
            },
            OperatingMode::LedTest => {
                self.run_led_test(cancel);
                Outcome::Cancelled(OperatingMode::LedTest)
            }
            OperatingMode::Unused => {
                log::info!("Unused test mode selected");
                Outcome::Skipped
            }
        }
    }

    /// Program the selected synthesizers, RX before TX
    pub fn program(&mut self, entry: &TableEntry, channels: ChannelSelection) {
        for channel in [Channel::Rx, Channel::Tx] {
            if channels.includes(channel) {
                let value = entry.value(channel);
                log::info!(
                    "{} Prog, {:x}, {:x}",
                    channel,
                    value.reference_divider,
                    value.programmable_counter
                );
                self.indicator.set_indicator(channel, LedMode::Blink);
                encoder::program_channel(&mut self.driver, channel.pins(), value);
            } else {
                self.indicator.set_indicator(channel, LedMode::Off);
            }
        }
    }

    /// Square wave on one programming line until cancelled
    pub fn run_test_mode<C: Cancel>(&mut self, pattern: TestPattern, cancel: &C) {
        self.indicator.set_indicator(Channel::Tx, pattern.tx_led);
        self.indicator.set_indicator(Channel::Rx, pattern.rx_led);
        log::info!("Test mode: {}", pattern.pin);

        self.driver.set_direction(pattern.pin, PinDirection::Output);
        while !cancel.is_cancelled() {
            self.test_mode_cycle(pattern);
        }
        self.driver.set_level(pattern.pin, false);
    }

    /// One period of the test square wave
    pub fn test_mode_cycle(&mut self, pattern: TestPattern) {
        self.driver.delay_unit();
        self.driver.set_level(pattern.pin, true);
        self.driver.delay_unit();
        self.driver.set_level(pattern.pin, false);
    }

    /// Alternate the channel LEDs until cancelled
    pub fn run_led_test<C: Cancel>(&mut self, cancel: &C) {
        self.indicator.set_indicator(Channel::Tx, LedMode::On);
        self.indicator.set_indicator(Channel::Rx, LedMode::Off);
        log::info!("LED Test");

        while !cancel.is_cancelled() {
            self.led_test_cycle();
        }
    }

    /// One LED test period: RX lit, then TX lit
    pub fn led_test_cycle(&mut self) {
        self.hold(self.led_delay_units);
        log::debug!("Tx OFF, Rx ON");
        self.indicator.set_indicator(Channel::Tx, LedMode::Off);
        self.indicator.set_indicator(Channel::Rx, LedMode::On);

        self.hold(self.led_delay_units);
        log::debug!("Tx ON, Rx OFF");
        self.indicator.set_indicator(Channel::Tx, LedMode::On);
        self.indicator.set_indicator(Channel::Rx, LedMode::Off);
    }

    fn hold(&mut self, units: u32) {
        for _ in 0..units {
            self.driver.delay_unit();
        }
    }
}
