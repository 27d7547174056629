//! `embedded-hal` adapters
//!
//! Lets the programmer run on a microcontroller board: the six programming
//! lines are plain push-pull outputs and the delay unit comes from any
//! [`DelayNs`] provider. Pin errors are dropped, matching the
//! fire-and-forget [`PinDriver`] contract.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::BIT_DELAY_US;
use crate::hal::{PinDriver, StatusIndicator};
use crate::types::{Channel, LedMode, LogicalPin, PinDirection};

/// Programming lines backed by `embedded-hal` output pins
///
/// Pins are given in [`LogicalPin::ALL`] order. Lines are expected to be
/// configured as outputs already, so direction changes are ignored.
pub struct HalPins<P, D> {
    pins: [P; 6],
    delay: D,
    delay_us: u32,
}

impl<P: OutputPin, D: DelayNs> HalPins<P, D> {
    /// Wrap six output pins and a delay provider
    pub fn new(pins: [P; 6], delay: D) -> Self {
        Self {
            pins,
            delay,
            delay_us: BIT_DELAY_US,
        }
    }

    /// Set the delay unit in microseconds
    pub fn set_timing_us(&mut self, delay_us: u32) {
        self.delay_us = delay_us.max(1);
    }

    /// Destroy the adapter and return the pins and delay
    pub fn free(self) -> ([P; 6], D) {
        (self.pins, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> PinDriver for HalPins<P, D> {
    fn set_level(&mut self, pin: LogicalPin, high: bool) {
        let line = &mut self.pins[pin.index()];
        let _ = if high { line.set_high() } else { line.set_low() };
    }

    fn set_direction(&mut self, _pin: LogicalPin, _direction: PinDirection) {}

    fn delay_unit(&mut self) {
        self.delay.delay_us(self.delay_us);
    }
}

/// Channel LEDs on two output pins
///
/// There is no timer behind these, so `Blink` renders as steady on.
pub struct HalLeds<P> {
    tx: P,
    rx: P,
}

impl<P: OutputPin> HalLeds<P> {
    /// Wrap the TX and RX LED pins
    pub fn new(tx: P, rx: P) -> Self {
        Self { tx, rx }
    }

    /// Destroy the adapter and return the pins
    pub fn free(self) -> (P, P) {
        (self.tx, self.rx)
    }
}

impl<P: OutputPin> StatusIndicator for HalLeds<P> {
    fn set_indicator(&mut self, channel: Channel, mode: LedMode) {
        let led = match channel {
            Channel::Tx => &mut self.tx,
            Channel::Rx => &mut self.rx,
        };
        let _ = match mode {
            LedMode::Off => led.set_low(),
            LedMode::Blink | LedMode::On => led.set_high(),
        };
    }
}
