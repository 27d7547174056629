//! MB1501 serial bit encoder
//!
//! Bit-banged three-wire transfer: data is set up, the clock is pulsed for
//! every bit, and a latch-enable pulse commits the shifted word.
//!
//! ```text
//! DATA  ──X b(n-1) X b(n-2) X ... X b0 X──────────────
//! CLK   ____/‾‾\_____/‾‾\________/‾‾\_______________
//! LE    ______________________________/‾‾\__________
//! ```
//!
//! The transmitted bits are bits `bit_count - 1 ..= 0` of
//! `(value << 1) | control`, most significant first. The window is one bit
//! narrower than value plus control bit, so each field loses the value's
//! top bit: bit 15 of the reference divider and bit 18 of the counter never
//! reach the chip. The board firmware has always sent it this way, so the
//! window is kept as is.

use crate::config::{C_BIT, N_DATA_BITS, N_REF_BITS};
use crate::hal::PinDriver;
use crate::types::{PinDirection, ProgPins, RegisterValue};

/// One serial transfer: value, control bit and number of bits sent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireFrame {
    value: u32,
    control: u8,
    bit_count: u8,
}

impl WireFrame {
    /// Create a frame; `control` is reduced to its low bit and `bit_count`
    /// is capped at 32
    #[must_use]
    pub const fn new(value: u32, control: u8, bit_count: u8) -> Self {
        Self {
            value,
            control: control & 1,
            bit_count: if bit_count > 32 { 32 } else { bit_count },
        }
    }

    /// Reference divider frame (control bit set, 16 bits)
    #[must_use]
    pub const fn reference(reference_divider: u32) -> Self {
        Self::new(reference_divider, C_BIT, N_REF_BITS)
    }

    /// Programmable counter frame (control bit clear, 19 bits)
    #[must_use]
    pub const fn counter(programmable_counter: u32) -> Self {
        Self::new(programmable_counter, 0, N_DATA_BITS)
    }

    /// Raw value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Control bit
    #[must_use]
    pub const fn control(&self) -> u8 {
        self.control
    }

    /// Number of bits clocked out
    #[must_use]
    pub const fn bit_count(&self) -> u8 {
        self.bit_count
    }

    /// Shifted word the bits are taken from
    #[must_use]
    pub const fn composite(&self) -> u32 {
        (self.value << 1) | self.control as u32
    }

    /// Transmitted bits, most significant first
    pub fn bits(&self) -> impl Iterator<Item = bool> {
        let composite = self.composite();
        (0..self.bit_count).rev().map(move |i| composite & (1 << i) != 0)
    }
}

/// Shift one frame out on a synthesizer's lines and latch it
///
/// The lines must already be outputs; [`program_channel`] takes care of
/// that.
pub fn send_field<D: PinDriver + ?Sized>(driver: &mut D, pins: ProgPins, frame: WireFrame) {
    log::trace!(
        "Serial out: {:X}: {:X} {} {}",
        frame.composite(),
        frame.value(),
        frame.control(),
        frame.bit_count()
    );

    for bit in frame.bits() {
        driver.set_level(pins.data, bit);
        driver.delay_unit();
        driver.set_level(pins.clk, true);
        driver.delay_unit();
        driver.set_level(pins.clk, false);
    }

    driver.delay_unit();
    driver.set_level(pins.le, true);
    driver.delay_unit();
    driver.set_level(pins.le, false);
    driver.delay_unit();

    // back to idle
    driver.set_level(pins.data, false);
    driver.set_level(pins.clk, false);
    driver.set_level(pins.le, false);
    driver.delay_unit();
}

/// Program one synthesizer: reference divider first, then the counter
pub fn program_channel<D: PinDriver + ?Sized>(driver: &mut D, pins: ProgPins, value: RegisterValue) {
    driver.set_level(pins.clk, false);
    driver.set_level(pins.data, false);
    driver.set_level(pins.le, false);

    driver.set_direction(pins.clk, PinDirection::Output);
    driver.set_direction(pins.data, PinDirection::Output);
    driver.set_direction(pins.le, PinDirection::Output);

    send_field(driver, pins, WireFrame::reference(value.reference_divider));
    send_field(driver, pins, WireFrame::counter(value.programmable_counter));
}
