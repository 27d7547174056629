//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the MB1501 programmer.
//! Wire-format sizes, table layout, timing defaults and the Raspberry Pi
//! pin mapping are centralized here.

/// Number of bits shifted out for the reference divider field
pub const N_REF_BITS: u8 = 16;

/// Number of bits shifted out for the programmable counter field
pub const N_DATA_BITS: u8 = 19;

/// Control bit: 1 selects the reference register, 0 the divider
pub const C_BIT: u8 = 1;

/// Documented width of the reference divider value
pub const REF_DIVIDER_WIDTH: u8 = 16;

/// Documented width of the programmable counter value
pub const PROG_COUNTER_WIDTH: u8 = 19;

/// Default inter-edge delay in microseconds
pub const BIT_DELAY_US: u32 = 5;

/// Delay units per LED test half-cycle
pub const LED_DELAY_UNITS: u32 = 1600;

/// Number of entries in the frequency table
pub const N_TABLE_ENTRIES: usize = 256;

/// Frequency table layout
///
/// Each band is a start index and a count. The ranges are contiguous from
/// zero up to the commercial block; the diagnostic modes live at the top.
pub mod layout {
    /// Start of amateur frequencies
    pub const AMATEUR_START: u8 = 0;
    /// Number of amateur frequencies
    pub const N_AMATEUR: u8 = 80;

    /// Start of transmitter tuning entries
    pub const TX_TUNING_START: u8 = AMATEUR_START + N_AMATEUR;
    /// Number of transmitter tuning entries
    pub const N_TX_TUNING: u8 = 33;

    /// Start of receiver tuning entries
    pub const RX_TUNING_START: u8 = TX_TUNING_START + N_TX_TUNING;
    /// Number of receiver tuning entries
    pub const N_RX_TUNING: u8 = 15;

    /// Start of commercial frequencies
    pub const COMMERCIAL_START: u8 = RX_TUNING_START + N_RX_TUNING;
    /// Number of commercial frequencies
    pub const N_COMMERCIAL: u8 = 99;

    /// Start of the pin test modes
    pub const TEST_MODE_START: u8 = 240;
    /// Number of pin test modes
    pub const N_TEST_MODES: u8 = 6;

    /// LED test lives in the last table slot
    pub const LED_TEST: u8 = u8::MAX;
}

/// Raspberry Pi GPIO assignments (BCM numbering)
///
/// ```text
/// P1-11  RX_CLK   GPIO17      P1-29  TX_CLK   GPIO5
/// P1-13  RX_DATA  GPIO27      P1-31  TX_DATA  GPIO6
/// P1-15  RX_LE    GPIO22      P1-33  TX_LE    GPIO13
/// P1-18  RX_LD    GPIO24      P1-35  TX_LD    GPIO19
/// ```
pub mod pins {
    /// TX synthesizer clock (P1-29)
    pub const TX_CLK: u8 = 5;
    /// TX synthesizer data (P1-31)
    pub const TX_DATA: u8 = 6;
    /// TX synthesizer latch enable (P1-33)
    pub const TX_LE: u8 = 13;

    /// RX synthesizer clock (P1-11)
    pub const RX_CLK: u8 = 17;
    /// RX synthesizer data (P1-13)
    pub const RX_DATA: u8 = 27;
    /// RX synthesizer latch enable (P1-15)
    pub const RX_LE: u8 = 22;

    /// TX lock detect input (P1-35)
    pub const TX_LD: u8 = 19;
    /// RX lock detect input (P1-18)
    pub const RX_LD: u8 = 24;
}

/// BCM2835 GPIO register block
pub mod bcm {
    /// Peripheral base on BCM2835 (Pi Zero / Pi 1)
    pub const DEFAULT_PERI_BASE: u64 = 0x2000_0000;

    /// GPIO controller offset from the peripheral base
    pub const GPIO_OFFSET: u64 = 0x20_0000;

    /// Size of the mapped GPIO block
    pub const BLOCK_SIZE: usize = 4 * 1024;

    /// Word offset of GPSET0
    pub const GPSET0: usize = 7;
    /// Word offset of GPCLR0
    pub const GPCLR0: usize = 10;
    /// Word offset of GPLEV0
    pub const GPLEV0: usize = 13;
    /// Word offset of GPPUD
    pub const GPPUD: usize = 37;
    /// Word offset of GPPUDCLK0
    pub const GPPUDCLK0: usize = 38;

    /// GPPUD value selecting pull-down
    pub const PUD_DOWN: u32 = 1;
}

/// Environment variables read by the host binary
#[cfg(feature = "std")]
pub mod env {
    /// Pin driver selection: `pi` or `console`
    pub const PLATFORM: &str = "MB1501_PLATFORM";
    /// Path of the frequency table file
    pub const TABLE: &str = "MB1501_TABLE";
    /// Delay unit in microseconds
    pub const BIT_DELAY_US: &str = "MB1501_BIT_DELAY_US";
    /// Delay units per LED test half-cycle
    pub const LED_DELAY: &str = "MB1501_LED_DELAY";
    /// BCM peripheral base address
    pub const PERI_BASE: &str = "MB1501_PERI_BASE";
    /// Console driver prints every line change
    pub const VERBOSE: &str = "MB1501_VERBOSE";
}
