//! Shared types used across the programmer
//!
//! This module defines the register model, the logical pin set and the
//! small enums that flow between the resolver, the programmer and the
//! pin drivers.

use core::fmt;

/// Register values for one synthesizer
///
/// Widths are documented, not enforced: a value wider than its field is
/// silently truncated by the serial encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegisterValue {
    /// Reference divider (16 bits)
    pub reference_divider: u32,
    /// Programmable counter (19 bits)
    pub programmable_counter: u32,
}

impl RegisterValue {
    /// Create a register pair
    #[must_use]
    pub const fn new(reference_divider: u32, programmable_counter: u32) -> Self {
        Self {
            reference_divider,
            programmable_counter,
        }
    }

    /// True if either value exceeds its documented width
    #[must_use]
    pub const fn exceeds_width(self) -> bool {
        self.reference_divider >> crate::config::REF_DIVIDER_WIDTH != 0
            || self.programmable_counter >> crate::config::PROG_COUNTER_WIDTH != 0
    }
}

/// One frequency table row: a TX and an RX register pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TableEntry {
    /// Transmitter synthesizer values
    pub tx: RegisterValue,
    /// Receiver synthesizer values
    pub rx: RegisterValue,
}

impl TableEntry {
    /// All-zero entry
    pub const BLANK: Self = Self::new(RegisterValue::new(0, 0), RegisterValue::new(0, 0));

    /// Create a table entry
    #[must_use]
    pub const fn new(tx: RegisterValue, rx: RegisterValue) -> Self {
        Self { tx, rx }
    }

    /// Register values for one channel
    #[must_use]
    pub const fn value(&self, channel: Channel) -> RegisterValue {
        match channel {
            Channel::Tx => self.tx,
            Channel::Rx => self.rx,
        }
    }
}

/// Operating mode selected by a table index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatingMode {
    /// Amateur band channel, both synthesizers
    Amateur,
    /// Transmitter tuning, TX synthesizer only
    TxTuning,
    /// Receiver tuning, RX synthesizer only
    RxTuning,
    /// Commercial band channel, both synthesizers
    Commercial,
    /// Square wave on one programming line
    TestMode,
    /// Alternate the channel LEDs
    LedTest,
    /// No action
    Unused,
}

impl OperatingMode {
    /// Which synthesizers this mode programs
    #[must_use]
    pub const fn channels(self) -> ChannelSelection {
        match self {
            Self::Amateur | Self::Commercial => ChannelSelection::BOTH,
            Self::TxTuning => ChannelSelection::TX_ONLY,
            Self::RxTuning => ChannelSelection::RX_ONLY,
            Self::TestMode | Self::LedTest | Self::Unused => ChannelSelection::NONE,
        }
    }

    /// True for modes that go through normal synthesizer programming
    #[must_use]
    pub const fn is_programming(self) -> bool {
        matches!(
            self,
            Self::Amateur | Self::TxTuning | Self::RxTuning | Self::Commercial
        )
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Amateur => "Amateur band",
            Self::TxTuning => "Tx tuning mode",
            Self::RxTuning => "Rx tuning mode",
            Self::Commercial => "Commercial band",
            Self::TestMode => "Pin test mode",
            Self::LedTest => "LED test",
            Self::Unused => "Unused test mode",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OperatingMode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.description());
    }
}

/// Which synthesizers to program
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelSelection {
    /// Program the TX synthesizer
    pub program_tx: bool,
    /// Program the RX synthesizer
    pub program_rx: bool,
}

impl ChannelSelection {
    /// Both synthesizers
    pub const BOTH: Self = Self::new(true, true);
    /// TX synthesizer only
    pub const TX_ONLY: Self = Self::new(true, false);
    /// RX synthesizer only
    pub const RX_ONLY: Self = Self::new(false, true);
    /// Neither synthesizer
    pub const NONE: Self = Self::new(false, false);

    /// Create a selection
    #[must_use]
    pub const fn new(program_tx: bool, program_rx: bool) -> Self {
        Self {
            program_tx,
            program_rx,
        }
    }

    /// True if the given channel is selected
    #[must_use]
    pub const fn includes(self, channel: Channel) -> bool {
        match channel {
            Channel::Tx => self.program_tx,
            Channel::Rx => self.program_rx,
        }
    }
}

/// Synthesizer channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Transmitter synthesizer
    Tx,
    /// Receiver synthesizer
    Rx,
}

impl Channel {
    /// Logical programming lines of this channel
    #[must_use]
    pub const fn pins(self) -> ProgPins {
        match self {
            Self::Tx => ProgPins::TX,
            Self::Rx => ProgPins::RX,
        }
    }

    /// Short label used in console output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tx => "Tx",
            Self::Rx => "Rx",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}

/// Protocol-level line identifier, independent of wiring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalPin {
    /// TX synthesizer clock
    TxClk,
    /// TX synthesizer data
    TxData,
    /// TX synthesizer latch enable
    TxLe,
    /// RX synthesizer clock
    RxClk,
    /// RX synthesizer data
    RxData,
    /// RX synthesizer latch enable
    RxLe,
}

impl LogicalPin {
    /// All logical pins in wiring order
    pub const ALL: [Self; 6] = [
        Self::TxClk,
        Self::TxData,
        Self::TxLe,
        Self::RxClk,
        Self::RxData,
        Self::RxLe,
    ];

    /// Position in [`Self::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Schematic name of the line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TxClk => "TX_CLK",
            Self::TxData => "TX_DATA",
            Self::TxLe => "TX_LE",
            Self::RxClk => "RX_CLK",
            Self::RxData => "RX_DATA",
            Self::RxLe => "RX_LE",
        }
    }

    /// Channel the line belongs to
    #[must_use]
    pub const fn channel(self) -> Channel {
        match self {
            Self::TxClk | Self::TxData | Self::TxLe => Channel::Tx,
            Self::RxClk | Self::RxData | Self::RxLe => Channel::Rx,
        }
    }
}

impl fmt::Display for LogicalPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LogicalPin {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Pin direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinDirection {
    /// High impedance input
    Input,
    /// Push-pull output
    Output,
}

/// The clock, data and latch-enable lines of one synthesizer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgPins {
    /// Clock line
    pub clk: LogicalPin,
    /// Data line
    pub data: LogicalPin,
    /// Latch enable line
    pub le: LogicalPin,
}

impl ProgPins {
    /// TX synthesizer lines
    pub const TX: Self = Self {
        clk: LogicalPin::TxClk,
        data: LogicalPin::TxData,
        le: LogicalPin::TxLe,
    };

    /// RX synthesizer lines
    pub const RX: Self = Self {
        clk: LogicalPin::RxClk,
        data: LogicalPin::RxData,
        le: LogicalPin::RxLe,
    };
}

/// Channel LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LedMode {
    /// LED is off
    #[default]
    Off,
    /// LED is blinking
    Blink,
    /// LED is on
    On,
}

impl LedMode {
    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Blink => "Blink",
            Self::On => "On",
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedMode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Pin test configuration: the line to toggle and the LED pattern shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TestPattern {
    /// Line driven with a square wave
    pub pin: LogicalPin,
    /// TX LED state
    pub tx_led: LedMode,
    /// RX LED state
    pub rx_led: LedMode,
}

impl TestPattern {
    /// Create a test pattern
    #[must_use]
    pub const fn new(pin: LogicalPin, tx_led: LedMode, rx_led: LedMode) -> Self {
        Self { pin, tx_led, rx_led }
    }
}
