//! MB1501 PLL Synthesizer Programmer
//!
//! Programs the TX and RX MB1501 synthesizers of a two-channel radio board
//! from a 256-entry frequency table. A table index selects an operating
//! mode; programming modes shift the reference divider and programmable
//! counter of each selected synthesizer over a bit-banged clock/data/LE
//! link, and the diagnostic modes toggle a single line or the channel LEDs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         CLI (std)                            │
//! │        argument parsing  │  settings  │  signal flag         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                          CORE                                │
//! │  FrequencyTable → resolve() → SynthesizerProgrammer          │
//! │                                    └─ encoder (wire format)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                           HAL                                │
//! │   PinDriver / StatusIndicator                                │
//! │   BcmGpio (Pi)  │  Console  │  HalPins (embedded-hal)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core is `no_std`; everything touching the operating system sits
//! behind the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// System configuration and constants
pub mod config;

/// Shared types used across modules
pub mod types;

/// Frequency table and pin test patterns
pub mod table;

/// Table index to operating mode resolution
pub mod resolver;

/// Serial wire format
pub mod encoder;

/// Synthesizer programming and diagnostic loops
pub mod programmer;

/// Hardware Abstraction Layer
///
/// Pin driver and LED traits plus the platform implementations.
pub mod hal;

/// Host error types
#[cfg(feature = "std")]
pub mod error;

/// Command line and environment handling
#[cfg(feature = "std")]
pub mod cli;

/// Signal-driven cancellation
#[cfg(feature = "std")]
#[allow(unsafe_code)]
pub mod shutdown;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::encoder::WireFrame;
    pub use crate::hal::{NoIndicator, PinDriver, StatusIndicator};
    pub use crate::programmer::{Cancel, Never, Outcome, SynthesizerProgrammer};
    pub use crate::resolver::{resolve, Resolution};
    pub use crate::table::FrequencyTable;
}
