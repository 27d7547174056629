//! Table index resolution
//!
//! Maps a table index onto the operating mode, the synthesizers to program
//! and the table entry to program them with. Resolution is total: indices
//! outside every named range resolve to [`OperatingMode::Unused`].

use crate::config::layout;
use crate::table::{FrequencyTable, TEST_PATTERNS};
use crate::types::{ChannelSelection, OperatingMode, TableEntry, TestPattern};

/// True if `index` lies in `start..start + count`
const fn in_band(index: u8, start: u8, count: u8) -> bool {
    index >= start && (index - start) < count
}

impl OperatingMode {
    /// Operating mode for a table index
    ///
    /// Bands are checked in priority order; the first match wins.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        if in_band(index, layout::AMATEUR_START, layout::N_AMATEUR) {
            Self::Amateur
        } else if in_band(index, layout::TX_TUNING_START, layout::N_TX_TUNING) {
            Self::TxTuning
        } else if in_band(index, layout::RX_TUNING_START, layout::N_RX_TUNING) {
            Self::RxTuning
        } else if in_band(index, layout::COMMERCIAL_START, layout::N_COMMERCIAL) {
            Self::Commercial
        } else if in_band(index, layout::TEST_MODE_START, layout::N_TEST_MODES) {
            Self::TestMode
        } else if index == layout::LED_TEST {
            Self::LedTest
        } else {
            Self::Unused
        }
    }
}

/// Result of resolving a table index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Zero-based table index
    pub index: u8,
    /// Operating mode of the index
    pub mode: OperatingMode,
    /// Synthesizers to program
    pub channels: ChannelSelection,
    /// Table entry at the index
    pub entry: TableEntry,
}

impl Resolution {
    /// Pin test pattern for a [`OperatingMode::TestMode`] index
    #[must_use]
    pub fn test_pattern(&self) -> Option<TestPattern> {
        match self.mode {
            OperatingMode::TestMode => self
                .index
                .checked_sub(layout::TEST_MODE_START)
                .and_then(|row| TEST_PATTERNS.get(usize::from(row)))
                .copied(),
            _ => None,
        }
    }
}

/// Resolve a table index against a frequency table
#[must_use]
pub fn resolve(index: u8, table: &FrequencyTable) -> Resolution {
    let mode = OperatingMode::from_index(index);
    Resolution {
        index,
        mode,
        channels: mode.channels(),
        entry: *table.entry(index),
    }
}
