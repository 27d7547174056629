//! Frequency table
//!
//! A fixed 256-entry table of TX/RX register pairs, plus the fixed set of
//! pin test patterns. The table is static configuration: it is built once
//! at startup and never mutated afterwards.
//!
//! # Text format
//!
//! ```text
//! # index  tx_ref  tx_ctr   rx_ref  rx_ctr
//! 0        0x0190  0x2A5F8  0x0190  0x23F10
//! 1        400     173560   400     147216
//! ```
//!
//! Numbers are decimal or `0x` hex. `#` starts a comment. Indices that are
//! not listed stay all-zero.

use core::fmt;

use heapless::Vec;

use crate::config::{layout, N_TABLE_ENTRIES};
use crate::types::{LedMode, LogicalPin, RegisterValue, TableEntry, TestPattern};

/// Pin test patterns, indexed by `index - TEST_MODE_START`
pub const TEST_PATTERNS: [TestPattern; layout::N_TEST_MODES as usize] = [
    TestPattern::new(LogicalPin::TxClk, LedMode::On, LedMode::Off),
    TestPattern::new(LogicalPin::TxData, LedMode::On, LedMode::Off),
    TestPattern::new(LogicalPin::TxLe, LedMode::On, LedMode::Off),
    TestPattern::new(LogicalPin::RxClk, LedMode::Off, LedMode::On),
    TestPattern::new(LogicalPin::RxData, LedMode::Off, LedMode::On),
    TestPattern::new(LogicalPin::RxLe, LedMode::Off, LedMode::On),
];

/// Columns per table line: index plus four register values
const COLUMNS: usize = 5;

/// Table parse errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Line does not have exactly five columns
    ColumnCount {
        /// 1-based line number
        line: usize,
    },
    /// A column is not a valid number
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// 0-based column
        column: usize,
    },
    /// Index outside 0..=255
    IndexOutOfRange {
        /// 1-based line number
        line: usize,
        /// Offending index
        index: u32,
    },
    /// Index listed twice
    DuplicateIndex {
        /// 1-based line number
        line: usize,
        /// Offending index
        index: u8,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ColumnCount { line } => {
                write!(f, "line {line}: expected {COLUMNS} columns")
            }
            Self::InvalidNumber { line, column } => {
                write!(f, "line {line}: column {} is not a number", column + 1)
            }
            Self::IndexOutOfRange { line, index } => {
                write!(f, "line {line}: index {index} is outside 0..=255")
            }
            Self::DuplicateIndex { line, index } => {
                write!(f, "line {line}: index {index} already defined")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

/// 256-entry frequency table
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: [TableEntry; N_TABLE_ENTRIES],
}

impl FrequencyTable {
    /// Table with every entry zeroed
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            entries: [TableEntry::BLANK; N_TABLE_ENTRIES],
        }
    }

    /// Build a table from a full set of entries
    #[must_use]
    pub const fn from_entries(entries: [TableEntry; N_TABLE_ENTRIES]) -> Self {
        Self { entries }
    }

    /// Entry at a table index
    #[must_use]
    pub const fn entry(&self, index: u8) -> &TableEntry {
        &self.entries[index as usize]
    }

    /// All entries in index order
    #[must_use]
    pub const fn entries(&self) -> &[TableEntry; N_TABLE_ENTRIES] {
        &self.entries
    }

    /// Number of entries that are not all-zero
    #[must_use]
    pub fn populated(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| **entry != TableEntry::BLANK)
            .count()
    }

    /// Parse the text table format
    ///
    /// # Errors
    ///
    /// Returns the first malformed line.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut table = Self::blank();
        let mut seen = [false; N_TABLE_ENTRIES];

        for (n, raw) in text.lines().enumerate() {
            let line = n + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let mut fields: Vec<u32, COLUMNS> = Vec::new();
            for (column, token) in content.split_whitespace().enumerate() {
                let value = parse_number(token).ok_or(TableError::InvalidNumber { line, column })?;
                fields
                    .push(value)
                    .map_err(|_| TableError::ColumnCount { line })?;
            }
            if fields.len() != COLUMNS {
                return Err(TableError::ColumnCount { line });
            }

            let index = u8::try_from(fields[0])
                .map_err(|_| TableError::IndexOutOfRange { line, index: fields[0] })?;
            if seen[index as usize] {
                return Err(TableError::DuplicateIndex { line, index });
            }
            seen[index as usize] = true;

            let entry = TableEntry::new(
                RegisterValue::new(fields[1], fields[2]),
                RegisterValue::new(fields[3], fields[4]),
            );
            if entry.tx.exceeds_width() || entry.rx.exceeds_width() {
                log::warn!("table line {line}: entry {index} exceeds register width, will truncate");
            }
            table.entries[index as usize] = entry;
        }

        Ok(table)
    }

    /// Load a table file from disk
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    #[cfg(feature = "std")]
    pub fn load(path: &std::path::Path) -> Result<Self, crate::error::HostError> {
        let text = std::fs::read_to_string(path).map_err(|source| crate::error::HostError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text).map_err(|source| crate::error::HostError::TableParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded frequency table {} ({} populated entries)",
            path.display(),
            table.populated()
        );
        Ok(table)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrequencyTable({} populated)", self.populated())
    }
}

/// Parse a decimal or `0x` hex number
fn parse_number(token: &str) -> Option<u32> {
    match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}
