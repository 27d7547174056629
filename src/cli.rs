//! Command line and environment handling for the `mb1501` binary
//!
//! The binary takes a single frequency ID `n` in `1..=256` and programs
//! table index `n - 1`. A wrong argument count prints the usage text and
//! exits with status 0, which scripts driving the board rely on. A bad
//! frequency ID exits with [`EXIT_BAD_ENTRY`].

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::config::{bcm, env, BIT_DELAY_US, LED_DELAY_UNITS, N_TABLE_ENTRIES};
use crate::error::{HostError, HostResult};

/// Normal termination, also used for the usage message
pub const EXIT_OK: u8 = 0;

/// Frequency ID missing from `1..=256`
pub const EXIT_BAD_ENTRY: u8 = 1;

/// Table, configuration or GPIO failure
pub const EXIT_STARTUP: u8 = 2;

/// Argument errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    /// Not exactly one argument
    #[error("Usage {program} <n>, where n is the frequency ID 1-256, see documentation for details")]
    Usage {
        /// Program name from argv[0]
        program: String,
    },

    /// Argument is not a number in range
    #[error("Entry must be in the range of 1 to 256 (got {given:?})")]
    OutOfRange {
        /// Argument as given
        given: String,
    },
}

impl ArgsError {
    /// Process exit status for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage { .. } => EXIT_OK,
            Self::OutOfRange { .. } => EXIT_BAD_ENTRY,
        }
    }
}

/// Parse `argv` into a zero-based table index
///
/// # Errors
///
/// [`ArgsError::Usage`] for a wrong argument count, [`ArgsError::OutOfRange`]
/// for anything that is not an integer in `1..=256`.
pub fn parse_args<I>(args: I) -> Result<u8, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "mb1501".to_owned());
    let rest: Vec<String> = args.collect();

    let [given] = rest.as_slice() else {
        return Err(ArgsError::Usage { program });
    };

    let entry: usize = given.trim().parse().map_err(|_| ArgsError::OutOfRange {
        given: given.clone(),
    })?;
    if !(1..=N_TABLE_ENTRIES).contains(&entry) {
        return Err(ArgsError::OutOfRange {
            given: given.clone(),
        });
    }

    u8::try_from(entry - 1).map_err(|_| ArgsError::OutOfRange {
        given: given.clone(),
    })
}

/// Pin driver selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Platform {
    /// Raspberry Pi memory-mapped GPIO
    #[default]
    Pi,
    /// Printed stand-in
    Console,
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pi" | "rpi" | "pi-zero" => Ok(Self::Pi),
            "console" | "pc" => Ok(Self::Console),
            _ => Err(()),
        }
    }
}

/// Runtime settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Pin driver to use
    pub platform: Platform,
    /// Frequency table file
    pub table: Option<PathBuf>,
    /// Inter-edge delay unit
    pub bit_delay: Duration,
    /// Delay units per LED test half-cycle
    pub led_delay_units: u32,
    /// BCM peripheral base address
    pub peri_base: u64,
    /// Console driver prints every line change
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform: Platform::Pi,
            table: None,
            bit_delay: Duration::from_micros(u64::from(BIT_DELAY_US)),
            led_delay_units: LED_DELAY_UNITS,
            peri_base: bcm::DEFAULT_PERI_BASE,
            verbose: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    ///
    /// # Errors
    ///
    /// Fails on the first variable with an unusable value.
    pub fn from_env() -> HostResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through a variable lookup function
    ///
    /// # Errors
    ///
    /// Fails on the first variable with an unusable value.
    pub fn from_lookup<F>(lookup: F) -> HostResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(env::PLATFORM) {
            settings.platform = value.parse().map_err(|()| invalid(env::PLATFORM, &value))?;
        }
        if let Some(value) = lookup(env::TABLE) {
            if !value.trim().is_empty() {
                settings.table = Some(PathBuf::from(value));
            }
        }
        if let Some(value) = lookup(env::BIT_DELAY_US) {
            let us: u64 = value.trim().parse().map_err(|_| invalid(env::BIT_DELAY_US, &value))?;
            settings.bit_delay = Duration::from_micros(us);
        }
        if let Some(value) = lookup(env::LED_DELAY) {
            settings.led_delay_units =
                value.trim().parse().map_err(|_| invalid(env::LED_DELAY, &value))?;
        }
        if let Some(value) = lookup(env::PERI_BASE) {
            settings.peri_base =
                parse_address(&value).ok_or_else(|| invalid(env::PERI_BASE, &value))?;
        }
        if let Some(value) = lookup(env::VERBOSE) {
            settings.verbose = matches!(value.trim(), "1" | "true" | "yes" | "on");
        }

        Ok(settings)
    }
}

fn invalid(var: &'static str, value: &str) -> HostError {
    HostError::Config {
        var,
        value: value.to_owned(),
    }
}

/// Decimal or `0x` hex address
fn parse_address(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => value.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_address_forms() {
        assert_eq!(parse_address("0x20000000"), Some(0x2000_0000));
        assert_eq!(parse_address("0x3F00_0000"), Some(0x3F00_0000));
        assert_eq!(parse_address(" 536870912 "), Some(0x2000_0000));
        assert_eq!(parse_address("base"), None);
    }

    #[test]
    fn platform_names() {
        assert_eq!("pi".parse::<Platform>(), Ok(Platform::Pi));
        assert_eq!("Console".parse::<Platform>(), Ok(Platform::Console));
        assert_eq!("pc".parse::<Platform>(), Ok(Platform::Console));
        assert_eq!("pic".parse::<Platform>(), Err(()));
    }
}
