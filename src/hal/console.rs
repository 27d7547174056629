//! Console stand-in for the programming lines and LEDs
//!
//! Used on machines without the synthesizer board. Data line writes are
//! printed as a bit string and every latch pulse ends the line, so a
//! transfer reads as
//!
//! ```text
//! 0010010001101001
//! RX_LE 1
//!
//! RX_LE 0
//! ```
//!
//! In verbose mode every line change is printed on its own line.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use crate::hal::{PinDriver, StatusIndicator};
use crate::types::{Channel, LedMode, LogicalPin, PinDirection};

/// Shared write helper: reports the first failure, then stays quiet
struct Sink<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> Sink<W> {
    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.failed {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            log::warn!("console output failed: {e}");
            self.failed = true;
        }
    }
}

/// Printing pin driver
pub struct ConsolePins<W: Write> {
    sink: Sink<W>,
    verbose: bool,
    delay: Duration,
}

impl ConsolePins<io::Stdout> {
    /// Print to standard output
    #[must_use]
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsolePins<W> {
    /// Print to any writer, with no delay between edges
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            sink: Sink { out, failed: false },
            verbose,
            delay: Duration::ZERO,
        }
    }

    /// Sleep for `delay` on every delay unit
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay unit length
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Destroy the driver and return the writer
    pub fn into_inner(self) -> W {
        self.sink.out
    }
}

impl<W: Write> PinDriver for ConsolePins<W> {
    fn set_level(&mut self, pin: LogicalPin, high: bool) {
        let level = u8::from(high);
        match pin {
            LogicalPin::TxLe | LogicalPin::RxLe => {
                self.sink.emit(format_args!("\n{pin} {level}\n"));
            }
            _ if self.verbose => self.sink.emit(format_args!("{pin} {level}\n")),
            LogicalPin::TxData | LogicalPin::RxData => self.sink.emit(format_args!("{level}")),
            LogicalPin::TxClk | LogicalPin::RxClk => {}
        }
    }

    fn set_direction(&mut self, pin: LogicalPin, direction: PinDirection) {
        if self.verbose {
            let dir = match direction {
                PinDirection::Input => "input",
                PinDirection::Output => "output",
            };
            self.sink.emit(format_args!("{pin} {dir}\n"));
        }
    }

    fn delay_unit(&mut self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

/// Printing LED indicator
pub struct ConsoleIndicator<W: Write> {
    sink: Sink<W>,
}

impl ConsoleIndicator<io::Stdout> {
    /// Print to standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleIndicator<W> {
    /// Print to any writer
    pub fn new(out: W) -> Self {
        Self {
            sink: Sink { out, failed: false },
        }
    }

    /// Destroy the indicator and return the writer
    pub fn into_inner(self) -> W {
        self.sink.out
    }
}

impl<W: Write> StatusIndicator for ConsoleIndicator<W> {
    fn set_indicator(&mut self, channel: Channel, mode: LedMode) {
        self.sink.emit(format_args!("{channel} LED {mode}\n"));
    }
}
