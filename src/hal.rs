//! Hardware Abstraction Layer
//!
//! The programmer talks to the outside world through two small traits:
//! [`PinDriver`] for the six synthesizer programming lines and
//! [`StatusIndicator`] for the channel LEDs. Platform implementations live
//! in the submodules and are picked at startup.

use crate::types::{Channel, LedMode, LogicalPin, PinDirection};

#[cfg(feature = "std")]
pub mod console;
#[cfg(feature = "embedded")]
pub mod embedded;
#[cfg(feature = "std")]
#[allow(unsafe_code)]
pub mod gpio;

/// Logical pin level and direction control
///
/// Every call is synchronous and side-effect only. Driver failures are
/// outside the programmer's contract.
pub trait PinDriver {
    /// Drive a line high (`true`) or low (`false`)
    fn set_level(&mut self, pin: LogicalPin, high: bool);

    /// Configure a line as input or output
    fn set_direction(&mut self, pin: LogicalPin, direction: PinDirection);

    /// Hold for one inter-edge delay unit
    fn delay_unit(&mut self);
}

impl<T: PinDriver + ?Sized> PinDriver for &mut T {
    fn set_level(&mut self, pin: LogicalPin, high: bool) {
        (**self).set_level(pin, high);
    }

    fn set_direction(&mut self, pin: LogicalPin, direction: PinDirection) {
        (**self).set_direction(pin, direction);
    }

    fn delay_unit(&mut self) {
        (**self).delay_unit();
    }
}

/// Channel LED rendering
///
/// Purely cosmetic; a board without LEDs uses [`NoIndicator`].
pub trait StatusIndicator {
    /// Show a mode on a channel LED
    fn set_indicator(&mut self, channel: Channel, mode: LedMode);
}

impl<T: StatusIndicator + ?Sized> StatusIndicator for &mut T {
    fn set_indicator(&mut self, channel: Channel, mode: LedMode) {
        (**self).set_indicator(channel, mode);
    }
}

/// Indicator for boards with no LEDs
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIndicator;

impl StatusIndicator for NoIndicator {
    fn set_indicator(&mut self, _channel: Channel, _mode: LedMode) {}
}
