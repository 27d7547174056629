//! MB1501 programmer command line
//!
//! `mb1501 <n>` programs frequency table entry `n` (1-256) into the
//! synthesizers, or runs one of the diagnostic modes at the top of the
//! table.

use std::process::ExitCode;

use env_logger::Env;
use log::{debug, error, info, warn};

use mb1501_programmer::cli::{self, Platform, Settings, EXIT_STARTUP};
use mb1501_programmer::error::{HostError, HostResult};
use mb1501_programmer::hal::console::{ConsoleIndicator, ConsolePins};
use mb1501_programmer::hal::gpio::BcmGpio;
use mb1501_programmer::prelude::*;
use mb1501_programmer::shutdown;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let index = match cli::parse_args(std::env::args()) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match run(index) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(EXIT_STARTUP)
        }
    }
}

fn run(index: u8) -> HostResult<()> {
    info!("MB1501 programmer v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env()?;
    debug!("{settings:?}");

    let table = match &settings.table {
        Some(path) => FrequencyTable::load(path)?,
        None => {
            warn!("No frequency table configured, using all-zero entries");
            FrequencyTable::blank()
        }
    };

    let resolution = resolve(index, &table);
    let cancel = shutdown::install()?;

    match settings.platform {
        Platform::Pi => {
            let gpio = BcmGpio::open(settings.peri_base, settings.bit_delay).map_err(HostError::Gpio)?;
            let mut programmer =
                SynthesizerProgrammer::new(gpio, NoIndicator).with_led_delay(settings.led_delay_units);
            let outcome = programmer.dispatch(&resolution, cancel);
            report(&outcome);

            if let Outcome::Programmed(channels) = outcome {
                let gpio = programmer.driver_mut();
                for channel in [Channel::Rx, Channel::Tx] {
                    if channels.includes(channel) {
                        info!("{channel} lock detect: {}", u8::from(gpio.lock_detect(channel)));
                    }
                }
            }
        }
        Platform::Console => {
            let pins = ConsolePins::stdout(settings.verbose).with_delay(settings.bit_delay);
            let mut programmer = SynthesizerProgrammer::new(pins, ConsoleIndicator::stdout())
                .with_led_delay(settings.led_delay_units);
            let outcome = programmer.dispatch(&resolution, cancel);
            report(&outcome);
        }
    }

    Ok(())
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Programmed(channels) => debug!("Programmed {channels:?}"),
        Outcome::Cancelled(mode) => info!("{mode} stopped"),
        Outcome::Skipped => {}
    }
}
