//! Runs the "Hello, World" demo on the host.
//!
//! The display pins are stand-ins that log their level changes, so the
//! sequence can be watched without hardware:
//!
//! ```text
//! RUST_LOG=debug cargo run --example hello_world
//! ```
//!
//! Backlight changes are logged at `info`, every other pin at `trace`.
//! The demo blinks until the process is killed.

use std::convert::Infallible;
use std::thread;
use std::time::Duration;

use alcd::{Builder, Dimensions, Display, ParallelInterface, demo};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::{error, info, trace};

/// Output pin that only logs
struct LoggingPin {
    name: &'static str,
}

impl LoggingPin {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl ErrorType for LoggingPin {
    type Error = Infallible;
}

impl OutputPin for LoggingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.name == "BL" {
            info!("backlight off");
        } else {
            trace!("{} low", self.name);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.name == "BL" {
            info!("backlight on");
        } else {
            trace!("{} high", self.name);
        }
        Ok(())
    }
}

/// Blocking delay on the host's monotonic sleep
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = ["D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7"].map(LoggingPin::new);
    let interface = ParallelInterface::new_8bit(
        LoggingPin::new("RS"),
        LoggingPin::new("EN"),
        LoggingPin::new("BL"),
        data,
    );

    let config = match Builder::new().dimensions(Dimensions::LCD_16X2).build() {
        Ok(config) => config,
        Err(e) => {
            error!("bad configuration: {e}");
            return;
        }
    };
    let mut display = Display::new(interface, config);

    match demo::run(&mut display, &mut StdDelay) {
        Ok(never) => match never {},
        Err(e) => error!("display stopped: {e}"),
    }
}
