//! "Hello, World" demo sequence
//!
//! Initializes the display, registers the four demo glyphs, writes two lines
//! of text followed by the glyphs, and then blinks the backlight forever with
//! a one second dwell in each state.
//!
//! ```text
//! +----------------+
//! |Hello, World!   |
//! |aKaReZa CHRS    |   C=clock H=heart R=robot S=smiley
//! +----------------+
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use alcd::{Builder, Dimensions, Display, ParallelInterface, demo};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let data = [MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin];
//! let interface = ParallelInterface::new_8bit(MockPin, MockPin, MockPin, data);
//! let config = match Builder::new().dimensions(Dimensions::LCD_16X2).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = Display::new(interface, config);
//!
//! // Only returns if the bus fails
//! let _ = demo::run(&mut display, &mut delay);
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::display::{Display, Position};
use crate::error::Error;
use crate::glyph::CustomChar;
use crate::interface::DisplayInterface;

/// First line of text
pub const GREETING: &str = "Hello, World!";
/// Second line of text
pub const SIGNATURE: &str = "aKaReZa";
/// Where the glyph row starts
pub const GLYPH_ROW_START: Position = Position::new(8, 1);
/// Glyphs written at [`GLYPH_ROW_START`], left to right
pub const GLYPH_ORDER: [CustomChar; 4] = [
    CustomChar::Clock,
    CustomChar::Heart,
    CustomChar::Robot,
    CustomChar::Smiley,
];
/// Time spent in each backlight state
pub const DWELL_MS: u32 = 1_000;

/// Register the glyphs and draw the static screen
///
/// Expects an initialized display.
pub fn setup<I, D>(display: &mut Display<I>, delay: &mut D) -> Result<(), Error<I>>
where
    I: DisplayInterface,
    D: DelayNs,
{
    for ch in CustomChar::ALL {
        display.define_custom(ch, delay)?;
    }
    debug!("registered {} glyphs", CustomChar::ALL.len());

    display.set_cursor(0, 0, delay)?;
    display.write_str(GREETING, delay)?;
    display.set_cursor(0, 1, delay)?;
    display.write_str(SIGNATURE, delay)?;

    display.set_cursor(GLYPH_ROW_START.col, GLYPH_ROW_START.row, delay)?;
    for ch in GLYPH_ORDER {
        display.write_custom(ch, delay)?;
    }
    Ok(())
}

/// Backlight state of the blink loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BacklightPhase {
    /// Backlight on
    #[default]
    On,
    /// Backlight off
    Off,
}

impl BacklightPhase {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// Whether the backlight is lit in this phase
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Two-phase backlight blinker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    phase: BacklightPhase,
    dwell_ms: u32,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(DWELL_MS)
    }
}

impl Heartbeat {
    /// Create a blinker that starts lit and holds each phase for `dwell_ms`
    pub fn new(dwell_ms: u32) -> Self {
        Self {
            phase: BacklightPhase::On,
            dwell_ms,
        }
    }

    /// Phase the next [`step`](Self::step) will apply
    pub fn phase(&self) -> BacklightPhase {
        self.phase
    }

    /// Time spent in each phase
    pub fn dwell_ms(&self) -> u32 {
        self.dwell_ms
    }

    /// Apply the current phase, wait out the dwell, then advance
    ///
    /// Returns the phase that was applied.
    pub fn step<I, D>(
        &mut self,
        display: &mut Display<I>,
        delay: &mut D,
    ) -> Result<BacklightPhase, Error<I>>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        let applied = self.phase;
        display.set_backlight(applied.is_on())?;
        delay.delay_ms(self.dwell_ms);
        self.phase = applied.next();
        Ok(applied)
    }
}

/// Run the whole demo: initialize, draw the screen, then blink forever
///
/// Never returns unless the bus reports an error.
pub fn run<I, D>(display: &mut Display<I>, delay: &mut D) -> Result<Infallible, Error<I>>
where
    I: DisplayInterface,
    D: DelayNs,
{
    display.init(delay)?;
    setup(display, delay)?;
    info!("demo screen drawn, blinking backlight every {DWELL_MS}ms");

    let mut heartbeat = Heartbeat::default();
    loop {
        heartbeat.step(display, delay)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{SET_CGRAM_ADDR, SET_DDRAM_ADDR};
    use crate::config::{Builder, Dimensions};
    use crate::glyph::{CLOCK, HEART, ROBOT, SMILEY};
    use crate::mock::{BusFault, Clock, FailingInterface, MockDelay, MockInterface, Op};
    use alloc::vec::Vec;

    const MS: u64 = 1_000_000;

    fn demo_display(clock: &Clock) -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::LCD_16X2)
            .build()
            .unwrap();
        Display::new(MockInterface::with_clock(clock.clone()), config)
    }

    #[test]
    fn test_setup_sequence() {
        let clock = Clock::default();
        let mut display = demo_display(&clock);
        let mut delay = MockDelay::with_clock(clock);
        setup(&mut display, &mut delay).unwrap();

        let restore = Op::Command(SET_DDRAM_ADDR);
        assert_eq!(
            display.release().operations(),
            alloc::vec![
                Op::Command(SET_CGRAM_ADDR),
                Op::Data(SMILEY.rows().to_vec()),
                restore.clone(),
                Op::Command(SET_CGRAM_ADDR | 0x08),
                Op::Data(ROBOT.rows().to_vec()),
                restore.clone(),
                Op::Command(SET_CGRAM_ADDR | 0x10),
                Op::Data(HEART.rows().to_vec()),
                restore.clone(),
                Op::Command(SET_CGRAM_ADDR | 0x18),
                Op::Data(CLOCK.rows().to_vec()),
                restore,
                Op::Command(SET_DDRAM_ADDR),
                Op::Data(b"Hello, World!".to_vec()),
                Op::Command(SET_DDRAM_ADDR | 0x40),
                Op::Data(b"aKaReZa".to_vec()),
                Op::Command(SET_DDRAM_ADDR | 0x48),
                Op::Data(alloc::vec![3]),
                Op::Data(alloc::vec![2]),
                Op::Data(alloc::vec![1]),
                Op::Data(alloc::vec![0]),
            ]
        );
    }

    #[test]
    fn test_setup_does_not_wait_or_touch_backlight() {
        let clock = Clock::default();
        let mut display = demo_display(&clock);
        let mut delay = MockDelay::with_clock(clock);
        setup(&mut display, &mut delay).unwrap();

        assert_eq!(delay.elapsed_ns(), 0);
        assert!(!display.is_backlight_on());
    }

    #[test]
    fn test_phase_alternates() {
        assert_eq!(BacklightPhase::default(), BacklightPhase::On);
        assert_eq!(BacklightPhase::On.next(), BacklightPhase::Off);
        assert_eq!(BacklightPhase::Off.next(), BacklightPhase::On);
        assert!(BacklightPhase::On.is_on());
        assert!(!BacklightPhase::Off.is_on());
    }

    #[test]
    fn test_heartbeat_step_holds_each_phase_for_dwell() {
        let clock = Clock::default();
        let mut display = demo_display(&clock);
        let mut delay = MockDelay::with_clock(clock);
        let mut heartbeat = Heartbeat::default();
        assert_eq!(heartbeat.dwell_ms(), DWELL_MS);

        let applied: Vec<BacklightPhase> = (0..4)
            .map(|_| heartbeat.step(&mut display, &mut delay).unwrap())
            .collect();
        assert_eq!(
            applied,
            alloc::vec![
                BacklightPhase::On,
                BacklightPhase::Off,
                BacklightPhase::On,
                BacklightPhase::Off,
            ]
        );
        assert_eq!(delay.elapsed_ms(), 4 * u64::from(DWELL_MS));
        assert_eq!(heartbeat.phase(), BacklightPhase::On);
    }

    #[test]
    fn test_backlight_trace_over_3500ms() {
        let clock = Clock::default();
        let mut display = demo_display(&clock);
        let mut delay = MockDelay::with_clock(clock.clone());
        setup(&mut display, &mut delay).unwrap();

        let start = clock.get();
        let mut heartbeat = Heartbeat::default();
        while clock.get() - start < 3_500 * MS {
            heartbeat.step(&mut display, &mut delay).unwrap();
        }

        let trace: Vec<(u64, bool)> = display
            .release()
            .ops
            .into_iter()
            .filter_map(|(at, op)| match op {
                Op::Backlight(on) => Some(((at - start) / MS, on)),
                _ => None,
            })
            .collect();
        assert_eq!(
            trace,
            alloc::vec![(0, true), (1_000, false), (2_000, true), (3_000, false)]
        );
        // Still off at 3500ms: the next change is not due until 4000ms
        assert_eq!(heartbeat.phase(), BacklightPhase::On);
        assert_eq!((clock.get() - start) / MS, 4_000);
    }

    #[test]
    fn test_setup_error_propagates() {
        let config = Builder::new()
            .dimensions(Dimensions::LCD_16X2)
            .build()
            .unwrap();
        let mut display = Display::new(FailingInterface, config);
        let mut delay = MockDelay::new();
        assert!(matches!(
            setup(&mut display, &mut delay),
            Err(Error::Interface(BusFault))
        ));
    }

    #[test]
    fn test_run_sets_up_once_then_only_blinks() {
        let clock = Clock::default();
        let config = Builder::new()
            .dimensions(Dimensions::LCD_16X2)
            .backlight_on_init(false)
            .build()
            .unwrap();
        // One backlight change from init, then five blink steps
        let interface = MockInterface::with_clock(clock.clone()).failing_after_backlights(6);
        let mut display = Display::new(interface, config);
        let mut delay = MockDelay::with_clock(clock);

        let result = run(&mut display, &mut delay);
        assert!(matches!(result, Err(Error::Interface(BusFault))));

        let ops = display.release().operations();
        let first_blink = ops
            .iter()
            .position(|op| *op == Op::Backlight(true))
            .unwrap();
        assert_eq!(ops.iter().filter(|op| **op == Op::Initialize).count(), 1);
        assert!(
            ops[first_blink..]
                .iter()
                .all(|op| matches!(op, Op::Backlight(_)))
        );
        let blinks: Vec<&Op> = ops[first_blink..].iter().collect();
        assert_eq!(blinks.len(), 5);
        assert_eq!(delay.elapsed_ms(), 5 * u64::from(DWELL_MS));
    }

    #[test]
    fn test_run_returns_only_on_bus_error() {
        let config = Builder::new()
            .dimensions(Dimensions::LCD_16X2)
            .build()
            .unwrap();
        let mut display = Display::new(FailingInterface, config);
        let mut delay = MockDelay::new();
        let result = run(&mut display, &mut delay);
        assert!(matches!(result, Err(Error::Interface(BusFault))));
    }
}
