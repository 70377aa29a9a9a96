//! Test doubles shared by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::interface::{BusWidth, DisplayInterface};

/// Monotonic clock shared between a delay and the things it times
pub type Clock = Rc<Cell<u64>>;

/// Delay that advances a virtual clock instead of sleeping
pub struct MockDelay {
    clock: Clock,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::with_clock(Clock::default())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.clock.get()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.get() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.set(self.clock.get() + u64::from(ns));
    }
}

/// Pin transitions as (pin name, index, level)
pub type PinLog = Rc<RefCell<Vec<(&'static str, usize, bool)>>>;

/// Output pin that appends every transition to a shared log
pub struct RecordingPin {
    log: PinLog,
    name: &'static str,
    index: usize,
}

impl RecordingPin {
    pub fn new(log: &PinLog, name: &'static str, index: usize) -> Self {
        Self {
            log: Rc::clone(log),
            name,
            index,
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, self.index, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, self.index, true));
        Ok(())
    }
}

/// Operation seen by [`MockInterface`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Initialize,
    Command(u8),
    Data(Vec<u8>),
    Backlight(bool),
}

/// Interface that records operations together with the clock time they happened at
#[derive(Debug)]
pub struct MockInterface {
    pub ops: Vec<(u64, Op)>,
    clock: Clock,
    bus_width: BusWidth,
    /// Backlight changes accepted before the bus starts failing
    backlight_budget: Option<usize>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::with_clock(Clock::default())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            ops: Vec::new(),
            clock,
            bus_width: BusWidth::EightBit,
            backlight_budget: None,
        }
    }

    pub fn four_bit(mut self) -> Self {
        self.bus_width = BusWidth::FourBit;
        self
    }

    pub fn failing_after_backlights(mut self, count: usize) -> Self {
        self.backlight_budget = Some(count);
        self
    }

    fn record(&mut self, op: Op) {
        self.ops.push((self.clock.get(), op));
    }

    /// Recorded operations without timestamps
    pub fn operations(&self) -> Vec<Op> {
        self.ops.iter().map(|(_, op)| op.clone()).collect()
    }
}

impl DisplayInterface for MockInterface {
    type Error = BusFault;

    fn initialize<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.record(Op::Initialize);
        Ok(())
    }

    fn send_command<D: DelayNs>(&mut self, command: u8, _delay: &mut D) -> Result<(), Self::Error> {
        self.record(Op::Command(command));
        Ok(())
    }

    fn send_data<D: DelayNs>(&mut self, data: &[u8], _delay: &mut D) -> Result<(), Self::Error> {
        self.record(Op::Data(data.to_vec()));
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        match self.backlight_budget {
            Some(0) => return Err(BusFault),
            Some(ref mut left) => *left -= 1,
            None => {}
        }
        self.record(Op::Backlight(on));
        Ok(())
    }

    fn bus_width(&self) -> BusWidth {
        self.bus_width
    }
}

/// Interface whose bus always fails
#[derive(Debug)]
pub struct FailingInterface;

/// Error reported by [`FailingInterface`]
#[derive(Debug, PartialEq, Eq)]
pub struct BusFault;

impl DisplayInterface for FailingInterface {
    type Error = BusFault;

    fn initialize<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        Err(BusFault)
    }

    fn send_command<D: DelayNs>(&mut self, _command: u8, _delay: &mut D) -> Result<(), Self::Error> {
        Err(BusFault)
    }

    fn send_data<D: DelayNs>(&mut self, _data: &[u8], _delay: &mut D) -> Result<(), Self::Error> {
        Err(BusFault)
    }

    fn set_backlight(&mut self, _on: bool) -> Result<(), Self::Error> {
        Err(BusFault)
    }

    fn bus_width(&self) -> BusWidth {
        BusWidth::EightBit
    }
}
