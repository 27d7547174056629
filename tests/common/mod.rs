//! Shared test doubles: a recording pin driver, an LED log and a cancel token
//! that trips after a fixed number of checks.

#![allow(dead_code)]

use std::cell::Cell;

use mb1501_programmer::prelude::*;

/// Everything the programmer did, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Level(LogicalPin, bool),
    Direction(LogicalPin, PinDirection),
    Delay,
}

/// Records pin activity
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data line values sampled on each rising clock edge of one channel
    pub fn clocked_bits(&self, pins: ProgPins) -> Vec<bool> {
        let mut data = false;
        let mut bits = Vec::new();
        for event in &self.events {
            match *event {
                Event::Level(pin, level) if pin == pins.data => data = level,
                Event::Level(pin, true) if pin == pins.clk => bits.push(data),
                _ => {}
            }
        }
        bits
    }

    /// Clocked bits split at each latch-enable rising edge
    pub fn latched_words(&self, pins: ProgPins) -> Vec<Vec<bool>> {
        let mut data = false;
        let mut current = Vec::new();
        let mut words = Vec::new();
        for event in &self.events {
            match *event {
                Event::Level(pin, level) if pin == pins.data => data = level,
                Event::Level(pin, true) if pin == pins.clk => current.push(data),
                Event::Level(pin, true) if pin == pins.le => words.push(std::mem::take(&mut current)),
                _ => {}
            }
        }
        words
    }

    /// Pin events only (levels and directions)
    pub fn pin_events(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|event| matches!(event, Event::Level(..) | Event::Direction(..)))
            .collect()
    }

    /// Number of recorded delay units
    pub fn delays(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Delay).count()
    }

    /// Channels touched by level changes, in first-touch order
    pub fn channel_order(&self) -> Vec<Channel> {
        let mut order = Vec::new();
        for event in &self.events {
            if let Event::Level(pin, _) = *event {
                if order.last() != Some(&pin.channel()) {
                    order.push(pin.channel());
                }
            }
        }
        order
    }
}

impl PinDriver for Recorder {
    fn set_level(&mut self, pin: LogicalPin, high: bool) {
        self.events.push(Event::Level(pin, high));
    }

    fn set_direction(&mut self, pin: LogicalPin, direction: PinDirection) {
        self.events.push(Event::Direction(pin, direction));
    }

    fn delay_unit(&mut self) {
        self.events.push(Event::Delay);
    }
}

/// LED recorder kept apart from the pin log
#[derive(Debug, Default)]
pub struct LedLog {
    pub events: Vec<(Channel, LedMode)>,
}

impl StatusIndicator for LedLog {
    fn set_indicator(&mut self, channel: Channel, mode: LedMode) {
        self.events.push((channel, mode));
    }
}

/// Cancel token that allows `n` loop iterations
pub struct AfterChecks {
    remaining: Cell<usize>,
}

impl AfterChecks {
    pub fn new(iterations: usize) -> Self {
        Self {
            remaining: Cell::new(iterations),
        }
    }
}

impl Cancel for AfterChecks {
    fn is_cancelled(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            true
        } else {
            self.remaining.set(left - 1);
            false
        }
    }
}

/// MSB-first bits of the low `width` bits of a word
pub fn bits_of(word: u32, width: u8) -> Vec<bool> {
    (0..width).rev().map(|i| word & (1 << i) != 0).collect()
}

/// Parse a `0`/`1` string, ignoring spaces
pub fn bit_string(s: &str) -> Vec<bool> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c == '1')
        .collect()
}
