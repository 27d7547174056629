//! Synthesizer programmer tests
//!
//! Channel ordering, LED updates and the run-until-cancelled diagnostic
//! loops.
//! Run with: cargo test --features std --test programmer_tests

mod common;

use core::sync::atomic::AtomicBool;

use common::{bit_string, bits_of, AfterChecks, Event, LedLog, Recorder};
use mb1501_programmer::prelude::*;
use mb1501_programmer::table::TEST_PATTERNS;

fn entry() -> TableEntry {
    TableEntry::new(
        RegisterValue::new(0x0190, 0x2_A5F8),
        RegisterValue::new(0x1234, 0x0_0001),
    )
}

fn programmer() -> SynthesizerProgrammer<Recorder, LedLog> {
    SynthesizerProgrammer::new(Recorder::new(), LedLog::default())
}

// ============================================================================
// Programming Tests
// ============================================================================

#[test]
fn both_channels_rx_first() {
    let mut p = programmer();
    p.program(&entry(), ChannelSelection::BOTH);
    let (pins, leds) = p.release();

    assert_eq!(pins.channel_order(), vec![Channel::Rx, Channel::Tx]);
    assert_eq!(
        leds.events,
        vec![(Channel::Rx, LedMode::Blink), (Channel::Tx, LedMode::Blink)]
    );
}

#[test]
fn both_channels_send_their_own_values() {
    let mut p = programmer();
    p.program(&entry(), ChannelSelection::BOTH);
    let (pins, _) = p.release();

    let rx = pins.latched_words(ProgPins::RX);
    assert_eq!(rx.len(), 2);
    assert_eq!(rx[0], bit_string("0010 0100 0110 1001"));
    assert_eq!(rx[1], bits_of(0x2, 19));

    let tx = pins.latched_words(ProgPins::TX);
    assert_eq!(tx.len(), 2);
    assert_eq!(tx[0], bits_of((0x0190 << 1) | 1, 16));
    assert_eq!(tx[1], bits_of(0x2_A5F8 << 1, 19));
}

#[test]
fn tx_only_turns_rx_led_off() {
    let mut p = programmer();
    p.program(&entry(), ChannelSelection::TX_ONLY);
    let (pins, leds) = p.release();

    assert_eq!(pins.channel_order(), vec![Channel::Tx]);
    assert!(pins.latched_words(ProgPins::RX).is_empty());
    assert_eq!(
        leds.events,
        vec![(Channel::Rx, LedMode::Off), (Channel::Tx, LedMode::Blink)]
    );
}

#[test]
fn rx_only_turns_tx_led_off() {
    let mut p = programmer();
    p.program(&entry(), ChannelSelection::RX_ONLY);
    let (pins, leds) = p.release();

    assert_eq!(pins.channel_order(), vec![Channel::Rx]);
    assert!(pins.latched_words(ProgPins::TX).is_empty());
    assert_eq!(
        leds.events,
        vec![(Channel::Rx, LedMode::Blink), (Channel::Tx, LedMode::Off)]
    );
}

#[test]
fn no_channels_touches_no_pins() {
    let mut p = programmer();
    p.program(&entry(), ChannelSelection::NONE);
    let (pins, leds) = p.release();

    assert!(pins.events.is_empty());
    assert_eq!(
        leds.events,
        vec![(Channel::Rx, LedMode::Off), (Channel::Tx, LedMode::Off)]
    );
}

// ============================================================================
// Dispatch Tests
// ============================================================================

fn table_with(index: u8, value: TableEntry) -> FrequencyTable {
    let mut entries = [TableEntry::BLANK; N_TABLE_ENTRIES];
    entries[usize::from(index)] = value;
    FrequencyTable::from_entries(entries)
}

#[test]
fn dispatch_amateur_programs_both() {
    let table = table_with(0, entry());
    let mut p = programmer();
    let outcome = p.dispatch(&resolve(0, &table), &Never);
    assert_eq!(outcome, Outcome::Programmed(ChannelSelection::BOTH));
    let (pins, _) = p.release();
    assert_eq!(pins.latched_words(ProgPins::RX).len(), 2);
    assert_eq!(pins.latched_words(ProgPins::TX).len(), 2);
}

#[test]
fn dispatch_tx_tuning_programs_tx_only() {
    let table = table_with(80, entry());
    let mut p = programmer();
    let outcome = p.dispatch(&resolve(80, &table), &Never);
    assert_eq!(outcome, Outcome::Programmed(ChannelSelection::TX_ONLY));
    let (pins, _) = p.release();
    assert_eq!(pins.channel_order(), vec![Channel::Tx]);
}

#[test]
fn dispatch_unused_does_nothing() {
    let mut p = programmer();
    let outcome = p.dispatch(&resolve(230, &FrequencyTable::blank()), &Never);
    assert_eq!(outcome, Outcome::Skipped);
    let (pins, leds) = p.release();
    assert!(pins.events.is_empty());
    assert!(leds.events.is_empty());
}

#[test]
fn dispatch_test_mode_runs_until_cancelled() {
    let mut p = programmer();
    let outcome = p.dispatch(&resolve(240, &FrequencyTable::blank()), &AfterChecks::new(3));
    assert_eq!(outcome, Outcome::Cancelled(OperatingMode::TestMode));

    let (pins, leds) = p.release();
    assert_eq!(leds.events, vec![(Channel::Tx, LedMode::On), (Channel::Rx, LedMode::Off)]);
    let rising = pins
        .events
        .iter()
        .filter(|e| **e == Event::Level(LogicalPin::TxClk, true))
        .count();
    assert_eq!(rising, 3);
}

#[test]
fn dispatch_led_test_runs_until_cancelled() {
    let mut p = programmer().with_led_delay(4);
    let cancel = AtomicBool::new(true);
    let outcome = p.dispatch(&resolve(255, &FrequencyTable::blank()), &cancel);
    assert_eq!(outcome, Outcome::Cancelled(OperatingMode::LedTest));
    let (_, leds) = p.release();
    assert_eq!(leds.events, vec![(Channel::Tx, LedMode::On), (Channel::Rx, LedMode::Off)]);
}

// ============================================================================
// Diagnostic Loop Tests
// ============================================================================

#[test]
fn test_mode_cycle_is_one_square_wave_period() {
    let mut p = programmer();
    p.test_mode_cycle(TEST_PATTERNS[4]);
    let (pins, _) = p.release();
    assert_eq!(
        pins.events,
        vec![
            Event::Delay,
            Event::Level(LogicalPin::RxData, true),
            Event::Delay,
            Event::Level(LogicalPin::RxData, false),
        ]
    );
}

#[test]
fn test_mode_drives_selected_line_as_output() {
    let mut p = programmer();
    p.run_test_mode(TEST_PATTERNS[5], &AfterChecks::new(2));
    let (pins, leds) = p.release();

    assert_eq!(pins.events[0], Event::Direction(LogicalPin::RxLe, PinDirection::Output));
    for event in pins.pin_events() {
        match event {
            Event::Level(pin, _) | Event::Direction(pin, _) => assert_eq!(pin, LogicalPin::RxLe),
            Event::Delay => unreachable!(),
        }
    }
    assert_eq!(leds.events, vec![(Channel::Tx, LedMode::Off), (Channel::Rx, LedMode::On)]);
}

#[test]
fn test_mode_cancelled_before_start_runs_no_cycles() {
    let mut p = programmer();
    p.run_test_mode(TEST_PATTERNS[0], &AtomicBool::new(true));
    let (pins, _) = p.release();
    assert_eq!(pins.delays(), 0);
}

#[test]
fn led_test_cycle_alternates() {
    let mut p = programmer().with_led_delay(3);
    p.led_test_cycle();
    let (pins, leds) = p.release();

    assert_eq!(pins.delays(), 6);
    assert_eq!(
        leds.events,
        vec![
            (Channel::Tx, LedMode::Off),
            (Channel::Rx, LedMode::On),
            (Channel::Tx, LedMode::On),
            (Channel::Rx, LedMode::Off),
        ]
    );
}

#[test]
fn led_test_runs_requested_cycles() {
    let mut p = programmer().with_led_delay(1);
    p.run_led_test(&AfterChecks::new(2));
    let (pins, leds) = p.release();

    assert_eq!(pins.delays(), 4);
    // initial state plus four updates per cycle
    assert_eq!(leds.events.len(), 2 + 2 * 4);
    assert_eq!(leds.events[..2], [(Channel::Tx, LedMode::On), (Channel::Rx, LedMode::Off)]);
    assert_eq!(leds.events.last(), Some(&(Channel::Rx, LedMode::Off)));
}

#[test]
fn default_led_delay() {
    assert_eq!(programmer().led_delay_units(), 1600);
}

#[test]
fn never_token_is_never_cancelled() {
    assert!(!Never.is_cancelled());
    assert!(AtomicBool::new(true).is_cancelled());
    assert!(!AtomicBool::new(false).is_cancelled());
}
