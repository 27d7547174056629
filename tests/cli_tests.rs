//! Command line and settings tests
//!
//! Run with: cargo test --features std --test cli_tests

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use mb1501_programmer::cli::{parse_args, ArgsError, Platform, Settings, EXIT_BAD_ENTRY, EXIT_OK};
use mb1501_programmer::error::HostError;

fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("mb1501")
        .chain(args.iter().copied())
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Argument Tests
// ============================================================================

#[test]
fn first_entry_is_index_zero() {
    assert_eq!(parse_args(argv(&["1"])), Ok(0));
}

#[test]
fn last_entry_is_index_255() {
    assert_eq!(parse_args(argv(&["256"])), Ok(255));
}

#[test]
fn entry_81_is_index_80() {
    assert_eq!(parse_args(argv(&["81"])), Ok(80));
}

#[test]
fn missing_argument_is_usage() {
    let err = parse_args(argv(&[])).unwrap_err();
    assert_eq!(
        err,
        ArgsError::Usage {
            program: "mb1501".to_owned()
        }
    );
    assert_eq!(err.exit_code(), EXIT_OK);
}

#[test]
fn extra_arguments_are_usage() {
    let err = parse_args(argv(&["1", "2"])).unwrap_err();
    assert!(matches!(err, ArgsError::Usage { .. }));
    assert_eq!(err.exit_code(), 0);
}

#[test]
fn usage_names_the_program() {
    let err = parse_args(vec!["/usr/local/bin/mb1501".to_owned()]).unwrap_err();
    assert!(err.to_string().starts_with("Usage /usr/local/bin/mb1501 <n>"));
}

#[test]
fn zero_is_out_of_range() {
    let err = parse_args(argv(&["0"])).unwrap_err();
    assert!(matches!(err, ArgsError::OutOfRange { .. }));
    assert_eq!(err.exit_code(), EXIT_BAD_ENTRY);
}

#[test]
fn above_256_is_out_of_range() {
    let err = parse_args(argv(&["257"])).unwrap_err();
    assert!(matches!(err, ArgsError::OutOfRange { .. }));
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn non_numeric_is_out_of_range() {
    for bad in ["abc", "-3", "12.5", ""] {
        let err = parse_args(argv(&[bad])).unwrap_err();
        assert!(matches!(err, ArgsError::OutOfRange { .. }), "{bad:?}");
    }
}

// ============================================================================
// Settings Tests
// ============================================================================

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_environment() {
    let settings = Settings::from_lookup(lookup(&[])).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.platform, Platform::Pi);
    assert_eq!(settings.bit_delay, Duration::from_micros(5));
    assert_eq!(settings.led_delay_units, 1600);
    assert_eq!(settings.peri_base, 0x2000_0000);
    assert!(settings.table.is_none());
    assert!(!settings.verbose);
}

#[test]
fn environment_overrides() {
    let settings = Settings::from_lookup(lookup(&[
        ("MB1501_PLATFORM", "console"),
        ("MB1501_TABLE", "/etc/mb1501/table.txt"),
        ("MB1501_BIT_DELAY_US", "20"),
        ("MB1501_LED_DELAY", "800"),
        ("MB1501_PERI_BASE", "0x3F000000"),
        ("MB1501_VERBOSE", "1"),
    ]))
    .unwrap();

    assert_eq!(settings.platform, Platform::Console);
    assert_eq!(settings.table, Some(PathBuf::from("/etc/mb1501/table.txt")));
    assert_eq!(settings.bit_delay, Duration::from_micros(20));
    assert_eq!(settings.led_delay_units, 800);
    assert_eq!(settings.peri_base, 0x3F00_0000);
    assert!(settings.verbose);
}

#[test]
fn empty_table_path_is_ignored() {
    let settings = Settings::from_lookup(lookup(&[("MB1501_TABLE", "  ")])).unwrap();
    assert!(settings.table.is_none());
}

#[test]
fn bad_platform_is_config_error() {
    let err = Settings::from_lookup(lookup(&[("MB1501_PLATFORM", "pic")])).unwrap_err();
    assert!(matches!(
        err,
        HostError::Config {
            var: "MB1501_PLATFORM",
            ..
        }
    ));
}

#[test]
fn bad_delay_is_config_error() {
    let err = Settings::from_lookup(lookup(&[("MB1501_BIT_DELAY_US", "fast")])).unwrap_err();
    assert!(err.to_string().contains("MB1501_BIT_DELAY_US"));
}
