use pretty_assertions::assert_eq;
use spimaster_core::common::{ConfigError, RegAddr, Rw, VerifyError};

fn addr(a: u8) -> RegAddr {
    RegAddr::new(a).unwrap()
}

#[test]
fn timeout_is_distinct_from_value_failures() {
    let timeout = VerifyError::Timeout {
        rw: Rw::Read,
        addr: addr(0x42),
        cycles: 1000,
    };
    let wrong = VerifyError::UnexpectedValue {
        addr: addr(0x42),
        value: 0x12,
        accepted: vec![0x00, 0xFF],
    };
    assert!(timeout.is_timeout());
    assert!(!wrong.is_timeout());
    assert_ne!(timeout, wrong);
}

#[test]
fn messages_name_the_register() {
    let err = VerifyError::Timeout {
        rw: Rw::Write,
        addr: addr(0x4B),
        cycles: 1000,
    };
    assert_eq!(
        err.to_string(),
        "write transaction at 0x4b still busy after 1000 cycles"
    );

    let err = VerifyError::Mismatch {
        addr: addr(0x40),
        expected: 0x32,
        actual: 0x00,
    };
    assert_eq!(
        err.to_string(),
        "read from 0x40 returned 0x00, expected 0x32"
    );
}

#[test]
fn unexpected_value_lists_accepted_set() {
    let err = VerifyError::UnexpectedValue {
        addr: addr(0x42),
        value: 0x5A,
        accepted: vec![0x00, 0xFF],
    };
    assert_eq!(
        err.to_string(),
        "read from 0x42 returned 0x5a, accepted values are [00, ff]"
    );
}

#[test]
fn config_error_wraps_parse_failure() {
    let parse = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = ConfigError::from(parse);
    assert!(err.to_string().starts_with("failed to parse config:"));
}
