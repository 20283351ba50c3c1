use pretty_assertions::assert_eq;
use rstest::rstest;
use spimaster_core::common::ConfigError;
use spimaster_core::config::{Config, SlaveKind, SpiMode};
use std::io::Write;

#[test]
fn defaults_match_bench_timing() {
    let config = Config::default();
    assert_eq!(config.clock.period_ns, 20);
    assert_eq!(config.reset.hold_cycles, 10);
    assert_eq!(config.reset.settle_cycles, 2);
    assert_eq!(config.reset.enable_settle_cycles, 20);
    assert_eq!(config.spi.sclk_divider, 4);
    assert_eq!(config.spi.mode, SpiMode::Mode0);
    assert_eq!(config.verifier.timeout_cycles, 1000);
    assert_eq!(config.verifier.accepted_read_values, vec![0x00, 0xFF]);
    assert_eq!(config.slave.kind, SlaveKind::None);
    assert!(!config.general.trace_signals);
}

#[test]
fn empty_json_is_the_default_config() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = Config::from_json(r#"{ "reset": { "hold_cycles": 4 } }"#).unwrap();
    assert_eq!(config.reset.hold_cycles, 4);
    assert_eq!(config.reset.settle_cycles, 2);
    assert_eq!(config.reset.enable_settle_cycles, 20);
}

#[rstest]
#[case(r#""Mode0""#, SpiMode::Mode0)]
#[case(r#""mode3""#, SpiMode::Mode3)]
#[case(r#""3""#, SpiMode::Mode3)]
fn spi_mode_aliases(#[case] mode: &str, #[case] expected: SpiMode) {
    let json = format!(r#"{{ "spi": {{ "mode": {mode} }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().spi.mode, expected);
}

#[rstest]
#[case("Bmm150")]
#[case("BMM150")]
#[case("bmm150")]
fn slave_kind_aliases(#[case] name: &str) {
    let json = format!(r#"{{ "slave": {{ "kind": "{name}" }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().slave.kind, SlaveKind::Bmm150);
}

#[test]
fn mode3_idles_clock_high() {
    assert!(SpiMode::Mode3.cpol());
    assert!(!SpiMode::Mode0.cpol());
}

#[rstest]
#[case(r#"{ "clock": { "period_ns": 0 } }"#, "clock.period_ns must be non-zero")]
#[case(r#"{ "spi": { "sclk_divider": 0 } }"#, "spi.sclk_divider must be non-zero")]
#[case(r#"{ "verifier": { "timeout_cycles": 0 } }"#, "verifier.timeout_cycles must be non-zero")]
fn zero_values_are_rejected(#[case] json: &str, #[case] message: &str) {
    match Config::from_json(json) {
        Err(ConfigError::Invalid(m)) => assert_eq!(m, message),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{ "spi": "#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "slave": { "kind": "Ak8963" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn frame_cycles_scale_with_divider() {
    let mut config = Config::default();
    assert_eq!(config.spi.frame_cycles(), 128);
    config.spi.sclk_divider = 1;
    assert_eq!(config.spi.frame_cycles(), 32);
}

#[test]
fn empty_accepted_set_accepts_any_value() {
    let mut config = Config::default();
    assert!(config.verifier.accepts(0xFF));
    assert!(!config.verifier.accepts(0x32));
    config.verifier.accepted_read_values.clear();
    assert!(config.verifier.accepts(0x32));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "verifier": {{ "timeout_cycles": 250, "accepted_read_values": [50] }} }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.verifier.timeout_cycles, 250);
    assert_eq!(config.verifier.accepted_read_values, vec![0x32]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn serialized_config_loads_back() {
    let mut config = Config::default();
    config.spi.mode = SpiMode::Mode3;
    config.slave.kind = SlaveKind::Bmm150;
    let json = config.to_json().unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
