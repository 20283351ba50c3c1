//! Configuration system for the SPI-master model and verifier.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a verification run. It provides:
//! 1. **Defaults:** Baseline timing constants (clock period, reset lengths, SCLK divider).
//! 2. **Structures:** Hierarchical config for general, clock, reset, SPI, verifier, and slave.
//! 3. **Enums:** SPI mode and slave model selection.
//!
//! Configuration is supplied as JSON (`Config::from_file`) or use `Config::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants;

/// Default configuration constants.
///
/// Used for any field a configuration file leaves out.
mod defaults {
    use crate::common::constants;

    /// System clock period in nanoseconds (50 MHz).
    pub const CLK_PERIOD_NS: u64 = constants::CLK_PERIOD_NS;

    /// Clock periods `rst_n` is held low.
    pub const RESET_HOLD_CYCLES: u64 = constants::RESET_HOLD_CYCLES;

    /// Clock periods waited after reset release.
    pub const RESET_SETTLE_CYCLES: u64 = constants::RESET_SETTLE_CYCLES;

    /// Clock periods waited after raising `enable`.
    pub const ENABLE_SETTLE_CYCLES: u64 = constants::ENABLE_SETTLE_CYCLES;

    /// System cycles per SCLK half-period (6.25 MHz SCLK at 50 MHz).
    ///
    /// The BMM150 accepts SCLK up to 10 MHz.
    pub const SCLK_DIVIDER: u16 = constants::SCLK_DIVIDER;

    /// Cycle budget for `busy` to drop after a start pulse.
    pub const TIMEOUT_CYCLES: u64 = constants::TIMEOUT_CYCLES;
}

/// SPI clock polarity/phase combinations supported by the BMM150.
///
/// Both modes sample on the rising SCLK edge and shift on the falling edge;
/// they differ in the idle level of SCLK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpiMode {
    /// CPOL = 0, CPHA = 0: SCLK idles low.
    #[default]
    #[serde(alias = "mode0", alias = "0")]
    Mode0,
    /// CPOL = 1, CPHA = 1: SCLK idles high.
    #[serde(alias = "mode3", alias = "3")]
    Mode3,
}

impl SpiMode {
    /// Returns the SCLK idle level.
    pub const fn cpol(self) -> bool {
        matches!(self, Self::Mode3)
    }
}

/// Slave model attached to the physical SPI lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SlaveKind {
    /// No slave; `miso` is whatever the verifier drives onto the pin.
    #[default]
    None,
    /// BMM150 register-file model.
    #[serde(alias = "BMM150", alias = "bmm150")]
    Bmm150,
}

/// Root configuration structure containing all run settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use spimaster_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.clock.period_ns, 20);
/// assert_eq!(config.verifier.accepted_read_values, vec![0x00, 0xFF]);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use spimaster_core::config::{Config, SlaveKind, SpiMode};
///
/// let json = r#"{
///     "spi": { "sclk_divider": 2, "mode": "Mode3" },
///     "verifier": { "timeout_cycles": 500 },
///     "slave": { "kind": "Bmm150" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.spi.sclk_divider, 2);
/// assert_eq!(config.spi.mode, SpiMode::Mode3);
/// assert_eq!(config.verifier.timeout_cycles, 500);
/// assert_eq!(config.slave.kind, SlaveKind::Bmm150);
/// assert_eq!(config.reset.hold_cycles, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Simulated clock
    #[serde(default)]
    pub clock: ClockConfig,
    /// Reset and enable sequencing
    #[serde(default)]
    pub reset: ResetConfig,
    /// SPI framing
    #[serde(default)]
    pub spi: SpiConfig,
    /// Verifier checks
    #[serde(default)]
    pub verifier: VerifierConfig,
    /// Slave model
    #[serde(default)]
    pub slave: SlaveConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Rejects values the model cannot run with.
    ///
    /// A zero clock period, SCLK divider, or timeout would either stall
    /// simulated time or make every transaction time out immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.period_ns == 0 {
            return Err(ConfigError::Invalid("clock.period_ns must be non-zero".into()));
        }
        if self.spi.sclk_divider == 0 {
            return Err(ConfigError::Invalid("spi.sclk_divider must be non-zero".into()));
        }
        if self.verifier.timeout_cycles == 0 {
            return Err(ConfigError::Invalid(
                "verifier.timeout_cycles must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// General run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log a signal snapshot on every clock edge (at `trace` level)
    #[serde(default)]
    pub trace_signals: bool,
}

/// Simulated clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Clock period in nanoseconds
    #[serde(default = "ClockConfig::default_period_ns")]
    pub period_ns: u64,
}

impl ClockConfig {
    /// Returns the default clock period in nanoseconds.
    const fn default_period_ns() -> u64 {
        defaults::CLK_PERIOD_NS
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_ns: defaults::CLK_PERIOD_NS,
        }
    }
}

/// Reset and enable sequencing lengths, in clock periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetConfig {
    /// Periods `rst_n` is held low
    #[serde(default = "ResetConfig::default_hold_cycles")]
    pub hold_cycles: u64,

    /// Periods waited after `rst_n` is released
    #[serde(default = "ResetConfig::default_settle_cycles")]
    pub settle_cycles: u64,

    /// Periods waited after `enable` is raised
    #[serde(default = "ResetConfig::default_enable_settle_cycles")]
    pub enable_settle_cycles: u64,
}

impl ResetConfig {
    /// Returns the default reset hold length.
    const fn default_hold_cycles() -> u64 {
        defaults::RESET_HOLD_CYCLES
    }

    /// Returns the default post-reset settle length.
    const fn default_settle_cycles() -> u64 {
        defaults::RESET_SETTLE_CYCLES
    }

    /// Returns the default post-enable settle length.
    const fn default_enable_settle_cycles() -> u64 {
        defaults::ENABLE_SETTLE_CYCLES
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            hold_cycles: defaults::RESET_HOLD_CYCLES,
            settle_cycles: defaults::RESET_SETTLE_CYCLES,
            enable_settle_cycles: defaults::ENABLE_SETTLE_CYCLES,
        }
    }
}

/// SPI framing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiConfig {
    /// System cycles per SCLK half-period
    #[serde(default = "SpiConfig::default_sclk_divider")]
    pub sclk_divider: u16,

    /// Clock polarity/phase
    #[serde(default)]
    pub mode: SpiMode,
}

impl SpiConfig {
    /// Returns the default SCLK divider.
    const fn default_sclk_divider() -> u16 {
        defaults::SCLK_DIVIDER
    }

    /// System cycles a full frame keeps `busy` high, excluding the start edge.
    ///
    /// Each of the 16 bits spans two SCLK half-periods.
    pub const fn frame_cycles(&self) -> u64 {
        constants::FRAME_BITS as u64 * 2 * self.sclk_divider as u64
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            sclk_divider: defaults::SCLK_DIVIDER,
            mode: SpiMode::default(),
        }
    }
}

/// Verifier check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Cycles to wait for `busy` to drop before reporting a timeout
    #[serde(default = "VerifierConfig::default_timeout_cycles")]
    pub timeout_cycles: u64,

    /// Values `issue_read` accepts; empty accepts any byte
    #[serde(default = "VerifierConfig::default_accepted_read_values")]
    pub accepted_read_values: Vec<u8>,
}

impl VerifierConfig {
    /// Returns the default timeout budget.
    const fn default_timeout_cycles() -> u64 {
        defaults::TIMEOUT_CYCLES
    }

    /// Returns the placeholder accepted set `{0x00, 0xFF}`.
    fn default_accepted_read_values() -> Vec<u8> {
        constants::ACCEPTED_READ_VALUES.to_vec()
    }

    /// Returns `true` if `value` passes the accepted-set check.
    pub fn accepts(&self, value: u8) -> bool {
        self.accepted_read_values.is_empty() || self.accepted_read_values.contains(&value)
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            timeout_cycles: defaults::TIMEOUT_CYCLES,
            accepted_read_values: Self::default_accepted_read_values(),
        }
    }
}

/// Slave model selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveConfig {
    /// Which model drives `miso`
    #[serde(default)]
    pub kind: SlaveKind,
}
