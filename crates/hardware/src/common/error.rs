//! Error definitions.
//!
//! This module defines the failure taxonomy of the verifier. It provides:
//! 1. **Verification Failures:** Protocol violations, unexpected values, and hangs.
//! 2. **Address Errors:** Rejection of register addresses outside the 7-bit range.
//! 3. **Configuration Errors:** I/O, parse, and validation failures while loading a config.
//!
//! A hung DUT is reported as `Timeout`, never as a wrong value.

use thiserror::Error;

use super::addr::RegAddr;
use super::signals::Rw;

/// A register address that does not fit on the 7-bit bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddrError {
    /// Bit 7 is reserved for the direction flag.
    #[error("register address {0:#04x} does not fit in 7 bits")]
    OutOfRange(u8),
}

/// A failed check raised by the transaction verifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The busy/done handshake was not honoured.
    #[error("{rw} transaction at {addr} did not complete properly: {reason}")]
    ProtocolViolation {
        /// Direction of the offending transaction.
        rw: Rw,
        /// Register the transaction targeted.
        addr: RegAddr,
        /// What was observed.
        reason: &'static str,
    },

    /// `rx_data` fell outside the accepted value set.
    #[error("read from {addr} returned {value:#04x}, accepted values are {accepted:02x?}")]
    UnexpectedValue {
        /// Register that was read.
        addr: RegAddr,
        /// Sampled `rx_data`.
        value: u8,
        /// Accepted value set.
        accepted: Vec<u8>,
    },

    /// An exact-value read assertion failed.
    #[error("read from {addr} returned {actual:#04x}, expected {expected:#04x}")]
    Mismatch {
        /// Register that was read.
        addr: RegAddr,
        /// Value required by the check.
        expected: u8,
        /// Sampled `rx_data`.
        actual: u8,
    },

    /// `busy` never deasserted within the cycle budget.
    #[error("{rw} transaction at {addr} still busy after {cycles} cycles")]
    Timeout {
        /// Direction of the hung transaction.
        rw: Rw,
        /// Register the transaction targeted.
        addr: RegAddr,
        /// Cycles waited before giving up.
        cycles: u64,
    },

    /// Reset did not force the status outputs low.
    #[error("reset did not clear status outputs (busy={busy}, done={done})")]
    ResetNotObserved {
        /// Sampled `busy` while in reset.
        busy: bool,
        /// Sampled `done` while in reset.
        done: bool,
    },

    /// A held `start` produced other than exactly one transaction.
    #[error("start held for {held} cycles triggered {count} transactions")]
    Retrigger {
        /// Cycles `start` was held high.
        held: u64,
        /// `done` pulses observed.
        count: u64,
    },

    /// Two identical transactions produced different handshakes.
    #[error("identical transactions took {first} and {second} busy cycles")]
    HandshakeDrift {
        /// Busy cycles of the first transaction.
        first: u64,
        /// Busy cycles of the repeat.
        second: u64,
    },
}

impl VerifyError {
    /// Returns `true` if the failure is a hang rather than a wrong result.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Failure while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the model cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}
