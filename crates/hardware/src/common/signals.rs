//! Signal bundles exchanged with the SPI-master DUT.
//!
//! The DUT is only reachable through named signals. This module groups them the
//! way they are wired:
//! 1. **Control:** Inputs driven by the verifier (`rst_n`, `enable`, `start`, `rw`, ...).
//! 2. **Status:** Handshake outputs (`busy`, `done`, `rx_data`).
//! 3. **Physical:** The serialized SPI lines (`sclk`, `mosi`, `miso`, `cs_n`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::addr::RegAddr;

/// Transaction direction carried on the `rw` control line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rw {
    /// `rw = 0`: `tx_data` is written to the addressed register.
    #[default]
    Write,
    /// `rw = 1`: the addressed register is returned on `rx_data`.
    Read,
}

impl Rw {
    /// Decodes the `rw` line level.
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::Read } else { Self::Write }
    }

    /// Returns the `rw` line level.
    #[inline]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl fmt::Display for Rw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => write!(f, "write"),
            Self::Read => write!(f, "read"),
        }
    }
}

/// Inputs driven into the DUT.
///
/// The DUT samples these on every rising clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlSignals {
    /// Active-low reset.
    pub rst_n: bool,
    /// Module enable; gates the start of new transactions.
    pub enable: bool,
    /// Transaction-start trigger. Only the rising edge matters.
    pub start: bool,
    /// Transaction direction.
    pub rw: Rw,
    /// Target register.
    pub reg_addr: RegAddr,
    /// Write payload.
    pub tx_data: u8,
    /// Serial input pin, used when no slave model is attached.
    pub miso: bool,
}

impl Default for ControlSignals {
    /// All inputs low except `rst_n`, which is released.
    fn default() -> Self {
        Self {
            rst_n: true,
            enable: false,
            start: false,
            rw: Rw::Write,
            reg_addr: RegAddr::default(),
            tx_data: 0,
            miso: false,
        }
    }
}

/// Handshake outputs of the DUT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusSignals {
    /// High while a transaction is in flight.
    pub busy: bool,
    /// High for exactly one cycle when a transaction completes.
    pub done: bool,
    /// Read payload; meaningful only after a completed read.
    pub rx_data: u8,
}

/// Physical SPI lines as seen on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiLines {
    /// Serial clock.
    pub sclk: bool,
    /// Master-out, slave-in.
    pub mosi: bool,
    /// Master-in, slave-out, as sampled by the master.
    pub miso: bool,
    /// Active-low chip select.
    pub cs_n: bool,
}

impl Default for SpiLines {
    /// Bus idle: slave deselected, clock and data low.
    fn default() -> Self {
        Self {
            sclk: false,
            mosi: false,
            miso: false,
            cs_n: true,
        }
    }
}

/// Decoded transaction lifecycle, as seen from the status interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Neither `busy` nor `done`.
    Idle,
    /// `busy` is high.
    Busy,
    /// `done` is high and `busy` has dropped.
    Done,
}

impl From<StatusSignals> for Status {
    fn from(s: StatusSignals) -> Self {
        if s.busy {
            Self::Busy
        } else if s.done {
            Self::Done
        } else {
            Self::Idle
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Busy => write!(f, "BUSY"),
            Self::Done => write!(f, "DONE"),
        }
    }
}
