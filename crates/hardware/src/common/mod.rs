//! Common types used throughout the SPI-master model and verifier.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Address Type:** A strong type for 7-bit register addresses.
//! 2. **Signals:** Control, status, and physical SPI signal bundles.
//! 3. **Constants:** Timing, framing, and scenario constants.
//! 4. **Error Handling:** Verification, address, and configuration errors.

/// Register address type.
pub mod addr;

/// Common constants used throughout the crate.
pub mod constants;

/// Error types.
pub mod error;

/// Signal bundles.
pub mod signals;

pub use addr::RegAddr;
pub use error::{AddrError, ConfigError, VerifyError};
pub use signals::{ControlSignals, Rw, SpiLines, Status, StatusSignals};
