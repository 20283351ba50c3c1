//! SPI-master register interface simulator library.
//!
//! This crate models the BMM150 SPI-master peripheral at cycle level and verifies
//! its register-transaction contract:
//! 1. **DUT:** An explicit `IDLE -> BUSY -> DONE` state machine behind a capability trait.
//! 2. **Slave:** A BMM150 register-file model on the physical SPI lines.
//! 3. **Verifier:** Reset, enable, write, and read sequencing with bounded polling.
//! 4. **Simulation:** An injected clock, stock scenarios, configuration, and statistics.

/// Common types and constants (register addresses, signals, errors).
pub mod common;
/// Run configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Device under test (capability trait, SPI-master model).
pub mod dut;
/// Clock, verifier, and scenarios.
pub mod sim;
/// SPI slave models.
pub mod slave;
/// Verification statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// SPI-master model; construct with `SpiMaster::new` or `dut::build`.
pub use crate::dut::SpiMaster;
/// Transaction verifier; construct with `TransactionVerifier::new` or `from_config`.
pub use crate::sim::TransactionVerifier;
