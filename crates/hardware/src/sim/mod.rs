//! Simulation: clock, verifier, and scenarios.
//!
//! Provides the simulated clock the run is timed by, the transaction verifier
//! that drives the DUT, and the stock scenarios built on top of it.

/// Simulated clock.
pub mod clock;

/// Stock verification scenarios.
pub mod scenario;

/// Register transaction verifier.
pub mod verifier;

pub use clock::SimClock;
pub use scenario::ScenarioReport;
pub use verifier::{TransactionRecord, TransactionVerifier};
