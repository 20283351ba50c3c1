//! SPI Slave Models.
//!
//! This module contains the devices that can be attached to the far side of the
//! SPI-master's physical lines, and the trait they implement.

/// BMM150 magnetometer register file.
pub mod bmm150;

/// Slave trait definition.
pub mod traits;

pub use bmm150::Bmm150;
pub use traits::SpiSlave;
