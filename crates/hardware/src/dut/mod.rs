//! Device Under Test.
//!
//! This module contains the capability trait the verifier drives and the
//! SPI-master register-interface model that implements it.

/// SPI-master state machine.
pub mod spi_master;

/// Capability trait definitions.
pub mod traits;

pub use spi_master::{SpiMaster, State};
pub use traits::RegisterController;

use crate::config::{Config, SlaveKind};
use crate::slave::Bmm150;

/// Builds the SPI master described by `config`, with its slave attached.
pub fn build(config: &Config) -> SpiMaster {
    let master = SpiMaster::from_config(config);
    match config.slave.kind {
        SlaveKind::None => master,
        SlaveKind::Bmm150 => master.with_slave(Box::new(Bmm150::new())),
    }
}
