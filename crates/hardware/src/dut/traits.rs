//! Register-controller capability trait.
//!
//! This module defines the `RegisterController` trait: the only way the verifier
//! reaches a DUT. It provides:
//! 1. **Pins:** Raw access to the control inputs and the status/SPI outputs.
//! 2. **Clocking:** `tick` advances the DUT by one rising clock edge.
//! 3. **Capabilities:** `reset`, `start_transaction`, `poll`, and `read_result`,
//!    expressed in terms of the pins so every implementor behaves alike.

use crate::common::{ControlSignals, RegAddr, Rw, SpiLines, Status, StatusSignals};

/// A register-transaction peripheral driven through named signals.
///
/// Inputs written through [`pins_mut`](RegisterController::pins_mut) take effect
/// on the next [`tick`](RegisterController::tick); outputs reflect the state
/// after the most recent tick.
pub trait RegisterController: Send {
    /// Returns a short name for this DUT (e.g., `"SPI_MASTER"`).
    fn name(&self) -> &str;
    /// Returns the control inputs as currently driven.
    fn pins(&self) -> &ControlSignals;
    /// Returns the control inputs for driving.
    fn pins_mut(&mut self) -> &mut ControlSignals;
    /// Advances the DUT by one rising clock edge.
    fn tick(&mut self);
    /// Returns the handshake outputs.
    fn status(&self) -> StatusSignals;
    /// Returns the physical SPI lines.
    fn spi_lines(&self) -> SpiLines;

    /// Drives `rst_n` low; the DUT resets on the next edge.
    fn reset(&mut self) {
        self.pins_mut().rst_n = false;
    }

    /// Drives `rst_n` high.
    fn release_reset(&mut self) {
        self.pins_mut().rst_n = true;
    }

    /// Loads the operands and raises `start`.
    ///
    /// The caller is responsible for lowering `start` after the edge.
    fn start_transaction(&mut self, addr: RegAddr, data: u8, rw: Rw) {
        let pins = self.pins_mut();
        pins.rw = rw;
        pins.reg_addr = addr;
        pins.tx_data = data;
        pins.start = true;
    }

    /// Returns the decoded transaction lifecycle state.
    fn poll(&self) -> Status {
        Status::from(self.status())
    }

    /// Returns `rx_data`; meaningful only after a completed read.
    fn read_result(&self) -> u8 {
        self.status().rx_data
    }
}
