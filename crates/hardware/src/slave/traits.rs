//! SPI slave trait.
//!
//! This module defines the `SpiSlave` trait implemented by every model that can
//! sit on the far side of the physical SPI lines. It provides:
//! 1. **Identification:** `name` for logging.
//! 2. **Chip Select:** `select` and `deselect`, driven by `cs_n` edges.
//! 3. **Bit Clocking:** Sample on rising SCLK, shift on falling SCLK.
//! 4. **Downcasting:** Optional casts to `Bmm150` for register-level inspection.
//!
//! All implementors must be `Send` so a configured DUT can move across threads.

use crate::slave::Bmm150;

/// A device on the SPI bus, clocked by the master.
///
/// The master reads [`miso`](SpiSlave::miso) immediately before each rising
/// SCLK edge and then calls [`sclk_rising`](SpiSlave::sclk_rising) with the
/// MOSI level, so a slave must present its next output bit on the preceding
/// falling edge.
pub trait SpiSlave: Send {
    /// Returns a short name for this device (e.g., `"BMM150"`).
    fn name(&self) -> &str;
    /// Chip select asserted (`cs_n` fell).
    fn select(&mut self);
    /// Chip select released (`cs_n` rose); any partial frame is discarded.
    fn deselect(&mut self);
    /// Current level driven on MISO.
    fn miso(&self) -> bool;
    /// Rising SCLK edge: sample MOSI.
    fn sclk_rising(&mut self, mosi: bool);
    /// Falling SCLK edge: present the next MISO bit.
    fn sclk_falling(&mut self);

    /// Returns a reference as `Bmm150` if this device is the BMM150 model; otherwise `None`.
    fn as_bmm150(&self) -> Option<&Bmm150> {
        None
    }
    /// Returns a mutable reference as `Bmm150` if this device is the BMM150 model.
    fn as_bmm150_mut(&mut self) -> Option<&mut Bmm150> {
        None
    }
}
