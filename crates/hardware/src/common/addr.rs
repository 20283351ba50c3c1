//! Register address type.
//!
//! This module defines a strong type for the 7-bit register address carried on
//! the `reg_addr` control bus. It provides the following:
//! 1. **Type Safety:** Out-of-range addresses are rejected once, at construction.
//! 2. **Framing:** Builds the SPI command byte (direction bit + address).
//! 3. **Bursts:** Wrapping increment used by auto-incrementing reads.

use std::fmt;

use super::error::AddrError;
use super::signals::Rw;

/// Largest address representable on the 7-bit `reg_addr` bus.
pub const REG_ADDR_MAX: u8 = 0x7F;

/// A 7-bit register address on the SPI slave.
///
/// The most significant bit of the SPI command byte is the direction flag, so
/// only seven bits remain for the register index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegAddr(u8);

impl RegAddr {
    /// Creates a register address, rejecting values above `0x7F`.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw address value.
    ///
    /// # Returns
    ///
    /// The address, or `AddrError::OutOfRange` if bit 7 is set.
    pub const fn new(addr: u8) -> Result<Self, AddrError> {
        if addr > REG_ADDR_MAX {
            Err(AddrError::OutOfRange(addr))
        } else {
            Ok(Self(addr))
        }
    }

    /// Creates a register address from a known-good constant.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is above `0x7F`. In a `const` item this is a compile
    /// error rather than a runtime panic.
    pub const fn from_const(addr: u8) -> Self {
        assert!(addr <= REG_ADDR_MAX, "register address does not fit in 7 bits");
        Self(addr)
    }

    /// Creates a register address by discarding bit 7.
    ///
    /// Used when decoding a command byte, where bit 7 is the direction flag.
    #[inline(always)]
    pub const fn from_command(byte: u8) -> Self {
        Self(byte & REG_ADDR_MAX)
    }

    /// Returns the raw 7-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u8 {
        self.0
    }

    /// Builds the SPI command byte for a transaction on this address.
    ///
    /// Bit 7 is set for reads and clear for writes.
    pub const fn command_byte(self, rw: Rw) -> u8 {
        match rw {
            Rw::Write => self.0,
            Rw::Read => 0x80 | self.0,
        }
    }

    /// Returns the next address, wrapping from `0x7F` to `0x00`.
    pub const fn next(self) -> Self {
        Self((self.0 + 1) & REG_ADDR_MAX)
    }
}

impl TryFrom<u8> for RegAddr {
    type Error = AddrError;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Self::new(addr)
    }
}

impl From<RegAddr> for u8 {
    fn from(addr: RegAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for RegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
