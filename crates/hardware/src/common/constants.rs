//! Global Constants.
//!
//! This module defines constants shared across the model and the verifier. It includes:
//! 1. **Timing Constants:** Clock period and the reset/enable sequencing lengths.
//! 2. **Framing Constants:** SPI frame geometry.
//! 3. **Scenario Constants:** Register addresses and payloads used by the stock scenarios.

use super::addr::RegAddr;

/// System clock period in nanoseconds (50 MHz).
pub const CLK_PERIOD_NS: u64 = 20;

/// Clock periods `rst_n` is held low by the stock reset sequence.
pub const RESET_HOLD_CYCLES: u64 = 10;

/// Clock periods waited after releasing `rst_n`.
pub const RESET_SETTLE_CYCLES: u64 = 2;

/// Clock periods waited after raising `enable`.
pub const ENABLE_SETTLE_CYCLES: u64 = 20;

/// Bits in one register transaction: command byte plus data byte.
pub const FRAME_BITS: u8 = 16;

/// Bits in the command phase of a frame.
pub const COMMAND_BITS: u8 = 8;

/// Default number of system cycles per SCLK half-period.
pub const SCLK_DIVIDER: u16 = 4;

/// Default cycle budget for a single transaction to drop `busy`.
pub const TIMEOUT_CYCLES: u64 = 1000;

/// Placeholder accepted set for reads without a slave model.
pub const ACCEPTED_READ_VALUES: [u8; 2] = [0x00, 0xFF];

/// Power-control register written by the basic scenario.
pub const SCENARIO_WRITE_ADDR: RegAddr = RegAddr::from_const(0x4B);

/// Payload of the basic scenario write (power on).
pub const SCENARIO_WRITE_DATA: u8 = 0x01;

/// Register read back by the basic scenario (X-axis LSB).
pub const SCENARIO_READ_ADDR: RegAddr = RegAddr::from_const(0x42);
