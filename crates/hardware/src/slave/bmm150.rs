//! BMM150 geomagnetic sensor register-file model.
//!
//! Models the SPI-visible behaviour of the BMM150 so reads can be checked
//! against exact values instead of a placeholder set.
//!
//! # Registers
//!
//! * `0x40`: Chip ID (read only, `0x32`)
//! * `0x42..=0x49`: X/Y/Z/RHALL data (read only)
//! * `0x4A`: Interrupt status (read only)
//! * `0x4B`: Power control (bit 0 power, bits 7 and 1 soft reset)
//! * `0x4C`: Operation mode
//! * `0x4D..=0x52`: Interrupt, threshold, and repetition control
//!
//! # Framing
//!
//! A frame starts with a command byte (bit 7 set for reads, bits 6..0 the
//! address). Reads return data MSB first and auto-increment the address every
//! eight bits for as long as chip select stays low. On writes every data byte
//! is followed by a new command byte.

use tracing::debug;

use crate::common::constants::COMMAND_BITS;
use crate::common::{RegAddr, Rw};
use crate::slave::SpiSlave;

/// Chip ID register.
pub const CHIP_ID: u8 = 0x40;
/// X-axis data, low byte.
pub const DATA_X_LSB: u8 = 0x42;
/// X-axis data, high byte.
pub const DATA_X_MSB: u8 = 0x43;
/// Y-axis data, low byte.
pub const DATA_Y_LSB: u8 = 0x44;
/// Y-axis data, high byte.
pub const DATA_Y_MSB: u8 = 0x45;
/// Z-axis data, low byte.
pub const DATA_Z_LSB: u8 = 0x46;
/// Z-axis data, high byte.
pub const DATA_Z_MSB: u8 = 0x47;
/// Hall resistance, low byte (bit 0 is data-ready).
pub const RHALL_LSB: u8 = 0x48;
/// Hall resistance, high byte.
pub const RHALL_MSB: u8 = 0x49;
/// Interrupt status.
pub const INT_STATUS: u8 = 0x4A;
/// Power control.
pub const POWER_CTRL: u8 = 0x4B;
/// Operation mode, output data rate, and self-test.
pub const OP_MODE: u8 = 0x4C;
/// Interrupt and axis enables.
pub const INT_CTRL: u8 = 0x4D;
/// Interrupt pin configuration.
pub const INT_CONFIG: u8 = 0x4E;
/// Low-threshold interrupt level.
pub const LOW_THRESHOLD: u8 = 0x4F;
/// High-threshold interrupt level.
pub const HIGH_THRESHOLD: u8 = 0x50;
/// XY-axis repetitions.
pub const REP_XY: u8 = 0x51;
/// Z-axis repetitions.
pub const REP_Z: u8 = 0x52;

/// Value of the chip ID register once the device is out of suspend.
pub const CHIP_ID_VALUE: u8 = 0x32;

/// Power-control bit that leaves suspend mode.
const POWER_BIT: u8 = 0x01;
/// Both soft-reset bits of the power-control register.
const SOFT_RESET_BITS: u8 = 0x82;
/// Data-ready flag in `RHALL_LSB`.
const DATA_READY_BIT: u8 = 0x01;

/// Power-on values of the control registers, starting at `OP_MODE`.
const CONTROL_DEFAULTS: [(u8, u8); 7] = [
    (OP_MODE, 0x06),
    (INT_CTRL, 0x3F),
    (INT_CONFIG, 0x07),
    (LOW_THRESHOLD, 0x00),
    (HIGH_THRESHOLD, 0x00),
    (REP_XY, 0x00),
    (REP_Z, 0x00),
];

/// BMM150 slave device.
#[derive(Debug, Clone)]
pub struct Bmm150 {
    /// Register file indexed by 7-bit address.
    regs: [u8; 128],
    /// Chip select is asserted.
    selected: bool,
    /// Bits sampled since the current command byte began.
    bit_count: u8,
    /// Incoming bits, MSB first.
    shift_in: u8,
    /// Decoded command of the current frame.
    command: Option<Rw>,
    /// Register the next data byte refers to.
    cursor: RegAddr,
    /// Outgoing read data, MSB first.
    shift_out: u8,
    /// Level currently driven on MISO.
    miso: bool,
}

impl Default for Bmm150 {
    fn default() -> Self {
        Self::new()
    }
}

impl Bmm150 {
    /// Creates a BMM150 in its power-on (suspend) state.
    pub fn new() -> Self {
        let mut dev = Self {
            regs: [0; 128],
            selected: false,
            bit_count: 0,
            shift_in: 0,
            command: None,
            cursor: RegAddr::default(),
            shift_out: 0,
            miso: false,
        };
        dev.regs[CHIP_ID as usize] = CHIP_ID_VALUE;
        dev.load_control_defaults();
        dev
    }

    /// Returns `true` once the power-control bit has been set.
    pub const fn is_powered(&self) -> bool {
        self.regs[POWER_CTRL as usize] & POWER_BIT != 0
    }

    /// Returns the raw register contents, bypassing suspend-mode gating.
    pub const fn peek(&self, addr: RegAddr) -> u8 {
        self.regs[addr.val() as usize]
    }

    /// Reads a register as the SPI interface would.
    ///
    /// In suspend mode every register except power control reads `0x00`.
    pub const fn read_register(&self, addr: RegAddr) -> u8 {
        let a = addr.val();
        if a != POWER_CTRL && !self.is_powered() {
            return 0;
        }
        self.regs[a as usize]
    }

    /// Writes a register as the SPI interface would.
    ///
    /// Read-only and unmapped registers ignore writes, as does everything but
    /// power control while in suspend mode.
    pub fn write_register(&mut self, addr: RegAddr, value: u8) {
        match addr.val() {
            POWER_CTRL => self.write_power_ctrl(value),
            OP_MODE..=REP_Z if self.is_powered() => self.regs[addr.val() as usize] = value,
            _ => debug!(addr = %addr, value, "BMM150 write ignored"),
        }
    }

    /// Loads a raw measurement into the data registers and flags data-ready.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - 13-bit signed axis values.
    /// * `z` - 15-bit signed axis value.
    /// * `rhall` - 14-bit hall resistance.
    pub fn set_measurement(&mut self, x: i16, y: i16, z: i16, rhall: u16) {
        let (x_lsb, x_msb) = pack_xy(x);
        let (y_lsb, y_msb) = pack_xy(y);
        let z = z as u16;
        self.regs[DATA_X_LSB as usize] = x_lsb;
        self.regs[DATA_X_MSB as usize] = x_msb;
        self.regs[DATA_Y_LSB as usize] = y_lsb;
        self.regs[DATA_Y_MSB as usize] = y_msb;
        self.regs[DATA_Z_LSB as usize] = ((z & 0x7F) << 1) as u8;
        self.regs[DATA_Z_MSB as usize] = (z >> 7) as u8;
        self.regs[RHALL_LSB as usize] = (((rhall & 0x3F) << 2) as u8) | DATA_READY_BIT;
        self.regs[RHALL_MSB as usize] = (rhall >> 6) as u8;
    }

    fn write_power_ctrl(&mut self, value: u8) {
        let mut next = value & !SOFT_RESET_BITS;
        if value & SOFT_RESET_BITS == SOFT_RESET_BITS {
            debug!("BMM150 soft reset");
            self.load_control_defaults();
            for addr in DATA_X_LSB..=INT_STATUS {
                self.regs[addr as usize] = 0;
            }
            // Soft reset keeps the power bit.
            next |= self.regs[POWER_CTRL as usize] & POWER_BIT;
        }
        self.regs[POWER_CTRL as usize] = next;
    }

    fn load_control_defaults(&mut self) {
        for (addr, value) in CONTROL_DEFAULTS {
            self.regs[addr as usize] = value;
        }
    }

    fn clear_frame(&mut self) {
        self.bit_count = 0;
        self.shift_in = 0;
        self.command = None;
        self.shift_out = 0;
        self.miso = false;
    }

    /// Handles a completed byte on MOSI.
    fn byte_complete(&mut self) {
        let byte = self.shift_in;
        self.shift_in = 0;
        match self.command {
            None => {
                let rw = Rw::from_bit(byte & 0x80 != 0);
                self.cursor = RegAddr::from_command(byte);
                self.command = Some(rw);
                if rw == Rw::Read {
                    self.shift_out = self.read_register(self.cursor);
                }
            }
            Some(Rw::Read) => {
                self.cursor = self.cursor.next();
                self.shift_out = self.read_register(self.cursor);
            }
            Some(Rw::Write) => {
                self.write_register(self.cursor, byte);
                self.command = None;
                self.bit_count = 0;
            }
        }
    }
}

/// Packs a 13-bit X/Y value: LSB bits 7..3 hold value bits 4..0.
fn pack_xy(v: i16) -> (u8, u8) {
    let v = v as u16;
    (((v & 0x1F) << 3) as u8, (v >> 5) as u8)
}

impl SpiSlave for Bmm150 {
    fn name(&self) -> &str {
        "BMM150"
    }

    fn select(&mut self) {
        self.selected = true;
        self.clear_frame();
    }

    fn deselect(&mut self) {
        self.selected = false;
        self.clear_frame();
    }

    fn miso(&self) -> bool {
        self.selected && self.miso
    }

    fn sclk_rising(&mut self, mosi: bool) {
        if !self.selected {
            return;
        }
        self.shift_in = (self.shift_in << 1) | u8::from(mosi);
        self.bit_count = self.bit_count.wrapping_add(1);
        if self.bit_count % COMMAND_BITS == 0 {
            self.byte_complete();
        }
    }

    fn sclk_falling(&mut self) {
        if !self.selected || self.command != Some(Rw::Read) {
            return;
        }
        self.miso = self.shift_out & 0x80 != 0;
        self.shift_out <<= 1;
    }

    fn as_bmm150(&self) -> Option<&Bmm150> {
        Some(self)
    }

    fn as_bmm150_mut(&mut self) -> Option<&mut Bmm150> {
        Some(self)
    }
}
