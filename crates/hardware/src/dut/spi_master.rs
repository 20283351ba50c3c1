//! SPI-master register interface.
//!
//! Cycle-level model of the BMM150 SPI-master peripheral. Each transaction moves
//! through `IDLE -> BUSY -> DONE -> IDLE`:
//!
//! * `IDLE`: waits for a rising `start` edge while `enable` is high.
//! * `BUSY`: clocks out one 16-bit frame (command byte, then data byte) MSB first.
//!   SCLK toggles every `sclk_divider` system cycles; both sides sample on the
//!   rising edge and shift on the falling edge.
//! * `DONE`: `busy` low, `done` high, `rx_data` latched for reads. Lasts one cycle.
//!
//! `rst_n` low forces `IDLE` with every output cleared, regardless of state.

use std::fmt;

use tracing::{debug, trace};

use crate::common::constants::{COMMAND_BITS, FRAME_BITS};
use crate::common::{ControlSignals, Rw, SpiLines, StatusSignals};
use crate::config::{Config, SpiMode};
use crate::dut::RegisterController;
use crate::slave::SpiSlave;

/// Transaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Waiting for a start edge.
    Idle,
    /// Shifting a frame.
    Busy,
    /// Completion cycle.
    Done,
}

/// SPI-master device structure.
pub struct SpiMaster {
    /// Control inputs as driven by the verifier.
    pins: ControlSignals,
    /// `start` level on the previous edge, for edge detection.
    start_prev: bool,
    /// Transaction state.
    state: State,
    /// Handshake outputs.
    status: StatusSignals,
    /// Physical SPI lines.
    lines: SpiLines,
    /// Clock polarity/phase.
    mode: SpiMode,
    /// System cycles per SCLK half-period.
    sclk_divider: u16,
    /// Cycles elapsed in the current half-period.
    div_count: u16,
    /// Frame being shifted out, command byte in the high half.
    frame: u16,
    /// Direction latched at the start edge.
    rw: Rw,
    /// Bits sampled so far in this frame.
    sampled: u8,
    /// Bits received during the data phase.
    shift_in: u8,
    /// Attached slave; `None` routes the `miso` pin straight in.
    slave: Option<Box<dyn SpiSlave>>,
    /// Transactions completed since construction.
    completed: u64,
}

impl fmt::Debug for SpiMaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpiMaster")
            .field("state", &self.state)
            .field("status", &self.status)
            .field("lines", &self.lines)
            .field("mode", &self.mode)
            .field("sclk_divider", &self.sclk_divider)
            .field("slave", &self.slave.as_ref().map(|s| s.name().to_owned()))
            .finish_non_exhaustive()
    }
}

impl SpiMaster {
    /// Creates an SPI master with no slave attached.
    ///
    /// # Arguments
    ///
    /// * `mode` - SPI clock polarity/phase.
    /// * `sclk_divider` - System cycles per SCLK half-period (0 is treated as 1).
    pub fn new(mode: SpiMode, sclk_divider: u16) -> Self {
        Self {
            pins: ControlSignals::default(),
            start_prev: false,
            state: State::Idle,
            status: StatusSignals::default(),
            lines: SpiLines {
                sclk: mode.cpol(),
                ..SpiLines::default()
            },
            mode,
            sclk_divider: sclk_divider.max(1),
            div_count: 0,
            frame: 0,
            rw: Rw::Write,
            sampled: 0,
            shift_in: 0,
            slave: None,
            completed: 0,
        }
    }

    /// Creates an SPI master from the `spi` section of a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.spi.mode, config.spi.sclk_divider)
    }

    /// Attaches a slave to the physical lines, replacing any previous one.
    pub fn with_slave(mut self, slave: Box<dyn SpiSlave>) -> Self {
        self.slave = Some(slave);
        self
    }

    /// Returns the attached slave, if any.
    pub fn slave(&self) -> Option<&dyn SpiSlave> {
        self.slave.as_deref()
    }

    /// Returns the attached slave mutably, if any.
    pub fn slave_mut(&mut self) -> Option<&mut (dyn SpiSlave + 'static)> {
        self.slave.as_deref_mut()
    }

    /// Returns the current transaction state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the number of transactions completed.
    pub const fn completed(&self) -> u64 {
        self.completed
    }

    /// Level the master sees on MISO.
    fn miso_in(&self) -> bool {
        self.slave.as_ref().map_or(self.pins.miso, |s| s.miso())
    }

    fn apply_reset(&mut self) {
        if self.state == State::Busy {
            if let Some(slave) = self.slave.as_mut() {
                slave.deselect();
            }
        }
        self.state = State::Idle;
        self.status = StatusSignals::default();
        self.lines = SpiLines {
            sclk: self.mode.cpol(),
            ..SpiLines::default()
        };
        self.div_count = 0;
        self.frame = 0;
        self.sampled = 0;
        self.shift_in = 0;
    }

    /// Latches the operands and asserts chip select.
    fn begin(&mut self) {
        let pins = self.pins;
        self.rw = pins.rw;
        let data = match pins.rw {
            Rw::Write => pins.tx_data,
            Rw::Read => 0x00,
        };
        self.frame = (u16::from(pins.reg_addr.command_byte(pins.rw)) << 8) | u16::from(data);
        self.sampled = 0;
        self.shift_in = 0;
        self.div_count = 0;
        self.status.busy = true;
        self.status.done = false;
        self.lines.cs_n = false;
        self.lines.sclk = self.mode.cpol();
        self.lines.mosi = self.frame_bit(0);
        if let Some(slave) = self.slave.as_mut() {
            slave.select();
        }
        self.state = State::Busy;
        debug!(rw = %self.rw, addr = %pins.reg_addr, data, "IDLE -> BUSY");
    }

    /// Returns bit `index` of the frame, counting from the MSB.
    const fn frame_bit(&self, index: u8) -> bool {
        (self.frame >> (FRAME_BITS - 1 - index)) & 1 != 0
    }

    /// Advances the SCLK generator by one system cycle.
    fn step_frame(&mut self) {
        self.div_count += 1;
        if self.div_count < self.sclk_divider {
            return;
        }
        self.div_count = 0;
        self.lines.sclk = !self.lines.sclk;

        if self.lines.sclk {
            let miso = self.miso_in();
            self.lines.miso = miso;
            if self.sampled >= COMMAND_BITS {
                self.shift_in = (self.shift_in << 1) | u8::from(miso);
            }
            if let Some(slave) = self.slave.as_mut() {
                slave.sclk_rising(self.lines.mosi);
            }
            self.sampled += 1;
        } else {
            if self.sampled > 0 && self.sampled < FRAME_BITS {
                self.lines.mosi = self.frame_bit(self.sampled);
            }
            if let Some(slave) = self.slave.as_mut() {
                slave.sclk_falling();
            }
        }

        if self.sampled == FRAME_BITS && self.lines.sclk == self.mode.cpol() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.lines.cs_n = true;
        self.lines.mosi = false;
        if let Some(slave) = self.slave.as_mut() {
            slave.deselect();
        }
        if self.rw == Rw::Read {
            self.status.rx_data = self.shift_in;
        }
        self.status.busy = false;
        self.status.done = true;
        self.state = State::Done;
        self.completed += 1;
        debug!(rw = %self.rw, rx_data = self.status.rx_data, "BUSY -> DONE");
    }
}

impl RegisterController for SpiMaster {
    fn name(&self) -> &str {
        "SPI_MASTER"
    }

    fn pins(&self) -> &ControlSignals {
        &self.pins
    }

    fn pins_mut(&mut self) -> &mut ControlSignals {
        &mut self.pins
    }

    /// Samples the control inputs on a rising clock edge.
    fn tick(&mut self) {
        let pins = self.pins;
        let start_edge = pins.start && !self.start_prev;
        self.start_prev = pins.start;

        if !pins.rst_n {
            self.apply_reset();
            return;
        }

        match self.state {
            State::Idle => {
                if pins.enable && start_edge {
                    self.begin();
                }
            }
            State::Busy => self.step_frame(),
            State::Done => {
                self.status.done = false;
                self.state = State::Idle;
                trace!("DONE -> IDLE");
                if pins.enable && start_edge {
                    self.begin();
                }
            }
        }
    }

    fn status(&self) -> StatusSignals {
        self.status
    }

    fn spi_lines(&self) -> SpiLines {
        self.lines
    }
}
