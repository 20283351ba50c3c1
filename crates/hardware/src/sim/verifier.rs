//! Register transaction verifier.
//!
//! Drives a [`RegisterController`] through the control interface and checks the
//! busy/done handshake of every transaction. It provides:
//! 1. **Sequencing:** Input initialization, reset, and enable, with settle periods.
//! 2. **Transactions:** Writes and reads, one in flight at a time.
//! 3. **Checks:** Handshake completion, accepted read values, exact reads,
//!    reset behaviour, and single-trigger behaviour of a held `start`.
//!
//! Every wait is bounded by `verifier.timeout_cycles`; a DUT that never drops
//! `busy` yields [`VerifyError::Timeout`] instead of blocking the run.

use tracing::{info, trace, warn};

use crate::common::{ControlSignals, RegAddr, Rw, VerifyError};
use crate::config::{Config, ResetConfig, VerifierConfig};
use crate::dut::{self, RegisterController, SpiMaster};
use crate::sim::SimClock;
use crate::stats::VerifierStats;

/// A completed transaction as observed on the status interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Direction.
    pub rw: Rw,
    /// Target register.
    pub addr: RegAddr,
    /// Write payload (as driven; ignored by the DUT on reads).
    pub tx_data: u8,
    /// Sampled `rx_data` for reads.
    pub rx_data: Option<u8>,
    /// Cycle of the `start` edge.
    pub start_cycle: u64,
    /// Cycles `busy` stayed high after the `start` edge.
    pub busy_cycles: u64,
    /// Cycle at which `done` was sampled.
    pub end_cycle: u64,
}

/// Verifier for one DUT on one simulated clock.
#[derive(Debug)]
pub struct TransactionVerifier<D: RegisterController> {
    dut: D,
    clock: SimClock,
    reset_cfg: ResetConfig,
    config: VerifierConfig,
    trace_signals: bool,
    stats: VerifierStats,
    history: Vec<TransactionRecord>,
}

impl TransactionVerifier<SpiMaster> {
    /// Builds the DUT and clock described by `config` and wraps them.
    pub fn from_config(config: &Config) -> Self {
        Self::new(dut::build(config), SimClock::from_config(config), config)
    }
}

impl<D: RegisterController> TransactionVerifier<D> {
    /// Creates a verifier around `dut`, clocked by `clock`.
    pub fn new(dut: D, clock: SimClock, config: &Config) -> Self {
        Self {
            dut,
            clock,
            reset_cfg: config.reset.clone(),
            config: config.verifier.clone(),
            trace_signals: config.general.trace_signals,
            stats: VerifierStats::default(),
            history: Vec::new(),
        }
    }

    /// Returns the DUT.
    pub const fn dut(&self) -> &D {
        &self.dut
    }

    /// Returns the DUT mutably, for driving pins outside the stock sequences.
    pub const fn dut_mut(&mut self) -> &mut D {
        &mut self.dut
    }

    /// Consumes the verifier and returns the DUT.
    pub fn into_dut(self) -> D {
        self.dut
    }

    /// Returns the simulated clock.
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Returns the statistics gathered so far.
    pub const fn stats(&self) -> &VerifierStats {
        &self.stats
    }

    /// Returns every completed transaction, oldest first.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Drives one rising clock edge into the DUT.
    pub fn cycle(&mut self) {
        self.dut.tick();
        self.clock.advance();
        self.stats.cycles += 1;
        self.stats.sim_time_ns = self.clock.now_ns();
        if self.trace_signals {
            let s = self.dut.status();
            let l = self.dut.spi_lines();
            trace!(
                cycle = self.clock.cycle(),
                busy = s.busy,
                done = s.done,
                rx_data = s.rx_data,
                sclk = l.sclk,
                mosi = l.mosi,
                miso = l.miso,
                cs_n = l.cs_n,
                "edge"
            );
        }
    }

    /// Waits for `n` clock edges.
    pub fn wait_cycles(&mut self, n: u64) {
        for _ in 0..n {
            self.cycle();
        }
    }

    /// Waits for a fixed delay, rounded up to whole clock periods.
    pub fn wait_ns(&mut self, ns: u64) {
        let n = self.clock.cycles_for_ns(ns);
        self.wait_cycles(n);
    }

    /// Drives every control input low, leaving `rst_n` as it is.
    pub fn initialize(&mut self) {
        let pins = self.dut.pins_mut();
        *pins = ControlSignals {
            rst_n: pins.rst_n,
            ..ControlSignals::default()
        };
    }

    /// Holds `rst_n` low for `duration` clock periods, then releases it and
    /// waits the configured settle period.
    pub fn reset(&mut self, duration: u64) {
        info!(duration, "asserting reset");
        self.dut.reset();
        self.wait_cycles(duration);
        self.dut.release_reset();
        self.wait_cycles(self.reset_cfg.settle_cycles);
    }

    /// Asserts reset for one edge and requires `busy` and `done` to be low.
    pub fn check_reset_clears_status(&mut self) -> Result<(), VerifyError> {
        self.dut.reset();
        self.cycle();
        let s = self.dut.status();
        self.dut.release_reset();
        self.wait_cycles(self.reset_cfg.settle_cycles);
        if s.busy || s.done {
            return Err(self.fail(VerifyError::ResetNotObserved {
                busy: s.busy,
                done: s.done,
            }));
        }
        Ok(())
    }

    /// Raises `enable` on an edge, then waits the configured settle period.
    pub fn enable(&mut self) {
        info!("enabling DUT");
        self.dut.pins_mut().enable = true;
        self.cycle();
        self.wait_cycles(self.reset_cfg.enable_settle_cycles);
    }

    /// Writes `data` to `addr` and checks the handshake.
    pub fn issue_write(
        &mut self,
        addr: RegAddr,
        data: u8,
    ) -> Result<TransactionRecord, VerifyError> {
        self.transact(addr, data, Rw::Write)
    }

    /// Reads `addr` with `miso_stub` driven on the `miso` pin and checks the
    /// result against the accepted value set.
    ///
    /// An attached slave model takes precedence over the stub.
    pub fn issue_read(&mut self, addr: RegAddr, miso_stub: bool) -> Result<u8, VerifyError> {
        self.dut.pins_mut().miso = miso_stub;
        let value = self.read_register(addr)?;
        if !self.config.accepts(value) {
            return Err(self.fail(VerifyError::UnexpectedValue {
                addr,
                value,
                accepted: self.config.accepted_read_values.clone(),
            }));
        }
        Ok(value)
    }

    /// Reads `addr`, checking only the handshake.
    pub fn read_register(&mut self, addr: RegAddr) -> Result<u8, VerifyError> {
        let record = self.transact(addr, 0, Rw::Read)?;
        Ok(record.rx_data.unwrap_or_default())
    }

    /// Reads `addr` and requires exactly `expected`.
    pub fn expect_read(&mut self, addr: RegAddr, expected: u8) -> Result<u8, VerifyError> {
        let actual = self.read_register(addr)?;
        if actual != expected {
            return Err(self.fail(VerifyError::Mismatch {
                addr,
                expected,
                actual,
            }));
        }
        Ok(actual)
    }

    /// Holds `start` high for `hold_cycles` edges and requires exactly one
    /// `done` pulse over the hold window plus the timeout budget.
    pub fn check_single_trigger(
        &mut self,
        addr: RegAddr,
        data: u8,
        hold_cycles: u64,
    ) -> Result<TransactionRecord, VerifyError> {
        let held = hold_cycles.max(1);
        if self.dut.status().busy {
            let _ = self.wait_while_busy(Rw::Write, addr)?;
        }
        self.setup_operands(addr, data, Rw::Write);
        self.dut.start_transaction(addr, data, Rw::Write);
        let start_cycle = self.clock.cycle();

        let mut dones = 0;
        let mut busy_cycles = 0;
        let mut end_cycle = start_cycle;
        let window = held + self.config.timeout_cycles;
        for n in 0..window {
            if n == held {
                self.dut.pins_mut().start = false;
            }
            self.cycle();
            let s = self.dut.status();
            if s.busy {
                busy_cycles += 1;
            }
            if s.done {
                dones += 1;
                end_cycle = self.clock.cycle();
            }
        }
        self.dut.pins_mut().start = false;

        if self.dut.status().busy {
            return Err(self.fail(VerifyError::Timeout {
                rw: Rw::Write,
                addr,
                cycles: window,
            }));
        }
        if dones != 1 {
            return Err(self.fail(VerifyError::Retrigger {
                held,
                count: dones,
            }));
        }
        let record = TransactionRecord {
            rw: Rw::Write,
            addr,
            tx_data: data,
            rx_data: None,
            start_cycle,
            busy_cycles,
            end_cycle,
        };
        self.complete(record);
        Ok(record)
    }

    /// Loads the operands with `start` low for one edge.
    ///
    /// Callers wait for `busy` to drop first.
    fn setup_operands(&mut self, addr: RegAddr, data: u8, rw: Rw) {
        let pins = self.dut.pins_mut();
        pins.start = false;
        pins.rw = rw;
        pins.reg_addr = addr;
        pins.tx_data = data;
        self.cycle();
    }

    /// Runs one transaction: setup edge, one-edge `start` pulse, bounded
    /// wait for `busy` to drop, then the `done` check.
    fn transact(
        &mut self,
        addr: RegAddr,
        data: u8,
        rw: Rw,
    ) -> Result<TransactionRecord, VerifyError> {
        if self.dut.status().busy {
            let _ = self.wait_while_busy(rw, addr)?;
        }
        self.setup_operands(addr, data, rw);

        self.dut.start_transaction(addr, data, rw);
        let start_cycle = self.clock.cycle();
        self.cycle();
        self.dut.pins_mut().start = false;

        let busy_cycles = self.wait_while_busy(rw, addr)?;
        let s = self.dut.status();
        if !s.done {
            return Err(self.fail(VerifyError::ProtocolViolation {
                rw,
                addr,
                reason: "done not asserted when busy cleared",
            }));
        }

        let record = TransactionRecord {
            rw,
            addr,
            tx_data: data,
            rx_data: (rw == Rw::Read).then(|| self.dut.read_result()),
            start_cycle,
            busy_cycles,
            end_cycle: self.clock.cycle(),
        };
        self.complete(record);
        Ok(record)
    }

    /// Polls `busy` once per edge until it drops, returning the edges waited.
    fn wait_while_busy(&mut self, rw: Rw, addr: RegAddr) -> Result<u64, VerifyError> {
        let mut waited = 0;
        loop {
            let s = self.dut.status();
            if s.busy && s.done {
                return Err(self.fail(VerifyError::ProtocolViolation {
                    rw,
                    addr,
                    reason: "busy and done asserted together",
                }));
            }
            if !s.busy {
                return Ok(waited);
            }
            if waited >= self.config.timeout_cycles {
                return Err(self.fail(VerifyError::Timeout {
                    rw,
                    addr,
                    cycles: waited,
                }));
            }
            self.cycle();
            waited += 1;
        }
    }

    fn complete(&mut self, record: TransactionRecord) {
        info!(
            rw = %record.rw,
            addr = %record.addr,
            tx_data = record.tx_data,
            rx_data = ?record.rx_data,
            busy_cycles = record.busy_cycles,
            "transaction complete"
        );
        self.stats.record_transaction(record.rw, record.busy_cycles);
        self.history.push(record);
    }

    /// Logs and counts a failed check, handing the error back.
    pub(crate) fn fail(&mut self, err: VerifyError) -> VerifyError {
        warn!(%err, cycle = self.clock.cycle(), "check failed");
        self.stats.record_failure(&err);
        err
    }
}
