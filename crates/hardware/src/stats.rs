//! Verification statistics collection and reporting.
//!
//! This module tracks what a verification run exercised. It provides:
//! 1. **Time:** Clock cycles and simulated nanoseconds.
//! 2. **Transactions:** Completed writes and reads.
//! 3. **Handshake:** Total, average, and worst-case busy cycles.
//! 4. **Failures:** Failed checks, with timeouts counted separately.

use std::time::Instant;

use crate::common::{Rw, VerifyError};

/// Verification statistics structure.
#[derive(Clone, Debug)]
pub struct VerifierStats {
    start_time: Instant,
    /// Clock edges driven.
    pub cycles: u64,
    /// Simulated time in nanoseconds.
    pub sim_time_ns: u64,
    /// Completed transactions.
    pub transactions: u64,
    /// Completed write transactions.
    pub writes: u64,
    /// Completed read transactions.
    pub reads: u64,
    /// Sum of busy cycles over completed transactions.
    pub busy_cycles_total: u64,
    /// Longest busy period seen.
    pub busy_cycles_max: u64,
    /// Failed checks of any kind.
    pub failures: u64,
    /// Failed checks that were timeouts.
    pub timeouts: u64,
}

impl Default for VerifierStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            sim_time_ns: 0,
            transactions: 0,
            writes: 0,
            reads: 0,
            busy_cycles_total: 0,
            busy_cycles_max: 0,
            failures: 0,
            timeouts: 0,
        }
    }
}

impl VerifierStats {
    /// Records a completed transaction.
    pub fn record_transaction(&mut self, rw: Rw, busy_cycles: u64) {
        self.transactions += 1;
        match rw {
            Rw::Write => self.writes += 1,
            Rw::Read => self.reads += 1,
        }
        self.busy_cycles_total += busy_cycles;
        self.busy_cycles_max = self.busy_cycles_max.max(busy_cycles);
    }

    /// Records a failed check.
    pub fn record_failure(&mut self, err: &VerifyError) {
        self.failures += 1;
        if err.is_timeout() {
            self.timeouts += 1;
        }
    }

    /// Average busy cycles per completed transaction (0 when none completed).
    pub fn avg_busy_cycles(&self) -> f64 {
        if self.transactions == 0 {
            0.0
        } else {
            self.busy_cycles_total as f64 / self.transactions as f64
        }
    }

    /// Prints the statistics summary to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        println!("\n==========================================================");
        println!("SPI MASTER VERIFICATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_time                 {} ns", self.sim_time_ns);
        println!("----------------------------------------------------------");
        println!("TRANSACTIONS");
        println!("  txn.total              {}", self.transactions);
        println!("  txn.write              {}", self.writes);
        println!("  txn.read               {}", self.reads);
        println!("  busy.avg               {:.2} cycles", self.avg_busy_cycles());
        println!("  busy.max               {} cycles", self.busy_cycles_max);
        println!("----------------------------------------------------------");
        println!("CHECKS");
        println!("  check.failures         {}", self.failures);
        println!("  check.timeouts         {}", self.timeouts);
        println!("==========================================================");
    }
}
