//! Simulated clock.
//!
//! The single clock domain of a verification run. The verifier owns one and
//! advances it in lockstep with the DUT; nothing reads time from anywhere else.

use crate::config::Config;

/// Free-running clock with a fixed period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimClock {
    /// Clock period in nanoseconds.
    period_ns: u64,
    /// Rising edges since construction.
    cycle: u64,
}

impl SimClock {
    /// Creates a clock at cycle 0.
    ///
    /// # Arguments
    ///
    /// * `period_ns` - Clock period in nanoseconds (0 is treated as 1).
    pub fn new(period_ns: u64) -> Self {
        Self {
            period_ns: period_ns.max(1),
            cycle: 0,
        }
    }

    /// Creates a clock from the `clock` section of a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.clock.period_ns)
    }

    /// Returns the clock period in nanoseconds.
    #[inline]
    pub const fn period_ns(&self) -> u64 {
        self.period_ns
    }

    /// Returns the number of rising edges so far.
    #[inline]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the simulated time in nanoseconds.
    #[inline]
    pub const fn now_ns(&self) -> u64 {
        self.cycle * self.period_ns
    }

    /// Advances to the next rising edge.
    #[inline]
    pub const fn advance(&mut self) {
        self.cycle += 1;
    }

    /// Converts a delay to whole clock periods, rounding up.
    pub const fn cycles_for_ns(&self, ns: u64) -> u64 {
        ns.div_ceil(self.period_ns)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(crate::common::constants::CLK_PERIOD_NS)
    }
}
