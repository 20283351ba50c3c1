//! Stock verification scenarios.
//!
//! Each scenario is a sequence of verifier operations ending in a pass or the
//! first failed check:
//! 1. **Basic:** initialize, reset, enable, power-control write, data read.
//! 2. **Repeat:** the same write twice; both handshakes must match.
//! 3. **Chip ID:** exact read of the BMM150 chip ID (needs the slave model).

use tracing::info;

use crate::common::constants::{SCENARIO_READ_ADDR, SCENARIO_WRITE_ADDR, SCENARIO_WRITE_DATA};
use crate::common::{RegAddr, VerifyError};
use crate::config::{Config, SlaveKind};
use crate::dut::{RegisterController, SpiMaster};
use crate::sim::verifier::{TransactionRecord, TransactionVerifier};
use crate::slave::bmm150::{CHIP_ID, CHIP_ID_VALUE};

const CHIP_ID_ADDR: RegAddr = RegAddr::from_const(CHIP_ID);

/// Outcome of a full scenario run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioReport {
    /// The power-control write.
    pub write: TransactionRecord,
    /// `rx_data` of the data-register read.
    pub read_value: u8,
    /// The two identical writes of the repeat check.
    pub repeat: (TransactionRecord, TransactionRecord),
    /// Chip ID read back, when a slave model was attached.
    pub chip_id: Option<u8>,
}

/// Write `0x01` to `0x4B`, then read `0x42` with the `miso` stub high.
///
/// Returns the write record and the value read.
pub fn basic_write_read<D: RegisterController>(
    v: &mut TransactionVerifier<D>,
    config: &Config,
) -> Result<(TransactionRecord, u8), VerifyError> {
    v.initialize();
    v.reset(config.reset.hold_cycles);
    v.check_reset_clears_status()?;
    v.enable();

    let write = v.issue_write(SCENARIO_WRITE_ADDR, SCENARIO_WRITE_DATA)?;
    let value = v.issue_read(SCENARIO_READ_ADDR, true)?;
    Ok((write, value))
}

/// Issues the same write twice and requires identical handshakes.
pub fn repeat_write<D: RegisterController>(
    v: &mut TransactionVerifier<D>,
    addr: RegAddr,
    data: u8,
) -> Result<(TransactionRecord, TransactionRecord), VerifyError> {
    let first = v.issue_write(addr, data)?;
    let second = v.issue_write(addr, data)?;
    if first.busy_cycles != second.busy_cycles {
        return Err(v.fail(VerifyError::HandshakeDrift {
            first: first.busy_cycles,
            second: second.busy_cycles,
        }));
    }
    Ok((first, second))
}

/// Reads the chip ID register and requires the BMM150 value.
pub fn chip_id_probe<D: RegisterController>(
    v: &mut TransactionVerifier<D>,
) -> Result<u8, VerifyError> {
    v.expect_read(CHIP_ID_ADDR, CHIP_ID_VALUE)
}

/// Builds a verifier from `config` and runs every applicable scenario.
///
/// The verifier is returned alongside the outcome so its statistics can be
/// reported either way.
pub fn run(
    config: &Config,
) -> (TransactionVerifier<SpiMaster>, Result<ScenarioReport, VerifyError>) {
    let mut v = TransactionVerifier::from_config(config);
    let result = run_on(&mut v, config);
    (v, result)
}

fn run_on(
    v: &mut TransactionVerifier<SpiMaster>,
    config: &Config,
) -> Result<ScenarioReport, VerifyError> {
    let (write, read_value) = basic_write_read(v, config)?;
    info!(read_value, "basic write/read passed");

    let repeat = repeat_write(v, SCENARIO_WRITE_ADDR, SCENARIO_WRITE_DATA)?;
    info!(busy_cycles = repeat.0.busy_cycles, "repeat write passed");

    let chip_id = match config.slave.kind {
        SlaveKind::None => None,
        SlaveKind::Bmm150 => {
            let id = chip_id_probe(v)?;
            info!(chip_id = id, "chip ID probe passed");
            Some(id)
        }
    };

    Ok(ScenarioReport {
        write,
        read_value,
        repeat,
        chip_id,
    })
}
