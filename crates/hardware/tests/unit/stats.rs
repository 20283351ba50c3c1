use pretty_assertions::assert_eq;
use spimaster_core::common::{RegAddr, Rw, VerifyError};
use spimaster_core::stats::VerifierStats;

#[test]
fn starts_empty() {
    let stats = VerifierStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.transactions, 0);
    assert_eq!(stats.failures, 0);
    assert_eq!(stats.avg_busy_cycles(), 0.0);
}

#[test]
fn counts_transactions_by_direction() {
    let mut stats = VerifierStats::default();
    stats.record_transaction(Rw::Write, 128);
    stats.record_transaction(Rw::Read, 128);
    stats.record_transaction(Rw::Read, 64);

    assert_eq!(stats.transactions, 3);
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.reads, 2);
    assert_eq!(stats.busy_cycles_total, 320);
    assert_eq!(stats.busy_cycles_max, 128);
    assert!((stats.avg_busy_cycles() - 320.0 / 3.0).abs() < 1e-9);
}

#[test]
fn timeouts_are_counted_as_failures_too() {
    let addr = RegAddr::new(0x42).unwrap();
    let mut stats = VerifierStats::default();
    stats.record_failure(&VerifyError::Timeout {
        rw: Rw::Read,
        addr,
        cycles: 1000,
    });
    stats.record_failure(&VerifyError::Mismatch {
        addr,
        expected: 1,
        actual: 2,
    });

    assert_eq!(stats.failures, 2);
    assert_eq!(stats.timeouts, 1);
}

#[test]
fn print_does_not_panic() {
    let mut stats = VerifierStats::default();
    stats.record_transaction(Rw::Write, 128);
    stats.print();
}
