use pretty_assertions::assert_eq;
use spimaster_core::slave::SpiSlave;
use spimaster_core::slave::bmm150::{
    Bmm150, CHIP_ID, CHIP_ID_VALUE, DATA_X_LSB, DATA_X_MSB, DATA_Y_LSB, DATA_Y_MSB, DATA_Z_LSB,
    DATA_Z_MSB, INT_CONFIG, INT_CTRL, OP_MODE, POWER_CTRL, REP_XY, REP_Z, RHALL_LSB, RHALL_MSB,
};

use crate::common::harness::addr;

/// Clocks `bytes` through the device in mode 0 and returns what came back on MISO.
fn transfer(dev: &mut Bmm150, bytes: &[u8]) -> Vec<u8> {
    dev.select();
    let mut out = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        let mut received = 0u8;
        for bit in (0..8).rev() {
            received = (received << 1) | u8::from(dev.miso());
            dev.sclk_rising((byte >> bit) & 1 != 0);
            dev.sclk_falling();
        }
        out.push(received);
    }
    dev.deselect();
    out
}

fn powered() -> Bmm150 {
    let mut dev = Bmm150::new();
    dev.write_register(addr(POWER_CTRL), 0x01);
    dev
}

#[test]
fn power_on_state_is_suspend() {
    let dev = Bmm150::new();
    assert!(!dev.is_powered());
    assert_eq!(dev.read_register(addr(CHIP_ID)), 0x00);
    assert_eq!(dev.peek(addr(CHIP_ID)), CHIP_ID_VALUE);
    assert_eq!(dev.peek(addr(OP_MODE)), 0x06);
    assert_eq!(dev.peek(addr(INT_CTRL)), 0x3F);
    assert_eq!(dev.peek(addr(INT_CONFIG)), 0x07);
    assert_eq!(dev.name(), "BMM150");
}

#[test]
fn suspend_ignores_writes_other_than_power_control() {
    let mut dev = Bmm150::new();
    dev.write_register(addr(REP_XY), 0x04);
    assert_eq!(dev.peek(addr(REP_XY)), 0x00);

    dev.write_register(addr(POWER_CTRL), 0x01);
    assert!(dev.is_powered());
    assert_eq!(dev.read_register(addr(POWER_CTRL)), 0x01);
    assert_eq!(dev.read_register(addr(CHIP_ID)), CHIP_ID_VALUE);
}

#[test]
fn read_only_registers_ignore_writes() {
    let mut dev = powered();
    dev.write_register(addr(CHIP_ID), 0xAA);
    dev.write_register(addr(DATA_X_LSB), 0xAA);
    dev.write_register(addr(0x10), 0xAA);
    assert_eq!(dev.read_register(addr(CHIP_ID)), CHIP_ID_VALUE);
    assert_eq!(dev.read_register(addr(DATA_X_LSB)), 0x00);
    assert_eq!(dev.read_register(addr(0x10)), 0x00);
}

#[test]
fn control_registers_are_writable_when_powered() {
    let mut dev = powered();
    dev.write_register(addr(OP_MODE), 0x02);
    dev.write_register(addr(REP_Z), 0x0E);
    assert_eq!(dev.read_register(addr(OP_MODE)), 0x02);
    assert_eq!(dev.read_register(addr(REP_Z)), 0x0E);
}

#[test]
fn soft_reset_restores_defaults_and_keeps_power() {
    let mut dev = powered();
    dev.write_register(addr(OP_MODE), 0x02);
    dev.write_register(addr(REP_XY), 0x04);
    dev.set_measurement(100, 100, 100, 100);

    dev.write_register(addr(POWER_CTRL), 0x83);
    assert!(dev.is_powered());
    assert_eq!(dev.read_register(addr(POWER_CTRL)), 0x01);
    assert_eq!(dev.read_register(addr(OP_MODE)), 0x06);
    assert_eq!(dev.read_register(addr(REP_XY)), 0x00);
    assert_eq!(dev.read_register(addr(RHALL_LSB)), 0x00);
}

#[test]
fn bare_soft_reset_pattern_keeps_power() {
    let mut dev = powered();
    dev.write_register(addr(OP_MODE), 0x02);

    dev.write_register(addr(POWER_CTRL), 0x82);
    assert!(dev.is_powered());
    assert_eq!(dev.read_register(addr(POWER_CTRL)), 0x01);
    assert_eq!(dev.read_register(addr(OP_MODE)), 0x06);
    assert_eq!(dev.read_register(addr(CHIP_ID)), CHIP_ID_VALUE);
}

#[test]
fn soft_reset_in_suspend_stays_suspended() {
    let mut dev = Bmm150::new();
    dev.write_register(addr(POWER_CTRL), 0x82);
    assert!(!dev.is_powered());
    assert_eq!(dev.read_register(addr(POWER_CTRL)), 0x00);
}

#[test]
fn spi_soft_reset_keeps_power() {
    let mut dev = powered();
    let _ = transfer(&mut dev, &[POWER_CTRL, 0x82]);
    assert!(dev.is_powered());
}

#[test]
fn measurement_packing() {
    let mut dev = powered();
    dev.set_measurement(100, -4096, 1000, 300);

    assert_eq!(dev.read_register(addr(DATA_X_LSB)), 0x20);
    assert_eq!(dev.read_register(addr(DATA_X_MSB)), 0x03);
    assert_eq!(dev.read_register(addr(DATA_Y_LSB)), 0x00);
    assert_eq!(dev.read_register(addr(DATA_Y_MSB)), 0x80);
    assert_eq!(dev.read_register(addr(DATA_Z_LSB)), 0xD0);
    assert_eq!(dev.read_register(addr(DATA_Z_MSB)), 0x07);
    // Data-ready flag rides in bit 0.
    assert_eq!(dev.read_register(addr(RHALL_LSB)), 0xB1);
    assert_eq!(dev.read_register(addr(RHALL_MSB)), 0x04);
}

#[test]
fn spi_read_returns_chip_id() {
    let mut dev = powered();
    assert_eq!(transfer(&mut dev, &[0x80 | CHIP_ID, 0x00]), vec![0x00, CHIP_ID_VALUE]);
}

#[test]
fn spi_read_in_suspend_returns_zero() {
    let mut dev = Bmm150::new();
    assert_eq!(transfer(&mut dev, &[0x80 | CHIP_ID, 0x00]), vec![0x00, 0x00]);
}

#[test]
fn spi_read_burst_auto_increments() {
    let mut dev = powered();
    dev.set_measurement(100, -4096, 1000, 300);
    let out = transfer(&mut dev, &[0x80 | DATA_X_LSB, 0, 0, 0, 0]);
    assert_eq!(out, vec![0x00, 0x20, 0x03, 0x00, 0x80]);
}

#[test]
fn spi_write_powers_on() {
    let mut dev = Bmm150::new();
    let _ = transfer(&mut dev, &[POWER_CTRL, 0x01]);
    assert!(dev.is_powered());
}

#[test]
fn spi_write_burst_takes_address_per_byte() {
    let mut dev = powered();
    let _ = transfer(&mut dev, &[OP_MODE, 0x02, REP_XY, 0x05]);
    assert_eq!(dev.peek(addr(OP_MODE)), 0x02);
    assert_eq!(dev.peek(addr(REP_XY)), 0x05);
}

#[test]
fn deselect_drops_partial_frame() {
    let mut dev = powered();
    dev.select();
    for bit in (4..8).rev() {
        dev.sclk_rising((OP_MODE >> bit) & 1 != 0);
        dev.sclk_falling();
    }
    dev.deselect();
    assert!(!dev.miso());

    let _ = transfer(&mut dev, &[REP_Z, 0x09]);
    assert_eq!(dev.peek(addr(REP_Z)), 0x09);
    assert_eq!(dev.peek(addr(OP_MODE)), 0x06);
}

#[test]
fn miso_low_when_not_selected() {
    let mut dev = powered();
    let _ = transfer(&mut dev, &[0x80 | CHIP_ID, 0x00]);
    assert!(!dev.miso());
}

#[test]
fn downcast_through_trait_object() {
    let mut boxed: Box<dyn SpiSlave> = Box::new(powered());
    assert!(boxed.as_bmm150().is_some_and(Bmm150::is_powered));
    if let Some(dev) = boxed.as_bmm150_mut() {
        dev.write_register(addr(REP_XY), 0x07);
    }
    assert_eq!(boxed.as_bmm150().map(|d| d.peek(addr(REP_XY))), Some(0x07));
}
