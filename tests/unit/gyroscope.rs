//! Unit tests for the ITG3205 driver

use crate::common::{assert_float_eq, MockBus, MockError};
use gy85::registers::itg3205 as reg;
use gy85::sensors::gyroscope::DIGITS_PER_DPS;
use gy85::{Error, GyroDlpf, GyroFullScale, Itg3205, ITG3205_ADDRESS};

fn init_gyro() -> (Itg3205, MockBus) {
    let mut bus = MockBus::new();
    let mut gyro = Itg3205::new(ITG3205_ADDRESS);
    gyro.init(&mut bus).unwrap();
    bus.clear_operations();
    (gyro, bus)
}

#[test]
fn test_init_writes_power_divider_and_filter() {
    let mut bus = MockBus::new();
    let mut gyro = Itg3205::new(ITG3205_ADDRESS);

    gyro.init(&mut bus).unwrap();

    assert_eq!(
        bus.writes_to(ITG3205_ADDRESS),
        vec![
            (reg::PWR_MGM, 0x00),
            (reg::SMPLRT_DIV, 0x07),
            (reg::DLPF_FS, 0x1E),
        ]
    );
}

#[test]
fn test_reset_then_reinitializes() {
    let (mut gyro, mut bus) = init_gyro();

    gyro.reset(&mut bus).unwrap();

    let writes = bus.writes_to(ITG3205_ADDRESS);
    assert_eq!(writes[0], (reg::PWR_MGM, reg::PWR_MGM_RESET));
    assert_eq!(
        &writes[1..],
        &[(reg::PWR_MGM, 0x00), (reg::SMPLRT_DIV, 0x07), (reg::DLPF_FS, 0x1E)]
    );
}

#[test]
fn test_dlpf_fs_raw_access() {
    let (mut gyro, mut bus) = init_gyro();

    assert_eq!(gyro.dlpf_fs(&mut bus).unwrap(), 0x1E);
    gyro.set_dlpf_fs(&mut bus, 0x19).unwrap();
    assert_eq!(gyro.dlpf_fs(&mut bus).unwrap(), 0x19);
}

#[test]
fn test_low_pass_filter_keeps_full_scale() {
    let (mut gyro, mut bus) = init_gyro();

    gyro.set_low_pass_filter(&mut bus, GyroDlpf::Hz42).unwrap();

    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::DLPF_FS), 0x1B);
}

#[test]
fn test_full_scale_keeps_filter() {
    let (mut gyro, mut bus) = init_gyro();
    bus.set_register(ITG3205_ADDRESS, reg::DLPF_FS, 0x02);

    gyro.set_full_scale(&mut bus, GyroFullScale::Dps2000).unwrap();

    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::DLPF_FS), 0x1A);
}

#[test]
fn test_sleep_uses_bit_six() {
    let (mut gyro, mut bus) = init_gyro();
    bus.set_register(ITG3205_ADDRESS, reg::PWR_MGM, 0x01);

    gyro.set_sleep(&mut bus, true).unwrap();
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::PWR_MGM), 0x41);

    gyro.set_sleep(&mut bus, false).unwrap();
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::PWR_MGM), 0x01);
}

#[test]
fn test_interrupt_always_clears_on_any_read() {
    let (mut gyro, mut bus) = init_gyro();

    gyro.set_interrupt(&mut bus, true).unwrap();
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::INT_CFG), 0x11);

    gyro.set_interrupt(&mut bus, false).unwrap();
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::INT_CFG), 0x10);
}

#[test]
fn test_sample_rate_divider() {
    let (mut gyro, mut bus) = init_gyro();

    gyro.set_sample_rate_divider(&mut bus, 0).unwrap();

    assert_eq!(bus.writes_to(ITG3205_ADDRESS), vec![(reg::SMPLRT_DIV, 0)]);
}

#[test]
fn test_read_decodes_big_endian() {
    let (gyro, mut bus) = init_gyro();
    bus.set_gyro_data(0x0102, -1438, 0);

    assert_eq!(gyro.read_counts(&mut bus).unwrap(), [0x0102, -1438, 0]);
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::GYRO_XOUT_H), 0x01);

    let data = gyro.read(&mut bus).unwrap();
    assert_float_eq(data.x, f64::from(0x0102) / DIGITS_PER_DPS, 1e-9);
    assert_float_eq(data.y, -1438.0 / DIGITS_PER_DPS, 1e-9);
    assert_float_eq(data.z, 0.0, 1e-12);
}

#[test]
fn test_reset_write_failure_skips_reinitialization() {
    let (mut gyro, mut bus) = init_gyro();
    bus.fail_next_write();

    assert_eq!(gyro.reset(&mut bus), Err(Error::Bus(MockError::Communication)));

    assert!(bus.writes_to(ITG3205_ADDRESS).is_empty());
    assert_eq!(bus.get_register(ITG3205_ADDRESS, reg::SMPLRT_DIV), 0x07);
}

#[test]
fn test_reset_reinitialization_failure_is_reported() {
    let (mut gyro, mut bus) = init_gyro();
    bus.fail_write_after(1);

    assert_eq!(gyro.reset(&mut bus), Err(Error::Bus(MockError::Communication)));

    // Reset byte went out, the rest of the configuration did not
    assert_eq!(bus.writes_to(ITG3205_ADDRESS), vec![(reg::PWR_MGM, reg::PWR_MGM_RESET)]);
}
