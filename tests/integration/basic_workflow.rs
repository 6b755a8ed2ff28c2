//! Integration tests for basic workflow scenarios

use crate::common::{
    accel_lsb, assert_float_eq, create_initialized_device, create_mock_device, MockBus, MockDelay,
    Operation,
};
use gy85::registers::{adxl345, itg3205, qmc5883l};
use gy85::sensors::gyroscope::DIGITS_PER_DPS;
use gy85::sensors::magnetometer::GAUSS_TO_TESLA;
use gy85::{
    AccelDataRate, AccelRange, Addresses, FifoMode, Gy85, GyroDlpf, GyroFullScale, MagMode,
    MagOutputRate, MagOverSample, MagScale, ADXL345_ADDRESS, ITG3205_ADDRESS, QMC5883L_ADDRESS,
};

#[test]
fn test_complete_initialization_workflow() {
    let (mut device, bus, _delay) = create_mock_device();

    // Initialize the device
    device.init().unwrap();

    // Accelerometer first, then gyroscope, then magnetometer
    let chips: Vec<u8> = bus
        .operations()
        .iter()
        .map(|op| match op {
            Operation::Read { chip, .. } | Operation::Write { chip, .. } => *chip,
        })
        .collect();
    let first_gyro = chips.iter().position(|&c| c == ITG3205_ADDRESS).unwrap();
    let first_mag = chips.iter().position(|&c| c == QMC5883L_ADDRESS).unwrap();
    assert!(chips[..first_gyro].iter().all(|&c| c == ADXL345_ADDRESS));
    assert!(chips[first_gyro..first_mag].iter().all(|&c| c == ITG3205_ADDRESS));
    assert!(chips[first_mag..].iter().all(|&c| c == QMC5883L_ADDRESS));

    assert_eq!(bus.get_register(ADXL345_ADDRESS, adxl345::POWER_CTL), 0x08);
    assert_eq!(bus.get_register(ITG3205_ADDRESS, itg3205::DLPF_FS), 0x1E);
    assert_eq!(bus.get_register(QMC5883L_ADDRESS, qmc5883l::CONFIG_A), 0x49);
}

#[test]
fn test_calibrate_then_read() {
    let (mut device, bus, _delay) = create_initialized_device();

    // Board at rest: small bias on every axis, gravity on accelerometer z
    bus.set_accel_data(6, -3, 256);
    bus.set_gyro_data(12, -8, 4);
    bus.set_mag_data(3000, -1500, 600);
    device.calibrate().unwrap();

    // Board moved
    bus.set_accel_data(106, -3, 256);
    bus.set_gyro_data(12 + 1438, -8, 4);
    device.read().unwrap();

    let accel = device.accel();
    assert_float_eq(accel.x, 100.0 * accel_lsb(), 1e-9);
    assert_float_eq(accel.y, 0.0, 1e-9);
    assert_float_eq(accel.z, 256.0 * accel_lsb(), 1e-9);

    let gyro = device.gyro();
    assert_float_eq(gyro.x, 1438.0 / DIGITS_PER_DPS, 1e-9);
    assert_float_eq(gyro.y, 0.0, 1e-9);
    assert_float_eq(gyro.z, 0.0, 1e-9);

    let mag = device.mag();
    assert_float_eq(mag.x, 3000.0 * GAUSS_TO_TESLA / 12_000.0, 1e-15);
    assert_float_eq(mag.y, -1500.0 * GAUSS_TO_TESLA / 12_000.0, 1e-15);
}

#[test]
fn test_configuration_pass_through() {
    let (mut device, bus, _delay) = create_initialized_device();

    device.set_accel_range(AccelRange::G16).unwrap();
    device.set_accel_data_rate(AccelDataRate::Hz400).unwrap();
    device.set_accel_fifo_mode(FifoMode::Fifo).unwrap();
    device.set_accel_interrupt(true).unwrap();
    device.set_accel_sleep(false).unwrap();
    assert_eq!(device.accelerometer().range(), AccelRange::G16);
    assert_eq!(bus.get_register(ADXL345_ADDRESS, adxl345::DATA_FORMAT), 0x03);
    assert_eq!(bus.get_register(ADXL345_ADDRESS, adxl345::BW_RATE), 0x0C);
    assert_eq!(bus.get_register(ADXL345_ADDRESS, adxl345::FIFO_CTL), 0x40);
    assert_eq!(bus.get_register(ADXL345_ADDRESS, adxl345::INT_ENABLE), 0x80);

    device.set_gyro_sample_rate_divider(0).unwrap();
    device.set_gyro_low_pass_filter(GyroDlpf::Hz256).unwrap();
    device.set_gyro_full_scale(GyroFullScale::Dps2000).unwrap();
    device.set_gyro_interrupt(true).unwrap();
    device.set_gyro_sleep(true).unwrap();
    assert_eq!(bus.get_register(ITG3205_ADDRESS, itg3205::SMPLRT_DIV), 0x00);
    assert_eq!(bus.get_register(ITG3205_ADDRESS, itg3205::DLPF_FS), 0x18);
    assert_eq!(bus.get_register(ITG3205_ADDRESS, itg3205::INT_CFG), 0x11);
    assert_eq!(bus.get_register(ITG3205_ADDRESS, itg3205::PWR_MGM), 0x40);

    device.set_mag_scale(MagScale::Gauss8).unwrap();
    device.set_mag_output_rate(MagOutputRate::Hz10).unwrap();
    device.set_mag_over_sample(MagOverSample::Os512).unwrap();
    device.set_mag_mode(MagMode::Continuous).unwrap();
    device.set_mag_interrupt(false).unwrap();
    device.set_mag_sleep(true).unwrap();
    assert_eq!(device.magnetometer().scale(), MagScale::Gauss8);
    assert_eq!(bus.get_register(QMC5883L_ADDRESS, qmc5883l::CONFIG_A), 0x10);
    assert_eq!(bus.get_register(QMC5883L_ADDRESS, qmc5883l::CONFIG_B), 0x01);
}

#[test]
fn test_reset_commands() {
    let (mut device, bus, _delay) = create_initialized_device();

    device.reset_gyro().unwrap();
    device.reset_mag().unwrap();

    assert_eq!(
        bus.writes_to(ITG3205_ADDRESS).first(),
        Some(&(itg3205::PWR_MGM, itg3205::PWR_MGM_RESET))
    );
    assert_eq!(
        bus.writes_to(QMC5883L_ADDRESS),
        vec![(qmc5883l::CONFIG_B, qmc5883l::CONFIG_B_SOFT_RESET)]
    );
}

#[test]
fn test_custom_addresses() {
    let bus = MockBus::new();
    let addresses = Addresses {
        accelerometer: 0x1D,
        gyroscope: 0x69,
        magnetometer: 0x0D,
    };
    bus.set_register(0x1D, adxl345::DEVID, 0xE5);
    let mut device = Gy85::with_addresses(bus.clone(), MockDelay::new(), addresses);

    device.init().unwrap();

    assert_eq!(device.accelerometer().address(), 0x1D);
    assert_eq!(device.gyroscope().address(), 0x69);
    assert!(bus.writes_to(ADXL345_ADDRESS).is_empty());
    assert!(bus.writes_to(ITG3205_ADDRESS).is_empty());
    assert_eq!(bus.writes_to(0x69).len(), 3);
}

#[test]
fn test_error_recovery() {
    let (mut device, bus, _delay) = create_initialized_device();
    bus.set_accel_data(0, 0, 256);

    bus.fail_next_read();
    assert!(device.read().is_err());

    device.read().unwrap();
    assert_float_eq(device.accel().magnitude(), 256.0 * accel_lsb(), 1e-9);
}

#[test]
fn test_release_returns_bus_and_delay() {
    let (mut device, bus, _delay) = create_initialized_device();
    device.calibrate_with_samples(2).unwrap();

    let (released_bus, released_delay) = device.release();

    assert_eq!(released_delay.calls(), vec![10; 4]);
    released_bus.set_register(0x10, 0x20, 0x30);
    assert_eq!(bus.get_register(0x10, 0x20), 0x30);
}
