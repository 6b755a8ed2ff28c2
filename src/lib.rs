#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod field;
pub mod interface;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use device::{Addresses, Gy85, DEFAULT_CALIBRATION_SAMPLES};
pub use field::{update_field, BitField};
pub use interface::{I2cInterface, RegisterBus};
pub use sensors::{
    AccelDataRate, AccelRange, Adxl345, FifoMode, GyroDlpf, GyroFullScale, Itg3205, MagMode,
    MagOutputRate, MagOverSample, MagScale, Qmc5883l,
};

/// ADXL345 accelerometer I2C address (ALT ADDRESS pin low)
pub const ADXL345_ADDRESS: u8 = 0x53;

/// Expected value of the ADXL345 `DEVID` register
pub const ADXL345_DEVICE_ID: u8 = 0xE5;

/// ITG3205 gyroscope I2C address (AD0 pin low)
pub const ITG3205_ADDRESS: u8 = 0x68;

/// QMC5883L magnetometer I2C address
pub const QMC5883L_ADDRESS: u8 = 0x0D;

/// Documented value of the QMC5883L chip ID register
pub const QMC5883L_CHIP_ID: u8 = 0xFF;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error on the bus
    Bus(E),
    /// Unexpected identity register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

/// Three-axis reading in the chip's physical unit
///
/// Accelerometer vectors are in m/s², gyroscope vectors in °/s and
/// magnetometer vectors in tesla.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// Vector with all components set to zero
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its components
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
