//! QMC5883L magnetometer driver
//!
//! Mode, output rate, scale and oversample ratio share the `CONFIG_A`
//! control byte; every setter rewrites only its own bits. The magnetometer
//! has no calibration path and readings are never offset-corrected.

use crate::field::update_field;
use crate::interface::RegisterBus;
use crate::registers::qmc5883l as reg;
use crate::{Error, Vector3};

/// Gauss to tesla
pub const GAUSS_TO_TESLA: f64 = 1e-4;

/// Scale factor for the ±2 G range (LSB per gauss)
pub const BASE_SCALE_FACTOR: f64 = 12_000.0;

/// Operating mode (`CONFIG_A` bits 1:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagMode {
    /// Standby, no measurements
    Standby = 0x00,
    /// Continuous measurement
    Continuous = 0x01,
}

/// Full-scale range (`CONFIG_A` bits 5:4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagScale {
    /// ±2 gauss
    Gauss2 = 0x00,
    /// ±8 gauss
    Gauss8 = 0x01,
}

impl MagScale {
    /// Divisor applied to raw counts for this range
    ///
    /// The ±8 G value is four times the ±2 G value.
    #[must_use]
    pub const fn scale_factor(self) -> f64 {
        match self {
            Self::Gauss2 => BASE_SCALE_FACTOR,
            Self::Gauss8 => 4.0 * BASE_SCALE_FACTOR,
        }
    }
}

/// Output data rate (`CONFIG_A` bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOutputRate {
    /// 10 Hz
    Hz10 = 0x00,
    /// 50 Hz
    Hz50 = 0x01,
    /// 100 Hz
    Hz100 = 0x02,
    /// 200 Hz
    Hz200 = 0x03,
}

impl MagOutputRate {
    /// Output rate in Hz
    #[must_use]
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz10 => 10,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
        }
    }
}

/// Oversample ratio (`CONFIG_A` bits 7:6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagOverSample {
    /// 512 samples (lowest noise, highest power)
    Os512 = 0x00,
    /// 256 samples
    Os256 = 0x01,
    /// 128 samples
    Os128 = 0x02,
    /// 64 samples
    Os64 = 0x03,
}

/// QMC5883L driver state
#[derive(Debug, Clone, Copy)]
pub struct Qmc5883l {
    address: u8,
    scale: MagScale,
    scale_factor: f64,
}

impl Qmc5883l {
    /// Create a driver for the chip at `address`
    #[must_use]
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            scale: MagScale::Gauss2,
            scale_factor: BASE_SCALE_FACTOR,
        }
    }

    /// I2C address of the chip
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Scale selected by the last successful [`set_scale`](Self::set_scale)
    #[must_use]
    pub const fn scale(&self) -> MagScale {
        self.scale
    }

    /// Active scale factor
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Read the chip ID register (documented value 0xFF)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_id<B: RegisterBus>(&self, bus: &mut B) -> Result<u8, Error<B::Error>> {
        Ok(bus.read_register(self.address, reg::CHIP_ID)?)
    }

    /// Continuous mode, ±2 G, 100 Hz, 256× oversampling, then the
    /// datasheet SET/RESET period
    ///
    /// # Errors
    ///
    /// Returns the first bus error; later steps are skipped.
    pub fn init<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        self.set_mode(bus, MagMode::Continuous)?;
        self.set_scale(bus, MagScale::Gauss2)?;
        self.set_output_rate(bus, MagOutputRate::Hz100)?;
        self.set_over_sample(bus, MagOverSample::Os256)?;
        bus.write_register(self.address, reg::PERIOD, reg::PERIOD_DEFAULT)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("QMC5883L initialized at {=u8:#x}", self.address);

        Ok(())
    }

    /// Read the `CONFIG_A` control byte
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn control<B: RegisterBus>(&self, bus: &mut B) -> Result<u8, Error<B::Error>> {
        Ok(bus.read_register(self.address, reg::CONFIG_A)?)
    }

    /// Overwrite the whole `CONFIG_A` control byte
    ///
    /// The cached scale factor is not touched; use
    /// [`set_scale`](Self::set_scale) to change the range.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_control<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        Ok(bus.write_register(self.address, reg::CONFIG_A, value)?)
    }

    /// Set the operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mode<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        mode: MagMode,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::CONFIG_A, reg::MODE, mode as u8)?)
    }

    /// Set the full-scale range and update the scale factor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_scale<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        scale: MagScale,
    ) -> Result<(), Error<B::Error>> {
        update_field(bus, self.address, reg::CONFIG_A, reg::SCALE, scale as u8)?;
        self.scale = scale;
        self.scale_factor = scale.scale_factor();
        Ok(())
    }

    /// Set the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_output_rate<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        rate: MagOutputRate,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::CONFIG_A, reg::OUTPUT_RATE, rate as u8)?)
    }

    /// Set the oversample ratio
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_over_sample<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        over_sample: MagOverSample,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(
            bus,
            self.address,
            reg::CONFIG_A,
            reg::OVER_SAMPLE,
            over_sample as u8,
        )?)
    }

    /// Enable or disable the data-ready interrupt pin
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        enable: bool,
    ) -> Result<(), Error<B::Error>> {
        let value = if enable { 0 } else { reg::CONFIG_B_INT_DISABLE };
        Ok(bus.write_register(self.address, reg::CONFIG_B, value)?)
    }

    /// Sleep by switching to standby, wake by switching back to continuous
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        sleep: bool,
    ) -> Result<(), Error<B::Error>> {
        let mode = if sleep { MagMode::Standby } else { MagMode::Continuous };
        self.set_mode(bus, mode)
    }

    /// Soft-reset the chip
    ///
    /// The configuration is not restored; call [`init`](Self::init) afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        Ok(bus.write_register(self.address, reg::CONFIG_B, reg::CONFIG_B_SOFT_RESET)?)
    }

    /// Read raw 16-bit counts for X, Y, Z
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_counts<B: RegisterBus>(&self, bus: &mut B) -> Result<[i16; 3], Error<B::Error>> {
        let mut buffer = [0u8; 6];
        bus.read_registers(self.address, reg::DATA, &mut buffer)?;
        Ok(decode_counts(&buffer))
    }

    /// Read the magnetic field in tesla
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<Vector3, Error<B::Error>> {
        let counts = self.read_counts(bus)?;
        Ok(self.convert(counts))
    }

    /// Convert raw counts: `raw * GAUSS_TO_TESLA / scale_factor`
    #[must_use]
    pub fn convert(&self, counts: [i16; 3]) -> Vector3 {
        let lsb = GAUSS_TO_TESLA / self.scale_factor;
        Vector3::new(
            f64::from(counts[0]) * lsb,
            f64::from(counts[1]) * lsb,
            f64::from(counts[2]) * lsb,
        )
    }
}

/// Decode three little-endian signed 16-bit samples (low byte first)
#[must_use]
pub const fn decode_counts(buffer: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_le_bytes([buffer[0], buffer[1]]),
        i16::from_le_bytes([buffer[2], buffer[3]]),
        i16::from_le_bytes([buffer[4], buffer[5]]),
    ]
}
