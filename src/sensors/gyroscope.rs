//! ITG3205 gyroscope driver
//!
//! Provides the full-scale and low-pass-filter enums, big-endian sample
//! decoding and the three-axis offset calibration for the GY-85's gyroscope.

use embedded_hal::delay::DelayNs;

use crate::field::update_field;
use crate::interface::RegisterBus;
use crate::registers::itg3205 as reg;
use crate::sensors::accelerometer::{mean_counts, CALIBRATION_SAMPLE_DELAY_MS};
use crate::{Error, Vector3};

/// Sensitivity in LSB per °/s at ±2000 °/s
pub const DIGITS_PER_DPS: f64 = 14.375;

/// Gyroscope full-scale range (`FS_SEL`)
///
/// The ITG3205 datasheet only specifies operation with `FS_SEL` = 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±2000°/s range
    Dps2000 = 0x03,
}

/// Gyroscope Digital Low Pass Filter (`DLPF_CFG`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroDlpf {
    /// 256 Hz bandwidth, 8 kHz internal sample rate
    Hz256 = 0x00,
    /// 188 Hz bandwidth
    Hz188 = 0x01,
    /// 98 Hz bandwidth
    Hz98 = 0x02,
    /// 42 Hz bandwidth
    Hz42 = 0x03,
    /// 20 Hz bandwidth
    Hz20 = 0x04,
    /// 10 Hz bandwidth
    Hz10 = 0x05,
    /// 5 Hz bandwidth
    Hz5 = 0x06,
}

impl GyroDlpf {
    /// Get the low-pass bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz256 => 256,
            Self::Hz188 => 188,
            Self::Hz98 => 98,
            Self::Hz42 => 42,
            Self::Hz20 => 20,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }

    /// Internal sample rate in Hz before the divider
    #[must_use]
    pub const fn internal_rate_hz(self) -> u16 {
        match self {
            Self::Hz256 => 8000,
            _ => 1000,
        }
    }

    /// Output rate in Hz for a given `SMPLRT_DIV` value
    #[must_use]
    pub fn output_rate_hz(self, divider: u8) -> f32 {
        f32::from(self.internal_rate_hz()) / (1.0 + f32::from(divider))
    }
}

/// ITG3205 driver state
///
/// Holds the chip address and the calibration offset. Conversion uses the
/// fixed ±2000 °/s sensitivity.
#[derive(Debug, Clone, Copy)]
pub struct Itg3205 {
    address: u8,
    offset: Vector3,
}

impl Itg3205 {
    /// Create a driver for the chip at `address` with a zero offset
    #[must_use]
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            offset: Vector3::ZERO,
        }
    }

    /// I2C address of the chip
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Current calibration offset in °/s
    #[must_use]
    pub const fn offset(&self) -> Vector3 {
        self.offset
    }

    /// Select the internal oscillator, 125 Hz output and the default
    /// full-scale/filter byte
    ///
    /// # Errors
    ///
    /// Returns the first bus error; later steps are skipped.
    pub fn init<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        bus.write_register(self.address, reg::PWR_MGM, reg::PWR_MGM_INTERNAL_OSC)?;
        self.set_sample_rate_divider(bus, reg::SMPLRT_DIV_DEFAULT)?;
        self.set_dlpf_fs(bus, reg::DLPF_FS_DEFAULT)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ITG3205 initialized at {=u8:#x}", self.address);

        Ok(())
    }

    /// Write the sample rate divider (output = internal rate / (div + 1))
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        divider: u8,
    ) -> Result<(), Error<B::Error>> {
        Ok(bus.write_register(self.address, reg::SMPLRT_DIV, divider)?)
    }

    /// Read the combined `DLPF_FS` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn dlpf_fs<B: RegisterBus>(&self, bus: &mut B) -> Result<u8, Error<B::Error>> {
        Ok(bus.read_register(self.address, reg::DLPF_FS)?)
    }

    /// Overwrite the whole `DLPF_FS` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_dlpf_fs<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        Ok(bus.write_register(self.address, reg::DLPF_FS, value)?)
    }

    /// Change `FS_SEL`, keeping the filter bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_full_scale<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        full_scale: GyroFullScale,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(
            bus,
            self.address,
            reg::DLPF_FS,
            reg::FULL_SCALE,
            full_scale as u8,
        )?)
    }

    /// Change `DLPF_CFG`, keeping the full-scale bits
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_pass_filter<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        dlpf: GyroDlpf,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(
            bus,
            self.address,
            reg::DLPF_FS,
            reg::LOW_PASS_FILTER,
            dlpf as u8,
        )?)
    }

    /// Enable or disable the raw-data-ready interrupt
    ///
    /// The status latch is always configured to clear on any register read.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        enable: bool,
    ) -> Result<(), Error<B::Error>> {
        let value = u8::from(enable) | reg::INT_ANYRD_2CLEAR;
        Ok(bus.write_register(self.address, reg::INT_CFG, value)?)
    }

    /// Enter or leave low-power sleep
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        sleep: bool,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::PWR_MGM, reg::SLEEP, u8::from(sleep))?)
    }

    /// Soft-reset the chip and restore the operating configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the reset write or the re-initialization fails.
    pub fn reset<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        bus.write_register(self.address, reg::PWR_MGM, reg::PWR_MGM_RESET)?;
        self.init(bus)
    }

    /// Read raw 16-bit counts for X, Y, Z
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_counts<B: RegisterBus>(&self, bus: &mut B) -> Result<[i16; 3], Error<B::Error>> {
        let mut buffer = [0u8; 6];
        bus.read_registers(self.address, reg::GYRO_XOUT_H, &mut buffer)?;
        Ok(decode_counts(&buffer))
    }

    /// Read angular rate in °/s with the calibration offset applied on all axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<Vector3, Error<B::Error>> {
        let counts = self.read_counts(bus)?;
        Ok(self.convert(counts))
    }

    /// Convert raw counts to °/s and subtract the offset
    #[must_use]
    pub fn convert(&self, counts: [i16; 3]) -> Vector3 {
        Vector3::new(
            f64::from(counts[0]) / DIGITS_PER_DPS - self.offset.x,
            f64::from(counts[1]) / DIGITS_PER_DPS - self.offset.y,
            f64::from(counts[2]) / DIGITS_PER_DPS - self.offset.z,
        )
    }

    /// Average `samples` raw readings and store the mean of every axis as the offset
    ///
    /// The device must be stationary. Samples are raw counts 10 ms apart, so
    /// the result does not depend on any previous offset. Nothing is
    /// committed unless every sample was read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for zero samples, or the first bus
    /// error encountered.
    pub fn calibrate<B, D>(
        &mut self,
        bus: &mut B,
        delay: &mut D,
        samples: u16,
    ) -> Result<Vector3, Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        if samples == 0 {
            return Err(Error::InvalidConfig);
        }

        let mut sums = [0i64; 3];
        for _ in 0..samples {
            let counts = self.read_counts(bus)?;
            for (sum, count) in sums.iter_mut().zip(counts) {
                *sum += i64::from(count);
            }
            delay.delay_ms(CALIBRATION_SAMPLE_DELAY_MS);
        }

        let [x, y, z] = mean_counts(sums, samples);
        self.offset = Vector3::new(x / DIGITS_PER_DPS, y / DIGITS_PER_DPS, z / DIGITS_PER_DPS);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ITG3205 offset: x={} y={} z={} ({} samples)",
            self.offset.x,
            self.offset.y,
            self.offset.z,
            samples
        );

        Ok(self.offset)
    }
}

/// Decode three big-endian signed 16-bit samples (high byte first)
#[must_use]
pub const fn decode_counts(buffer: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_be_bytes([buffer[0], buffer[1]]),
        i16::from_be_bytes([buffer[2], buffer[3]]),
        i16::from_be_bytes([buffer[4], buffer[5]]),
    ]
}
