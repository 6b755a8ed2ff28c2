//! ADXL345 accelerometer driver
//!
//! Provides the range/rate/FIFO enums, raw sample decoding and the
//! two-axis offset calibration for the GY-85's 3-axis accelerometer.

use embedded_hal::delay::DelayNs;

use crate::field::update_field;
use crate::interface::RegisterBus;
use crate::registers::adxl345 as reg;
use crate::{Error, Vector3, ADXL345_DEVICE_ID};

/// Resolution at ±2 g in g per LSB (datasheet: 3.9 mg/LSB)
pub const BASE_SCALE_FACTOR: f64 = 0.0039;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Pause between calibration samples in milliseconds
pub const CALIBRATION_SAMPLE_DELAY_MS: u32 = 10;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g range (most sensitive, least range)
    G2 = 0b00,
    /// ±4g range
    G4 = 0b01,
    /// ±8g range
    G8 = 0b10,
    /// ±16g range (least sensitive, most range)
    G16 = 0b11,
}

impl AccelRange {
    /// Resolution in g per LSB for this range
    ///
    /// Doubles with every range step: `BASE_SCALE_FACTOR * 2^k`.
    #[must_use]
    pub fn scale_factor(self) -> f64 {
        BASE_SCALE_FACTOR * f64::from(1u8 << (self as u8))
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}

/// Accelerometer output data rate (`BW_RATE` rate code)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelDataRate {
    /// 3200 Hz, 1600 Hz bandwidth
    Hz3200 = 0b1111,
    /// 1600 Hz, 800 Hz bandwidth
    Hz1600 = 0b1110,
    /// 800 Hz, 400 Hz bandwidth
    Hz800 = 0b1101,
    /// 400 Hz, 200 Hz bandwidth
    Hz400 = 0b1100,
    /// 200 Hz, 100 Hz bandwidth
    Hz200 = 0b1011,
    /// 100 Hz, 50 Hz bandwidth
    Hz100 = 0b1010,
    /// 50 Hz, 25 Hz bandwidth
    Hz50 = 0b1001,
    /// 25 Hz, 12.5 Hz bandwidth
    Hz25 = 0b1000,
    /// 12.5 Hz, 6.25 Hz bandwidth
    Hz12_5 = 0b0111,
    /// 6.25 Hz, 3.13 Hz bandwidth
    Hz6_25 = 0b0110,
    /// 3.13 Hz, 1.56 Hz bandwidth
    Hz3_13 = 0b0101,
    /// 1.56 Hz, 0.78 Hz bandwidth
    Hz1_56 = 0b0100,
    /// 0.78 Hz, 0.39 Hz bandwidth
    Hz0_78 = 0b0011,
    /// 0.39 Hz, 0.20 Hz bandwidth
    Hz0_39 = 0b0010,
    /// 0.20 Hz, 0.10 Hz bandwidth
    Hz0_20 = 0b0001,
    /// 0.10 Hz, 0.05 Hz bandwidth (power-on default)
    Hz0_10 = 0b0000,
}

impl AccelDataRate {
    /// Nominal output data rate in Hz
    #[must_use]
    pub const fn output_rate_hz(self) -> f32 {
        match self {
            Self::Hz3200 => 3200.0,
            Self::Hz1600 => 1600.0,
            Self::Hz800 => 800.0,
            Self::Hz400 => 400.0,
            Self::Hz200 => 200.0,
            Self::Hz100 => 100.0,
            Self::Hz50 => 50.0,
            Self::Hz25 => 25.0,
            Self::Hz12_5 => 12.5,
            Self::Hz6_25 => 6.25,
            Self::Hz3_13 => 3.13,
            Self::Hz1_56 => 1.56,
            Self::Hz0_78 => 0.78,
            Self::Hz0_39 => 0.39,
            Self::Hz0_20 => 0.20,
            Self::Hz0_10 => 0.10,
        }
    }
}

/// FIFO operating mode (`FIFO_CTL` bits 7:6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO bypassed
    Bypass = 0b00,
    /// Collect up to 32 samples, then stop
    Fifo = 0b01,
    /// Keep the newest 32 samples
    Stream = 0b10,
    /// Hold samples around a trigger event
    Trigger = 0b11,
}

/// ADXL345 driver state
///
/// Holds the chip address, the scale factor of the active range and the
/// calibration offset. The bus is passed to every call.
#[derive(Debug, Clone, Copy)]
pub struct Adxl345 {
    address: u8,
    range: AccelRange,
    scale_factor: f64,
    offset: Vector3,
}

impl Adxl345 {
    /// Create a driver for the chip at `address`
    ///
    /// The scale factor starts at the ±2 g value (the chip's power-on
    /// range) and the offset at zero.
    #[must_use]
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            range: AccelRange::G2,
            scale_factor: BASE_SCALE_FACTOR,
            offset: Vector3::ZERO,
        }
    }

    /// I2C address of the chip
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Range selected by the last successful [`set_range`](Self::set_range)
    #[must_use]
    pub const fn range(&self) -> AccelRange {
        self.range
    }

    /// Active scale factor in g per LSB
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Current calibration offset in m/s² (z is always zero)
    #[must_use]
    pub const fn offset(&self) -> Vector3 {
        self.offset
    }

    /// Read the `DEVID` register
    ///
    /// Should return 0xE5 for a genuine ADXL345.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_id<B: RegisterBus>(&self, bus: &mut B) -> Result<u8, Error<B::Error>> {
        Ok(bus.read_register(self.address, reg::DEVID)?)
    }

    /// Verify identity, power up and apply the default range and rate
    ///
    /// Steps run in order and stop at the first failure; registers written
    /// before the failure keep their new values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if `DEVID` does not read 0xE5, or a
    /// bus error from any step.
    pub fn init<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        let id = self.read_id(bus)?;
        if id != ADXL345_DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADXL345: unexpected DEVID {=u8:#x}", id);
            return Err(Error::InvalidDevice(id));
        }

        bus.write_register(self.address, reg::POWER_CTL, reg::POWER_CTL_MEASURE)?;
        self.set_range(bus, AccelRange::G2)?;
        self.set_data_rate(bus, AccelDataRate::Hz100)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345 initialized at {=u8:#x}", self.address);

        Ok(())
    }

    /// Select the measurement range and update the scale factor
    ///
    /// The scale factor only changes once the register write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_range<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        range: AccelRange,
    ) -> Result<(), Error<B::Error>> {
        update_field(bus, self.address, reg::DATA_FORMAT, reg::RANGE, range as u8)?;
        self.range = range;
        self.scale_factor = range.scale_factor();
        Ok(())
    }

    /// Select the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_rate<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        rate: AccelDataRate,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::BW_RATE, reg::RATE, rate as u8)?)
    }

    /// Select the FIFO mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_mode<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        mode: FifoMode,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::FIFO_CTL, reg::FIFO_MODE, mode as u8)?)
    }

    /// Enable or disable the data-ready interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        enable: bool,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(
            bus,
            self.address,
            reg::INT_ENABLE,
            reg::DATA_READY_INT,
            u8::from(enable),
        )?)
    }

    /// Enter or leave sleep mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep<B: RegisterBus>(
        &mut self,
        bus: &mut B,
        sleep: bool,
    ) -> Result<(), Error<B::Error>> {
        Ok(update_field(bus, self.address, reg::POWER_CTL, reg::SLEEP, u8::from(sleep))?)
    }

    /// Read raw 16-bit counts for X, Y, Z
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_counts<B: RegisterBus>(&self, bus: &mut B) -> Result<[i16; 3], Error<B::Error>> {
        let mut buffer = [0u8; 6];
        bus.read_registers(self.address, reg::DATAX0, &mut buffer)?;
        Ok(decode_counts(&buffer))
    }

    /// Read acceleration in m/s² with the calibration offset applied
    ///
    /// Only x and y are offset-corrected; z keeps gravity.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<Vector3, Error<B::Error>> {
        let counts = self.read_counts(bus)?;
        Ok(self.convert(counts))
    }

    /// Convert raw counts with the active scale factor and offset
    #[must_use]
    pub fn convert(&self, counts: [i16; 3]) -> Vector3 {
        Vector3::new(
            self.counts_to_ms2(f64::from(counts[0])) - self.offset.x,
            self.counts_to_ms2(f64::from(counts[1])) - self.offset.y,
            self.counts_to_ms2(f64::from(counts[2])),
        )
    }

    fn counts_to_ms2(&self, counts: f64) -> f64 {
        counts * self.scale_factor * STANDARD_GRAVITY
    }

    /// Average `samples` raw readings and store the x/y mean as the new offset
    ///
    /// The device should rest level with Z pointing up; z is never
    /// calibrated because it carries gravity. Samples are raw counts, so the
    /// result does not depend on any previous offset. Waits 10 ms between
    /// samples. Nothing is committed unless every sample was read.
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

        let mut sum_x: i64 = 0;
        let mut sum_y: i64 = 0;
        for _ in 0..samples {
            let [x, y, _] = self.read_counts(bus)?;
            sum_x += i64::from(x);
            sum_y += i64::from(y);
            delay.delay_ms(CALIBRATION_SAMPLE_DELAY_MS);
        }

        let [mean_x, mean_y] = mean_counts([sum_x, sum_y], samples);
        self.offset = Vector3::new(self.counts_to_ms2(mean_x), self.counts_to_ms2(mean_y), 0.0);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ADXL345 offset: x={} y={} ({} samples)",
            self.offset.x,
            self.offset.y,
            samples
        );

        Ok(self.offset)
    }
}

/// Divide per-axis count sums by the sample count
///
/// Sums of `u16::MAX` samples of `i16` stay below 2^32 in magnitude, so the
/// conversion to `f64` is exact and identical samples average to themselves.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_counts<const N: usize>(sums: [i64; N], samples: u16) -> [f64; N] {
    let count = f64::from(samples);
    sums.map(|sum| sum as f64 / count)
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
