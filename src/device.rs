//! High-level driver API for the GY-85
//!
//! [`Gy85`] owns the bus and the delay, sequences the three chip drivers and
//! keeps the vectors of the last successful read.

use embedded_hal::delay::DelayNs;

use crate::interface::RegisterBus;
use crate::sensors::{
    AccelDataRate, AccelRange, Adxl345, FifoMode, GyroDlpf, GyroFullScale, Itg3205, MagMode,
    MagOutputRate, MagOverSample, MagScale, Qmc5883l,
};
use crate::{Error, Vector3, ADXL345_ADDRESS, ITG3205_ADDRESS, QMC5883L_ADDRESS};

/// Number of samples [`Gy85::calibrate`] averages
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 20;

/// I2C addresses of the three chips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Addresses {
    /// ADXL345 address
    pub accelerometer: u8,
    /// ITG3205 address
    pub gyroscope: u8,
    /// QMC5883L address
    pub magnetometer: u8,
}

impl Default for Addresses {
    fn default() -> Self {
        Self {
            accelerometer: ADXL345_ADDRESS,
            gyroscope: ITG3205_ADDRESS,
            magnetometer: QMC5883L_ADDRESS,
        }
    }
}

/// Main driver for the GY-85 board
pub struct Gy85<B, D> {
    bus: B,
    delay: D,
    accel: Adxl345,
    gyro: Itg3205,
    mag: Qmc5883l,
    accel_data: Vector3,
    gyro_data: Vector3,
    mag_data: Vector3,
}

impl<B, D> Gy85<B, D>
where
    B: RegisterBus,
    D: DelayNs,
{
    /// Create a driver using the default chip addresses
    ///
    /// Nothing is sent on the bus; call [`init`](Self::init) before reading.
    #[must_use]
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_addresses(bus, delay, Addresses::default())
    }

    /// Create a driver for a board with non-default chip addresses
    #[must_use]
    pub fn with_addresses(bus: B, delay: D, addresses: Addresses) -> Self {
        Self {
            bus,
            delay,
            accel: Adxl345::new(addresses.accelerometer),
            gyro: Itg3205::new(addresses.gyroscope),
            mag: Qmc5883l::new(addresses.magnetometer),
            accel_data: Vector3::ZERO,
            gyro_data: Vector3::ZERO,
            mag_data: Vector3::ZERO,
        }
    }

    /// Initialize the accelerometer, gyroscope and magnetometer in that order
    ///
    /// # Errors
    ///
    /// Returns the first failure. Chips initialized before it keep their
    /// new configuration.
    pub fn init(&mut self) -> Result<(), Error<B::Error>> {
        self.accel.init(&mut self.bus)?;
        self.gyro.init(&mut self.bus)?;
        self.mag.init(&mut self.bus)?;

        #[cfg(feature = "defmt")]
        defmt::info!("GY-85 initialized");

        Ok(())
    }

    /// Calibrate with [`DEFAULT_CALIBRATION_SAMPLES`] samples per chip
    ///
    /// # Errors
    ///
    /// See [`calibrate_with_samples`](Self::calibrate_with_samples).
    pub fn calibrate(&mut self) -> Result<(), Error<B::Error>> {
        self.calibrate_with_samples(DEFAULT_CALIBRATION_SAMPLES)
    }

    /// Calibrate the accelerometer, then the gyroscope
    ///
    /// The board must lie still and level. The magnetometer is not calibrated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for zero samples, otherwise the first
    /// bus error. A gyroscope failure leaves the new accelerometer offset in
    /// place.
    pub fn calibrate_with_samples(&mut self, samples: u16) -> Result<(), Error<B::Error>> {
        self.accel.calibrate(&mut self.bus, &mut self.delay, samples)?;
        self.gyro.calibrate(&mut self.bus, &mut self.delay, samples)?;
        Ok(())
    }

    /// Read all three chips and store the results
    ///
    /// The stored vectors only change when all three reads succeed.
    ///
    /// # Errors
    ///
    /// Returns the first bus error; the previous vectors are kept.
    pub fn read(&mut self) -> Result<(), Error<B::Error>> {
        match self.read_all() {
            Ok((accel, gyro, mag)) => {
                self.accel_data = accel;
                self.gyro_data = gyro;
                self.mag_data = mag;
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("GY-85 read failed, keeping previous sample");
                Err(e)
            }
        }
    }

    fn read_all(&mut self) -> Result<(Vector3, Vector3, Vector3), Error<B::Error>> {
        let accel = self.accel.read(&mut self.bus)?;
        let gyro = self.gyro.read(&mut self.bus)?;
        let mag = self.mag.read(&mut self.bus)?;
        Ok((accel, gyro, mag))
    }

    /// Acceleration in m/s² from the last successful [`read`](Self::read)
    #[must_use]
    pub const fn accel(&self) -> Vector3 {
        self.accel_data
    }

    /// Angular rate in °/s from the last successful [`read`](Self::read)
    #[must_use]
    pub const fn gyro(&self) -> Vector3 {
        self.gyro_data
    }

    /// Magnetic field in tesla from the last successful [`read`](Self::read)
    #[must_use]
    pub const fn mag(&self) -> Vector3 {
        self.mag_data
    }

    /// Accelerometer driver state
    #[must_use]
    pub const fn accelerometer(&self) -> &Adxl345 {
        &self.accel
    }

    /// Gyroscope driver state
    #[must_use]
    pub const fn gyroscope(&self) -> &Itg3205 {
        &self.gyro
    }

    /// Magnetometer driver state
    #[must_use]
    pub const fn magnetometer(&self) -> &Qmc5883l {
        &self.mag
    }

    // Accelerometer settings

    /// Set the accelerometer range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), Error<B::Error>> {
        self.accel.set_range(&mut self.bus, range)
    }

    /// Set the accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_data_rate(&mut self, rate: AccelDataRate) -> Result<(), Error<B::Error>> {
        self.accel.set_data_rate(&mut self.bus, rate)
    }

    /// Set the accelerometer FIFO mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error<B::Error>> {
        self.accel.set_fifo_mode(&mut self.bus, mode)
    }

    /// Enable or disable the accelerometer data-ready interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_interrupt(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.accel.set_interrupt(&mut self.bus, enable)
    }

    /// Put the accelerometer to sleep or wake it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_sleep(&mut self, sleep: bool) -> Result<(), Error<B::Error>> {
        self.accel.set_sleep(&mut self.bus, sleep)
    }

    // Gyroscope settings

    /// Set the gyroscope sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<B::Error>> {
        self.gyro.set_sample_rate_divider(&mut self.bus, divider)
    }

    /// Set the gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_full_scale(
        &mut self,
        full_scale: GyroFullScale,
    ) -> Result<(), Error<B::Error>> {
        self.gyro.set_full_scale(&mut self.bus, full_scale)
    }

    /// Set the gyroscope low-pass filter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_low_pass_filter(&mut self, dlpf: GyroDlpf) -> Result<(), Error<B::Error>> {
        self.gyro.set_low_pass_filter(&mut self.bus, dlpf)
    }

    /// Enable or disable the gyroscope data-ready interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_interrupt(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.gyro.set_interrupt(&mut self.bus, enable)
    }

    /// Put the gyroscope to sleep or wake it
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_sleep(&mut self, sleep: bool) -> Result<(), Error<B::Error>> {
        self.gyro.set_sleep(&mut self.bus, sleep)
    }

    /// Soft-reset the gyroscope and restore its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_gyro(&mut self) -> Result<(), Error<B::Error>> {
        self.gyro.reset(&mut self.bus)
    }

    // Magnetometer settings

    /// Set the magnetometer operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_mode(&mut self, mode: MagMode) -> Result<(), Error<B::Error>> {
        self.mag.set_mode(&mut self.bus, mode)
    }

    /// Set the magnetometer range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_scale(&mut self, scale: MagScale) -> Result<(), Error<B::Error>> {
        self.mag.set_scale(&mut self.bus, scale)
    }

    /// Set the magnetometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_output_rate(&mut self, rate: MagOutputRate) -> Result<(), Error<B::Error>> {
        self.mag.set_output_rate(&mut self.bus, rate)
    }

    /// Set the magnetometer oversample ratio
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_over_sample(
        &mut self,
        over_sample: MagOverSample,
    ) -> Result<(), Error<B::Error>> {
        self.mag.set_over_sample(&mut self.bus, over_sample)
    }

    /// Enable or disable the magnetometer interrupt pin
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_interrupt(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.mag.set_interrupt(&mut self.bus, enable)
    }

    /// Put the magnetometer in standby or back in continuous mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mag_sleep(&mut self, sleep: bool) -> Result<(), Error<B::Error>> {
        self.mag.set_sleep(&mut self.bus, sleep)
    }

    /// Soft-reset the magnetometer
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_mag(&mut self) -> Result<(), Error<B::Error>> {
        self.mag.reset(&mut self.bus)
    }

    /// Release the bus and delay
    #[must_use]
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
