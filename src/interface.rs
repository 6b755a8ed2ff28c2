//! Bus interface for the GY-85 chips
//!
//! All three chips sit on one I2C bus, so the transport takes the 7-bit chip
//! address on every call. [`I2cInterface`] adapts any `embedded-hal` I2C bus;
//! tests and other transports implement [`RegisterBus`] directly.

/// Register-level access to devices on a shared bus
///
/// Every call is blocking and single-shot: no retries, no timeouts beyond
/// whatever the underlying transport enforces.
pub trait RegisterBus {
    /// Transport error type
    type Error;

    /// Write one byte to `register` on the chip at `address`
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn write_register(&mut self, address: u8, register: u8, value: u8)
        -> Result<(), Self::Error>;

    /// Write `register` then read `buffer.len()` consecutive bytes back
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read a single register byte
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.read_registers(address, register, &mut buffer)?;
        Ok(buffer[0])
    }
}

/// I2C transport for the GY-85
///
/// Wraps an `embedded-hal` I2C bus. Register writes go out as a single
/// `[register, value]` write; reads use `write_read` with the register
/// address as the write phase.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface on the given bus
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c);
    /// let mut imu = Gy85::new(interface, delay);
    /// ```
    #[must_use]
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Consume the interface and return the I2C peripheral
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterBus for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), E> {
        self.i2c.write(address, &[register, value])
    }

    fn read_registers(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c.write_read(address, &[register], buffer)
    }
}
