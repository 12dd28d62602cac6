//! Single-byte register access to the APDS-9922

use embedded_hal::i2c::I2c;

/// Default 7-bit I2C address of the APDS-9922
pub const I2C_ADDRESS: u8 = 0x53;

/// Byte-wide register transport.
///
/// A read yields the register value or an error, never both folded into one
/// integer.
pub trait RegisterBus {
    /// Transport error
    type Error;

    /// Read one register
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one register
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

/// Async byte-wide register transport
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterBus {
    /// Transport error
    type Error;

    /// Read one register
    async fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one register
    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

/// [`RegisterBus`] over an `embedded-hal` I2C bus
#[derive(Debug)]
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cBus<I2C> {
    /// Use the default address
    pub const fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDRESS)
    }

    /// Use a non-default address
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Address the bus talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Give the I2C bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for I2cBus<I2C> {
    type Error = I2C::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}

#[cfg(feature = "async")]
impl<I2C: embedded_hal_async::i2c::I2c> AsyncRegisterBus for I2cBus<I2C> {
    type Error = I2C::Error;

    async fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)
            .await?;
        Ok(buffer[0])
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value]).await
    }
}
