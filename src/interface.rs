//! Bus interface implementation for the APDS-9960
//!
//! This module provides the `device-driver` register interface on top of an
//! `embedded-hal` I2C bus. The APDS-9960 has no SPI mode.

use crate::I2C_ADDRESS;

use device_driver::RegisterInterface;

/// Maximum bytes moved in one register transaction (the full gesture FIFO)
const MAX_TRANSFER_BYTES: usize = 128;

/// I2C interface for the APDS-9960
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface at the fixed APDS-9960 address (0x39)
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::new(i2c);
    /// let mut sensor = Apds9960Driver::new(interface)?;
    /// ```
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// Useful behind an address translator or I2C multiplexer.
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The I2C device address
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address used for transactions
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Build an `address + data` write frame, truncating oversize payloads
fn write_frame(address: u8, write_data: &[u8]) -> ([u8; MAX_TRANSFER_BYTES + 1], usize) {
    let mut buffer = [0u8; MAX_TRANSFER_BYTES + 1];
    buffer[0] = address;
    let len = write_data.len().min(MAX_TRANSFER_BYTES);
    buffer[1..=len].copy_from_slice(&write_data[..len]);
    (buffer, len)
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..=len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        let (buffer, len) = write_frame(address, write_data);
        self.i2c.write(self.address, &buffer[..=len]).await
    }
}
