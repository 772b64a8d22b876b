#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod interface;
pub mod registers;
pub mod sensors;

pub mod gesture;
pub mod power;

// Re-export main types
pub use device::{Apds9960Driver, GestureStatus};
pub use gesture::{
    Classification, Gesture, GestureBuffer, GestureClassifier, GestureConfig, GestureEngine,
    GestureGain, GestureSample, GestureWaitTime, LedBoost, Phase, PulseLength,
};
pub use interface::I2cInterface;
pub use power::{EnableStatus, Mode};
pub use sensors::{AmbientLightGain, LedDrive, ProximityGain, RgbData};

/// APDS-9960 I2C address (fixed, no address pin)
pub const I2C_ADDRESS: u8 = 0x39;

/// Values of the `ID` register accepted as an APDS-9960
///
/// Production parts report 0xAB. The other two values have been observed on
/// early silicon and on clones found on common breakout boards.
pub const DEVICE_IDS: [u8; 3] = [0xAB, 0x9C, 0xA8];

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `ID` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
