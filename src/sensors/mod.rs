//! Sensor modules for the APDS-9960
//!
//! This module provides types, enums, and configuration values for the
//! non-gesture engines of the APDS-9960:
//! - Ambient light and RGB color
//! - Proximity
//!
//! The gesture engine lives in [`crate::gesture`]. All sensor operations are
//! performed through methods on `Apds9960Driver`.

pub mod light;
pub mod proximity;

// Re-export main types
pub use light::{AmbientLightGain, RgbData};
pub use proximity::ProximityGain;

/// IR LED drive strength, shared by the proximity and gesture engines
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedDrive {
    /// 100 mA
    #[default]
    Ma100 = 0,
    /// 50 mA
    Ma50 = 1,
    /// 25 mA
    Ma25 = 2,
    /// 12.5 mA
    Ma12_5 = 3,
}

impl LedDrive {
    /// Drive current in tenths of a milliamp
    #[must_use]
    pub const fn current_deci_ma(self) -> u16 {
        match self {
            Self::Ma100 => 1000,
            Self::Ma50 => 500,
            Self::Ma25 => 250,
            Self::Ma12_5 => 125,
        }
    }
}
