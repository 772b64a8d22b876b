//! Ambient light and RGB color types
//!
//! The APDS-9960 reports four 16-bit channel counts (clear, red, green, blue).
//! Conversion to lux or color temperature is left to the application.

/// Ambient light and color gain (`CONTROL.AGAIN`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AmbientLightGain {
    /// 1x gain
    X1 = 0,
    /// 4x gain
    #[default]
    X4 = 1,
    /// 16x gain
    X16 = 2,
    /// 64x gain
    X64 = 3,
}

impl AmbientLightGain {
    /// Gain multiplier
    #[must_use]
    pub const fn multiplier(self) -> u8 {
        match self {
            Self::X1 => 1,
            Self::X4 => 4,
            Self::X16 => 16,
            Self::X64 => 64,
        }
    }
}

/// Raw color channel counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbData {
    /// Clear (unfiltered) channel, used as ambient light level
    pub clear: u16,
    /// Red channel
    pub red: u16,
    /// Green channel
    pub green: u16,
    /// Blue channel
    pub blue: u16,
}

impl RgbData {
    /// Decode the eight bytes read in one burst from `CDATAL` (0x94)
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self {
            clear: u16::from_le_bytes([bytes[0], bytes[1]]),
            red: u16::from_le_bytes([bytes[2], bytes[3]]),
            green: u16::from_le_bytes([bytes[4], bytes[5]]),
            blue: u16::from_le_bytes([bytes[6], bytes[7]]),
        }
    }

    /// Whether the clear channel hit the ADC ceiling for the given `ATIME`
    ///
    /// Full scale is `1025 * (256 - atime)` counts, capped at 65535.
    #[must_use]
    pub fn is_saturated(&self, atime: u8) -> bool {
        let cycles = 256 - u32::from(atime);
        let full_scale = (1025 * cycles).min(u32::from(u16::MAX));
        u32::from(self.clear) >= full_scale
    }
}
