//! Proximity sensor types

/// Proximity gain (`CONTROL.PGAIN`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProximityGain {
    /// 1x gain
    X1 = 0,
    /// 2x gain
    X2 = 1,
    /// 4x gain
    #[default]
    X4 = 2,
    /// 8x gain
    X8 = 3,
}

impl ProximityGain {
    /// Gain multiplier
    #[must_use]
    pub const fn multiplier(self) -> u8 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}
