//! Engine enable control
//!
//! The APDS-9960 runs its engines (ambient light, proximity, gesture) from a
//! single state machine gated by the `ENABLE` register. Each engine and its
//! interrupt has one bit; the device does nothing until `PON` is set.
//!
//! # Example
//!
//! ```ignore
//! # use apds9960::{Apds9960Driver, Mode};
//! # let mut sensor: Apds9960Driver<_> = todo!();
//! sensor.set_mode(Mode::Power, true)?;
//! sensor.set_mode(Mode::Proximity, true)?;
//!
//! let status = sensor.read_enable_status()?;
//! assert!(status.power && status.proximity);
//! # Ok::<(), apds9960::Error<()>>(())
//! ```

/// A single bit of the `ENABLE` register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Oscillator and state machine power (PON)
    Power = 0,
    /// Ambient light and color engine (AEN)
    AmbientLight = 1,
    /// Proximity engine (PEN)
    Proximity = 2,
    /// Wait timer between engine cycles (WEN)
    Wait = 3,
    /// Ambient light interrupt (AIEN)
    AmbientLightInterrupt = 4,
    /// Proximity interrupt (PIEN)
    ProximityInterrupt = 5,
    /// Gesture engine (GEN)
    Gesture = 6,
}

impl Mode {
    /// Bit mask of this mode within `ENABLE`
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Decoded contents of the `ENABLE` register
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct EnableStatus {
    /// Device powered on
    pub power: bool,
    /// Ambient light engine running
    pub ambient_light: bool,
    /// Proximity engine running
    pub proximity: bool,
    /// Wait timer enabled
    pub wait: bool,
    /// Ambient light interrupt enabled
    pub ambient_light_interrupt: bool,
    /// Proximity interrupt enabled
    pub proximity_interrupt: bool,
    /// Gesture engine running
    pub gesture: bool,
}

impl EnableStatus {
    /// Decode a raw `ENABLE` register value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            power: bits & Mode::Power.mask() != 0,
            ambient_light: bits & Mode::AmbientLight.mask() != 0,
            proximity: bits & Mode::Proximity.mask() != 0,
            wait: bits & Mode::Wait.mask() != 0,
            ambient_light_interrupt: bits & Mode::AmbientLightInterrupt.mask() != 0,
            proximity_interrupt: bits & Mode::ProximityInterrupt.mask() != 0,
            gesture: bits & Mode::Gesture.mask() != 0,
        }
    }

    /// Whether a gesture can be read (device powered and gesture engine on)
    #[must_use]
    pub const fn gesture_ready(&self) -> bool {
        self.power && self.gesture
    }

    /// Whether the given mode bit is set
    #[must_use]
    pub const fn is_enabled(&self, mode: Mode) -> bool {
        match mode {
            Mode::Power => self.power,
            Mode::AmbientLight => self.ambient_light,
            Mode::Proximity => self.proximity,
            Mode::Wait => self.wait,
            Mode::AmbientLightInterrupt => self.ambient_light_interrupt,
            Mode::ProximityInterrupt => self.proximity_interrupt,
            Mode::Gesture => self.gesture,
        }
    }
}
