//! Gesture engine configuration

use crate::Error;
use crate::sensors::LedDrive;

/// `WTIME` written while the gesture engine runs (2.78 ms wait)
pub const GESTURE_MODE_WTIME: u8 = 0xFF;

/// `PPULSE` written while the gesture engine runs (16 µs, 10 pulses)
pub const GESTURE_MODE_PPULSE: u8 = 0x89;

/// Gesture receiver gain (`GCONF2.GGAIN`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureGain {
    /// 1x gain
    X1 = 0,
    /// 2x gain
    #[default]
    X2 = 1,
    /// 4x gain
    X4 = 2,
    /// 8x gain
    X8 = 3,
}

/// Wait between gesture engine cycles (`GCONF2.GWTIME`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureWaitTime {
    /// No wait
    Ms0 = 0,
    /// 2.8 ms
    #[default]
    Ms2_8 = 1,
    /// 5.6 ms
    Ms5_6 = 2,
    /// 8.4 ms
    Ms8_4 = 3,
    /// 14.0 ms
    Ms14_0 = 4,
    /// 22.4 ms
    Ms22_4 = 5,
    /// 30.8 ms
    Ms30_8 = 6,
    /// 39.2 ms
    Ms39_2 = 7,
}

impl GestureWaitTime {
    /// Wait time in microseconds
    #[must_use]
    pub const fn micros(self) -> u32 {
        match self {
            Self::Ms0 => 0,
            Self::Ms2_8 => 2800,
            Self::Ms5_6 => 5600,
            Self::Ms8_4 => 8400,
            Self::Ms14_0 => 14_000,
            Self::Ms22_4 => 22_400,
            Self::Ms30_8 => 30_800,
            Self::Ms39_2 => 39_200,
        }
    }
}

/// Extra LED current while proximity or gesture pulses fire (`CONFIG2.LED_BOOST`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedBoost {
    /// 100 % (no boost)
    Percent100 = 0,
    /// 150 %
    Percent150 = 1,
    /// 200 %
    Percent200 = 2,
    /// 300 %
    #[default]
    Percent300 = 3,
}

/// Datasets in the FIFO before `GINT` asserts (`GCONF1.GFIFOTH`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureFifoThreshold {
    /// 1 dataset
    One = 0,
    /// 4 datasets
    #[default]
    Four = 1,
    /// 8 datasets
    Eight = 2,
    /// 16 datasets
    Sixteen = 3,
}

/// Gesture LED pulse length (`GPULSE.GPLEN`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseLength {
    /// 4 µs
    Us4 = 0,
    /// 8 µs
    Us8 = 1,
    /// 16 µs
    Us16 = 2,
    /// 32 µs
    #[default]
    Us32 = 3,
}

/// Gesture engine configuration
///
/// `Default` matches the register values the sensor is normally brought up
/// with: 2x gain, 100 mA drive, 2.8 ms wait, 300 % boost, entry at 40 and exit
/// at 30 proximity counts, ten 32 µs pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureConfig {
    /// Receiver gain
    pub gain: GestureGain,
    /// LED drive strength
    pub led_drive: LedDrive,
    /// Wait between gesture cycles
    pub wait_time: GestureWaitTime,
    /// LED boost applied when the gesture engine is enabled
    pub led_boost: LedBoost,
    /// Proximity count that starts the gesture engine (`GPENTH`)
    pub entry_threshold: u8,
    /// Proximity count below which the gesture engine exits (`GEXTH`)
    pub exit_threshold: u8,
    /// FIFO level that raises the gesture interrupt
    pub fifo_threshold: GestureFifoThreshold,
    /// Pulses per gesture cycle (1-64)
    pub pulse_count: u8,
    /// Length of each pulse
    pub pulse_length: PulseLength,
    /// Drive the INT pin from the gesture engine (`GCONF4.GIEN`)
    pub interrupt: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            gain: GestureGain::X2,
            led_drive: LedDrive::Ma100,
            wait_time: GestureWaitTime::Ms2_8,
            led_boost: LedBoost::Percent300,
            entry_threshold: 40,
            exit_threshold: 30,
            fifo_threshold: GestureFifoThreshold::Four,
            pulse_count: 10,
            pulse_length: PulseLength::Us32,
            interrupt: false,
        }
    }
}

impl GestureConfig {
    /// Check the configuration before it is written to the device
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the exit threshold is above the entry
    /// threshold (the engine would never exit) or the pulse count is outside
    /// 1-64
    pub const fn validate(&self) -> Result<(), Error<()>> {
        if self.exit_threshold > self.entry_threshold {
            return Err(Error::InvalidConfig);
        }
        if self.pulse_count == 0 || self.pulse_count > 64 {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Raw `GPULSE` register value
    #[must_use]
    pub const fn gpulse(&self) -> u8 {
        ((self.pulse_length as u8) << 6) | (self.pulse_count.saturating_sub(1) & 0x3F)
    }

    /// Raw `GCONF1` register value (exit mask and persistence left at zero)
    #[must_use]
    pub const fn gconf1(&self) -> u8 {
        (self.fifo_threshold as u8) << 6
    }
}
