//! Gesture recognition engine
//!
//! The APDS-9960 gesture engine fills an on-chip FIFO with datasets of four
//! photodiode intensities (up, down, left, right). This module turns batches of
//! those datasets into a discrete motion:
//! - [`GestureBuffer`] collects up to 32 datasets from one FIFO read
//! - [`GestureClassifier`] tracks how the U/D and L/R balance shifts across
//!   batches and commits to a swipe direction or a near/far approach
//! - [`GestureEngine`] holds both for one polling episode and decides when the
//!   episode ends (decision, FIFO drained, or timeout)
//!
//! The engine never touches the bus. The driver's `read_gesture` owns the
//! polling loop and feeds it.
//!
//! # Example
//!
//! ```ignore
//! # use apds9960::{Apds9960Driver, Gesture, GestureConfig};
//! # let mut sensor: Apds9960Driver<_> = todo!();
//! # let mut delay = todo!();
//! sensor.enable_gesture_sensor(&GestureConfig::default())?;
//!
//! loop {
//!     if sensor.is_gesture_available()? {
//!         match sensor.read_gesture(&mut delay)? {
//!             Gesture::Left => { /* previous page */ }
//!             Gesture::Right => { /* next page */ }
//!             _ => {}
//!         }
//!     }
//! }
//! # Ok::<(), apds9960::Error<()>>(())
//! ```

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod engine;

pub use buffer::GestureBuffer;
pub use classifier::{Classification, GestureClassifier, Phase};
pub use config::{
    GestureConfig, GestureFifoThreshold, GestureGain, GestureWaitTime, LedBoost, PulseLength,
};
pub use engine::{GestureEngine, IdleOutcome};

/// Minimum channel intensity for a dataset to count as signal
pub const GESTURE_THRESHOLD_OUT: u8 = 10;

/// Accumulated ratio delta at which an axis commits to a direction
pub const GESTURE_SENSITIVITY_1: i32 = 50;

/// Per-batch ratio delta below which motion counts toward near/far
pub const GESTURE_SENSITIVITY_2: i32 = 20;

/// Datasets held per batch (matches the on-chip FIFO depth)
pub const GESTURE_BUFFER_CAPACITY: usize = 32;

/// Bytes per FIFO dataset (U, D, L, R)
pub const BYTES_PER_DATASET: usize = 4;

/// Wait between FIFO polls, in milliseconds
pub const FIFO_PAUSE_TIME_MS: u32 = 30;

/// Polls allowed in one `read_gesture` call before it reports a timeout
pub const MAX_POLL_CYCLES: u8 = 10;

/// Decoded motion label
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// No gesture decoded
    #[default]
    None,
    /// Swipe toward the left photodiode
    Left,
    /// Swipe toward the right photodiode
    Right,
    /// Swipe toward the up photodiode
    Up,
    /// Swipe toward the down photodiode
    Down,
    /// Object approached and held over the sensor
    Near,
    /// Object withdrew from the sensor
    Far,
    /// Polling window ran out without the FIFO going idle
    Timeout,
}

impl Gesture {
    /// Upper-case display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Near => "NEAR",
            Self::Far => "FAR",
            Self::Timeout => "TIMEOUT",
        }
    }

    /// Whether this is one of the four swipe directions
    #[must_use]
    pub const fn is_swipe(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }
}

impl core::fmt::Display for Gesture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One FIFO dataset: photodiode intensities for the four directions
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureSample {
    /// Up photodiode
    pub up: u8,
    /// Down photodiode
    pub down: u8,
    /// Left photodiode
    pub left: u8,
    /// Right photodiode
    pub right: u8,
}

impl GestureSample {
    /// Create a sample from its four channels
    #[must_use]
    pub const fn new(up: u8, down: u8, left: u8, right: u8) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Decode one dataset in FIFO order (U, D, L, R)
    #[must_use]
    pub const fn from_bytes(bytes: [u8; BYTES_PER_DATASET]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Whether every channel is above [`GESTURE_THRESHOLD_OUT`]
    #[must_use]
    pub const fn is_above_threshold(&self) -> bool {
        self.up > GESTURE_THRESHOLD_OUT
            && self.down > GESTURE_THRESHOLD_OUT
            && self.left > GESTURE_THRESHOLD_OUT
            && self.right > GESTURE_THRESHOLD_OUT
    }

    /// Up/down balance in percent, `(U - D) * 100 / (U + D)`
    #[must_use]
    pub fn ud_ratio(&self) -> i32 {
        balance(self.up, self.down)
    }

    /// Left/right balance in percent, `(L - R) * 100 / (L + R)`
    #[must_use]
    pub fn lr_ratio(&self) -> i32 {
        balance(self.left, self.right)
    }
}

/// Signed percentage balance between two channels, truncated toward zero
fn balance(a: u8, b: u8) -> i32 {
    let (a, b) = (i32::from(a), i32::from(b));
    ((a - b) * 100).checked_div(a + b).unwrap_or(0)
}

/// Split raw FIFO bytes into datasets, ignoring a trailing partial dataset
pub fn samples_from_fifo(data: &[u8]) -> impl Iterator<Item = GestureSample> + '_ {
    data.chunks_exact(BYTES_PER_DATASET)
        .map(|c| GestureSample::new(c[0], c[1], c[2], c[3]))
}
