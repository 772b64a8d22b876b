//! Swipe and near/far classification
//!
//! Each batch contributes one delta per axis: how far the U/D (and L/R) balance
//! moved between the first and the last dataset that cleared
//! [`GESTURE_THRESHOLD_OUT`]. Deltas accumulate across batches of an episode.
//! An axis commits to a direction once its running total reaches
//! [`GESTURE_SENSITIVITY_1`]. While neither axis has committed, small per-batch
//! deltas are counted as near (no movement at all) or far (slight movement)
//! evidence instead.

use super::{
    GESTURE_SENSITIVITY_1, GESTURE_SENSITIVITY_2, Gesture, GestureBuffer, GestureSample,
};

/// Batches needed before a trend is computed (a batch must hold more than this)
const MIN_BATCH_SAMPLES: usize = 4;

/// Still batches required before near/far can be resolved
const NEAR_COUNT_THRESHOLD: u32 = 10;

/// Drifting batches required before near/far can be resolved
const FAR_COUNT_THRESHOLD: u32 = 2;

/// Proximity phase resolved within an episode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No near/far decision
    #[default]
    None,
    /// Object held still over the sensor
    Near,
    /// Object drifting away on both axes
    Far,
}

/// Result of feeding one batch to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// Keep polling; not enough evidence yet
    Insufficient,
    /// Near/far evidence is complete; call [`GestureClassifier::decode`]
    Decided,
}

/// Running classifier state for one gesture episode
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureClassifier {
    ud_delta: i32,
    lr_delta: i32,
    ud_count: i8,
    lr_count: i8,
    near_count: u32,
    far_count: u32,
    phase: Phase,
    motion: Gesture,
}

impl GestureClassifier {
    /// Create a classifier with no accumulated evidence
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ud_delta: 0,
            lr_delta: 0,
            ud_count: 0,
            lr_count: 0,
            near_count: 0,
            far_count: 0,
            phase: Phase::None,
            motion: Gesture::None,
        }
    }

    /// Clear all accumulated evidence and the last decoded motion
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Accumulated up/down delta
    #[must_use]
    pub const fn ud_delta(&self) -> i32 {
        self.ud_delta
    }

    /// Accumulated left/right delta
    #[must_use]
    pub const fn lr_delta(&self) -> i32 {
        self.lr_delta
    }

    /// Committed up/down direction (-1 up, 0 none, 1 down)
    #[must_use]
    pub const fn ud_count(&self) -> i8 {
        self.ud_count
    }

    /// Committed left/right direction (-1 left, 0 none, 1 right)
    #[must_use]
    pub const fn lr_count(&self) -> i8 {
        self.lr_count
    }

    /// Batches seen with no movement on either axis
    #[must_use]
    pub const fn near_count(&self) -> u32 {
        self.near_count
    }

    /// Batches seen with slight movement while no axis had committed
    #[must_use]
    pub const fn far_count(&self) -> u32 {
        self.far_count
    }

    /// Resolved near/far phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Last motion produced by [`decode`](Self::decode)
    #[must_use]
    pub const fn motion(&self) -> Gesture {
        self.motion
    }

    /// Feed one batch
    pub fn classify(&mut self, buffer: &GestureBuffer) -> Classification {
        self.classify_samples(buffer.snapshot())
    }

    /// Feed one batch given as a slice, oldest sample first
    pub fn classify_samples(&mut self, samples: &[GestureSample]) -> Classification {
        if samples.len() <= MIN_BATCH_SAMPLES {
            return Classification::Insufficient;
        }

        let Some(first) = samples.iter().find(|s| s.is_above_threshold()) else {
            return Classification::Insufficient;
        };
        let last = samples
            .iter()
            .rev()
            .find(|s| s.is_above_threshold())
            .unwrap_or(first);

        let ud_delta = last.ud_ratio() - first.ud_ratio();
        let lr_delta = last.lr_ratio() - first.lr_ratio();

        self.ud_delta = self.ud_delta.saturating_add(ud_delta);
        self.lr_delta = self.lr_delta.saturating_add(lr_delta);
        self.ud_count = commit(self.ud_delta);
        self.lr_count = commit(self.lr_delta);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "gesture batch: n={} d_ud={} d_lr={} acc_ud={} acc_lr={}",
            samples.len(),
            ud_delta,
            lr_delta,
            self.ud_delta,
            self.lr_delta
        );

        let settled = ud_delta.abs() < GESTURE_SENSITIVITY_2 && lr_delta.abs() < GESTURE_SENSITIVITY_2;
        let still = ud_delta == 0 && lr_delta == 0;

        if self.ud_count == 0 && self.lr_count == 0 {
            if settled {
                if still {
                    self.near_count += 1;
                } else {
                    self.far_count += 1;
                }

                if self.near_count >= NEAR_COUNT_THRESHOLD && self.far_count >= FAR_COUNT_THRESHOLD
                {
                    if still {
                        self.phase = Phase::Near;
                    } else if ud_delta != 0 && lr_delta != 0 {
                        self.phase = Phase::Far;
                    }
                    return Classification::Decided;
                }
            }
        } else if settled {
            // Far evidence only counts while both axes are undecided
            if still {
                self.near_count += 1;
            }
            if self.near_count >= NEAR_COUNT_THRESHOLD {
                self.ud_count = 0;
                self.lr_count = 0;
                self.ud_delta = 0;
                self.lr_delta = 0;
            }
        }

        Classification::Insufficient
    }

    /// Resolve the current evidence into a motion
    ///
    /// A near/far phase wins over any swipe. When both axes have committed the
    /// axis with the larger accumulated delta wins, ties going to left/right.
    /// Returns `None` (and leaves [`motion`](Self::motion) untouched) when
    /// nothing can be decoded.
    pub fn decode(&mut self) -> Option<Gesture> {
        let motion = match self.phase {
            Phase::Near => Gesture::Near,
            Phase::Far => Gesture::Far,
            Phase::None => match (self.ud_count, self.lr_count) {
                (-1, 0) => Gesture::Up,
                (1, 0) => Gesture::Down,
                (0, 1) => Gesture::Right,
                (0, -1) => Gesture::Left,
                (ud, lr) if ud != 0 && lr != 0 => {
                    if self.ud_delta.unsigned_abs() > self.lr_delta.unsigned_abs() {
                        if ud < 0 { Gesture::Up } else { Gesture::Down }
                    } else if lr > 0 {
                        Gesture::Right
                    } else {
                        Gesture::Left
                    }
                }
                _ => return None,
            },
        };

        self.motion = motion;
        Some(motion)
    }
}

/// Map an accumulated delta to a committed direction
const fn commit(delta: i32) -> i8 {
    if delta >= GESTURE_SENSITIVITY_1 {
        1
    } else if delta <= -GESTURE_SENSITIVITY_1 {
        -1
    } else {
        0
    }
}
