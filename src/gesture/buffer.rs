//! Fixed-capacity accumulator for FIFO datasets
//!
//! Holds at most [`GESTURE_BUFFER_CAPACITY`] samples. Appends past capacity are
//! dropped, never resized, so one batch always spans the same window of the
//! on-chip FIFO.

use super::{GESTURE_BUFFER_CAPACITY, GestureSample, samples_from_fifo};

/// Bounded batch of gesture samples collected since the last reset
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureBuffer {
    samples: heapless::Vec<GestureSample, GESTURE_BUFFER_CAPACITY>,
}

impl GestureBuffer {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: heapless::Vec::new(),
        }
    }

    /// Append one sample
    ///
    /// Returns `false` (and drops the sample) when the buffer is full.
    pub fn append(&mut self, sample: GestureSample) -> bool {
        self.samples.push(sample).is_ok()
    }

    /// Append every complete dataset in `data`, returning how many were stored
    pub fn extend_from_fifo(&mut self, data: &[u8]) -> usize {
        samples_from_fifo(data)
            .map(|sample| self.append(sample))
            .filter(|&stored| stored)
            .count()
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Samples collected since the last reset, oldest first
    #[must_use]
    pub fn snapshot(&self) -> &[GestureSample] {
        &self.samples
    }

    /// Number of samples collected since the last reset
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether further appends will be dropped
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Maximum number of samples held
    #[must_use]
    pub const fn capacity(&self) -> usize {
        GESTURE_BUFFER_CAPACITY
    }
}
