//! Episode state for the gesture polling loop
//!
//! [`GestureEngine`] owns the accumulator and classifier for one episode and
//! tracks how many polls the current `read_gesture` call has spent. It does no
//! I/O: the driver reads `GSTATUS`/`GFLVL`/`GFIFO` and reports what it saw.

use super::{Classification, Gesture, GestureBuffer, GestureClassifier, MAX_POLL_CYCLES};

/// What the poll loop should do after a poll with no FIFO data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleOutcome {
    /// No batch seen yet this episode; poll again
    Wait,
    /// Poll budget exhausted; the engine has been reset
    Timeout,
    /// Data stopped after at least one batch; pause once more then [`GestureEngine::settle`]
    Settle,
}

/// Accumulator, classifier and poll counter for one gesture episode
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEngine {
    buffer: GestureBuffer,
    classifier: GestureClassifier,
    polls: u8,
    active: bool,
}

impl GestureEngine {
    /// Create an idle engine
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: GestureBuffer::new(),
            classifier: GestureClassifier::new(),
            polls: 0,
            active: false,
        }
    }

    /// Drop all episode state
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.classifier.reset();
        self.polls = 0;
        self.active = false;
    }

    /// Count one poll; call after each inter-poll pause
    pub fn start_cycle(&mut self) {
        self.polls = self.polls.saturating_add(1);
    }

    /// Whether the current poll is still inside the read window
    #[must_use]
    pub const fn within_window(&self) -> bool {
        self.polls <= MAX_POLL_CYCLES
    }

    /// Whether at least one FIFO batch has been ingested this episode
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Polls counted since the last reset
    #[must_use]
    pub const fn polls(&self) -> u8 {
        self.polls
    }

    /// Accumulator for the batch in progress
    #[must_use]
    pub const fn buffer(&self) -> &GestureBuffer {
        &self.buffer
    }

    /// Classifier state for the episode
    #[must_use]
    pub const fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Feed one FIFO read (U, D, L, R quadruples)
    ///
    /// Reads shorter than one dataset are ignored. Otherwise the batch is
    /// classified and the accumulator cleared; classifier state carries over.
    /// Returns the decoded motion when the batch completed a near/far decision.
    pub fn ingest(&mut self, fifo: &[u8]) -> Option<Gesture> {
        if self.buffer.extend_from_fifo(fifo) == 0 {
            return None;
        }

        if !self.active {
            #[cfg(feature = "defmt")]
            defmt::debug!("gesture episode started");
            self.active = true;
        }

        let decoded = match self.classifier.classify(&self.buffer) {
            Classification::Decided => self.classifier.decode(),
            Classification::Insufficient => None,
        };
        self.buffer.reset();

        #[cfg(feature = "defmt")]
        if let Some(gesture) = decoded {
            defmt::debug!("gesture decided mid-episode: {}", gesture);
        }

        decoded
    }

    /// Handle a poll where the FIFO was invalid or empty
    pub fn on_idle(&mut self) -> IdleOutcome {
        if self.polls >= MAX_POLL_CYCLES {
            #[cfg(feature = "defmt")]
            defmt::debug!("gesture timeout after {} polls", self.polls);
            self.reset();
            IdleOutcome::Timeout
        } else if self.active {
            IdleOutcome::Settle
        } else {
            IdleOutcome::Wait
        }
    }

    /// Best-effort decode of the episode, then reset
    pub fn settle(&mut self) -> Gesture {
        let _ = self.classifier.decode();
        let motion = self.classifier.motion();

        #[cfg(feature = "defmt")]
        defmt::debug!("gesture settled: {}", motion);

        self.reset();
        motion
    }
}
