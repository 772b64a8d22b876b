//! Test utilities and helper functions

use crate::common::mock_interface::{MockInterface, PollStep};
use apds9960::{Apds9960Driver, GestureConfig};

/// Mock delay implementation for testing
///
/// Never sleeps. Records how often and how long the driver asked to wait so
/// tests can check the polling cadence.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockDelay {
    /// Number of `delay_ms` calls
    pub waits: u32,
    /// Sum of all requested milliseconds
    pub total_ms: u32,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits += 1;
        self.total_ms += ms;
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits += 1;
        self.total_ms += ms;
    }
}

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver() -> (Apds9960Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Apds9960Driver::new(interface).expect("Failed to create mock driver");
    (driver, interface_clone)
}

/// Create a mock driver that is initialized with the gesture engine running
#[allow(dead_code)]
pub fn create_gesture_driver() -> (Apds9960Driver<MockInterface>, MockInterface) {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig::default();
    driver.init(&config).expect("init failed");
    driver
        .enable_gesture_sensor(&config)
        .expect("enable_gesture_sensor failed");
    interface.clear_operations();
    (driver, interface)
}

/// Channel levels with the object centred over the sensor
#[allow(dead_code)]
pub const CENTERED: [u8; 4] = [100, 100, 100, 100];

/// One FIFO batch of `len` datasets that starts at `from` and ends at `to`
#[allow(dead_code)]
pub fn batch(from: [u8; 4], to: [u8; 4], len: usize) -> PollStep {
    let mut datasets = vec![from; len - 1];
    datasets.push(to);
    PollStep::Batch(datasets)
}

/// Batch that moves the U/D balance from 0 to +60 (toward DOWN)
#[allow(dead_code)]
pub fn down_swipe() -> PollStep {
    batch(CENTERED, [200, 50, 100, 100], 8)
}

/// Batch that moves the U/D balance from 0 to -60 (toward UP)
#[allow(dead_code)]
pub fn up_swipe() -> PollStep {
    batch(CENTERED, [50, 200, 100, 100], 8)
}

/// Batch that moves the L/R balance from 0 to +60 (toward RIGHT)
#[allow(dead_code)]
pub fn right_swipe() -> PollStep {
    batch(CENTERED, [100, 100, 200, 50], 8)
}

/// Batch that moves the L/R balance from 0 to -60 (toward LEFT)
#[allow(dead_code)]
pub fn left_swipe() -> PollStep {
    batch(CENTERED, [100, 100, 50, 200], 8)
}

/// Batch with no movement at all
#[allow(dead_code)]
pub fn hold() -> PollStep {
    batch(CENTERED, CENTERED, 8)
}
