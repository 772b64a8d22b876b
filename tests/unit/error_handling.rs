//! Unit tests for error handling and recovery

use crate::common::mock_interface::MockError;
use crate::common::test_utils::{down_swipe, hold};
use crate::common::{MockDelay, PollStep, create_gesture_driver, create_mock_driver};
use apds9960::{Error, Gesture, GestureConfig};

#[test]
fn test_read_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();

    let result = driver.read_proximity();
    assert!(result.is_err(), "Read should fail when error is injected");
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_read();
    assert!(driver.read_rgb().is_err(), "First read should fail");

    // Error was only for one operation
    assert!(
        driver.read_rgb().is_ok(),
        "Subsequent read should succeed after single failure"
    );
}

#[test]
fn test_write_failure_basic() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();

    let result = driver.init(&GestureConfig::default());
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}

#[test]
fn test_enable_gesture_write_failure() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(&GestureConfig::default()).unwrap();

    interface.fail_next_write();
    assert!(driver.enable_gesture_sensor(&GestureConfig::default()).is_err());

    // A retry goes through
    driver.enable_gesture_sensor(&GestureConfig::default()).unwrap();
    assert!(driver.read_enable_status().unwrap().gesture_ready());
}

#[test]
fn test_fifo_failure_mid_episode_resets_engine() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![down_swipe(), hold(), PollStep::Invalid]);

    // First batch is ingested, the second burst read fails
    interface.fail_fifo_read_after(1);
    let result = driver.read_gesture(&mut MockDelay::default());

    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
    let engine = driver.gesture_engine();
    assert!(!engine.is_active());
    assert_eq!(engine.polls(), 0);
    assert_eq!(engine.classifier().ud_delta(), 0);
    assert_eq!(engine.classifier().ud_count(), 0);
}

#[test]
fn test_entry_guard_failure_propagates() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);

    // The ENABLE read of the entry guard fails
    interface.fail_next_read();
    let result = driver.read_gesture(&mut MockDelay::default());
    assert!(result.is_err());
    assert_eq!(interface.gstatus_reads(), 0);
    assert_eq!(interface.remaining_polls(), 2);
}

#[test]
fn test_poll_gesture_maps_failure_to_none() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);
    interface.fail_fifo_read(true);

    assert_eq!(driver.poll_gesture(&mut MockDelay::default()), Gesture::None);
    assert!(!driver.gesture_engine().is_active());

    // The next call starts a fresh episode
    interface.fail_fifo_read(false);
    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);
    assert_eq!(driver.poll_gesture(&mut MockDelay::default()), Gesture::Down);
}
