//! Integration tests for the gesture polling loop
//!
//! These drive `read_gesture` end to end against scripted FIFO sequences.

use crate::common::mock_interface::ENABLE;
use crate::common::test_utils::{
    CENTERED, batch, down_swipe, hold, left_swipe, right_swipe, up_swipe,
};
use crate::common::{MockDelay, PollStep, create_gesture_driver, create_mock_driver};
use apds9960::gesture::{FIFO_PAUSE_TIME_MS, MAX_POLL_CYCLES};
use apds9960::{Apds9960Driver, Gesture};

fn assert_engine_idle<I>(driver: &Apds9960Driver<I>) {
    let engine = driver.gesture_engine();
    assert!(!engine.is_active());
    assert_eq!(engine.polls(), 0);
    assert!(engine.buffer().is_empty());
    assert_eq!(engine.classifier().ud_delta(), 0);
    assert_eq!(engine.classifier().lr_delta(), 0);
}

#[test]
fn test_swipe_directions() {
    let cases = [
        (down_swipe(), Gesture::Down),
        (up_swipe(), Gesture::Up),
        (left_swipe(), Gesture::Left),
        (right_swipe(), Gesture::Right),
    ];

    for (swipe, expected) in cases {
        let (mut driver, interface) = create_gesture_driver();
        interface.script_polls(vec![swipe, PollStep::Invalid]);

        let mut delay = MockDelay::default();
        let gesture = driver.read_gesture(&mut delay).unwrap();

        assert_eq!(gesture, expected);
        assert_eq!(interface.gstatus_reads(), 2);
        // Two polls plus the settle pause
        assert_eq!(delay.waits, 3);
        assert_eq!(delay.total_ms, 3 * FIFO_PAUSE_TIME_MS);
        assert_engine_idle(&driver);
    }
}

#[test]
fn test_swipe_split_across_batches() {
    let (mut driver, interface) = create_gesture_driver();
    // U/D balance moves 30 per batch; the second batch crosses the commit threshold
    let half = batch(CENTERED, [130, 70, 100, 100], 8);
    interface.script_polls(vec![half.clone(), half, PollStep::Invalid]);

    let gesture = driver.read_gesture(&mut MockDelay::default()).unwrap();
    assert_eq!(gesture, Gesture::Down);
}

#[test]
fn test_short_movement_decodes_nothing() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![
        batch(CENTERED, [130, 70, 100, 100], 8),
        PollStep::Invalid,
    ]);

    let gesture = driver.read_gesture(&mut MockDelay::default()).unwrap();
    assert_eq!(gesture, Gesture::None);
    assert_engine_idle(&driver);
}

#[test]
fn test_waits_for_first_batch() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![
        PollStep::Invalid,
        PollStep::Empty,
        PollStep::Invalid,
        right_swipe(),
        PollStep::Empty,
    ]);

    let mut delay = MockDelay::default();
    let gesture = driver.read_gesture(&mut delay).unwrap();

    assert_eq!(gesture, Gesture::Right);
    assert_eq!(interface.gstatus_reads(), 5);
    assert_eq!(delay.waits, 6);
}

#[test]
fn test_empty_fifo_after_batch_finalizes() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![up_swipe(), PollStep::Empty, down_swipe()]);

    let gesture = driver.read_gesture(&mut MockDelay::default()).unwrap();
    assert_eq!(gesture, Gesture::Up);
    assert_eq!(interface.remaining_polls(), 1);
}

#[test]
fn test_timeout_without_data_resets_state() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![PollStep::Invalid; usize::from(MAX_POLL_CYCLES)]);

    let mut delay = MockDelay::default();
    let gesture = driver.read_gesture(&mut delay).unwrap();

    assert_eq!(gesture, Gesture::Timeout);
    assert_eq!(interface.gstatus_reads(), usize::from(MAX_POLL_CYCLES));
    assert_eq!(delay.waits, u32::from(MAX_POLL_CYCLES));
    assert_eq!(interface.fifo_read_count(), 0);
    assert_engine_idle(&driver);
}

#[test]
fn test_continuous_data_times_out() {
    let (mut driver, interface) = create_gesture_driver();
    // Near/far needs twelve batches, more than one call's poll window
    interface.script_polls(vec![hold(); 12]);

    let gesture = driver.read_gesture(&mut MockDelay::default()).unwrap();

    assert_eq!(gesture, Gesture::Timeout);
    assert_eq!(interface.gstatus_reads(), usize::from(MAX_POLL_CYCLES) + 1);
    assert_eq!(interface.fifo_read_count(), usize::from(MAX_POLL_CYCLES));
    assert_engine_idle(&driver);
}

#[test]
fn test_entry_guard_without_gesture_engine() {
    let (mut driver, interface) = create_mock_driver();
    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);

    let mut delay = MockDelay::default();
    assert_eq!(driver.read_gesture(&mut delay).unwrap(), Gesture::None);

    // GEN alone is not enough without PON
    interface.set_register(ENABLE, 0x40);
    assert_eq!(driver.read_gesture(&mut delay).unwrap(), Gesture::None);

    assert_eq!(interface.gstatus_reads(), 0);
    assert_eq!(delay.waits, 0);
}

#[test]
fn test_disabled_sensor_reads_none() {
    let (mut driver, interface) = create_gesture_driver();
    driver.disable_gesture_sensor().unwrap();
    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);

    assert_eq!(
        driver.read_gesture(&mut MockDelay::default()).unwrap(),
        Gesture::None
    );
}

#[test]
fn test_consecutive_episodes_are_independent() {
    let (mut driver, interface) = create_gesture_driver();

    interface.script_polls(vec![down_swipe(), PollStep::Invalid]);
    assert_eq!(
        driver.read_gesture(&mut MockDelay::default()).unwrap(),
        Gesture::Down
    );

    interface.script_polls(vec![left_swipe(), PollStep::Invalid]);
    assert_eq!(
        driver.read_gesture(&mut MockDelay::default()).unwrap(),
        Gesture::Left
    );
}

#[test]
fn test_oversize_fifo_level_reads_one_buffer() {
    let (mut driver, interface) = create_gesture_driver();
    // The movement sits in dataset 40, past the 32 the driver reads
    interface.script_polls(vec![
        batch(CENTERED, [200, 50, 100, 100], 40),
        PollStep::Invalid,
    ]);

    let gesture = driver.read_gesture(&mut MockDelay::default()).unwrap();
    assert_eq!(gesture, Gesture::None);
}

#[test]
fn test_poll_gesture_matches_read_gesture() {
    let (mut driver, interface) = create_gesture_driver();
    interface.script_polls(vec![right_swipe(), PollStep::Invalid]);
    assert_eq!(driver.poll_gesture(&mut MockDelay::default()), Gesture::Right);

    interface.script_polls(vec![]);
    assert_eq!(
        driver.poll_gesture(&mut MockDelay::default()),
        Gesture::Timeout
    );
}
