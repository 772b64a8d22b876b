//! Unit tests for register defaults and gesture engine configuration

use crate::common::create_mock_driver;
use crate::common::mock_interface::ENABLE;
use apds9960::{
    Error, GestureConfig, GestureGain, GestureWaitTime, LedBoost, LedDrive, PulseLength,
};

#[test]
fn test_init_programs_defaults() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(ENABLE, 0x7F);

    driver.init(&GestureConfig::default()).unwrap();

    let expected: &[(u8, u8, &str)] = &[
        (0x80, 0x00, "ENABLE"),
        (0x81, 219, "ATIME"),
        (0x83, 246, "WTIME"),
        (0x84, 0xFF, "AILTL"),
        (0x85, 0xFF, "AILTH"),
        (0x86, 0x00, "AIHTL"),
        (0x87, 0x00, "AIHTH"),
        (0x89, 0, "PILT"),
        (0x8B, 50, "PIHT"),
        (0x8C, 0x11, "PERS"),
        (0x8D, 0x60, "CONFIG1"),
        (0x8E, 0x87, "PPULSE"),
        (0x8F, 0x09, "CONTROL"),
        (0x90, 0x01, "CONFIG2"),
        (0x9D, 0x00, "POFFSET_UR"),
        (0x9E, 0x00, "POFFSET_DL"),
        (0x9F, 0x00, "CONFIG3"),
        (0xA0, 40, "GPENTH"),
        (0xA1, 30, "GEXTH"),
        (0xA2, 0x40, "GCONF1"),
        (0xA3, 0x21, "GCONF2"),
        (0xA6, 0xC9, "GPULSE"),
        (0xAA, 0x00, "GCONF3"),
        (0xAB, 0x00, "GCONF4"),
    ];
    for &(address, value, name) in expected {
        assert_eq!(
            interface.get_register(address),
            value,
            "{name} (0x{address:02X}) has the wrong default"
        );
    }
}

#[test]
fn test_enable_gesture_sensor_sequence() {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig::default();
    driver.init(&config).unwrap();

    driver.enable_gesture_sensor(&config).unwrap();

    assert!(interface.verify_register(0x83, 0xFF), "WTIME");
    assert!(interface.verify_register(0x8E, 0x89), "PPULSE");
    assert!(interface.verify_register(0x90, 0x31), "CONFIG2 with 300% boost");
    assert!(interface.verify_register(0xAB, 0x01), "GCONF4 with GMODE");
    // PON | WEN | PEN | GEN
    assert!(interface.verify_register(ENABLE, 0x4D), "ENABLE");

    let status = driver.read_enable_status().unwrap();
    assert!(status.gesture_ready());
}

#[test]
fn test_enable_gesture_sensor_with_interrupt() {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig {
        interrupt: true,
        ..GestureConfig::default()
    };
    driver.init(&config).unwrap();
    // init leaves the interrupt off regardless of config
    assert!(interface.verify_register(0xAB, 0x00));

    driver.enable_gesture_sensor(&config).unwrap();
    assert!(interface.verify_register(0xAB, 0x03));
}

#[test]
fn test_disable_gesture_sensor_keeps_other_engines() {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig {
        interrupt: true,
        ..GestureConfig::default()
    };
    driver.init(&config).unwrap();
    driver.enable_gesture_sensor(&config).unwrap();

    driver.disable_gesture_sensor().unwrap();

    assert!(interface.verify_register(0xAB, 0x00), "GCONF4 cleared");
    assert!(interface.verify_register(ENABLE, 0x0D), "only GEN cleared");
}

#[test]
fn test_custom_gesture_config() {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig {
        gain: GestureGain::X8,
        led_drive: LedDrive::Ma25,
        wait_time: GestureWaitTime::Ms39_2,
        led_boost: LedBoost::Percent150,
        entry_threshold: 100,
        exit_threshold: 60,
        pulse_count: 16,
        pulse_length: PulseLength::Us8,
        ..GestureConfig::default()
    };

    driver.configure_gesture(&config).unwrap();

    assert!(interface.verify_register(0xA0, 100));
    assert!(interface.verify_register(0xA1, 60));
    // GGAIN=3, GLDRIVE=2, GWTIME=7
    assert!(interface.verify_register(0xA3, (3 << 5) | (2 << 3) | 7));
    // GPLEN=1, GPULSE=15
    assert!(interface.verify_register(0xA6, 0x4F));
    assert_eq!(driver.gesture_config(), &config);
}

#[test]
fn test_invalid_config_is_rejected_before_any_write() {
    let (mut driver, interface) = create_mock_driver();
    let config = GestureConfig {
        entry_threshold: 30,
        exit_threshold: 40,
        ..GestureConfig::default()
    };

    assert!(matches!(driver.init(&config), Err(Error::InvalidConfig)));
    assert!(matches!(
        driver.enable_gesture_sensor(&config),
        Err(Error::InvalidConfig)
    ));
    assert_eq!(interface.write_count(), 0);
    assert_eq!(driver.gesture_config(), &GestureConfig::default());
}
