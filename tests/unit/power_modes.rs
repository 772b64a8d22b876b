//! Unit tests for engine enable control and raw light/proximity reads

use crate::common::create_mock_driver;
use crate::common::mock_interface::ENABLE;
use apds9960::{AmbientLightGain, EnableStatus, LedDrive, Mode, ProximityGain, RgbData};

const CONTROL: u8 = 0x8F;

#[test]
fn test_set_mode_sets_single_bit() {
    let modes = [
        Mode::Power,
        Mode::AmbientLight,
        Mode::Proximity,
        Mode::Wait,
        Mode::AmbientLightInterrupt,
        Mode::ProximityInterrupt,
        Mode::Gesture,
    ];

    for mode in modes {
        let (mut driver, interface) = create_mock_driver();
        driver.set_mode(mode, true).unwrap();
        assert_eq!(interface.get_register(ENABLE), mode.mask(), "{mode:?}");

        let status = driver.read_enable_status().unwrap();
        assert!(status.is_enabled(mode));

        driver.set_mode(mode, false).unwrap();
        assert_eq!(interface.get_register(ENABLE), 0, "{mode:?}");
    }
}

#[test]
fn test_set_mode_preserves_other_bits() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(ENABLE, 0x4D);

    driver.set_mode(Mode::AmbientLight, true).unwrap();
    assert_eq!(interface.get_register(ENABLE), 0x4F);

    driver.set_mode(Mode::Gesture, false).unwrap();
    assert_eq!(interface.get_register(ENABLE), 0x0F);
}

#[test]
fn test_read_enable_status_matches_raw_decode() {
    let (mut driver, interface) = create_mock_driver();
    for bits in [0x00, 0x01, 0x41, 0x4D, 0x7F] {
        interface.set_register(ENABLE, bits);
        assert_eq!(
            driver.read_enable_status().unwrap(),
            EnableStatus::from_bits(bits)
        );
    }
}

#[test]
fn test_gain_and_drive_share_control_register() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_ambient_light_gain(AmbientLightGain::X64).unwrap();
    driver.set_proximity_gain(ProximityGain::X8).unwrap();
    driver.set_led_drive(LedDrive::Ma12_5).unwrap();
    assert_eq!(interface.get_register(CONTROL), 0xCF);

    driver.set_proximity_gain(ProximityGain::X1).unwrap();
    assert_eq!(interface.get_register(CONTROL), 0xC3);
}

#[test]
fn test_read_rgb_burst() {
    let (mut driver, interface) = create_mock_driver();
    let raw = [0x34, 0x12, 0x10, 0x00, 0x20, 0x00, 0xFF, 0xFF];
    for (i, byte) in raw.iter().enumerate() {
        interface.set_register(0x94 + i as u8, *byte);
    }

    let rgb = driver.read_rgb().unwrap();
    assert_eq!(
        rgb,
        RgbData {
            clear: 0x1234,
            red: 0x0010,
            green: 0x0020,
            blue: 0xFFFF,
        }
    );
    assert_eq!(driver.read_ambient_light().unwrap(), 0x1234);
}

#[test]
fn test_read_proximity() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(0x9C, 187);
    assert_eq!(driver.read_proximity().unwrap(), 187);
}
