//! Unit tests for device identification

use crate::common::create_mock_driver;
use crate::common::mock_interface::{MockError, MockInterface};
use apds9960::{Apds9960Driver, DEVICE_IDS, Error};

#[test]
fn test_accepts_every_known_id() {
    for id in DEVICE_IDS {
        let interface = MockInterface::new();
        interface.set_device_id(id);

        let result = Apds9960Driver::new(interface);
        assert!(result.is_ok(), "ID 0x{id:02X} should be accepted");
    }
}

#[test]
fn test_rejects_unknown_id() {
    let interface = MockInterface::new();
    interface.set_device_id(0x00);

    let result = Apds9960Driver::new(interface);
    assert!(matches!(result, Err(Error::InvalidDevice(0x00))));
}

#[test]
fn test_new_reports_bus_failure() {
    let interface = MockInterface::new();
    interface.fail_next_read();

    let result = Apds9960Driver::new(interface);
    assert!(matches!(result, Err(Error::Bus(MockError::Communication))));
}

#[test]
fn test_read_device_id() {
    let (mut driver, interface) = create_mock_driver();
    assert_eq!(driver.read_device_id().unwrap(), 0xAB);

    interface.set_device_id(0x9C);
    assert_eq!(driver.read_device_id().unwrap(), 0x9C);
}

#[test]
fn test_new_does_not_write() {
    let (_driver, interface) = create_mock_driver();
    assert_eq!(interface.write_count(), 0);
}
