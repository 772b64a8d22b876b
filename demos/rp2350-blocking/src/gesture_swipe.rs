//! Gesture Swipe Example for APDS-9960 on Raspberry Pi Pico 2 (Blocking version)
//!
//! This example enables the gesture engine and prints every swipe, near or
//! far motion the sensor reports.
//!
//! The APDS-9960 raises INT when the gesture FIFO fills past its threshold;
//! this example simply checks `GVALID` every 50 ms instead.
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VCC: 3.3V
//! - GND: GND
//! - INT (optional): GPIO14

#![no_std]
#![no_main]

use apds9960::{Apds9960Driver, Gesture, GestureConfig, I2cInterface};
use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler},
    peripherals::I2C0,
};
use embassy_time::Delay;
use panic_probe as _;

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Bind I2C interrupts
bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("APDS-9960 Gesture Swipe Example");

    let p = embassy_rp::init(Config::default());

    // Configure I2C at 400kHz on pins 12(SDA)/13(SCL)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);

    let mut sensor = match Apds9960Driver::new(I2cInterface::new(i2c)) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Failed to detect APDS-9960: {:?}", e);
            loop {
                embassy_time::block_for(embassy_time::Duration::from_millis(1000));
            }
        }
    };

    let config = GestureConfig::default();
    if let Err(e) = sensor.init(&config) {
        error!("Failed to initialize: {:?}", e);
        loop {
            embassy_time::block_for(embassy_time::Duration::from_millis(1000));
        }
    }

    if let Err(e) = sensor.enable_gesture_sensor(&config) {
        error!("Failed to enable gesture engine: {:?}", e);
        loop {
            embassy_time::block_for(embassy_time::Duration::from_millis(1000));
        }
    }

    info!("Gesture engine running, swipe a hand over the sensor");

    let mut delay = Delay;
    let mut count = 0u32;

    loop {
        embassy_time::block_for(embassy_time::Duration::from_millis(50));

        match sensor.is_gesture_available() {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                error!("GSTATUS read error: {:?}", e);
                continue;
            }
        }

        match sensor.poll_gesture(&mut delay) {
            Gesture::None => {}
            Gesture::Timeout => warn!("Gesture timed out"),
            gesture => {
                count += 1;
                info!("#{}: {}", count, gesture.name());
            }
        }
    }
}
