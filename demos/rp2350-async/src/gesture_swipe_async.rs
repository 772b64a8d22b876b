//! Gesture Swipe Example for APDS-9960 on Raspberry Pi Pico 2 (Async version)
//!
//! This example enables the gesture engine and prints every swipe, near or
//! far motion the sensor reports, while also sampling proximity between
//! gestures.
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VCC: 3.3V
//! - GND: GND
//! - INT (optional): GPIO14

#![no_std]
#![no_main]

use apds9960::{Apds9960Driver, Gesture, GestureConfig, GestureGain, I2cInterface};
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
use embassy_time::{Delay, Timer};
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
    info!("APDS-9960 Gesture Swipe Example (Async)");

    let p = embassy_rp::init(Config::default());

    // Configure I2C with 400kHz frequency
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_13, p.PIN_12, Irqs, i2c_config);

    info!("Initializing APDS-9960...");
    let mut sensor = match Apds9960Driver::new(I2cInterface::new(i2c)).await {
        Ok(sensor) => {
            info!("APDS-9960 detected!");
            sensor
        }
        Err(e) => {
            error!("Failed to detect APDS-9960: {:?}", e);
            loop {
                Timer::after_millis(1000).await;
            }
        }
    };

    // Higher gain for hands further from the sensor
    let config = GestureConfig {
        gain: GestureGain::X4,
        ..GestureConfig::default()
    };

    if let Err(e) = sensor.init(&config).await {
        error!("Failed to initialize APDS-9960: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }

    if let Err(e) = sensor.enable_gesture_sensor(&config).await {
        error!("Failed to enable gesture engine: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }

    let mut delay = Delay;

    loop {
        Timer::after_millis(50).await;

        if !sensor.is_gesture_available().await.unwrap_or(false) {
            if let Ok(proximity) = sensor.read_proximity().await {
                trace!("proximity: {}", proximity);
            }
            continue;
        }

        match sensor.read_gesture(&mut delay).await {
            Ok(Gesture::None) => {}
            Ok(gesture) => info!("Gesture: {}", gesture.name()),
            Err(e) => error!("Gesture read error: {:?}", e),
        }
    }
}
