//! High-level driver API for the APDS-9960
//!
//! This module provides a user-friendly interface to the APDS-9960 sensor:
//! device identification, register defaults, engine control, raw color and
//! proximity reads, and the gesture polling loop that feeds
//! [`GestureEngine`](crate::gesture::GestureEngine).

use crate::gesture::config::{GESTURE_MODE_PPULSE, GESTURE_MODE_WTIME};
use crate::gesture::{
    BYTES_PER_DATASET, FIFO_PAUSE_TIME_MS, GESTURE_BUFFER_CAPACITY, Gesture, GestureConfig,
    GestureEngine, IdleOutcome, LedBoost,
};
use crate::power::{EnableStatus, Mode};
use crate::registers::{GFIFO_U_ADDRESS, RegisterDevice};
use crate::sensors::{AmbientLightGain, LedDrive, ProximityGain, RgbData};
use crate::{DEVICE_IDS, Error};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Register defaults programmed by `init`
mod defaults {
    /// ALS integration time, 103 ms
    pub const ATIME: u8 = 219;
    /// Wait time, 27 ms
    pub const WTIME: u8 = 246;
    /// Proximity pulse: 16 µs, 8 pulses
    pub const PPULSE: u8 = 0x87;
    /// CONFIG1 with WLONG off (bits 6:5 are fixed by the datasheet)
    pub const CONFIG1_FIXED: u8 = 0x18;
    /// Proximity low interrupt threshold
    pub const PILT: u8 = 0;
    /// Proximity high interrupt threshold
    pub const PIHT: u8 = 50;
    /// ALS low interrupt threshold (never fires)
    pub const AILT: u16 = 0xFFFF;
    /// ALS high interrupt threshold
    pub const AIHT: u16 = 0;
    /// Proximity interrupt after one out-of-range cycle
    pub const PPERS: u8 = 1;
    /// ALS interrupt after one out-of-range cycle
    pub const APERS: u8 = 1;
}

/// First color data register (CDATAL); C, R, G, B follow as little-endian pairs
const CDATAL_ADDRESS: u8 = 0x94;

/// Size of one full gesture FIFO read
const FIFO_READ_BYTES: usize = GESTURE_BUFFER_CAPACITY * BYTES_PER_DATASET;

/// Gesture FIFO status (`GSTATUS`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureStatus {
    /// FIFO holds valid datasets (`GVALID`)
    pub valid: bool,
    /// FIFO overflowed and datasets were lost (`GFOV`)
    pub overflow: bool,
}

/// Main driver for the APDS-9960
pub struct Apds9960Driver<I> {
    device: RegisterDevice<I>,
    engine: GestureEngine,
    gesture_config: GestureConfig,
}

#[cfg(not(feature = "async"))]
impl<I> Apds9960Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new APDS-9960 driver instance
    ///
    /// This will verify the `ID` register but will not initialize the device.
    /// Call `init()` after construction to program the default registers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `ID` register holds a value not listed in [`DEVICE_IDS`]
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            device: RegisterDevice::new(interface),
            engine: GestureEngine::new(),
            gesture_config: GestureConfig::default(),
        };

        let id = driver.read_device_id()?;
        if !DEVICE_IDS.contains(&id) {
            return Err(Error::InvalidDevice(id));
        }

        Ok(driver)
    }

    /// Read the `ID` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.id().read()?.id())
    }

    /// Initialize the device with default settings
    ///
    /// Turns every engine off, then programs ambient light and proximity
    /// defaults (4x gains, 100 mA LED, proximity thresholds 0/50) and the
    /// gesture engine from `config`. The gesture interrupt is left disabled
    /// until `enable_gesture_sensor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub fn init(&mut self, config: &GestureConfig) -> Result<(), Error<I::Error>> {
        config.validate().map_err(|_| Error::InvalidConfig)?;

        self.device.enable().write(|_| {})?;

        self.device.atime().write(|w| w.set_atime(defaults::ATIME))?;
        self.device.wtime().write(|w| w.set_wtime(defaults::WTIME))?;
        self.device.ppulse().write(|w| {
            w.set_pplen(defaults::PPULSE >> 6);
            w.set_ppulse(defaults::PPULSE & 0x3F);
        })?;
        self.device.poffset_ur().write(|w| w.set_poffset_ur(0))?;
        self.device.poffset_dl().write(|w| w.set_poffset_dl(0))?;
        self.device.config_1().write(|w| {
            w.set_reserved_7_2(defaults::CONFIG1_FIXED);
            w.set_wlong(false);
        })?;
        self.device.control().write(|w| {
            w.set_ldrive(LedDrive::Ma100 as u8);
            w.set_pgain(ProximityGain::X4 as u8);
            w.set_again(AmbientLightGain::X4 as u8);
        })?;
        self.device.pilt().write(|w| w.set_pilt(defaults::PILT))?;
        self.device.piht().write(|w| w.set_piht(defaults::PIHT))?;

        let [ailt_l, ailt_h] = defaults::AILT.to_le_bytes();
        self.device.ailtl().write(|w| w.set_ailtl(ailt_l))?;
        self.device.ailth().write(|w| w.set_ailth(ailt_h))?;
        let [aiht_l, aiht_h] = defaults::AIHT.to_le_bytes();
        self.device.aihtl().write(|w| w.set_aihtl(aiht_l))?;
        self.device.aihth().write(|w| w.set_aihth(aiht_h))?;

        self.device.pers().write(|w| {
            w.set_ppers(defaults::PPERS);
            w.set_apers(defaults::APERS);
        })?;
        // Bit 0 must be written as 1
        self.device.config_2().write(|w| {
            w.set_reserved_0(1);
            w.set_led_boost(LedBoost::Percent100 as u8);
        })?;
        self.device.config_3().write(|_| {})?;

        self.configure_gesture(config)?;
        self.device.gconf_4().write(|w| {
            w.set_gien(false);
            w.set_gmode(false);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("APDS-9960 initialized: {}", config);

        Ok(())
    }

    /// Enable or disable one bit of the `ENABLE` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mode(&mut self, mode: Mode, enable: bool) -> Result<(), Error<I::Error>> {
        self.device.enable().modify(|w| match mode {
            Mode::Power => w.set_pon(enable),
            Mode::AmbientLight => w.set_aen(enable),
            Mode::Proximity => w.set_pen(enable),
            Mode::Wait => w.set_wen(enable),
            Mode::AmbientLightInterrupt => w.set_aien(enable),
            Mode::ProximityInterrupt => w.set_pien(enable),
            Mode::Gesture => w.set_gesture_en(enable),
        })?;
        Ok(())
    }

    /// Read which engines are enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_enable_status(&mut self) -> Result<EnableStatus, Error<I::Error>> {
        let reg = self.device.enable().read()?;
        Ok(EnableStatus {
            power: reg.pon(),
            ambient_light: reg.aen(),
            proximity: reg.pen(),
            wait: reg.wen(),
            ambient_light_interrupt: reg.aien(),
            proximity_interrupt: reg.pien(),
            gesture: reg.gesture_en(),
        })
    }

    /// Program the gesture engine registers from `config`
    ///
    /// Writes entry/exit thresholds, FIFO threshold, gain, LED drive, wait time,
    /// pulse settings, and clears the four gesture offsets. Does not start the
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub fn configure_gesture(&mut self, config: &GestureConfig) -> Result<(), Error<I::Error>> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        let gconf1 = config.gconf1();
        let gpulse = config.gpulse();

        self.device
            .gpenth()
            .write(|w| w.set_gpenth(config.entry_threshold))?;
        self.device
            .gexth()
            .write(|w| w.set_gexth(config.exit_threshold))?;
        self.device
            .gconf_1()
            .write(|w| {
                w.set_gfifoth(gconf1 >> 6);
                w.set_gexmsk((gconf1 >> 2) & 0x0F);
                w.set_gexpers(gconf1 & 0x03);
            })?;
        self.device.gconf_2().write(|w| {
            w.set_ggain(config.gain as u8);
            w.set_gldrive(config.led_drive as u8);
            w.set_gwtime(config.wait_time as u8);
        })?;
        self.device.goffset_u().write(|w| w.set_goffset_u(0))?;
        self.device.goffset_d().write(|w| w.set_goffset_d(0))?;
        self.device.goffset_l().write(|w| w.set_goffset_l(0))?;
        self.device.goffset_r().write(|w| w.set_goffset_r(0))?;
        self.device.gpulse().write(|w| {
            w.set_gplen(gpulse >> 6);
            w.set_gpulse(gpulse & 0x3F);
        })?;
        self.device.gconf_3().write(|w| w.set_gdims(0))?;

        self.gesture_config = *config;
        Ok(())
    }

    /// Start the gesture engine
    ///
    /// Clears any episode in progress, applies `config`, switches the
    /// proximity engine to gesture timing (WTIME 0xFF, PPULSE 0x89), applies the
    /// LED boost, forces gesture mode and turns on PON, WEN, PEN and GEN.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub fn enable_gesture_sensor(&mut self, config: &GestureConfig) -> Result<(), Error<I::Error>> {
        self.engine.reset();
        self.configure_gesture(config)?;

        self.device.wtime().write(|w| w.set_wtime(GESTURE_MODE_WTIME))?;
        self.device.ppulse().write(|w| {
            w.set_pplen(GESTURE_MODE_PPULSE >> 6);
            w.set_ppulse(GESTURE_MODE_PPULSE & 0x3F);
        })?;
        self.device
            .config_2()
            .modify(|w| w.set_led_boost(config.led_boost as u8))?;
        self.device.gconf_4().modify(|w| {
            w.set_gien(config.interrupt);
            w.set_gmode(true);
        })?;
        self.device.enable().modify(|w| {
            w.set_pon(true);
            w.set_wen(true);
            w.set_pen(true);
            w.set_gesture_en(true);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("gesture engine enabled");

        Ok(())
    }

    /// Stop the gesture engine
    ///
    /// Clears any episode in progress, disables the gesture interrupt, leaves
    /// gesture mode and clears GEN. Other engines are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn disable_gesture_sensor(&mut self) -> Result<(), Error<I::Error>> {
        self.engine.reset();

        self.device.gconf_4().modify(|w| {
            w.set_gien(false);
            w.set_gmode(false);
        })?;
        self.device.enable().modify(|w| w.set_gesture_en(false))?;

        #[cfg(feature = "defmt")]
        defmt::debug!("gesture engine disabled");

        Ok(())
    }

    /// Whether the gesture FIFO holds valid data (`GSTATUS.GVALID`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_gesture_available(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.read_gesture_status()?.valid)
    }

    /// Read the gesture FIFO status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gesture_status(&mut self) -> Result<GestureStatus, Error<I::Error>> {
        let reg = self.device.gstatus().read()?;
        Ok(GestureStatus {
            valid: reg.gvalid(),
            overflow: reg.gfov(),
        })
    }

    /// Number of datasets waiting in the gesture FIFO (`GFLVL`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gesture_fifo_level(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.gflvl().read()?.gflvl())
    }

    /// Drain pending gesture datasets into `buffer`
    ///
    /// Reads as many whole datasets as the FIFO reports, capped by the buffer
    /// size and by [`GESTURE_BUFFER_CAPACITY`], in one burst from `GFIFO_U`.
    /// Returns the number of bytes written (a multiple of four).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gesture_fifo(&mut self, buffer: &mut [u8]) -> Result<usize, Error<I::Error>> {
        let level = usize::from(self.gesture_fifo_level()?);
        let datasets = level
            .min(GESTURE_BUFFER_CAPACITY)
            .min(buffer.len() / BYTES_PER_DATASET);
        let len = datasets * BYTES_PER_DATASET;
        if len == 0 {
            return Ok(0);
        }

        #[allow(clippy::cast_possible_truncation)]
        self.device
            .interface
            .read_register(GFIFO_U_ADDRESS, (len * 8) as u32, &mut buffer[..len])?;

        Ok(len)
    }

    /// Block until a gesture episode ends and return its label
    ///
    /// Returns [`Gesture::None`] straight away when the device is not powered
    /// or the gesture engine is off. Otherwise polls the FIFO every
    /// [`FIFO_PAUSE_TIME_MS`], classifying each batch, until the FIFO stops
    /// producing data after at least one batch (best-effort decode) or the
    /// poll budget runs out ([`Gesture::Timeout`]).
    ///
    /// Episode state is always reset when this returns, including on error.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gesture<D>(&mut self, delay: &mut D) -> Result<Gesture, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let result = self.run_gesture_episode(delay);
        if result.is_err() {
            self.engine.reset();
        }
        result
    }

    fn run_gesture_episode<D>(&mut self, delay: &mut D) -> Result<Gesture, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if !self.read_enable_status()?.gesture_ready() {
            return Ok(Gesture::None);
        }

        let mut fifo = [0u8; FIFO_READ_BYTES];
        loop {
            delay.delay_ms(FIFO_PAUSE_TIME_MS);
            self.engine.start_cycle();

            let status = self.read_gesture_status()?;
            if status.valid && self.engine.within_window() {
                let len = self.read_gesture_fifo(&mut fifo)?;
                if len > 0 {
                    // Near/far decisions surface once the FIFO drains
                    self.engine.ingest(&fifo[..len]);
                    continue;
                }
                if !self.engine.is_active() {
                    continue;
                }
            }

            match self.engine.on_idle() {
                IdleOutcome::Wait => {}
                IdleOutcome::Timeout => return Ok(Gesture::Timeout),
                IdleOutcome::Settle => {
                    delay.delay_ms(FIFO_PAUSE_TIME_MS);
                    return Ok(self.engine.settle());
                }
            }
        }
    }

    /// Like [`read_gesture`](Self::read_gesture), reporting bus failures as [`Gesture::None`]
    pub fn poll_gesture<D>(&mut self, delay: &mut D) -> Gesture
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.read_gesture(delay).unwrap_or_else(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("gesture read failed, reporting NONE");
            Gesture::None
        })
    }

    /// Set the ambient light and color gain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_ambient_light_gain(&mut self, gain: AmbientLightGain) -> Result<(), Error<I::Error>> {
        self.device.control().modify(|w| w.set_again(gain as u8))?;
        Ok(())
    }

    /// Set the proximity gain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_proximity_gain(&mut self, gain: ProximityGain) -> Result<(), Error<I::Error>> {
        self.device.control().modify(|w| w.set_pgain(gain as u8))?;
        Ok(())
    }

    /// Set the LED drive used by the proximity engine
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_led_drive(&mut self, drive: LedDrive) -> Result<(), Error<I::Error>> {
        self.device.control().modify(|w| w.set_ldrive(drive as u8))?;
        Ok(())
    }

    /// Read clear, red, green and blue channel counts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_rgb(&mut self) -> Result<RgbData, Error<I::Error>> {
        // One burst keeps the four channels from the same integration cycle
        let mut buffer = [0u8; 8];
        self.device
            .interface
            .read_register(CDATAL_ADDRESS, 64, &mut buffer)?;
        Ok(RgbData::from_le_bytes(buffer))
    }

    /// Read the clear channel, used as the ambient light level
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_ambient_light(&mut self) -> Result<u16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(CDATAL_ADDRESS, 16, &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Read the 8-bit proximity count
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_proximity(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.pdata().read()?.pdata())
    }
}

#[cfg(feature = "async")]
impl<I> Apds9960Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Create a new APDS-9960 driver instance
    ///
    /// This will verify the `ID` register but will not initialize the device.
    /// Call `init()` after construction to program the default registers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `ID` register holds a value not listed in [`DEVICE_IDS`]
    pub async fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            device: RegisterDevice::new(interface),
            engine: GestureEngine::new(),
            gesture_config: GestureConfig::default(),
        };

        let id = driver.read_device_id().await?;
        if !DEVICE_IDS.contains(&id) {
            return Err(Error::InvalidDevice(id));
        }

        Ok(driver)
    }

    /// Read the `ID` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_device_id(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.id().read_async().await?.id())
    }

    /// Initialize the device with default settings
    ///
    /// Turns every engine off, then programs ambient light and proximity
    /// defaults (4x gains, 100 mA LED, proximity thresholds 0/50) and the
    /// gesture engine from `config`. The gesture interrupt is left disabled
    /// until `enable_gesture_sensor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub async fn init(&mut self, config: &GestureConfig) -> Result<(), Error<I::Error>> {
        config.validate().map_err(|_| Error::InvalidConfig)?;

        self.device.enable().write_async(|_| {}).await?;

        self.device
            .atime()
            .write_async(|w| w.set_atime(defaults::ATIME))
            .await?;
        self.device
            .wtime()
            .write_async(|w| w.set_wtime(defaults::WTIME))
            .await?;
        self.device
            .ppulse()
            .write_async(|w| {
                w.set_pplen(defaults::PPULSE >> 6);
                w.set_ppulse(defaults::PPULSE & 0x3F);
            })
            .await?;
        self.device
            .poffset_ur()
            .write_async(|w| w.set_poffset_ur(0))
            .await?;
        self.device
            .poffset_dl()
            .write_async(|w| w.set_poffset_dl(0))
            .await?;
        self.device
            .config_1()
            .write_async(|w| {
                w.set_reserved_7_2(defaults::CONFIG1_FIXED);
                w.set_wlong(false);
            })
            .await?;
        self.device
            .control()
            .write_async(|w| {
                w.set_ldrive(LedDrive::Ma100 as u8);
                w.set_pgain(ProximityGain::X4 as u8);
                w.set_again(AmbientLightGain::X4 as u8);
            })
            .await?;
        self.device
            .pilt()
            .write_async(|w| w.set_pilt(defaults::PILT))
            .await?;
        self.device
            .piht()
            .write_async(|w| w.set_piht(defaults::PIHT))
            .await?;

        let [ailt_l, ailt_h] = defaults::AILT.to_le_bytes();
        self.device.ailtl().write_async(|w| w.set_ailtl(ailt_l)).await?;
        self.device.ailth().write_async(|w| w.set_ailth(ailt_h)).await?;
        let [aiht_l, aiht_h] = defaults::AIHT.to_le_bytes();
        self.device.aihtl().write_async(|w| w.set_aihtl(aiht_l)).await?;
        self.device.aihth().write_async(|w| w.set_aihth(aiht_h)).await?;

        self.device
            .pers()
            .write_async(|w| {
                w.set_ppers(defaults::PPERS);
                w.set_apers(defaults::APERS);
            })
            .await?;
        // Bit 0 must be written as 1
        self.device
            .config_2()
            .write_async(|w| {
                w.set_reserved_0(1);
                w.set_led_boost(LedBoost::Percent100 as u8);
            })
            .await?;
        self.device.config_3().write_async(|_| {}).await?;

        self.configure_gesture(config).await?;
        self.device
            .gconf_4()
            .write_async(|w| {
                w.set_gien(false);
                w.set_gmode(false);
            })
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("APDS-9960 initialized: {}", config);

        Ok(())
    }

    /// Enable or disable one bit of the `ENABLE` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_mode(&mut self, mode: Mode, enable: bool) -> Result<(), Error<I::Error>> {
        self.device
            .enable()
            .modify_async(|w| match mode {
                Mode::Power => w.set_pon(enable),
                Mode::AmbientLight => w.set_aen(enable),
                Mode::Proximity => w.set_pen(enable),
                Mode::Wait => w.set_wen(enable),
                Mode::AmbientLightInterrupt => w.set_aien(enable),
                Mode::ProximityInterrupt => w.set_pien(enable),
                Mode::Gesture => w.set_gesture_en(enable),
            })
            .await?;
        Ok(())
    }

    /// Read which engines are enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_enable_status(&mut self) -> Result<EnableStatus, Error<I::Error>> {
        let reg = self.device.enable().read_async().await?;
        Ok(EnableStatus {
            power: reg.pon(),
            ambient_light: reg.aen(),
            proximity: reg.pen(),
            wait: reg.wen(),
            ambient_light_interrupt: reg.aien(),
            proximity_interrupt: reg.pien(),
            gesture: reg.gesture_en(),
        })
    }

    /// Program the gesture engine registers from `config`
    ///
    /// Writes entry/exit thresholds, FIFO threshold, gain, LED drive, wait time,
    /// pulse settings, and clears the four gesture offsets. Does not start the
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub async fn configure_gesture(
        &mut self,
        config: &GestureConfig,
    ) -> Result<(), Error<I::Error>> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        let gconf1 = config.gconf1();
        let gpulse = config.gpulse();

        self.device
            .gpenth()
            .write_async(|w| w.set_gpenth(config.entry_threshold))
            .await?;
        self.device
            .gexth()
            .write_async(|w| w.set_gexth(config.exit_threshold))
            .await?;
        self.device
            .gconf_1()
            .write_async(|w| {
                w.set_gfifoth(gconf1 >> 6);
                w.set_gexmsk((gconf1 >> 2) & 0x0F);
                w.set_gexpers(gconf1 & 0x03);
            })
            .await?;
        self.device
            .gconf_2()
            .write_async(|w| {
                w.set_ggain(config.gain as u8);
                w.set_gldrive(config.led_drive as u8);
                w.set_gwtime(config.wait_time as u8);
            })
            .await?;
        self.device
            .goffset_u()
            .write_async(|w| w.set_goffset_u(0))
            .await?;
        self.device
            .goffset_d()
            .write_async(|w| w.set_goffset_d(0))
            .await?;
        self.device
            .goffset_l()
            .write_async(|w| w.set_goffset_l(0))
            .await?;
        self.device
            .goffset_r()
            .write_async(|w| w.set_goffset_r(0))
            .await?;
        self.device
            .gpulse()
            .write_async(|w| {
                w.set_gplen(gpulse >> 6);
                w.set_gpulse(gpulse & 0x3F);
            })
            .await?;
        self.device.gconf_3().write_async(|w| w.set_gdims(0)).await?;

        self.gesture_config = *config;
        Ok(())
    }

    /// Start the gesture engine
    ///
    /// Clears any episode in progress, applies `config`, switches the
    /// proximity engine to gesture timing (WTIME 0xFF, PPULSE 0x89), applies the
    /// LED boost, forces gesture mode and turns on PON, WEN, PEN and GEN.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or communication with the
    /// device fails.
    pub async fn enable_gesture_sensor(
        &mut self,
        config: &GestureConfig,
    ) -> Result<(), Error<I::Error>> {
        self.engine.reset();
        self.configure_gesture(config).await?;

        self.device
            .wtime()
            .write_async(|w| w.set_wtime(GESTURE_MODE_WTIME))
            .await?;
        self.device
            .ppulse()
            .write_async(|w| {
                w.set_pplen(GESTURE_MODE_PPULSE >> 6);
                w.set_ppulse(GESTURE_MODE_PPULSE & 0x3F);
            })
            .await?;
        self.device
            .config_2()
            .modify_async(|w| w.set_led_boost(config.led_boost as u8))
            .await?;
        self.device
            .gconf_4()
            .modify_async(|w| {
                w.set_gien(config.interrupt);
                w.set_gmode(true);
            })
            .await?;
        self.device
            .enable()
            .modify_async(|w| {
                w.set_pon(true);
                w.set_wen(true);
                w.set_pen(true);
                w.set_gesture_en(true);
            })
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("gesture engine enabled");

        Ok(())
    }

    /// Stop the gesture engine
    ///
    /// Clears any episode in progress, disables the gesture interrupt, leaves
    /// gesture mode and clears GEN. Other engines are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn disable_gesture_sensor(&mut self) -> Result<(), Error<I::Error>> {
        self.engine.reset();

        self.device
            .gconf_4()
            .modify_async(|w| {
                w.set_gien(false);
                w.set_gmode(false);
            })
            .await?;
        self.device
            .enable()
            .modify_async(|w| w.set_gesture_en(false))
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("gesture engine disabled");

        Ok(())
    }

    /// Whether the gesture FIFO holds valid data (`GSTATUS.GVALID`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn is_gesture_available(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.read_gesture_status().await?.valid)
    }

    /// Read the gesture FIFO status
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gesture_status(&mut self) -> Result<GestureStatus, Error<I::Error>> {
        let reg = self.device.gstatus().read_async().await?;
        Ok(GestureStatus {
            valid: reg.gvalid(),
            overflow: reg.gfov(),
        })
    }

    /// Number of datasets waiting in the gesture FIFO (`GFLVL`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn gesture_fifo_level(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.gflvl().read_async().await?.gflvl())
    }

    /// Drain pending gesture datasets into `buffer`
    ///
    /// Reads as many whole datasets as the FIFO reports, capped by the buffer
    /// size and by [`GESTURE_BUFFER_CAPACITY`], in one burst from `GFIFO_U`.
    /// Returns the number of bytes written (a multiple of four).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gesture_fifo(&mut self, buffer: &mut [u8]) -> Result<usize, Error<I::Error>> {
        let level = usize::from(self.gesture_fifo_level().await?);
        let datasets = level
            .min(GESTURE_BUFFER_CAPACITY)
            .min(buffer.len() / BYTES_PER_DATASET);
        let len = datasets * BYTES_PER_DATASET;
        if len == 0 {
            return Ok(0);
        }

        #[allow(clippy::cast_possible_truncation)]
        self.device
            .interface
            .read_register(GFIFO_U_ADDRESS, (len * 8) as u32, &mut buffer[..len])
            .await?;

        Ok(len)
    }

    /// Wait until a gesture episode ends and return its label
    ///
    /// Returns [`Gesture::None`] straight away when the device is not powered
    /// or the gesture engine is off. Otherwise polls the FIFO every
    /// [`FIFO_PAUSE_TIME_MS`], classifying each batch, until the FIFO stops
    /// producing data after at least one batch (best-effort decode) or the
    /// poll budget runs out ([`Gesture::Timeout`]).
    ///
    /// Episode state is always reset when this returns, including on error.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal_async::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gesture<D>(&mut self, delay: &mut D) -> Result<Gesture, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let result = self.run_gesture_episode(delay).await;
        if result.is_err() {
            self.engine.reset();
        }
        result
    }

    async fn run_gesture_episode<D>(&mut self, delay: &mut D) -> Result<Gesture, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        if !self.read_enable_status().await?.gesture_ready() {
            return Ok(Gesture::None);
        }

        let mut fifo = [0u8; FIFO_READ_BYTES];
        loop {
            delay.delay_ms(FIFO_PAUSE_TIME_MS).await;
            self.engine.start_cycle();

            let status = self.read_gesture_status().await?;
            if status.valid && self.engine.within_window() {
                let len = self.read_gesture_fifo(&mut fifo).await?;
                if len > 0 {
                    // Near/far decisions surface once the FIFO drains
                    self.engine.ingest(&fifo[..len]);
                    continue;
                }
                if !self.engine.is_active() {
                    continue;
                }
            }

            match self.engine.on_idle() {
                IdleOutcome::Wait => {}
                IdleOutcome::Timeout => return Ok(Gesture::Timeout),
                IdleOutcome::Settle => {
                    delay.delay_ms(FIFO_PAUSE_TIME_MS).await;
                    return Ok(self.engine.settle());
                }
            }
        }
    }

    /// Like [`read_gesture`](Self::read_gesture), reporting bus failures as [`Gesture::None`]
    pub async fn poll_gesture<D>(&mut self, delay: &mut D) -> Gesture
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.read_gesture(delay).await.unwrap_or_else(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("gesture read failed, reporting NONE");
            Gesture::None
        })
    }

    /// Set the ambient light and color gain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_ambient_light_gain(
        &mut self,
        gain: AmbientLightGain,
    ) -> Result<(), Error<I::Error>> {
        self.device
            .control()
            .modify_async(|w| w.set_again(gain as u8))
            .await?;
        Ok(())
    }

    /// Set the proximity gain
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_proximity_gain(&mut self, gain: ProximityGain) -> Result<(), Error<I::Error>> {
        self.device
            .control()
            .modify_async(|w| w.set_pgain(gain as u8))
            .await?;
        Ok(())
    }

    /// Set the LED drive used by the proximity engine
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_led_drive(&mut self, drive: LedDrive) -> Result<(), Error<I::Error>> {
        self.device
            .control()
            .modify_async(|w| w.set_ldrive(drive as u8))
            .await?;
        Ok(())
    }

    /// Read clear, red, green and blue channel counts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_rgb(&mut self) -> Result<RgbData, Error<I::Error>> {
        // One burst keeps the four channels from the same integration cycle
        let mut buffer = [0u8; 8];
        self.device
            .interface
            .read_register(CDATAL_ADDRESS, 64, &mut buffer)
            .await?;
        Ok(RgbData::from_le_bytes(buffer))
    }

    /// Read the clear channel, used as the ambient light level
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_ambient_light(&mut self) -> Result<u16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(CDATAL_ADDRESS, 16, &mut buffer)
            .await?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Read the 8-bit proximity count
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_proximity(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.pdata().read_async().await?.pdata())
    }
}

impl<I> Apds9960Driver<I> {
    /// Episode state of the gesture polling loop
    pub const fn gesture_engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Gesture configuration last written to the device
    pub const fn gesture_config(&self) -> &GestureConfig {
        &self.gesture_config
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }

    /// Get a mutable reference to the underlying register device (for advanced usage)
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<I> {
        &mut self.device
    }
}
