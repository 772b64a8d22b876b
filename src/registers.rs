//! Register definitions for the APDS-9960
//!
//! The APDS-9960 exposes a flat 8-bit register map starting at 0x80. Multi-byte
//! values (channel data, light thresholds) are split into low/high registers and
//! are combined little-endian by the driver.
//!
//! ## Register groups
//! - **0x80-0x9F**: Engine enable, timing, ambient light and proximity
//! - **0xA0-0xAF**: Gesture engine configuration and FIFO status
//! - **0xFC-0xFF**: Gesture FIFO data (burst readable from 0xFC)

device_driver::create_device!(
    device_name: Apds9960,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        // ==================== ENGINE CONTROL ====================

        /// ENABLE - Engine Enable (0x80)
        register Enable {
            const ADDRESS = 0x80;
            const SIZE_BITS = 8;

            /// Power on
            pon: bool = 0,
            /// Ambient light (ALS) enable
            aen: bool = 1,
            /// Proximity detect enable
            pen: bool = 2,
            /// Wait timer enable
            wen: bool = 3,
            /// ALS interrupt enable
            aien: bool = 4,
            /// Proximity interrupt enable
            pien: bool = 5,
            /// Gesture engine enable
            gesture_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// ATIME - ALS ADC Integration Time (0x81)
        register Atime {
            const ADDRESS = 0x81;
            const SIZE_BITS = 8;

            /// Integration time, 2.78 ms per step counted down from 256
            atime: uint = 0..8,
        },

        /// WTIME - Wait Time (0x83)
        register Wtime {
            const ADDRESS = 0x83;
            const SIZE_BITS = 8;

            /// Wait time, 2.78 ms per step counted down from 256
            wtime: uint = 0..8,
        },

        /// AILTL - ALS Interrupt Low Threshold, low byte (0x84)
        register Ailtl {
            const ADDRESS = 0x84;
            const SIZE_BITS = 8;

            ailtl: uint = 0..8,
        },

        /// AILTH - ALS Interrupt Low Threshold, high byte (0x85)
        register Ailth {
            const ADDRESS = 0x85;
            const SIZE_BITS = 8;

            ailth: uint = 0..8,
        },

        /// AIHTL - ALS Interrupt High Threshold, low byte (0x86)
        register Aihtl {
            const ADDRESS = 0x86;
            const SIZE_BITS = 8;

            aihtl: uint = 0..8,
        },

        /// AIHTH - ALS Interrupt High Threshold, high byte (0x87)
        register Aihth {
            const ADDRESS = 0x87;
            const SIZE_BITS = 8;

            aihth: uint = 0..8,
        },

        /// PILT - Proximity Interrupt Low Threshold (0x89)
        register Pilt {
            const ADDRESS = 0x89;
            const SIZE_BITS = 8;

            pilt: uint = 0..8,
        },

        /// PIHT - Proximity Interrupt High Threshold (0x8B)
        register Piht {
            const ADDRESS = 0x8B;
            const SIZE_BITS = 8;

            piht: uint = 0..8,
        },

        /// PERS - Interrupt Persistence Filters (0x8C)
        register Pers {
            const ADDRESS = 0x8C;
            const SIZE_BITS = 8;

            /// ALS interrupt persistence
            apers: uint = 0..4,
            /// Proximity interrupt persistence
            ppers: uint = 4..8,
        },

        /// CONFIG1 - Configuration Register One (0x8D)
        register Config1 {
            const ADDRESS = 0x8D;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Multiply WTIME by 12
            wlong: bool = 1,
            /// Must be written as 0b011000
            reserved_7_2: uint = 2..8,
        },

        /// PPULSE - Proximity Pulse Count and Length (0x8E)
        register Ppulse {
            const ADDRESS = 0x8E;
            const SIZE_BITS = 8;

            /// Pulse count minus one
            ppulse: uint = 0..6,
            /// Pulse length (0=4us, 1=8us, 2=16us, 3=32us)
            pplen: uint = 6..8,
        },

        /// CONTROL - Gain Control (0x8F)
        register Control {
            const ADDRESS = 0x8F;
            const SIZE_BITS = 8;

            /// ALS and color gain
            again: uint = 0..2,
            /// Proximity gain
            pgain: uint = 2..4,
            reserved_5_4: uint = 4..6,
            /// LED drive strength
            ldrive: uint = 6..8,
        },

        /// CONFIG2 - Configuration Register Two (0x90)
        register Config2 {
            const ADDRESS = 0x90;
            const SIZE_BITS = 8;

            /// Must be written as 1
            reserved_0: uint = 0..1,
            reserved_3_1: uint = 1..4,
            /// Additional LED current during proximity and gesture
            led_boost: uint = 4..6,
            /// Clear photodiode saturation interrupt enable
            cpsien: bool = 6,
            /// Proximity saturation interrupt enable
            psien: bool = 7,
        },

        /// ID - Device ID (0x92)
        register Id {
            const ADDRESS = 0x92;
            const SIZE_BITS = 8;

            /// Device ID (0xAB on production parts)
            id: uint = 0..8,
        },

        /// STATUS - Device Status (0x93)
        register Status {
            const ADDRESS = 0x93;
            const SIZE_BITS = 8;

            /// ALS data valid
            avalid: bool = 0,
            /// Proximity data valid
            pvalid: bool = 1,
            /// Gesture interrupt
            gint: bool = 2,
            reserved_3: uint = 3..4,
            /// ALS interrupt
            aint: bool = 4,
            /// Proximity interrupt
            pint: bool = 5,
            /// Proximity/gesture saturation
            pgsat: bool = 6,
            /// Clear photodiode saturation
            cpsat: bool = 7,
        },

        // ==================== CHANNEL DATA ====================

        /// CDATAL - Clear channel data, low byte (0x94)
        register Cdatal {
            const ADDRESS = 0x94;
            const SIZE_BITS = 8;

            cdatal: uint = 0..8,
        },

        /// CDATAH - Clear channel data, high byte (0x95)
        register Cdatah {
            const ADDRESS = 0x95;
            const SIZE_BITS = 8;

            cdatah: uint = 0..8,
        },

        /// RDATAL - Red channel data, low byte (0x96)
        register Rdatal {
            const ADDRESS = 0x96;
            const SIZE_BITS = 8;

            rdatal: uint = 0..8,
        },

        /// RDATAH - Red channel data, high byte (0x97)
        register Rdatah {
            const ADDRESS = 0x97;
            const SIZE_BITS = 8;

            rdatah: uint = 0..8,
        },

        /// GDATAL - Green channel data, low byte (0x98)
        register Gdatal {
            const ADDRESS = 0x98;
            const SIZE_BITS = 8;

            gdatal: uint = 0..8,
        },

        /// GDATAH - Green channel data, high byte (0x99)
        register Gdatah {
            const ADDRESS = 0x99;
            const SIZE_BITS = 8;

            gdatah: uint = 0..8,
        },

        /// BDATAL - Blue channel data, low byte (0x9A)
        register Bdatal {
            const ADDRESS = 0x9A;
            const SIZE_BITS = 8;

            bdatal: uint = 0..8,
        },

        /// BDATAH - Blue channel data, high byte (0x9B)
        register Bdatah {
            const ADDRESS = 0x9B;
            const SIZE_BITS = 8;

            bdatah: uint = 0..8,
        },

        /// PDATA - Proximity data (0x9C)
        register Pdata {
            const ADDRESS = 0x9C;
            const SIZE_BITS = 8;

            pdata: uint = 0..8,
        },

        /// POFFSET_UR - Proximity offset, up/right photodiodes (0x9D)
        register PoffsetUr {
            const ADDRESS = 0x9D;
            const SIZE_BITS = 8;

            poffset_ur: uint = 0..8,
        },

        /// POFFSET_DL - Proximity offset, down/left photodiodes (0x9E)
        register PoffsetDl {
            const ADDRESS = 0x9E;
            const SIZE_BITS = 8;

            poffset_dl: uint = 0..8,
        },

        /// CONFIG3 - Configuration Register Three (0x9F)
        register Config3 {
            const ADDRESS = 0x9F;
            const SIZE_BITS = 8;

            /// Photodiode mask (right, left, down, up)
            pmask: uint = 0..4,
            /// Sleep after interrupt
            sai: bool = 4,
            /// Proximity gain compensation
            pcmp: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        // ==================== GESTURE ENGINE ====================

        /// GPENTH - Gesture Proximity Enter Threshold (0xA0)
        register Gpenth {
            const ADDRESS = 0xA0;
            const SIZE_BITS = 8;

            gpenth: uint = 0..8,
        },

        /// GEXTH - Gesture Exit Threshold (0xA1)
        register Gexth {
            const ADDRESS = 0xA1;
            const SIZE_BITS = 8;

            gexth: uint = 0..8,
        },

        /// GCONF1 - Gesture Configuration One (0xA2)
        register Gconf1 {
            const ADDRESS = 0xA2;
            const SIZE_BITS = 8;

            /// Gesture exit persistence
            gexpers: uint = 0..2,
            /// Gesture exit mask (U, D, L, R)
            gexmsk: uint = 2..6,
            /// FIFO threshold for gesture interrupt (1, 4, 8 or 16 datasets)
            gfifoth: uint = 6..8,
        },

        /// GCONF2 - Gesture Configuration Two (0xA3)
        register Gconf2 {
            const ADDRESS = 0xA3;
            const SIZE_BITS = 8;

            /// Gesture wait time between cycles
            gwtime: uint = 0..3,
            /// Gesture LED drive strength
            gldrive: uint = 3..5,
            /// Gesture gain
            ggain: uint = 5..7,
            reserved_7: uint = 7..8,
        },

        /// GOFFSET_U - Gesture UP offset (0xA4)
        register GoffsetU {
            const ADDRESS = 0xA4;
            const SIZE_BITS = 8;

            goffset_u: uint = 0..8,
        },

        /// GOFFSET_D - Gesture DOWN offset (0xA5)
        register GoffsetD {
            const ADDRESS = 0xA5;
            const SIZE_BITS = 8;

            goffset_d: uint = 0..8,
        },

        /// GPULSE - Gesture Pulse Count and Length (0xA6)
        register Gpulse {
            const ADDRESS = 0xA6;
            const SIZE_BITS = 8;

            /// Pulse count minus one
            gpulse: uint = 0..6,
            /// Pulse length (0=4us, 1=8us, 2=16us, 3=32us)
            gplen: uint = 6..8,
        },

        /// GOFFSET_L - Gesture LEFT offset (0xA7)
        register GoffsetL {
            const ADDRESS = 0xA7;
            const SIZE_BITS = 8;

            goffset_l: uint = 0..8,
        },

        /// GOFFSET_R - Gesture RIGHT offset (0xA9)
        register GoffsetR {
            const ADDRESS = 0xA9;
            const SIZE_BITS = 8;

            goffset_r: uint = 0..8,
        },

        /// GCONF3 - Gesture Configuration Three (0xAA)
        register Gconf3 {
            const ADDRESS = 0xAA;
            const SIZE_BITS = 8;

            /// Gesture dimension select (0 = all photodiodes)
            gdims: uint = 0..2,
            reserved_7_2: uint = 2..8,
        },

        /// GCONF4 - Gesture Configuration Four (0xAB)
        register Gconf4 {
            const ADDRESS = 0xAB;
            const SIZE_BITS = 8;

            /// Gesture mode (state machine running)
            gmode: bool = 0,
            /// Gesture interrupt enable
            gien: bool = 1,
            /// Clear gesture FIFO, GINT, GVALID, GFOV and GFLVL
            gfifo_clr: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// GFLVL - Gesture FIFO Level (0xAE)
        register Gflvl {
            const ADDRESS = 0xAE;
            const SIZE_BITS = 8;

            /// Number of datasets (U/D/L/R quadruples) in the FIFO
            gflvl: uint = 0..8,
        },

        /// GSTATUS - Gesture Status (0xAF)
        register Gstatus {
            const ADDRESS = 0xAF;
            const SIZE_BITS = 8;

            /// Gesture FIFO data valid
            gvalid: bool = 0,
            /// Gesture FIFO overflow
            gfov: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// GFIFO_U - Gesture FIFO UP value (0xFC)
        ///
        /// Burst reads starting here return U, D, L, R for each dataset in turn.
        register GfifoU {
            const ADDRESS = 0xFC;
            const SIZE_BITS = 8;

            gfifo_u: uint = 0..8,
        },
    }
);

// Re-export commonly used types for convenience
pub use Apds9960 as RegisterDevice;

/// Address of the first gesture FIFO register, used for burst reads
pub const GFIFO_U_ADDRESS: u8 = 0xFC;
