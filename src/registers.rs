//! Register maps for the three GY-85 chips
//!
//! Addresses and field layouts follow the ADXL345, ITG3205 and QMC5883L
//! datasheets. Each chip has its own module; field descriptors are the
//! masks/shifts consumed by [`update_field`](crate::field::update_field).

/// ADXL345 accelerometer registers
pub mod adxl345 {
    use crate::field::BitField;

    /// Device ID (reads 0xE5)
    pub const DEVID: u8 = 0x00;
    /// Tap threshold
    pub const THRESH_TAP: u8 = 0x1D;
    /// X-axis offset
    pub const OFSX: u8 = 0x1E;
    /// Y-axis offset
    pub const OFSY: u8 = 0x1F;
    /// Z-axis offset
    pub const OFSZ: u8 = 0x20;
    /// Data rate and power mode control
    pub const BW_RATE: u8 = 0x2C;
    /// Power-saving features control
    pub const POWER_CTL: u8 = 0x2D;
    /// Interrupt enable control
    pub const INT_ENABLE: u8 = 0x2E;
    /// Interrupt mapping control
    pub const INT_MAP: u8 = 0x2F;
    /// Source of interrupts
    pub const INT_SOURCE: u8 = 0x30;
    /// Data format control
    pub const DATA_FORMAT: u8 = 0x31;
    /// First data register (X low byte); X1, Y0, Y1, Z0, Z1 follow
    pub const DATAX0: u8 = 0x32;
    /// Z-axis high byte, last data register
    pub const DATAZ1: u8 = 0x37;
    /// FIFO control
    pub const FIFO_CTL: u8 = 0x38;
    /// FIFO status
    pub const FIFO_STATUS: u8 = 0x39;

    /// `POWER_CTL` value with only the Measure bit set
    pub const POWER_CTL_MEASURE: u8 = 0x08;

    /// Range bits of `DATA_FORMAT` (the whole low nibble is rewritten)
    pub const RANGE: BitField = BitField::new(0x0F, 0);
    /// Rate bits of `BW_RATE`
    pub const RATE: BitField = BitField::new(0x0F, 0);
    /// Mode bits of `FIFO_CTL`
    pub const FIFO_MODE: BitField = BitField::new(0b1100_0000, 6);
    /// `DATA_READY` bit of `INT_ENABLE`
    pub const DATA_READY_INT: BitField = BitField::new(0b1000_0000, 7);
    /// Sleep bit of `POWER_CTL`
    pub const SLEEP: BitField = BitField::new(0b0000_0100, 2);
}

/// ITG3205 gyroscope registers
pub mod itg3205 {
    use crate::field::BitField;

    /// Who-am-I (I2C address bits)
    pub const WHO_AM_I: u8 = 0x00;
    /// Sample rate divider
    pub const SMPLRT_DIV: u8 = 0x15;
    /// Combined low-pass filter and full-scale selection
    pub const DLPF_FS: u8 = 0x16;
    /// Interrupt configuration
    pub const INT_CFG: u8 = 0x17;
    /// Interrupt status
    pub const INT_STATUS: u8 = 0x1A;
    /// Temperature high byte
    pub const TEMP_OUT_H: u8 = 0x1B;
    /// First gyro data register (X high byte); five more bytes follow
    pub const GYRO_XOUT_H: u8 = 0x1D;
    /// Power management
    pub const PWR_MGM: u8 = 0x3E;

    /// `PWR_MGM` value selecting the internal oscillator, all axes active
    pub const PWR_MGM_INTERNAL_OSC: u8 = 0x00;
    /// `PWR_MGM` soft reset bit
    pub const PWR_MGM_RESET: u8 = 0x80;
    /// Default divider: 1 kHz internal rate / (7 + 1) = 125 Hz
    pub const SMPLRT_DIV_DEFAULT: u8 = 0x07;
    /// Default `DLPF_FS`: `FS_SEL` = 3 (±2000 °/s), `DLPF_CFG` = 6
    pub const DLPF_FS_DEFAULT: u8 = 0x1E;
    /// `INT_CFG` bit clearing the interrupt status on any register read
    pub const INT_ANYRD_2CLEAR: u8 = 0b0001_0000;

    /// `FS_SEL` bits of `DLPF_FS`
    pub const FULL_SCALE: BitField = BitField::new(0b0001_1000, 3);
    /// `DLPF_CFG` bits of `DLPF_FS`
    pub const LOW_PASS_FILTER: BitField = BitField::new(0b0000_0111, 0);
    /// Sleep bit of `PWR_MGM`
    pub const SLEEP: BitField = BitField::new(0b0100_0000, 6);
}

/// QMC5883L magnetometer registers
pub mod qmc5883l {
    use crate::field::BitField;

    /// First data register (X low byte); five more bytes follow
    pub const DATA: u8 = 0x00;
    /// Status register
    pub const STATUS: u8 = 0x06;
    /// Temperature low byte
    pub const TEMP_L: u8 = 0x07;
    /// Control register 1: mode, output rate, scale, oversample
    pub const CONFIG_A: u8 = 0x09;
    /// Control register 2: interrupt enable, pointer roll-over, soft reset
    pub const CONFIG_B: u8 = 0x0A;
    /// SET/RESET period
    pub const PERIOD: u8 = 0x0B;
    /// Chip ID
    pub const CHIP_ID: u8 = 0x0D;

    /// Recommended SET/RESET period value from the datasheet
    pub const PERIOD_DEFAULT: u8 = 0x01;
    /// `CONFIG_B` soft reset bit
    pub const CONFIG_B_SOFT_RESET: u8 = 0x80;
    /// `CONFIG_B` interrupt pin disable bit
    pub const CONFIG_B_INT_DISABLE: u8 = 0x01;

    /// Mode bits of `CONFIG_A`
    pub const MODE: BitField = BitField::new(0b0000_0011, 0);
    /// Output data rate bits of `CONFIG_A`
    pub const OUTPUT_RATE: BitField = BitField::new(0b0000_1100, 2);
    /// Full-scale bits of `CONFIG_A`
    pub const SCALE: BitField = BitField::new(0b0011_0000, 4);
    /// Oversample ratio bits of `CONFIG_A`
    pub const OVER_SAMPLE: BitField = BitField::new(0b1100_0000, 6);
}
