//! ICM-20948 and AK09916 register map
//!
//! Addresses and bit definitions the driver touches, nothing more. The
//! ICM-20948 splits its map across four banks selected through REG_BANK_SEL
//! (reachable at 0x7F from every bank); the AK09916 magnetometer inside the
//! package answers as its own bus device once bypass mode is open.
//!
//! Field encodings that depend on a chosen setting (full-scale ranges, DLPF
//! bandwidths) live with the config types instead of here.

// =============================================================================
// Bus addresses
// =============================================================================

/// ICM-20948 with AD0 low
pub const ICM20948_ADDR: u8 = 0x68;

/// ICM-20948 with AD0 high
pub const ICM20948_ADDR_ALT: u8 = 0x69;

/// AK09916 magnetometer (visible only in bypass mode)
pub const AK09916_ADDR: u8 = 0x0C;

// =============================================================================
// Bank selection
// =============================================================================

/// Bank select register, present at the same address in every bank
pub const REG_BANK_SEL: u8 = 0x7F;

/// User bank: control, status, and sensor data
pub const BANK_0: u8 = 0x00;

/// Self-test bank
pub const BANK_1: u8 = 0x10;

/// Sensor configuration bank
pub const BANK_2: u8 = 0x20;

/// Internal I2C master bank
pub const BANK_3: u8 = 0x30;

// =============================================================================
// Bank 0
// =============================================================================

/// Device identity, reads 0xEA
pub const WHO_AM_I: u8 = 0x00;

/// User control (DMP/FIFO/I2C-master enables)
pub const USER_CTRL: u8 = 0x03;

/// Power management 1: reset, sleep, clock source
pub const PWR_MGMT_1: u8 = 0x06;

/// Power management 2: per-sensor enables
pub const PWR_MGMT_2: u8 = 0x07;

/// Interrupt pin configuration, carries the bypass enable bit
pub const INT_PIN_CFG: u8 = 0x0F;

/// Interrupt status 1, carries the raw-data-ready flag
pub const INT_STATUS_1: u8 = 0x1A;

/// First byte of the accel/gyro output block
///
/// ACCEL_XOUT_H through GYRO_ZOUT_L form a 12-byte window: accel XYZ then
/// gyro XYZ, each axis a big-endian i16. The driver reads the whole window
/// in one burst.
pub const ACCEL_XOUT_H: u8 = 0x2D;

// =============================================================================
// Bank 2
// =============================================================================

/// Gyro output data rate divider
pub const GYRO_SMPLRT_DIV: u8 = 0x00;

/// Gyro range, filter, and filter-enable fields
pub const GYRO_CONFIG_1: u8 = 0x01;

/// Aligns gyro and accel output data rates when set
pub const ODR_ALIGN_EN: u8 = 0x09;

/// Accel output data rate divider, upper 4 bits
pub const ACCEL_SMPLRT_DIV_1: u8 = 0x10;

/// Accel output data rate divider, lower 8 bits
pub const ACCEL_SMPLRT_DIV_2: u8 = 0x11;

/// Accel range, filter, and filter-enable fields
pub const ACCEL_CONFIG: u8 = 0x14;

// =============================================================================
// Identity and bit definitions
// =============================================================================

/// Expected WHO_AM_I readback
pub const ICM20948_WHO_AM_I_VALUE: u8 = 0xEA;

/// PWR_MGMT_1: soft reset, self-clears when the device restarts
pub const PWR_MGMT_1_DEVICE_RESET: u8 = 0x80;

/// PWR_MGMT_1: pick the best available clock automatically
pub const PWR_MGMT_1_CLKSEL_AUTO: u8 = 0x01;

/// PWR_MGMT_2: all accel and gyro axes running
pub const PWR_MGMT_2_ENABLE_ALL: u8 = 0x00;

/// INT_PIN_CFG: connect the auxiliary bus straight to the host bus
pub const INT_PIN_CFG_BYPASS_EN: u8 = 0x02;

/// INT_STATUS_1: new accel/gyro data has landed in the output block
///
/// Cleared by reading the status register, so checking it consumes it.
pub const INT_STATUS_1_RAW_DATA_0_RDY: u8 = 0x01;

/// GYRO_CONFIG_1: route the gyro signal through the DLPF
pub const GYRO_FCHOICE: u8 = 0x01;

/// ACCEL_CONFIG: route the accel signal through the DLPF
pub const ACCEL_FCHOICE: u8 = 0x01;

// =============================================================================
// AK09916 magnetometer
// =============================================================================

/// Device identity (WIA2), reads 0x09
pub const AK09916_WIA2: u8 = 0x01;

/// Status 1: data ready
pub const AK09916_ST1: u8 = 0x10;

/// First measurement byte
///
/// HXL through ST2 span 9 bytes: ST1-relative, the layout is status, three
/// little-endian i16 axes, a dummy byte, then ST2. Reading must run through
/// ST2 to close the measurement and re-arm DRDY.
pub const AK09916_HXL: u8 = 0x11;

/// Status 2: overflow flag, read closes the measurement
pub const AK09916_ST2: u8 = 0x18;

/// Control 2: operating mode
pub const AK09916_CNTL2: u8 = 0x31;

/// Control 3: soft reset
pub const AK09916_CNTL3: u8 = 0x32;

/// Expected WIA2 readback
pub const AK09916_WHO_AM_I_VALUE: u8 = 0x09;

/// ST1: a completed measurement is waiting
pub const AK09916_ST1_DRDY: u8 = 0x01;

/// ST2: the measurement overflowed the sensor's magnetic range
pub const AK09916_ST2_HOFL: u8 = 0x08;

/// CNTL2: power down
pub const AK09916_MODE_POWER_DOWN: u8 = 0x00;

/// CNTL2: single measurement
pub const AK09916_MODE_SINGLE: u8 = 0x01;

/// CNTL2: continuous, 10 Hz
pub const AK09916_MODE_CONT_10HZ: u8 = 0x02;

/// CNTL2: continuous, 20 Hz
pub const AK09916_MODE_CONT_20HZ: u8 = 0x04;

/// CNTL2: continuous, 50 Hz
pub const AK09916_MODE_CONT_50HZ: u8 = 0x06;

/// CNTL2: continuous, 100 Hz
pub const AK09916_MODE_CONT_100HZ: u8 = 0x08;

/// CNTL3: soft reset, self-clears
pub const AK09916_CNTL3_SRST: u8 = 0x01;

// =============================================================================
// Conversion constants
// =============================================================================

/// AK09916 output scale: ±4912 µT over the 16-bit range
pub const MAG_SENSITIVITY: f32 = 4912.0 / 32752.0;

/// Degrees to radians
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Standard gravity, m/s²
pub const GRAVITY: f32 = 9.80665;
