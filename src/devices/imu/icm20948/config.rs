//! ICM-20948 Configuration
//!
//! Range, filter, and rate settings applied during the bring-up handshake.
//! Each setting knows its own register encoding, so the driver only ever asks
//! for the final byte to write. Defaults match the device power-on ranges
//! (±250 °/s, ±2 g) with both low-pass filters enabled and the magnetometer
//! free-running at 100 Hz.

use super::registers;

/// Gyro measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroRange {
    /// ±250 °/s, 131 LSB per °/s
    #[default]
    Dps250,
    /// ±500 °/s, 65.5 LSB per °/s
    Dps500,
    /// ±1000 °/s, 32.8 LSB per °/s
    Dps1000,
    /// ±2000 °/s, 16.4 LSB per °/s
    Dps2000,
}

impl GyroRange {
    /// FS_SEL field, pre-shifted into bits [2:1] of GYRO_CONFIG_1
    pub fn register_value(self) -> u8 {
        let fs_sel: u8 = match self {
            Self::Dps250 => 0,
            Self::Dps500 => 1,
            Self::Dps1000 => 2,
            Self::Dps2000 => 3,
        };
        fs_sel << 1
    }

    /// Factor converting one raw LSB to rad/s at this range
    pub fn scale_to_rad_s(self) -> f32 {
        let lsb_per_dps = match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        };
        registers::DEG_TO_RAD / lsb_per_dps
    }
}

/// Accel measurement range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelRange {
    /// ±2 g, 16384 LSB per g
    #[default]
    G2,
    /// ±4 g, 8192 LSB per g
    G4,
    /// ±8 g, 4096 LSB per g
    G8,
    /// ±16 g, 2048 LSB per g
    G16,
}

impl AccelRange {
    /// FS_SEL field, pre-shifted into bits [2:1] of ACCEL_CONFIG
    pub fn register_value(self) -> u8 {
        let fs_sel: u8 = match self {
            Self::G2 => 0,
            Self::G4 => 1,
            Self::G8 => 2,
            Self::G16 => 3,
        };
        fs_sel << 1
    }

    /// Factor converting one raw LSB to m/s² at this range
    pub fn scale_to_m_s2(self) -> f32 {
        let lsb_per_g = match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        };
        registers::GRAVITY / lsb_per_g
    }
}

/// Gyroscope low-pass filter bandwidth (3 dB point)
///
/// The DLPFCFG field is not monotonic in bandwidth; variants are listed in
/// field order. `register_value` always sets FCHOICE, so writing any variant
/// routes the signal through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroDlpfConfig {
    /// 196.6 Hz
    Bw197Hz,
    /// 151.8 Hz
    #[default]
    Bw152Hz,
    /// 119.5 Hz
    Bw120Hz,
    /// 51.2 Hz
    Bw51Hz,
    /// 23.9 Hz
    Bw24Hz,
    /// 11.6 Hz
    Bw12Hz,
    /// 5.7 Hz
    Bw6Hz,
    /// 361.4 Hz
    Bw361Hz,
}

impl GyroDlpfConfig {
    /// DLPFCFG field in bits [5:3] of GYRO_CONFIG_1, with FCHOICE set
    pub fn register_value(self) -> u8 {
        let cfg: u8 = match self {
            Self::Bw197Hz => 0,
            Self::Bw152Hz => 1,
            Self::Bw120Hz => 2,
            Self::Bw51Hz => 3,
            Self::Bw24Hz => 4,
            Self::Bw12Hz => 5,
            Self::Bw6Hz => 6,
            Self::Bw361Hz => 7,
        };
        (cfg << 3) | registers::GYRO_FCHOICE
    }
}

/// Accelerometer low-pass filter bandwidth (3 dB point)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelDlpfConfig {
    /// 246 Hz
    Bw246Hz,
    /// 111.4 Hz
    #[default]
    Bw111Hz,
    /// 50.4 Hz
    Bw50Hz,
    /// 23.9 Hz
    Bw24Hz,
    /// 11.5 Hz
    Bw12Hz,
    /// 5.7 Hz
    Bw6Hz,
    /// 473 Hz
    Bw473Hz,
}

impl AccelDlpfConfig {
    /// DLPFCFG field in bits [5:3] of ACCEL_CONFIG, with FCHOICE set
    pub fn register_value(self) -> u8 {
        let cfg: u8 = match self {
            Self::Bw246Hz => 0,
            Self::Bw111Hz => 2,
            Self::Bw50Hz => 3,
            Self::Bw24Hz => 4,
            Self::Bw12Hz => 5,
            Self::Bw6Hz => 6,
            Self::Bw473Hz => 7,
        };
        (cfg << 3) | registers::ACCEL_FCHOICE
    }
}

/// AK09916 magnetometer operating mode (CNTL2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagMode {
    /// Power down
    PowerDown,
    /// One measurement on demand, then power down
    SingleMeasure,
    /// Free-running at 10 Hz
    Continuous10Hz,
    /// Free-running at 20 Hz
    Continuous20Hz,
    /// Free-running at 50 Hz
    Continuous50Hz,
    /// Free-running at 100 Hz
    #[default]
    Continuous100Hz,
}

impl MagMode {
    /// CNTL2 mode byte
    pub fn register_value(self) -> u8 {
        match self {
            Self::PowerDown => registers::AK09916_MODE_POWER_DOWN,
            Self::SingleMeasure => registers::AK09916_MODE_SINGLE,
            Self::Continuous10Hz => registers::AK09916_MODE_CONT_10HZ,
            Self::Continuous20Hz => registers::AK09916_MODE_CONT_20HZ,
            Self::Continuous50Hz => registers::AK09916_MODE_CONT_50HZ,
            Self::Continuous100Hz => registers::AK09916_MODE_CONT_100HZ,
        }
    }
}

/// ICM-20948 register bank
///
/// The register map is split across four banks; REG_BANK_SEL switches the
/// active one. The driver caches its selection during normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterBank {
    /// User configuration and sensor data
    #[default]
    Bank0,
    /// Self-test data
    Bank1,
    /// Gyro/accel ranges, filters, and rate dividers
    Bank2,
    /// Internal I2C master configuration
    Bank3,
}

impl RegisterBank {
    /// REG_BANK_SEL byte for this bank
    pub fn register_value(self) -> u8 {
        match self {
            Self::Bank0 => registers::BANK_0,
            Self::Bank1 => registers::BANK_1,
            Self::Bank2 => registers::BANK_2,
            Self::Bank3 => registers::BANK_3,
        }
    }
}

/// Full settings bundle handed to the driver at construction
#[derive(Debug, Clone, Copy)]
pub struct Icm20948Config {
    /// Gyro range, also fixing the rad/s scale factor
    pub gyro_range: GyroRange,

    /// Accel range, also fixing the m/s² scale factor
    pub accel_range: AccelRange,

    /// Gyroscope low-pass filter
    pub gyro_dlpf: GyroDlpfConfig,

    /// Accelerometer low-pass filter
    pub accel_dlpf: AccelDlpfConfig,

    /// Gyro output data rate divider: ODR = 1.125 kHz / (1 + div)
    pub gyro_sample_rate_div: u8,

    /// Accel output data rate divider, 12-bit: ODR = 1.125 kHz / (1 + div)
    pub accel_sample_rate_div: u16,

    /// Magnetometer operating mode
    pub mag_mode: MagMode,

    /// Bus address, 0x68 or 0x69 depending on the AD0 pin
    pub i2c_address: u8,
}

impl Default for Icm20948Config {
    fn default() -> Self {
        Self {
            gyro_range: GyroRange::default(),
            accel_range: AccelRange::default(),
            gyro_dlpf: GyroDlpfConfig::default(),
            accel_dlpf: AccelDlpfConfig::default(),
            gyro_sample_rate_div: 0,
            accel_sample_rate_div: 0,
            mag_mode: MagMode::default(),
            i2c_address: registers::ICM20948_ADDR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_field_encodings() {
        // FS_SEL occupies bits [2:1]
        assert_eq!(GyroRange::Dps250.register_value(), 0x00);
        assert_eq!(GyroRange::Dps2000.register_value(), 0x06);
        assert_eq!(AccelRange::G2.register_value(), 0x00);
        assert_eq!(AccelRange::G16.register_value(), 0x06);
    }

    #[test]
    fn test_dlpf_encodings_enable_filter() {
        // DLPFCFG in bits [5:3], FCHOICE in bit 0
        assert_eq!(GyroDlpfConfig::Bw152Hz.register_value(), 0x09);
        assert_eq!(AccelDlpfConfig::Bw111Hz.register_value(), 0x11);
        assert_eq!(GyroDlpfConfig::Bw361Hz.register_value(), 0x39);
    }

    #[test]
    fn test_gyro_scale_tracks_range() {
        let fine = GyroRange::Dps250.scale_to_rad_s();
        let coarse = GyroRange::Dps2000.scale_to_rad_s();

        // One LSB covers 131 / 16.4 times more rotation at ±2000 °/s
        assert!((coarse / fine - 131.0 / 16.4).abs() < 1e-4);
        assert!((fine - core::f32::consts::PI / 180.0 / 131.0).abs() < 1e-9);
    }

    #[test]
    fn test_accel_scale_tracks_range() {
        let scale = AccelRange::G2.scale_to_m_s2();
        assert!((scale - 9.80665 / 16384.0).abs() < 1e-9);

        // Full-scale raw reading lands on the range limit
        let at_limit = 32768.0 * AccelRange::G8.scale_to_m_s2();
        assert!((at_limit - 8.0 * 9.80665).abs() < 1e-2);
    }

    #[test]
    fn test_default_matches_power_on_ranges() {
        let config = Icm20948Config::default();
        assert_eq!(config.gyro_range, GyroRange::Dps250);
        assert_eq!(config.accel_range, AccelRange::G2);
        assert_eq!(config.mag_mode, MagMode::Continuous100Hz);
        assert_eq!(config.gyro_sample_rate_div, 0);
        assert_eq!(config.i2c_address, 0x68);
    }

    #[test]
    fn test_alternate_bus_address() {
        let config = Icm20948Config {
            i2c_address: registers::ICM20948_ADDR_ALT,
            ..Default::default()
        };
        assert_eq!(config.i2c_address, 0x69);
    }

    #[test]
    fn test_bank_select_bytes() {
        assert_eq!(RegisterBank::Bank0.register_value(), 0x00);
        assert_eq!(RegisterBank::Bank2.register_value(), 0x20);
        assert_eq!(RegisterBank::Bank3.register_value(), 0x30);
    }

    #[test]
    fn test_mag_mode_bytes() {
        assert_eq!(MagMode::PowerDown.register_value(), 0x00);
        assert_eq!(MagMode::SingleMeasure.register_value(), 0x01);
        assert_eq!(MagMode::Continuous100Hz.register_value(), 0x08);
    }
}
