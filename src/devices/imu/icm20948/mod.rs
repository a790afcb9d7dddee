//! ICM-20948 driver module
//!
//! Blocking driver for TDK InvenSense's ICM-20948, a 9-axis part pairing a
//! gyro/accel die with an AK09916 magnetometer behind an internal
//! multiplexer.
//!
//! ## Features
//!
//! - Gyro ranges ±250 to ±2000 °/s, accel ranges ±2 to ±16 g
//! - Magnetometer full scale ±4912 µT
//! - Banked register map handled behind a cached selector
//! - Data-ready gated polling, suitable for once-per-cycle reads
//!
//! ## Usage
//!
//! ```ignore
//! use imu_source::devices::imu::icm20948::{Icm20948, Icm20948Config};
//! use imu_source::devices::traits::ImuSensor;
//!
//! let mut sensor = Icm20948::new(i2c, delay, Icm20948Config::default());
//! sensor.initialize()?;
//! if let Some(sample) = sensor.read_axes()? {
//!     // publish sample
//! }
//! ```

mod config;
mod driver;
mod registers;

pub use config::{
    AccelDlpfConfig, AccelRange, GyroDlpfConfig, GyroRange, Icm20948Config, MagMode, RegisterBank,
};
pub use driver::Icm20948;
