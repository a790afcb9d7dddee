//! IMU Drivers
//!
//! This module contains 9-axis sensor drivers implementing the `ImuSensor` trait.
//!
//! ## Available Drivers
//!
//! - `mock`: Scripted simulated sensor (always available; no bus required)
//! - `icm20948`: ICM-20948 I2C driver for real hardware
//!
//! Which driver an acquisition node runs against is decided where it is
//! constructed, never by conditional compilation in shared code.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_source::devices::imu::MockImu;
//! use imu_source::devices::traits::ImuSensor;
//!
//! let mut imu = MockImu::new();
//! imu.initialize()?;
//! let sample = imu.read_axes()?;
//! ```

pub mod icm20948;
pub mod mock;

pub use icm20948::Icm20948;
pub use mock::MockImu;
