//! Device drivers
//!
//! This module contains sensor drivers written against `embedded-hal` traits,
//! keeping them independent of any particular board or bus peripheral.
//!
//! ## Modules
//!
//! - `imu`: 9-axis IMU implementations (ICM-20948, mock)
//! - `traits`: Device trait definitions (ImuSensor, etc.)

pub mod imu;
pub mod traits;
