//! Device traits
//!
//! This module contains hardware-independent trait definitions for device drivers.
//! These traits enable:
//! - Unit testing with scripted implementations
//! - Sensor independence for the acquisition loop
//! - Future hardware upgrades without pipeline changes

pub mod imu;

pub use imu::{Axis, AxesSample, ImuError, ImuSensor, NUM_AXES};
