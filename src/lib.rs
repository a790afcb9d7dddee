#![cfg_attr(not(test), no_std)]

//! imu_source - 9-axis IMU acquisition node for sample pipelines
//!
//! This library provides an ICM-20948 driver behind a sensor trait, a minimal
//! host pipeline contract, and the acquisition node that publishes nine IMU
//! axes into fixed host channels every cycle.

// Core systems (logging, settings documents)
pub mod core;

// Device drivers behind embedded-hal traits
pub mod devices;

// Host pipeline contract (channels, frames, events, node trait)
pub mod pipeline;

// The IMU source node itself
pub mod acquisition;
