//! Core infrastructure
//!
//! This module contains the cross-cutting pieces of the acquisition stack:
//! the logging macros and the persisted-settings value model.

pub mod logging;
pub mod parameters;
