//! Outdoor-air reactive slab setpoints and radiant ceiling panel control planning.

pub mod config;
/// Radiant control strategies and per-zone loop planning.
pub mod controls;
pub mod design;
pub mod error;
pub mod io;
pub mod logging;
pub mod outputs;
/// Day profiles, availability windows and the named schedule registry.
pub mod schedule;
/// Rolling mean, calibration and clamped setpoint synthesis.
pub mod setpoint;
pub mod units;
pub mod weather;
