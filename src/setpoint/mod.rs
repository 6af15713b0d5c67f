//! Outdoor-air-reactive slab setpoint synthesis.
//!
//! A temperature series is smoothed with a circular rolling mean, mapped
//! through a two-point calibration line, and clamped to the setpoint range
//! spanned by the anchors.

pub mod calibration;
pub mod series;
pub mod summary;
pub mod synth;

pub use calibration::{CalibrationPoint, PiecewiseLinearMap, clamp, fit_setpoint};
pub use series::{RollingAverageSeries, TemperatureSeries, rolling_average};
pub use summary::SetpointSummary;
pub use synth::{ClampedSetpointSeries, SetpointSynthesizer, synthesize};
