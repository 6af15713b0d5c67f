//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Input-validation failures of the setpoint synthesizer.
///
/// All variants are detected before any computation begins; none are
/// retryable and no partial series is ever returned alongside them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetpointError {
    /// The temperature series has no readings.
    #[error("temperature series is empty")]
    EmptySeries,

    /// The rolling window is zero.
    #[error("rolling window must cover at least one step")]
    ZeroWindow,

    /// The rolling window is outside `[1, len]`.
    #[error("rolling window {window} is outside [1, {len}]")]
    InvalidWindow { window: usize, len: usize },

    /// The two calibration anchors share the same temperature, so the slope is undefined.
    #[error("calibration anchors share temperature {temperature}; slope is undefined")]
    DegenerateCalibration { temperature: f64 },

    /// A calibration anchor temperature or setpoint is NaN or infinite.
    #[error("calibration anchor ({temperature}, {setpoint}) is not finite")]
    NonFiniteAnchor { temperature: f64, setpoint: f64 },

    /// A reading is NaN or infinite.
    #[error("reading at step {index} is not a finite temperature")]
    NonFiniteReading { index: usize },
}

/// Failures while obtaining an outdoor temperature series.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    UnknownSource(String),

    #[error("weather source \"{0}\" needs a path")]
    MissingPath(String),

    #[error("column \"{0}\" not found in weather header")]
    MissingColumn(String),

    #[error("invalid temperature \"{value}\" on row {row}")]
    InvalidValue { row: usize, value: String },

    #[error(transparent)]
    Series(#[from] SetpointError),
}

/// Failures while planning a radiant system from a validated configuration.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Outdoor-air control was requested but no weather series was supplied.
    #[error("outdoor-air based slab control needs a weather series; none is available")]
    MissingWeather,

    /// A configuration value the planner depends on is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setpoint(#[from] SetpointError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_window_message_names_bounds() {
        let e = SetpointError::InvalidWindow { window: 0, len: 24 };
        assert_eq!(e.to_string(), "rolling window 0 is outside [1, 24]");
    }

    #[test]
    fn zero_window_message_does_not_name_a_length() {
        assert_eq!(
            SetpointError::ZeroWindow.to_string(),
            "rolling window must cover at least one step"
        );
    }

    #[test]
    fn plan_error_wraps_setpoint_error_transparently() {
        let e: PlanError = SetpointError::EmptySeries.into();
        assert_eq!(e.to_string(), "temperature series is empty");
    }
}
