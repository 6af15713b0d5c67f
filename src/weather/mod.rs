//! Outdoor dry bulb sources feeding the slab setpoint synthesizer.

pub mod file;
pub mod synthetic;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::setpoint::TemperatureSeries;

pub use file::{load_csv, load_epw, read_csv, read_epw};
pub use synthetic::SyntheticWeather;

/// Where the outdoor temperature series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSource {
    Synthetic,
    Csv,
    Epw,
}

impl WeatherSource {
    pub const NAMES: &[&str] = &["synthetic", "csv", "epw"];

    /// Guesses the file source from a path extension; anything but `.epw` is CSV.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("epw") => Self::Epw,
            _ => Self::Csv,
        }
    }
}

impl FromStr for WeatherSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synthetic" => Ok(Self::Synthetic),
            "csv" => Ok(Self::Csv),
            "epw" => Ok(Self::Epw),
            other => Err(format!(
                "unknown weather source \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Synthetic => "synthetic",
            Self::Csv => "csv",
            Self::Epw => "epw",
        })
    }
}

/// Loads the series a [`WeatherConfig`] describes.
///
/// # Errors
///
/// Propagates file and parse failures, and rejects an unknown source or a
/// file source without a path.
pub fn load_weather(cfg: &WeatherConfig) -> Result<TemperatureSeries, WeatherError> {
    let source: WeatherSource = cfg.source.parse().map_err(WeatherError::UnknownSource)?;
    let path = cfg.path.as_deref().map(Path::new);

    let series = match (source, path) {
        (WeatherSource::Synthetic, _) => SyntheticWeather::new(
            cfg.mean_c,
            cfg.annual_amp_c,
            cfg.diurnal_amp_c,
            cfg.noise_std,
            cfg.steps_per_day,
            cfg.seed,
        )
        .generate(cfg.days)?,
        (WeatherSource::Csv, Some(path)) => load_csv(path, &cfg.column, cfg.steps_per_day)?,
        (WeatherSource::Epw, Some(path)) => load_epw(path)?,
        (_, None) => return Err(WeatherError::MissingPath(cfg.source.clone())),
    };

    info!(
        source = %source,
        steps = series.len(),
        steps_per_day = series.steps_per_day(),
        "loaded outdoor temperature series"
    );
    Ok(series)
}
