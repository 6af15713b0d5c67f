//! TOML-based measure configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::controls::ControlStrategy;
use crate::design::ClimateZone;
use crate::outputs::ReportingFrequency;
use crate::schedule::{AvailabilityPreset, AvailabilityWindow, TimeOfDay};
use crate::setpoint::CalibrationPoint;
use crate::units::f_to_c;
use crate::weather::WeatherSource;

/// Top-level measure configuration parsed from TOML.
///
/// All fields have defaults matching the `oa_based` preset minus the site
/// climate zone. Load from TOML with [`MeasureConfig::from_toml_file`] or use
/// [`MeasureConfig::from_preset`] for a built-in one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasureConfig {
    /// Slab setpoint calibration and constant setpoints.
    #[serde(default)]
    pub slab: SlabConfig,
    /// Radiant control strategy.
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Daily availability window.
    #[serde(default)]
    pub availability: AvailabilityConfig,
    /// Outdoor temperature source.
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub building: BuildingConfig,
    /// Output variable requests.
    #[serde(default)]
    pub outputs: OutputsConfig,
}

/// Slab setpoint calibration. Anchors are in °F, constant setpoints in °C.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlabConfig {
    /// Rolling mean window (hours, must be > 0).
    pub window_hours: usize,
    /// Slab setpoint at the low outdoor anchor (°F).
    pub sp_at_oat_low_f: f64,
    /// Low outdoor anchor temperature (°F).
    pub oat_low_f: f64,
    /// Slab setpoint at the high outdoor anchor (°F).
    pub sp_at_oat_high_f: f64,
    /// High outdoor anchor temperature (°F).
    pub oat_high_f: f64,
    /// Heating control temperature for constant control (°C).
    pub htg_setpoint_c: f64,
    /// Cooling control temperature for constant control (°C).
    pub clg_setpoint_c: f64,
}

impl Default for SlabConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            sp_at_oat_low_f: 73.0,
            oat_low_f: 65.0,
            sp_at_oat_high_f: 68.0,
            oat_high_f: 80.0,
            htg_setpoint_c: 20.0,
            clg_setpoint_c: 25.0,
        }
    }
}

impl SlabConfig {
    /// Rolling window length in steps for a series sampled `steps_per_day` times a day.
    ///
    /// `None` when the step count does not fit in a `usize`.
    pub fn window_steps(&self, steps_per_day: usize) -> Option<usize> {
        self.window_hours
            .checked_mul(steps_per_day)
            .map(|steps| steps / 24)
    }

    fn anchors_f(&self) -> [(&'static str, f64); 4] {
        [
            ("slab.sp_at_oat_low_f", self.sp_at_oat_low_f),
            ("slab.oat_low_f", self.oat_low_f),
            ("slab.sp_at_oat_high_f", self.sp_at_oat_high_f),
            ("slab.oat_high_f", self.oat_high_f),
        ]
    }
}

/// Radiant control strategy and coil control types.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    /// `"oa_based_control"` or `"constant_control"`.
    pub strategy: String,
    /// Minimum hours between heating and cooling operation (must be > 0).
    pub switch_over_time: f64,
    pub temperature_control_type: String,
    pub setpoint_control_type: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            strategy: "oa_based_control".to_string(),
            switch_over_time: 24.0,
            temperature_control_type: "MeanAirTemperature".to_string(),
            setpoint_control_type: "ZeroFlowPower".to_string(),
        }
    }
}

/// Daily availability window. Times are decimal hours in `[0, 24]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvailabilityConfig {
    /// One of `all_day`, `afternoon_shutoff`, `precool`, `occupancy`.
    pub preset: String,
    /// Replaces the preset with `lockout_start`..`lockout_end`.
    pub lockout: bool,
    pub lockout_start: f64,
    pub lockout_end: f64,
    pub occ_hr_start: f64,
    pub occ_hr_end: f64,
    /// Swap on and off values of the resulting window.
    pub invert: bool,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            preset: "all_day".to_string(),
            lockout: false,
            lockout_start: 12.0,
            lockout_end: 20.0,
            occ_hr_start: 6.0,
            occ_hr_end: 18.0,
            invert: false,
        }
    }
}

/// Outdoor temperature source and synthetic generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// `"synthetic"`, `"csv"` or `"epw"`.
    pub source: String,
    /// Weather file for `csv` and `epw` sources.
    pub path: Option<String>,
    /// CSV column holding dry bulb temperatures (°C).
    pub column: String,
    /// Synthetic annual mean dry bulb (°C).
    pub mean_c: f64,
    /// Synthetic annual amplitude (°C).
    pub annual_amp_c: f64,
    /// Synthetic diurnal amplitude (°C).
    pub diurnal_amp_c: f64,
    /// Synthetic noise standard deviation (°C).
    pub noise_std: f64,
    /// Readings per day (must be > 0).
    pub steps_per_day: usize,
    /// Synthetic horizon in days (must be > 0).
    pub days: usize,
    pub seed: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            path: None,
            column: "dry_bulb_c".to_string(),
            mean_c: 10.0,
            annual_amp_c: 12.0,
            diurnal_amp_c: 6.0,
            noise_std: 1.0,
            steps_per_day: 24,
            days: 365,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// ASHRAE or CEC climate zone, e.g. `"5A"` or `"CEC T24-CEC12"`.
    pub climate_zone: Option<String>,
}

impl SiteConfig {
    pub fn climate_zone(&self) -> Option<ClimateZone> {
        self.climate_zone.as_deref().and_then(ClimateZone::parse)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// Thermal zones receiving a radiant loop.
    pub zones: Vec<String>,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                "Core Zone".to_string(),
                "Perimeter Zone 1".to_string(),
                "Perimeter Zone 2".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputsConfig {
    pub add_output_variables: bool,
    /// `Detailed`, `Timestep`, `Hourly`, `Daily`, `Monthly`, `RunPeriod` or `Annual`.
    pub reporting_frequency: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            add_output_variables: true,
            reporting_frequency: "Hourly".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"slab.window_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl MeasureConfig {
    /// Outdoor-air reset over a synthetic year in climate zone 5B.
    pub fn oa_based() -> Self {
        Self {
            site: SiteConfig {
                climate_zone: Some("ASHRAE 169-2013-5B".to_string()),
            },
            ..Self::default()
        }
    }

    /// Fixed heating and cooling control temperatures per zone.
    pub fn constant() -> Self {
        Self {
            controls: ControlsConfig {
                strategy: "constant_control".to_string(),
                ..ControlsConfig::default()
            },
            ..Self::oa_based()
        }
    }

    /// Outdoor-air reset with the system off from 15:00 to 22:00.
    pub fn afternoon_shutoff() -> Self {
        Self {
            availability: AvailabilityConfig {
                preset: "afternoon_shutoff".to_string(),
                ..AvailabilityConfig::default()
            },
            ..Self::oa_based()
        }
    }

    /// Outdoor-air reset with a 12:00 to 20:00 peak lockout in climate zone 3B.
    pub fn peak_lockout() -> Self {
        Self {
            availability: AvailabilityConfig {
                lockout: true,
                ..AvailabilityConfig::default()
            },
            weather: WeatherConfig {
                mean_c: 18.0,
                annual_amp_c: 9.0,
                diurnal_amp_c: 8.0,
                ..WeatherConfig::default()
            },
            site: SiteConfig {
                climate_zone: Some("3B".to_string()),
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["oa_based", "constant", "afternoon_shutoff", "peak_lockout"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "oa_based" => Ok(Self::oa_based()),
            "constant" => Ok(Self::constant()),
            "afternoon_shutoff" => Ok(Self::afternoon_shutoff()),
            "peak_lockout" => Ok(Self::peak_lockout()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Calibration anchors converted to °C, low outdoor temperature first.
    pub fn calibration_points(&self) -> (CalibrationPoint, CalibrationPoint) {
        let s = &self.slab;
        (
            CalibrationPoint::new(f_to_c(s.oat_low_f), f_to_c(s.sp_at_oat_low_f)),
            CalibrationPoint::new(f_to_c(s.oat_high_f), f_to_c(s.sp_at_oat_high_f)),
        )
    }

    /// Availability window selected by the lockout flag or the preset.
    ///
    /// An unknown preset name is logged and treated as `all_day`.
    pub fn availability_window(&self) -> AvailabilityWindow {
        let a = &self.availability;
        let hour = |h: f64| TimeOfDay::from_decimal_hours(h).unwrap_or(TimeOfDay::END_OF_DAY);

        let window = if a.lockout {
            AvailabilityWindow::new(hour(a.lockout_start), hour(a.lockout_end))
        } else {
            let preset = a.preset.parse().unwrap_or_else(|e: String| {
                warn!("{e}; defaulting to all_day");
                AvailabilityPreset::AllDay
            });
            AvailabilityWindow::from_preset(preset, hour(a.occ_hr_start), hour(a.occ_hr_end))
        };

        if a.invert { window.inverted() } else { window }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.slab;
        if s.window_hours == 0 {
            errors.push(ConfigError::new("slab.window_hours", "must be > 0"));
        }
        for (field, value) in s.anchors_f().into_iter().chain([
            ("slab.htg_setpoint_c", s.htg_setpoint_c),
            ("slab.clg_setpoint_c", s.clg_setpoint_c),
        ]) {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number"));
            }
        }
        if s.oat_low_f == s.oat_high_f {
            errors.push(ConfigError::new(
                "slab.oat_high_f",
                "must differ from slab.oat_low_f",
            ));
        }
        if s.htg_setpoint_c > s.clg_setpoint_c {
            errors.push(ConfigError::new(
                "slab.htg_setpoint_c",
                "must be <= slab.clg_setpoint_c",
            ));
        }

        let c = &self.controls;
        if let Err(e) = c.strategy.parse::<ControlStrategy>() {
            errors.push(ConfigError::new("controls.strategy", e));
        }
        if !(c.switch_over_time.is_finite() && c.switch_over_time > 0.0) {
            errors.push(ConfigError::new("controls.switch_over_time", "must be > 0"));
        }

        let a = &self.availability;
        if let Err(e) = a.preset.parse::<AvailabilityPreset>() {
            errors.push(ConfigError::new("availability.preset", e));
        }
        for (field, value) in [
            ("availability.lockout_start", a.lockout_start),
            ("availability.lockout_end", a.lockout_end),
            ("availability.occ_hr_start", a.occ_hr_start),
            ("availability.occ_hr_end", a.occ_hr_end),
        ] {
            if TimeOfDay::from_decimal_hours(value).is_none() {
                errors.push(ConfigError::new(field, "must be in [0.0, 24.0]"));
            }
        }

        let w = &self.weather;
        match w.source.parse::<WeatherSource>() {
            Ok(WeatherSource::Synthetic) => match w.days.checked_mul(w.steps_per_day) {
                None => errors.push(ConfigError::new(
                    "weather.days",
                    "days * steps_per_day overflows the step count",
                )),
                Some(horizon) => {
                    if w.steps_per_day > 0
                        && s.window_steps(w.steps_per_day).is_some_and(|n| n > horizon)
                    {
                        errors.push(ConfigError::new(
                            "slab.window_hours",
                            format!("must not exceed the {} day weather horizon", w.days),
                        ));
                    }
                }
            },
            Ok(_) if w.path.is_none() => {
                errors.push(ConfigError::new(
                    "weather.path",
                    format!("required for weather.source \"{}\"", w.source),
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new("weather.source", e)),
        }
        if w.steps_per_day == 0 {
            errors.push(ConfigError::new("weather.steps_per_day", "must be > 0"));
        } else {
            match s.window_steps(w.steps_per_day) {
                None => errors.push(ConfigError::new(
                    "slab.window_hours",
                    "window_hours * weather.steps_per_day overflows the step count",
                )),
                Some(0) if s.window_hours > 0 => errors.push(ConfigError::new(
                    "slab.window_hours",
                    "must cover at least one weather step",
                )),
                Some(_) => {}
            }
        }
        if w.days == 0 {
            errors.push(ConfigError::new("weather.days", "must be > 0"));
        }

        if let Some(raw) = &self.site.climate_zone {
            if self.site.climate_zone().is_none() {
                errors.push(ConfigError::new(
                    "site.climate_zone",
                    format!("cannot parse climate zone \"{raw}\""),
                ));
            }
        }

        if self.building.zones.is_empty() {
            errors.push(ConfigError::new("building.zones", "must list at least one zone"));
        }
        if self.building.zones.iter().any(|z| z.trim().is_empty()) {
            errors.push(ConfigError::new("building.zones", "zone names must be non-empty"));
        }

        if let Err(e) = self.outputs.reporting_frequency.parse::<ReportingFrequency>() {
            errors.push(ConfigError::new("outputs.reporting_frequency", e));
        }

        errors
    }
}
