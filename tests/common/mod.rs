//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use radiant_setpoint::config::MeasureConfig;
use radiant_setpoint::setpoint::{CalibrationPoint, TemperatureSeries};
use radiant_setpoint::weather::SyntheticWeather;

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Synthetic hourly year (mean 10 °C, 12 °C annual swing, 6 °C diurnal swing, seed 42).
pub fn synthetic_year() -> TemperatureSeries {
    SyntheticWeather::new(10.0, 12.0, 6.0, 1.0, 24, 42)
        .generate(365)
        .expect("synthetic year should generate")
}

/// Default calibration anchors in °C (65/73 °F and 80/68 °F).
pub fn default_anchors() -> (CalibrationPoint, CalibrationPoint) {
    MeasureConfig::default().calibration_points()
}

/// Writes `contents` to a file under the system temp directory and returns its path.
///
/// `name` must be unique per test so parallel tests don't collide.
pub fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("radiant-setpoint-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join(name);
    fs::write(&path, contents).expect("temp file should be writable");
    path
}

/// CSV weather text with an hourly `dry_bulb_c` column for `days` days.
///
/// Temperatures ramp linearly from `start_c` by `step_c` per hour.
pub fn ramp_weather_csv(days: usize, start_c: f64, step_c: f64) -> String {
    let mut text = String::from("hour,dry_bulb_c\n");
    for h in 0..days * 24 {
        text.push_str(&format!("{h},{:.1}\n", start_c + h as f64 * step_c));
    }
    text
}
