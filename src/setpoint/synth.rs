//! Composition of rolling average, calibration line, and clamp into a setpoint series.

use crate::error::SetpointError;

use super::calibration::{CalibrationPoint, PiecewiseLinearMap};
use super::series::{RollingAverageSeries, TemperatureSeries, rolling_average};

/// Slab setpoint per step, already clamped to the calibration range.
///
/// Keeps the rolling means it was derived from so callers can export or
/// inspect both side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampedSetpointSeries {
    rolling: RollingAverageSeries,
    setpoints: Vec<f64>,
    lower: f64,
    upper: f64,
}

impl ClampedSetpointSeries {
    pub fn setpoints(&self) -> &[f64] {
        &self.setpoints
    }

    pub fn rolling(&self) -> &RollingAverageSeries {
        &self.rolling
    }

    /// Clamp range `(lower, upper)` the setpoints were limited to.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn len(&self) -> usize {
        self.setpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setpoints.is_empty()
    }

    /// Setpoint at `step`, repeating the horizon for steps past its end.
    pub fn value_at(&self, step: usize) -> f64 {
        self.setpoints[step % self.setpoints.len()]
    }
}

/// Validated synthesizer settings: rolling window plus calibration line.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::setpoint::{CalibrationPoint, SetpointSynthesizer, TemperatureSeries};
///
/// let synth = SetpointSynthesizer::new(
///     2,
///     CalibrationPoint::new(65.0, 73.0),
///     CalibrationPoint::new(80.0, 68.0),
/// )
/// .unwrap();
/// let series = TemperatureSeries::new(vec![60.0, 70.0, 90.0]).unwrap();
/// let out = synth.synthesize(&series).unwrap();
/// assert_eq!(out.setpoints(), &[69.7, 73.0, 68.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SetpointSynthesizer {
    window: usize,
    map: PiecewiseLinearMap,
}

impl SetpointSynthesizer {
    /// # Errors
    ///
    /// [`SetpointError::ZeroWindow`] for a zero window,
    /// [`SetpointError::NonFiniteAnchor`] for a NaN or infinite anchor and
    /// [`SetpointError::DegenerateCalibration`] for equal anchor temperatures.
    /// The upper window bound depends on the series and is checked in
    /// [`SetpointSynthesizer::synthesize`].
    pub fn new(
        window: usize,
        low_point: CalibrationPoint,
        high_point: CalibrationPoint,
    ) -> Result<Self, SetpointError> {
        if window == 0 {
            return Err(SetpointError::ZeroWindow);
        }
        let map = PiecewiseLinearMap::new(low_point, high_point)?;
        Ok(Self { window, map })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn map(&self) -> &PiecewiseLinearMap {
        &self.map
    }

    /// Runs the full pipeline over `series`.
    ///
    /// # Errors
    ///
    /// [`SetpointError::InvalidWindow`] when the window exceeds the series length.
    pub fn synthesize(
        &self,
        series: &TemperatureSeries,
    ) -> Result<ClampedSetpointSeries, SetpointError> {
        let rolling = rolling_average(series, self.window)?;
        let setpoints = rolling
            .values()
            .iter()
            .map(|&mean| self.map.clamp(self.map.fit(mean)))
            .collect();

        Ok(ClampedSetpointSeries {
            rolling,
            setpoints,
            lower: self.map.lower(),
            upper: self.map.upper(),
        })
    }
}

/// Converts an outdoor temperature series into a clamped slab setpoint series.
///
/// All inputs are validated before any computation: an out-of-range window is
/// reported ahead of a degenerate calibration.
///
/// # Errors
///
/// [`SetpointError::InvalidWindow`], [`SetpointError::NonFiniteAnchor`] or
/// [`SetpointError::DegenerateCalibration`].
pub fn synthesize(
    series: &TemperatureSeries,
    window: usize,
    low_point: CalibrationPoint,
    high_point: CalibrationPoint,
) -> Result<ClampedSetpointSeries, SetpointError> {
    if window == 0 || window > series.len() {
        return Err(SetpointError::InvalidWindow {
            window,
            len: series.len(),
        });
    }
    SetpointSynthesizer::new(window, low_point, high_point)?.synthesize(series)
}
