//! Two-point linear calibration from outdoor temperature to slab setpoint.

use crate::error::SetpointError;
use crate::units::round_to;

/// Decimal places kept on the slope between anchors.
pub const SLOPE_DECIMALS: i32 = 4;
/// Decimal places kept on a fitted or clamped setpoint.
pub const SETPOINT_DECIMALS: i32 = 1;

/// A `(temperature, setpoint)` anchor of the calibration line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    /// Outdoor temperature at which `setpoint` applies.
    pub temperature: f64,
    /// Slab setpoint at `temperature`.
    pub setpoint: f64,
}

impl CalibrationPoint {
    pub fn new(temperature: f64, setpoint: f64) -> Self {
        Self {
            temperature,
            setpoint,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.setpoint.is_finite()
    }
}

/// Line through two calibration anchors, with the clamp range they imply.
///
/// Anchors may be given in either temperature order; the clamp range is
/// always `[min(setpoints), max(setpoints)]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseLinearMap {
    low: CalibrationPoint,
    high: CalibrationPoint,
    slope: f64,
}

impl PiecewiseLinearMap {
    /// Builds the map, rejecting non-finite anchors and anchors that share a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`SetpointError::NonFiniteAnchor`] when any anchor value is NaN
    /// or infinite, and [`SetpointError::DegenerateCalibration`] when
    /// `low.temperature == high.temperature`.
    pub fn new(low: CalibrationPoint, high: CalibrationPoint) -> Result<Self, SetpointError> {
        if let Some(bad) = [low, high].into_iter().find(|p| !p.is_finite()) {
            return Err(SetpointError::NonFiniteAnchor {
                temperature: bad.temperature,
                setpoint: bad.setpoint,
            });
        }
        let run = high.temperature - low.temperature;
        if run == 0.0 {
            return Err(SetpointError::DegenerateCalibration {
                temperature: low.temperature,
            });
        }
        let slope = round_to((high.setpoint - low.setpoint) / run, SLOPE_DECIMALS);
        Ok(Self { low, high, slope })
    }

    pub fn low(&self) -> CalibrationPoint {
        self.low
    }

    pub fn high(&self) -> CalibrationPoint {
        self.high
    }

    /// Slope rounded to [`SLOPE_DECIMALS`] places.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Evaluates the line at `x`, rounded to [`SETPOINT_DECIMALS`] places. Not clamped.
    pub fn fit(&self, x: f64) -> f64 {
        round_to(
            self.low.setpoint + (x - self.low.temperature) * self.slope,
            SETPOINT_DECIMALS,
        )
    }

    /// Lower clamp bound, rounded to [`SETPOINT_DECIMALS`] places.
    pub fn lower(&self) -> f64 {
        round_to(
            self.low.setpoint.min(self.high.setpoint),
            SETPOINT_DECIMALS,
        )
    }

    /// Upper clamp bound, rounded to [`SETPOINT_DECIMALS`] places.
    pub fn upper(&self) -> f64 {
        round_to(
            self.low.setpoint.max(self.high.setpoint),
            SETPOINT_DECIMALS,
        )
    }

    /// Clamps `value` into `[lower, upper]`.
    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.low, self.high)
    }
}

/// Maps one rolling-mean value onto the calibration line.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::setpoint::{CalibrationPoint, fit_setpoint};
///
/// let low = CalibrationPoint::new(65.0, 73.0);
/// let high = CalibrationPoint::new(80.0, 68.0);
/// assert_eq!(fit_setpoint(72.5, low, high), Ok(70.5));
/// ```
///
/// # Errors
///
/// Returns [`SetpointError::DegenerateCalibration`] when the anchors share a temperature.
pub fn fit_setpoint(
    rolling_value: f64,
    low_point: CalibrationPoint,
    high_point: CalibrationPoint,
) -> Result<f64, SetpointError> {
    PiecewiseLinearMap::new(low_point, high_point).map(|map| map.fit(rolling_value))
}

/// Clamps `value` into the setpoint range spanned by the two anchors.
///
/// Only the setpoints matter here, so equal anchor temperatures are not an error.
pub fn clamp(value: f64, low_point: CalibrationPoint, high_point: CalibrationPoint) -> f64 {
    let lower = round_to(
        low_point.setpoint.min(high_point.setpoint),
        SETPOINT_DECIMALS,
    );
    let upper = round_to(
        low_point.setpoint.max(high_point.setpoint),
        SETPOINT_DECIMALS,
    );
    if value > upper {
        upper
    } else if value < lower {
        lower
    } else {
        value
    }
}
