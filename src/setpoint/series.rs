//! Outdoor temperature series and their circular rolling average.

use crate::error::SetpointError;
use crate::units::round_to;

/// Decimal places kept on each rolling mean, matching schedule value granularity.
pub const ROLLING_MEAN_DECIMALS: i32 = 2;

/// An ordered sequence of temperature readings, one per fixed time step.
///
/// Construction rejects empty input and non-finite readings, so every
/// `TemperatureSeries` in circulation satisfies the "no gaps, real values"
/// invariant.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::setpoint::TemperatureSeries;
///
/// let series = TemperatureSeries::new(vec![10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.steps_per_day(), 24);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    readings: Vec<f64>,
    steps_per_day: usize,
}

impl TemperatureSeries {
    /// Creates an hourly series (24 steps per day).
    ///
    /// # Errors
    ///
    /// Returns [`SetpointError::EmptySeries`] for zero readings and
    /// [`SetpointError::NonFiniteReading`] for NaN or infinite values.
    pub fn new(readings: Vec<f64>) -> Result<Self, SetpointError> {
        Self::with_steps_per_day(readings, 24)
    }

    /// Creates a series sampled `steps_per_day` times per day.
    ///
    /// # Errors
    ///
    /// Same as [`TemperatureSeries::new`]. A zero `steps_per_day` is treated as 1.
    pub fn with_steps_per_day(
        readings: Vec<f64>,
        steps_per_day: usize,
    ) -> Result<Self, SetpointError> {
        if readings.is_empty() {
            return Err(SetpointError::EmptySeries);
        }
        if let Some(index) = readings.iter().position(|v| !v.is_finite()) {
            return Err(SetpointError::NonFiniteReading { index });
        }
        Ok(Self {
            readings,
            steps_per_day: steps_per_day.max(1),
        })
    }

    /// Number of readings in the horizon.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn steps_per_day(&self) -> usize {
        self.steps_per_day
    }

    pub fn readings(&self) -> &[f64] {
        &self.readings
    }
}

/// Circular rolling mean of a [`TemperatureSeries`], one value per source step.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingAverageSeries {
    window: usize,
    values: Vec<f64>,
}

impl RollingAverageSeries {
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes the mean of the `window` readings ending at each step.
///
/// The series is treated as circular: the last `window - 1` readings of the
/// horizon precede the first one, so early steps average over the tail of the
/// year instead of a shortened window. Each mean is rounded to
/// [`ROLLING_MEAN_DECIMALS`] places.
///
/// # Errors
///
/// Returns [`SetpointError::InvalidWindow`] when `window` is zero or longer
/// than the series.
pub fn rolling_average(
    series: &TemperatureSeries,
    window: usize,
) -> Result<RollingAverageSeries, SetpointError> {
    let readings = series.readings();
    let n = readings.len();
    if window == 0 || window > n {
        return Err(SetpointError::InvalidWindow { window, len: n });
    }

    let wrapped: Vec<f64> = readings[n - (window - 1)..]
        .iter()
        .chain(readings)
        .copied()
        .collect();

    let values = wrapped
        .windows(window)
        .map(|w| round_to(w.iter().sum::<f64>() / window as f64, ROLLING_MEAN_DECIMALS))
        .collect();

    Ok(RollingAverageSeries { window, values })
}
