//! Post-hoc statistics of a synthesized setpoint series.

use std::fmt;

use super::synth::ClampedSetpointSeries;

/// Aggregate figures derived from a complete setpoint series.
///
/// Computed after synthesis so the report always agrees with the exported data.
#[derive(Debug, Clone, PartialEq)]
pub struct SetpointSummary {
    /// Number of steps in the series.
    pub steps: usize,
    /// Lowest setpoint.
    pub min: f64,
    /// Highest setpoint.
    pub max: f64,
    /// Arithmetic mean setpoint.
    pub mean: f64,
    /// Steps pinned at the upper clamp bound.
    pub steps_at_upper: usize,
    /// Steps pinned at the lower clamp bound.
    pub steps_at_lower: usize,
}

impl SetpointSummary {
    /// Summarizes `series`.
    pub fn from_series(series: &ClampedSetpointSeries) -> Self {
        let values = series.setpoints();
        let (lower, upper) = series.bounds();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut steps_at_upper = 0;
        let mut steps_at_lower = 0;

        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            if v == upper {
                steps_at_upper += 1;
            }
            if v == lower {
                steps_at_lower += 1;
            }
        }

        Self {
            steps: values.len(),
            min,
            max,
            mean: sum / values.len().max(1) as f64,
            steps_at_upper,
            steps_at_lower,
        }
    }
}

impl fmt::Display for SetpointSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Slab Setpoint Report ---")?;
        writeln!(f, "Steps:                 {}", self.steps)?;
        writeln!(f, "Minimum setpoint:      {:.1} C", self.min)?;
        writeln!(f, "Maximum setpoint:      {:.1} C", self.max)?;
        writeln!(f, "Mean setpoint:         {:.2} C", self.mean)?;
        writeln!(f, "Steps at upper limit:  {}", self.steps_at_upper)?;
        write!(f, "Steps at lower limit:  {}", self.steps_at_lower)
    }
}
