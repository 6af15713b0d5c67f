use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::SetpointError;
use crate::setpoint::TemperatureSeries;
use crate::units::round_to;

/// Day of year with the lowest mean temperature.
const COLDEST_DAY: f64 = 15.0;
/// Hour of day with the lowest temperature.
const COLDEST_HOUR: f64 = 3.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// A seeded outdoor dry-bulb generator for runs without a weather file.
///
/// The temperature at each step is an annual sinusoid (coldest mid-January)
/// plus a diurnal sinusoid (coldest at 03:00) plus Gaussian noise, rounded to
/// 0.1 °C like recorded weather data.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::weather::SyntheticWeather;
///
/// let mut weather = SyntheticWeather::new(
///     12.0, // mean_c - annual mean dry bulb
///     10.0, // annual_amp_c - summer/winter swing
///     5.0,  // diurnal_amp_c - day/night swing
///     0.0,  // noise_std - no noise
///     24,   // steps_per_day - hourly
///     42,   // seed
/// );
///
/// let january_night = weather.temperature_c(3);
/// let july_afternoon = weather.temperature_c(196 * 24 + 15);
/// assert!(july_afternoon > january_night);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    /// Annual mean dry bulb (°C).
    pub mean_c: f64,
    /// Half the summer/winter swing of the daily mean (°C).
    pub annual_amp_c: f64,
    /// Half the day/night swing (°C).
    pub diurnal_amp_c: f64,
    /// Standard deviation of the per-step noise (°C).
    pub noise_std: f64,
    pub steps_per_day: usize,
    rng: StdRng,
}

impl SyntheticWeather {
    pub fn new(
        mean_c: f64,
        annual_amp_c: f64,
        diurnal_amp_c: f64,
        noise_std: f64,
        steps_per_day: usize,
        seed: u64,
    ) -> Self {
        Self {
            mean_c,
            annual_amp_c,
            diurnal_amp_c,
            noise_std,
            steps_per_day: steps_per_day.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Dry bulb at `step`, counted from 00:00 on January 1st.
    pub fn temperature_c(&mut self, step: usize) -> f64 {
        let spd = self.steps_per_day as f64;
        let day = step as f64 / spd;
        let hour = (step % self.steps_per_day) as f64 * 24.0 / spd;

        let annual = -(std::f64::consts::TAU * (day - COLDEST_DAY) / DAYS_PER_YEAR).cos();
        let diurnal = -(std::f64::consts::TAU * (hour - COLDEST_HOUR) / 24.0).cos();

        let noise = if self.noise_std > 0.0 {
            // Box-Muller
            let u1: f64 = self.rng.random::<f64>().clamp(1e-12, 1.0);
            let u2: f64 = self.rng.random::<f64>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
            z0 * self.noise_std
        } else {
            0.0
        };

        round_to(
            self.mean_c + self.annual_amp_c * annual + self.diurnal_amp_c * diurnal + noise,
            1,
        )
    }

    /// Generates `days` whole days of readings starting on January 1st.
    ///
    /// # Errors
    ///
    /// Returns [`SetpointError::EmptySeries`] when `days` is zero.
    pub fn generate(&mut self, days: usize) -> Result<TemperatureSeries, SetpointError> {
        let steps = days * self.steps_per_day;
        let readings = (0..steps).map(|t| self.temperature_c(t)).collect();
        TemperatureSeries::with_steps_per_day(readings, self.steps_per_day)
    }
}
