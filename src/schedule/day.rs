//! Single-day schedule profiles built from "value until time" breakpoints.

use std::fmt;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day between `00:00` and `24:00` inclusive.
///
/// `24:00` is the end-of-day marker every [`DaySchedule`] ends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };
    pub const END_OF_DAY: Self = Self { hour: 24, minute: 0 };

    /// Returns `None` unless `hour:minute` lies in `00:00..=24:00`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute > 0) {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Converts decimal hours (`12.5` is `12:30`), truncating to whole minutes.
    ///
    /// # Examples
    ///
    /// ```
    /// use radiant_setpoint::schedule::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_decimal_hours(18.25), TimeOfDay::new(18, 15));
    /// assert_eq!(TimeOfDay::from_decimal_hours(24.0), Some(TimeOfDay::END_OF_DAY));
    /// assert_eq!(TimeOfDay::from_decimal_hours(25.0), None);
    /// ```
    pub fn from_decimal_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
            return None;
        }
        let hour = hours.trunc();
        let minute = (hours.fract() * 60.0).trunc();
        Self::new(hour as u8, minute as u8)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One day of schedule values.
///
/// Each breakpoint `(until, value)` holds `value` from the previous breakpoint
/// (or midnight) up to `until`. Breakpoints are strictly increasing and the last
/// one is always `24:00`.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    breakpoints: Vec<(TimeOfDay, f64)>,
}

impl DaySchedule {
    /// A day holding `value` throughout.
    pub fn constant(value: f64) -> Self {
        Self {
            breakpoints: vec![(TimeOfDay::END_OF_DAY, value)],
        }
    }

    /// Sets `value` for the interval ending at `until`.
    ///
    /// A breakpoint at an existing time replaces that breakpoint's value.
    /// `00:00` closes an empty interval and is ignored.
    pub fn add_value(&mut self, until: TimeOfDay, value: f64) {
        if until == TimeOfDay::MIDNIGHT {
            return;
        }
        match self.breakpoints.binary_search_by(|(t, _)| t.cmp(&until)) {
            Ok(i) => self.breakpoints[i].1 = value,
            Err(i) => self.breakpoints.insert(i, (until, value)),
        }
    }

    pub fn breakpoints(&self) -> &[(TimeOfDay, f64)] {
        &self.breakpoints
    }

    /// Value in effect at `time`.
    pub fn value_at(&self, time: TimeOfDay) -> f64 {
        self.breakpoints
            .iter()
            .find(|(until, _)| *until > time)
            .or(self.breakpoints.last())
            .map_or(0.0, |(_, v)| *v)
    }

    /// Samples the profile at the start of each of `steps_per_day` equal steps.
    pub fn sample(&self, steps_per_day: usize) -> Vec<f64> {
        let steps = steps_per_day.max(1);
        (0..steps)
            .map(|step| self.value_at_step(step, steps))
            .collect()
    }

    /// Value at the start of `step` when the day is split into `steps_per_day` steps.
    pub fn value_at_step(&self, step: usize, steps_per_day: usize) -> f64 {
        let steps = steps_per_day.max(1);
        let minute = (step % steps) * usize::from(MINUTES_PER_DAY) / steps;
        let time = TimeOfDay {
            hour: (minute / 60) as u8,
            minute: (minute % 60) as u8,
        };
        self.value_at(time)
    }
}
