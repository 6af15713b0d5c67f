//! Daily radiant availability profiles.

use std::fmt;
use std::str::FromStr;

use super::day::{DaySchedule, TimeOfDay};

/// Named availability presets for the radiant system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityPreset {
    /// Available around the clock.
    AllDay,
    /// Off from 15:00 to 22:00 to avoid the afternoon peak.
    AfternoonShutoff,
    /// Off from 10:00 to 22:00, running only overnight and early morning.
    Precool,
    /// Available only between the occupancy start and end hours.
    Occupancy,
}

impl AvailabilityPreset {
    /// Names accepted by [`AvailabilityPreset::from_str`].
    pub const NAMES: &[&str] = &["all_day", "afternoon_shutoff", "precool", "occupancy"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AllDay => "all_day",
            Self::AfternoonShutoff => "afternoon_shutoff",
            Self::Precool => "precool",
            Self::Occupancy => "occupancy",
        }
    }
}

impl FromStr for AvailabilityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all_day" => Ok(Self::AllDay),
            "afternoon_shutoff" => Ok(Self::AfternoonShutoff),
            "precool" => Ok(Self::Precool),
            "occupancy" => Ok(Self::Occupancy),
            other => Err(format!(
                "unknown availability preset \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for AvailabilityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shut-off window from `start` to `end`, wrapping midnight when `start > end`.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::schedule::{AvailabilityWindow, TimeOfDay};
///
/// let window = AvailabilityWindow::new(
///     TimeOfDay::new(15, 0).unwrap(),
///     TimeOfDay::new(22, 0).unwrap(),
/// );
/// let day = window.day_schedule();
/// assert_eq!(day.breakpoints().len(), 3);
/// assert_eq!(day.value_at(TimeOfDay::new(18, 0).unwrap()), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Swap on and off values, making the window the available period.
    pub invert: bool,
}

impl AvailabilityWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            invert: false,
        }
    }

    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    /// Window for a preset. `occupancy` spans `occ_end` to `occ_start`, so the
    /// system is off outside occupied hours.
    pub fn from_preset(preset: AvailabilityPreset, occ_start: TimeOfDay, occ_end: TimeOfDay) -> Self {
        let at = |hour| TimeOfDay::new(hour, 0).unwrap_or(TimeOfDay::END_OF_DAY);
        match preset {
            AvailabilityPreset::AllDay => {
                Self::new(TimeOfDay::END_OF_DAY, TimeOfDay::END_OF_DAY)
            }
            AvailabilityPreset::AfternoonShutoff => Self::new(at(15), at(22)),
            AvailabilityPreset::Precool => Self::new(at(10), at(22)),
            AvailabilityPreset::Occupancy => Self::new(occ_end, occ_start),
        }
    }

    /// Builds the repeating day profile for this window.
    pub fn day_schedule(&self) -> DaySchedule {
        build_availability(self.start, self.end, self.invert)
    }
}

/// Builds one availability day profile.
///
/// - `end > start`: on until `start`, off until `end`, on again to 24:00.
/// - `start > end`: off until `end`, on until `start`, off again to 24:00.
/// - `start == end`: on all day.
///
/// Times compare by hour and minute, so `12:30` to `12:00` is a wrapped
/// window rather than an equal pair.
///
/// The trailing 24:00 breakpoint is only added when the later of the two times
/// precedes the end of the day. `invert` swaps on and off in the first two cases.
pub fn build_availability(start: TimeOfDay, end: TimeOfDay, invert: bool) -> DaySchedule {
    let (on, off) = if invert { (0.0, 1.0) } else { (1.0, 0.0) };

    if start == end {
        return DaySchedule::constant(1.0);
    }

    let (first, second, lead, trail) = if end > start {
        (start, end, on, off)
    } else {
        (end, start, off, on)
    };

    let mut day = DaySchedule::constant(trail);
    day.add_value(first, lead);
    day.add_value(second, trail);
    if second < TimeOfDay::END_OF_DAY {
        day.add_value(TimeOfDay::END_OF_DAY, lead);
    }
    day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).expect("valid time")
    }

    #[test]
    fn afternoon_window_has_three_breakpoints() {
        let day = build_availability(t(15, 0), t(22, 0), false);
        assert_eq!(
            day.breakpoints(),
            &[(t(15, 0), 1.0), (t(22, 0), 0.0), (TimeOfDay::END_OF_DAY, 1.0)]
        );
        assert_eq!(day.value_at(t(0, 0)), 1.0);
        assert_eq!(day.value_at(t(15, 0)), 0.0);
        assert_eq!(day.value_at(t(22, 0)), 1.0);
    }

    #[test]
    fn equal_times_give_constant_on() {
        let day = build_availability(TimeOfDay::END_OF_DAY, TimeOfDay::END_OF_DAY, false);
        assert_eq!(day.breakpoints(), &[(TimeOfDay::END_OF_DAY, 1.0)]);

        let inverted = build_availability(t(9, 0), t(9, 0), true);
        assert_eq!(inverted.breakpoints(), &[(TimeOfDay::END_OF_DAY, 1.0)]);
    }

    #[test]
    fn window_wrapping_midnight_mirrors_values() {
        let day = build_availability(t(18, 0), t(6, 0), false);
        assert_eq!(
            day.breakpoints(),
            &[(t(6, 0), 0.0), (t(18, 0), 1.0), (TimeOfDay::END_OF_DAY, 0.0)]
        );
    }

    #[test]
    fn window_ending_at_midnight_has_no_trailing_breakpoint() {
        let day = build_availability(t(20, 0), TimeOfDay::END_OF_DAY, false);
        assert_eq!(
            day.breakpoints(),
            &[(t(20, 0), 1.0), (TimeOfDay::END_OF_DAY, 0.0)]
        );
    }

    #[test]
    fn window_starting_at_midnight_is_off_until_end() {
        let day = build_availability(TimeOfDay::MIDNIGHT, t(7, 30), false);
        assert_eq!(
            day.breakpoints(),
            &[(t(7, 30), 0.0), (TimeOfDay::END_OF_DAY, 1.0)]
        );
    }

    #[test]
    fn invert_swaps_on_and_off() {
        let day = build_availability(t(15, 0), t(22, 0), true);
        assert_eq!(
            day.breakpoints(),
            &[(t(15, 0), 0.0), (t(22, 0), 1.0), (TimeOfDay::END_OF_DAY, 0.0)]
        );
    }

    #[test]
    fn minutes_participate_in_ordering() {
        let day = build_availability(t(12, 30), t(12, 45), false);
        assert_eq!(day.value_at(t(12, 29)), 1.0);
        assert_eq!(day.value_at(t(12, 40)), 0.0);
        assert_eq!(day.value_at(t(12, 45)), 1.0);
    }

    #[test]
    fn same_hour_lockout_compares_minutes() {
        // 12:30 -> 12:00 is a wrapped window, not a constant-on day
        let day = build_availability(t(12, 30), t(12, 0), false);
        assert_eq!(
            day.breakpoints(),
            &[(t(12, 0), 0.0), (t(12, 30), 1.0), (TimeOfDay::END_OF_DAY, 0.0)]
        );
        assert_eq!(day.value_at(t(0, 0)), 0.0);
        assert_eq!(day.value_at(t(12, 15)), 1.0);
        assert_eq!(day.value_at(t(18, 0)), 0.0);
        assert_eq!(day.sample(24).iter().filter(|&&v| v == 0.0).count(), 23);
    }

    #[test]
    fn presets_map_to_expected_windows() {
        let occ_start = t(6, 0);
        let occ_end = t(18, 0);
        let all_day =
            AvailabilityWindow::from_preset(AvailabilityPreset::AllDay, occ_start, occ_end);
        assert_eq!(all_day.day_schedule(), DaySchedule::constant(1.0));

        let precool =
            AvailabilityWindow::from_preset(AvailabilityPreset::Precool, occ_start, occ_end);
        assert_eq!((precool.start, precool.end), (t(10, 0), t(22, 0)));

        let occupancy =
            AvailabilityWindow::from_preset(AvailabilityPreset::Occupancy, occ_start, occ_end);
        let day = occupancy.day_schedule();
        assert_eq!(day.value_at(t(5, 0)), 0.0);
        assert_eq!(day.value_at(t(12, 0)), 1.0);
        assert_eq!(day.value_at(t(19, 0)), 0.0);
    }

    #[test]
    fn preset_names_parse_case_insensitively() {
        assert_eq!(
            "Afternoon_Shutoff".parse::<AvailabilityPreset>(),
            Ok(AvailabilityPreset::AfternoonShutoff)
        );
        assert!("weekends".parse::<AvailabilityPreset>().is_err());
        for name in AvailabilityPreset::NAMES {
            let preset: AvailabilityPreset = name.parse().expect("listed preset parses");
            assert_eq!(preset.name(), *name);
        }
    }
}
