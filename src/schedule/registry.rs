//! Named schedule store with get-or-create semantics.
//!
//! Control planning never talks to a host model directly. It asks a
//! [`ScheduleFactory`] for schedules by name, and the [`ScheduleRegistry`]
//! adapter decides whether that means creating a new schedule or handing back
//! one that already exists.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use super::day::DaySchedule;

/// Unit family a schedule's values belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTypeLimit {
    Temperature,
    Dimensionless,
    OnOff,
}

impl fmt::Display for ScheduleTypeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "Temperature",
            Self::Dimensionless => "Dimensionless",
            Self::OnOff => "OnOff",
        };
        f.write_str(name)
    }
}

/// Value source backing a schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleValues {
    /// Same value at every step.
    Constant(f64),
    /// One day profile repeated every day.
    Day(DaySchedule),
    /// One value per step over the horizon, repeating past its end.
    Hourly(Vec<f64>),
}

/// A named schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub name: String,
    pub limit: ScheduleTypeLimit,
    pub values: ScheduleValues,
}

impl Schedule {
    /// Value at `step` of a horizon sampled `steps_per_day` times per day.
    pub fn value_at(&self, step: usize, steps_per_day: usize) -> f64 {
        match &self.values {
            ScheduleValues::Constant(v) => *v,
            ScheduleValues::Day(day) => day.value_at_step(step, steps_per_day),
            ScheduleValues::Hourly(values) if values.is_empty() => 0.0,
            ScheduleValues::Hourly(values) => values[step % values.len()],
        }
    }
}

/// Opaque reference to a schedule held by a [`ScheduleRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(usize);

/// Stable interface for obtaining schedules by name.
///
/// Implementations return the existing schedule when one with the same name
/// is already present; the supplied values are then discarded.
pub trait ScheduleFactory {
    fn constant(&mut self, name: &str, value: f64, limit: ScheduleTypeLimit) -> ScheduleHandle;

    fn day_profile(
        &mut self,
        name: &str,
        day: DaySchedule,
        limit: ScheduleTypeLimit,
    ) -> ScheduleHandle;

    fn hourly(&mut self, name: &str, values: Vec<f64>, limit: ScheduleTypeLimit)
    -> ScheduleHandle;
}

/// In-memory schedule store owned by the caller.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::schedule::{ScheduleFactory, ScheduleRegistry, ScheduleTypeLimit};
///
/// let mut registry = ScheduleRegistry::new();
/// let a = registry.constant("Switchover", 24.0, ScheduleTypeLimit::Dimensionless);
/// let b = registry.constant("Switchover", 12.0, ScheduleTypeLimit::Dimensionless);
/// assert_eq!(a, b);
/// assert_eq!(registry.get(a).value_at(0, 24), 24.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    schedules: Vec<Schedule>,
    by_name: HashMap<String, ScheduleHandle>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a schedule by name.
    pub fn find(&self, name: &str) -> Option<ScheduleHandle> {
        self.by_name.get(name).copied()
    }

    /// Resolves a handle issued by this registry.
    pub fn get(&self, handle: ScheduleHandle) -> &Schedule {
        &self.schedules[handle.0]
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Schedules in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Schedule> {
        self.schedules.iter()
    }

    fn get_or_create(
        &mut self,
        name: &str,
        limit: ScheduleTypeLimit,
        values: impl FnOnce() -> ScheduleValues,
    ) -> ScheduleHandle {
        if let Some(handle) = self.find(name) {
            debug!(schedule = name, "reusing existing schedule");
            return handle;
        }
        let handle = ScheduleHandle(self.schedules.len());
        self.schedules.push(Schedule {
            name: name.to_string(),
            limit,
            values: values(),
        });
        self.by_name.insert(name.to_string(), handle);
        handle
    }
}

impl ScheduleFactory for ScheduleRegistry {
    fn constant(&mut self, name: &str, value: f64, limit: ScheduleTypeLimit) -> ScheduleHandle {
        self.get_or_create(name, limit, || ScheduleValues::Constant(value))
    }

    fn day_profile(
        &mut self,
        name: &str,
        day: DaySchedule,
        limit: ScheduleTypeLimit,
    ) -> ScheduleHandle {
        self.get_or_create(name, limit, || ScheduleValues::Day(day))
    }

    fn hourly(
        &mut self,
        name: &str,
        values: Vec<f64>,
        limit: ScheduleTypeLimit,
    ) -> ScheduleHandle {
        self.get_or_create(name, limit, || ScheduleValues::Hourly(values))
    }
}
