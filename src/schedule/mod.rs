/// Radiant availability windows and presets.
pub mod availability;
/// Day profiles and times of day.
pub mod day;
pub mod registry;

pub use availability::{AvailabilityPreset, AvailabilityWindow, build_availability};
pub use day::{DaySchedule, TimeOfDay};
pub use registry::{
    Schedule, ScheduleFactory, ScheduleHandle, ScheduleRegistry, ScheduleTypeLimit,
    ScheduleValues,
};
