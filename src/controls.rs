//! Radiant ceiling panel control planning.
//!
//! [`plan_radiant_system`] turns a validated [`MeasureConfig`] and an outdoor
//! temperature series into a [`RadiantPlan`]: every schedule the radiant
//! system needs, one [`ZoneRadiantLoop`] per thermal zone, the design
//! parameters for the site's climate zone, and the output variable requests.
//! Schedules are obtained through [`ScheduleFactory`] so a schedule that
//! already exists under the same name is reused rather than duplicated.

use std::fmt;
use std::str::FromStr;

use tracing::{error, info};

use crate::config::{ConfigError, MeasureConfig};
use crate::design::RadiantDesign;
use crate::error::PlanError;
use crate::outputs::{OutputVariable, ReportingFrequency, radiant_output_variables};
use crate::schedule::{
    AvailabilityWindow, ScheduleFactory, ScheduleHandle, ScheduleRegistry, ScheduleTypeLimit,
};
use crate::setpoint::{ClampedSetpointSeries, SetpointSummary, SetpointSynthesizer, TemperatureSeries};

pub const SLAB_SETPOINT_SCHEDULE: &str = "Sch_Radiant_SlabSetP_Based_On_Rolling_Mean_OAT";
pub const SWITCHOVER_SCHEDULE: &str = "Radiant System Switchover";
pub const AVAILABILITY_SCHEDULE: &str = "Radiant System Availability Schedule";
/// Surface type the radiant loops condition.
pub const RADIANT_SURFACE_TYPE: &str = "Ceilings";

/// How the slab control temperature is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStrategy {
    /// Setpoint follows the rolling mean outdoor temperature.
    OaBased,
    /// Fixed heating and cooling control temperatures.
    Constant,
}

impl ControlStrategy {
    pub const NAMES: &[&str] = &["oa_based_control", "constant_control"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OaBased => "oa_based_control",
            Self::Constant => "constant_control",
        }
    }
}

impl FromStr for ControlStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oa_based_control" => Ok(Self::OaBased),
            "constant_control" => Ok(Self::Constant),
            other => Err(format!(
                "unknown control strategy \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for ControlStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One radiant coil and the schedule driving its control temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiantCoil {
    pub name: String,
    pub control_schedule: ScheduleHandle,
    /// Full throttling range around the control temperature (K).
    pub throttling_range_k: f64,
}

/// Low temperature variable flow radiant loop serving one thermal zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRadiantLoop {
    pub zone: String,
    pub name: String,
    pub heating_coil: RadiantCoil,
    pub cooling_coil: RadiantCoil,
    pub availability: ScheduleHandle,
    pub changeover_delay: ScheduleHandle,
    pub surface_type: &'static str,
    pub tubing_inside_diameter_m: f64,
    pub circuit_length_m: f64,
    pub temperature_control_type: String,
    pub setpoint_control_type: String,
}

/// Everything needed to add radiant ceiling panels to a building model.
#[derive(Debug, Clone)]
pub struct RadiantPlan {
    pub strategy: ControlStrategy,
    /// Resolution of the schedules, taken from the weather series when present.
    pub steps_per_day: usize,
    pub design: RadiantDesign,
    pub availability_window: AvailabilityWindow,
    pub hot_water_loop_temp: ScheduleHandle,
    pub chilled_water_loop_temp: ScheduleHandle,
    pub heating_threshold: ScheduleHandle,
    pub cooling_threshold: ScheduleHandle,
    pub availability: ScheduleHandle,
    pub switchover: ScheduleHandle,
    pub zones: Vec<ZoneRadiantLoop>,
    /// Present for outdoor-air based control.
    pub setpoints: Option<ClampedSetpointSeries>,
    pub summary: Option<SetpointSummary>,
    pub outputs: Vec<OutputVariable>,
    pub registry: ScheduleRegistry,
}

/// Replaces characters that schedule names cannot carry with `_`.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::controls::sanitize_zone_name;
///
/// assert_eq!(sanitize_zone_name("Office 2-East.A,B+C"), "Office_2_East_A_B_C");
/// ```
pub fn sanitize_zone_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '+' | ',' | '-' | '.' => '_',
            other => other,
        })
        .collect()
}

/// Heating and cooling control schedules of one zone.
struct ZoneControls {
    heating: ScheduleHandle,
    cooling: ScheduleHandle,
}

/// Registers the slab setpoint schedule shared by every zone.
fn add_oa_based_controls<F: ScheduleFactory>(
    factory: &mut F,
    setpoints: &ClampedSetpointSeries,
) -> ZoneControls {
    let handle = factory.hourly(
        SLAB_SETPOINT_SCHEDULE,
        setpoints.setpoints().to_vec(),
        ScheduleTypeLimit::Temperature,
    );
    ZoneControls {
        heating: handle,
        cooling: handle,
    }
}

/// Registers fixed control temperature schedules for one zone.
fn add_constant_controls<F: ScheduleFactory>(
    factory: &mut F,
    zone: &str,
    htg_setpoint_c: f64,
    clg_setpoint_c: f64,
) -> ZoneControls {
    let zone = sanitize_zone_name(zone);
    ZoneControls {
        heating: factory.constant(
            &format!("{zone}_Sch_Radiant_HtgSetP"),
            htg_setpoint_c,
            ScheduleTypeLimit::Temperature,
        ),
        cooling: factory.constant(
            &format!("{zone}_Sch_Radiant_ClgSetP"),
            clg_setpoint_c,
            ScheduleTypeLimit::Temperature,
        ),
    }
}

/// Plans the radiant system for every configured zone.
///
/// `series` is only consulted for outdoor-air based control.
///
/// # Errors
///
/// - [`PlanError::MissingWeather`] when outdoor-air control has no series.
/// - [`PlanError::Setpoint`] when the series cannot support the window or
///   the calibration anchors share a temperature.
/// - [`PlanError::Config`] for an unknown strategy or reporting frequency.
pub fn plan_radiant_system(
    config: &MeasureConfig,
    series: Option<&TemperatureSeries>,
) -> Result<RadiantPlan, PlanError> {
    let strategy: ControlStrategy = config
        .controls
        .strategy
        .parse()
        .map_err(|e: String| ConfigError::new("controls.strategy", e))?;
    let frequency: ReportingFrequency = config
        .outputs
        .reporting_frequency
        .parse()
        .map_err(|e: String| ConfigError::new("outputs.reporting_frequency", e))?;

    let design = RadiantDesign::for_climate_zone(config.site.climate_zone());
    let mut registry = ScheduleRegistry::new();

    let hot_water_loop_temp = registry.constant(
        &format!("Hot Water Loop Temp - {:.0}F", design.hw_supply_f),
        design.hw_supply_c,
        ScheduleTypeLimit::Temperature,
    );
    let chilled_water_loop_temp = registry.constant(
        &format!("Chilled Water Loop Temp - {:.0}F", design.chw_supply_f),
        design.chw_supply_c,
        ScheduleTypeLimit::Temperature,
    );
    let heating_threshold = registry.constant(
        &format!(
            "Zone Radiant Loop Heating Threshold Temperature Schedule - {:.0}F",
            crate::design::ZONE_HTG_THRESHOLD_F
        ),
        design.zone_htg_threshold_c,
        ScheduleTypeLimit::Temperature,
    );
    let cooling_threshold = registry.constant(
        &format!(
            "Zone Radiant Loop Cooling Threshold Temperature Schedule - {:.0}F",
            crate::design::ZONE_CLG_THRESHOLD_F
        ),
        design.zone_clg_threshold_c,
        ScheduleTypeLimit::Temperature,
    );

    let availability_window = config.availability_window();
    let availability = registry.day_profile(
        AVAILABILITY_SCHEDULE,
        availability_window.day_schedule(),
        ScheduleTypeLimit::OnOff,
    );
    let switchover = registry.constant(
        SWITCHOVER_SCHEDULE,
        config.controls.switch_over_time,
        ScheduleTypeLimit::Dimensionless,
    );

    let setpoints = match strategy {
        ControlStrategy::OaBased => {
            let series = series.ok_or(PlanError::MissingWeather)?;
            let (low, high) = config.calibration_points();
            let window = config
                .slab
                .window_steps(series.steps_per_day())
                .ok_or_else(|| ConfigError::new("slab.window_hours", "overflows the step count"))?;
            Some(SetpointSynthesizer::new(window, low, high)?.synthesize(series)?)
        }
        ControlStrategy::Constant => None,
    };

    let mut zones = Vec::with_capacity(config.building.zones.len());
    for zone in &config.building.zones {
        info!("adding radiant loop for {zone}");
        if zone.contains(':') {
            error!(
                "thermal zone '{zone}' has a restricted character ':' in the name and will not \
                 work with some EMS and output reporting objects; rename the zone"
            );
        }

        let controls = match &setpoints {
            Some(series) => add_oa_based_controls(&mut registry, series),
            None => add_constant_controls(
                &mut registry,
                zone,
                config.slab.htg_setpoint_c,
                config.slab.clg_setpoint_c,
            ),
        };

        zones.push(ZoneRadiantLoop {
            zone: zone.clone(),
            name: format!("{zone} Radiant Loop"),
            heating_coil: RadiantCoil {
                name: format!("{zone} Radiant Loop Heating Coil"),
                control_schedule: controls.heating,
                throttling_range_k: design.throttling_range_k,
            },
            cooling_coil: RadiantCoil {
                name: format!("{zone} Radiant Loop Cooling Coil"),
                control_schedule: controls.cooling,
                throttling_range_k: design.throttling_range_k,
            },
            availability,
            changeover_delay: switchover,
            surface_type: RADIANT_SURFACE_TYPE,
            tubing_inside_diameter_m: crate::design::TUBING_INSIDE_DIAMETER_M,
            circuit_length_m: crate::design::CIRCUIT_LENGTH_M,
            temperature_control_type: config.controls.temperature_control_type.clone(),
            setpoint_control_type: config.controls.setpoint_control_type.clone(),
        });
    }

    let outputs = if config.outputs.add_output_variables {
        radiant_output_variables(frequency)
    } else {
        Vec::new()
    };

    let summary = setpoints.as_ref().map(SetpointSummary::from_series);

    Ok(RadiantPlan {
        strategy,
        steps_per_day: series.map_or(24, TemperatureSeries::steps_per_day),
        design,
        availability_window,
        hot_water_loop_temp,
        chilled_water_loop_temp,
        heating_threshold,
        cooling_threshold,
        availability,
        switchover,
        zones,
        setpoints,
        summary,
        outputs,
        registry,
    })
}

impl RadiantPlan {
    /// Heating and cooling control temperatures of `zone` at `step`.
    pub fn control_temperatures(&self, zone: &ZoneRadiantLoop, step: usize) -> (f64, f64) {
        let htg = self.registry.get(zone.heating_coil.control_schedule);
        let clg = self.registry.get(zone.cooling_coil.control_schedule);
        (
            htg.value_at(step, self.steps_per_day),
            clg.value_at(step, self.steps_per_day),
        )
    }
}

impl fmt::Display for RadiantPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.design;
        let (slab_r, ext_r, roof_r) = d.nominal_r_values();
        let zone = d
            .climate_zone
            .as_ref()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        let window = &self.availability_window;

        writeln!(f, "--- Radiant Plan ---")?;
        writeln!(f, "Control strategy:      {}", self.strategy)?;
        writeln!(f, "Climate zone:          {zone}")?;
        writeln!(
            f,
            "Insulation:            R-{slab_r} slab, R-{ext_r} exterior floor, R-{roof_r} roof"
        )?;
        writeln!(
            f,
            "Hot water supply:      {:.1} C ({:.0}F)",
            d.hw_supply_c, d.hw_supply_f
        )?;
        writeln!(
            f,
            "Chilled water supply:  {:.1} C ({:.0}F)",
            d.chw_supply_c, d.chw_supply_f
        )?;
        writeln!(
            f,
            "Availability window:   {} to {}{}",
            window.start,
            window.end,
            if window.invert { " (inverted)" } else { "" }
        )?;
        writeln!(f, "Radiant zones:         {}", self.zones.len())?;
        writeln!(f, "Schedules:             {}", self.registry.len())?;
        write!(f, "Output variables:      {}", self.outputs.len())
    }
}
