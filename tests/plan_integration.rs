//! Integration tests for radiant system planning from configuration.

mod common;

use radiant_setpoint::config::MeasureConfig;
use radiant_setpoint::controls::{
    AVAILABILITY_SCHEDULE, ControlStrategy, SLAB_SETPOINT_SCHEDULE, SWITCHOVER_SCHEDULE,
    plan_radiant_system,
};
use radiant_setpoint::error::{PlanError, SetpointError, WeatherError};
use radiant_setpoint::schedule::ScheduleValues;
use radiant_setpoint::weather::load_weather;

fn plan_preset(name: &str) -> radiant_setpoint::controls::RadiantPlan {
    let cfg = MeasureConfig::from_preset(name).expect("preset should load");
    let series = load_weather(&cfg.weather).expect("synthetic weather should load");
    plan_radiant_system(&cfg, Some(&series)).expect("plan should succeed")
}

#[test]
fn every_preset_plans_cleanly() {
    for name in MeasureConfig::PRESETS {
        let plan = plan_preset(name);
        assert_eq!(plan.zones.len(), 3, "preset {name}");
        assert!(plan.registry.find(AVAILABILITY_SCHEDULE).is_some());
        assert!(plan.registry.find(SWITCHOVER_SCHEDULE).is_some());
        assert!(!plan.outputs.is_empty());
    }
}

#[test]
fn slab_schedule_holds_one_value_per_weather_step() {
    let plan = plan_preset("oa_based");
    assert_eq!(plan.strategy, ControlStrategy::OaBased);
    let handle = plan.registry.find(SLAB_SETPOINT_SCHEDULE).expect("slab schedule");
    match &plan.registry.get(handle).values {
        ScheduleValues::Hourly(values) => assert_eq!(values.len(), common::HOURS_PER_YEAR),
        other => panic!("expected hourly values, got {other:?}"),
    }

    let zone = &plan.zones[1];
    let setpoints = plan.setpoints.as_ref().expect("setpoints");
    for step in [0, 100, 5000, 8759] {
        let (htg, clg) = plan.control_temperatures(zone, step);
        assert_eq!(htg, setpoints.value_at(step));
        assert_eq!(clg, htg);
    }
}

#[test]
fn constant_preset_registers_per_zone_schedules() {
    let plan = plan_preset("constant");
    assert!(plan.setpoints.is_none());
    // 4 loop/threshold temps + availability + switchover + 2 per zone
    assert_eq!(plan.registry.len(), 6 + 2 * plan.zones.len());
    let names: Vec<&str> = plan.registry.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"Perimeter_Zone_1_Sch_Radiant_HtgSetP"));
    assert!(names.contains(&"Core_Zone_Sch_Radiant_ClgSetP"));
}

#[test]
fn oa_plan_shares_slab_schedule_across_zones() {
    let plan = plan_preset("afternoon_shutoff");
    // 4 loop/threshold temps + availability + switchover + 1 shared slab schedule
    assert_eq!(plan.registry.len(), 7);
}

#[test]
fn peak_lockout_turns_system_off_midday() {
    let plan = plan_preset("peak_lockout");
    let avail = plan.registry.get(plan.availability);
    let hourly: Vec<f64> = (0..24).map(|h| avail.value_at(h, 24)).collect();
    assert!(hourly[..12].iter().all(|&v| v == 1.0));
    assert!(hourly[12..20].iter().all(|&v| v == 0.0));
    assert!(hourly[20..].iter().all(|&v| v == 1.0));
}

#[test]
fn warm_climate_uses_lower_hot_water_temperature() {
    let cold = plan_preset("oa_based");
    let warm = plan_preset("peak_lockout");
    assert!(warm.design.hw_supply_c < cold.design.hw_supply_c);
    assert!(warm.design.insulation_mult < cold.design.insulation_mult);
}

#[test]
fn csv_weather_file_drives_the_plan() {
    let path = common::temp_file("plan_ramp.csv", &common::ramp_weather_csv(2, 0.0, 1.0));
    let mut cfg = MeasureConfig::oa_based();
    cfg.weather.source = "csv".to_string();
    cfg.weather.path = Some(path.to_string_lossy().into_owned());
    assert!(cfg.validate().is_empty());

    let series = load_weather(&cfg.weather).expect("csv weather should load");
    assert_eq!(series.len(), 48);

    let plan = plan_radiant_system(&cfg, Some(&series)).expect("plan");
    let setpoints = plan.setpoints.as_ref().expect("setpoints");
    let (lower, upper) = setpoints.bounds();
    // the ramp starts far below the low anchor and ends above the high one
    assert_eq!(setpoints.setpoints()[20], upper);
    assert_eq!(setpoints.setpoints()[47], lower);
}

#[test]
fn window_longer_than_weather_is_reported() {
    let path = common::temp_file("plan_short.csv", &common::ramp_weather_csv(1, 10.0, 0.0));
    let mut cfg = MeasureConfig::oa_based();
    cfg.weather.source = "csv".to_string();
    cfg.weather.path = Some(path.to_string_lossy().into_owned());
    cfg.slab.window_hours = 48;

    let series = load_weather(&cfg.weather).expect("csv weather should load");
    let result = plan_radiant_system(&cfg, Some(&series));
    assert!(matches!(result, Err(PlanError::Setpoint(_))));
}

#[test]
fn missing_weather_file_is_an_io_error() {
    let mut cfg = MeasureConfig::oa_based();
    cfg.weather.source = "epw".to_string();
    cfg.weather.path = Some("does/not/exist.epw".to_string());
    assert!(matches!(
        load_weather(&cfg.weather),
        Err(WeatherError::Io { .. })
    ));
}

#[test]
fn nan_anchor_is_rejected_by_validation_and_planning() {
    let mut cfg = MeasureConfig::oa_based();
    cfg.slab.oat_high_f = f64::NAN;
    assert!(cfg.validate().iter().any(|e| e.field == "slab.oat_high_f"));

    let series = load_weather(&cfg.weather).expect("synthetic weather should load");
    let result = plan_radiant_system(&cfg, Some(&series));
    assert!(matches!(
        result,
        Err(PlanError::Setpoint(SetpointError::NonFiniteAnchor { .. }))
    ));
}
