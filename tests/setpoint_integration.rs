//! Integration tests for slab setpoint synthesis over a full weather year.

mod common;

use radiant_setpoint::error::SetpointError;
use radiant_setpoint::schedule::{AvailabilityWindow, TimeOfDay, build_availability};
use radiant_setpoint::setpoint::{
    CalibrationPoint, SetpointSummary, SetpointSynthesizer, TemperatureSeries, rolling_average,
    synthesize,
};
use radiant_setpoint::weather::SyntheticWeather;

#[test]
fn full_year_produces_one_setpoint_per_hour() {
    let series = common::synthetic_year();
    let (low, high) = common::default_anchors();
    let out = synthesize(&series, 24, low, high).expect("synthesis should succeed");
    assert_eq!(out.len(), common::HOURS_PER_YEAR);
    assert_eq!(out.rolling().len(), common::HOURS_PER_YEAR);
}

#[test]
fn every_setpoint_lies_within_rounded_anchor_range() {
    let series = common::synthetic_year();
    let (low, high) = common::default_anchors();
    let out = synthesize(&series, 24, low, high).expect("synthesis should succeed");
    let (lower, upper) = out.bounds();
    assert!(lower < upper);
    assert!(
        out.setpoints().iter().all(|&sp| (lower..=upper).contains(&sp)),
        "setpoints escaped [{lower}, {upper}]"
    );
}

#[test]
fn setpoints_are_rounded_to_one_decimal() {
    let series = common::synthetic_year();
    let (low, high) = common::default_anchors();
    let out = synthesize(&series, 24, low, high).expect("synthesis should succeed");
    for &sp in out.setpoints() {
        assert!((sp * 10.0 - (sp * 10.0).round()).abs() < 1e-6, "{sp} not rounded");
    }
}

#[test]
fn cold_winter_pins_upper_and_hot_summer_pins_lower() {
    // winters near 0 °C, summers near 30 °C
    let series = SyntheticWeather::new(15.0, 15.0, 6.0, 1.0, 24, 42)
        .generate(365)
        .expect("synthetic year");
    let (low, high) = common::default_anchors();
    let out = synthesize(&series, 24, low, high).expect("synthesis should succeed");
    let (lower, upper) = out.bounds();

    // mid-January and mid-July noon
    assert_eq!(out.value_at(14 * 24 + 12), upper);
    assert_eq!(out.value_at(196 * 24 + 12), lower);

    let summary = SetpointSummary::from_series(&out);
    assert!(summary.steps_at_upper > 0);
    assert!(summary.steps_at_lower > 0);
    assert!(summary.mean > lower && summary.mean < upper);
}

#[test]
fn synthesis_is_deterministic() {
    let (low, high) = common::default_anchors();
    let a = synthesize(&common::synthetic_year(), 24, low, high).expect("synthesis");
    let b = synthesize(&common::synthetic_year(), 24, low, high).expect("synthesis");
    assert_eq!(a.setpoints(), b.setpoints());
}

#[test]
fn first_rolling_mean_wraps_around_year_end() {
    let series = common::synthetic_year();
    let rolling = rolling_average(&series, 24).expect("rolling average");
    let readings = series.readings();
    let n = readings.len();
    let expected: f64 = (readings[n - 23..].iter().sum::<f64>() + readings[0]) / 24.0;
    assert!((rolling.values()[0] - expected).abs() <= 0.005 + 1e-9);
}

#[test]
fn window_equal_to_length_gives_flat_mean() {
    let series = TemperatureSeries::new(vec![5.0, 10.0, 15.0, 30.0]).expect("series");
    let rolling = rolling_average(&series, 4).expect("rolling average");
    assert_eq!(rolling.values(), &[15.0, 15.0, 15.0, 15.0]);
}

#[test]
fn swapped_anchor_order_gives_same_setpoints() {
    let series = common::synthetic_year();
    let (low, high) = common::default_anchors();
    let forward = synthesize(&series, 24, low, high).expect("synthesis");
    let backward = synthesize(&series, 24, high, low).expect("synthesis");
    assert_eq!(forward.bounds(), backward.bounds());
    let diverging = forward
        .setpoints()
        .iter()
        .zip(backward.setpoints())
        .filter(|(a, b)| (*a - *b).abs() > 0.1 + 1e-9)
        .count();
    assert_eq!(diverging, 0);
}

#[test]
fn invalid_inputs_are_rejected_before_computation() {
    let series = TemperatureSeries::new(vec![10.0, 12.0]).expect("series");
    let same = CalibrationPoint::new(18.0, 22.0);

    assert_eq!(
        synthesize(&series, 3, same, same).err(),
        Some(SetpointError::InvalidWindow { window: 3, len: 2 })
    );
    assert_eq!(
        synthesize(&series, 1, same, same).err(),
        Some(SetpointError::DegenerateCalibration { temperature: 18.0 })
    );
    assert_eq!(
        TemperatureSeries::new(Vec::new()).err(),
        Some(SetpointError::EmptySeries)
    );
    assert_eq!(
        TemperatureSeries::new(vec![1.0, f64::NAN]).err(),
        Some(SetpointError::NonFiniteReading { index: 1 })
    );
}

#[test]
fn reusable_synthesizer_matches_free_function() {
    let series = common::synthetic_year();
    let (low, high) = common::default_anchors();
    let synth = SetpointSynthesizer::new(24, low, high).expect("synthesizer");
    let a = synth.synthesize(&series).expect("synthesis");
    let b = synthesize(&series, 24, low, high).expect("synthesis");
    assert_eq!(a.setpoints(), b.setpoints());
}

#[test]
fn availability_profile_sampled_hourly() {
    let t = |h| TimeOfDay::new(h, 0).expect("valid hour");
    let day = build_availability(t(15), t(22), false);
    let hourly = day.sample(24);
    let off: Vec<usize> = (0..24).filter(|&h| hourly[h] == 0.0).collect();
    assert_eq!(off, (15..22).collect::<Vec<_>>());

    let precool = AvailabilityWindow::new(t(10), t(22)).inverted().day_schedule();
    let hourly = precool.sample(24);
    assert_eq!(hourly.iter().filter(|&&v| v == 1.0).count(), 12);
}
