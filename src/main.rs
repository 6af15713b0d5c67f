//! Radiant setpoint entry point: CLI wiring and config-driven planning.

mod cli;

use std::path::Path;
use std::process;

use radiant_setpoint::config::MeasureConfig;
use radiant_setpoint::controls::{ControlStrategy, plan_radiant_system};
use radiant_setpoint::io::export_csv;
use radiant_setpoint::logging;
use radiant_setpoint::weather::{WeatherSource, load_weather};
use tracing::level_filters::LevelFilter;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }

    if let Err(e) = logging::init(LevelFilter::INFO) {
        eprintln!("warning: logging disabled: {e}");
    }

    // --config takes priority; the parser defaults to the oa_based preset
    let mut config = match (&cli.config, &cli.preset) {
        (Some(path), _) => MeasureConfig::from_toml_file(path),
        (None, Some(name)) => MeasureConfig::from_preset(name),
        (None, None) => Ok(MeasureConfig::oa_based()),
    }
    .unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(path) = &cli.weather {
        config.weather.source = WeatherSource::for_path(path).to_string();
        config.weather.path = Some(path.to_string_lossy().into_owned());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let needs_weather =
        config.controls.strategy.parse::<ControlStrategy>() == Ok(ControlStrategy::OaBased);
    let series = if needs_weather {
        Some(load_weather(&config.weather).unwrap_or_else(|e| fail(e)))
    } else {
        None
    };

    let plan = plan_radiant_system(&config, series.as_ref()).unwrap_or_else(|e| fail(e));

    println!("{plan}");
    if let Some(summary) = &plan.summary {
        println!("\n{summary}");
    }

    if let Some(path) = &cli.setpoints_out {
        let (Some(outdoor), Some(setpoints)) = (&series, &plan.setpoints) else {
            fail(format!(
                "--setpoints-out needs outdoor-air based control, got \"{}\"",
                plan.strategy
            ));
        };
        if let Err(e) = export_csv(outdoor, setpoints, Path::new(path)) {
            fail(format!("failed to write CSV: {e}"));
        }
        eprintln!("Setpoints written to {}", path.display());
    }
}
