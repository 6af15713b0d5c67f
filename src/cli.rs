use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub weather: Option<PathBuf>,
    pub setpoints_out: Option<PathBuf>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--weather" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --weather (expected a CSV or EPW file path)",
                )?;
                if opts.weather.replace(PathBuf::from(path)).is_some() {
                    return Err("--weather provided more than once".to_string());
                }
            }
            "--setpoints-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --setpoints-out (expected a file path)",
                )?;
                if opts.setpoints_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--setpoints-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                opts.help = true;
                return Ok(opts);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.config.is_none() && opts.preset.is_none() {
        opts.preset = Some("oa_based".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("radiant-setpoint: slab setpoint schedules and radiant panel control planning");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  radiant-setpoint [--config <path> | --preset <name>] [--weather <path>] [--setpoints-out <path>]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load measure configuration from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (oa_based, constant, afternoon_shutoff, peak_lockout)");
    eprintln!("  --weather <path>         Read outdoor dry bulb from a CSV or .epw file");
    eprintln!("  --setpoints-out <path>   Export the slab setpoint series to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the oa_based preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

#[cfg(test)]
mod tests {
    use super::parse_options;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_config_cli() {
        let opts =
            parse_options(&args(&["--config", "measure.toml"])).expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("measure.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_preset_cli() {
        let opts = parse_options(&args(&["--preset", "constant"])).expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("constant"));
        assert!(opts.config.is_none());
    }

    #[test]
    fn defaults_to_oa_based_preset() {
        let opts = parse_options(&[]).expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("oa_based"));
        assert!(!opts.help);
    }

    #[test]
    fn config_and_preset_are_mutually_exclusive() {
        let err = parse_options(&args(&["--config", "a.toml", "--preset", "constant"]));
        assert!(err.is_err_and(|e| e.contains("mutually exclusive")));
    }

    #[test]
    fn weather_and_output_paths_are_collected() {
        let opts = parse_options(&args(&[
            "--weather",
            "denver.epw",
            "--setpoints-out",
            "out.csv",
        ]))
        .expect("parse should succeed");
        assert_eq!(
            opts.weather.as_deref().and_then(|p| p.to_str()),
            Some("denver.epw")
        );
        assert_eq!(
            opts.setpoints_out.as_deref().and_then(|p| p.to_str()),
            Some("out.csv")
        );
    }

    #[test]
    fn missing_value_and_repeats_are_rejected() {
        assert!(parse_options(&args(&["--weather"])).is_err());
        assert!(parse_options(&args(&["--preset", "a", "--preset", "b"])).is_err());
        assert!(parse_options(&args(&["--seed", "1"])).is_err());
    }

    #[test]
    fn help_short_circuits() {
        let opts = parse_options(&args(&["--help", "--bogus"])).expect("parse should succeed");
        assert!(opts.help);
    }
}
