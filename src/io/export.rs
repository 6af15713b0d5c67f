//! CSV export for synthesized slab setpoints.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::setpoint::{ClampedSetpointSeries, TemperatureSeries};

/// Column header for setpoint CSV export.
const HEADER: &str = "step,hour_of_day,outdoor_c,rolling_mean_c,setpoint_c";

/// Exports the outdoor series and its slab setpoints to a CSV file.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `outdoor` - Outdoor temperature series the setpoints were synthesized from
/// * `setpoints` - Clamped setpoint series, one value per outdoor reading
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(
    outdoor: &TemperatureSeries,
    setpoints: &ClampedSetpointSeries,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(outdoor, setpoints, buf)
}

/// Writes the setpoint table as CSV to any writer.
///
/// Rows stop at the shorter of the two series.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    outdoor: &TemperatureSeries,
    setpoints: &ClampedSetpointSeries,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let spd = outdoor.steps_per_day();

    wtr.write_record(HEADER.split(','))?;

    let rows = outdoor
        .readings()
        .iter()
        .zip(setpoints.rolling().values())
        .zip(setpoints.setpoints())
        .enumerate();
    for (step, ((oat, mean), sp)) in rows {
        let hour = (step % spd) as f64 * 24.0 / spd as f64;
        wtr.write_record(&[
            step.to_string(),
            format!("{hour:.2}"),
            format!("{oat:.1}"),
            format!("{mean:.2}"),
            format!("{sp:.1}"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
