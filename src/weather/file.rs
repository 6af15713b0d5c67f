//! Outdoor temperature series read from CSV and EPW weather files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::WeatherError;
use crate::setpoint::TemperatureSeries;

/// Header lines preceding the hourly records of an EPW file.
pub const EPW_HEADER_LINES: usize = 8;
/// Zero-based field holding the dry bulb temperature (°C) in an EPW record.
pub const EPW_DRY_BULB_FIELD: usize = 6;

fn open(path: &Path) -> Result<File, WeatherError> {
    File::open(path).map_err(|source| WeatherError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_reading(row: usize, raw: &str) -> Result<f64, WeatherError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WeatherError::InvalidValue {
            row,
            value: raw.to_string(),
        })
}

/// Reads the `column` field of every data row of a headed CSV file.
///
/// # Errors
///
/// Fails when the file cannot be opened, the column is absent from the
/// header, a value is not a finite number, or there are no data rows.
pub fn load_csv(
    path: &Path,
    column: &str,
    steps_per_day: usize,
) -> Result<TemperatureSeries, WeatherError> {
    read_csv(open(path)?, column, steps_per_day)
}

/// Same as [`load_csv`] over any reader.
///
/// # Examples
///
/// ```
/// use radiant_setpoint::weather::read_csv;
///
/// let data = "hour,dry_bulb_c\n0,10.0\n1,20.5\n";
/// let series = read_csv(data.as_bytes(), "dry_bulb_c", 24).unwrap();
/// assert_eq!(series.readings(), &[10.0, 20.5]);
/// ```
pub fn read_csv(
    reader: impl Read,
    column: &str,
    steps_per_day: usize,
) -> Result<TemperatureSeries, WeatherError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let index = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| WeatherError::MissingColumn(column.to_string()))?;

    let mut readings = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let raw = record.get(index).unwrap_or("");
        readings.push(parse_reading(i + 1, raw)?);
    }
    Ok(TemperatureSeries::with_steps_per_day(readings, steps_per_day)?)
}

/// Reads the hourly dry bulb temperatures of an EPW weather file.
///
/// # Errors
///
/// Same failure classes as [`load_csv`]; rows too short to hold a dry bulb
/// field are reported as invalid values.
pub fn load_epw(path: &Path) -> Result<TemperatureSeries, WeatherError> {
    read_epw(open(path)?)
}

/// Same as [`load_epw`] over any reader.
pub fn read_epw(reader: impl Read) -> Result<TemperatureSeries, WeatherError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (i, record) in rdr.records().enumerate().skip(EPW_HEADER_LINES) {
        let record = record?;
        let raw = record.get(EPW_DRY_BULB_FIELD).unwrap_or("");
        readings.push(parse_reading(i + 1, raw)?);
    }
    Ok(TemperatureSeries::new(readings)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetpointError;

    fn epw(rows: &[&str]) -> String {
        let mut text = String::new();
        text.push_str("LOCATION,Denver Centennial,CO,USA,TMY3,724666,39.74,-105.18,-7.0,1829.0\n");
        text.push_str("DESIGN CONDITIONS,0\n");
        text.push_str("TYPICAL/EXTREME PERIODS,0\n");
        text.push_str("GROUND TEMPERATURES,0\n");
        text.push_str("HOLIDAYS/DAYLIGHT SAVINGS,No,0,0,0\n");
        text.push_str("COMMENTS 1,Custom/User Format\n");
        text.push_str("COMMENTS 2,\n");
        text.push_str("DATA PERIODS,1,1,Data,Sunday, 1/ 1,12/31\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn csv_column_is_selected_by_name() {
        let data = "step, wet_bulb_c, dry_bulb_c\n0, 1.0, -3.5\n1, 2.0, -2.0\n2, 2.5, 0.5\n";
        let series = read_csv(data.as_bytes(), "dry_bulb_c", 24).ok();
        assert_eq!(
            series.as_ref().map(TemperatureSeries::readings),
            Some(&[-3.5, -2.0, 0.5][..])
        );
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let data = "step,temp\n0,1.0\n";
        let err = read_csv(data.as_bytes(), "dry_bulb_c", 24);
        assert!(matches!(err, Err(WeatherError::MissingColumn(c)) if c == "dry_bulb_c"));
    }

    #[test]
    fn csv_bad_value_names_row() {
        let data = "dry_bulb_c\n1.0\nwarm\n";
        let err = read_csv(data.as_bytes(), "dry_bulb_c", 24);
        assert!(matches!(
            err,
            Err(WeatherError::InvalidValue { row: 2, ref value }) if value == "warm"
        ));
    }

    #[test]
    fn csv_without_rows_is_empty_series() {
        let err = read_csv("dry_bulb_c\n".as_bytes(), "dry_bulb_c", 24);
        assert!(matches!(
            err,
            Err(WeatherError::Series(SetpointError::EmptySeries))
        ));
    }

    #[test]
    fn epw_dry_bulb_follows_header() {
        let text = epw(&[
            "1999,1,1,1,0,?9?9?9,-4.4,-9.4,68,81100,0,0,240",
            "1999,1,1,2,0,?9?9?9,-5.0,-9.4,71,81100,0,0,236",
        ]);
        let series = read_epw(text.as_bytes()).ok();
        assert_eq!(
            series.as_ref().map(TemperatureSeries::readings),
            Some(&[-4.4, -5.0][..])
        );
    }

    #[test]
    fn epw_short_row_is_invalid() {
        let text = epw(&["1999,1,1,1,0"]);
        let err = read_epw(text.as_bytes());
        assert!(matches!(err, Err(WeatherError::InvalidValue { row: 9, .. })));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_epw(Path::new("/nonexistent/weather.epw"));
        assert!(matches!(err, Err(WeatherError::Io { ref path, .. }) if path.ends_with("weather.epw")));
    }
}
