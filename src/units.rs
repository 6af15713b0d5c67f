//! Imperial/SI conversions used by the design table and slab calibration.

/// Metres per inch.
pub const M_PER_INCH: f64 = 0.0254;

/// Converts an absolute temperature from °F to °C.
pub fn f_to_c(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Converts an absolute temperature from °C to °F.
pub fn c_to_f(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Converts a temperature difference from °R (same size as °F) to K.
pub fn delta_r_to_k(r: f64) -> f64 {
    r * 5.0 / 9.0
}

/// Converts a length in inches to metres.
pub fn inches_to_m(inches: f64) -> f64 {
    inches * M_PER_INCH
}

/// Rounds `value` half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_and_boiling_points() {
        assert!(f_to_c(32.0).abs() < 1e-12);
        assert!((f_to_c(212.0) - 100.0).abs() < 1e-12);
        assert!((c_to_f(20.0) - 68.0).abs() < 1e-12);
    }

    #[test]
    fn delta_conversion_ignores_offset() {
        assert!((delta_r_to_k(9.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn round_to_is_half_away_from_zero() {
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(70.50025, 1), 70.5);
        assert_eq!(round_to(-0.333_333, 4), -0.3333);
    }
}
