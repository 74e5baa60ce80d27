//! Conversion between canonical and display values.
//!
//! Lengths are canonically centimeters, angles degrees. Every conversion is a
//! single multiplication by a constant factor, so `from_display` is an exact
//! inverse of `to_display` up to floating-point rounding.

use velo_types::DisplayUnit;

/// Millimeters per centimeter.
pub const MM_PER_CM: f64 = 10.0;
/// Inches per centimeter.
pub const INCH_PER_CM: f64 = 0.393701;
/// Decimal places used when a parameter does not declare its own precision.
pub const DEFAULT_PRECISION: u32 = 2;

/// Factor that takes a canonical value into `unit`.
pub fn factor(unit: DisplayUnit) -> f64 {
    match unit {
        DisplayUnit::None | DisplayUnit::Centimeter | DisplayUnit::Degree => 1.0,
        DisplayUnit::Millimeter => MM_PER_CM,
        DisplayUnit::Inch => INCH_PER_CM,
    }
}

pub fn to_display(value: f64, unit: DisplayUnit) -> f64 {
    value * factor(unit)
}

pub fn from_display(display: f64, unit: DisplayUnit) -> f64 {
    display / factor(unit)
}

/// Finest precision `round` honors; f64 carries no more decimal digits.
pub const MAX_PRECISION: u32 = 15;

/// Round half away from zero to `precision` decimal places, capped at
/// [`MAX_PRECISION`].
pub fn round(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn millimeters_scale_by_ten() {
        assert_relative_eq!(to_display(5.2, DisplayUnit::Millimeter), 52.0);
        assert_relative_eq!(from_display(52.0, DisplayUnit::Millimeter), 5.2);
    }

    #[test]
    fn inches_use_fixed_factor() {
        assert_relative_eq!(to_display(100.0, DisplayUnit::Inch), 39.3701);
        assert_relative_eq!(from_display(39.3701, DisplayUnit::Inch), 100.0);
    }

    #[test]
    fn identity_units() {
        for unit in [DisplayUnit::None, DisplayUnit::Centimeter, DisplayUnit::Degree] {
            assert_eq!(to_display(71.5, unit), 71.5);
            assert_eq!(from_display(71.5, unit), 71.5);
        }
    }

    #[test]
    fn round_defaults_and_custom_precision() {
        assert_eq!(round(21.653_55, DEFAULT_PRECISION), 21.65);
        assert_eq!(round(21.655_1, DEFAULT_PRECISION), 21.66);
        assert_eq!(round(27.26, 1), 27.3);
        assert_eq!(round(-3.14159, 3), -3.142);
        assert_eq!(round(42.0, 0), 42.0);
    }

    #[test]
    fn round_caps_excessive_precision() {
        assert_eq!(round(1.25, 400), 1.25);
        assert_eq!(round(1.25, u32::MAX), 1.25);
        assert_eq!(round(1.25, 400), round(1.25, MAX_PRECISION));
    }
}
