//! Configuration for a parameter store.

use serde::{Deserialize, Serialize};
use velo_types::LengthUnit;

use crate::units::DEFAULT_PRECISION;

/// Controls how values cross the display/canonical boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Unit lengths are shown and edited in.
    pub length_unit: LengthUnit,
    /// Decimal places for parameters without their own precision.
    pub default_precision: u32,
    /// Clamp numeric writes into the declared bounds instead of storing
    /// out-of-range values.
    pub clamp_to_bounds: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            length_unit: LengthUnit::Centimeter,
            default_precision: DEFAULT_PRECISION,
            clamp_to_bounds: true,
        }
    }
}

impl StoreConfig {
    /// Centimeter display (the canonical unit).
    pub fn metric() -> Self {
        Self::default()
    }

    /// Millimeter display, one decimal place.
    pub fn millimeter() -> Self {
        Self {
            length_unit: LengthUnit::Millimeter,
            default_precision: 1,
            ..Self::default()
        }
    }

    /// Inch display.
    pub fn imperial() -> Self {
        Self {
            length_unit: LengthUnit::Inch,
            ..Self::default()
        }
    }
}
