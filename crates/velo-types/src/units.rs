use serde::{Deserialize, Serialize};

/// Physical quantity a parameter is measured in.
///
/// Canonical values are stored in the base unit of the quantity:
/// centimeters for lengths and degrees for angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    #[default]
    None,
    Length,
    Angle,
}

/// Unit lengths are presented in on the control panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Millimeter,
    #[default]
    Centimeter,
    Inch,
}

/// Concrete unit a display value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    None,
    Millimeter,
    Centimeter,
    Inch,
    Degree,
}

impl DisplayUnit {
    /// Display unit for a quantity, given the session's length unit.
    pub fn for_kind(kind: UnitKind, length_unit: LengthUnit) -> Self {
        match kind {
            UnitKind::None => DisplayUnit::None,
            UnitKind::Angle => DisplayUnit::Degree,
            UnitKind::Length => match length_unit {
                LengthUnit::Millimeter => DisplayUnit::Millimeter,
                LengthUnit::Centimeter => DisplayUnit::Centimeter,
                LengthUnit::Inch => DisplayUnit::Inch,
            },
        }
    }

    /// Short suffix used in panel labels.
    pub fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::None => "",
            DisplayUnit::Millimeter => "mm",
            DisplayUnit::Centimeter => "cm",
            DisplayUnit::Inch => "in",
            DisplayUnit::Degree => "°",
        }
    }
}
