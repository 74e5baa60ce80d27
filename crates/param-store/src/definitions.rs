//! Parameter definition table.
//!
//! Definitions are plain data: the built-in bicycle table below is used by
//! default, and alternative tables can be loaded from JSON with
//! [`ParamGroupDef::list_from_json`].

use serde::{Deserialize, Serialize};
use velo_types::{Color, ParamId, ParamValue, UnitKind, ValueKind};

use crate::errors::ParamError;

/// Slider bounds in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// One entry of an enumerated option set. Values are canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamOption {
    pub label: String,
    pub value: f64,
}

/// Static description of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    pub id: ParamId,
    pub label: String,
    /// Canonical default value.
    pub default: ParamValue,
    #[serde(default)]
    pub unit: UnitKind,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub options: Vec<ParamOption>,
    /// Written only by the geometry computation, never by user edits.
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub precision: Option<u32>,
}

impl ParamDef {
    fn new(id: &str, label: &str, default: ParamValue) -> Self {
        Self {
            id: ParamId::from(id),
            label: label.to_string(),
            default,
            unit: UnitKind::None,
            bounds: None,
            options: Vec::new(),
            read_only: false,
            precision: None,
        }
    }

    /// Length in centimeters with slider bounds.
    pub fn length(id: &str, label: &str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            unit: UnitKind::Length,
            bounds: Some(Bounds { min, max, step }),
            ..Self::new(id, label, ParamValue::Number(default))
        }
    }

    /// Angle in degrees with slider bounds.
    pub fn angle(id: &str, label: &str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            unit: UnitKind::Angle,
            bounds: Some(Bounds { min, max, step }),
            ..Self::new(id, label, ParamValue::Number(default))
        }
    }

    /// Unitless number picked from a fixed list.
    pub fn choice(id: &str, label: &str, default: f64, values: &[f64]) -> Self {
        Self {
            options: values
                .iter()
                .map(|v| ParamOption {
                    label: format!("{v}"),
                    value: *v,
                })
                .collect(),
            precision: Some(0),
            ..Self::new(id, label, ParamValue::Number(default))
        }
    }

    pub fn toggle(id: &str, label: &str, default: bool) -> Self {
        Self::new(id, label, ParamValue::Bool(default))
    }

    pub fn color(id: &str, label: &str, rgb: u32) -> Self {
        Self::new(id, label, ParamValue::Color(Color::from_rgb(rgb)))
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    /// Check the definition is usable: finite ordered bounds with a positive
    /// step, finite options, and a default that respects both.
    pub fn validate(&self) -> Result<(), ParamError> {
        let invalid = |reason: String| ParamError::InvalidDefinition {
            id: self.id.clone(),
            reason,
        };
        let constrained = self.bounds.is_some() || !self.options.is_empty();
        let default = match self.default {
            ParamValue::Number(v) => v,
            _ if constrained => {
                return Err(invalid(format!(
                    "{} default cannot carry bounds or options",
                    self.kind()
                )))
            }
            _ => return Ok(()),
        };
        if !default.is_finite() {
            return Err(invalid("default is not finite".to_string()));
        }

        if let Some(Bounds { min, max, step }) = self.bounds {
            if !(min.is_finite() && max.is_finite() && step.is_finite()) {
                return Err(invalid("bounds must be finite".to_string()));
            }
            if min > max {
                return Err(invalid(format!("min {min} is greater than max {max}")));
            }
            if step <= 0.0 {
                return Err(invalid(format!("step {step} must be positive")));
            }
            if !(min..=max).contains(&default) {
                return Err(invalid(format!("default {default} outside [{min}, {max}]")));
            }
        }

        if !self.options.is_empty() {
            if let Some(o) = self.options.iter().find(|o| !o.value.is_finite()) {
                return Err(invalid(format!("option '{}' is not finite", o.label)));
            }
            if !self.options.iter().any(|o| o.value == default) {
                return Err(invalid(format!("default {default} is not one of the options")));
            }
        }
        Ok(())
    }
}

/// A named group of parameters, as shown in one folder of the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGroupDef {
    pub id: String,
    pub label: String,
    pub params: Vec<ParamDef>,
}

impl ParamGroupDef {
    pub fn new(id: &str, label: &str, params: Vec<ParamDef>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            params,
        }
    }

    /// Parse a list of groups from JSON.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ParamError> {
        serde_json::from_str(json).map_err(|e| ParamError::ParseError(e.to_string()))
    }
}

/// The built-in bicycle parameter table. Lengths are centimeters, angles
/// degrees.
pub fn bicycle_definitions() -> Vec<ParamGroupDef> {
    vec![
        ParamGroupDef::new(
            "frame",
            "Frame",
            vec![
                ParamDef::angle("A_angle", "Seat tube angle", 73.0, 65.0, 80.0, 0.5),
                ParamDef::angle("B_angle", "Head tube angle", 71.0, 62.0, 76.0, 0.5),
                ParamDef::length("seatTubeLength", "Seat tube", 52.0, 40.0, 65.0, 0.5),
                ParamDef::length("topTubeLength", "Top tube", 54.0, 45.0, 65.0, 0.5),
                ParamDef::length("headTubeLength", "Head tube", 14.0, 8.0, 25.0, 0.5),
                ParamDef::length("chainstayLength", "Chainstay", 42.0, 38.0, 48.0, 0.5),
                ParamDef::length("bbDrop", "BB drop", 7.0, 4.0, 9.0, 0.1),
                ParamDef::length("tubeDiameter", "Tube diameter", 3.5, 2.0, 5.0, 0.1),
                ParamDef::length("bbHeight", "BB height", 28.0, 15.0, 40.0, 0.1)
                    .read_only()
                    .precision(1),
                ParamDef::color("frameColor", "Frame color", 0xc0392b),
            ],
        ),
        ParamGroupDef::new(
            "fork",
            "Fork",
            vec![
                ParamDef::length("forkLength", "Fork length", 40.0, 35.0, 50.0, 0.5),
                ParamDef::length("forkOffset", "Fork offset", 4.5, 3.0, 6.0, 0.1),
                ParamDef::color("forkColor", "Fork color", 0x2c3e50),
            ],
        ),
        ParamGroupDef::new(
            "wheels",
            "Wheels",
            vec![
                ParamDef::length("wheelDiameter", "Wheel diameter", 62.2, 50.0, 74.0, 0.1),
                ParamDef::length("tireWidth", "Tire width", 2.8, 2.0, 6.0, 0.1),
                ParamDef::choice("spokeCount", "Spokes", 32.0, &[20.0, 24.0, 28.0, 32.0, 36.0]),
                ParamDef::color("rimColor", "Rim color", 0x1c1c1c),
                ParamDef::color("tireColor", "Tire color", 0x262626),
                ParamDef::color("hubColor", "Hub color", 0xb0b0b0),
            ],
        ),
        ParamGroupDef::new(
            "cockpit",
            "Cockpit",
            vec![
                ParamDef::length("stemLength", "Stem length", 10.0, 4.0, 14.0, 0.5),
                ParamDef::angle("stemAngle", "Stem angle", 6.0, -20.0, 20.0, 1.0),
                ParamDef::length("handlebarWidth", "Bar width", 42.0, 36.0, 80.0, 1.0),
                ParamDef::color("handlebarColor", "Bar color", 0x111111),
            ],
        ),
        ParamGroupDef::new(
            "seat",
            "Seat",
            vec![
                ParamDef::length("saddleHeight", "Saddle height", 72.0, 60.0, 90.0, 0.5),
                ParamDef::color("saddleColor", "Saddle color", 0x3d2b1f),
            ],
        ),
        ParamGroupDef::new(
            "drivetrain",
            "Drivetrain",
            vec![
                ParamDef::length("crankLength", "Crank length", 17.25, 16.5, 18.0, 0.25),
                ParamDef::choice(
                    "chainringTeeth",
                    "Chainring",
                    50.0,
                    &[34.0, 36.0, 39.0, 42.0, 46.0, 50.0, 52.0, 53.0],
                ),
                ParamDef::color("crankColor", "Crank color", 0x7f8c8d),
            ],
        ),
        ParamGroupDef::new(
            "display",
            "Display",
            vec![
                ParamDef::toggle("showSpokes", "Show spokes", true),
                ParamDef::toggle("wireframe", "Wireframe", false),
            ],
        ),
    ]
}
