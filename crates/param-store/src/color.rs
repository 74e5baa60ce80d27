//! Semantic color aliases used by the color-naming façade.
//!
//! The façade addresses colors by part name ("frame", "seat") rather than by
//! parameter id. Every color parameter of the bicycle table has exactly one
//! alias.

use velo_types::{Color, ParamId, ParamValue};

use crate::errors::ParamError;
use crate::store::ParameterStore;

/// Maps an alias to the color parameter it edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorAlias {
    pub alias: &'static str,
    pub group: &'static str,
    pub param: &'static str,
}

pub const COLOR_ALIASES: &[ColorAlias] = &[
    ColorAlias { alias: "frame", group: "frame", param: "frameColor" },
    ColorAlias { alias: "fork", group: "fork", param: "forkColor" },
    ColorAlias { alias: "rims", group: "wheels", param: "rimColor" },
    ColorAlias { alias: "tires", group: "wheels", param: "tireColor" },
    ColorAlias { alias: "hubs", group: "wheels", param: "hubColor" },
    ColorAlias { alias: "handlebar", group: "cockpit", param: "handlebarColor" },
    ColorAlias { alias: "seat", group: "seat", param: "saddleColor" },
    ColorAlias { alias: "cranks", group: "drivetrain", param: "crankColor" },
];

/// Case-insensitive alias lookup.
pub fn lookup_alias(alias: &str) -> Option<&'static ColorAlias> {
    let alias = alias.trim();
    COLOR_ALIASES
        .iter()
        .find(|a| a.alias.eq_ignore_ascii_case(alias))
}

impl ParameterStore {
    /// Set the color behind a semantic alias. Returns the parameter written
    /// so the caller can record the change.
    pub fn set_color(&mut self, alias: &str, color: Color) -> Result<ParamId, ParamError> {
        let entry = lookup_alias(alias).ok_or_else(|| ParamError::UnknownGroupAlias {
            alias: alias.to_string(),
        })?;
        self.set(entry.param, ParamValue::Color(color))?;
        Ok(ParamId::from(entry.param))
    }

    /// [`ParameterStore::set_color`] with a `#rrggbb` string.
    pub fn set_color_hex(&mut self, alias: &str, hex: &str) -> Result<ParamId, ParamError> {
        if lookup_alias(alias).is_none() {
            return Err(ParamError::UnknownGroupAlias {
                alias: alias.to_string(),
            });
        }
        let color = Color::from_hex(hex)?;
        self.set_color(alias, color)
    }
}
