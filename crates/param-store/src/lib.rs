//! Parameter definitions, canonical storage and unit conversion.
//!
//! The [`ParameterStore`] is the single owner of every parameter value in a
//! configurator session. Values are kept in canonical units (centimeters,
//! degrees) and converted to the session's display units at the boundary.

pub mod color;
pub mod config;
pub mod definitions;
pub mod errors;
pub mod store;
pub mod units;

pub use color::{lookup_alias, ColorAlias, COLOR_ALIASES};
pub use config::StoreConfig;
pub use definitions::{bicycle_definitions, Bounds, ParamDef, ParamGroupDef, ParamOption};
pub use errors::ParamError;
pub use store::{ParamMeta, ParamView, ParameterStore};
