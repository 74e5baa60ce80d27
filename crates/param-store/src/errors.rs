use velo_types::{ParamId, ValueKind};

/// Errors from the parameter store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("parameter not found: {id}")]
    NotFound { id: String },

    #[error("parameter {id} is read-only")]
    ReadOnlyViolation { id: ParamId },

    #[error("unknown color group alias: {alias}")]
    UnknownGroupAlias { alias: String },

    #[error("parameter {id} expects a {expected} value, got {found}")]
    TypeMismatch {
        id: ParamId,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("value {value} is not one of the options of {id}")]
    InvalidOption { id: ParamId, value: f64 },

    #[error("value for {id} is not a finite number")]
    NonFinite { id: ParamId },

    #[error("invalid color: {0}")]
    InvalidColor(#[from] velo_types::ColorParseError),

    #[error("parameter {id} is defined in both '{first_group}' and '{second_group}'")]
    DuplicateParameter {
        id: ParamId,
        first_group: String,
        second_group: String,
    },

    #[error("invalid definition for {id}: {reason}")]
    InvalidDefinition { id: ParamId, reason: String },

    #[error("failed to parse parameter table: {0}")]
    ParseError(String),
}
