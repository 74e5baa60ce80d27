//! Session configuration.

use param_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::types::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub store: StoreConfig,
    /// Log a warning when a change is registered for a parameter the store
    /// does not know.
    pub warn_on_unknown_params: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            warn_on_unknown_params: true,
        }
    }
}

impl EngineConfig {
    pub fn imperial() -> Self {
        Self {
            store: StoreConfig::imperial(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::ParseError(e.to_string()))
    }
}
