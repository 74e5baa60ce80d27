use invalidation_engine::{Configurator, EngineConfig, EngineError};
use param_store::ParamError;

/// The session state behind the bridge.
pub struct EngineState {
    pub configurator: Configurator,
}

impl EngineState {
    pub fn new(config: EngineConfig) -> Result<Self, BridgeError> {
        Ok(Self {
            configurator: Configurator::new(config)?,
        })
    }

    /// State built from a JSON [`EngineConfig`]. An empty string selects the
    /// defaults.
    pub fn from_config_json(json: &str) -> Result<Self, BridgeError> {
        let config = if json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(json)?
        };
        Self::new(config)
    }
}

/// Errors from the bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
