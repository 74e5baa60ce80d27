use invalidation_engine::EffectivePlan;
use tracing::{debug, warn};
use velo_types::ParamId;

use crate::engine_state::{BridgeError, EngineState};
use crate::messages::{EngineToUi, UiToEngine};

/// Dispatch a UI message to the session and return the response.
///
/// Failures never escape: they come back as [`EngineToUi::Error`], and a
/// failed write leaves both the store and the ledger untouched.
pub fn dispatch(state: &mut EngineState, msg: UiToEngine) -> EngineToUi {
    match handle_message(state, msg) {
        Ok(response) => response,
        Err(e) => EngineToUi::Error {
            message: e.to_string(),
        },
    }
}

/// Parse a JSON [`UiToEngine`], dispatch it and serialize the response.
pub fn process_json(state: &mut EngineState, json_input: &str) -> String {
    let response = match serde_json::from_str::<UiToEngine>(json_input) {
        Ok(msg) => dispatch(state, msg),
        Err(e) => {
            warn!(error = %e, "failed to parse UI message");
            EngineToUi::Error {
                message: format!("Failed to parse message: {}", e),
            }
        }
    };
    encode(&response)
}

pub(crate) fn encode(response: &EngineToUi) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        let err = BridgeError::Serialization {
            reason: e.to_string(),
        };
        format!(
            r#"{{"type":"Error","message":{}}}"#,
            serde_json::Value::String(err.to_string())
        )
    })
}

fn handle_message(state: &mut EngineState, msg: UiToEngine) -> Result<EngineToUi, BridgeError> {
    let session = &mut state.configurator;
    match msg {
        // -- Parameters --
        UiToEngine::SetParameter { id, value } => {
            session.set_parameter(&id, value)?;
            debug!(param = %id, "parameter set from UI");
            let view = session.get_parameter(&id)?;
            Ok(EngineToUi::ParameterChanged {
                id: ParamId::from(id),
                view,
                pending: session.ledger().len(),
            })
        }

        UiToEngine::SetColor { alias, hex } => {
            let id = session.set_color_hex(&alias, &hex)?;
            let view = session.get_parameter(id.as_str())?;
            Ok(EngineToUi::ParameterChanged {
                id,
                view,
                pending: session.ledger().len(),
            })
        }

        UiToEngine::GetParameter { id } => {
            let view = session.get_parameter(&id)?;
            Ok(EngineToUi::Parameter {
                id: ParamId::from(id),
                view,
            })
        }

        UiToEngine::ListParameters => Ok(EngineToUi::Parameters {
            params: session.list_parameters(),
        }),

        UiToEngine::SetLengthUnit { unit } => {
            session.set_length_unit(unit);
            Ok(EngineToUi::LengthUnitChanged { unit })
        }

        // -- Cycle --
        UiToEngine::RegisterChange { id } => {
            session.register_change(&id);
            Ok(EngineToUi::ChangeRegistered {
                pending: session.ledger().len(),
            })
        }

        UiToEngine::DrainAndResolve => {
            let result = session.drain_and_resolve();
            let plan = EffectivePlan::from_result(&result);
            Ok(EngineToUi::Resolved { result, plan })
        }

        UiToEngine::RequestFullRebuild => {
            session.request_full_rebuild();
            Ok(EngineToUi::FullRebuildRequested)
        }
    }
}
