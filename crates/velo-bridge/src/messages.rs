use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use invalidation_engine::{EffectivePlan, ResolveResult};
use param_store::ParamView;
use velo_types::{LengthUnit, ParamId, ParamValue};

/// Messages from the UI to the engine.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    // -- Parameters --
    /// Edit a parameter. Numbers are in the current display unit.
    SetParameter { id: String, value: ParamValue },
    /// Edit a color through its semantic alias (`frame`, `rims`, ...).
    SetColor { alias: String, hex: String },
    GetParameter { id: String },
    ListParameters,
    SetLengthUnit { unit: LengthUnit },

    // -- Cycle --
    /// Record a change made outside the bridge.
    RegisterChange { id: String },
    DrainAndResolve,
    RequestFullRebuild,
}

/// Messages from the engine to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// A write was accepted and recorded.
    ParameterChanged {
        id: ParamId,
        view: ParamView,
        pending: usize,
    },

    Parameter { id: ParamId, view: ParamView },

    Parameters { params: BTreeMap<ParamId, ParamView> },

    ChangeRegistered { pending: usize },

    /// Invalidation sets for the drained batch, before and after tier
    /// precedence.
    Resolved {
        result: ResolveResult,
        plan: EffectivePlan,
    },

    FullRebuildRequested,

    LengthUnitChanged { unit: LengthUnit },

    Error { message: String },
}
