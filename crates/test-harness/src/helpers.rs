//! Helper functions: error type, geometry snapshot, set construction.

use std::collections::BTreeMap;

use invalidation_engine::Configurator;
use param_store::{ParamError, ParameterStore};
use velo_types::{ComponentId, ComponentSet, ParamId, ParamValue};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("engine error: {0}")]
    Engine(String),
}

impl From<ParamError> for HarnessError {
    fn from(e: ParamError) -> Self {
        HarnessError::Engine(e.to_string())
    }
}

impl From<invalidation_engine::EngineError> for HarnessError {
    fn from(e: invalidation_engine::EngineError) -> Self {
        HarnessError::Engine(e.to_string())
    }
}

// ── Geometry Snapshot ───────────────────────────────────────────────────────

/// What the scene functions see for one cycle: every canonical value plus
/// the derived bottom-bracket height.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub cycle: u64,
    pub bb_height: f64,
    pub values: BTreeMap<ParamId, ParamValue>,
}

impl FrameSnapshot {
    pub fn number(&self, id: &str) -> Option<f64> {
        self.values.get(id).and_then(ParamValue::as_number)
    }
}

/// Bottom-bracket height in cm: loaded wheel radius minus the drop.
pub fn bb_height(wheel_diameter: f64, tire_width: f64, bb_drop: f64) -> f64 {
    (wheel_diameter + 2.0 * tire_width) / 2.0 - bb_drop
}

/// Compute `bbHeight` from the session's geometry and publish it as a
/// computed value. A table without `bbHeight` is left alone; any other write
/// failure is an error.
pub fn publish_bb_height(session: &mut Configurator) -> Result<f64, HarnessError> {
    let store = session.store();
    let height = bb_height(
        store.number("wheelDiameter").unwrap_or_default(),
        store.number("tireWidth").unwrap_or_default(),
        store.number("bbDrop").unwrap_or_default(),
    );
    match session.set_computed("bbHeight", ParamValue::Number(height)) {
        Ok(()) | Err(ParamError::NotFound { .. }) => Ok(height),
        Err(e) => Err(e.into()),
    }
}

/// Build the snapshot for `cycle` from the store's canonical values.
pub fn frame_snapshot(store: &ParameterStore, cycle: u64, bb_height: f64) -> FrameSnapshot {
    let values = store
        .param_ids()
        .filter_map(|id| store.canonical(id.as_str()).map(|v| (id.clone(), v)))
        .collect();

    FrameSnapshot {
        cycle,
        bb_height,
        values,
    }
}

// ── Set Construction ────────────────────────────────────────────────────────

/// Build a component set from string ids.
pub fn components(ids: &[&str]) -> ComponentSet {
    ids.iter().map(|id| ComponentId::from(*id)).collect()
}

/// `universe` minus `except`.
pub fn all_but(universe: &ComponentSet, except: &[&str]) -> ComponentSet {
    universe
        .iter()
        .filter(|c| !except.contains(&c.as_str()))
        .cloned()
        .collect()
}
