//! SessionDriver: fluent API for scripting configurator sessions in tests.
//!
//! Edits go through `velo_bridge::dispatch()` and cycles through
//! `Configurator::run_cycle`, so tests exercise the real message and dispatch
//! paths against a [`MockScene`].

use invalidation_engine::{DispatchReport, EffectivePlan, EngineConfig, ResolveResult};
use velo_bridge::messages::{EngineToUi, UiToEngine};
use velo_bridge::EngineState;
use velo_types::{ComponentSet, LengthUnit, ParamValue};

use crate::helpers::{frame_snapshot, publish_bb_height, HarnessError};
use crate::scene::MockScene;

/// A fluent driver for editing parameters and running cycles.
pub struct SessionDriver {
    pub state: EngineState,
    pub scene: MockScene,
    cycle: u64,
    history: Vec<DispatchReport>,
}

impl SessionDriver {
    /// Bicycle session with a full mock scene. No cycle has run yet.
    pub fn bicycle() -> Result<Self, HarnessError> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, HarnessError> {
        let state = EngineState::new(config).map_err(|e| HarnessError::Engine(e.to_string()))?;
        Ok(Self::new(state, MockScene::bicycle()))
    }

    pub fn new(state: EngineState, scene: MockScene) -> Self {
        Self {
            state,
            scene,
            cycle: 0,
            history: Vec::new(),
        }
    }

    /// Bicycle session whose initial full rebuild has already run.
    pub fn started() -> Result<Self, HarnessError> {
        let mut driver = Self::bicycle()?;
        driver.cycle()?;
        Ok(driver)
    }

    // ── Edits ───────────────────────────────────────────────────────────

    /// Send a message through the bridge, turning an error reply into
    /// [`HarnessError::DispatchError`].
    pub fn send(&mut self, msg: UiToEngine) -> Result<EngineToUi, HarnessError> {
        match velo_bridge::dispatch(&mut self.state, msg) {
            EngineToUi::Error { message } => Err(HarnessError::DispatchError { message }),
            response => Ok(response),
        }
    }

    pub fn set(&mut self, id: &str, value: f64) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::SetParameter {
            id: id.to_string(),
            value: ParamValue::Number(value),
        })?;
        Ok(self)
    }

    pub fn set_flag(&mut self, id: &str, value: bool) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::SetParameter {
            id: id.to_string(),
            value: ParamValue::Bool(value),
        })?;
        Ok(self)
    }

    pub fn set_color(&mut self, alias: &str, hex: &str) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::SetColor {
            alias: alias.to_string(),
            hex: hex.to_string(),
        })?;
        Ok(self)
    }

    pub fn register(&mut self, id: &str) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::RegisterChange { id: id.to_string() })?;
        Ok(self)
    }

    pub fn request_full_rebuild(&mut self) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::RequestFullRebuild)?;
        Ok(self)
    }

    pub fn length_unit(&mut self, unit: LengthUnit) -> Result<&mut Self, HarnessError> {
        self.send(UiToEngine::SetLengthUnit { unit })?;
        Ok(self)
    }

    // ── Cycles ──────────────────────────────────────────────────────────

    /// Run one cycle against the mock scene and return its report.
    ///
    /// Fails if the report disagrees with what the scene recorded.
    pub fn cycle(&mut self) -> Result<DispatchReport, HarnessError> {
        let height = publish_bb_height(&mut self.state.configurator)?;
        self.cycle += 1;
        let cycle = self.cycle;
        let report = self.state.configurator.run_cycle(
            &self.scene.tables,
            &mut self.scene.registry,
            |store| frame_snapshot(store, cycle, height),
        );
        if !self.scene.report_matches_log(&report, cycle) {
            return Err(HarnessError::DispatchError {
                message: format!("cycle {}: report does not match scene calls", cycle),
            });
        }
        self.history.push(report.clone());
        Ok(report)
    }

    /// Run a cycle only if the session has pending work, as a frame loop does.
    pub fn tick(&mut self) -> Result<Option<DispatchReport>, HarnessError> {
        if self.state.configurator.has_pending_work() {
            self.cycle().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Drain and resolve through the bridge without dispatching.
    pub fn resolve(&mut self) -> Result<(ResolveResult, EffectivePlan), HarnessError> {
        match self.send(UiToEngine::DrainAndResolve)? {
            EngineToUi::Resolved { result, plan } => Ok((result, plan)),
            other => Err(HarnessError::DispatchError {
                message: format!("expected Resolved, got {:?}", other),
            }),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Number of the last cycle run, 0 before the first.
    pub fn current_cycle(&self) -> u64 {
        self.cycle
    }

    pub fn history(&self) -> &[DispatchReport] {
        &self.history
    }

    pub fn universe(&self) -> &ComponentSet {
        self.state.configurator.table().universe()
    }

    pub fn pending(&self) -> usize {
        self.state.configurator.ledger().len()
    }

    pub fn value(&self, id: &str) -> Result<ParamValue, HarnessError> {
        Ok(self.state.configurator.get_parameter(id)?.value)
    }
}
