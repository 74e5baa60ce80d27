pub mod bicycle;
pub mod config;
pub mod dispatch;
pub mod ledger;
pub mod resolve;
pub mod table;
pub mod types;

use std::collections::BTreeMap;

use param_store::{ParamError, ParamMeta, ParamView, ParameterStore};
use tracing::{info, warn};
use velo_types::{Color, LengthUnit, ParamId, ParamSet, ParamValue};

pub use crate::config::EngineConfig;
pub use crate::dispatch::{ArtifactRegistry, ComponentTables, DispatchReport, EffectivePlan};
pub use crate::ledger::ChangeLedger;
pub use crate::table::{DependencyEntry, DependencySpec, DependencyTable};
pub use crate::types::{Affected, EngineError, ResolveResult, Tier};

/// A configurator session.
///
/// Owns the parameter store, the change ledger and the dependency table.
/// Every external write goes through here so that it is recorded in the
/// ledger; [`Configurator::drain_and_resolve`] turns the accumulated batch into
/// invalidation sets. All mutation takes `&mut self`, so register, drain,
/// resolve and dispatch always see one consistent snapshot.
#[derive(Debug, Clone)]
pub struct Configurator {
    store: ParameterStore,
    ledger: ChangeLedger,
    table: DependencyTable,
    config: EngineConfig,
    /// Set at session start and by [`Configurator::request_full_rebuild`].
    full_rebuild_pending: bool,
}

impl Configurator {
    /// Session over the built-in bicycle tables.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let store = ParameterStore::bicycle(config.store)?;
        let table = DependencyTable::bicycle()?;
        Ok(Self::with_tables(store, table, config))
    }

    /// Session over caller-supplied tables.
    pub fn with_tables(store: ParameterStore, table: DependencyTable, config: EngineConfig) -> Self {
        for param in table.params() {
            if !store.contains(param.as_str()) {
                warn!(%param, "dependency table names a parameter the store does not define");
            }
        }
        Self {
            store,
            ledger: ChangeLedger::new(),
            table,
            config,
            full_rebuild_pending: true,
        }
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn table(&self) -> &DependencyTable {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &ChangeLedger {
        &self.ledger
    }

    // ── Parameter access ───────────────────────────────────────────────

    pub fn get_parameter(&self, id: &str) -> Result<ParamView, ParamError> {
        self.store.get(id)
    }

    pub fn get_parameter_metadata(&self, id: &str) -> Result<ParamMeta, ParamError> {
        self.store.metadata(id)
    }

    pub fn list_parameters(&self) -> BTreeMap<ParamId, ParamView> {
        self.store.all_flattened()
    }

    /// External edit in display units. Recorded in the ledger on success.
    pub fn set_parameter(&mut self, id: &str, value: ParamValue) -> Result<(), ParamError> {
        self.store.set(id, value)?;
        self.ledger.register(id);
        Ok(())
    }

    /// Color edit through a semantic alias. Recorded in the ledger on success.
    pub fn set_color(&mut self, alias: &str, color: Color) -> Result<ParamId, ParamError> {
        let id = self.store.set_color(alias, color)?;
        self.ledger.register(id.clone());
        Ok(id)
    }

    pub fn set_color_hex(&mut self, alias: &str, hex: &str) -> Result<ParamId, ParamError> {
        let id = self.store.set_color_hex(alias, hex)?;
        self.ledger.register(id.clone());
        Ok(id)
    }

    /// Write a computed value (canonical units). Not recorded in the ledger:
    /// computed values are outputs of the geometry, not inputs to it.
    pub fn set_computed(&mut self, id: &str, value: ParamValue) -> Result<(), ParamError> {
        self.store.set_computed(id, value)
    }

    /// Change the display unit for lengths. Canonical values do not change,
    /// so nothing is invalidated.
    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        self.store.set_length_unit(unit);
    }

    // ── Cycle ──────────────────────────────────────────────────────────

    /// Record a change made outside [`Configurator::set_parameter`].
    pub fn register_change(&mut self, id: &str) {
        if self.config.warn_on_unknown_params && !self.store.contains(id) {
            warn!(param = id, "change registered for unknown parameter");
        }
        self.ledger.register(id);
    }

    /// Make the next cycle a full rebuild regardless of what changed.
    pub fn request_full_rebuild(&mut self) {
        self.full_rebuild_pending = true;
    }

    pub fn has_pending_work(&self) -> bool {
        self.full_rebuild_pending || !self.ledger.is_empty()
    }

    /// Drain the ledger and resolve the batch.
    pub fn drain_and_resolve(&mut self) -> ResolveResult {
        let changed: ParamSet = self.ledger.drain();
        let mut result = resolve::resolve(&self.table, &changed);
        if self.full_rebuild_pending {
            result.full_rebuild = true;
            self.full_rebuild_pending = false;
        }
        info!(
            changed = changed.len(),
            redraw = result.redraw.len(),
            reposition = result.reposition.len(),
            repaint = result.repaint.len(),
            full_rebuild = result.full_rebuild,
            "cycle resolved"
        );
        result
    }

    /// Run one full cycle: drain and resolve, build the geometry snapshot,
    /// then dispatch to the scene.
    ///
    /// `snapshot` receives the store mutably so the geometry computation can
    /// publish computed values through [`ParameterStore::set_computed`].
    ///
    /// An empty batch resolves to a full rebuild, so frame loops should gate
    /// this on [`Configurator::has_pending_work`].
    pub fn run_cycle<A, S>(
        &mut self,
        tables: &ComponentTables<A, S>,
        registry: &mut ArtifactRegistry<A>,
        snapshot: impl FnOnce(&mut ParameterStore) -> S,
    ) -> DispatchReport {
        let result = self.drain_and_resolve();
        let plan = EffectivePlan::from_result(&result);
        let snapshot = snapshot(&mut self.store);
        dispatch::apply(&plan, self.table.universe(), tables, registry, &snapshot)
    }
}
