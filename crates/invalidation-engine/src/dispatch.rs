//! Applying a resolution to the scene.
//!
//! The scene is an external collaborator. It supplies per-component
//! functions through [`ComponentTables`] and keeps its live artifacts in an
//! [`ArtifactRegistry`]. Neither has to cover every component: a missing
//! function or artifact skips that component and is reported, never fatal.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use velo_types::{ComponentId, ComponentSet};

use crate::types::{ResolveResult, Tier};

/// Resolved sets after tier precedence.
///
/// A component is handled by its most severe tier only: a freshly generated
/// component already has its pose and material, and a repositioned one keeps
/// its material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePlan {
    pub full_rebuild: bool,
    pub redraw: ComponentSet,
    /// `reposition - redraw`
    pub reposition: ComponentSet,
    /// `repaint - (redraw ∪ reposition)`
    pub repaint: ComponentSet,
}

impl EffectivePlan {
    pub fn from_result(result: &ResolveResult) -> Self {
        if result.full_rebuild {
            return Self {
                full_rebuild: true,
                ..Self::default()
            };
        }

        let redraw = result.redraw.clone();
        let reposition: ComponentSet = result.reposition.difference(&redraw).cloned().collect();
        let repaint = result
            .repaint
            .iter()
            .filter(|c| !redraw.contains(*c) && !reposition.contains(*c))
            .cloned()
            .collect();

        Self {
            full_rebuild: false,
            redraw,
            reposition,
            repaint,
        }
    }

    pub fn tier(&self, tier: Tier) -> &ComponentSet {
        match tier {
            Tier::Redraw => &self.redraw,
            Tier::Reposition => &self.reposition,
            Tier::Repaint => &self.repaint,
        }
    }
}

/// Builds a fresh artifact for a component from the geometry snapshot.
pub type GenerateFn<A, S> = Box<dyn Fn(&ComponentId, &S) -> A>;

/// Updates a live artifact in place from the geometry snapshot.
pub type UpdateFn<A, S> = Box<dyn Fn(&ComponentId, &mut A, &S)>;

/// Per-component generator, positioner and painter functions.
pub struct ComponentTables<A, S> {
    generators: HashMap<ComponentId, GenerateFn<A, S>>,
    positioners: HashMap<ComponentId, UpdateFn<A, S>>,
    painters: HashMap<ComponentId, UpdateFn<A, S>>,
}

impl<A, S> ComponentTables<A, S> {
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
            positioners: HashMap::new(),
            painters: HashMap::new(),
        }
    }

    pub fn register_generator(
        &mut self,
        id: impl Into<ComponentId>,
        f: impl Fn(&ComponentId, &S) -> A + 'static,
    ) {
        self.generators.insert(id.into(), Box::new(f));
    }

    pub fn register_positioner(
        &mut self,
        id: impl Into<ComponentId>,
        f: impl Fn(&ComponentId, &mut A, &S) + 'static,
    ) {
        self.positioners.insert(id.into(), Box::new(f));
    }

    pub fn register_painter(
        &mut self,
        id: impl Into<ComponentId>,
        f: impl Fn(&ComponentId, &mut A, &S) + 'static,
    ) {
        self.painters.insert(id.into(), Box::new(f));
    }

    pub fn has(&self, tier: Tier, id: &str) -> bool {
        match tier {
            Tier::Redraw => self.generators.contains_key(id),
            Tier::Reposition => self.positioners.contains_key(id),
            Tier::Repaint => self.painters.contains_key(id),
        }
    }

    /// Components with a function registered for `tier`.
    pub fn registered(&self, tier: Tier) -> ComponentSet {
        match tier {
            Tier::Redraw => self.generators.keys().cloned().collect(),
            Tier::Reposition => self.positioners.keys().cloned().collect(),
            Tier::Repaint => self.painters.keys().cloned().collect(),
        }
    }

    fn generate(&self, id: &ComponentId, snapshot: &S) -> Option<A> {
        self.generators.get(id).map(|f| f(id, snapshot))
    }

    fn update(&self, tier: Tier, id: &ComponentId, artifact: &mut A, snapshot: &S) -> bool {
        let table = match tier {
            Tier::Reposition => &self.positioners,
            Tier::Repaint => &self.painters,
            Tier::Redraw => return false,
        };
        match table.get(id) {
            Some(f) => {
                f(id, artifact, snapshot);
                true
            }
            None => false,
        }
    }
}

impl<A, S> Default for ComponentTables<A, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Live scene artifacts keyed by component.
#[derive(Debug, Clone)]
pub struct ArtifactRegistry<A> {
    live: BTreeMap<ComponentId, A>,
}

impl<A> ArtifactRegistry<A> {
    pub fn new() -> Self {
        Self {
            live: BTreeMap::new(),
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&A> {
        self.live.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut A> {
        self.live.get_mut(id)
    }

    /// Install an artifact, returning the one it replaces.
    pub fn insert(&mut self, id: ComponentId, artifact: A) -> Option<A> {
        self.live.insert(id, artifact)
    }

    pub fn remove(&mut self, id: &str) -> Option<A> {
        self.live.remove(id)
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.live.keys()
    }
}

impl<A> Default for ArtifactRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a planned action did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No function registered for the component in that tier.
    NoFunction,
    /// No live artifact to update.
    NoArtifact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub component: ComponentId,
    pub tier: Tier,
    pub reason: SkipReason,
}

/// What one dispatch actually did, in call order per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub full_rebuild: bool,
    pub generated: Vec<ComponentId>,
    pub repositioned: Vec<ComponentId>,
    pub repainted: Vec<ComponentId>,
    pub skipped: Vec<Skipped>,
}

impl DispatchReport {
    fn skip(&mut self, component: &ComponentId, tier: Tier, reason: SkipReason) {
        debug!(%component, %tier, ?reason, "skipped component update");
        self.skipped.push(Skipped {
            component: component.clone(),
            tier,
            reason,
        });
    }

    pub fn action_count(&self) -> usize {
        self.generated.len() + self.repositioned.len() + self.repainted.len()
    }
}

/// Drive the scene through one cycle.
///
/// On a full rebuild every live artifact is dropped and each component of
/// `universe` is generated anew. Otherwise redraw runs first, then
/// reposition, then repaint, each over the plan's precedence-filtered set.
#[instrument(skip_all, fields(full_rebuild = plan.full_rebuild))]
pub fn apply<A, S>(
    plan: &EffectivePlan,
    universe: &ComponentSet,
    tables: &ComponentTables<A, S>,
    registry: &mut ArtifactRegistry<A>,
    snapshot: &S,
) -> DispatchReport {
    let mut report = DispatchReport {
        full_rebuild: plan.full_rebuild,
        ..DispatchReport::default()
    };

    if plan.full_rebuild {
        registry.clear();
        for id in universe {
            regenerate(id, tables, registry, snapshot, &mut report);
        }
    } else {
        for id in &plan.redraw {
            regenerate(id, tables, registry, snapshot, &mut report);
        }
        for tier in [Tier::Reposition, Tier::Repaint] {
            for id in plan.tier(tier) {
                update(tier, id, tables, registry, snapshot, &mut report);
            }
        }
    }

    if report.skipped.iter().any(|s| s.reason == SkipReason::NoFunction) {
        warn!(
            skipped = report.skipped.len(),
            "some components have no registered function"
        );
    }
    info!(
        generated = report.generated.len(),
        repositioned = report.repositioned.len(),
        repainted = report.repainted.len(),
        skipped = report.skipped.len(),
        "dispatch complete"
    );
    report
}

fn regenerate<A, S>(
    id: &ComponentId,
    tables: &ComponentTables<A, S>,
    registry: &mut ArtifactRegistry<A>,
    snapshot: &S,
    report: &mut DispatchReport,
) {
    match tables.generate(id, snapshot) {
        Some(artifact) => {
            registry.insert(id.clone(), artifact);
            report.generated.push(id.clone());
        }
        None => report.skip(id, Tier::Redraw, SkipReason::NoFunction),
    }
}

fn update<A, S>(
    tier: Tier,
    id: &ComponentId,
    tables: &ComponentTables<A, S>,
    registry: &mut ArtifactRegistry<A>,
    snapshot: &S,
    report: &mut DispatchReport,
) {
    if !tables.has(tier, id.as_str()) {
        report.skip(id, tier, SkipReason::NoFunction);
        return;
    }
    let Some(artifact) = registry.lookup_mut(id.as_str()) else {
        report.skip(id, tier, SkipReason::NoArtifact);
        return;
    };
    tables.update(tier, id, artifact, snapshot);
    match tier {
        Tier::Reposition => report.repositioned.push(id.clone()),
        Tier::Repaint => report.repainted.push(id.clone()),
        Tier::Redraw => {}
    }
}
