//! MockScene: a recording stand-in for the 3D scene.
//!
//! Registers a generator, positioner and painter for every component it is
//! given. Each call is appended to a shared log so tests can check both which
//! functions ran and in what order.

use std::cell::RefCell;
use std::rc::Rc;

use invalidation_engine::{ArtifactRegistry, ComponentTables, DispatchReport, Tier};
use velo_types::{ComponentId, ComponentSet};

use crate::helpers::FrameSnapshot;

/// One recorded scene call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tier: Tier,
    pub component: ComponentId,
    pub cycle: u64,
}

/// The artifact the mock generator builds.
#[derive(Debug, Clone, PartialEq)]
pub struct MockArtifact {
    pub component: ComponentId,
    pub built_in: u64,
    pub positioned_in: Option<u64>,
    pub painted_in: Option<u64>,
    /// Bottom-bracket height the artifact was last placed with.
    pub bb_height: f64,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct MockScene {
    pub tables: ComponentTables<MockArtifact, FrameSnapshot>,
    pub registry: ArtifactRegistry<MockArtifact>,
    log: CallLog,
}

impl MockScene {
    /// Scene covering every component of the built-in bicycle.
    pub fn bicycle() -> Self {
        Self::new(invalidation_engine::bicycle::universe(), &[])
    }

    /// Scene covering `components`, minus the `(tier, component)` functions
    /// listed in `omit`.
    pub fn new(components: impl IntoIterator<Item = ComponentId>, omit: &[(Tier, &str)]) -> Self {
        let log = CallLog::default();
        let mut tables = ComponentTables::new();
        let omitted = |tier: Tier, id: &ComponentId| {
            omit.iter().any(|(t, c)| *t == tier && *c == id.as_str())
        };

        for id in components {
            if !omitted(Tier::Redraw, &id) {
                let log = log.clone();
                tables.register_generator(id.clone(), move |c: &ComponentId, s: &FrameSnapshot| {
                    record(&log, Tier::Redraw, c, s);
                    MockArtifact {
                        component: c.clone(),
                        built_in: s.cycle,
                        positioned_in: None,
                        painted_in: None,
                        bb_height: s.bb_height,
                    }
                });
            }
            if !omitted(Tier::Reposition, &id) {
                let log = log.clone();
                tables.register_positioner(
                    id.clone(),
                    move |c: &ComponentId, a: &mut MockArtifact, s: &FrameSnapshot| {
                        record(&log, Tier::Reposition, c, s);
                        a.positioned_in = Some(s.cycle);
                        a.bb_height = s.bb_height;
                    },
                );
            }
            if !omitted(Tier::Repaint, &id) {
                let log = log.clone();
                tables.register_painter(
                    id.clone(),
                    move |c: &ComponentId, a: &mut MockArtifact, s: &FrameSnapshot| {
                        record(&log, Tier::Repaint, c, s);
                        a.painted_in = Some(s.cycle);
                    },
                );
            }
        }

        Self {
            tables,
            registry: ArtifactRegistry::new(),
            log,
        }
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    /// Calls recorded during `cycle`.
    pub fn calls_in(&self, cycle: u64) -> Vec<Call> {
        self.log
            .borrow()
            .iter()
            .filter(|c| c.cycle == cycle)
            .cloned()
            .collect()
    }

    /// Components that received a `tier` call during `cycle`.
    pub fn touched(&self, tier: Tier, cycle: u64) -> ComponentSet {
        self.calls_in(cycle)
            .into_iter()
            .filter(|c| c.tier == tier)
            .map(|c| c.component)
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn artifact(&self, id: &str) -> Option<&MockArtifact> {
        self.registry.lookup(id)
    }

    /// Components with a function registered for `tier`.
    pub fn registered(&self, tier: Tier) -> ComponentSet {
        self.tables.registered(tier)
    }

    /// Cross-check a report against the log for `cycle`.
    pub fn report_matches_log(&self, report: &DispatchReport, cycle: u64) -> bool {
        let calls = self.calls_in(cycle);
        let of = |tier: Tier| -> Vec<ComponentId> {
            calls
                .iter()
                .filter(|c| c.tier == tier)
                .map(|c| c.component.clone())
                .collect()
        };
        of(Tier::Redraw) == report.generated
            && of(Tier::Reposition) == report.repositioned
            && of(Tier::Repaint) == report.repainted
    }
}

fn record(log: &CallLog, tier: Tier, component: &ComponentId, snapshot: &FrameSnapshot) {
    log.borrow_mut().push(Call {
        tier,
        component: component.clone(),
        cycle: snapshot.cycle,
    });
}
