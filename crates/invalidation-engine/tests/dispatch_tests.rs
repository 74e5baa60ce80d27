use std::cell::RefCell;
use std::rc::Rc;

use invalidation_engine::dispatch::{apply, SkipReason};
use invalidation_engine::*;
use velo_types::{ComponentId, ComponentSet};

#[derive(Debug, Clone, PartialEq)]
struct Part {
    build: u32,
    moved: u32,
    painted: u32,
}

type Log = Rc<RefCell<Vec<String>>>;

fn set_of(ids: &[&str]) -> ComponentSet {
    ids.iter().map(|id| ComponentId::from(*id)).collect()
}

/// Tables covering `ids`, logging every call as "<tier>:<id>".
fn tables(ids: impl IntoIterator<Item = ComponentId>, log: &Log) -> ComponentTables<Part, u32> {
    let mut t = ComponentTables::new();
    for id in ids {
        let l = log.clone();
        t.register_generator(id.clone(), move |c: &ComponentId, build: &u32| {
            l.borrow_mut().push(format!("redraw:{c}"));
            Part { build: *build, moved: 0, painted: 0 }
        });
        let l = log.clone();
        t.register_positioner(id.clone(), move |c: &ComponentId, p: &mut Part, _: &u32| {
            l.borrow_mut().push(format!("reposition:{c}"));
            p.moved += 1;
        });
        let l = log.clone();
        t.register_painter(id, move |c: &ComponentId, p: &mut Part, _: &u32| {
            l.borrow_mut().push(format!("repaint:{c}"));
            p.painted += 1;
        });
    }
    t
}

fn populated(ids: &[&str]) -> ArtifactRegistry<Part> {
    let mut r = ArtifactRegistry::new();
    for id in ids {
        r.insert(ComponentId::from(*id), Part { build: 0, moved: 0, painted: 0 });
    }
    r
}

#[test]
fn redraw_wins_over_reposition_and_repaint() {
    let result = ResolveResult {
        redraw: set_of(&["a"]),
        reposition: set_of(&["a", "b"]),
        repaint: set_of(&["a", "b", "c"]),
        full_rebuild: false,
    };
    let plan = EffectivePlan::from_result(&result);
    assert_eq!(plan.redraw, set_of(&["a"]));
    assert_eq!(plan.reposition, set_of(&["b"]));
    assert_eq!(plan.repaint, set_of(&["c"]));
}

#[test]
fn full_rebuild_plan_ignores_tier_sets() {
    let result = ResolveResult {
        redraw: set_of(&["a"]),
        reposition: ComponentSet::new(),
        repaint: set_of(&["b"]),
        full_rebuild: true,
    };
    let plan = EffectivePlan::from_result(&result);
    assert!(plan.full_rebuild);
    assert!(plan.redraw.is_empty() && plan.repaint.is_empty());
}

#[test]
fn apply_runs_tiers_in_order_with_precedence() {
    let log = Log::default();
    let t = tables(set_of(&["a", "b", "c"]), &log);
    let mut registry = populated(&["a", "b", "c"]);
    let plan = EffectivePlan::from_result(&ResolveResult {
        redraw: set_of(&["a"]),
        reposition: set_of(&["a", "b"]),
        repaint: set_of(&["b", "c"]),
        full_rebuild: false,
    });

    let report = apply(&plan, &set_of(&["a", "b", "c"]), &t, &mut registry, &7);

    assert_eq!(
        *log.borrow(),
        vec!["redraw:a", "reposition:b", "repaint:c"]
    );
    assert_eq!(report.generated, vec![ComponentId::from("a")]);
    assert_eq!(report.repositioned, vec![ComponentId::from("b")]);
    assert_eq!(report.repainted, vec![ComponentId::from("c")]);
    assert!(report.skipped.is_empty());
    assert_eq!(registry.lookup("a").unwrap().build, 7);
    assert_eq!(registry.lookup("b").unwrap().moved, 1);
    assert_eq!(registry.lookup("b").unwrap().painted, 0);
    assert_eq!(registry.lookup("c").unwrap().painted, 1);
}

#[test]
fn full_rebuild_regenerates_the_universe() {
    let log = Log::default();
    let t = tables(set_of(&["a", "b"]), &log);
    let mut registry = populated(&["stale"]);
    let plan = EffectivePlan {
        full_rebuild: true,
        ..EffectivePlan::default()
    };

    let report = apply(&plan, &set_of(&["a", "b"]), &t, &mut registry, &3);

    assert!(report.full_rebuild);
    assert_eq!(report.generated.len(), 2);
    assert!(registry.lookup("stale").is_none());
    assert_eq!(registry.len(), 2);
    assert!(log.borrow().iter().all(|entry| entry.starts_with("redraw:")));
}

#[test]
fn missing_functions_are_skipped() {
    let log = Log::default();
    let t = tables(set_of(&["a"]), &log);
    let mut registry = populated(&["a", "b"]);
    let plan = EffectivePlan::from_result(&ResolveResult {
        redraw: set_of(&["x"]),
        reposition: set_of(&["b"]),
        repaint: set_of(&["a"]),
        full_rebuild: false,
    });

    let report = apply(&plan, &set_of(&["a", "b", "x"]), &t, &mut registry, &0);

    assert_eq!(report.repainted, vec![ComponentId::from("a")]);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::NoFunction));
    assert!(registry.lookup("x").is_none());
}

#[test]
fn missing_artifacts_are_skipped() {
    let log = Log::default();
    let t = tables(set_of(&["a"]), &log);
    let mut registry = ArtifactRegistry::new();
    let plan = EffectivePlan::from_result(&ResolveResult {
        redraw: ComponentSet::new(),
        reposition: set_of(&["a"]),
        repaint: ComponentSet::new(),
        full_rebuild: false,
    });

    let report = apply(&plan, &set_of(&["a"]), &t, &mut registry, &0);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::NoArtifact);
    assert_eq!(report.skipped[0].tier, Tier::Reposition);
    assert!(log.borrow().is_empty());
}

#[test]
fn run_cycle_drains_resolves_and_dispatches() {
    let mut c = Configurator::new(EngineConfig::default()).unwrap();
    let log = Log::default();
    let t = tables(invalidation_engine::bicycle::universe(), &log);
    let mut registry = ArtifactRegistry::new();

    let first = c.run_cycle(&t, &mut registry, |_| 1);
    assert!(first.full_rebuild);
    assert_eq!(registry.len(), c.table().universe().len());

    log.borrow_mut().clear();
    c.set_color("seat", velo_types::Color::from_rgb(0x222222)).unwrap();
    let second = c.run_cycle(&t, &mut registry, |_| 2);
    assert!(!second.full_rebuild);
    assert_eq!(*log.borrow(), vec!["repaint:saddle"]);
    assert_eq!(registry.lookup("saddle").unwrap().painted, 1);
}
