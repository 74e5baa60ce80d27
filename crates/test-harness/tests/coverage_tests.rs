//! Data-integrity checks across the parameter table, the dependency table
//! and the scene.

use invalidation_engine::{DependencyTable, Tier};
use param_store::{ParameterStore, StoreConfig, COLOR_ALIASES};
use proptest::prelude::*;
use test_harness::assertions::{assert_component_set_eq, assert_plan_disjoint};
use test_harness::{MockScene, SessionDriver};
use velo_types::{ComponentSet, ParamId, ValueKind};

#[test]
fn mock_scene_registers_exactly_the_universe() {
    let table = DependencyTable::bicycle().unwrap();
    let scene = MockScene::bicycle();
    for tier in Tier::ALL {
        assert_component_set_eq(&scene.registered(tier), table.universe(), &tier.to_string())
            .unwrap();
    }
}

#[test]
fn every_component_has_a_geometry_dependency() {
    let table = DependencyTable::bicycle().unwrap();
    let mut reachable = ComponentSet::new();
    for tier in [Tier::Redraw, Tier::Reposition] {
        for param in table.params() {
            reachable.extend(table.affected(tier, param.as_str()));
        }
    }
    assert_component_set_eq(&reachable, table.universe(), "redraw ∪ reposition").unwrap();
}

#[test]
fn every_color_parameter_has_an_alias() {
    let store = ParameterStore::bicycle(StoreConfig::default()).unwrap();
    let colors: Vec<&ParamId> = store
        .param_ids()
        .filter(|id| store.definition(id.as_str()).map(|d| d.kind()) == Some(ValueKind::Color))
        .collect();
    assert_eq!(colors.len(), COLOR_ALIASES.len());
    for id in colors {
        assert!(
            COLOR_ALIASES.iter().any(|a| a.param == id.as_str()),
            "{id} has no alias"
        );
    }
}

#[test]
fn every_color_parameter_repaints_something() {
    let table = DependencyTable::bicycle().unwrap();
    for alias in COLOR_ALIASES {
        assert!(
            !table.affected(Tier::Repaint, alias.param).is_empty(),
            "{} repaints nothing",
            alias.param
        );
    }
}

fn arb_batch() -> impl Strategy<Value = Vec<ParamId>> {
    let params: Vec<ParamId> = DependencyTable::bicycle().unwrap().params().into_iter().collect();
    prop::collection::vec(prop::sample::select(params), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn each_component_is_touched_at_most_once_per_cycle(batch in arb_batch()) {
        let mut d = SessionDriver::started().unwrap();
        for id in &batch {
            d.register(id.as_str()).unwrap();
        }
        let report = d.cycle().unwrap();
        let calls = d.scene.calls_in(2);
        let touched: ComponentSet = calls.iter().map(|c| c.component.clone()).collect();
        prop_assert_eq!(touched.len(), calls.len());
        prop_assert_eq!(report.action_count(), calls.len());
    }

    #[test]
    fn resolved_plans_are_disjoint(batch in arb_batch()) {
        let mut d = SessionDriver::started().unwrap();
        for id in &batch {
            d.register(id.as_str()).unwrap();
        }
        let (_, plan) = d.resolve().unwrap();
        prop_assert!(assert_plan_disjoint(&plan, "batch").is_ok());
    }
}
