//! Geometry snapshot construction and computed-value publishing.

use approx::assert_relative_eq;
use invalidation_engine::{Configurator, DependencyTable, EngineConfig};
use param_store::{ParamDef, ParamGroupDef, ParameterStore, StoreConfig};
use test_harness::helpers::{bb_height, frame_snapshot, publish_bb_height};
use test_harness::HarnessError;
use velo_types::ParamValue;

fn session_over(params: Vec<ParamDef>) -> Configurator {
    let store = ParameterStore::new(
        vec![ParamGroupDef::new("frame", "Frame", params)],
        StoreConfig::default(),
    )
    .unwrap();
    Configurator::with_tables(store, DependencyTable::bicycle().unwrap(), EngineConfig::default())
}

#[test]
fn publish_writes_bb_height_into_the_store() {
    let mut session = Configurator::new(EngineConfig::default()).unwrap();
    session.set_parameter("bbDrop", ParamValue::Number(8.0)).unwrap();
    let height = publish_bb_height(&mut session).unwrap();
    assert_relative_eq!(height, bb_height(62.2, 2.8, 8.0));
    assert_eq!(session.store().number("bbHeight"), Some(height));
}

#[test]
fn publish_skips_tables_without_bb_height() {
    let mut session = session_over(vec![ParamDef::length("bbDrop", "BB drop", 7.0, 4.0, 9.0, 0.1)]);
    let height = publish_bb_height(&mut session).unwrap();
    assert_relative_eq!(height, -7.0);
}

#[test]
fn publish_reports_a_mistyped_bb_height() {
    let mut session = session_over(vec![ParamDef::toggle("bbHeight", "BB height", false)]);
    let err = publish_bb_height(&mut session).unwrap_err();
    match err {
        HarnessError::Engine(message) => assert!(message.contains("bbHeight"), "{message}"),
        other => panic!("expected Engine error, got {other:?}"),
    }
    assert_eq!(session.store().flag("bbHeight"), Some(false));
}

#[test]
fn snapshot_carries_canonical_values() {
    let session = Configurator::new(EngineConfig::default()).unwrap();
    let snapshot = frame_snapshot(session.store(), 4, 26.9);
    assert_eq!(snapshot.cycle, 4);
    assert_eq!(snapshot.number("topTubeLength"), Some(54.0));
    assert_eq!(snapshot.values.len(), session.store().len());
}
