//! End-to-end cycles against the recording mock scene.

use approx::assert_relative_eq;
use invalidation_engine::bicycle::{COCKPIT, FORK, FRAME, FRONT_WHEEL};
use invalidation_engine::dispatch::SkipReason;
use invalidation_engine::{EngineConfig, Tier};
use test_harness::assertions::*;
use test_harness::helpers::{all_but, bb_height, components};
use test_harness::{HarnessError, MockScene, SessionDriver};
use velo_types::{ComponentId, LengthUnit, ParamValue};

// ── Startup ──────────────────────────────────────────────────────────────

#[test]
fn first_cycle_builds_everything() {
    let mut d = SessionDriver::bicycle().unwrap();
    let report = d.cycle().unwrap();
    assert_full_rebuild(&report, d.universe(), "startup").unwrap();
    assert_eq!(d.scene.registry.len(), 28);
    assert!(report.skipped.is_empty());
}

#[test]
fn first_cycle_publishes_bb_height() {
    let d = SessionDriver::started().unwrap();
    let expected = bb_height(62.2, 2.8, 7.0);
    assert_relative_eq!(expected, 26.9, epsilon = 1e-9);
    assert_eq!(d.value("bbHeight").unwrap(), ParamValue::Number(expected));
    assert_relative_eq!(d.scene.artifact("saddle").unwrap().bb_height, expected);
}

#[test]
fn idle_session_does_not_tick() {
    let mut d = SessionDriver::started().unwrap();
    assert!(d.tick().unwrap().is_none());
    assert_untouched(&d.scene, d.current_cycle() + 1, "idle").unwrap();
}

// ── Single edits ─────────────────────────────────────────────────────────

#[test]
fn b_angle_repositions_all_but_down_tube() {
    let mut d = SessionDriver::started().unwrap();
    d.set("B_angle", 70.0).unwrap();
    let report = d.cycle().unwrap();
    let expected = all_but(d.universe(), &["downTube"]);
    assert_component_set_eq(
        &d.scene.touched(Tier::Reposition, 2),
        &expected,
        "B_angle",
    )
    .unwrap();
    assert!(report.generated.is_empty());
    assert!(report.repainted.is_empty());
    assert_eq!(d.scene.artifact("downTube").unwrap().positioned_in, None);
}

#[test]
fn frame_color_repaints_frame_only() {
    let mut d = SessionDriver::started().unwrap();
    d.set_color("frame", "#204080").unwrap();
    d.cycle().unwrap();
    assert_touched(&d.scene, 2, &[], &[], FRAME, "frameColor").unwrap();
    assert_eq!(d.scene.artifact("headTube").unwrap().painted_in, Some(2));
    assert_eq!(d.scene.artifact("headTube").unwrap().built_in, 1);
}

#[test]
fn wireframe_repaints_the_universe() {
    let mut d = SessionDriver::started().unwrap();
    d.set_flag("wireframe", true).unwrap();
    let report = d.cycle().unwrap();
    assert_eq!(report.repainted.len(), 28);
    assert!(!report.full_rebuild);
}

#[test]
fn crank_length_redraws_cranks_and_moves_pedals() {
    let mut d = SessionDriver::started().unwrap();
    d.set("crankLength", 17.5).unwrap();
    d.cycle().unwrap();
    assert_touched(&d.scene, 2, &["crankArms"], &["pedals"], &[], "crankLength").unwrap();
    assert_eq!(d.scene.artifact("crankArms").unwrap().built_in, 2);
}

#[test]
fn bb_drop_moves_parts_with_the_new_height() {
    let mut d = SessionDriver::started().unwrap();
    d.set("bbDrop", 8.0).unwrap();
    let report = d.cycle().unwrap();

    let redraw = [
        "seatTube",
        "downTube",
        "chainstayBottomAssembly",
        "chainstayTopAssembly",
        "chainstayEndAssemblyBottom",
        "chainstayEndAssemblyTop",
    ];
    let mut untouched: Vec<&str> = vec!["bottomBracket", "crankArms", "chainring", "pedals"];
    untouched.extend(redraw);
    let reposition = all_but(d.universe(), &untouched);

    assert_components(&d.scene.touched(Tier::Redraw, 2), &redraw, "bbDrop / redraw").unwrap();
    assert_component_set_eq(
        &d.scene.touched(Tier::Reposition, 2),
        &reposition,
        "bbDrop / reposition",
    )
    .unwrap();
    assert_eq!(report.repositioned.len(), 18);

    let lowered = bb_height(62.2, 2.8, 8.0);
    assert_relative_eq!(d.scene.artifact("saddle").unwrap().bb_height, lowered);
    assert_relative_eq!(d.scene.artifact("seatTube").unwrap().bb_height, lowered);
    assert_relative_eq!(d.scene.artifact("bottomBracket").unwrap().bb_height, 26.9, epsilon = 1e-9);
}

// ── Batches and precedence ───────────────────────────────────────────────

#[test]
fn head_tube_and_color_batch_applies_precedence() {
    let mut d = SessionDriver::started().unwrap();
    d.set("headTubeLength", 15.0)
        .unwrap()
        .set_color("frame", "#000000")
        .unwrap();

    let front: Vec<&str> = [FORK, FRONT_WHEEL, COCKPIT].concat();
    let redraw = ["headTube", "topTube", "downTube"];
    let repaint = all_but(&components(FRAME), &redraw);

    let report = d.cycle().unwrap();
    assert_components(&d.scene.touched(Tier::Redraw, 2), &redraw, "redraw").unwrap();
    assert_components(&d.scene.touched(Tier::Reposition, 2), &front, "reposition").unwrap();
    assert_component_set_eq(&d.scene.touched(Tier::Repaint, 2), &repaint, "repaint").unwrap();
    assert_eq!(report.action_count(), 3 + front.len() + 7);
}

#[test]
fn redraw_suppresses_reposition_of_same_component() {
    let mut d = SessionDriver::started().unwrap();
    d.set("topTubeLength", 55.0).unwrap().set("B_angle", 70.0).unwrap();
    let (result, plan) = d.resolve().unwrap();
    assert!(result.reposition.contains("topTube"));
    assert!(plan.redraw.contains("topTube"));
    assert!(!plan.reposition.contains("topTube"));
    assert_plan_disjoint(&plan, "topTube + B_angle").unwrap();
}

#[test]
fn repeated_edits_collapse_to_one_entry() {
    let mut d = SessionDriver::started().unwrap();
    for v in [5.0, 6.0, 7.0] {
        d.set("stemLength", 10.0 + v / 10.0).unwrap();
    }
    assert_eq!(d.pending(), 1);
    d.cycle().unwrap();
    assert_touched(&d.scene, 2, &["stem"], &["handlebar"], &[], "stemLength").unwrap();
}

// ── Full rebuild paths ───────────────────────────────────────────────────

#[test]
fn requested_full_rebuild_regenerates_everything() {
    let mut d = SessionDriver::started().unwrap();
    d.request_full_rebuild().unwrap();
    d.set_color("seat", "#ffffff").unwrap();
    let report = d.cycle().unwrap();
    assert_full_rebuild(&report, d.universe(), "requested").unwrap();
    assert!(d.scene.artifact("saddle").unwrap().painted_in.is_none());
    assert_eq!(d.scene.artifact("saddle").unwrap().built_in, 2);
}

#[test]
fn unknown_change_falls_back_to_full_rebuild() {
    let mut d = SessionDriver::started().unwrap();
    d.register("kickstand").unwrap();
    let report = d.cycle().unwrap();
    assert_full_rebuild(&report, d.universe(), "unknown param").unwrap();
}

#[test]
fn computed_only_change_falls_back_to_full_rebuild() {
    let mut d = SessionDriver::started().unwrap();
    d.register("bbHeight").unwrap();
    let report = d.cycle().unwrap();
    assert!(report.full_rebuild);
}

// ── Failure handling ─────────────────────────────────────────────────────

#[test]
fn read_only_write_is_rejected_without_invalidation() {
    let mut d = SessionDriver::started().unwrap();
    let err = d.set("bbHeight", 30.0).map(|_| ()).unwrap_err();
    assert!(matches!(err, HarnessError::DispatchError { .. }));
    assert_eq!(d.pending(), 0);
    assert!(d.tick().unwrap().is_none());
}

#[test]
fn missing_positioner_is_a_reported_no_op() {
    let scene = MockScene::new(
        invalidation_engine::bicycle::universe(),
        &[(Tier::Reposition, "saddle")],
    );
    let state = velo_bridge::EngineState::new(EngineConfig::default()).unwrap();
    let mut d = SessionDriver::new(state, scene);
    d.cycle().unwrap();

    d.set("saddleHeight", 74.0).unwrap();
    let report = d.cycle().unwrap();
    assert_eq!(report.generated, vec![ComponentId::from("seatPost")]);
    assert!(report.repositioned.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].tier, Tier::Reposition);
    assert_eq!(report.skipped[0].reason, SkipReason::NoFunction);
    assert_eq!(d.scene.artifact("saddle").unwrap().positioned_in, None);
}

#[test]
fn missing_artifact_is_a_reported_no_op() {
    let mut d = SessionDriver::started().unwrap();
    d.scene.registry.remove("handlebar");
    d.set("handlebarWidth", 44.0).unwrap();
    let report = d.cycle().unwrap();
    assert_eq!(report.generated, vec![ComponentId::from("handlebar")]);

    d.scene.registry.remove("handlebar");
    d.set("stemAngle", 8.0).unwrap();
    let report = d.cycle().unwrap();
    assert_eq!(report.generated, vec![ComponentId::from("stem")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::NoArtifact);
}

// ── Units ────────────────────────────────────────────────────────────────

#[test]
fn unit_switch_invalidates_nothing() {
    let mut d = SessionDriver::started().unwrap();
    d.length_unit(LengthUnit::Inch).unwrap();
    assert!(d.tick().unwrap().is_none());
    let inches = d.value("topTubeLength").unwrap().as_number().unwrap();
    assert_relative_eq!(inches, 54.0 * 0.393701, epsilon = 1e-9);
}

#[test]
fn imperial_session_writes_in_inches() {
    let mut d = SessionDriver::with_config(EngineConfig::imperial()).unwrap();
    d.cycle().unwrap();
    d.set("topTubeLength", 21.0).unwrap();
    let canonical = d.state.configurator.store().number("topTubeLength").unwrap();
    assert_relative_eq!(canonical, 21.0 / 0.393701, epsilon = 1e-9);
    let report = d.cycle().unwrap();
    assert!(report.generated.contains(&ComponentId::from("topTube")));
    assert_eq!(d.history().len(), 2);
}
