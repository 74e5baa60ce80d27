//! Built-in dependency data for the bicycle model.
//!
//! Component ids must stay in sync with the generators, positioners and
//! painters the scene registers; the test harness checks both directions.

use velo_types::ComponentId;

use crate::table::{DependencyEntry, DependencySpec};
use crate::types::Affected;

pub const FRAME: &[&str] = &[
    "headTube",
    "bottomBracket",
    "topTube",
    "seatTube",
    "downTube",
    "chainstayBottomAssembly",
    "chainstayTopAssembly",
    "chainstayDropoutAssembly",
    "chainstayEndAssemblyBottom",
    "chainstayEndAssemblyTop",
];

pub const FORK: &[&str] = &["forkBlades", "forkCrown", "steerer"];

pub const FRONT_WHEEL: &[&str] = &["frontRim", "frontTire", "frontSpokes", "frontHub"];

pub const REAR_WHEEL: &[&str] = &["rearRim", "rearTire", "rearSpokes", "rearHub"];

pub const COCKPIT: &[&str] = &["stem", "handlebar"];

pub const SEAT: &[&str] = &["seatPost", "saddle"];

pub const DRIVETRAIN: &[&str] = &["crankArms", "chainring", "pedals"];

/// Every component of the bicycle, in assembly order.
pub fn universe() -> Vec<ComponentId> {
    [FRAME, FORK, FRONT_WHEEL, REAR_WHEEL, COCKPIT, SEAT, DRIVETRAIN]
        .iter()
        .flat_map(|group| group.iter().map(|id| ComponentId::from(*id)))
        .collect()
}

fn explicit(ids: &[&str]) -> Affected {
    Affected::explicit(ids.iter().copied())
}

fn all_except(ids: &[&str]) -> Affected {
    Affected::all_except(ids.iter().copied())
}

fn entry(param: &str, affected: Affected) -> DependencyEntry {
    DependencyEntry::new(param, affected)
}

/// Everything in front of the head tube: fork, front wheel and cockpit.
fn front_end() -> Vec<&'static str> {
    [FORK, FRONT_WHEEL, COCKPIT].concat()
}

pub fn bicycle_spec() -> DependencySpec {
    DependencySpec {
        universe: universe(),
        redraw: redraw_entries(),
        reposition: reposition_entries(),
        repaint: repaint_entries(),
        leveling_triggers: Vec::new(),
    }
}

fn redraw_entries() -> Vec<DependencyEntry> {
    vec![
        entry(
            "A_angle",
            explicit(&["seatTube", "topTube", "chainstayTopAssembly", "chainstayEndAssemblyTop"]),
        ),
        entry(
            "seatTubeLength",
            explicit(&["seatTube", "topTube", "chainstayTopAssembly", "chainstayEndAssemblyTop"]),
        ),
        entry("topTubeLength", explicit(&["topTube", "downTube"])),
        entry("headTubeLength", explicit(&["headTube", "topTube", "downTube"])),
        entry(
            "chainstayLength",
            explicit(&[
                "chainstayBottomAssembly",
                "chainstayTopAssembly",
                "chainstayDropoutAssembly",
                "chainstayEndAssemblyBottom",
                "chainstayEndAssemblyTop",
            ]),
        ),
        entry(
            "bbDrop",
            explicit(&[
                "seatTube",
                "downTube",
                "chainstayBottomAssembly",
                "chainstayTopAssembly",
                "chainstayEndAssemblyBottom",
                "chainstayEndAssemblyTop",
            ]),
        ),
        entry("tubeDiameter", explicit(FRAME)),
        entry("forkLength", explicit(&["forkBlades", "steerer"])),
        entry("forkOffset", explicit(&["forkBlades", "forkCrown"])),
        entry(
            "wheelDiameter",
            explicit(&["frontRim", "rearRim", "frontTire", "rearTire", "frontSpokes", "rearSpokes"]),
        ),
        entry("tireWidth", explicit(&["frontTire", "rearTire"])),
        entry(
            "spokeCount",
            explicit(&["frontSpokes", "rearSpokes", "frontHub", "rearHub"]),
        ),
        entry("showSpokes", explicit(&["frontSpokes", "rearSpokes"])),
        entry("stemLength", explicit(&["stem"])),
        entry("stemAngle", explicit(&["stem"])),
        entry("handlebarWidth", explicit(&["handlebar"])),
        entry("saddleHeight", explicit(&["seatPost"])),
        entry("crankLength", explicit(&["crankArms"])),
        entry("chainringTeeth", explicit(&["chainring"])),
    ]
}

fn reposition_entries() -> Vec<DependencyEntry> {
    let mut head_tube_and_front = vec!["headTube"];
    head_tube_and_front.extend(front_end());

    vec![
        entry("A_angle", explicit(&["seatPost", "saddle"])),
        entry("B_angle", all_except(&["downTube"])),
        entry("seatTubeLength", explicit(&["seatPost", "saddle"])),
        entry("topTubeLength", explicit(&head_tube_and_front)),
        entry("headTubeLength", explicit(&front_end())),
        entry("chainstayLength", explicit(REAR_WHEEL)),
        entry(
            "bbDrop",
            all_except(&["bottomBracket", "crankArms", "chainring", "pedals"]),
        ),
        entry(
            "forkLength",
            explicit(&[
                "headTube",
                "forkCrown",
                "frontRim",
                "frontTire",
                "frontSpokes",
                "frontHub",
                "stem",
                "handlebar",
            ]),
        ),
        entry("forkOffset", explicit(FRONT_WHEEL)),
        entry(
            "wheelDiameter",
            all_except(&["frontRim", "rearRim", "frontTire", "rearTire", "frontSpokes", "rearSpokes"]),
        ),
        entry("tireWidth", all_except(&["frontTire", "rearTire"])),
        entry("stemLength", explicit(&["handlebar"])),
        entry("stemAngle", explicit(&["handlebar"])),
        entry("saddleHeight", explicit(&["saddle"])),
        entry("crankLength", explicit(&["pedals"])),
    ]
}

fn repaint_entries() -> Vec<DependencyEntry> {
    vec![
        entry("frameColor", explicit(FRAME)),
        entry("forkColor", explicit(FORK)),
        entry("rimColor", explicit(&["frontRim", "rearRim"])),
        entry("tireColor", explicit(&["frontTire", "rearTire"])),
        entry("hubColor", explicit(&["frontHub", "rearHub"])),
        entry("handlebarColor", explicit(COCKPIT)),
        entry("saddleColor", explicit(&["saddle"])),
        entry("crankColor", explicit(&["crankArms", "pedals"])),
        entry("wireframe", all_except(&[])),
    ]
}
