//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context and lists the missing and unexpected
//! components rather than dumping both sets.

use invalidation_engine::{DispatchReport, EffectivePlan, Tier};
use velo_types::{ComponentId, ComponentSet};

use crate::helpers::{components, HarnessError};
use crate::scene::MockScene;

/// Assert a component set equals `expected`.
pub fn assert_component_set_eq(
    actual: &ComponentSet,
    expected: &ComponentSet,
    ctx: &str,
) -> Result<(), HarnessError> {
    if actual == expected {
        return Ok(());
    }
    let missing: Vec<&ComponentId> = expected.difference(actual).collect();
    let unexpected: Vec<&ComponentId> = actual.difference(expected).collect();
    Err(HarnessError::AssertionFailed {
        detail: format!(
            "[{}] component sets differ: missing {:?}, unexpected {:?}",
            ctx, missing, unexpected,
        ),
    })
}

/// Assert a component set equals the listed ids.
pub fn assert_components(
    actual: &ComponentSet,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    assert_component_set_eq(actual, &components(expected), ctx)
}

/// Assert no component appears in more than one tier of the plan.
pub fn assert_plan_disjoint(plan: &EffectivePlan, ctx: &str) -> Result<(), HarnessError> {
    for (a, b) in [
        (Tier::Redraw, Tier::Reposition),
        (Tier::Redraw, Tier::Repaint),
        (Tier::Reposition, Tier::Repaint),
    ] {
        let shared: Vec<&ComponentId> = plan.tier(a).intersection(plan.tier(b)).collect();
        if !shared.is_empty() {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{}] {} and {} share {:?}", ctx, a, b, shared),
            });
        }
    }
    Ok(())
}

/// Assert the cycle was a full rebuild that generated every component.
pub fn assert_full_rebuild(
    report: &DispatchReport,
    universe: &ComponentSet,
    ctx: &str,
) -> Result<(), HarnessError> {
    if !report.full_rebuild {
        return Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected a full rebuild", ctx),
        });
    }
    let generated: ComponentSet = report.generated.iter().cloned().collect();
    assert_component_set_eq(&generated, universe, ctx)?;
    if !report.repositioned.is_empty() || !report.repainted.is_empty() {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] full rebuild also ran {} reposition and {} repaint calls",
                ctx,
                report.repositioned.len(),
                report.repainted.len(),
            ),
        });
    }
    Ok(())
}

/// Assert the scene received exactly these calls in `cycle`, per tier.
pub fn assert_touched(
    scene: &MockScene,
    cycle: u64,
    redraw: &[&str],
    reposition: &[&str],
    repaint: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    assert_components(
        &scene.touched(Tier::Redraw, cycle),
        redraw,
        &format!("{} / redraw", ctx),
    )?;
    assert_components(
        &scene.touched(Tier::Reposition, cycle),
        reposition,
        &format!("{} / reposition", ctx),
    )?;
    assert_components(
        &scene.touched(Tier::Repaint, cycle),
        repaint,
        &format!("{} / repaint", ctx),
    )
}

/// Assert that nothing ran in `cycle`.
pub fn assert_untouched(scene: &MockScene, cycle: u64, ctx: &str) -> Result<(), HarnessError> {
    let calls = scene.calls_in(cycle);
    if calls.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected no scene calls, got {:?}", ctx, calls),
        })
    }
}
