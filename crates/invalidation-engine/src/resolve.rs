use tracing::{debug, instrument};
use velo_types::ParamSet;

use crate::table::DependencyTable;
use crate::types::{ResolveResult, Tier};

/// Compute the components a batch of parameter changes invalidates.
///
/// Each tier is the union of the contributions of every changed parameter
/// with an entry in that tier, so the result does not depend on the order the
/// changes were made in. Parameters without any entry contribute nothing.
///
/// `full_rebuild` is set when a leveling trigger fires or when no tier
/// selected anything, since a full rebuild is then the only way to make the
/// visible state reflect the edit.
#[instrument(skip_all, fields(changed = changed.len()))]
pub fn resolve(table: &DependencyTable, changed: &ParamSet) -> ResolveResult {
    let mut result = ResolveResult::default();

    for tier in Tier::ALL {
        let out = result.tier_mut(tier);
        for param in changed {
            if let Some(affected) = table.entry(tier, param.as_str()) {
                affected.extend_into(table.universe(), out);
            }
        }
    }

    let leveling = table.needs_leveling(changed);
    result.full_rebuild = leveling || result.tiers_empty();

    debug!(
        redraw = result.redraw.len(),
        reposition = result.reposition.len(),
        repaint = result.repaint.len(),
        leveling,
        full_rebuild = result.full_rebuild,
        "resolved change set"
    );
    result
}
