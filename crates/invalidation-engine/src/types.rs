use std::fmt;

use serde::{Deserialize, Serialize};
use velo_types::{ComponentId, ComponentSet, ParamId};

/// Severity of the update a changed parameter forces on a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Regenerate the component's geometry from scratch.
    Redraw,
    /// Update the component's transform against the latest geometry.
    Reposition,
    /// Update only material and color attributes.
    Repaint,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Redraw, Tier::Reposition, Tier::Repaint];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Redraw => "redraw",
            Tier::Reposition => "reposition",
            Tier::Repaint => "repaint",
        };
        f.write_str(name)
    }
}

/// Components affected by one parameter in one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "components", rename_all = "snake_case")]
pub enum Affected {
    /// Exactly these components.
    Explicit(ComponentSet),
    /// Every component of the universal set except these.
    AllExcept(ComponentSet),
}

impl Affected {
    pub fn explicit<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ComponentId>,
    {
        Affected::Explicit(ids.into_iter().map(Into::into).collect())
    }

    pub fn all_except<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ComponentId>,
    {
        Affected::AllExcept(ids.into_iter().map(Into::into).collect())
    }

    /// The component ids named by this entry (members or exceptions).
    pub fn named(&self) -> &ComponentSet {
        match self {
            Affected::Explicit(set) | Affected::AllExcept(set) => set,
        }
    }

    /// Add the components this entry stands for to `out`.
    pub fn extend_into(&self, universe: &ComponentSet, out: &mut ComponentSet) {
        match self {
            Affected::Explicit(members) => out.extend(members.iter().cloned()),
            Affected::AllExcept(except) => out.extend(universe.difference(except).cloned()),
        }
    }

    /// The components this entry stands for.
    pub fn resolve(&self, universe: &ComponentSet) -> ComponentSet {
        let mut out = ComponentSet::new();
        self.extend_into(universe, &mut out);
        out
    }
}

/// Output of one resolution. The three sets may overlap; precedence is
/// applied when the result is turned into an
/// [`EffectivePlan`](crate::dispatch::EffectivePlan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResult {
    pub redraw: ComponentSet,
    pub reposition: ComponentSet,
    pub repaint: ComponentSet,
    pub full_rebuild: bool,
}

impl ResolveResult {
    pub fn tier(&self, tier: Tier) -> &ComponentSet {
        match tier {
            Tier::Redraw => &self.redraw,
            Tier::Reposition => &self.reposition,
            Tier::Repaint => &self.repaint,
        }
    }

    pub(crate) fn tier_mut(&mut self, tier: Tier) -> &mut ComponentSet {
        match tier {
            Tier::Redraw => &mut self.redraw,
            Tier::Reposition => &mut self.reposition,
            Tier::Repaint => &mut self.repaint,
        }
    }

    /// True when no tier selected any component.
    pub fn tiers_empty(&self) -> bool {
        self.redraw.is_empty() && self.reposition.is_empty() && self.repaint.is_empty()
    }
}

/// Errors from the invalidation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("{tier} entry for {param} references unknown component {component}")]
    StructuralInconsistency {
        tier: Tier,
        param: ParamId,
        component: ComponentId,
    },

    #[error("component {component} is listed twice in the universal set")]
    DuplicateComponent { component: ComponentId },

    #[error("parameter {param} has more than one {tier} entry")]
    DuplicateEntry { tier: Tier, param: ParamId },

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("parameter error: {0}")]
    Param(#[from] param_store::ParamError),
}
