use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use velo_types::{ComponentId, ComponentSet, ParamId, ParamSet};

use crate::types::{Affected, EngineError, Tier};

/// One parameter's entry in one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub param: ParamId,
    pub affected: Affected,
}

impl DependencyEntry {
    pub fn new(param: &str, affected: Affected) -> Self {
        Self {
            param: ParamId::from(param),
            affected,
        }
    }
}

/// Unvalidated dependency data, as written in the built-in table or loaded
/// from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Every addressable component.
    pub universe: Vec<ComponentId>,
    #[serde(default)]
    pub redraw: Vec<DependencyEntry>,
    #[serde(default)]
    pub reposition: Vec<DependencyEntry>,
    #[serde(default)]
    pub repaint: Vec<DependencyEntry>,
    /// Parameters that force a full relevel of the model. Reserved; the
    /// built-in table has none.
    #[serde(default)]
    pub leveling_triggers: Vec<ParamId>,
}

impl DependencySpec {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::ParseError(e.to_string()))
    }

    pub fn entries(&self, tier: Tier) -> &[DependencyEntry] {
        match tier {
            Tier::Redraw => &self.redraw,
            Tier::Reposition => &self.reposition,
            Tier::Repaint => &self.repaint,
        }
    }
}

/// Validated dependency model: three tier maps over a universal component
/// set.
///
/// Every component named by an entry, as a member or as an exception, is a
/// member of the universal set. Construction fails otherwise.
#[derive(Debug, Clone)]
pub struct DependencyTable {
    universe: ComponentSet,
    redraw: HashMap<ParamId, Affected>,
    reposition: HashMap<ParamId, Affected>,
    repaint: HashMap<ParamId, Affected>,
    leveling_triggers: ParamSet,
}

impl DependencyTable {
    pub fn build(spec: DependencySpec) -> Result<Self, EngineError> {
        let mut universe = ComponentSet::new();
        for component in spec.universe {
            if universe.contains(&component) {
                return Err(EngineError::DuplicateComponent { component });
            }
            universe.insert(component);
        }

        let redraw = build_tier(Tier::Redraw, spec.redraw, &universe)?;
        let reposition = build_tier(Tier::Reposition, spec.reposition, &universe)?;
        let repaint = build_tier(Tier::Repaint, spec.repaint, &universe)?;

        debug!(
            components = universe.len(),
            redraw = redraw.len(),
            reposition = reposition.len(),
            repaint = repaint.len(),
            "dependency table built"
        );

        Ok(Self {
            universe,
            redraw,
            reposition,
            repaint,
            leveling_triggers: spec.leveling_triggers.into_iter().collect(),
        })
    }

    /// The built-in bicycle table.
    pub fn bicycle() -> Result<Self, EngineError> {
        Self::build(crate::bicycle::bicycle_spec())
    }

    pub fn universe(&self) -> &ComponentSet {
        &self.universe
    }

    pub fn tier(&self, tier: Tier) -> &HashMap<ParamId, Affected> {
        match tier {
            Tier::Redraw => &self.redraw,
            Tier::Reposition => &self.reposition,
            Tier::Repaint => &self.repaint,
        }
    }

    pub fn entry(&self, tier: Tier, param: &str) -> Option<&Affected> {
        self.tier(tier).get(param)
    }

    /// Components one parameter affects in one tier.
    pub fn affected(&self, tier: Tier, param: &str) -> ComponentSet {
        self.entry(tier, param)
            .map(|a| a.resolve(&self.universe))
            .unwrap_or_default()
    }

    /// Every parameter with an entry in at least one tier.
    pub fn params(&self) -> ParamSet {
        Tier::ALL
            .iter()
            .flat_map(|t| self.tier(*t).keys().cloned())
            .collect()
    }

    pub fn leveling_triggers(&self) -> &ParamSet {
        &self.leveling_triggers
    }

    /// Reserved hook: true if any changed parameter forces a full relevel.
    pub fn needs_leveling(&self, changed: &ParamSet) -> bool {
        !self.leveling_triggers.is_disjoint(changed)
    }
}

fn build_tier(
    tier: Tier,
    entries: Vec<DependencyEntry>,
    universe: &ComponentSet,
) -> Result<HashMap<ParamId, Affected>, EngineError> {
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        if let Some(component) = entry.affected.named().iter().find(|c| !universe.contains(*c)) {
            return Err(EngineError::StructuralInconsistency {
                tier,
                param: entry.param,
                component: component.clone(),
            });
        }
        if map.contains_key(&entry.param) {
            return Err(EngineError::DuplicateEntry {
                tier,
                param: entry.param,
            });
        }
        map.insert(entry.param, entry.affected);
    }
    Ok(map)
}
