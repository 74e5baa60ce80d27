use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;
use velo_types::{DisplayUnit, LengthUnit, ParamId, ParamValue, UnitKind, ValueKind};

use crate::config::StoreConfig;
use crate::definitions::{bicycle_definitions, ParamDef, ParamGroupDef, ParamOption};
use crate::errors::ParamError;
use crate::units;

/// Tolerance for matching a written value against an enumerated option.
const OPTION_EPSILON: f64 = 1e-9;

/// Display-facing metadata of a parameter. Bounds and option values are in
/// the current display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamMeta {
    pub label: String,
    pub kind: ValueKind,
    pub unit: UnitKind,
    pub display_unit: DisplayUnit,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub options: Vec<ParamOption>,
    pub read_only: bool,
    pub precision: u32,
}

/// A parameter as seen from outside the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamView {
    pub group: String,
    /// Current value in display units.
    pub value: ParamValue,
    pub meta: ParamMeta,
}

#[derive(Debug, Clone)]
struct Parameter {
    def: ParamDef,
    value: ParamValue,
}

#[derive(Debug, Clone)]
struct ParamGroup {
    id: String,
    label: String,
    params: Vec<Parameter>,
}

/// Authoritative table of parameter values for one session.
///
/// Values are stored canonically. Reads and external writes go through the
/// session's display units; [`ParameterStore::set_computed`] is the internal
/// path used by the geometry computation for read-only parameters.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    config: StoreConfig,
    groups: Vec<ParamGroup>,
    /// Parameter id -> (group index, parameter index).
    index: HashMap<ParamId, (usize, usize)>,
}

impl ParameterStore {
    /// Build a store from a definition table, every parameter at its default.
    ///
    /// Fails if a parameter id appears more than once, in the same group or
    /// across groups, or if a definition does not validate.
    pub fn new(defs: Vec<ParamGroupDef>, config: StoreConfig) -> Result<Self, ParamError> {
        let mut groups = Vec::with_capacity(defs.len());
        let mut index: HashMap<ParamId, (usize, usize)> = HashMap::new();

        for (gi, group_def) in defs.into_iter().enumerate() {
            let mut params = Vec::with_capacity(group_def.params.len());
            for (pi, def) in group_def.params.into_iter().enumerate() {
                def.validate()?;
                if let Some(&(first, _)) = index.get(&def.id) {
                    let first_group = if first == gi {
                        group_def.id.clone()
                    } else {
                        groups
                            .get(first)
                            .map(|g: &ParamGroup| g.id.clone())
                            .unwrap_or_default()
                    };
                    return Err(ParamError::DuplicateParameter {
                        id: def.id,
                        first_group,
                        second_group: group_def.id,
                    });
                }
                index.insert(def.id.clone(), (gi, pi));
                params.push(Parameter {
                    value: def.default,
                    def,
                });
            }
            groups.push(ParamGroup {
                id: group_def.id,
                label: group_def.label,
                params,
            });
        }

        Ok(Self {
            config,
            groups,
            index,
        })
    }

    /// Store over the built-in bicycle table.
    pub fn bicycle(config: StoreConfig) -> Result<Self, ParamError> {
        Self::new(bicycle_definitions(), config)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn length_unit(&self) -> LengthUnit {
        self.config.length_unit
    }

    /// Switch the display unit for lengths. Canonical values are untouched.
    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        self.config.length_unit = unit;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Group ids with their labels, in definition order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().map(|g| (g.id.as_str(), g.label.as_str()))
    }

    /// All parameter ids, in definition order.
    pub fn param_ids(&self) -> impl Iterator<Item = &ParamId> {
        self.groups
            .iter()
            .flat_map(|g| g.params.iter().map(|p| &p.def.id))
    }

    /// Definition of a parameter.
    pub fn definition(&self, id: &str) -> Option<&ParamDef> {
        self.lookup(id).map(|(_, p)| &p.def)
    }

    /// Current value in canonical units.
    pub fn canonical(&self, id: &str) -> Option<ParamValue> {
        self.lookup(id).map(|(_, p)| p.value)
    }

    /// Canonical numeric value, `None` for unknown or non-numeric parameters.
    pub fn number(&self, id: &str) -> Option<f64> {
        self.canonical(id).and_then(|v| v.as_number())
    }

    pub fn flag(&self, id: &str) -> Option<bool> {
        self.canonical(id).and_then(|v| v.as_bool())
    }

    /// Current value in display units, with the owning group and metadata.
    pub fn get(&self, id: &str) -> Result<ParamView, ParamError> {
        let (group, param) = self.lookup(id).ok_or_else(|| not_found(id))?;
        Ok(self.view(group, param))
    }

    pub fn metadata(&self, id: &str) -> Result<ParamMeta, ParamError> {
        let (_, param) = self.lookup(id).ok_or_else(|| not_found(id))?;
        Ok(self.meta(&param.def))
    }

    /// External write. `value` is in display units.
    ///
    /// Rejects read-only parameters, values of the wrong kind, non-finite
    /// numbers and values outside an enumerated option set. Numeric values
    /// are clamped into the declared bounds when the config asks for it.
    pub fn set(&mut self, id: &str, value: ParamValue) -> Result<(), ParamError> {
        let config = self.config;
        let param = self.lookup_mut(id).ok_or_else(|| not_found(id))?;
        let def = &param.def;

        if def.read_only {
            return Err(ParamError::ReadOnlyViolation { id: def.id.clone() });
        }
        check_kind(def, &value)?;

        let canonical = match value {
            ParamValue::Number(display) => {
                if !display.is_finite() {
                    return Err(ParamError::NonFinite { id: def.id.clone() });
                }
                let unit = DisplayUnit::for_kind(def.unit, config.length_unit);
                let mut v = units::from_display(display, unit);

                if !def.options.is_empty() {
                    let matched = def
                        .options
                        .iter()
                        .find(|o| (o.value - v).abs() <= OPTION_EPSILON)
                        .ok_or_else(|| ParamError::InvalidOption {
                            id: def.id.clone(),
                            value: display,
                        })?;
                    v = matched.value;
                } else if let Some(bounds) = def.bounds.filter(|_| config.clamp_to_bounds) {
                    let clamped = v.clamp(bounds.min, bounds.max);
                    if clamped != v {
                        debug!(param = %def.id, requested = v, clamped, "clamped to bounds");
                    }
                    v = clamped;
                }
                ParamValue::Number(v)
            }
            other => other,
        };

        debug!(param = %param.def.id, value = ?canonical, "parameter set");
        param.value = canonical;
        Ok(())
    }

    /// Internal write used by the geometry computation. `value` is canonical
    /// and may target read-only parameters. No bounds or option checks.
    pub fn set_computed(&mut self, id: &str, value: ParamValue) -> Result<(), ParamError> {
        let param = self.lookup_mut(id).ok_or_else(|| not_found(id))?;
        check_kind(&param.def, &value)?;
        debug!(param = %param.def.id, value = ?value, "computed value written");
        param.value = value;
        Ok(())
    }

    /// Every parameter keyed by id, values in display units.
    pub fn all_flattened(&self) -> BTreeMap<ParamId, ParamView> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.params
                    .iter()
                    .map(move |p| (p.def.id.clone(), self.view(g, p)))
            })
            .collect()
    }

    /// Reset every parameter to its default.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            for param in &mut group.params {
                param.value = param.def.default;
            }
        }
    }

    fn lookup(&self, id: &str) -> Option<(&ParamGroup, &Parameter)> {
        let &(gi, pi) = self.index.get(id)?;
        let group = self.groups.get(gi)?;
        Some((group, group.params.get(pi)?))
    }

    fn lookup_mut(&mut self, id: &str) -> Option<&mut Parameter> {
        let &(gi, pi) = self.index.get(id)?;
        self.groups.get_mut(gi)?.params.get_mut(pi)
    }

    fn display_unit(&self, def: &ParamDef) -> DisplayUnit {
        DisplayUnit::for_kind(def.unit, self.config.length_unit)
    }

    fn view(&self, group: &ParamGroup, param: &Parameter) -> ParamView {
        let unit = self.display_unit(&param.def);
        let value = match param.value {
            ParamValue::Number(v) => ParamValue::Number(units::to_display(v, unit)),
            other => other,
        };
        ParamView {
            group: group.id.clone(),
            value,
            meta: self.meta(&param.def),
        }
    }

    fn meta(&self, def: &ParamDef) -> ParamMeta {
        let unit = self.display_unit(def);
        let convert = |v: f64| units::to_display(v, unit);
        ParamMeta {
            label: def.label.clone(),
            kind: def.kind(),
            unit: def.unit,
            display_unit: unit,
            min: def.bounds.map(|b| convert(b.min)),
            max: def.bounds.map(|b| convert(b.max)),
            step: def.bounds.map(|b| convert(b.step)),
            options: def
                .options
                .iter()
                .map(|o| ParamOption {
                    label: o.label.clone(),
                    value: convert(o.value),
                })
                .collect(),
            read_only: def.read_only,
            precision: def.precision.unwrap_or(self.config.default_precision),
        }
    }
}

fn not_found(id: &str) -> ParamError {
    ParamError::NotFound { id: id.to_string() }
}

fn check_kind(def: &ParamDef, value: &ParamValue) -> Result<(), ParamError> {
    let expected = def.kind();
    let found = value.kind();
    if expected == found {
        Ok(())
    } else {
        Err(ParamError::TypeMismatch {
            id: def.id.clone(),
            expected,
            found,
        })
    }
}
