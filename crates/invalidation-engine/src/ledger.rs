use velo_types::{ParamId, ParamSet};

/// Parameters changed since the last cycle.
///
/// Registration is idempotent and order-independent; [`ChangeLedger::drain`]
/// hands the whole batch to the resolver and leaves the ledger empty.
#[derive(Debug, Clone, Default)]
pub struct ChangeLedger {
    changed: ParamSet,
}

impl ChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change. Returns false if the parameter was already pending.
    pub fn register(&mut self, id: impl Into<ParamId>) -> bool {
        self.changed.insert(id.into())
    }

    /// Take every pending change.
    pub fn drain(&mut self) -> ParamSet {
        std::mem::take(&mut self.changed)
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changed.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.changed.contains(id)
    }

    pub fn pending(&self) -> &ParamSet {
        &self.changed
    }
}
