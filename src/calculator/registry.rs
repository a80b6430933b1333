//! Name-keyed operation registry.
//!
//! Operations are stored behind `Arc<dyn Operation>` in an insertion-ordered
//! map, so `names()` reports them in registration order and overwriting an
//! existing name keeps its original position.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::error::{CalcError, CalcResult};
use crate::types::Number;

/// A pure numeric function over an ordered sequence of params.
pub trait Operation: Send + Sync {
    fn apply(&self, params: &[Number]) -> Number;
}

impl<F> Operation for F
where
    F: Fn(&[Number]) -> Number + Send + Sync,
{
    fn apply(&self, params: &[Number]) -> Number {
        self(params)
    }
}

pub type OperationRef = Arc<dyn Operation>;

/// Mapping from operation name to operation.
pub type OperationMap = IndexMap<String, OperationRef>;

/// Build a single-entry [`OperationMap`], the shape `add_operation` expects.
pub fn operation<F>(name: impl Into<String>, f: F) -> OperationMap
where
    F: Fn(&[Number]) -> Number + Send + Sync + 'static,
{
    let mut map = OperationMap::new();
    map.insert(name.into(), Arc::new(f) as OperationRef);
    map
}

#[derive(Clone, Default)]
pub struct Registry {
    operations: OperationMap,
}

impl Registry {
    pub fn new(operations: OperationMap) -> Self {
        Self { operations }
    }

    /// Merge a single-entry mapping, replacing any operation of the same name.
    ///
    /// The registry is left untouched when the entry is rejected.
    pub fn merge(&mut self, entry: OperationMap) -> CalcResult<()> {
        if entry.len() != 1 {
            return Err(CalcError::invalid_operation(format!(
                "expected a single-entry mapping, got {} entries",
                entry.len()
            )));
        }
        for (name, op) in entry {
            let replaced = self.operations.insert(name.clone(), op).is_some();
            debug!(operation = %name, replaced, "registered operation");
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> CalcResult<&OperationRef> {
        self.operations
            .get(name)
            .ok_or_else(|| CalcError::not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.operations.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.operations.keys()).finish()
    }
}
