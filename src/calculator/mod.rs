//! The calculator: an operation registry plus an append-only execution history.
//!
//! ```
//! use abacus::{Calculator, Number, operation};
//! use serde_json::json;
//!
//! let mut calc = Calculator::new(operation("add", abacus::operations::add));
//! let total = calc.perform("add", &[json!(1), json!(2), json!(3)]).unwrap();
//! assert_eq!(total, Number::Int(6));
//! assert_eq!(calc.history().len(), 1);
//! ```

pub mod error;
pub mod history;
pub mod registry;

pub use error::{CalcError, CalcResult};
pub use history::{Clock, DEFAULT_TIMESTAMP_FORMAT, FixedClock, HistoryEntry, LocalClock};
pub use registry::{Operation, OperationMap, OperationRef, Registry, operation};

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::operations;
use crate::types::Number;

#[derive(Clone)]
pub struct Calculator {
    registry: Registry,
    history: Vec<HistoryEntry>,
    clock: Arc<dyn Clock>,
}

impl Calculator {
    /// Create a calculator preloaded with `operations` and an empty history.
    pub fn new(operations: OperationMap) -> Self {
        Self {
            registry: Registry::new(operations),
            history: Vec::new(),
            clock: Arc::new(LocalClock::default()),
        }
    }

    /// Create a calculator with the built-in arithmetic operations.
    pub fn with_builtins() -> Self {
        Self::new(operations::builtins())
    }

    /// Build a calculator from configuration.
    ///
    /// Every name in `preload` must be a built-in operation.
    pub fn from_config(config: &CalculatorConfig) -> CalcResult<Self> {
        let mut ops = OperationMap::new();
        for name in &config.preload {
            let op = operations::builtin(name).ok_or_else(|| {
                CalcError::invalid_operation(format!("unknown built-in operation '{name}'"))
            })?;
            ops.insert(name.clone(), op);
        }
        let clock = LocalClock::new(config.timestamp_format.clone())?;
        Ok(Self::new(ops).with_clock(clock))
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Register a single operation, overwriting one of the same name.
    ///
    /// Fails with [`CalcError::InvalidOperation`] unless `entry` holds exactly one
    /// operation.
    pub fn add_operation(&mut self, entry: OperationMap) -> CalcResult<()> {
        self.registry.merge(entry).inspect_err(|e| {
            warn!(error = %e, "rejected operation");
        })
    }

    pub fn list_operations(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Run `name` on dynamically typed params and record it in the history.
    ///
    /// All params are checked before the lookup, so non-numeric input is
    /// reported as [`CalcError::InvalidParams`] even for unknown operations.
    pub fn perform(&mut self, name: &str, params: &[Value]) -> CalcResult<Number> {
        let numbers = params
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Number::try_from(value).map_err(|found| CalcError::InvalidParams { index, found })
            })
            .collect::<CalcResult<Vec<_>>>()
            .inspect_err(|e| warn!(operation = name, error = %e, "rejected params"))?;

        self.perform_numbers(name, &numbers)
    }

    /// Run `name` on already-numeric params and record it in the history.
    pub fn perform_numbers(&mut self, name: &str, params: &[Number]) -> CalcResult<Number> {
        let result = self.registry.get(name)?.apply(params);

        self.history.push(HistoryEntry {
            timestamp: self.clock.timestamp(),
            operation: name.to_string(),
            params: params.to_vec(),
            result,
        });
        debug!(operation = name, params = params.len(), %result, "performed operation");

        Ok(result)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn reset_history(&mut self) {
        debug!(cleared = self.history.len(), "reset history");
        self.history.clear();
    }

    /// Re-run the most recent history entry without recording it again.
    ///
    /// Returns `Ok(None)` when the history is empty. The operation currently
    /// registered under the entry's name is used.
    pub fn repeat_last(&self) -> CalcResult<Option<Number>> {
        let Some(last) = self.history.last() else {
            debug!("repeat requested on empty history");
            return Ok(None);
        };

        let result = self.registry.get(&last.operation)?.apply(&last.params);
        debug!(operation = %last.operation, %result, "repeated operation");
        Ok(Some(result))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(OperationMap::new())
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("operations", &self.registry)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
