pub mod calculator;
pub mod config;
pub mod logging;
pub mod operations;
pub mod types;

pub use calculator::{
    CalcError, CalcResult, Calculator, Clock, FixedClock, HistoryEntry, LocalClock, Operation,
    OperationMap, operation,
};
pub use config::Settings;
pub use types::Number;
