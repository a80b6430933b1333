//! Execution history records and the clock that stamps them.

use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult};
use crate::types::Number;

/// Default timestamp layout, e.g. `2016-05-20 12:00:00.000000`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One successful operation execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub operation: String,
    pub params: Vec<Number>,
    pub result: Number,
}

/// Source of history timestamps.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Local wall-clock time rendered with a strftime layout.
#[derive(Debug, Clone)]
pub struct LocalClock {
    format: String,
}

impl LocalClock {
    /// Create a clock with a custom strftime layout.
    ///
    /// The layout must render a calendar date and a time down to the second
    /// or finer. It is checked up front since chrono only reports bad
    /// specifiers while rendering.
    pub fn new(format: impl Into<String>) -> CalcResult<Self> {
        let format = format.into();
        let reason = {
            let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();
            if items.iter().any(|item| matches!(item, Item::Error)) {
                Some("unrecognized specifier")
            } else if !items.iter().any(renders_year) || !items.iter().any(renders_day) {
                Some("missing a date part")
            } else if !items.iter().any(renders_seconds) {
                Some("resolution coarser than one second")
            } else {
                None
            }
        };

        if let Some(reason) = reason {
            return Err(CalcError::InvalidTimestampFormat { format, reason });
        }
        Ok(Self { format })
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

fn is_full_stamp(item: &Item<'_>) -> bool {
    matches!(
        item,
        Item::Numeric(Numeric::Timestamp, _) | Item::Fixed(Fixed::RFC2822 | Fixed::RFC3339)
    )
}

fn renders_year(item: &Item<'_>) -> bool {
    is_full_stamp(item)
        || matches!(
            item,
            Item::Numeric(Numeric::Year | Numeric::YearMod100 | Numeric::IsoYear, _)
        )
}

fn renders_day(item: &Item<'_>) -> bool {
    is_full_stamp(item) || matches!(item, Item::Numeric(Numeric::Day | Numeric::Ordinal, _))
}

fn renders_seconds(item: &Item<'_>) -> bool {
    is_full_stamp(item) || matches!(item, Item::Numeric(Numeric::Second, _))
}

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        chrono::Local::now().format(&self.format).to_string()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
