//! Subscriber setup for applications embedding the calculator.
//!
//! The library itself only emits `tracing` events. Installing a subscriber
//! through [`init_with_settings`] stamps each log line with the same layout
//! the calculator uses for history entries, so the two can be lined up.
//!
//! ```toml
//! [logging]
//! default = "warn"
//! show_target = true
//!
//! [logging.modules]
//! "abacus::calculator" = "debug"  # registrations, executions, repeats
//! ```
//!
//! `RUST_LOG` replaces the configured directives when set.

use std::sync::Once;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::calculator::{CalcResult, Clock, LocalClock};
use crate::config::{LoggingConfig, Settings};

static INIT: Once = Once::new();

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", self.timestamp())
    }
}

/// Filter directives for a config, e.g. `warn,abacus::calculator=debug`.
pub fn filter_directives(config: &LoggingConfig) -> String {
    config
        .modules
        .iter()
        .fold(config.default.clone(), |mut directives, (target, level)| {
            directives.push_str(&format!(",{target}={level}"));
            directives
        })
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::new(filter_directives(config)),
    }
}

fn install(config: &LoggingConfig, clock: LocalClock) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.show_target)
            .with_timer(clock)
            .with_level(true)
            .with_filter(build_filter(config));

        // Another global subscriber may already be installed by the host
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// Install the global subscriber from full settings.
///
/// Fails without installing anything when `calculator.timestamp_format` is
/// not a valid timestamp layout. Only the first successful call takes effect.
pub fn init_with_settings(settings: &Settings) -> CalcResult<()> {
    let clock = LocalClock::new(settings.calculator.timestamp_format.clone())?;
    install(&settings.logging, clock);
    Ok(())
}

/// Install the global subscriber with the default timestamp layout.
pub fn init_with_config(config: &LoggingConfig) {
    install(config, LocalClock::default());
}

/// Install the global subscriber with default settings (level `warn`).
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
