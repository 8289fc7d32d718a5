//! Diagnostic logging
//!
//! Compact timestamped tracing output on stderr, with per-module levels from
//! the `[logging]` config table. `RUST_LOG` takes precedence over config:
//!
//! ```bash
//! RUST_LOG=patternkit=debug patternkit watch
//! ```
//!
//! Change notices ("... changed...") are not logs; they go to stdout through
//! the watch event stream.

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directive string for a config and a `-v` count.
///
/// Each `-v` raises the default level one step, never lowering it.
pub fn filter_directives(config: &LoggingConfig, verbose: u8) -> String {
    let mut directives = bump_level(&config.default, verbose);
    for (module, level) in &config.modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

fn bump_level(level: &str, verbose: u8) -> String {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

    let current = level.trim().to_lowercase();
    let Some(position) = LEVELS.iter().position(|l| *l == current) else {
        return current;
    };
    let bumped = (position + verbose as usize).min(LEVELS.len() - 1);
    LEVELS[bumped].to_string()
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init_with_config(config: &LoggingConfig, verbose: u8) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config, verbose))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        // A subscriber installed by an embedding application wins.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
