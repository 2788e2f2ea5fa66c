#![warn(missing_docs)]

//! Shared logging helpers, CLI argument definitions, and tracing utilities for the glass
//! workspace.
//!
//! - [`LogArgs`]: clap argument group for log level configuration
//! - [`compute_spec`]: resolve the flags into a tracing filter directive
//! - [`dispatch`]: build a [`Dispatch`] that callers thread into long-running sessions

use std::{env, io};

use clap::Args;
use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, registry};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, global = true, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only); prints tier listings
    #[arg(
        short = 'v',
        long,
        visible_alias = "verbose",
        global = true,
        conflicts_with_all = ["trace", "log_level", "log_filter"]
    )]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "glass_engine=trace,win_winops=debug"
    #[arg(long, global = true)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Resolve these flags into a filter spec; see [`compute_spec`].
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["glass", "glass_engine", "win_winops", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Build a stderr subscriber for `spec` and wrap it in a [`Dispatch`].
///
/// The dispatch is not installed globally; callers either scope it with
/// [`tracing::dispatcher::with_default`] or hand it to components that run under it.
pub fn dispatch(spec: &str) -> Dispatch {
    let subscriber = registry()
        .with(env_filter_from_spec(spec))
        .with(fmt::layer().with_writer(io::stderr).without_time());
    Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_all_crates() {
        let spec = level_spec_for("DEBUG");
        for krate in our_crates() {
            assert!(spec.contains(&format!("{krate}=debug")), "{spec}");
        }
    }

    #[test]
    fn explicit_filter_wins() {
        let spec = compute_spec(true, false, Some("warn"), Some("glass_engine=trace"));
        assert_eq!(spec, "glass_engine=trace");
    }

    #[test]
    fn flags_take_precedence_over_level() {
        assert_eq!(compute_spec(true, false, None, None), level_spec_for("trace"));
        assert_eq!(compute_spec(false, true, None, None), level_spec_for("debug"));
        assert_eq!(
            compute_spec(false, false, Some("warn"), None),
            level_spec_for("warn")
        );
    }

    #[test]
    fn dispatch_is_scoped() {
        let d = dispatch(&level_spec_for("info"));
        tracing::dispatcher::with_default(&d, || {
            tracing::info!("scoped event");
        });
    }
}
