//! Tracing subscriber setup driven by `CLIENTGEN_LOG`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "CLIENTGEN_LOG";
const CRATE_TARGETS: [&str; 2] = ["clientgen_core", "clientgen_cli"];

/// Install the stderr fmt subscriber.
///
/// CLIENTGEN_LOG controls the level: "trace", "debug", "info", "warn", "error"
/// or a full filter spec like "clientgen_core=trace,clientgen_cli=info".
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref(), default_level);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(env: Option<&str>, default_level: &str) -> String {
    match env {
        Some(level) if is_plain_level(level) => scoped(level),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => scoped(default_level),
    }
}

fn scoped(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={}", level.to_ascii_lowercase()))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
