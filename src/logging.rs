// src/logging.rs
// =============================================================================
// Diagnostic logging setup.
//
// Results go to stdout with println!; diagnostics go through `tracing` to
// stderr so `--json` output can be piped safely. RUST_LOG wins over -v.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "folio=debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
