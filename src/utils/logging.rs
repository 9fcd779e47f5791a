use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application.
///
/// `default_level` is used unless `RUST_LOG` is set, in which case the
/// environment filter wins. Unknown level names fall back to `info`.
/// Output goes to stderr, leaving stdout to command output.
pub fn init(default_level: &str) {
    let level = match default_level.to_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        _ => "info",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // try_init so tests and the binary can both call this without panicking
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
