/// Initialize structured logging with tracing.
/// Call once at startup; a second call leaves the first subscriber in place.
pub fn init_logging(json: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so command output on stdout stays clean
    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
            )
            .try_init()
    };

    match result {
        Ok(()) => tracing::debug!(json = json, "Structured logging initialized"),
        Err(e) => eprintln!("[Logging] subscriber already installed: {}", e),
    }
}

/// Log the outcome of a single model call
pub fn log_model_call(model: &str, stage: &str, success: bool, latency_ms: u64) {
    if success {
        tracing::info!(
            model = model,
            stage = stage,
            success = success,
            latency_ms = latency_ms,
            "Model call"
        );
    } else {
        tracing::warn!(
            model = model,
            stage = stage,
            success = success,
            latency_ms = latency_ms,
            "Model call"
        );
    }
}

/// Log a fallback from a generated value to its deterministic replacement
pub fn log_fallback(stage: &str, reason: &str) {
    tracing::warn!(stage = stage, reason = reason, "Fallback triggered");
}
