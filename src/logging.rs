use crate::config::planner::LoggingConfig;
use crate::error::PlanError;

/// Initialize structured logging with tracing.
/// Output goes to stderr so stdout stays free for plan JSON.
pub fn init_logging(config: &LoggingConfig) -> Result<(), PlanError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
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
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
            )
            .try_init()
    };

    result.map_err(|e| PlanError::new(
        format!("Failed to set global tracing subscriber: {}", e),
        "startup"
    ))?;

    tracing::debug!(level = %config.level, json = config.json, "Structured logging initialized");
    Ok(())
}
