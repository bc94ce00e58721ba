//! Logging setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over `level` when set. A second call is a no-op.
///
/// # Examples
/// ```no_run
/// agenda_client::logger::init_logger("debug", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json_format {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
    Ok(())
}
