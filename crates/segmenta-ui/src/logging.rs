//! Tracing bootstrap for host applications

use anyhow::Context;
use segmenta_core::EditorSettings;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter '{}'", default_filter))?,
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!("Segmenta engine v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

pub fn init_from_settings(settings: &EditorSettings) -> anyhow::Result<()> {
    init_logging(&settings.log_filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_logging("info").is_ok());
        assert!(init_from_settings(&EditorSettings::default()).is_ok());
    }
}
