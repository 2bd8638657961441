use crate::config::{AppConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL` when set. The JSON format flattens
/// event fields so every line is a single flat object.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "monster_index={level},access={level},sqlx=warn",
            level = config.log_level
        )
        .into()
    });

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_file(config.is_development())
            .with_line_number(config.is_development())
            .with_env_filter(filter)
            .init(),
    }
}
