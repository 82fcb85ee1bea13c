use serde::Deserialize;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `taskboard=debug`.
pub const LOG_ENV: &str = "TASKBOARD_LOG";

const DEFAULT_LEVEL: &str = "warn";

#[derive(Clone, Deserialize)]
pub struct Log {
    pub level: String,
    #[serde(default)]
    pub structured: bool,
}

/// setup log from an optional environment filter and the config file
///
/// if the environment filter is present, then the config level is not used.
/// Logs go to stderr, stdout belongs to the board.
pub fn setup(
    env_filter: Result<EnvFilter, tracing_subscriber::filter::FromEnvError>,
    config: Option<&Log>,
) -> Result<(), SetGlobalDefaultError> {
    let structured = config.map(|log| log.structured).unwrap_or(false);
    let env_filter = match env_filter {
        Ok(env_filter) => env_filter,
        Err(_) => {
            let level = config.map(|log| log.level.as_str()).unwrap_or(DEFAULT_LEVEL);
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        }
    };

    let sbuilder = Subscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc3339())
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter);
    if structured {
        tracing::subscriber::set_global_default(sbuilder.json().finish())
    } else {
        tracing::subscriber::set_global_default(sbuilder.with_ansi(true).finish())
    }
}
