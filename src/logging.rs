use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding `EnvFilter` directives, e.g. `SUBGRAB_LOG=subgrab=debug`.
pub const LOG_ENV_VAR: &str = "SUBGRAB_LOG";

/// Install JSON logging on stderr, filtered by [`LOG_ENV_VAR`] (errors only when unset).
///
/// Stdout stays free for exported subtitles. Only the first call installs a subscriber.
pub fn init() {
    let directives = std::env::var(LOG_ENV_VAR).ok();

    let _ = tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(true),
        )
        .try_init();
}

/// Unparsable directives are skipped rather than rejected.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(directives.unwrap_or_default())
}
