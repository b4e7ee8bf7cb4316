//! Telemetry and Observability
//!
//! Structured logging and error tracking setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

/// Initialize tracing subscriber
///
/// `LOG_FORMAT=json` switches to JSON output for log collectors.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chat_api=debug,tower_http=debug"));

    let json_output = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    tracing::info!("Tracing initialized");
}

/// Initialize Sentry error tracking when a DSN is configured.
///
/// The returned guard flushes pending events on drop; the caller must keep
/// it alive for the lifetime of the application. An unparseable DSN logs a
/// warning and disables tracking instead of failing startup.
pub fn init_error_tracking(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let raw_dsn = settings.sentry.dsn.as_deref().filter(|dsn| !dsn.is_empty())?;

    let dsn = match raw_dsn.parse::<sentry::types::Dsn>() {
        Ok(dsn) => dsn,
        Err(e) => {
            tracing::warn!(error = %e, "invalid Sentry DSN; error tracking disabled");
            return None;
        }
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        environment: Some(settings.environment.clone().into()),
        traces_sample_rate: settings.sentry.traces_sample_rate,
        ..Default::default()
    });
    tracing::info!("Sentry initialized for chat-api");
    Some(guard)
}
