//! Tracing initialization.
//!
//! LOG_LEVEL sets the filter, either a bare level ("debug") or full
//! directives ("info,gateway=debug,leaderboard=debug"). LOG_FORMAT picks
//! "pretty" (default) or "json" structured output.
//!
//! Targets matter here: model-path logs go to `gateway`, store logs to
//! `leaderboard`, and the fire-and-forget analytics sink to `telemetry`,
//! so each can be filtered independently.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
        EnvFilter::new(
            "info,gateway=debug,leaderboard=debug,telemetry=info,sathi_backend=debug,tower_http=info,axum=info",
        )
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // json() changes the builder type, so branch at init time.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
