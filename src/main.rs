//! Sathi Ally · Backend Gateway
//!
//! - Axum HTTP API under /api/v1
//! - Gemini completion integration (prompt in, validated JSON contract out)
//! - Postgres-backed leaderboard
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   GEMINI_API_KEY   : completion-service credential (required)
//!   DATABASE_URL     : Postgres connection string (required)
//!   GEMINI_BASE_URL  : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL     : default "gemini-1.5-flash"
//!   PROMPTS_PATH     : path to TOML prompt overrides
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod extract;
mod validate;
mod prompt;
mod gemini;
mod store;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Missing credential or connection string aborts startup.
  let config = Config::from_env()?;

  // Build shared application state (Gemini client, prompts, leaderboard store).
  let state = Arc::new(AppState::new(&config).await?);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "sathi_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
