//! Application state shared across handlers.
//!
//! This module owns:
//!   - the Gemini completion client (credential checked at startup)
//!   - the prompt templates (immutable after load)
//!   - the leaderboard store handle (pooled Postgres connection)
//!
//! Handlers never hold mutable state; the only shared mutability lives
//! behind the store's connection pool.

use tracing::{info, instrument};

use crate::config::{Config, Prompts};
use crate::gemini::Gemini;
use crate::store::LeaderboardStore;

#[derive(Clone)]
pub struct AppState {
    pub gemini: Gemini,
    pub prompts: Prompts,
    pub leaderboard: LeaderboardStore,
}

impl AppState {
    /// Build state from config: completion client, prompts, store (with
    /// schema ensured). Any failure here aborts startup.
    #[instrument(level = "info", skip_all)]
    pub async fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let gemini = Gemini::new(
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
        )?;
        info!(target: "sathi_backend", base_url = %config.gemini_base_url, model = %config.gemini_model, "Gemini client ready");

        let leaderboard = LeaderboardStore::connect(&config.database_url).await?;
        info!(target: "leaderboard", "Leaderboard store connected, schema ensured");

        Ok(Self {
            gemini,
            prompts: config.prompts.clone(),
            leaderboard,
        })
    }
}
