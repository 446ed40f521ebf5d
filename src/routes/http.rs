//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures bubble up as `GatewayError` and are
//! rendered as opaque 500s by its `IntoResponse` impl.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, instrument};

use crate::domain::{GameItem, Lesson, LeaderboardEntry, Quiz, Scenario, ScoreCard, TelemetryRecord};
use crate::error::GatewayError;
use crate::logic;
use crate::protocol::{LessonIn, QuizIn, ScenarioIn, ScoreIn, StatusOut, UpdateScoreIn};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(StatusOut::ALIVE)
}

#[instrument(level = "info", skip(state, body), fields(%body.scenario_id, %body.locale, reply_len = body.user_reply.len()))]
pub async fn http_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScoreIn>,
) -> Result<Json<ScoreCard>, GatewayError> {
  let card = logic::score_reply(&state, &body.user_reply).await?;
  info!(target: "gateway", scenario_id = %body.scenario_id, "HTTP score served");
  Ok(Json(card))
}

#[instrument(level = "info", skip(state, body), fields(gentle_mode = body.gentle_mode))]
pub async fn http_generate_scenario(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ScenarioIn>,
) -> Result<Json<Scenario>, GatewayError> {
  let scenario = logic::generate_scenario(&state, body.topic.as_deref(), body.gentle_mode).await?;
  info!(target: "gateway", scenario_id = %scenario.scenario_id, "HTTP scenario served");
  Ok(Json(scenario))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_lesson(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LessonIn>,
) -> Result<Json<Lesson>, GatewayError> {
  let lesson = logic::generate_lesson(&state, &body.topic).await?;
  Ok(Json(lesson))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizIn>,
) -> Result<Json<Quiz>, GatewayError> {
  let quiz = logic::generate_quiz(&state, &body.topic).await?;
  Ok(Json(quiz))
}

#[instrument(level = "info", skip(state))]
pub async fn http_generate_game_item(
  State(state): State<Arc<AppState>>,
) -> Result<Json<GameItem>, GatewayError> {
  let item = logic::generate_game_item(&state).await?;
  Ok(Json(item))
}

/// Accepted-not-processed semantics: the record goes to the sink off the
/// request path and we acknowledge immediately with 202.
#[instrument(level = "info", skip(body), fields(scenario_id = %body.scenario_id))]
pub async fn http_telemetry(Json(body): Json<TelemetryRecord>) -> impl IntoResponse {
  logic::record_telemetry(body);
  (StatusCode::ACCEPTED, Json(StatusOut::ACCEPTED))
}

#[instrument(level = "info", skip(state, body), fields(%body.user_id, xp_gained = body.xp_gained))]
pub async fn http_update_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<UpdateScoreIn>,
) -> Result<Json<StatusOut>, GatewayError> {
  state
    .leaderboard
    .add_xp(&body.user_id, &body.username, body.xp_gained)
    .await?;
  info!(target: "leaderboard", user_id = %body.user_id, "HTTP update_score applied");
  Ok(Json(StatusOut::SUCCESS))
}

#[instrument(level = "info", skip(state))]
pub async fn http_leaderboard(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>, GatewayError> {
  let entries = state.leaderboard.top().await?;
  info!(target: "leaderboard", entries = entries.len(), "HTTP leaderboard served");
  Ok(Json(entries))
}
