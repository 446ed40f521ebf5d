//! Capability dispatch shared by the HTTP handlers.
//!
//! Every model-backed capability follows the same skeleton:
//! build prompt → completion call → extract → validate → typed contract.
//! Failures at any stage carry their own error kind; nothing is retried.

use tracing::{info, instrument};

use crate::domain::{GameItem, Lesson, Quiz, Scenario, ScoreCard, TelemetryRecord};
use crate::error::GatewayError;
use crate::extract::extract_json_text;
use crate::prompt::{
  build_game_item_prompt, build_lesson_prompt, build_quiz_prompt, build_scenario_prompt,
  build_score_prompt,
};
use crate::state::AppState;
use crate::util::trunc_for_log;
use crate::validate;

#[instrument(level = "info", skip(state, user_reply), fields(reply_len = user_reply.len()))]
pub async fn score_reply(state: &AppState, user_reply: &str) -> Result<ScoreCard, GatewayError> {
  let prompt = build_score_prompt(&state.prompts, user_reply);
  let raw = state.gemini.complete(&prompt).await?;
  let text = extract_json_text(&raw)?;
  let card = validate::map_score(&text)?;
  info!(target: "gateway", flags = card.safety_flags.len(), "score card mapped");
  Ok(card)
}

#[instrument(level = "info", skip(state), fields(has_topic = topic.is_some(), gentle = gentle_mode))]
pub async fn generate_scenario(
  state: &AppState,
  topic: Option<&str>,
  gentle_mode: bool,
) -> Result<Scenario, GatewayError> {
  let prompt = build_scenario_prompt(&state.prompts, topic, gentle_mode);
  let raw = state.gemini.complete(&prompt).await?;
  let text = extract_json_text(&raw)?;
  let scenario = validate::map_scenario(&text)?;
  info!(target: "gateway", scenario_id = %scenario.scenario_id, "scenario generated");
  Ok(scenario)
}

#[instrument(level = "info", skip(state, topic), fields(topic = %trunc_for_log(topic, 40)))]
pub async fn generate_lesson(state: &AppState, topic: &str) -> Result<Lesson, GatewayError> {
  let prompt = build_lesson_prompt(&state.prompts, topic);
  let raw = state.gemini.complete(&prompt).await?;
  let text = extract_json_text(&raw)?;
  validate::map_lesson(&text)
}

#[instrument(level = "info", skip(state, topic), fields(topic = %trunc_for_log(topic, 40)))]
pub async fn generate_quiz(state: &AppState, topic: &str) -> Result<Quiz, GatewayError> {
  let prompt = build_quiz_prompt(&state.prompts, topic);
  let raw = state.gemini.complete(&prompt).await?;
  let text = extract_json_text(&raw)?;
  validate::map_quiz(&text)
}

#[instrument(level = "info", skip(state))]
pub async fn generate_game_item(state: &AppState) -> Result<GameItem, GatewayError> {
  let prompt = build_game_item_prompt(&state.prompts);
  let raw = state.gemini.complete(&prompt).await?;
  let text = extract_json_text(&raw)?;
  validate::map_game_item(&text)
}

/// Hand the record off to the analytics sink without blocking the caller.
/// The sink here is structured logging; sink failures never reach the client.
pub fn record_telemetry(record: TelemetryRecord) {
  tokio::spawn(async move {
    info!(
      target: "telemetry",
      scenario_id = %record.scenario_id,
      rubric_score_gain = record.rubric_score_gain,
      session_duration_seconds = record.session_duration_seconds,
      was_skipped = record.was_skipped,
      was_flagged_distressing = record.was_flagged_distressing,
      gentle_mode_active = record.gentle_mode_active,
      "session telemetry received"
    );
  });
}
