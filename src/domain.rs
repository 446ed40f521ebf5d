//! Domain models: the typed response contracts the gateway hands to callers,
//! plus the telemetry record and the leaderboard row.
//!
//! Contract values are only ever constructed by the validator after the model
//! output passed its shape check, so fields here carry no extra guards.

use serde::{Deserialize, Serialize};

/// The five scoring criteria, in the order the rubric prompt instructs the
/// model to emit them. Order is significant and validated.
pub const RUBRIC_CRITERIA: [&str; 5] = [
  "De-escalation",
  "Accuracy and reframing",
  "Care for targets/bystanders",
  "Platform fit",
  "Self-protection",
];

/// One scored rubric criterion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CriterionScore {
  pub criterion: String,
  /// Integer in [0,3]; enforced by the validator.
  pub score: i64,
  pub rationale: String,
}

/// Full assessment of a user's reply to a hostile comment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreCard {
  /// Exactly five entries matching `RUBRIC_CRITERIA` in order.
  pub scores: Vec<CriterionScore>,
  pub suggested_rewrite: String,
  pub safety_flags: Vec<String>,
}

/// A generated practice scenario. `scenario_id` is always assigned by the
/// server; model-supplied identifiers are discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
  pub scenario_id: String,
  pub context: String,
  pub character_persona: String,
  pub hate_speech_comment: String,
}

/// A micro-lesson: title, exactly three content paragraphs, one example.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lesson {
  pub title: String,
  pub content: Vec<String>,
  pub example: String,
}

/// One multiple-choice question: four options, answer index in [0,3].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub question_text: String,
  pub options: Vec<String>,
  pub correct_answer_index: i64,
}

/// A quiz of exactly three questions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quiz {
  pub questions: Vec<QuizQuestion>,
}

/// One item for the real-or-fake game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameItem {
  pub content: String,
  pub is_real: bool,
  pub explanation: String,
}

/// Anonymous session metrics sent by the client. Accepted and forwarded to
/// the analytics sink; not persisted here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TelemetryRecord {
  pub scenario_id: String,
  /// e.g. final rubric score minus initial; may be negative.
  pub rubric_score_gain: i32,
  pub session_duration_seconds: u32,
  pub was_skipped: bool,
  pub was_flagged_distressing: bool,
  pub gentle_mode_active: bool,
}

/// One leaderboard row. `total_xp` only ever changes by accumulation.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
  pub user_id: String,
  pub username: String,
  pub total_xp: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn telemetry_rejects_negative_duration_at_the_boundary() {
    // session_duration_seconds is unsigned, so a negative value fails to
    // deserialize before any handler sees it.
    let bad = serde_json::json!({
      "scenario_id": "s1",
      "rubric_score_gain": 2,
      "session_duration_seconds": -5,
      "was_skipped": false,
      "was_flagged_distressing": false,
      "gentle_mode_active": true
    });
    assert!(serde_json::from_value::<TelemetryRecord>(bad).is_err());
  }

  #[test]
  fn telemetry_allows_negative_score_gain() {
    let ok = serde_json::json!({
      "scenario_id": "s1",
      "rubric_score_gain": -3,
      "session_duration_seconds": 40,
      "was_skipped": true,
      "was_flagged_distressing": false,
      "gentle_mode_active": false
    });
    let rec: TelemetryRecord = serde_json::from_value(ok).unwrap();
    assert_eq!(rec.rubric_score_gain, -3);
  }
}
