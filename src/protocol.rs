//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and clients independently.
//!
//! Model-backed responses are the contract types from `domain` serialized
//! directly; this module only adds the request bodies and status replies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScoreIn {
    pub scenario_id: String,
    pub user_reply: String,
    /// e.g. "en" or "ne". Logged for diagnostics; not interpolated.
    pub locale: String,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioIn {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub gentle_mode: bool,
}

#[derive(Debug, Deserialize)]
pub struct LessonIn {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScoreIn {
    pub user_id: String,
    pub username: String,
    pub xp_gained: i64,
}

/// Uniform `{"status": ...}` acknowledgment body.
#[derive(Debug, Serialize)]
pub struct StatusOut {
    pub status: &'static str,
}

impl StatusOut {
    pub const ACCEPTED: Self = Self { status: "accepted" };
    pub const SUCCESS: Self = Self { status: "success" };
    pub const ALIVE: Self = Self { status: "alive" };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_request_fields_default() {
        let req: ScenarioIn = serde_json::from_str("{}").unwrap();
        assert!(req.topic.is_none());
        assert!(!req.gentle_mode);

        let req: ScenarioIn =
            serde_json::from_str(r#"{"topic": "sports", "gentle_mode": true}"#).unwrap();
        assert_eq!(req.topic.as_deref(), Some("sports"));
        assert!(req.gentle_mode);
    }

    #[test]
    fn status_bodies_serialize_to_the_expected_shape() {
        assert_eq!(serde_json::to_string(&StatusOut::ACCEPTED).unwrap(), r#"{"status":"accepted"}"#);
        assert_eq!(serde_json::to_string(&StatusOut::SUCCESS).unwrap(), r#"{"status":"success"}"#);
        assert_eq!(serde_json::to_string(&StatusOut::ALIVE).unwrap(), r#"{"status":"alive"}"#);
    }

    #[test]
    fn score_request_requires_all_fields() {
        let missing_locale = r#"{"scenario_id": "s1", "user_reply": "hi"}"#;
        assert!(serde_json::from_str::<ScoreIn>(missing_locale).is_err());
    }
}
