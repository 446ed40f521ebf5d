//! Gateway error kinds and their HTTP surface.
//!
//! Every failure collapses to a single opaque 500 for the caller. The kind
//! distinction (upstream vs parse vs schema vs store) exists for diagnostics
//! only and is logged, never exposed in the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum GatewayError {
  /// Completion service unreachable or returned a non-success status.
  #[error("completion service error: {0}")]
  Upstream(String),

  /// Extracted model text does not parse as JSON (includes empty output).
  #[error("model output is not valid JSON: {0}")]
  MalformedJson(String),

  /// Parsed JSON does not satisfy the target contract. Reports the first
  /// offending field only.
  #[error("{contract} contract mismatch at `{path}`: expected {expected}, got {actual}")]
  SchemaMismatch {
    contract: &'static str,
    path: String,
    expected: String,
    actual: String,
  },

  /// Leaderboard persistence failure.
  #[error("store failure: {0}")]
  Store(#[from] sqlx::Error),
}

impl GatewayError {
  /// Short tag used in logs to aggregate failures by kind.
  pub fn kind(&self) -> &'static str {
    match self {
      GatewayError::Upstream(_) => "upstream_unavailable",
      GatewayError::MalformedJson(_) => "malformed_json",
      GatewayError::SchemaMismatch { .. } => "schema_mismatch",
      GatewayError::Store(_) => "store_failure",
    }
  }
}

#[derive(Serialize)]
struct ErrorBody {
  error: &'static str,
}

impl IntoResponse for GatewayError {
  fn into_response(self) -> Response {
    error!(target: "sathi_backend", kind = self.kind(), detail = %self, "request failed");
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(ErrorBody { error: "An internal error occurred." }),
    )
      .into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds_are_stable_tags() {
    assert_eq!(GatewayError::Upstream("x".into()).kind(), "upstream_unavailable");
    assert_eq!(GatewayError::MalformedJson("x".into()).kind(), "malformed_json");
    let e = GatewayError::SchemaMismatch {
      contract: "score",
      path: "scores[0].score".into(),
      expected: "integer in [0,3]".into(),
      actual: "7".into(),
    };
    assert_eq!(e.kind(), "schema_mismatch");
  }

  #[test]
  fn schema_mismatch_names_the_offending_field() {
    let e = GatewayError::SchemaMismatch {
      contract: "quiz",
      path: "questions[1].options".into(),
      expected: "sequence of length 4".into(),
      actual: "sequence of length 3".into(),
    };
    let msg = e.to_string();
    assert!(msg.contains("questions[1].options"));
    assert!(msg.contains("length 4"));
  }

  #[test]
  fn responses_are_opaque_500s() {
    let resp = GatewayError::MalformedJson("secret detail".into()).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
