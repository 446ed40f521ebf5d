//! Minimal Gemini client for our use-cases.
//!
//! We only call generateContent with a single text prompt and hand the raw
//! completion text back to the extraction/validation pipeline. One attempt
//! per request; failures surface as upstream errors, never retried here.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::GatewayError;

#[derive(Clone)]
pub struct Gemini {
  client: reqwest::Client,
  api_key: String,
  base_url: String,
  model: String,
}

impl Gemini {
  /// Build the client. The completion call itself has a bounded timeout so a
  /// stalled upstream cannot hold a request open indefinitely.
  pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()?;
    Ok(Self { client, api_key, base_url, model })
  }

  /// Text-in, text-out completion. The prompt is opaque to this layer.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      contents: vec![ContentReq { parts: vec![PartReq { text: prompt.to_string() }] }],
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "sathi-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req)
      .send()
      .await
      .map_err(|e| GatewayError::Upstream(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_gemini_error(&body).unwrap_or(body);
      return Err(GatewayError::Upstream(format!("Gemini HTTP {}: {}", status, msg)));
    }

    let body: GenerateContentResponse =
      res.json().await.map_err(|e| GatewayError::Upstream(e.to_string()))?;

    if let Some(usage) = &body.usage_metadata {
      info!(
        prompt_tokens = ?usage.prompt_token_count,
        completion_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        elapsed = ?start.elapsed(),
        "Gemini usage"
      );
    }

    Ok(body.text())
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<ContentReq>,
}
#[derive(Serialize)]
struct ContentReq {
  parts: Vec<PartReq>,
}
#[derive(Serialize)]
struct PartReq {
  text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default, rename = "usageMetadata")]
  usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<ContentResp>,
}
#[derive(Deserialize)]
struct ContentResp {
  #[serde(default)]
  parts: Vec<PartResp>,
}
#[derive(Deserialize)]
struct PartResp {
  #[serde(default)]
  text: Option<String>,
}
#[derive(Deserialize)]
struct UsageMetadata {
  #[serde(default, rename = "promptTokenCount")]
  prompt_token_count: Option<u32>,
  #[serde(default, rename = "candidatesTokenCount")]
  candidates_token_count: Option<u32>,
  #[serde(default, rename = "totalTokenCount")]
  total_token_count: Option<u32>,
}

impl GenerateContentResponse {
  /// First candidate's text parts, concatenated. Missing pieces collapse to
  /// an empty string, which the extractor treats as a failure.
  fn text(&self) -> String {
    self
      .candidates
      .first()
      .and_then(|c| c.content.as_ref())
      .map(|content| {
        content
          .parts
          .iter()
          .filter_map(|p| p.text.as_deref())
          .collect::<Vec<_>>()
          .join("")
      })
      .unwrap_or_default()
  }
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn response_text_joins_candidate_parts() {
    let body = r#"{
      "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}], "role": "model"}}],
      "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
    }"#;
    let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.text(), "{\"a\":1}");
    assert_eq!(resp.usage_metadata.unwrap().total_token_count, Some(14));
  }

  #[test]
  fn response_without_candidates_yields_empty_text() {
    let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(resp.text(), "");
  }

  #[test]
  fn error_body_extraction() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
    assert_eq!(extract_gemini_error(body), Some("API key not valid".to_string()));
    assert_eq!(extract_gemini_error("plain text error"), None);
  }
}
