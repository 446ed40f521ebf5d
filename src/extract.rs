//! Response extraction: turn raw completion text into a best-effort JSON
//! string. Models often wrap their JSON in markdown code fences despite being
//! told not to; we strip every literal fence marker and trim.
//!
//! No semantic validation happens here. Text that still is not JSON after
//! this pass fails later at the parse step with its own error kind.

use crate::error::GatewayError;

/// Fence markers removed wherever they occur.
const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";

/// Strip markdown fences and surrounding whitespace from completion text.
/// An empty or whitespace-only completion is an extraction failure.
pub fn extract_json_text(raw: &str) -> Result<String, GatewayError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(GatewayError::MalformedJson("empty completion text".into()));
  }
  let cleaned = trimmed.replace(FENCE_JSON, "").replace(FENCE, "");
  let cleaned = cleaned.trim().to_string();
  if cleaned.is_empty() {
    return Err(GatewayError::MalformedJson("completion contained only fence markers".into()));
  }
  Ok(cleaned)
}

#[cfg(test)]
mod tests {
  use super::*;

  const BODY: &str = "{\"title\": \"On Dog Whistles\", \"example\": \"...\"}";

  #[test]
  fn unfenced_text_passes_through_trimmed() {
    let out = extract_json_text(&format!("  {}\n", BODY)).unwrap();
    assert_eq!(out, BODY);
  }

  #[test]
  fn json_tagged_fences_match_unfenced_output() {
    let fenced = format!("```json\n{}\n```", BODY);
    assert_eq!(extract_json_text(&fenced).unwrap(), extract_json_text(BODY).unwrap());
  }

  #[test]
  fn plain_fences_match_unfenced_output() {
    let fenced = format!("```\n{}\n```", BODY);
    assert_eq!(extract_json_text(&fenced).unwrap(), extract_json_text(BODY).unwrap());
  }

  #[test]
  fn fences_with_surrounding_prose_whitespace() {
    let fenced = format!("\n\n```json\n{}\n```\n\n", BODY);
    assert_eq!(extract_json_text(&fenced).unwrap(), BODY);
  }

  #[test]
  fn empty_completion_is_an_extraction_failure() {
    assert!(matches!(extract_json_text(""), Err(GatewayError::MalformedJson(_))));
    assert!(matches!(extract_json_text("   \n "), Err(GatewayError::MalformedJson(_))));
  }

  #[test]
  fn fence_only_completion_is_an_extraction_failure() {
    assert!(matches!(extract_json_text("```json\n```"), Err(GatewayError::MalformedJson(_))));
  }

  #[test]
  fn non_json_text_still_passes_onward() {
    // The extractor does not judge JSON validity; the parse step does.
    let out = extract_json_text("definitely not json").unwrap();
    assert_eq!(out, "definitely not json");
  }
}
