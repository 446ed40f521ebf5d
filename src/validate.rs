//! Schema validation and mapping of untrusted model output.
//!
//! One generic parse-then-validate stage shared by every contract,
//! parameterized by a declarative `Shape` description per contract. The
//! walker is strict: wrong type, wrong length, or out-of-range value rejects
//! the whole response. No coercion, no partial contracts.
//!
//! Extra fields in the candidate are ignored. The scenario contract relies
//! on this: a model-supplied `scenario_id` never survives mapping; the
//! server assigns a fresh UUID.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{GameItem, Lesson, Quiz, Scenario, ScoreCard, RUBRIC_CRITERIA};
use crate::error::GatewayError;

/// Declarative shape of a contract (or a piece of one).
pub enum Shape {
  Str,
  Bool,
  /// Integer within a closed range.
  Int { min: i64, max: i64 },
  /// Sequence; `len` of `None` means any length.
  Seq { len: Option<usize>, item: &'static Shape },
  /// Object with required fields. Fields not listed are ignored.
  Obj { fields: &'static [(&'static str, &'static Shape)] },
}

const SCORE_SHAPE: Shape = Shape::Obj {
  fields: &[
    (
      "scores",
      &Shape::Seq {
        len: Some(5),
        item: &Shape::Obj {
          fields: &[
            ("criterion", &Shape::Str),
            ("score", &Shape::Int { min: 0, max: 3 }),
            ("rationale", &Shape::Str),
          ],
        },
      },
    ),
    ("suggested_rewrite", &Shape::Str),
    ("safety_flags", &Shape::Seq { len: None, item: &Shape::Str }),
  ],
};

const SCENARIO_SHAPE: Shape = Shape::Obj {
  fields: &[
    ("context", &Shape::Str),
    ("character_persona", &Shape::Str),
    ("hate_speech_comment", &Shape::Str),
  ],
};

const LESSON_SHAPE: Shape = Shape::Obj {
  fields: &[
    ("title", &Shape::Str),
    ("content", &Shape::Seq { len: Some(3), item: &Shape::Str }),
    ("example", &Shape::Str),
  ],
};

const QUIZ_SHAPE: Shape = Shape::Obj {
  fields: &[(
    "questions",
    &Shape::Seq {
      len: Some(3),
      item: &Shape::Obj {
        fields: &[
          ("question_text", &Shape::Str),
          ("options", &Shape::Seq { len: Some(4), item: &Shape::Str }),
          ("correct_answer_index", &Shape::Int { min: 0, max: 3 }),
        ],
      },
    },
  )],
};

const GAME_ITEM_SHAPE: Shape = Shape::Obj {
  fields: &[
    ("content", &Shape::Str),
    ("is_real", &Shape::Bool),
    ("explanation", &Shape::Str),
  ],
};

fn expected_of(shape: &Shape) -> String {
  match shape {
    Shape::Str => "string".into(),
    Shape::Bool => "boolean".into(),
    Shape::Int { min, max } => format!("integer in [{},{}]", min, max),
    Shape::Seq { len: Some(n), .. } => format!("sequence of length {}", n),
    Shape::Seq { len: None, .. } => "sequence".into(),
    Shape::Obj { .. } => "object".into(),
  }
}

fn actual_of(value: &Value) -> String {
  match value {
    Value::Null => "null".into(),
    Value::Bool(b) => format!("boolean {}", b),
    Value::Number(n) => format!("number {}", n),
    Value::String(_) => "string".into(),
    Value::Array(items) => format!("sequence of length {}", items.len()),
    Value::Object(_) => "object".into(),
  }
}

fn mismatch(contract: &'static str, path: &str, expected: String, actual: String) -> GatewayError {
  GatewayError::SchemaMismatch { contract, path: path.to_string(), expected, actual }
}

/// Walk `value` against `shape`, failing on the first offending field.
/// Field order follows the shape declaration, so the reported field is
/// deterministic regardless of candidate key order.
fn check(contract: &'static str, value: &Value, shape: &Shape, path: &str) -> Result<(), GatewayError> {
  match shape {
    Shape::Str => match value {
      Value::String(_) => Ok(()),
      other => Err(mismatch(contract, path, expected_of(shape), actual_of(other))),
    },
    Shape::Bool => match value {
      Value::Bool(_) => Ok(()),
      other => Err(mismatch(contract, path, expected_of(shape), actual_of(other))),
    },
    Shape::Int { min, max } => match value.as_i64() {
      Some(n) if n >= *min && n <= *max => Ok(()),
      Some(n) => Err(mismatch(contract, path, expected_of(shape), n.to_string())),
      None => Err(mismatch(contract, path, expected_of(shape), actual_of(value))),
    },
    Shape::Seq { len, item } => {
      let items = value
        .as_array()
        .ok_or_else(|| mismatch(contract, path, expected_of(shape), actual_of(value)))?;
      if let Some(want) = len {
        if items.len() != *want {
          return Err(mismatch(
            contract,
            path,
            expected_of(shape),
            format!("sequence of length {}", items.len()),
          ));
        }
      }
      for (i, it) in items.iter().enumerate() {
        check(contract, it, item, &format!("{}[{}]", path, i))?;
      }
      Ok(())
    }
    Shape::Obj { fields } => {
      let map = value
        .as_object()
        .ok_or_else(|| mismatch(contract, path, expected_of(shape), actual_of(value)))?;
      for (name, field_shape) in *fields {
        let child_path = format!("{}.{}", path, name);
        match map.get(*name) {
          Some(v) => check(contract, v, field_shape, &child_path)?,
          None => {
            return Err(mismatch(contract, &child_path, expected_of(field_shape), "missing".into()))
          }
        }
      }
      Ok(())
    }
  }
}

/// Parse extracted text as JSON, walk it against `shape`, and decode into the
/// typed contract. All-or-nothing: any failure rejects the whole response.
pub fn map_contract<T: DeserializeOwned>(
  contract: &'static str,
  shape: &Shape,
  text: &str,
) -> Result<T, GatewayError> {
  let value: Value =
    serde_json::from_str(text).map_err(|e| GatewayError::MalformedJson(e.to_string()))?;
  check(contract, &value, shape, "$")?;
  serde_json::from_value(value).map_err(|e| GatewayError::SchemaMismatch {
    contract,
    path: "$".into(),
    expected: contract.into(),
    actual: e.to_string(),
  })
}

/// Score contract: shape check plus the fixed criteria-order check.
pub fn map_score(text: &str) -> Result<ScoreCard, GatewayError> {
  let card: ScoreCard = map_contract("score", &SCORE_SHAPE, text)?;
  for (i, (got, want)) in card.scores.iter().zip(RUBRIC_CRITERIA.iter()).enumerate() {
    if got.criterion != *want {
      return Err(GatewayError::SchemaMismatch {
        contract: "score",
        path: format!("$.scores[{}].criterion", i),
        expected: format!("\"{}\"", want),
        actual: format!("\"{}\"", got.criterion),
      });
    }
  }
  Ok(card)
}

/// Scenario contract: the candidate never contributes an identifier. The
/// server assigns a fresh UUID per response.
pub fn map_scenario(text: &str) -> Result<Scenario, GatewayError> {
  #[derive(Deserialize)]
  struct Draft {
    context: String,
    character_persona: String,
    hate_speech_comment: String,
  }
  let d: Draft = map_contract("scenario", &SCENARIO_SHAPE, text)?;
  Ok(Scenario {
    scenario_id: Uuid::new_v4().to_string(),
    context: d.context,
    character_persona: d.character_persona,
    hate_speech_comment: d.hate_speech_comment,
  })
}

pub fn map_lesson(text: &str) -> Result<Lesson, GatewayError> {
  map_contract("lesson", &LESSON_SHAPE, text)
}

pub fn map_quiz(text: &str) -> Result<Quiz, GatewayError> {
  map_contract("quiz", &QUIZ_SHAPE, text)
}

pub fn map_game_item(text: &str) -> Result<GameItem, GatewayError> {
  map_contract("game_item", &GAME_ITEM_SHAPE, text)
}
