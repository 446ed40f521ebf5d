//! Prompt builder: composes the fixed per-capability instruction template
//! with caller-supplied fragments into a single completion request.
//!
//! Interpolation is plain string substitution. Caller text is passed through
//! verbatim; the completion service only ever returns text, so there is
//! nothing to escape.

use crate::config::Prompts;
use crate::util::fill_template;

pub fn build_score_prompt(prompts: &Prompts, user_reply: &str) -> String {
  let user = fill_template(&prompts.score_user_template, &[("user_reply", user_reply)]);
  format!("{}\n\n{}", prompts.score_system, user)
}

/// Topic clause only when a non-empty topic was supplied; gentle-mode clause
/// instructs the model toward subtler, non-confrontational content.
pub fn build_scenario_prompt(prompts: &Prompts, topic: Option<&str>, gentle_mode: bool) -> String {
  let mut prompt = prompts.scenario_system.clone();
  if let Some(topic) = topic {
    if !topic.trim().is_empty() {
      prompt.push_str(&fill_template(&prompts.scenario_topic_template, &[("topic", topic)]));
    }
  }
  if gentle_mode {
    prompt.push_str(&prompts.scenario_gentle_clause);
  }
  prompt
}

pub fn build_lesson_prompt(prompts: &Prompts, topic: &str) -> String {
  let user = fill_template(&prompts.lesson_user_template, &[("topic", topic)]);
  format!("{}\n\n{}", prompts.lesson_system, user)
}

pub fn build_quiz_prompt(prompts: &Prompts, topic: &str) -> String {
  let user = fill_template(&prompts.quiz_user_template, &[("topic", topic)]);
  format!("{}\n\n{}", prompts.quiz_system, user)
}

/// No variables; the instruction itself tells the model to randomize between
/// fabricated and factual content.
pub fn build_game_item_prompt(prompts: &Prompts) -> String {
  prompts.game_item_system.clone()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn score_prompt_contains_reply_verbatim() {
    let p = Prompts::default();
    let reply = "Calm down, that's not true.";
    let prompt = build_score_prompt(&p, reply);
    assert!(prompt.contains(reply));
    assert!(prompt.starts_with(&p.score_system));
  }

  #[test]
  fn scenario_prompt_without_topic_or_gentle_mode_is_the_bare_template() {
    let p = Prompts::default();
    assert_eq!(build_scenario_prompt(&p, None, false), p.scenario_system);
  }

  #[test]
  fn scenario_prompt_appends_topic_clause() {
    let p = Prompts::default();
    let prompt = build_scenario_prompt(&p, Some("football"), false);
    assert!(prompt.contains("related to the topic of: 'football'"));
  }

  #[test]
  fn scenario_prompt_ignores_empty_topic() {
    let p = Prompts::default();
    assert_eq!(build_scenario_prompt(&p, Some("   "), false), p.scenario_system);
  }

  #[test]
  fn scenario_prompt_appends_gentle_clause() {
    let p = Prompts::default();
    let prompt = build_scenario_prompt(&p, None, true);
    assert!(prompt.contains("gentle mode"));
    // Topic clause must not sneak in.
    assert!(!prompt.contains("related to the topic"));
  }

  #[test]
  fn scenario_prompt_combines_topic_and_gentle_mode() {
    let p = Prompts::default();
    let prompt = build_scenario_prompt(&p, Some("gaming"), true);
    assert!(prompt.contains("'gaming'"));
    assert!(prompt.contains("gentle mode"));
  }

  #[test]
  fn lesson_and_quiz_prompts_carry_the_topic() {
    let p = Prompts::default();
    assert!(build_lesson_prompt(&p, "dog whistles").contains("dog whistles"));
    assert!(build_quiz_prompt(&p, "echo chambers").contains("echo chambers"));
  }

  #[test]
  fn game_item_prompt_takes_no_variables() {
    let p = Prompts::default();
    assert_eq!(build_game_item_prompt(&p), p.game_item_system);
  }
}
