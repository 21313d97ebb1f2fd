//! Answer Evaluator: one oracle call for a base score, then deterministic penalties.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::interview::difficulty::Difficulty;
use crate::interview::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::interview::session::round2;
use crate::oracle::prompts::render;
use crate::oracle::{complete_json, Completion, Oracle, OracleError};

/// Most points the overtime penalty may remove.
const MAX_TIME_PENALTY: f64 = 20.0;
/// Trimmed answers shorter than this many characters are penalized.
const MIN_ANSWER_CHARS: usize = 20;
const BREVITY_PENALTY: f64 = 15.0;
const BREVITY_NOTE: &str = " Answer is too brief.";

pub const FALLBACK_SCORE: f64 = 50.0;
pub const FALLBACK_FEEDBACK: &str = "Unable to evaluate answer properly. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: f64,
    pub feedback: String,
}

impl Evaluation {
    fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            feedback: FALLBACK_FEEDBACK.to_string(),
        }
    }
}

/// Oracle verdict on an answer, before tier-dependent penalties.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// Parsed base score. Penalties apply when it is recorded.
    Scored(Evaluation),
    /// The reply could not be read. Recorded as the neutral fallback, unpenalized.
    Fallback,
}

impl Assessment {
    /// Final evaluation for an answer recorded at `difficulty`.
    pub fn finalize(self, answer: &str, time_taken: f64, difficulty: Difficulty) -> Evaluation {
        match self {
            Assessment::Scored(base) => apply_penalties(base, answer, time_taken, difficulty),
            Assessment::Fallback => Evaluation::fallback(),
        }
    }
}

/// Everything the evaluation prompt needs about one answer.
pub struct AnswerContext<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub difficulty: Difficulty,
    pub job_description: &'a str,
}

/// Asks the oracle for a base score. Malformed output degrades to `Assessment::Fallback`;
/// transport failures propagate.
pub async fn assess_answer(
    oracle: &dyn Oracle,
    ctx: &AnswerContext<'_>,
) -> Result<Assessment, AppError> {
    let prompt = render(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("question", ctx.question),
            ("answer", ctx.answer),
            ("difficulty", ctx.difficulty.as_str()),
            ("job_description", ctx.job_description),
        ],
    );

    match complete_json::<Evaluation>(oracle, Completion::new(&prompt).temperature(0.3)).await {
        Ok(raw) if raw.score.is_finite() => Ok(Assessment::Scored(raw)),
        Ok(raw) => {
            warn!("Evaluator received non-finite score {}, using fallback", raw.score);
            Ok(Assessment::Fallback)
        }
        Err(OracleError::Parse(e)) => {
            warn!("Evaluator could not parse oracle reply ({e}), using fallback");
            Ok(Assessment::Fallback)
        }
        Err(e) => Err(AppError::oracle("Answer evaluation", e)),
    }
}

// Models sometimes quote the score ("85"); accept either form.
fn deserialize_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a numeric string")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(ScoreVisitor)
}

/// Applies overtime and brevity penalties to a base evaluation and rounds to 2 dp.
pub fn apply_penalties(
    base: Evaluation,
    answer: &str,
    time_taken: f64,
    difficulty: Difficulty,
) -> Evaluation {
    let Evaluation {
        score,
        mut feedback,
    } = base;
    let mut score = score.clamp(0.0, 100.0);

    let limit = f64::from(difficulty.time_limit());
    if time_taken > limit {
        let penalty = MAX_TIME_PENALTY.min((time_taken - limit) / limit * MAX_TIME_PENALTY);
        score = (score - penalty).max(0.0);
        feedback.push_str(&format!(" (Time penalty applied: -{penalty:.1} points)"));
    }

    if answer.trim().chars().count() < MIN_ANSWER_CHARS {
        score = (score - BREVITY_PENALTY).max(0.0);
        feedback.push_str(BREVITY_NOTE);
    }

    Evaluation {
        score: round2(score),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;

    const LONG_ANSWER: &str = "A trait object erases the concrete type behind a vtable.";

    fn base(score: f64) -> Evaluation {
        Evaluation {
            score,
            feedback: "Solid.".to_string(),
        }
    }

    fn ctx<'a>(question: &'a str, answer: &'a str, difficulty: Difficulty) -> AnswerContext<'a> {
        AnswerContext {
            question,
            answer,
            difficulty,
            job_description: "Backend Rust engineer",
        }
    }

    #[test]
    fn test_overtime_penalty_is_proportional() {
        let e = apply_penalties(base(80.0), LONG_ANSWER, 150.0, Difficulty::Medium);
        assert_eq!(e.score, 75.0);
        assert!(e.feedback.ends_with("(Time penalty applied: -5.0 points)"));
    }

    #[test]
    fn test_penalties_compose() {
        let e = apply_penalties(base(80.0), "too short!", 150.0, Difficulty::Medium);
        assert_eq!(e.score, 60.0);
        assert!(e.feedback.contains("Time penalty applied"));
        assert!(e.feedback.ends_with("Answer is too brief."));
    }

    #[test]
    fn test_overtime_penalty_caps_at_twenty() {
        let e = apply_penalties(base(90.0), LONG_ANSWER, 900.0, Difficulty::Easy);
        assert_eq!(e.score, 70.0);
    }

    #[test]
    fn test_on_time_answer_keeps_score() {
        let e = apply_penalties(base(66.666), LONG_ANSWER, 90.0, Difficulty::Easy);
        assert_eq!(e.score, 66.67);
        assert_eq!(e.feedback, "Solid.");
    }

    #[test]
    fn test_penalties_floor_at_zero() {
        let e = apply_penalties(base(10.0), "", 500.0, Difficulty::Hard);
        assert_eq!(e.score, 0.0);
    }

    #[test]
    fn test_brevity_counts_trimmed_characters() {
        let padded = format!("   {}   ", "x".repeat(19));
        assert_eq!(apply_penalties(base(50.0), &padded, 0.0, Difficulty::Easy).score, 35.0);
        let exact = "x".repeat(20);
        assert_eq!(apply_penalties(base(50.0), &exact, 0.0, Difficulty::Easy).score, 50.0);
    }

    #[test]
    fn test_base_score_is_clamped() {
        assert_eq!(apply_penalties(base(140.0), LONG_ANSWER, 0.0, Difficulty::Hard).score, 100.0);
        assert_eq!(apply_penalties(base(-5.0), LONG_ANSWER, 0.0, Difficulty::Hard).score, 0.0);
    }

    #[test]
    fn test_finalize_uses_the_recording_tier() {
        let scored = Assessment::Scored(base(80.0));
        assert_eq!(scored.clone().finalize(LONG_ANSWER, 100.0, Difficulty::Medium).score, 80.0);
        assert_eq!(scored.finalize(LONG_ANSWER, 100.0, Difficulty::Easy).score, 77.78);
    }

    #[test]
    fn test_fallback_is_not_penalized() {
        let e = Assessment::Fallback.finalize("short", 999.0, Difficulty::Easy);
        assert_eq!(e.score, FALLBACK_SCORE);
        assert_eq!(e.feedback, FALLBACK_FEEDBACK);
    }

    #[test]
    fn test_score_accepts_numeric_strings() {
        let e: Evaluation = serde_json::from_str(r#"{"score": "85", "feedback": "ok"}"#).unwrap();
        assert_eq!(e.score, 85.0);
        let e: Evaluation = serde_json::from_str(r#"{"score": 72.5, "feedback": "ok"}"#).unwrap();
        assert_eq!(e.score, 72.5);
        assert!(serde_json::from_str::<Evaluation>(r#"{"score": "high", "feedback": "ok"}"#).is_err());
    }

    #[tokio::test]
    async fn test_assess_answer_returns_oracle_score() {
        let oracle =
            ScriptedOracle::with_replies([r#"{"score": 80, "feedback": "Good depth."}"#]);
        let assessment = assess_answer(
            &oracle,
            &ctx("What is a trait object?", LONG_ANSWER, Difficulty::Medium),
        )
        .await
        .unwrap();
        let e = assessment.finalize(LONG_ANSWER, 150.0, Difficulty::Medium);
        assert_eq!(e.score, 75.0);
        assert!(e.feedback.starts_with("Good depth."));
        let prompt = &oracle.prompts()[0];
        assert!(prompt.contains("What is a trait object?"));
        assert!(prompt.contains("Difficulty Level: MEDIUM"));
    }

    #[tokio::test]
    async fn test_quoted_score_is_not_a_fallback() {
        let oracle = ScriptedOracle::with_replies([r#"{"score": "85", "feedback": "Fine."}"#]);
        let assessment = assess_answer(&oracle, &ctx("q", LONG_ANSWER, Difficulty::Easy))
            .await
            .unwrap();
        assert!(matches!(assessment, Assessment::Scored(ref e) if e.score == 85.0));
    }

    #[tokio::test]
    async fn test_placeholders_in_candidate_text_reach_the_prompt_verbatim() {
        let oracle =
            ScriptedOracle::with_replies([r#"{"score": 70, "feedback": "ok"}"#]);
        let question = "Write a format string that prints {answer} literally";
        let answer = "Use format!(\"{{}}\") and avoid {job_description} style names";
        assess_answer(&oracle, &ctx(question, answer, Difficulty::Easy))
            .await
            .unwrap();

        let prompt = &oracle.prompts()[0];
        assert!(prompt.contains(&format!("Question: {question}\n")));
        assert!(prompt.contains(&format!("Candidate's Answer: {answer}\n")));
        assert!(prompt.contains("Job Requirements: Backend Rust engineer"));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let oracle = ScriptedOracle::with_replies(["I think this answer is pretty good!"]);
        let assessment = assess_answer(&oracle, &ctx("q", "short", Difficulty::Easy))
            .await
            .unwrap();
        assert_eq!(assessment, Assessment::Fallback);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let oracle = ScriptedOracle::new();
        oracle.push_error(OracleError::Api {
            status: 503,
            message: "unavailable".to_string(),
        });
        let result = assess_answer(&oracle, &ctx("q", LONG_ANSWER, Difficulty::Easy)).await;
        assert!(matches!(result, Err(AppError::UpstreamCall(_))));
    }
}
