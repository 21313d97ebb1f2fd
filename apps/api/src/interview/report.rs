//! Final Report: score aggregation, hiring category, and oracle-written feedback.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interview::difficulty::Difficulty;
use crate::interview::prompts::REPORT_PROMPT_TEMPLATE;
use crate::interview::session::{mean_score, Response, Session};
use crate::oracle::prompts::render;
use crate::oracle::{complete_json, Completion, Oracle};

const QUESTION_DIGEST_CHARS: usize = 100;
const ANSWER_DIGEST_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Strong,
    Good,
    Average,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HiringReadiness {
    Yes,
    Maybe,
    No,
}

/// Mean score plus its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub final_score: f64,
    pub category: Category,
    pub hiring_readiness: HiringReadiness,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "EASY")]
    pub easy: Vec<f64>,
    #[serde(rename = "MEDIUM")]
    pub medium: Vec<f64>,
    #[serde(rename = "HARD")]
    pub hard: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalReport {
    pub final_score: f64,
    pub category: Category,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub hiring_readiness: HiringReadiness,
    pub total_questions: usize,
    pub total_time: f64,
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Deserialize)]
struct ReportFeedback {
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
}

pub fn categorize(final_score: f64) -> (Category, HiringReadiness) {
    if final_score >= 75.0 {
        (Category::Strong, HiringReadiness::Yes)
    } else if final_score >= 60.0 {
        (Category::Good, HiringReadiness::Maybe)
    } else if final_score >= 45.0 {
        (Category::Average, HiringReadiness::No)
    } else {
        (Category::Weak, HiringReadiness::No)
    }
}

pub fn summarize(scores: &[f64]) -> ScoreSummary {
    let final_score = mean_score(scores);
    let (category, hiring_readiness) = categorize(final_score);
    ScoreSummary {
        final_score,
        category,
        hiring_readiness,
    }
}

pub fn score_breakdown(responses: &[Response]) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();
    for r in responses {
        match r.difficulty {
            Difficulty::Easy => breakdown.easy.push(r.score),
            Difficulty::Medium => breakdown.medium.push(r.score),
            Difficulty::Hard => breakdown.hard.push(r.score),
        }
    }
    breakdown
}

/// Builds the final report for a finished session.
/// Oracle failures fall back to fixed strengths and weaknesses.
pub async fn build_report(
    oracle: &dyn Oracle,
    session: &Session,
    responses: &[Response],
) -> FinalReport {
    let summary = summarize(&session.scores);
    let (strengths, weaknesses) = report_feedback(oracle, &summary, responses).await;

    FinalReport {
        final_score: summary.final_score,
        category: summary.category,
        strengths,
        weaknesses,
        hiring_readiness: summary.hiring_readiness,
        total_questions: responses.len(),
        total_time: session.time_used,
        score_breakdown: score_breakdown(responses),
    }
}

async fn report_feedback(
    oracle: &dyn Oracle,
    summary: &ScoreSummary,
    responses: &[Response],
) -> (Vec<String>, Vec<String>) {
    let category = serde_json::to_value(summary.category)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default();

    let final_score = summary.final_score.to_string();
    let total_questions = responses.len().to_string();
    let qa_summary = qa_digest(responses);
    let prompt = render(
        REPORT_PROMPT_TEMPLATE,
        &[
            ("final_score", final_score.as_str()),
            ("total_questions", total_questions.as_str()),
            ("category", category.as_str()),
            ("qa_summary", qa_summary.as_str()),
        ],
    );

    match complete_json::<ReportFeedback>(oracle, Completion::new(&prompt).temperature(0.4)).await
    {
        Ok(feedback) => {
            let strengths = non_empty_or(feedback.strengths, &["Completed the interview"]);
            let weaknesses =
                non_empty_or(feedback.weaknesses, &["Continue practicing technical concepts"]);
            (strengths, weaknesses)
        }
        Err(e) => {
            warn!("Report feedback generation failed ({e}), using defaults");
            (
                to_strings(&[
                    "Completed the interview",
                    "Answered all questions",
                    "Demonstrated effort",
                ]),
                to_strings(&[
                    "Continue practicing",
                    "Review fundamental concepts",
                    "Improve response depth",
                ]),
            )
        }
    }
}

fn qa_digest(responses: &[Response]) -> String {
    responses
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "Q{} (Score: {}): {}...\nA: {}...",
                i + 1,
                r.score,
                truncate_chars(&r.question, QUESTION_DIGEST_CHARS),
                truncate_chars(&r.answer, ANSWER_DIGEST_CHARS),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn non_empty_or(items: Vec<String>, default: &[&str]) -> Vec<String> {
    if items.is_empty() {
        to_strings(default)
    } else {
        items
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;
    use uuid::Uuid;

    fn response(score: f64, difficulty: Difficulty) -> Response {
        Response {
            question: "Describe a B-tree.".to_string(),
            answer: "A balanced search tree with wide nodes.".to_string(),
            score,
            time_taken: 40.0,
            difficulty,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_summary_of_mixed_scores_is_good_maybe() {
        let s = summarize(&[80.0, 65.0, 50.0]);
        assert_eq!(s.final_score, 65.0);
        assert_eq!(s.category, Category::Good);
        assert_eq!(s.hiring_readiness, HiringReadiness::Maybe);
    }

    #[test]
    fn test_category_cutoffs() {
        assert_eq!(categorize(75.0), (Category::Strong, HiringReadiness::Yes));
        assert_eq!(categorize(74.99), (Category::Good, HiringReadiness::Maybe));
        assert_eq!(categorize(60.0), (Category::Good, HiringReadiness::Maybe));
        assert_eq!(categorize(45.0), (Category::Average, HiringReadiness::No));
        assert_eq!(categorize(44.99), (Category::Weak, HiringReadiness::No));
    }

    #[test]
    fn test_breakdown_groups_by_tier_in_order() {
        let responses = vec![
            response(60.0, Difficulty::Easy),
            response(72.0, Difficulty::Easy),
            response(81.0, Difficulty::Medium),
            response(45.0, Difficulty::Hard),
        ];
        let b = score_breakdown(&responses);
        assert_eq!(b.easy, vec![60.0, 72.0]);
        assert_eq!(b.medium, vec![81.0]);
        assert_eq!(b.hard, vec![45.0]);
        let json = serde_json::to_value(&b).unwrap();
        assert!(json.get("MEDIUM").is_some());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[tokio::test]
    async fn test_build_report_uses_oracle_feedback() {
        let oracle = ScriptedOracle::with_replies([
            r#"{"strengths": ["Clear reasoning"], "weaknesses": ["Indexing depth"]}"#,
        ]);
        let mut session = Session::new(Uuid::new_v4(), "jd".to_string());
        session.scores = vec![80.0, 65.0, 50.0];
        session.time_used = 120.0;
        let responses = vec![
            response(80.0, Difficulty::Easy),
            response(65.0, Difficulty::Medium),
            response(50.0, Difficulty::Medium),
        ];

        let report = build_report(&oracle, &session, &responses).await;
        assert_eq!(report.final_score, 65.0);
        assert_eq!(report.category, Category::Good);
        assert_eq!(report.strengths, vec!["Clear reasoning".to_string()]);
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.total_time, 120.0);
        assert!(oracle.prompts()[0].contains("Performance Category: GOOD"));
    }

    #[tokio::test]
    async fn test_build_report_falls_back_on_bad_reply() {
        let oracle = ScriptedOracle::with_replies(["no json here"]);
        let mut session = Session::new(Uuid::new_v4(), "jd".to_string());
        session.scores = vec![30.0];
        let responses = vec![response(30.0, Difficulty::Easy)];

        let report = build_report(&oracle, &session, &responses).await;
        assert_eq!(report.category, Category::Weak);
        assert_eq!(report.strengths.len(), 3);
        assert_eq!(report.weaknesses[0], "Continue practicing");
    }
}
