//! Question Generator: one adaptive question per oracle call.

use serde::Serialize;

use crate::errors::AppError;
use crate::interview::difficulty::Difficulty;
use crate::interview::prompts::QUESTION_PROMPT_TEMPLATE;
use crate::oracle::prompts::render;
use crate::oracle::{Completion, Oracle};
use crate::resume::profile::CandidateProfile;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub question: String,
    pub difficulty: Difficulty,
    pub time_limit: u32,
    pub skill_area: String,
}

pub async fn generate_question(
    oracle: &dyn Oracle,
    profile: &CandidateProfile,
    job_description: &str,
    difficulty: Difficulty,
    past_questions: &[&str],
) -> Result<Question, AppError> {
    let prompt = build_question_prompt(profile, job_description, difficulty, past_questions);

    let text = oracle
        .complete(Completion::new(&prompt).temperature(0.7))
        .await
        .map_err(|e| AppError::oracle("Question generation", e))?;

    let question = clean_question(&text);
    if question.is_empty() {
        return Err(AppError::UpstreamParse(
            "Question generation: oracle returned an empty question".to_string(),
        ));
    }

    Ok(Question {
        question,
        difficulty,
        time_limit: difficulty.time_limit(),
        skill_area: profile.primary_domain.clone(),
    })
}

fn build_question_prompt(
    profile: &CandidateProfile,
    job_description: &str,
    difficulty: Difficulty,
    past_questions: &[&str],
) -> String {
    let past = if past_questions.is_empty() {
        "None".to_string()
    } else {
        past_questions
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let skills = profile.skills.join(", ");
    let experience_years = profile.experience_years.to_string();
    render(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("skills", skills.as_str()),
            ("primary_domain", profile.primary_domain.as_str()),
            ("experience_years", experience_years.as_str()),
            ("difficulty", difficulty.as_str()),
            ("past_questions", past.as_str()),
        ],
    )
}

/// Drops surrounding whitespace and quote characters the model sometimes adds.
fn clean_question(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            experience_years: 4.0,
            projects: vec!["Payments ledger".to_string()],
            primary_domain: "Backend Engineering".to_string(),
        }
    }

    #[test]
    fn test_clean_question_strips_quotes() {
        assert_eq!(
            clean_question("  \"What is a lifetime?\"\n"),
            "What is a lifetime?"
        );
        assert_eq!(clean_question("'Why Arc?'"), "Why Arc?");
    }

    #[test]
    fn test_prompt_lists_past_questions() {
        let prompt = build_question_prompt(
            &profile(),
            "Build APIs",
            Difficulty::Hard,
            &["What is Send?", "What is Sync?"],
        );
        assert!(prompt.contains("- What is Send?\n- What is Sync?"));
        assert!(prompt.contains("Difficulty Level: HARD"));
        assert!(prompt.contains("Skills: Rust, PostgreSQL"));
        assert!(prompt.contains("Experience: 4 years"));
    }

    #[test]
    fn test_prompt_without_history_says_none() {
        let prompt = build_question_prompt(&profile(), "jd", Difficulty::Easy, &[]);
        assert!(prompt.contains("Past Questions Already Asked:\nNone"));
    }

    #[tokio::test]
    async fn test_generate_question_fills_tier_metadata() {
        let oracle = ScriptedOracle::with_replies(["\"Explain the borrow checker.\""]);
        let q = generate_question(&oracle, &profile(), "jd", Difficulty::Medium, &[])
            .await
            .unwrap();
        assert_eq!(q.question, "Explain the borrow checker.");
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.time_limit, 120);
        assert_eq!(q.skill_area, "Backend Engineering");
    }

    #[tokio::test]
    async fn test_blank_question_is_an_upstream_parse_error() {
        let oracle = ScriptedOracle::with_replies(["\"\""]);
        let result = generate_question(&oracle, &profile(), "jd", Difficulty::Easy, &[]).await;
        assert!(matches!(result, Err(AppError::UpstreamParse(_))));
    }
}
