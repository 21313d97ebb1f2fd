//! Resume Rewriter: rephrases a resume toward a target job description.

use crate::errors::AppError;
use crate::oracle::prompts::render;
use crate::oracle::{Completion, Oracle};
use crate::resume::prompts::REWRITE_PROMPT_TEMPLATE;

pub async fn rewrite_resume(
    oracle: &dyn Oracle,
    resume_text: &str,
    job_description: &str,
    focus_areas: &[String],
) -> Result<String, AppError> {
    let focus = focus_section(focus_areas);
    let prompt = render(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("focus_areas", focus.as_str()),
        ],
    );

    let text = oracle
        .complete(Completion::new(&prompt).temperature(0.5).max_tokens(3000))
        .await
        .map_err(|e| AppError::oracle("Resume rewrite", e))?;

    Ok(text.trim().to_string())
}

fn focus_section(focus_areas: &[String]) -> String {
    let areas: Vec<_> = focus_areas
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(|a| format!("- {a}"))
        .collect();

    if areas.is_empty() {
        String::new()
    } else {
        format!("\n\nPriority areas to improve:\n{}", areas.join("\n"))
    }
}
