//! Profile Extractor: turns freeform candidate text into a `CandidateProfile`.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::oracle::prompts::render;
use crate::oracle::{complete_json, Completion, Oracle};
use crate::resume::prompts::PROFILE_PROMPT_TEMPLATE;

/// Structured candidate profile. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub projects: Vec<String>,
    pub primary_domain: String,
}

/// Extracts a profile with one oracle call. All four fields must be present in the reply.
pub async fn extract_profile(
    oracle: &dyn Oracle,
    resume_text: &str,
) -> Result<CandidateProfile, AppError> {
    let prompt = render(PROFILE_PROMPT_TEMPLATE, &[("resume_text", resume_text)]);

    let mut profile: CandidateProfile =
        complete_json(oracle, Completion::new(&prompt).temperature(0.2))
            .await
            .map_err(|e| AppError::oracle("Profile extraction", e))?;

    if !profile.experience_years.is_finite() || profile.experience_years < 0.0 {
        profile.experience_years = 0.0;
    }

    Ok(profile)
}
