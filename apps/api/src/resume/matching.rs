//! Match Scorer: resume-to-job-description compatibility via one oracle call.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::oracle::prompts::render;
use crate::oracle::{complete_json, Completion, Oracle};
use crate::resume::profile::CandidateProfile;
use crate::resume::prompts::MATCH_PROMPT_TEMPLATE;

/// Compatibility metrics. Fields the model omits take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchReport {
    pub ats_score: f64,
    pub overall_match: f64,
    pub skill_match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_requirements: Vec<String>,
    pub unmet_requirements: Vec<String>,
    pub experience_match: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for MatchReport {
    fn default() -> Self {
        Self {
            ats_score: 0.0,
            overall_match: 0.0,
            skill_match_percentage: 0.0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            matched_requirements: Vec::new(),
            unmet_requirements: Vec::new(),
            experience_match: "Unknown".to_string(),
            summary: String::new(),
            strengths: Vec::new(),
            gaps: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

pub async fn score_match(
    oracle: &dyn Oracle,
    profile: &CandidateProfile,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchReport, AppError> {
    let skills = profile.skills.join(", ");
    let experience_years = profile.experience_years.to_string();
    let prompt = render(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("skills", skills.as_str()),
            ("experience_years", experience_years.as_str()),
            ("primary_domain", profile.primary_domain.as_str()),
        ],
    );

    let mut report: MatchReport = complete_json(
        oracle,
        Completion::new(&prompt).temperature(0.3).max_tokens(2000),
    )
    .await
    .map_err(|e| AppError::oracle("Resume matching", e))?;

    report.ats_score = clamp_percent(report.ats_score);
    report.overall_match = clamp_percent(report.overall_match);
    report.skill_match_percentage = clamp_percent(report.skill_match_percentage);

    Ok(report)
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
