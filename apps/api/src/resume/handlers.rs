//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::matching::{score_match, MatchReport};
use crate::resume::pdf::extract_pdf_text;
use crate::resume::profile::{extract_profile, CandidateProfile};
use crate::resume::rewrite::rewrite_resume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub candidate_id: Uuid,
    pub candidate_profile: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub candidate_id: Uuid,
    pub candidate_profile: CandidateProfile,
    pub resume_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description: String,
    /// Optional. Empty, malformed, or unknown ids fall back to extracting a fresh profile.
    pub candidate_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RewriteRequest {
    pub resume_text: String,
    pub job_description: String,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub original_resume: String,
    pub rewritten_resume: String,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /resume/analyze
///
/// Extracts a structured profile from resume or "about me" text and stores it.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate information is required".to_string(),
        ));
    }

    let (candidate_id, candidate_profile) = analyze_and_store(&state, &request.resume_text).await?;

    Ok(Json(AnalyzeResponse {
        candidate_id,
        candidate_profile,
    }))
}

/// POST /resume/upload
///
/// Multipart upload of a PDF resume (`file` field). Extracts the text layer, then
/// analyzes it like `/resume/analyze`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            pdf = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?,
            );
            break;
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("A 'file' field is required".to_string()))?;
    info!("Received PDF upload ({} bytes)", pdf.len());

    let resume_text = tokio::task::spawn_blocking(move || extract_pdf_text(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;

    let (candidate_id, candidate_profile) = analyze_and_store(&state, &resume_text).await?;

    Ok(Json(UploadResponse {
        candidate_id,
        candidate_profile,
        resume_text,
    }))
}

/// POST /resume/match-jd
///
/// Scores resume compatibility against a job description. Uses the stored profile when
/// `candidate_id` resolves, otherwise extracts one on the fly without storing it.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text and job_description are required".to_string(),
        ));
    }

    let known_id = request
        .candidate_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id.trim()).ok());
    let stored = match known_id {
        Some(id) => state.profiles.get(id).await,
        None => None,
    };
    let profile = match stored {
        Some(profile) => profile,
        None => extract_profile(state.oracle.as_ref(), &request.resume_text).await?,
    };

    let report = score_match(
        state.oracle.as_ref(),
        &profile,
        &request.resume_text,
        &request.job_description,
    )
    .await?;
    info!(
        "Match scored: overall={} ats={}",
        report.overall_match, report.ats_score
    );

    Ok(Json(report))
}

/// POST /resume/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text and job_description are required".to_string(),
        ));
    }

    let rewritten_resume = rewrite_resume(
        state.oracle.as_ref(),
        &request.resume_text,
        &request.job_description,
        &request.focus_areas,
    )
    .await?;

    Ok(Json(RewriteResponse {
        original_resume: request.resume_text,
        rewritten_resume,
        message: "Resume has been optimized for the job description".to_string(),
    }))
}

async fn analyze_and_store(
    state: &AppState,
    resume_text: &str,
) -> Result<(Uuid, CandidateProfile), AppError> {
    let profile = extract_profile(state.oracle.as_ref(), resume_text).await?;
    let candidate_id = state.profiles.insert(profile.clone()).await;
    info!(
        "Stored profile {candidate_id}: domain={}, {} skills",
        profile.primary_domain,
        profile.skills.len()
    );
    Ok((candidate_id, profile))
}
