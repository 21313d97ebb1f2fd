//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::difficulty::{Difficulty, SessionStatus};
use crate::interview::evaluator::{assess_answer, AnswerContext};
use crate::interview::questions::generate_question;
use crate::interview::report::{build_report, FinalReport};
use crate::interview::session::{Session, Submission};
use crate::resume::profile::CandidateProfile;
use crate::state::AppState;

const TERMINATION_REASON: &str = "Failed 3 consecutive questions";
const TERMINATION_MESSAGE: &str = "Interview terminated due to poor performance";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartRequest {
    pub candidate_id: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: Uuid,
    pub first_question: String,
    pub difficulty: Difficulty,
    pub time_limit: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct NextQuestionResponse {
    pub question: String,
    pub difficulty: Difficulty,
    pub time_limit: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerRequest {
    pub session_id: String,
    pub question: String,
    pub answer_text: String,
    pub time_taken: f64,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub score: f64,
    /// Controller verdict for this answer: CLEARED, WARNING or TERMINATED.
    pub status: SessionStatus,
    pub feedback: String,
    pub next_difficulty: Difficulty,
    pub questions_remaining: u32,
    pub session_status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EndRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session: Session,
    pub responses_count: usize,
    pub average_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /interview/start
///
/// Opens a session at EASY for a previously analyzed candidate and returns the first question.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartResponse>, AppError> {
    if request.candidate_id.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "candidate_id and job_description are required".to_string(),
        ));
    }

    let candidate_id = parse_id(&request.candidate_id, "Candidate profile")?;
    let profile = load_profile(&state, candidate_id).await?;

    let session = state
        .sessions
        .create(candidate_id, request.job_description)
        .await;
    info!(
        "Started session {} for candidate {candidate_id}",
        session.session_id
    );

    let question = generate_question(
        state.oracle.as_ref(),
        &profile,
        &session.job_description,
        session.difficulty,
        &[],
    )
    .await?;

    Ok(Json(StartResponse {
        session_id: session.session_id,
        first_question: question.question,
        difficulty: question.difficulty,
        time_limit: question.time_limit,
    }))
}

/// GET /interview/next-question?session_id=
///
/// Generates the next question at the session's current difficulty.
pub async fn handle_next_question(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<NextQuestionResponse>, AppError> {
    let session_id = parse_id(&query.session_id, "Session")?;
    let session = state.sessions.get(session_id).await?;

    if !session.status.is_open() {
        return Err(AppError::Validation(
            "Interview session is not active".to_string(),
        ));
    }
    if !session.accepts_answers() {
        return Err(AppError::Validation("Maximum questions reached".to_string()));
    }

    let profile = load_profile(&state, session.candidate_id).await?;
    let history = state.sessions.responses(session_id).await?;
    let past: Vec<&str> = history.iter().map(|r| r.question.as_str()).collect();

    let question = generate_question(
        state.oracle.as_ref(),
        &profile,
        &session.job_description,
        session.difficulty,
        &past,
    )
    .await?;

    Ok(Json(NextQuestionResponse {
        question: question.question,
        difficulty: question.difficulty,
        time_limit: question.time_limit,
    }))
}

/// POST /interview/answer
///
/// Assesses the answer, then records it. Penalties and the recorded tier are fixed by the
/// store at record time, so racing submissions stay consistent with the adaptation.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let session_id = parse_id(&request.session_id, "Session")?;
    if !request.time_taken.is_finite() || request.time_taken < 0.0 {
        return Err(AppError::Validation(
            "time_taken must be a non-negative number of seconds".to_string(),
        ));
    }

    let session = state.sessions.get(session_id).await?;
    if !session.accepts_answers() {
        return Err(AppError::Validation(
            "Interview session is not accepting answers".to_string(),
        ));
    }

    let assessment = assess_answer(
        state.oracle.as_ref(),
        &AnswerContext {
            question: &request.question,
            answer: &request.answer_text,
            difficulty: session.difficulty,
            job_description: &session.job_description,
        },
    )
    .await?;

    let outcome = state
        .sessions
        .record_answer(
            session_id,
            Submission {
                question: request.question,
                answer: request.answer_text,
                time_taken: request.time_taken,
                assessment,
            },
        )
        .await?;

    let terminated = outcome.adaptation.status == SessionStatus::Terminated;
    if terminated {
        info!("Session {session_id} terminated: {TERMINATION_REASON}");
    }

    Ok(Json(AnswerResponse {
        score: outcome.score,
        status: outcome.adaptation.status,
        feedback: outcome.feedback,
        next_difficulty: outcome.adaptation.difficulty,
        questions_remaining: outcome.questions_remaining,
        session_status: outcome.session_status,
        reason: terminated.then(|| TERMINATION_REASON.to_string()),
        message: terminated.then(|| TERMINATION_MESSAGE.to_string()),
    }))
}

/// POST /interview/end
///
/// Closes the session and returns the final hiring report.
pub async fn handle_end(
    State(state): State<AppState>,
    Json(request): Json<EndRequest>,
) -> Result<Json<FinalReport>, AppError> {
    let session_id = parse_id(&request.session_id, "Session")?;
    let (session, responses) = state.sessions.finalize(session_id).await?;

    let report = build_report(state.oracle.as_ref(), &session, &responses).await;
    info!(
        "Session {session_id} finished: score={} category={:?}",
        report.final_score, report.category
    );

    Ok(Json(report))
}

/// GET /session/:id
pub async fn handle_session_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, AppError> {
    let session_id = parse_id(&id, "Session")?;
    let session = state.sessions.get(session_id).await?;
    let responses_count = state.sessions.responses(session_id).await?.len();
    let average_score = session.average_score();

    Ok(Json(SessionStatusResponse {
        session,
        responses_count,
        average_score,
    }))
}

/// Unknown and malformed identifiers both read as "not found" to the caller.
fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(format!("{what} '{raw}' not found")))
}

async fn load_profile(state: &AppState, candidate_id: Uuid) -> Result<CandidateProfile, AppError> {
    state.profiles.get(candidate_id).await.ok_or_else(|| {
        AppError::NotFound("Candidate profile not found. Please analyze resume first.".to_string())
    })
}
