//! Session Store: repository traits for candidate profiles and interview sessions.
//!
//! `AppState` carries these as `Arc<dyn …>`, so a durable backend can replace
//! `InMemoryStore` without touching handlers or the difficulty controller.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::interview::difficulty::SessionStatus;
use crate::interview::session::{AnswerOutcome, Response, Session, Submission};
use crate::resume::profile::CandidateProfile;

pub mod memory;

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Session {session_id} is not accepting answers (status {status:?}, {question_count} questions answered)")]
    SessionClosed {
        session_id: Uuid,
        status: SessionStatus,
        question_count: u32,
    },

    #[error("No responses found for session {0}")]
    NoResponses(Uuid),
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a profile under a fresh candidate id.
    async fn insert(&self, profile: CandidateProfile) -> Uuid;

    async fn get(&self, candidate_id: Uuid) -> Option<CandidateProfile>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Starts a new session at EASY with zeroed counters.
    async fn create(&self, candidate_id: Uuid, job_description: String) -> Session;

    async fn get(&self, session_id: Uuid) -> Result<Session, StoreError>;

    /// Answered questions in submission order.
    async fn responses(&self, session_id: Uuid) -> Result<Vec<Response>, StoreError>;

    /// Scores the submission at the session's current tier, appends it, and applies the
    /// controller's update as one atomic step.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` for an unknown id
    /// - `SessionClosed` once the session is terminated, completed, or out of questions
    async fn record_answer(
        &self,
        session_id: Uuid,
        submission: Submission,
    ) -> Result<AnswerOutcome, StoreError>;

    /// Closes the session and returns its final state with all responses.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` for an unknown id
    /// - `NoResponses` if nothing was answered
    async fn finalize(&self, session_id: Uuid) -> Result<(Session, Vec<Response>), StoreError>;

    /// Sessions that are still open.
    async fn count_open(&self) -> usize;
}
