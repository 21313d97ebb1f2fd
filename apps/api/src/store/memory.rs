//! Process-lifetime store. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{ProfileRepository, SessionRepository, StoreError};
use crate::interview::session::{AnswerOutcome, Response, Session, Submission};
use crate::resume::profile::CandidateProfile;

struct SessionEntry {
    session: Session,
    responses: Vec<Response>,
}

/// Implements both repositories over `RwLock<HashMap<..>>`.
/// Each mutation holds the write lock for its whole read-modify-write.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: RwLock<HashMap<Uuid, CandidateProfile>>,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn insert(&self, profile: CandidateProfile) -> Uuid {
        let candidate_id = Uuid::new_v4();
        self.profiles.write().await.insert(candidate_id, profile);
        candidate_id
    }

    async fn get(&self, candidate_id: Uuid) -> Option<CandidateProfile> {
        self.profiles.read().await.get(&candidate_id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, candidate_id: Uuid, job_description: String) -> Session {
        let session = Session::new(candidate_id, job_description);
        self.sessions.write().await.insert(
            session.session_id,
            SessionEntry {
                session: session.clone(),
                responses: Vec::new(),
            },
        );
        session
    }

    async fn get(&self, session_id: Uuid) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .map(|e| e.session.clone())
            .ok_or(StoreError::SessionNotFound(session_id))
    }

    async fn responses(&self, session_id: Uuid) -> Result<Vec<Response>, StoreError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .map(|e| e.responses.clone())
            .ok_or(StoreError::SessionNotFound(session_id))
    }

    async fn record_answer(
        &self,
        session_id: Uuid,
        submission: Submission,
    ) -> Result<AnswerOutcome, StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(StoreError::SessionNotFound(session_id))?;

        if !entry.session.accepts_answers() {
            return Err(StoreError::SessionClosed {
                session_id,
                status: entry.session.status,
                question_count: entry.session.question_count,
            });
        }

        let SessionEntry { session, responses } = entry;
        let outcome = session.record_answer(submission, responses);

        info!(
            "Session {session_id}: answer {} at {} scored {} -> {:?}, next {}",
            session.question_count,
            outcome.asked_at,
            outcome.score,
            outcome.session_status,
            session.difficulty
        );
        Ok(outcome)
    }

    async fn finalize(&self, session_id: Uuid) -> Result<(Session, Vec<Response>), StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session_id)
            .ok_or(StoreError::SessionNotFound(session_id))?;

        if entry.responses.is_empty() {
            return Err(StoreError::NoResponses(session_id));
        }

        entry.session.finish();
        Ok((entry.session.clone(), entry.responses.clone()))
    }

    async fn count_open(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|e| e.session.status.is_open())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::interview::difficulty::{adapt, Difficulty, SessionStatus};
    use crate::interview::evaluator::{Assessment, Evaluation};

    fn answer(score: f64) -> Submission {
        Submission {
            question: "What does Pin guarantee?".to_string(),
            answer: "The pointee will not move until it is dropped.".to_string(),
            time_taken: 20.0,
            assessment: Assessment::Scored(Evaluation {
                score,
                feedback: String::new(),
            }),
        }
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            skills: vec!["Go".to_string()],
            experience_years: 2.0,
            projects: vec![],
            primary_domain: "DevOps".to_string(),
        }
    }

    #[tokio::test]
    async fn test_profiles_round_trip_by_id() {
        let store = InMemoryStore::new();
        let id = ProfileRepository::insert(&store, profile()).await;
        assert_eq!(ProfileRepository::get(&store, id).await, Some(profile()));
        assert!(ProfileRepository::get(&store, Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_create_initializes_session() {
        let store = InMemoryStore::new();
        let s = store.create(Uuid::new_v4(), "SRE".to_string()).await;
        let fetched = SessionRepository::get(&store, s.session_id).await.unwrap();
        assert_eq!(fetched.status, SessionStatus::Active);
        assert_eq!(fetched.difficulty, Difficulty::Easy);
        assert!(store.responses(s.session_id).await.unwrap().is_empty());
        assert_eq!(store.count_open().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            SessionRepository::get(&store, id).await,
            Err(StoreError::SessionNotFound(_))
        ));
        assert!(matches!(
            store.record_answer(id, answer(80.0)).await,
            Err(StoreError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_answers_after_termination_are_rejected() {
        let store = InMemoryStore::new();
        let s = store.create(Uuid::new_v4(), "jd".to_string()).await;
        for _ in 0..3 {
            store.record_answer(s.session_id, answer(10.0)).await.unwrap();
        }
        let err = store.record_answer(s.session_id, answer(90.0)).await;
        assert!(matches!(err, Err(StoreError::SessionClosed { question_count: 3, .. })));
        assert_eq!(store.responses(s.session_id).await.unwrap().len(), 3);
        assert_eq!(store.count_open().await, 0);
    }

    #[tokio::test]
    async fn test_eleventh_answer_is_rejected() {
        let store = InMemoryStore::new();
        let s = store.create(Uuid::new_v4(), "jd".to_string()).await;
        for i in 0..10 {
            let outcome = store.record_answer(s.session_id, answer(75.0)).await.unwrap();
            assert_eq!(outcome.questions_remaining, 9 - i);
        }
        let session = SessionRepository::get(&store, s.session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(store.record_answer(s.session_id, answer(75.0)).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_keep_counters_aligned() {
        let store = Arc::new(InMemoryStore::new());
        let session_id = store.create(Uuid::new_v4(), "jd".to_string()).await.session_id;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.record_answer(session_id, answer(60.0)).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let session = SessionRepository::get(store.as_ref(), session_id).await.unwrap();
        let responses = store.responses(session_id).await.unwrap();
        assert_eq!(session.question_count, 10);
        assert_eq!(session.scores.len(), 10);
        assert_eq!(responses.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_record_the_tier_they_adapted_from() {
        let store = Arc::new(InMemoryStore::new());
        let session_id = store.create(Uuid::new_v4(), "jd".to_string()).await.session_id;
        let scores = [85.0, 40.0, 75.0, 55.0, 45.0, 90.0, 60.0, 30.0, 72.0, 50.0];

        let handles: Vec<_> = scores
            .into_iter()
            .map(|score| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.record_answer(session_id, answer(score)).await })
            })
            .collect();
        for h in handles {
            match h.await.unwrap() {
                Ok(_) | Err(StoreError::SessionClosed { .. }) => {}
                Err(e) => panic!("unexpected store error: {e}"),
            }
        }

        // Replaying the controller over the recorded order must reproduce every tier
        let responses = store.responses(session_id).await.unwrap();
        let session = SessionRepository::get(store.as_ref(), session_id).await.unwrap();
        let (mut tier, mut streak) = (Difficulty::Easy, 0);
        for r in &responses {
            assert_eq!(r.difficulty, tier);
            let a = adapt(tier, streak, r.score);
            tier = a.difficulty;
            streak = a.fail_streak;
        }
        assert_eq!(session.difficulty, tier);
        assert_eq!(session.fail_streak, streak);
        assert_eq!(session.question_count as usize, responses.len());
    }

    #[tokio::test]
    async fn test_finalize_requires_responses_and_closes_session() {
        let store = InMemoryStore::new();
        let s = store.create(Uuid::new_v4(), "jd".to_string()).await;
        assert!(matches!(
            store.finalize(s.session_id).await,
            Err(StoreError::NoResponses(_))
        ));

        store.record_answer(s.session_id, answer(80.0)).await.unwrap();
        let (session, responses) = store.finalize(s.session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.ended_at.is_some());
        assert_eq!(responses.len(), 1);
    }
}
