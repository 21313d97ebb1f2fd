//! Interview session state and the rules for recording an answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::difficulty::{adapt, Adaptation, Difficulty, SessionStatus, MAX_QUESTIONS};
use crate::interview::evaluator::Assessment;

/// One candidate's interview attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    /// References a stored `CandidateProfile`; the session does not own it.
    pub candidate_id: Uuid,
    pub job_description: String,
    pub difficulty: Difficulty,
    pub question_count: u32,
    pub scores: Vec<f64>,
    pub fail_streak: u32,
    pub time_used: f64,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A single answered question. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub time_taken: f64,
    pub difficulty: Difficulty,
    pub feedback: String,
}

/// An assessed answer waiting to be recorded.
#[derive(Debug, Clone)]
pub struct Submission {
    pub question: String,
    pub answer: String,
    pub time_taken: f64,
    pub assessment: Assessment,
}

/// What an answer submission did to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub score: f64,
    pub feedback: String,
    /// Tier the answer was recorded and penalized at.
    pub asked_at: Difficulty,
    pub adaptation: Adaptation,
    pub questions_remaining: u32,
    /// Session status after the answer; `Completed` when the last question was answered.
    pub session_status: SessionStatus,
}

impl Session {
    pub fn new(candidate_id: Uuid, job_description: String) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            candidate_id,
            job_description,
            difficulty: Difficulty::Easy,
            question_count: 0,
            scores: Vec::new(),
            fail_streak: 0,
            time_used: 0.0,
            status: SessionStatus::Active,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// True while another question may be asked and answered.
    pub fn accepts_answers(&self) -> bool {
        self.status.is_open() && self.question_count < MAX_QUESTIONS
    }

    pub fn questions_remaining(&self) -> u32 {
        MAX_QUESTIONS.saturating_sub(self.question_count)
    }

    /// Mean of all scores so far, rounded to 2 dp; 0 when nothing has been answered.
    pub fn average_score(&self) -> f64 {
        mean_score(&self.scores)
    }

    /// Scores `submission` at the current tier, appends it to `history`, and advances the
    /// session through the controller.
    ///
    /// Callers must check `accepts_answers` first; the store does this under its write lock.
    pub fn record_answer(
        &mut self,
        submission: Submission,
        history: &mut Vec<Response>,
    ) -> AnswerOutcome {
        let asked_at = self.difficulty;
        let Submission {
            question,
            answer,
            time_taken,
            assessment,
        } = submission;
        let evaluation = assessment.finalize(&answer, time_taken, asked_at);
        let score = evaluation.score;

        self.scores.push(score);
        self.time_used += time_taken;
        self.question_count += 1;
        history.push(Response {
            question,
            answer,
            score,
            time_taken,
            difficulty: asked_at,
            feedback: evaluation.feedback.clone(),
        });

        let adaptation = adapt(asked_at, self.fail_streak, score);
        self.difficulty = adaptation.difficulty;
        self.fail_streak = adaptation.fail_streak;
        self.status = adaptation.status;

        if self.status != SessionStatus::Terminated && self.question_count >= MAX_QUESTIONS {
            self.status = SessionStatus::Completed;
        }
        if !self.status.is_open() {
            self.ended_at.get_or_insert_with(Utc::now);
        }

        AnswerOutcome {
            score,
            feedback: evaluation.feedback,
            asked_at,
            adaptation,
            questions_remaining: self.questions_remaining(),
            session_status: self.status,
        }
    }

    /// Closes the session. A terminated session keeps its status.
    pub fn finish(&mut self) {
        if self.status != SessionStatus::Terminated {
            self.status = SessionStatus::Completed;
        }
        self.ended_at = Some(Utc::now());
    }
}

pub fn mean_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
