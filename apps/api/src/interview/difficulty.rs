//! Difficulty Controller: maps the latest score onto the next tier and session status.
//!
//! Pure and total: every `(difficulty, fail_streak, score)` triple yields an `Adaptation`.

use serde::{Deserialize, Serialize};

pub const MAX_QUESTIONS: u32 = 10;
/// Consecutive failing answers that end the session.
pub const FAIL_THRESHOLD: u32 = 3;
/// Scores at or above this promote one tier.
pub const SCORE_THRESHOLD_UP: f64 = 70.0;
/// Scores below this count as a failure and demote one tier.
pub const SCORE_THRESHOLD_DOWN: f64 = 50.0;

/// Question tier, totally ordered `Easy < Medium < Hard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Seconds allowed before the overtime penalty applies.
    pub fn time_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Medium => 120,
            Difficulty::Hard => 180,
        }
    }

    pub fn harder(self) -> Option<Self> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    pub fn easier(self) -> Option<Self> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    #[default]
    Active,
    Cleared,
    Warning,
    Terminated,
    Completed,
}

impl SessionStatus {
    /// Open sessions still accept questions and answers.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            SessionStatus::Active | SessionStatus::Cleared | SessionStatus::Warning
        )
    }
}

/// Controller output for one answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adaptation {
    pub difficulty: Difficulty,
    pub status: SessionStatus,
    pub fail_streak: u32,
}

pub fn adapt(current: Difficulty, fail_streak: u32, latest_score: f64) -> Adaptation {
    let failed = latest_score < SCORE_THRESHOLD_DOWN;
    let fail_streak = if failed { fail_streak + 1 } else { 0 };

    if fail_streak >= FAIL_THRESHOLD {
        return Adaptation {
            difficulty: current,
            status: SessionStatus::Terminated,
            fail_streak,
        };
    }

    let (difficulty, status) = match (current.harder(), current.easier()) {
        (Some(next), _) if latest_score >= SCORE_THRESHOLD_UP => (next, SessionStatus::Cleared),
        (_, Some(prev)) if failed => (prev, SessionStatus::Warning),
        _ if failed => (current, SessionStatus::Warning),
        _ => (current, SessionStatus::Cleared),
    };

    Adaptation {
        difficulty,
        status,
        fail_streak,
    }
}
