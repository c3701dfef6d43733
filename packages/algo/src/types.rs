//! Common Types and Constants
//!
//! Shared data structures used across the scheduling, ordering and quiz modules.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Milliseconds in one day
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Offset between word creation and its first scheduled review (days)
pub const INITIAL_REVIEW_DAYS: f64 = 1.0;

/// Convert a fractional day count into a chrono duration (millisecond precision)
pub fn days_to_duration(days: f64) -> Duration {
    Duration::milliseconds((days * MS_PER_DAY).round() as i64)
}

// ==================== Difficulty ====================

/// Mastery state attached to a flashcard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Never left the initial state
    #[default]
    New,
    Learning,
    Review,
    Mastered,
    /// Demoted after sustained low accuracy
    Failed,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::New,
        Difficulty::Learning,
        Difficulty::Review,
        Difficulty::Mastered,
        Difficulty::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::New => "new",
            Difficulty::Learning => "learning",
            Difficulty::Review => "review",
            Difficulty::Mastered => "mastered",
            Difficulty::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Priority ====================

/// Session ordering tier, independent of [`Difficulty`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

// ==================== Word ====================

/// Flashcard record read and produced by the scheduling core
///
/// Preconditions (enforced by the storage layer, not checked here):
/// counters are non-negative and `correct_count <= review_count`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Opaque identifier owned by the external store
    pub id: String,
    /// Headword shown as the quiz prompt
    #[serde(default)]
    pub term: String,
    /// Definition text, sampled as quiz choices
    #[serde(default)]
    pub definition: String,
    /// Mastery state
    pub difficulty: Difficulty,
    /// Total answers ever recorded
    pub review_count: u32,
    /// Total correct answers
    pub correct_count: u32,
    /// Time of the most recent answer (None before the first answer)
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Time the word becomes due again
    pub next_review: DateTime<Utc>,
}

impl Word {
    /// Create a fresh word in the `new` state, first due one day after creation
    pub fn new(
        id: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            definition: definition.into(),
            difficulty: Difficulty::New,
            review_count: 0,
            correct_count: 0,
            last_reviewed: None,
            next_review: created_at + days_to_duration(INITIAL_REVIEW_DAYS),
        }
    }

    /// Historical accuracy, None when the word has never been answered
    pub fn accuracy(&self) -> Option<f64> {
        if self.review_count == 0 {
            None
        } else {
            Some(self.correct_count as f64 / self.review_count as f64)
        }
    }

    /// Whether `next_review` has passed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review < now
    }

    /// Fractional days since the last answer
    pub fn days_since_review(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_reviewed
            .map(|at| (now - at).num_milliseconds() as f64 / MS_PER_DAY)
    }

    /// Whether the definition can be used as a quiz answer
    pub fn has_definition(&self) -> bool {
        !self.definition.trim().is_empty()
    }
}
