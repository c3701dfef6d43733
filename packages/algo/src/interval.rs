//! Interval Scheduler
//!
//! Computes how long until a word is due again. The lookup uses the
//! difficulty the word had *before* the answer, never the state machine's
//! output.

use chrono::{DateTime, Duration, Utc};

use crate::config::IntervalTable;
use crate::types::{days_to_duration, Difficulty};

/// Offset in days for the given pre-answer difficulty
pub fn offset_days(table: &IntervalTable, difficulty: Difficulty, is_correct: bool) -> f64 {
    let pair = table.get(difficulty);
    if is_correct {
        pair.correct_days
    } else {
        pair.incorrect_days
    }
}

/// Offset using the canonical table
pub fn next_review_offset(difficulty: Difficulty, is_correct: bool) -> Duration {
    next_review_offset_with(&IntervalTable::default(), difficulty, is_correct)
}

pub fn next_review_offset_with(
    table: &IntervalTable,
    difficulty: Difficulty,
    is_correct: bool,
) -> Duration {
    days_to_duration(offset_days(table, difficulty, is_correct))
}

/// Absolute due time for an answer recorded at `answered_at`
pub fn next_review_at(
    table: &IntervalTable,
    difficulty: Difficulty,
    is_correct: bool,
    answered_at: DateTime<Utc>,
) -> DateTime<Utc> {
    answered_at + next_review_offset_with(table, difficulty, is_correct)
}
