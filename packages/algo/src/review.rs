//! Answer application
//!
//! Combines the difficulty state machine and the interval scheduler into the
//! single operation callers need: take a word snapshot and an answer, return
//! the next snapshot. Both components read the pre-answer difficulty.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, SrsConfig};
use crate::difficulty::next_difficulty_with;
use crate::interval::next_review_at;
use crate::types::{Difficulty, Word};

/// Result of recording one answer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    /// Updated snapshot to persist
    pub word: Word,
    /// Difficulty before the answer
    pub previous_difficulty: Difficulty,
    pub is_correct: bool,
}

impl AnswerOutcome {
    pub fn transitioned(&self) -> bool {
        self.previous_difficulty != self.word.difficulty
    }
}

/// Config-driven answer recorder
#[derive(Clone, Debug, Default)]
pub struct Reviewer {
    config: SrsConfig,
}

impl Reviewer {
    /// Validates the config so every offset stays positive
    pub fn new(config: SrsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SrsConfig {
        &self.config
    }

    /// Build the next snapshot of `word` after an answer at `now`
    pub fn record_answer(&self, word: &Word, is_correct: bool, now: DateTime<Utc>) -> AnswerOutcome {
        let previous = word.difficulty;
        let correct_count = word.correct_count.saturating_add(u32::from(is_correct));
        let difficulty = next_difficulty_with(&self.config.difficulty, word, is_correct, correct_count);
        let next_review = next_review_at(&self.config.intervals, previous, is_correct, now);

        if previous != difficulty {
            debug!(
                word_id = %word.id,
                from = %previous,
                to = %difficulty,
                is_correct,
                "difficulty transition"
            );
        }

        AnswerOutcome {
            word: Word {
                difficulty,
                review_count: word.review_count.saturating_add(1),
                correct_count,
                last_reviewed: Some(now),
                next_review,
                ..word.clone()
            },
            previous_difficulty: previous,
            is_correct,
        }
    }

    /// Apply independent answers in parallel, preserving input order
    pub fn record_answers_batch(
        &self,
        answers: &[(Word, bool)],
        now: DateTime<Utc>,
    ) -> Vec<AnswerOutcome> {
        answers
            .par_iter()
            .map(|(word, is_correct)| self.record_answer(word, *is_correct, now))
            .collect()
    }
}

/// Record an answer with the default configuration
pub fn record_answer(word: &Word, is_correct: bool, now: DateTime<Utc>) -> Word {
    Reviewer::default().record_answer(word, is_correct, now).word
}

/// Batch variant of [`record_answer`]
pub fn record_answers_batch(answers: &[(Word, bool)], now: DateTime<Utc>) -> Vec<Word> {
    Reviewer::default()
        .record_answers_batch(answers, now)
        .into_iter()
        .map(|outcome| outcome.word)
        .collect()
}
