//! Engine facade
//!
//! One configured entry point for client surfaces, so every caller applies
//! the same rules and interval table.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::{ConfigError, SrsConfig};
use crate::prioritizer::{PriorityBreakdown, Prioritizer};
use crate::quiz::{check_pool, eligible_pool, QuizBuilder, QuizError, QuizQuestion};
use crate::review::{AnswerOutcome, Reviewer};
use crate::session::SessionStats;
use crate::types::Word;

#[derive(Clone, Debug, Default)]
pub struct SrsEngine {
    reviewer: Reviewer,
    prioritizer: Prioritizer,
    quiz: QuizBuilder,
}

impl SrsEngine {
    pub fn new(config: SrsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            prioritizer: Prioritizer::new(&config),
            quiz: QuizBuilder::new(config.quiz.clone()),
            reviewer: Reviewer::new(config)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(SrsConfig::from_env()?)
    }

    pub fn config(&self) -> &SrsConfig {
        self.reviewer.config()
    }

    /// Apply an answer and count it toward the running session
    pub fn answer(
        &self,
        stats: &mut SessionStats,
        word: &Word,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> AnswerOutcome {
        stats.record(is_correct);
        self.reviewer.record_answer(word, is_correct, now)
    }

    pub fn record_answer(&self, word: &Word, is_correct: bool, now: DateTime<Utc>) -> AnswerOutcome {
        self.reviewer.record_answer(word, is_correct, now)
    }

    pub fn record_answers_batch(&self, answers: &[(Word, bool)], now: DateTime<Utc>) -> Vec<AnswerOutcome> {
        self.reviewer.record_answers_batch(answers, now)
    }

    pub fn session_order<R: Rng + ?Sized>(&self, words: &[Word], now: DateTime<Utc>, rng: &mut R) -> Vec<Word> {
        self.prioritizer.prioritize(words, now, rng)
    }

    pub fn session_preview(&self, words: &[Word], now: DateTime<Utc>) -> PriorityBreakdown {
        self.prioritizer.breakdown(words, now)
    }

    /// Checked quiz build: errors when too few words have definitions
    pub fn quiz<R: Rng + ?Sized>(
        &self,
        words: &[Word],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        check_pool(&eligible_pool(words), self.quiz.config())?;
        Ok(self.quiz.build(words, count, rng))
    }
}
