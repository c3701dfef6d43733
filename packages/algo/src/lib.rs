//! # vocab-srs - spaced-repetition core for vocabulary flashcards
//!
//! Pure scheduling logic shared by every client surface:
//!
//! - **Difficulty State Machine** - how a card's mastery state evolves per answer
//! - **Interval Scheduler** - when a card is due again
//! - **Session Prioritizer** - study order that resurfaces struggling words
//! - **Random Utilities** - Fisher-Yates shuffle and sampling without replacement
//! - **Session Stats** - per-session correct/total counters
//! - **Quiz Builder** - multiple-choice questions with sampled distractors
//!
//! Nothing here performs I/O except optional config loading. Randomized
//! operations take the generator from the caller; time-dependent ones take
//! `now`.
//!
//! ## Modules
//!
//! - [`types`] - `Word`, `Difficulty`, `Priority`
//! - [`config`] - tunable thresholds, interval table and weights
//! - [`difficulty`] - state machine
//! - [`interval`] - interval table lookup
//! - [`review`] - answer application
//! - [`sampling`] - shuffle and sampling
//! - [`interleave`] - weighted bucket interleaving
//! - [`prioritizer`] - session ordering
//! - [`session`] - session counters
//! - [`quiz`] - quiz questions
//! - [`engine`] - configured facade
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use vocab_srs::{prioritize, record_answer, sampling::seeded_rng, Difficulty, Word};
//!
//! let now = Utc::now();
//! let word = Word::new("w1", "apple", "a round fruit", now);
//! let updated = record_answer(&word, true, now);
//! assert_eq!(updated.difficulty, Difficulty::Learning);
//!
//! let mut rng = seeded_rng(42);
//! let order = prioritize(&[updated], now, &mut rng);
//! assert_eq!(order.len(), 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod difficulty;
pub mod engine;
pub mod interleave;
pub mod interval;
pub mod prioritizer;
pub mod quiz;
pub mod review;
pub mod sampling;
pub mod session;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use config::{
    BucketWeight, ConfigError, DifficultyRules, InterleaveConfig, IntervalPair, IntervalTable,
    PriorityThresholds, QuizConfig, SrsConfig,
};

pub use difficulty::{answer_accuracy, next_difficulty, next_difficulty_with};

pub use interval::{next_review_at, next_review_offset, next_review_offset_with};

pub use review::{record_answer, record_answers_batch, AnswerOutcome, Reviewer};

pub use sampling::{sample_without_replacement, shuffle};

pub use interleave::WeightedInterleaver;

pub use prioritizer::{classify, prioritize, Prioritizer, PriorityBreakdown};

pub use session::{SessionStats, SessionSummary};

pub use quiz::{build_quiz, QuizBuilder, QuizError, QuizQuestion};

pub use engine::SrsEngine;
