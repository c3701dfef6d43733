//! Quiz Question Builder
//!
//! Picks base words at random and gives each one a shuffled multiple-choice
//! set: the correct definition plus distractors sampled from other words.
//! Distractors only come from the first `distractor_pool_cap` eligible words.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::QuizConfig;
use crate::sampling::{sample_without_replacement, shuffle};
use crate::types::Word;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz needs at least {required} words with definitions, found {available}")]
    InsufficientPool { available: usize, required: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub word_id: String,
    pub term: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
}

impl QuizQuestion {
    /// None when `correct_index` is out of range (e.g. a malformed stored question)
    pub fn correct_answer(&self) -> Option<&str> {
        self.choices.get(self.correct_index).map(String::as_str)
    }

    pub fn is_correct(&self, choice_index: usize) -> bool {
        choice_index == self.correct_index
    }
}

/// Words whose definitions can serve as answers
pub fn eligible_pool(words: &[Word]) -> Vec<&Word> {
    words.iter().filter(|word| word.has_definition()).collect()
}

/// Gate used by callers before offering a quiz
pub fn check_pool(pool: &[&Word], config: &QuizConfig) -> Result<(), QuizError> {
    if pool.len() < config.min_pool_size {
        return Err(QuizError::InsufficientPool {
            available: pool.len(),
            required: config.min_pool_size,
        });
    }
    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct QuizBuilder {
    config: QuizConfig,
}

impl QuizBuilder {
    /// Unchecked: `config` is expected to come from a validated [`crate::SrsConfig`]
    pub fn new(config: QuizConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Build up to `count` questions from `words`
    pub fn build<R: Rng + ?Sized>(&self, words: &[Word], count: usize, rng: &mut R) -> Vec<QuizQuestion> {
        let pool = eligible_pool(words);
        if pool.len() < self.config.min_pool_size {
            warn!(
                eligible = pool.len(),
                required = self.config.min_pool_size,
                "quiz pool below minimum size"
            );
        }

        let selected = sample_without_replacement(&pool, count, rng);
        let candidates = &pool[..pool.len().min(self.config.distractor_pool_cap)];

        let questions: Vec<QuizQuestion> = selected
            .into_iter()
            .map(|word| self.build_question(word, candidates, rng))
            .collect();

        debug!(
            requested = count,
            built = questions.len(),
            pool = pool.len(),
            "built quiz questions"
        );
        questions
    }

    fn build_question<R: Rng + ?Sized>(
        &self,
        word: &Word,
        candidates: &[&Word],
        rng: &mut R,
    ) -> QuizQuestion {
        let mut seen = HashSet::new();
        let distractor_pool: Vec<&str> = candidates
            .iter()
            .filter(|other| other.id != word.id && other.definition != word.definition)
            .map(|other| other.definition.as_str())
            .filter(|definition| seen.insert(*definition))
            .collect();

        let distractors =
            sample_without_replacement(&distractor_pool, self.config.choice_count.saturating_sub(1), rng);

        let mut choices = Vec::with_capacity(distractors.len() + 1);
        choices.push(word.definition.as_str());
        choices.extend(distractors);
        let choices: Vec<String> = shuffle(&choices, rng).into_iter().map(str::to_owned).collect();

        let correct_index = choices
            .iter()
            .position(|choice| *choice == word.definition)
            .unwrap_or(0);

        QuizQuestion {
            word_id: word.id.clone(),
            term: word.term.clone(),
            choices,
            correct_index,
        }
    }
}

/// Build questions with the default configuration
pub fn build_quiz<R: Rng + ?Sized>(words: &[Word], count: usize, rng: &mut R) -> Vec<QuizQuestion> {
    QuizBuilder::default().build(words, count, rng)
}
