//! Difficulty State Machine
//!
//! Maps (current state, answer correctness, post-answer correct tally) to the
//! next mastery state.
//!
//! Correct answers:
//! - failed / new -> learning
//! - learning -> review once the correct tally reaches `learning_to_review`
//! - review -> mastered once the correct tally reaches `review_to_mastered`
//!
//! Incorrect answers:
//! - any state -> failed when review history is long enough and accuracy is poor
//! - mastered -> review, review -> learning
//!
//! Everything else keeps its state. The function is total and pure.

use crate::config::DifficultyRules;
use crate::types::{Difficulty, Word};

/// Accuracy including the answer being recorded
///
/// The denominator is the post-answer total (`review_count + 1`). A word with
/// no history scores 1 on a correct answer and 0 otherwise.
pub fn answer_accuracy(word: &Word, is_correct: bool, new_correct_count: u32) -> f64 {
    if word.review_count > 0 {
        new_correct_count as f64 / (word.review_count as f64 + 1.0)
    } else if is_correct {
        1.0
    } else {
        0.0
    }
}

/// Next difficulty using the default thresholds
pub fn next_difficulty(word: &Word, is_correct: bool, new_correct_count: u32) -> Difficulty {
    next_difficulty_with(&DifficultyRules::default(), word, is_correct, new_correct_count)
}

pub fn next_difficulty_with(
    rules: &DifficultyRules,
    word: &Word,
    is_correct: bool,
    new_correct_count: u32,
) -> Difficulty {
    if is_correct {
        return match word.difficulty {
            Difficulty::Failed | Difficulty::New => Difficulty::Learning,
            Difficulty::Learning if new_correct_count >= rules.learning_to_review => {
                Difficulty::Review
            }
            Difficulty::Review if new_correct_count >= rules.review_to_mastered => {
                Difficulty::Mastered
            }
            current => current,
        };
    }

    let accuracy = answer_accuracy(word, is_correct, new_correct_count);
    if word.review_count >= rules.failed_min_reviews && accuracy < rules.failed_accuracy {
        return Difficulty::Failed;
    }

    match word.difficulty {
        Difficulty::Mastered => Difficulty::Review,
        Difficulty::Review => Difficulty::Learning,
        current => current,
    }
}
