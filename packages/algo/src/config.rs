//! Scheduling configuration
//!
//! Every tunable constant of the engine lives here, grouped by component.
//! `Default` reproduces the canonical values; JSON documents may override
//! any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::Difficulty;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "SRS_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    Validation(String),
}

// ==================== Difficulty Rules ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DifficultyRules {
    /// Post-answer correct tally needed for learning -> review
    pub learning_to_review: u32,
    /// Post-answer correct tally needed for review -> mastered
    pub review_to_mastered: u32,
    /// Minimum pre-answer review count before a miss can demote to failed
    pub failed_min_reviews: u32,
    /// Accuracy strictly below this demotes to failed
    pub failed_accuracy: f64,
}

impl Default for DifficultyRules {
    fn default() -> Self {
        Self {
            learning_to_review: 3,
            review_to_mastered: 10,
            failed_min_reviews: 3,
            failed_accuracy: 0.3,
        }
    }
}

// ==================== Interval Table ====================

/// Review offsets for one difficulty, in days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalPair {
    pub correct_days: f64,
    pub incorrect_days: f64,
}

impl IntervalPair {
    pub const fn new(correct_days: f64, incorrect_days: f64) -> Self {
        Self {
            correct_days,
            incorrect_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalTable {
    pub new: IntervalPair,
    pub learning: IntervalPair,
    pub review: IntervalPair,
    pub mastered: IntervalPair,
    pub failed: IntervalPair,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            new: IntervalPair::new(1.0, 0.5),
            learning: IntervalPair::new(3.0, 1.0),
            review: IntervalPair::new(7.0, 2.0),
            mastered: IntervalPair::new(30.0, 7.0),
            failed: IntervalPair::new(1.0, 0.25),
        }
    }
}

impl IntervalTable {
    pub fn get(&self, difficulty: Difficulty) -> IntervalPair {
        match difficulty {
            Difficulty::New => self.new,
            Difficulty::Learning => self.learning,
            Difficulty::Review => self.review,
            Difficulty::Mastered => self.mastered,
            Difficulty::Failed => self.failed,
        }
    }
}

// ==================== Priority Thresholds ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriorityThresholds {
    /// Historical accuracy strictly below this marks a word high priority
    pub low_accuracy: f64,
    /// Overdue words idle for more than this many days are high priority
    pub stale_after_days: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            low_accuracy: 0.6,
            stale_after_days: 2.0,
        }
    }
}

// ==================== Interleaving ====================

/// Draw policy for one priority bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BucketWeight {
    /// Probability of drawing from this bucket when it is considered
    pub draw_probability: f64,
    /// Fraction of the session (i / T) after which random draws stop; None means no limit
    pub position_window: Option<f64>,
    /// Always place this bucket's first element when it is considered
    pub lead: bool,
}

impl Default for BucketWeight {
    fn default() -> Self {
        Self {
            draw_probability: 1.0,
            position_window: None,
            lead: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterleaveConfig {
    /// Sessions at or below this size get a flat shuffle
    pub small_session_threshold: usize,
    pub high: BucketWeight,
    pub medium: BucketWeight,
    pub low: BucketWeight,
}

impl Default for InterleaveConfig {
    fn default() -> Self {
        Self {
            small_session_threshold: 5,
            high: BucketWeight {
                draw_probability: 0.4,
                position_window: Some(0.7),
                lead: true,
            },
            medium: BucketWeight {
                draw_probability: 0.5,
                position_window: None,
                lead: false,
            },
            low: BucketWeight::default(),
        }
    }
}

// ==================== Quiz ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizConfig {
    /// Choices per question, correct answer included
    pub choice_count: usize,
    /// Only the first N eligible words feed distractor sampling
    pub distractor_pool_cap: usize,
    /// Smallest eligible pool for which quizzes are offered
    pub min_pool_size: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            choice_count: 4,
            distractor_pool_cap: 500,
            min_pool_size: 4,
        }
    }
}

// ==================== Root Config ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SrsConfig {
    pub difficulty: DifficultyRules,
    pub intervals: IntervalTable,
    pub priority: PriorityThresholds,
    pub interleave: InterleaveConfig,
    pub quiz: QuizConfig,
}

impl SrsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SrsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&raw)?;
        debug!(path = %path.display(), "loaded srs config");
        Ok(config)
    }

    /// Load from `SRS_CONFIG_PATH` when set, otherwise use defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.difficulty;
        check_probability("difficulty.failedAccuracy", rules.failed_accuracy)?;

        for difficulty in Difficulty::ALL {
            let pair = self.intervals.get(difficulty);
            if !(pair.correct_days.is_finite() && pair.correct_days > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "intervals.{difficulty}.correctDays must be positive"
                )));
            }
            if !(pair.incorrect_days.is_finite() && pair.incorrect_days > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "intervals.{difficulty}.incorrectDays must be positive"
                )));
            }
        }

        check_probability("priority.lowAccuracy", self.priority.low_accuracy)?;
        if !(self.priority.stale_after_days.is_finite() && self.priority.stale_after_days >= 0.0) {
            return Err(ConfigError::Validation(
                "priority.staleAfterDays must be non-negative".to_string(),
            ));
        }

        for (name, bucket) in [
            ("high", &self.interleave.high),
            ("medium", &self.interleave.medium),
            ("low", &self.interleave.low),
        ] {
            check_probability(&format!("interleave.{name}.drawProbability"), bucket.draw_probability)?;
            if let Some(window) = bucket.position_window {
                if !(window > 0.0 && window <= 1.0) {
                    return Err(ConfigError::Validation(format!(
                        "interleave.{name}.positionWindow must be in (0, 1]"
                    )));
                }
            }
        }

        if self.quiz.choice_count < 2 {
            return Err(ConfigError::Validation(
                "quiz.choiceCount must be at least 2".to_string(),
            ));
        }
        if self.quiz.distractor_pool_cap == 0 {
            return Err(ConfigError::Validation(
                "quiz.distractorPoolCap must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{name} must be in [0, 1], got {value}")))
    }
}
