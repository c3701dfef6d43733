//! Session Word Prioritizer
//!
//! Orders a study session so struggling material resurfaces before mastered
//! material. Words are classified into high / medium / low tiers, each tier is
//! shuffled on its own, and the tiers are interleaved by
//! [`WeightedInterleaver`].
//!
//! Tiers (first match wins):
//! - High: accuracy below `low_accuracy`, overdue and idle for more than
//!   `stale_after_days`, or `failed`
//! - Medium: `learning`, or overdue and reviewed within `stale_after_days`
//! - Low: everything else
//!
//! A word without `last_reviewed` never counts as overdue-and-stale or
//! overdue-and-recent.

use chrono::{DateTime, Utc};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{PriorityThresholds, SrsConfig};
use crate::interleave::WeightedInterleaver;
use crate::sampling::shuffle;
use crate::types::{Difficulty, Priority, Word};

/// Collections at least this large are classified in parallel
const PARALLEL_CLASSIFY_THRESHOLD: usize = 2048;

/// Count of words per tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

pub fn classify_with(thresholds: &PriorityThresholds, word: &Word, now: DateTime<Utc>) -> Priority {
    let overdue = word.is_due(now);
    let idle_days = word.days_since_review(now);

    let struggling = word
        .accuracy()
        .is_some_and(|accuracy| accuracy < thresholds.low_accuracy);
    let stale = overdue && idle_days.is_some_and(|days| days > thresholds.stale_after_days);
    if struggling || stale || word.difficulty == Difficulty::Failed {
        return Priority::High;
    }

    let recent = overdue && idle_days.is_some_and(|days| days <= thresholds.stale_after_days);
    if word.difficulty == Difficulty::Learning || recent {
        return Priority::Medium;
    }

    Priority::Low
}

/// Classify with the default thresholds
pub fn classify(word: &Word, now: DateTime<Utc>) -> Priority {
    classify_with(&PriorityThresholds::default(), word, now)
}

#[derive(Clone, Debug, Default)]
pub struct Prioritizer {
    thresholds: PriorityThresholds,
    interleaver: WeightedInterleaver,
}

impl Prioritizer {
    /// Unchecked: callers validate `config` first (see [`SrsConfig::validate`])
    pub fn new(config: &SrsConfig) -> Self {
        Self {
            thresholds: config.priority.clone(),
            interleaver: WeightedInterleaver::new(config.interleave.clone()),
        }
    }

    pub fn classify_all(&self, words: &[Word], now: DateTime<Utc>) -> Vec<Priority> {
        if words.len() >= PARALLEL_CLASSIFY_THRESHOLD {
            words
                .par_iter()
                .map(|word| classify_with(&self.thresholds, word, now))
                .collect()
        } else {
            words
                .iter()
                .map(|word| classify_with(&self.thresholds, word, now))
                .collect()
        }
    }

    pub fn breakdown(&self, words: &[Word], now: DateTime<Utc>) -> PriorityBreakdown {
        self.classify_all(words, now)
            .into_iter()
            .fold(PriorityBreakdown::default(), |mut acc, priority| {
                match priority {
                    Priority::High => acc.high += 1,
                    Priority::Medium => acc.medium += 1,
                    Priority::Low => acc.low += 1,
                }
                acc
            })
    }

    /// Study order for a session: a permutation of `words`
    pub fn prioritize<R: Rng + ?Sized>(&self, words: &[Word], now: DateTime<Utc>, rng: &mut R) -> Vec<Word> {
        if words.is_empty() {
            return Vec::new();
        }

        let mut high = Vec::new();
        let mut medium = Vec::new();
        let mut low = Vec::new();
        for (word, priority) in words.iter().zip(self.classify_all(words, now)) {
            match priority {
                Priority::High => high.push(word.clone()),
                Priority::Medium => medium.push(word.clone()),
                Priority::Low => low.push(word.clone()),
            }
        }

        debug!(
            high = high.len(),
            medium = medium.len(),
            low = low.len(),
            "prioritizing session words"
        );

        let high = shuffle(&high, rng);
        let medium = shuffle(&medium, rng);
        let low = shuffle(&low, rng);
        self.interleaver.interleave(high, medium, low, rng)
    }
}

/// Prioritize with the default configuration
pub fn prioritize<R: Rng + ?Sized>(words: &[Word], now: DateTime<Utc>, rng: &mut R) -> Vec<Word> {
    Prioritizer::default().prioritize(words, now, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::seeded_rng;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 18, 0, 0).unwrap()
    }

    fn fresh(id: &str) -> Word {
        Word::new(id, id, format!("{id} definition"), now())
    }

    fn reviewed(
        id: &str,
        difficulty: Difficulty,
        counts: (u32, u32),
        last_days_ago: f64,
        due_in_days: f64,
    ) -> Word {
        let mut word = fresh(id);
        word.difficulty = difficulty;
        word.review_count = counts.0;
        word.correct_count = counts.1;
        word.last_reviewed = Some(now() - Duration::milliseconds((last_days_ago * 86_400_000.0) as i64));
        word.next_review = now() + Duration::milliseconds((due_in_days * 86_400_000.0) as i64);
        word
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_new_word_is_low() {
        assert_eq!(classify(&fresh("a"), now()), Priority::Low);
    }

    #[test]
    fn test_low_accuracy_is_high() {
        let word = reviewed("a", Difficulty::Review, (10, 5), 1.0, 3.0);
        assert_eq!(classify(&word, now()), Priority::High);
    }

    #[test]
    fn test_accuracy_at_threshold_is_not_high() {
        let word = reviewed("a", Difficulty::Review, (10, 6), 1.0, 3.0);
        assert_eq!(classify(&word, now()), Priority::Low);
    }

    #[test]
    fn test_overdue_and_stale_is_high() {
        let word = reviewed("a", Difficulty::Mastered, (12, 12), 40.0, -10.0);
        assert_eq!(classify(&word, now()), Priority::High);
    }

    #[test]
    fn test_failed_is_high() {
        let word = reviewed("a", Difficulty::Failed, (0, 0), 0.1, 0.25);
        assert_eq!(classify(&word, now()), Priority::High);
    }

    #[test]
    fn test_learning_is_medium() {
        let word = reviewed("a", Difficulty::Learning, (2, 2), 0.5, 2.0);
        assert_eq!(classify(&word, now()), Priority::Medium);
    }

    #[test]
    fn test_overdue_recent_is_medium() {
        let word = reviewed("a", Difficulty::Review, (5, 5), 2.0, -0.5);
        assert_eq!(classify(&word, now()), Priority::Medium);
    }

    #[test]
    fn test_overdue_without_history_is_low() {
        let mut word = fresh("a");
        word.next_review = now() - Duration::days(3);
        assert_eq!(classify(&word, now()), Priority::Low);
    }

    #[test]
    fn test_mastered_not_due_is_low() {
        let word = reviewed("a", Difficulty::Mastered, (15, 14), 3.0, 27.0);
        assert_eq!(classify(&word, now()), Priority::Low);
    }

    #[test]
    fn test_breakdown_counts() {
        let words = vec![
            fresh("a"),
            reviewed("b", Difficulty::Failed, (4, 1), 1.0, 0.25),
            reviewed("c", Difficulty::Learning, (1, 1), 1.0, 2.0),
            reviewed("d", Difficulty::Learning, (2, 2), 1.0, 2.0),
        ];
        let breakdown = Prioritizer::default().breakdown(&words, now());

        assert_eq!(breakdown, PriorityBreakdown { high: 1, medium: 2, low: 1 });
        assert_eq!(breakdown.total(), 4);
    }

    #[test]
    fn test_parallel_classification_matches_sequential() {
        let words: Vec<Word> = (0..PARALLEL_CLASSIFY_THRESHOLD + 10)
            .map(|i| {
                let reviews = (i % 7) as u32;
                let correct = (i % 4) as u32 % (reviews + 1);
                reviewed(
                    &format!("w{i}"),
                    Difficulty::ALL[i % 5],
                    (reviews, correct),
                    (i % 5) as f64,
                    (i % 9) as f64 - 4.0,
                )
            })
            .collect();
        let prioritizer = Prioritizer::default();

        let parallel = prioritizer.classify_all(&words, now());
        let sequential: Vec<Priority> = words.iter().map(|w| classify(w, now())).collect();
        assert_eq!(parallel, sequential);
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_prioritize_empty() {
        let mut rng = seeded_rng(42);
        assert!(prioritize(&[], now(), &mut rng).is_empty());
    }

    #[test]
    fn test_prioritize_single() {
        let mut rng = seeded_rng(42);
        let words = vec![fresh("only")];
        assert_eq!(prioritize(&words, now(), &mut rng), words);
    }

    #[test]
    fn test_prioritize_is_permutation() {
        let mut rng = seeded_rng(42);
        let mut words: Vec<Word> = (0..10).map(|i| fresh(&format!("n{i}"))).collect();
        words.push(reviewed("f", Difficulty::Failed, (5, 1), 1.0, 0.25));
        words.push(reviewed("l", Difficulty::Learning, (1, 1), 1.0, 3.0));

        let ordered = prioritize(&words, now(), &mut rng);
        let mut got: Vec<&str> = ordered.iter().map(|w| w.id.as_str()).collect();
        let mut want: Vec<&str> = words.iter().map(|w| w.id.as_str()).collect();
        got.sort_unstable();
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn test_high_priority_word_leads_large_session() {
        let mut words: Vec<Word> = (0..8).map(|i| fresh(&format!("n{i}"))).collect();
        words.push(reviewed("f", Difficulty::Failed, (5, 1), 1.0, 0.25));

        for seed in 0..20 {
            let mut rng = seeded_rng(seed);
            let ordered = prioritize(&words, now(), &mut rng);
            assert_eq!(ordered[0].id, "f");
        }
    }

    #[test]
    fn test_new_words_are_reshuffled_across_runs() {
        let words: Vec<Word> = (0..12).map(|i| fresh(&format!("n{i}"))).collect();
        let mut rng = seeded_rng(42);

        let first = prioritize(&words, now(), &mut rng);
        let second = prioritize(&words, now(), &mut rng);
        assert_ne!(first, second);
    }
}
