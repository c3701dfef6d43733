//! Session Stats Tracker
//!
//! Ephemeral per-session counters. Owned by the session that created them;
//! the final [`SessionSummary`] is what profile and achievement collaborators
//! consume.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub correct: u32,
    pub total: u32,
    /// correct / total, 0 for an empty session
    pub accuracy: f64,
    pub elapsed_seconds: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    correct: u32,
    total: u32,
    started_at: DateTime<Utc>,
}

impl SessionStats {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            correct: 0,
            total: 0,
            started_at: now,
        }
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::start(now);
    }

    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Time since the session started; never negative
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    pub fn finish(&self, now: DateTime<Utc>) -> SessionSummary {
        let summary = SessionSummary {
            correct: self.correct,
            total: self.total,
            accuracy: self.accuracy(),
            elapsed_seconds: self.elapsed(now).num_seconds(),
            started_at: self.started_at,
            finished_at: now,
        };
        debug!(
            correct = summary.correct,
            total = summary.total,
            elapsed_seconds = summary.elapsed_seconds,
            "session finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let stats = SessionStats::start(t0());
        assert_eq!(stats.correct(), 0);
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.accuracy(), 0.0);
    }

    #[test]
    fn test_record_counts() {
        let mut stats = SessionStats::start(t0());
        for correct in [true, false, true, true] {
            stats.record(correct);
        }

        assert_eq!(stats.correct(), 3);
        assert_eq!(stats.total(), 4);
        assert!((stats.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_reset_clears_counters() {
        let mut stats = SessionStats::start(t0());
        stats.record(true);
        stats.reset(t0() + Duration::minutes(5));

        assert_eq!(stats.total(), 0);
        assert_eq!(stats.started_at(), t0() + Duration::minutes(5));
    }

    #[test]
    fn test_finish_snapshot() {
        let mut stats = SessionStats::start(t0());
        stats.record(true);
        stats.record(false);

        let summary = stats.finish(t0() + Duration::seconds(95));
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.accuracy, 0.5);
        assert_eq!(summary.elapsed_seconds, 95);
        assert_eq!(summary.finished_at, t0() + Duration::seconds(95));
    }

    #[test]
    fn test_elapsed_clamped_for_clock_skew() {
        let stats = SessionStats::start(t0());
        assert_eq!(stats.elapsed(t0() - Duration::seconds(10)), Duration::zero());
    }
}
