//! Aggregate statistics across a session's graded attempts.

use serde::{Deserialize, Serialize};

use crate::model::TestAttempt;
use crate::scoring::percentage;

/// Totals derived from a session's attempt list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Sum of each attempt's question count.
    pub total_questions: u32,
    /// Sum of each attempt's score.
    pub total_correct: u32,
    /// Sum of each attempt's time spent, in seconds.
    pub total_time_secs: u64,
    /// Guarded overall percentage; `None` when no questions were graded.
    pub overall_percentage: Option<u32>,
}

/// Sum up a list of attempts.
///
/// An empty list yields all-zero totals and an absent percentage rather
/// than a division fault.
pub fn summarize(attempts: &[TestAttempt]) -> SessionSummary {
    let total_questions: u32 = attempts.iter().map(|a| a.total_questions).sum();
    let total_correct: u32 = attempts.iter().map(|a| a.score).sum();
    let total_time_secs: u64 = attempts.iter().map(|a| a.time_spent_secs).sum();

    SessionSummary {
        total_questions,
        total_correct,
        total_time_secs,
        overall_percentage: percentage(total_correct, total_questions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn attempt(score: u32, total: u32, time: u64) -> TestAttempt {
        TestAttempt {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            passage_id: "passage-1".into(),
            answers: Default::default(),
            score,
            total_questions: total,
            time_spent_secs: time,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn sums_across_attempts() {
        let attempts = vec![attempt(4, 5, 120), attempt(3, 3, 90)];
        let summary = summarize(&attempts);
        assert_eq!(summary.total_questions, 8);
        assert_eq!(summary.total_correct, 7);
        assert_eq!(summary.total_time_secs, 210);
        assert_eq!(summary.overall_percentage, Some(88));
    }

    #[test]
    fn empty_attempt_list_is_defined() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.total_correct, 0);
        assert_eq!(summary.total_time_secs, 0);
        assert_eq!(summary.overall_percentage, None);
    }

    #[test]
    fn serializes_absent_percentage_as_null() {
        let json = serde_json::to_value(summarize(&[])).unwrap();
        assert!(json["overall_percentage"].is_null());
    }
}
