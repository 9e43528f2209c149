//! Answer-key scoring.
//!
//! Pure functions: compare a submitted answer sheet against a passage's
//! answer key. The rounding rule here is the single one used everywhere a
//! percentage is derived, per-passage and aggregate alike.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerSheet, Passage};

/// The result of grading one passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageScore {
    /// Count of correct answers.
    pub score: u32,
    /// Question count of the passage, not of the answers supplied.
    pub total: u32,
}

/// Grade an answer sheet against a passage's answer key.
///
/// Each question scores one point iff the sheet maps its id to the correct
/// key. Missing entries count as incorrect; extra entries are ignored.
pub fn score_passage(passage: &Passage, answers: &AnswerSheet) -> PassageScore {
    let score = passage
        .questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count() as u32;

    PassageScore {
        score,
        total: passage.questions.len() as u32,
    }
}

/// Percentage as `round(100 * correct / total)`, half-up.
///
/// Returns `None` when `total` is zero, so a no-data result is
/// distinguishable from an all-wrong run and never a division fault.
pub fn percentage(correct: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((100.0 * correct as f64 / total as f64).round() as u32)
}
