//! Core data model types for actprep.
//!
//! These are the fundamental types that the entire actprep system uses to
//! represent users, passages, questions, and graded attempts.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered test taker. Immutable once created; cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// When the user registered.
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            registered_at: Utc::now(),
        }
    }
}

/// Test subjects offered by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    English,
    Math,
    Reading,
    Science,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::English => write!(f, "English"),
            Subject::Math => write!(f, "Math"),
            Subject::Reading => write!(f, "Reading"),
            Subject::Science => write!(f, "Science"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Subject::English),
            "math" => Ok(Subject::Math),
            "reading" => Ok(Subject::Reading),
            "science" => Ok(Subject::Science),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// Passage difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// One of the four fixed answer choices.
///
/// A closed enum rather than a string key, so a question's correct answer
/// is always one of its own options by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All four keys in display order.
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::A => write!(f, "A"),
            OptionKey::B => write!(f, "B"),
            OptionKey::C => write!(f, "C"),
            OptionKey::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            other => Err(format!("unknown option key: {other}")),
        }
    }
}

/// The four option texts of a multiple-choice question, one per [`OptionKey`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOptions {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl QuestionOptions {
    pub fn new(a: &str, b: &str, c: &str, d: &str) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
            d: d.to_string(),
        }
    }

    /// The option text for a given key.
    pub fn text(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }
}

/// One multiple-choice item within a passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the content set.
    pub id: String,
    /// 1-based ordinal, unique within its passage.
    pub question_number: u32,
    /// The prompt text.
    pub text: String,
    /// The four answer choices.
    pub options: QuestionOptions,
    /// The designated correct choice.
    pub correct_answer: OptionKey,
    /// Shown after grading.
    pub explanation: String,
}

/// A reading unit: body text plus its ordered questions.
///
/// Question order is display and scoring order. Passages are immutable for
/// the duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Unique identifier within the content set.
    pub id: String,
    /// Display title.
    pub title: String,
    /// The passage body text.
    pub content: String,
    /// Subject this passage belongs to.
    pub subject: Subject,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Ordered questions.
    pub questions: Vec<Question>,
}

/// Submitted answers for one passage: question id → chosen key.
///
/// May be partial; unanswered questions are graded as incorrect.
pub type AnswerSheet = HashMap<String, OptionKey>;

/// The graded record of one passage submission.
///
/// Created exactly once per submission and never edited afterwards; owned
/// by the enclosing [`TestSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAttempt {
    /// Unique identifier for this attempt.
    pub id: Uuid,
    /// The user who submitted.
    pub user_id: String,
    /// The passage that was graded.
    pub passage_id: String,
    /// The submitted answer mapping.
    pub answers: AnswerSheet,
    /// Number of correct answers.
    pub score: u32,
    /// Question count of the passage at submission time.
    pub total_questions: u32,
    /// Seconds spent on this passage.
    pub time_spent_secs: u64,
    /// When the submission was graded.
    pub completed_at: DateTime<Utc>,
}

/// An active exam run: the ordered traversal of a passage set by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSession {
    /// Unique identifier for this session.
    pub id: Uuid,
    /// The owning user.
    pub user_id: String,
    /// Subject selected at start.
    pub subject: Subject,
    /// Zero-based cursor into the ordered passage set.
    pub current_passage_index: usize,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// False once finished.
    pub is_active: bool,
    /// Graded attempts in completion order. Append-only.
    pub attempts: Vec<TestAttempt>,
}

impl TestSession {
    /// The shape pushed to the external store (attempts travel separately).
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            user_id: self.user_id.clone(),
            subject: self.subject,
            current_passage_index: self.current_passage_index,
            started_at: self.started_at,
            is_active: self.is_active,
        }
    }
}

/// A session without its attempt list, for durable snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub user_id: String,
    pub subject: Subject,
    pub current_passage_index: usize,
    pub started_at: DateTime<Utc>,
    pub is_active: bool,
}
