//! Seams to the external collaborators.
//!
//! The save-sink is implemented by the `actprep-store` crate; content
//! sources by `actprep-content`. The session core only depends on these
//! traits, never on concrete backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Passage, SessionSnapshot, Subject, TestAttempt, User};

/// A record pushed to the external store.
///
/// Session snapshots travel without their attempts; attempts are pushed
/// individually as they are graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SaveRecord {
    User(User),
    Session(SessionSnapshot),
    Attempt(TestAttempt),
}

impl SaveRecord {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SaveRecord::User(_) => "user",
            SaveRecord::Session(_) => "session",
            SaveRecord::Attempt(_) => "attempt",
        }
    }
}

/// Trait for external persistence backends.
///
/// Saves are best-effort: a failure is reported to the caller for logging
/// but must never roll back or invalidate in-memory session state.
#[async_trait]
pub trait SaveSink: Send + Sync {
    /// Human-readable backend name (e.g. "rest").
    fn name(&self) -> &str;

    /// Push one record to durable storage.
    async fn save(&self, record: &SaveRecord) -> anyhow::Result<()>;
}

/// Trait for producers of validated passage data.
///
/// Implementations hand the session core ready-to-use passages; the core
/// never fetches or parses content itself.
pub trait ContentSource: Send + Sync {
    /// The ordered passage set for a subject.
    fn passages_for(&self, subject: Subject) -> Vec<Passage>;
}
