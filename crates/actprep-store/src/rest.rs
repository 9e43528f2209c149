//! Supabase-style REST store.
//!
//! Inserts rows via `POST /rest/v1/{table}` and reads them back via the
//! table query surface. Row structs use the database's snake_case column
//! names; the three tables are `users`, `test_sessions`, and
//! `test_attempts`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use actprep_core::model::{OptionKey, SessionSnapshot, TestAttempt, User};
use actprep_core::traits::{SaveRecord, SaveSink};

use crate::config::StoreConfig;
use crate::error::StoreError;

const USERS_TABLE: &str = "users";
const SESSIONS_TABLE: &str = "test_sessions";
const ATTEMPTS_TABLE: &str = "test_attempts";

/// REST persistence backend.
pub struct RestStore {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            client,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .header("Prefer", "return=minimal")
            // The table API accepts a batch; a single insert is a 1-element batch.
            .json(&[row])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.check_status(response).await.map(|_| ())
    }

    async fn select(&self, table: &str, filter: Option<&str>) -> Result<String, StoreError> {
        let mut url = format!("{}?select=*", self.table_url(table));
        if let Some(filter) = filter {
            url.push('&');
            url.push_str(filter);
        }

        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.check_status(response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout_secs)
        } else {
            StoreError::Network(e.to_string())
        }
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match status {
            200..=299 => Ok(body),
            401 | 403 => Err(StoreError::Unauthorized(body)),
            _ => Err(StoreError::ApiError {
                status,
                message: body,
            }),
        }
    }

    /// All stored attempts for one user.
    pub async fn user_attempts(&self, user_id: &str) -> anyhow::Result<Vec<AttemptRow>> {
        let filter = format!("user_id=eq.{user_id}");
        let body = self.select(ATTEMPTS_TABLE, Some(&filter)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Every stored attempt, for analytics.
    pub async fn all_attempts(&self) -> anyhow::Result<Vec<AttemptRow>> {
        let body = self.select(ATTEMPTS_TABLE, None).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SaveSink for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    #[instrument(skip(self, record), fields(kind = record.kind()))]
    async fn save(&self, record: &SaveRecord) -> anyhow::Result<()> {
        match record {
            SaveRecord::User(user) => {
                self.insert(USERS_TABLE, &UserRow::from(user)).await?;
            }
            SaveRecord::Session(snapshot) => {
                self.insert(SESSIONS_TABLE, &SessionRow::from(snapshot))
                    .await?;
            }
            SaveRecord::Attempt(attempt) => {
                self.insert(ATTEMPTS_TABLE, &AttemptRow::from(attempt))
                    .await?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            registered_at: user.registered_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRow {
    id: Uuid,
    user_id: String,
    subject: String,
    current_passage_index: usize,
    started_at: DateTime<Utc>,
    is_active: bool,
}

impl From<&SessionSnapshot> for SessionRow {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            id: snapshot.id,
            user_id: snapshot.user_id.clone(),
            subject: snapshot.subject.to_string(),
            current_passage_index: snapshot.current_passage_index,
            started_at: snapshot.started_at,
            is_active: snapshot.is_active,
        }
    }
}

/// A stored attempt row, also returned by the select paths.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttemptRow {
    pub id: Uuid,
    pub user_id: String,
    pub passage_id: String,
    pub answers: HashMap<String, OptionKey>,
    pub score: u32,
    pub total_questions: u32,
    pub time_spent: u64,
    pub completed_at: DateTime<Utc>,
}

impl From<&TestAttempt> for AttemptRow {
    fn from(attempt: &TestAttempt) -> Self {
        Self {
            id: attempt.id,
            user_id: attempt.user_id.clone(),
            passage_id: attempt.passage_id.clone(),
            answers: attempt.answers.clone(),
            score: attempt.score,
            total_questions: attempt.total_questions,
            time_spent: attempt.time_spent_secs,
            completed_at: attempt.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_row_uses_database_column_names() {
        let attempt = TestAttempt {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            passage_id: "passage-1".into(),
            answers: HashMap::from([("q1".to_string(), OptionKey::A)]),
            score: 1,
            total_questions: 2,
            time_spent_secs: 75,
            completed_at: Utc::now(),
        };

        let json = serde_json::to_value(AttemptRow::from(&attempt)).unwrap();
        assert_eq!(json["time_spent"], 75);
        assert_eq!(json["answers"]["q1"], "A");
        assert!(json.get("time_spent_secs").is_none());
    }

    #[test]
    fn session_row_flattens_subject() {
        let snapshot = SessionSnapshot {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            subject: actprep_core::model::Subject::Science,
            current_passage_index: 1,
            started_at: Utc::now(),
            is_active: true,
        };
        let json = serde_json::to_value(SessionRow::from(&snapshot)).unwrap();
        assert_eq!(json["subject"], "Science");
        assert_eq!(json["current_passage_index"], 1);
    }
}
