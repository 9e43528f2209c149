//! The test-session state machine.
//!
//! [`SessionEngine`] is an explicit, caller-owned context: the signed-in
//! user, the active passage set, the current session (if any), the shared
//! time counter, and an observer registry. Every successful mutation
//! notifies observers exactly once, after the mutation is applied and
//! before the call returns.
//!
//! A session moves `NoSession → Active → Finished`; starting again from
//! any state replaces the prior session in this component (durable copies
//! live in the external store). Grading a passage and moving the cursor
//! are deliberately separate operations: the caller inspects
//! [`SessionEngine::has_next_passage`] and decides whether to advance or
//! finish.

use chrono::Utc;
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{AnswerSheet, Passage, Subject, TestAttempt, TestSession, User};
use crate::notify::{Notifier, SubscriptionId};
use crate::scoring::score_passage;
use crate::statistics::{summarize, SessionSummary};
use crate::timer::SessionTimer;

/// The session state machine and its collaborators.
#[derive(Debug, Default)]
pub struct SessionEngine {
    user: Option<User>,
    passages: Vec<Passage>,
    session: Option<TestSession>,
    timer: SessionTimer,
    /// Counter value when the current passage came under the cursor.
    passage_start_tick: u64,
    notifier: Notifier,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // User
    // -----------------------------------------------------------------

    /// Sign a user in.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.notifier.notify();
    }

    /// Sign out. Any session is discarded along with the user.
    pub fn clear_user(&mut self) {
        self.user = None;
        self.session = None;
        self.notifier.notify();
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // -----------------------------------------------------------------
    // Passage set
    // -----------------------------------------------------------------

    /// Install the active passage set from a content source.
    pub fn set_passages(&mut self, passages: Vec<Passage>) {
        self.passages = passages;
        self.notifier.notify();
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    // -----------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------

    /// Start a fresh session for a subject, replacing any prior one.
    ///
    /// Requires a signed-in user and a non-empty passage set. Resets the
    /// shared time counter to zero.
    pub fn start_session(&mut self, subject: Subject) -> Result<TestSession, SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::NoUser)?;
        if self.passages.is_empty() {
            return Err(SessionError::EmptyPassageSet);
        }

        let session = TestSession {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            subject,
            current_passage_index: 0,
            started_at: Utc::now(),
            is_active: true,
            attempts: Vec::new(),
        };
        tracing::debug!(session_id = %session.id, %subject, "session started");

        self.session = Some(session.clone());
        self.timer.reset();
        self.passage_start_tick = 0;
        self.notifier.notify();
        Ok(session)
    }

    /// The session currently tracked, active or finished.
    pub fn session(&self) -> Option<&TestSession> {
        self.session.as_ref()
    }

    /// The passage under the cursor, or `None` when no session exists or
    /// the cursor is out of range (defensive; should not occur in normal
    /// flow).
    pub fn current_passage(&self) -> Option<&Passage> {
        let session = self.session.as_ref()?;
        self.passages.get(session.current_passage_index)
    }

    /// Whether a passage remains after the cursor. Callers use this to
    /// choose between [`advance`](Self::advance) and
    /// [`finish`](Self::finish).
    pub fn has_next_passage(&self) -> bool {
        match &self.session {
            Some(session) => session.current_passage_index + 1 < self.passages.len(),
            None => false,
        }
    }

    /// Grade a passage and append the attempt to the session.
    ///
    /// Does not move the cursor; grading and advancement are separate
    /// decisions. The attempt list is append-only: prior entries are never
    /// edited or removed, and a failed submission leaves it untouched.
    pub fn submit_answers(
        &mut self,
        passage_id: &str,
        answers: AnswerSheet,
        time_spent_secs: u64,
    ) -> Result<TestAttempt, SessionError> {
        let session = self
            .session
            .as_mut()
            .filter(|s| s.is_active)
            .ok_or(SessionError::NoActiveSession)?;

        let passage = self
            .passages
            .iter()
            .find(|p| p.id == passage_id)
            .ok_or_else(|| SessionError::PassageNotFound(passage_id.to_string()))?;

        let graded = score_passage(passage, &answers);
        let attempt = TestAttempt {
            id: Uuid::new_v4(),
            user_id: session.user_id.clone(),
            passage_id: passage_id.to_string(),
            answers,
            score: graded.score,
            total_questions: graded.total,
            time_spent_secs,
            completed_at: Utc::now(),
        };
        tracing::debug!(
            passage_id,
            score = graded.score,
            total = graded.total,
            "passage graded"
        );

        session.attempts.push(attempt.clone());
        self.notifier.notify();
        Ok(attempt)
    }

    /// Move the cursor to the next passage.
    ///
    /// At the last passage this is a complete no-op (no notification);
    /// the caller decides whether to finish instead.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let last_index = self.passages.len().saturating_sub(1);
        let session = self
            .session
            .as_mut()
            .filter(|s| s.is_active)
            .ok_or(SessionError::NoActiveSession)?;

        if session.current_passage_index < last_index {
            session.current_passage_index += 1;
            self.passage_start_tick = self.timer.current_value();
            self.notifier.notify();
        }
        Ok(())
    }

    /// Mark the session finished.
    ///
    /// Idempotent: finishing an already-finished session changes nothing
    /// but still notifies once.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.is_active = false;
        tracing::debug!(session_id = %session.id, "session finished");
        self.notifier.notify();
        Ok(())
    }

    /// Totals across the session's attempts so far.
    ///
    /// Works on an active or finished session. A session with no attempts
    /// yields zero totals and an absent percentage, never a fault.
    pub fn aggregate(&self) -> Result<SessionSummary, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveSession)?;
        Ok(summarize(&session.attempts))
    }

    // -----------------------------------------------------------------
    // Timer
    // -----------------------------------------------------------------

    /// Advance the shared counter by one second. Driven by the external
    /// clock; runs whether or not a session is active.
    pub fn tick_timer(&mut self) {
        self.timer.tick();
        self.notifier.notify();
    }

    /// Flip the timer display flag.
    pub fn toggle_timer(&mut self) {
        self.timer.toggle_visible();
        self.notifier.notify();
    }

    /// Seconds on the shared counter.
    pub fn session_time(&self) -> u64 {
        self.timer.current_value()
    }

    pub fn timer_visible(&self) -> bool {
        self.timer.is_visible()
    }

    /// Seconds the current passage has been under the cursor:
    /// counter now minus counter at passage start.
    pub fn time_on_current_passage(&self) -> u64 {
        self.timer.current_value().saturating_sub(self.passage_start_tick)
    }

    // -----------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------

    /// Register a callback invoked after every mutation.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Deregister a callback.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, OptionKey, Question, QuestionOptions};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn question(id: &str, number: u32, correct: OptionKey) -> Question {
        Question {
            id: id.to_string(),
            question_number: number,
            text: format!("question {number}"),
            options: QuestionOptions::new("w", "x", "y", "z"),
            correct_answer: correct,
            explanation: String::new(),
        }
    }

    fn passage(id: &str, questions: Vec<Question>) -> Passage {
        Passage {
            id: id.to_string(),
            title: id.to_string(),
            content: "body".into(),
            subject: Subject::English,
            difficulty: Difficulty::Easy,
            questions,
        }
    }

    fn engine_with_two_passages() -> SessionEngine {
        let mut engine = SessionEngine::new();
        engine.set_user(User::new("Ada", "ada@example.com"));
        engine.set_passages(vec![
            passage("p1", vec![question("q1", 1, OptionKey::A)]),
            passage("p2", vec![question("q2", 1, OptionKey::B)]),
        ]);
        engine
    }

    #[test]
    fn start_requires_user() {
        let mut engine = SessionEngine::new();
        engine.set_passages(vec![passage("p1", vec![question("q1", 1, OptionKey::A)])]);
        assert_eq!(
            engine.start_session(Subject::English),
            Err(SessionError::NoUser)
        );
    }

    #[test]
    fn start_requires_passages() {
        let mut engine = SessionEngine::new();
        engine.set_user(User::new("Ada", "ada@example.com"));
        assert_eq!(
            engine.start_session(Subject::Math),
            Err(SessionError::EmptyPassageSet)
        );
    }

    #[test]
    fn start_resets_cursor_attempts_and_timer() {
        let mut engine = engine_with_two_passages();
        engine.tick_timer();
        engine.tick_timer();

        let session = engine.start_session(Subject::English).unwrap();
        assert!(session.is_active);
        assert_eq!(session.current_passage_index, 0);
        assert!(session.attempts.is_empty());
        assert_eq!(engine.session_time(), 0);
        assert_eq!(engine.current_passage().unwrap().id, "p1");
    }

    #[test]
    fn restart_replaces_prior_session() {
        let mut engine = engine_with_two_passages();
        let first = engine.start_session(Subject::English).unwrap();
        engine
            .submit_answers("p1", AnswerSheet::new(), 10)
            .unwrap();
        engine.finish().unwrap();

        let second = engine.start_session(Subject::Reading).unwrap();
        assert_ne!(first.id, second.id);
        assert!(engine.session().unwrap().attempts.is_empty());
        assert_eq!(engine.session().unwrap().subject, Subject::Reading);
    }

    #[test]
    fn submit_without_session_fails() {
        let mut engine = engine_with_two_passages();
        assert_eq!(
            engine.submit_answers("p1", AnswerSheet::new(), 0),
            Err(SessionError::NoActiveSession)
        );
    }

    #[test]
    fn submit_after_finish_fails() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        engine.finish().unwrap();
        assert_eq!(
            engine.submit_answers("p1", AnswerSheet::new(), 0),
            Err(SessionError::NoActiveSession)
        );
    }

    #[test]
    fn unknown_passage_leaves_attempts_unchanged() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        assert_eq!(
            engine.submit_answers("nonexistent", AnswerSheet::new(), 0),
            Err(SessionError::PassageNotFound("nonexistent".into()))
        );
        assert!(engine.session().unwrap().attempts.is_empty());
    }

    #[test]
    fn submit_does_not_move_cursor() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), OptionKey::A);
        let attempt = engine.submit_answers("p1", answers, 30).unwrap();

        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 1);
        assert_eq!(engine.session().unwrap().current_passage_index, 0);
    }

    #[test]
    fn advance_stops_at_last_passage() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        assert!(engine.has_next_passage());

        engine.advance().unwrap();
        assert_eq!(engine.session().unwrap().current_passage_index, 1);
        assert!(!engine.has_next_passage());

        // No-op at the boundary.
        engine.advance().unwrap();
        assert_eq!(engine.session().unwrap().current_passage_index, 1);
    }

    #[test]
    fn advance_restarts_passage_delta() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        engine.tick_timer();
        engine.tick_timer();
        assert_eq!(engine.time_on_current_passage(), 2);

        engine.advance().unwrap();
        assert_eq!(engine.time_on_current_passage(), 0);
        engine.tick_timer();
        assert_eq!(engine.time_on_current_passage(), 1);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        engine.finish().unwrap();
        assert!(!engine.session().unwrap().is_active);
        engine.finish().unwrap();
        assert!(!engine.session().unwrap().is_active);
    }

    #[test]
    fn clear_user_drops_session() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        engine.clear_user();
        assert!(engine.user().is_none());
        assert!(engine.session().is_none());
        assert_eq!(engine.aggregate(), Err(SessionError::NoActiveSession));
    }

    #[test]
    fn aggregate_on_fresh_session_is_defined() {
        let mut engine = engine_with_two_passages();
        engine.start_session(Subject::English).unwrap();
        let summary = engine.aggregate().unwrap();
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.total_correct, 0);
        assert_eq!(summary.overall_percentage, None);
    }

    #[test]
    fn mutations_notify_observers_once() {
        let mut engine = engine_with_two_passages();
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = Arc::clone(&hits);
        engine.subscribe(move || {
            hits_clone.fetch_add(1, Ordering::Relaxed);
        });

        engine.start_session(Subject::English).unwrap();
        engine
            .submit_answers("p1", AnswerSheet::new(), 5)
            .unwrap();
        engine.advance().unwrap();
        engine.advance().unwrap(); // boundary no-op, no notification
        engine.toggle_timer();
        engine.tick_timer();
        engine.finish().unwrap();
        engine.finish().unwrap(); // second finish still notifies

        assert_eq!(hits.load(Ordering::Relaxed), 7);
    }
}
