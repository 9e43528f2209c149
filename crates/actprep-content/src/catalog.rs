//! Authored passage catalog.
//!
//! An in-memory passage set managed by the content-management panel:
//! passages and their questions can be added, patched, and removed. The
//! catalog hands validated passages to the session core through the
//! `ContentSource` seam; it performs no grading or session logic itself.

use actprep_core::model::{
    Difficulty, OptionKey, Passage, Question, QuestionOptions, Subject,
};
use actprep_core::traits::ContentSource;
use uuid::Uuid;

/// Partial update for a passage. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PassagePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub subject: Option<Subject>,
    pub difficulty: Option<Difficulty>,
}

/// Partial update for a question. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub options: Option<QuestionOptions>,
    pub correct_answer: Option<OptionKey>,
    pub explanation: Option<String>,
}

/// A managed, mutable passage set.
#[derive(Debug, Default)]
pub struct Catalog {
    passages: Vec<Passage>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every passage in authoring order.
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn passage(&self, id: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.id == id)
    }

    /// Add a passage under a fresh id; returns the id.
    pub fn add_passage(
        &mut self,
        title: &str,
        content: &str,
        subject: Subject,
        difficulty: Difficulty,
        questions: Vec<Question>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.passages.push(Passage {
            id: id.clone(),
            title: title.to_string(),
            content: content.to_string(),
            subject,
            difficulty,
            questions,
        });
        id
    }

    /// Apply a partial update. Returns false if the id is unknown.
    pub fn update_passage(&mut self, id: &str, patch: PassagePatch) -> bool {
        let Some(passage) = self.passages.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if let Some(title) = patch.title {
            passage.title = title;
        }
        if let Some(content) = patch.content {
            passage.content = content;
        }
        if let Some(subject) = patch.subject {
            passage.subject = subject;
        }
        if let Some(difficulty) = patch.difficulty {
            passage.difficulty = difficulty;
        }
        true
    }

    /// Remove a passage and its questions. Returns false if unknown.
    pub fn delete_passage(&mut self, id: &str) -> bool {
        let before = self.passages.len();
        self.passages.retain(|p| p.id != id);
        self.passages.len() != before
    }

    /// Append a question to a passage under a fresh id; the question
    /// number is the next ordinal. Returns the question id, or `None`
    /// if the passage is unknown.
    pub fn add_question(
        &mut self,
        passage_id: &str,
        text: &str,
        options: QuestionOptions,
        correct_answer: OptionKey,
        explanation: &str,
    ) -> Option<String> {
        let passage = self.passages.iter_mut().find(|p| p.id == passage_id)?;
        let id = Uuid::new_v4().to_string();
        passage.questions.push(Question {
            id: id.clone(),
            question_number: passage.questions.len() as u32 + 1,
            text: text.to_string(),
            options,
            correct_answer,
            explanation: explanation.to_string(),
        });
        Some(id)
    }

    /// Apply a partial update to one question. Returns false if either
    /// id is unknown.
    pub fn update_question(
        &mut self,
        passage_id: &str,
        question_id: &str,
        patch: QuestionPatch,
    ) -> bool {
        let Some(passage) = self.passages.iter_mut().find(|p| p.id == passage_id) else {
            return false;
        };
        let Some(question) = passage.questions.iter_mut().find(|q| q.id == question_id) else {
            return false;
        };
        if let Some(text) = patch.text {
            question.text = text;
        }
        if let Some(options) = patch.options {
            question.options = options;
        }
        if let Some(correct) = patch.correct_answer {
            question.correct_answer = correct;
        }
        if let Some(explanation) = patch.explanation {
            question.explanation = explanation;
        }
        true
    }

    /// Remove a question and renumber the remainder to keep ordinals
    /// contiguous and 1-based. Returns false if either id is unknown.
    pub fn delete_question(&mut self, passage_id: &str, question_id: &str) -> bool {
        let Some(passage) = self.passages.iter_mut().find(|p| p.id == passage_id) else {
            return false;
        };
        let before = passage.questions.len();
        passage.questions.retain(|q| q.id != question_id);
        if passage.questions.len() == before {
            return false;
        }
        for (i, q) in passage.questions.iter_mut().enumerate() {
            q.question_number = i as u32 + 1;
        }
        true
    }
}

impl ContentSource for Catalog {
    fn passages_for(&self, subject: Subject) -> Vec<Passage> {
        self.passages
            .iter()
            .filter(|p| p.subject == subject)
            .cloned()
            .collect()
    }
}
