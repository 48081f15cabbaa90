//! Question record - a stored question, its synthesized answer and the
//! document ids the answer drew on.

use serde::{Deserialize, Serialize};

/// A question asked against the document collection.
///
/// Created only by the Q&A engine and immutable afterwards except for
/// deletion. `document_references` keeps the matcher's order and is not
/// deduplicated; it holds ids into the document store, never documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the store
    pub id: String,
    /// Original question text
    pub question: String,
    /// Synthesized answer text
    pub answer: String,
    /// Ids of the documents the answer was extracted from (may be empty)
    pub document_references: Vec<String>,
    /// Identifier of the asking user
    pub asked_by: String,
    /// Creation time (unix millis)
    pub created_at: u64,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        document_references: Vec<String>,
        asked_by: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            document_references,
            asked_by: asked_by.into(),
            created_at: crate::now_millis(),
        }
    }

    /// Override the creation timestamp (seed data, tests)
    pub fn with_created_at(mut self, millis: u64) -> Self {
        self.created_at = millis;
        self
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Question {}
