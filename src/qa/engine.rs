//! Q&A engine - orchestrates matcher, synthesizer and the question store.

use crate::qa::{matcher, synthesizer};
use crate::question::Question;
use crate::store::{DocumentStore, QuestionStore};
use crate::{Error, Result};

/// Orchestrator for the ask/list/get/delete question operations.
///
/// Cheap to construct; call sites build one per operation over the store
/// handles they already hold.
pub struct QaEngine<'a> {
    documents: &'a dyn DocumentStore,
    questions: &'a dyn QuestionStore,
}

impl<'a> QaEngine<'a> {
    /// Create a new engine over the given stores
    pub fn new(documents: &'a dyn DocumentStore, questions: &'a dyn QuestionStore) -> Self {
        Self {
            documents,
            questions,
        }
    }

    /// Answer `question` and persist the resulting record.
    ///
    /// Matches documents, synthesizes an answer from them, appends the
    /// record and returns it. The append is a single in-memory operation,
    /// so there is no partial-failure state to roll back.
    pub async fn ask_question(&self, question: &str, asked_by: &str) -> Question {
        let snapshot = self.documents.snapshot().await;
        let references = matcher::find_relevant(question, &snapshot);
        tracing::debug!(
            "Question matched {} of {} documents",
            references.len(),
            snapshot.len()
        );

        let answer = synthesizer::generate_answer(question, &references, self.documents).await;

        self.questions
            .append(question, &answer, references, asked_by)
            .await
    }

    /// All question records in append order (callers sort by timestamp)
    pub async fn get_questions(&self) -> Vec<Question> {
        self.questions.list().await
    }

    /// Look up a single question record
    pub async fn get_question(&self, id: &str) -> Result<Question> {
        self.questions.get(id).await.ok_or(Error::QuestionNotFound)
    }

    /// Delete a question record
    pub async fn delete_question(&self, id: &str) -> Result<()> {
        self.questions.delete(id).await
    }
}
