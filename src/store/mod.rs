//! Store traits and backends.
//!
//! Callers depend on the traits only; the in-memory backend stands in for a
//! real persistence layer and can be swapped without touching callers. Each
//! store exclusively owns its backing collection.

use crate::document::{Document, DocumentStatus};
use crate::question::Question;
use crate::user::{Role, User};
use crate::Result;
use async_trait::async_trait;

pub mod memory;

/// Storage contract for document records.
///
/// `list` is the boundary view (newest first); `snapshot` preserves
/// insertion order for the relevance matcher, which ranks nothing and must
/// not inherit recency order from the listing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a new document in the `processing` state, assigning its id
    async fn append(&self, title: &str, content: &str, uploaded_by: &str) -> Document;

    /// Look up a document by id
    async fn get(&self, id: &str) -> Option<Document>;

    /// Remove a document by id
    async fn delete(&self, id: &str) -> Result<()>;

    /// All documents sorted by creation time descending (id breaks ties)
    async fn list(&self) -> Vec<Document>;

    /// All documents in insertion order
    async fn snapshot(&self) -> Vec<Document>;

    /// Transition a document's status, refusing illegal transitions
    async fn set_status(&self, id: &str, status: DocumentStatus) -> Result<Document>;
}

/// Storage contract for question records.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Append a new question record, assigning its id
    async fn append(
        &self,
        question: &str,
        answer: &str,
        document_references: Vec<String>,
        asked_by: &str,
    ) -> Question;

    /// Look up a question by id
    async fn get(&self, id: &str) -> Option<Question>;

    /// Remove a question by id
    async fn delete(&self, id: &str) -> Result<()>;

    /// All questions in append order (callers sort by timestamp if needed)
    async fn list(&self) -> Vec<Question>;
}

/// Storage contract for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    async fn get(&self, id: &str) -> Option<User>;

    /// All users in insertion order
    async fn list(&self) -> Vec<User>;

    /// Change a user's role
    async fn set_role(&self, id: &str, role: Role) -> Result<User>;

    /// Remove a user by id
    async fn delete(&self, id: &str) -> Result<()>;
}
