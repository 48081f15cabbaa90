//! In-memory store implementations.
//!
//! Each store guards a `Vec` in insertion order with an async `RwLock`;
//! every operation is a single critical section, so sequential callers
//! observe a monotone view. Ids come from a per-store counter rendered as
//! a decimal string.

use crate::document::{Document, DocumentStatus};
use crate::question::Question;
use crate::user::{Role, User};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::{DocumentStore, QuestionStore, UserStore};

// ========== Documents ==========

/// In-memory document store
pub struct MemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
    next_id: AtomicU64,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a pre-built record, keeping the id counter ahead of it.
    ///
    /// Used for seed data and tests; uploads go through `append`.
    pub async fn insert(&self, document: Document) {
        if let Ok(n) = document.id.parse::<u64>() {
            self.next_id.fetch_max(n + 1, Ordering::SeqCst);
        }
        self.documents.write().await.push(document);
    }

    fn fresh_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn append(&self, title: &str, content: &str, uploaded_by: &str) -> Document {
        let document = Document::new(self.fresh_id(), title, content, uploaded_by);
        self.documents.write().await.push(document.clone());
        document
    }

    async fn get(&self, id: &str) -> Option<Document> {
        self.documents.read().await.iter().find(|d| d.id == id).cloned()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|d| d.id != id);
        if documents.len() == before {
            return Err(Error::DocumentNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Vec<Document> {
        let mut documents = self.documents.read().await.clone();
        // Newest first; same-millisecond uploads fall back to id order
        documents.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| {
                let (x, y) = (
                    a.id.parse::<u64>().unwrap_or(0),
                    b.id.parse::<u64>().unwrap_or(0),
                );
                y.cmp(&x)
            })
        });
        documents
    }

    async fn snapshot(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    async fn set_status(&self, id: &str, status: DocumentStatus) -> Result<Document> {
        let mut documents = self.documents.write().await;
        let document = documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(Error::DocumentNotFound)?;
        if !document.status.can_transition_to(status) {
            return Err(Error::Validation(format!(
                "Illegal status transition: {} -> {}",
                document.status, status
            )));
        }
        document.status = status;
        document.updated_at = crate::now_millis();
        Ok(document.clone())
    }
}

// ========== Questions ==========

/// In-memory question store
pub struct MemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
    next_id: AtomicU64,
}

impl MemoryQuestionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a pre-built record, keeping the id counter ahead of it
    pub async fn insert(&self, question: Question) {
        if let Ok(n) = question.id.parse::<u64>() {
            self.next_id.fetch_max(n + 1, Ordering::SeqCst);
        }
        self.questions.write().await.push(question);
    }
}

impl Default for MemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn append(
        &self,
        question: &str,
        answer: &str,
        document_references: Vec<String>,
        asked_by: &str,
    ) -> Question {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let record = Question::new(id, question, answer, document_references, asked_by);
        self.questions.write().await.push(record.clone());
        record
    }

    async fn get(&self, id: &str) -> Option<Question> {
        self.questions.read().await.iter().find(|q| q.id == id).cloned()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut questions = self.questions.write().await;
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Err(Error::QuestionNotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Vec<Question> {
        self.questions.read().await.clone()
    }
}

// ========== Users ==========

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create a store seeded with the demo accounts: one admin and two
    /// regular users
    pub fn with_default_users() -> Self {
        Self {
            users: RwLock::new(vec![
                User::new("1", "admin@example.com", "Admin User", Role::Admin),
                User::new("2", "user@example.com", "Regular User", Role::User),
                User::new("3", "test@example.com", "Test User", Role::User),
            ]),
        }
    }

    /// Insert a pre-built record
    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, id: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    async fn set_role(&self, id: &str, role: Role) -> Result<User> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(Error::UserNotFound)?;
        user.role = role;
        user.updated_at = crate::now_millis();
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(Error::UserNotFound);
        }
        Ok(())
    }
}
