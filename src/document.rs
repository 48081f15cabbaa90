//! Document record and processing status.
//!
//! A document is a stored unit of uploaded text content. It enters the
//! store as `processing` and is later resolved to `completed` or `failed`
//! by the processor task; no other transitions exist.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Processing state of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Upload accepted, content not yet ingested
    Processing,
    /// Ingestion finished, document answerable
    Completed,
    /// Ingestion gave up on the content
    Failed,
}

impl DocumentStatus {
    /// Get the string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
        }
    }

    /// Get all statuses
    pub fn all() -> &'static [DocumentStatus] {
        &[
            DocumentStatus::Processing,
            DocumentStatus::Completed,
            DocumentStatus::Failed,
        ]
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Only `processing -> completed` and `processing -> failed` exist; a
    /// resolved document never changes status again.
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        matches!(
            (self, next),
            (DocumentStatus::Processing, DocumentStatus::Completed)
                | (DocumentStatus::Processing, DocumentStatus::Failed)
        )
    }
}

impl FromStr for DocumentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "processing" | "pending" => Ok(DocumentStatus::Processing),
            "completed" | "done" | "ready" => Ok(DocumentStatus::Completed),
            "failed" | "error" => Ok(DocumentStatus::Failed),
            _ => Err(Error::Validation(format!("Unknown document status: {}", s))),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within the store
    pub id: String,
    /// Display title
    pub title: String,
    /// Full text content
    pub content: String,
    /// Identifier of the uploading user
    pub uploaded_by: String,
    /// Processing state
    pub status: DocumentStatus,
    /// Creation time (unix millis)
    pub created_at: u64,
    /// Last modification time (unix millis)
    pub updated_at: u64,
}

impl Document {
    /// Create a new document in the `processing` state
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        uploaded_by: impl Into<String>,
    ) -> Self {
        let now = crate::now_millis();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            uploaded_by: uploaded_by.into(),
            status: DocumentStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the creation/update timestamps (seed data, tests)
    pub fn with_created_at(mut self, millis: u64) -> Self {
        self.created_at = millis;
        self.updated_at = millis;
        self
    }

    /// Override the status (seed data)
    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}
