//! # Docqa - Document Q&A Service
//!
//! Upload, list and search documents, then ask questions answered by a
//! keyword-overlap extractive pipeline over the uploaded content.
//!
//! Docqa provides:
//! - Trait-based document/question/user stores with in-memory backends
//! - A relevance matcher selecting documents whose text overlaps a query
//! - An extractive answer synthesizer with fixed fallback messages
//! - An HTTP boundary (axum) returning a uniform success/data/error envelope
//! - A per-upload processing task resolving document status

pub mod document;
pub mod question;
pub mod user;
pub mod store;
pub mod qa;
pub mod envelope;
pub mod ingest;
pub mod processor;
pub mod server;
pub mod config;

// Re-exports for convenient access
pub use document::{Document, DocumentStatus};
pub use question::Question;
pub use user::{Role, User};
pub use envelope::ApiResponse;
pub use store::{DocumentStore, QuestionStore, UserStore};
pub use store::memory::{MemoryDocumentStore, MemoryQuestionStore, MemoryUserStore};

/// Result type alias for Docqa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Docqa operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Document not found")]
    DocumentNotFound,

    #[error("Question not found")]
    QuestionNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing or unknown user credentials")]
    Unauthorized,

    #[error("Admin access required")]
    Forbidden,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Current wall-clock time as unix milliseconds.
///
/// All record timestamps use this representation; recency ordering is a
/// plain numeric comparison.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
