//! Document processor - resolves a freshly uploaded document's status.
//!
//! One task per upload, spawned by the upload path, sleeping a configured
//! delay that stands in for real ingestion work. The handle is handed back
//! to the caller; tests await it, the server lets it run detached. There
//! is no free-running timer anywhere.

use crate::document::DocumentStatus;
use crate::store::DocumentStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Spawn the status-resolution task for the document `id`.
///
/// After `delay`, documents with blank content are marked `failed`, all
/// others `completed`. A document deleted while its task sleeps makes the
/// transition a no-op.
pub fn spawn(
    documents: Arc<dyn DocumentStore>,
    id: String,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let Some(document) = documents.get(&id).await else {
            tracing::debug!("Document {} deleted before processing finished", id);
            return;
        };

        let status = if document.content.trim().is_empty() {
            DocumentStatus::Failed
        } else {
            DocumentStatus::Completed
        };

        match documents.set_status(&id, status).await {
            Ok(_) => tracing::info!("Document {} processed: {}", id, status),
            Err(e) => tracing::warn!("Could not resolve status of document {}: {}", id, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryDocumentStore;
    use crate::store::DocumentStore;

    #[tokio::test]
    async fn test_nonblank_content_completes() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let doc = store.append("Guide", "Welcome.", "u1").await;

        spawn(store.clone(), doc.id.clone(), Duration::from_millis(1))
            .await
            .unwrap();

        let processed = store.get(&doc.id).await.unwrap();
        assert_eq!(processed.status, DocumentStatus::Completed);
        assert!(processed.updated_at >= processed.created_at);
    }

    #[tokio::test]
    async fn test_blank_content_fails() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let doc = store.append("Empty", "   \n", "u1").await;

        spawn(store.clone(), doc.id.clone(), Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(
            store.get(&doc.id).await.unwrap().status,
            DocumentStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_deleted_document_is_noop() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let doc = store.append("Gone", "Soon gone.", "u1").await;
        store.delete(&doc.id).await.unwrap();

        // must not panic or recreate the document
        spawn(store.clone(), doc.id.clone(), Duration::from_millis(1))
            .await
            .unwrap();
        assert!(store.get(&doc.id).await.is_none());
    }
}
