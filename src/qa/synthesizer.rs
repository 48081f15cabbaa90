//! Answer synthesizer - extractive summarization over matched documents.
//!
//! Heuristic, not ranked: the first two sentences overlapping the query
//! win regardless of match quality. Sentences are split on the literal `.`
//! character, so abbreviations and decimal numbers mis-segment; that is a
//! known simplification carried over from the answer format this service
//! commits to, not something to silently change.

use crate::store::DocumentStore;

/// Returned when the matcher produced no candidate documents.
pub const NO_DOCUMENTS_MESSAGE: &str = "I could not find any relevant documents to answer your question. Please try rephrasing or ask something else.";

/// Returned when no sentence in the candidates overlaps the query.
pub const NO_ANSWER_MESSAGE: &str = "Based on the available documents, I cannot provide a specific answer. Please try asking a different question.";

/// Generate an answer for `query` from the referenced documents.
///
/// Fetches each referenced document, skipping ids that fail to resolve
/// (best effort, logged, never fatal), concatenates the contents, splits
/// into sentence candidates and keeps those containing any query token as
/// a case-insensitive substring. The first two survivors joined with
/// `". "` plus a trailing `.` form the answer; fixed messages cover the
/// no-candidates and no-overlap cases.
pub async fn generate_answer(
    query: &str,
    document_ids: &[String],
    documents: &dyn DocumentStore,
) -> String {
    if document_ids.is_empty() {
        return NO_DOCUMENTS_MESSAGE.to_string();
    }

    let mut contents = Vec::new();
    for id in document_ids {
        match documents.get(id).await {
            Some(doc) => contents.push(doc.content),
            None => {
                tracing::warn!("Referenced document {} no longer resolves, skipping", id);
            }
        }
    }

    let lowered = query.to_lowercase();
    let keywords: Vec<&str> = lowered.split(' ').collect();

    let combined = contents.join(" ");
    let relevant: Vec<&str> = combined
        .split('.')
        .filter(|sentence| {
            let sentence = sentence.to_lowercase();
            keywords.iter().any(|keyword| sentence.contains(keyword))
        })
        .collect();

    if relevant.is_empty() {
        return NO_ANSWER_MESSAGE.to_string();
    }

    let mut answer = relevant[..relevant.len().min(2)].join(". ");
    answer.push('.');
    answer
}
