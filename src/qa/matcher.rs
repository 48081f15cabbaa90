//! Relevance matcher - keyword overlap between a query and document text.

use crate::document::Document;

/// Find the documents whose content shares at least one token with `query`.
///
/// The query is lower-cased and split on the space character; a document
/// qualifies if its lower-cased content contains ANY token as a substring
/// (not a word-boundary match). Results keep the order of `documents`;
/// there is no scoring and no ranking by match count.
///
/// Quirk, kept on purpose: an empty query splits into a single empty
/// token, and the empty string is a substring of every content, so an
/// empty query matches ALL documents.
pub fn find_relevant(query: &str, documents: &[Document]) -> Vec<String> {
    let lowered = query.to_lowercase();
    let keywords: Vec<&str> = lowered.split(' ').collect();

    documents
        .iter()
        .filter(|doc| {
            let content = doc.content.to_lowercase();
            keywords.iter().any(|keyword| content.contains(keyword))
        })
        .map(|doc| doc.id.clone())
        .collect()
}
