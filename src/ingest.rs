//! Directory ingestion for the CLI and the `--seed-dir` option.

use crate::document::Document;
use crate::store::DocumentStore;
use crate::Result;
use std::path::Path;

const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

/// Load every text file in `dir` (non-recursive) into the document store.
///
/// File stem becomes the title. Unreadable or non-text files are skipped
/// with a log line; files are taken in name order so repeated runs produce
/// the same ids.
pub async fn load_directory(
    documents: &dyn DocumentStore,
    dir: &Path,
    uploaded_by: &str,
) -> Result<Vec<Document>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| TEXT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut loaded = Vec::new();
    for path in paths {
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());

        loaded.push(documents.append(&title, &content, uploaded_by).await);
    }

    Ok(loaded)
}
