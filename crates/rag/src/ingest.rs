//! Document ingestion: folder of `.txt` files into the vector store.

use crate::chunker::chunk_text;
use crate::embeddings::EmbeddingProvider;
use crate::store::VectorStore;
use crate::types::DocumentChunk;
use docrag_core::{AppConfig, AppError, AppResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Summary of an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Number of documents ingested
    pub files: u32,

    /// Number of chunks written to the store
    pub chunks: u32,
}

/// Ingest all `.txt` files from the configured docs folder into the index.
///
/// For each document: read as UTF-8, chunk, embed, and replace any chunks
/// previously stored for the same file. A file that fails to read is
/// logged and skipped; the run continues.
pub async fn ingest(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
) -> AppResult<IngestReport> {
    if !config.docs_dir.exists() {
        return Err(AppError::Config(format!(
            "Docs directory does not exist: {:?}",
            config.docs_dir
        )));
    }

    let mut store = VectorStore::open(&config.index_path)?;
    let files = collect_txt_files(&config.docs_dir);

    tracing::info!(
        "Ingesting {} text files from {:?}",
        files.len(),
        config.docs_dir
    );

    let mut report = IngestReport::default();

    for path in files {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping unreadable file {:?}: {}", path, e);
                continue;
            }
        };

        let source = relative_source(&config.docs_dir, &path);
        let texts = chunk_text(&text, config.chunk_size, config.chunk_overlap);

        if texts.is_empty() {
            tracing::debug!("No chunks produced for {:?}", path);
            continue;
        }

        let embeddings = embedder.embed_batch(&texts).await?;

        let chunks: Vec<DocumentChunk> = texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(position, (text, embedding))| DocumentChunk {
                source: source.clone(),
                position: position as u32,
                text,
                embedding: Some(embedding),
            })
            .collect();

        store.replace_source(&source, &chunks)?;

        report.files += 1;
        report.chunks += chunks.len() as u32;
    }

    tracing::info!(
        "Ingestion complete: {} files, {} chunks, index at {:?}",
        report.files,
        report.chunks,
        config.index_path
    );

    Ok(report)
}

/// Collect all `.txt` files under the docs folder, sorted for determinism.
fn collect_txt_files(docs_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(docs_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Source identifier: path relative to the docs folder.
fn relative_source(docs_dir: &Path, path: &Path) -> String {
    path.strip_prefix(docs_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashEmbedder;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.docs_dir = dir.path().join("docs");
        config.index_path = dir.path().join("index.db");
        config.chunk_size = 100;
        config.chunk_overlap = 20;
        config.embedding_dim = 64;
        config
    }

    #[tokio::test]
    async fn test_ingest_txt_files() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.docs_dir).unwrap();
        std::fs::write(
            config.docs_dir.join("about.txt"),
            "docrag answers questions about your documents. ".repeat(10),
        )
        .unwrap();
        std::fs::write(config.docs_dir.join("notes.md"), "not a txt file").unwrap();

        let embedder = Arc::new(HashEmbedder::new(64));
        let report = ingest(&config, embedder).await.unwrap();

        assert_eq!(report.files, 1);
        assert!(report.chunks > 1);

        let store = VectorStore::open(&config.index_path).unwrap();
        let (sources, chunks) = store.stats().unwrap();
        assert_eq!(sources, 1);
        assert_eq!(chunks, report.chunks);
    }

    #[tokio::test]
    async fn test_ingest_empty_dir() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.docs_dir).unwrap();

        let embedder = Arc::new(HashEmbedder::new(64));
        let report = ingest(&config, embedder).await.unwrap();

        assert_eq!(report.files, 0);
        assert_eq!(report.chunks, 0);
    }

    #[tokio::test]
    async fn test_ingest_missing_dir() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let embedder = Arc::new(HashEmbedder::new(64));
        let result = ingest(&config, embedder).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_reingest_replaces_chunks() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        std::fs::create_dir_all(&config.docs_dir).unwrap();

        let long_text = "a sentence about retrieval systems and indexes. ".repeat(20);
        std::fs::write(config.docs_dir.join("doc.txt"), &long_text).unwrap();

        let embedder: Arc<dyn crate::embeddings::EmbeddingProvider> =
            Arc::new(HashEmbedder::new(64));
        let first = ingest(&config, embedder.clone()).await.unwrap();
        let second = ingest(&config, embedder).await.unwrap();

        assert_eq!(first.chunks, second.chunks);

        let store = VectorStore::open(&config.index_path).unwrap();
        let (_, chunks) = store.stats().unwrap();
        assert_eq!(chunks, first.chunks);
    }

    #[test]
    fn test_collect_txt_files_recurses() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(nested.join("b.TXT"), "b").unwrap();
        std::fs::write(dir.path().join("c.csv"), "c").unwrap();

        let files = collect_txt_files(dir.path());
        assert_eq!(files.len(), 2);
    }
}
