//! SQLite-backed vector store for document chunks.
//!
//! Chunks and their embeddings are persisted in a single SQLite file.
//! Similarity search is exact cosine similarity over all stored rows,
//! ranked in-process. This is a thin persisted index, not an ANN library.

use crate::types::{DocumentChunk, ScoredChunk};
use docrag_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// Persisted vector index over document chunks.
pub struct VectorStore {
    conn: Mutex<Connection>,
}

impl VectorStore {
    /// Open (or create) the store at the given path.
    ///
    /// Creates the parent directory and the schema if missing.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Index(format!("Failed to create index directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Index(format!("Failed to open index: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source TEXT NOT NULL,
                position INTEGER NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source);
            "#,
        )
        .map_err(|e| AppError::Index(format!("Failed to create tables: {}", e)))?;

        tracing::debug!("Opened vector store at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Replace all chunks for a source document.
    ///
    /// Re-ingesting a file first deletes its previous chunks, so the store
    /// never holds stale rows for a source.
    pub fn replace_source(&mut self, source: &str, chunks: &[DocumentChunk]) -> AppResult<()> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| AppError::Index(format!("Vector store lock poisoned: {}", e)))?;
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Index(format!("Failed to begin transaction: {}", e)))?;

        tx.execute("DELETE FROM chunks WHERE source = ?1", params![source])
            .map_err(|e| AppError::Index(format!("Failed to delete old chunks: {}", e)))?;

        for chunk in chunks {
            let embedding = chunk
                .embedding
                .as_ref()
                .ok_or_else(|| AppError::Index("Chunk missing embedding".to_string()))?;

            tx.execute(
                "INSERT INTO chunks (source, position, text, embedding) VALUES (?1, ?2, ?3, ?4)",
                params![
                    chunk.source,
                    chunk.position as i64,
                    chunk.text,
                    embedding_to_bytes(embedding),
                ],
            )
            .map_err(|e| AppError::Index(format!("Failed to insert chunk: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| AppError::Index(format!("Failed to commit chunks: {}", e)))?;

        tracing::debug!("Stored {} chunks for source '{}'", chunks.len(), source);
        Ok(())
    }

    /// Query the store for the top-k most similar chunks.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::Index(format!("Vector store lock poisoned: {}", e)))?;
        let mut stmt = conn
            .prepare("SELECT source, text, embedding FROM chunks")
            .map_err(|e| AppError::Index(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                let source: String = row.get(0)?;
                let text: String = row.get(1)?;
                let embedding_bytes: Vec<u8> = row.get(2)?;
                Ok((source, text, embedding_bytes))
            })
            .map_err(|e| AppError::Index(format!("Failed to query chunks: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            let (source, text, embedding_bytes) =
                row.map_err(|e| AppError::Index(format!("Failed to read chunk row: {}", e)))?;
            let embedding = bytes_to_embedding(&embedding_bytes)?;
            let score = cosine_similarity(query_embedding, &embedding);
            results.push(ScoredChunk {
                source,
                text,
                score,
            });
        }

        // Sort by score descending
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!("Retrieved {} chunks (requested top-{})", results.len(), top_k);
        Ok(results)
    }

    /// Get statistics for the store.
    ///
    /// Returns (sources_count, chunks_count).
    pub fn stats(&self) -> AppResult<(u32, u32)> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| AppError::Index(format!("Vector store lock poisoned: {}", e)))?;
        let sources_count: u32 = conn
            .query_row("SELECT COUNT(DISTINCT source) FROM chunks", [], |row| {
                row.get::<_, i64>(0).map(|v| v as u32)
            })
            .map_err(|e| AppError::Index(format!("Failed to count sources: {}", e)))?;

        let chunks_count: u32 = conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| {
                row.get::<_, i64>(0).map(|v| v as u32)
            })
            .map_err(|e| AppError::Index(format!("Failed to count chunks: {}", e)))?;

        Ok((sources_count, chunks_count))
    }

    /// Delete all chunks from the store.
    pub fn clear(&mut self) -> AppResult<()> {
        self.conn
            .lock()
            .map_err(|e| AppError::Index(format!("Vector store lock poisoned: {}", e)))?
            .execute("DELETE FROM chunks", [])
            .map_err(|e| AppError::Index(format!("Failed to clear chunks: {}", e)))?;

        tracing::info!("Cleared vector store");
        Ok(())
    }
}

/// Convert embedding vector to bytes for storage.
fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for &value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert bytes back to embedding vector.
fn bytes_to_embedding(bytes: &[u8]) -> AppResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AppError::Index(
            "Invalid embedding bytes length".to_string(),
        ));
    }

    let mut embedding = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        embedding.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(embedding)
}

/// Calculate cosine similarity between two vectors.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chunk(source: &str, position: u32, text: &str, embedding: Vec<f32>) -> DocumentChunk {
        DocumentChunk {
            source: source.to_string(),
            position,
            text: text.to_string(),
            embedding: Some(embedding),
        }
    }

    fn open_temp_store(dir: &TempDir) -> VectorStore {
        VectorStore::open(&dir.path().join("index.db")).unwrap()
    }

    #[test]
    fn test_open_creates_schema() {
        let dir = TempDir::new().unwrap();
        let store = open_temp_store(&dir);
        assert_eq!(store.stats().unwrap(), (0, 0));
    }

    #[test]
    fn test_open_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("index.db");
        let store = VectorStore::open(&nested).unwrap();
        assert_eq!(store.stats().unwrap(), (0, 0));
    }

    #[test]
    fn test_replace_source_and_stats() {
        let dir = TempDir::new().unwrap();
        let mut store = open_temp_store(&dir);

        store
            .replace_source(
                "a.txt",
                &[
                    chunk("a.txt", 0, "first", vec![1.0, 0.0]),
                    chunk("a.txt", 1, "second", vec![0.0, 1.0]),
                ],
            )
            .unwrap();
        store
            .replace_source("b.txt", &[chunk("b.txt", 0, "third", vec![1.0, 1.0])])
            .unwrap();

        assert_eq!(store.stats().unwrap(), (2, 3));

        // Re-ingesting a source replaces its chunks instead of appending
        store
            .replace_source("a.txt", &[chunk("a.txt", 0, "updated", vec![0.5, 0.5])])
            .unwrap();
        assert_eq!(store.stats().unwrap(), (2, 2));
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let dir = TempDir::new().unwrap();
        let mut store = open_temp_store(&dir);

        store
            .replace_source(
                "docs.txt",
                &[
                    chunk("docs.txt", 0, "aligned", vec![1.0, 0.0, 0.0]),
                    chunk("docs.txt", 1, "orthogonal", vec![0.0, 1.0, 0.0]),
                    chunk("docs.txt", 2, "close", vec![0.9, 0.1, 0.0]),
                ],
            )
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "aligned");
        assert_eq!(results[1].text, "close");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_search_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = open_temp_store(&dir);

        let results = store.search(&[1.0, 0.0], 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_missing_embedding_is_error() {
        let dir = TempDir::new().unwrap();
        let mut store = open_temp_store(&dir);

        let result = store.replace_source(
            "a.txt",
            &[DocumentChunk {
                source: "a.txt".to_string(),
                position: 0,
                text: "no embedding".to_string(),
                embedding: None,
            }],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = open_temp_store(&dir);

        store
            .replace_source("a.txt", &[chunk("a.txt", 0, "text", vec![1.0])])
            .unwrap();
        store.clear().unwrap();
        assert_eq!(store.stats().unwrap(), (0, 0));
    }

    #[test]
    fn test_embedding_bytes_roundtrip() {
        let embedding = vec![0.25f32, -1.5, 3.75, 0.0];
        let bytes = embedding_to_bytes(&embedding);
        assert_eq!(bytes_to_embedding(&bytes).unwrap(), embedding);
    }

    #[test]
    fn test_invalid_embedding_bytes() {
        assert!(bytes_to_embedding(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
