//! Text chunking with configurable size and overlap.

/// Chunk text into overlapping segments.
///
/// This implementation uses simple character-based chunking with a sliding
/// window. Window boundaries are adjusted to valid UTF-8 char boundaries.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() || chunk_size == 0 {
        return vec![];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        // Find valid UTF-8 boundary for end position
        let mut end = (start + chunk_size).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }

        let chunk = &text[start..end];

        // Skip trailing fragments that are too small (< 10% of chunk_size)
        if chunk.len() < chunk_size / 10 {
            break;
        }

        // A window of pure whitespace trims to nothing; don't store it
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        // Move forward by (chunk_size - overlap)
        let step = if chunk_size > overlap {
            chunk_size - overlap
        } else {
            chunk_size
        };

        // Find valid UTF-8 boundary for next start position
        let mut next_start = start + step;
        while next_start < text.len() && !text.is_char_boundary(next_start) {
            next_start += 1;
        }
        start = next_start;
    }

    tracing::debug!(
        "Chunked text into {} chunks (size: {}, overlap: {})",
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}
