//! UTF-8 safe text chunking.
//!
//! Implements character-based chunking that never panics on
//! multi-byte UTF-8 sequences. All chunk boundaries are derived
//! from `char_indices()`, so they always fall on valid character
//! boundaries regardless of emojis or other multi-byte content.
//!
//! Chunks are produced lazily: [`Chunker::split`] returns an
//! iterator, and calling it again restarts the sequence.

use crate::core::types::Chunk;

/// UTF-8 safe text chunker.
///
/// Splits text into fixed-size chunks with configurable overlap.
/// All sizes are measured in **characters**, not bytes.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters repeated between consecutive chunks
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0 or if `overlap >= chunk_size`.
    /// Configuration validation rejects both cases before a
    /// chunker is ever constructed from user input.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be > 0");
        assert!(overlap < chunk_size, "overlap must be < chunk_size");

        Self {
            chunk_size,
            overlap,
        }
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split text into overlapping chunks.
    ///
    /// Returns a lazy iterator over the chunks. Each chunk holds
    /// at most `chunk_size` characters, and consecutive chunks
    /// share `overlap` characters, so no context is lost at chunk
    /// boundaries. Non-empty text yields at least one chunk;
    /// whitespace-only text yields none (callers treat that as an
    /// extraction failure, not a chunking error).
    pub fn split<'a>(&self, text: &'a str) -> Chunks<'a> {
        // Character boundaries as byte offsets. Working from this
        // table instead of raw byte indices is what keeps every
        // slice on a valid UTF-8 boundary.
        let boundaries: Vec<usize> = if text.trim().is_empty() {
            Vec::new()
        } else {
            text.char_indices().map(|(i, _)| i).collect()
        };

        Chunks {
            text,
            boundaries,
            // Always advance at least 1 character to prevent
            // infinite loops
            step: self.chunk_size.saturating_sub(self.overlap).max(1),
            chunk_size: self.chunk_size,
            pos: 0,
            next_index: 0,
        }
    }
}

/// Lazy iterator over the chunks of one text.
#[derive(Debug)]
pub struct Chunks<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
    step: usize,
    chunk_size: usize,
    /// Character position of the next chunk start
    pos: usize,
    /// Sequential index of the next chunk
    next_index: usize,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.pos >= self.boundaries.len() {
            return None;
        }

        let end = self.pos + self.chunk_size;
        let byte_start = self.boundaries[self.pos];
        let byte_end = if end < self.boundaries.len() {
            self.boundaries[end]
        } else {
            self.text.len()
        };

        let chunk = Chunk {
            text: self.text[byte_start..byte_end].to_string(),
            start_offset: byte_start,
            chunk_index: self.next_index,
        };

        self.next_index += 1;
        self.pos += self.step;

        Some(chunk)
    }
}
