use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::chunking::Chunk;
use crate::text::collapse_whitespace;

fn text_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Drops chunks whose whitespace-normalized text was already seen.
///
/// Texts shorter than `min_length` characters are always kept, so short
/// recurring phrases survive. Comparison is case-sensitive.
#[must_use]
pub fn deduplicate(chunks: Vec<Chunk>, min_length: usize) -> Vec<Chunk> {
    let mut seen = HashSet::new();
    let before = chunks.len();

    let unique = chunks
        .into_iter()
        .filter(|chunk| {
            let normalized = collapse_whitespace(&chunk.text);
            normalized.chars().count() < min_length || seen.insert(text_digest(&normalized))
        })
        .collect::<Vec<_>>();

    tracing::debug!(before, after = unique.len(), "chunks deduplicated");
    unique
}
