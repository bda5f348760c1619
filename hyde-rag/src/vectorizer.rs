//! Text vectorizers: turn a string into an [`EmbeddingVector`].

use async_trait::async_trait;

use crate::document::EmbeddingVector;
use crate::error::Result;

/// Converts text into an embedding vector.
///
/// Implementations either produce a fixed width (dense neural models) or a
/// width that varies per text (the reference [`TermFrequencyVectorizer`]).
/// Either way, identical texts must map to identical vectors.
///
/// # Example
///
/// ```rust,ignore
/// use hyde_rag::{TermFrequencyVectorizer, Vectorizer};
///
/// let vectorizer = TermFrequencyVectorizer;
/// let embedding = vectorizer.embed("the cat sat").await?;
/// assert_eq!(embedding.len(), 3);
/// ```
#[async_trait]
pub trait Vectorizer: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<EmbeddingVector>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation calls [`embed`](Vectorizer::embed)
    /// sequentially for each input.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The fixed width of every embedding, or `None` when the width depends
    /// on the input text.
    fn dimensions(&self) -> Option<usize>;
}

/// Term-frequency vectors over the distinct tokens of a single text.
///
/// Tokens are the whitespace-separated words left after lowercasing and
/// removing everything except ASCII letters, digits and whitespace. Each
/// distinct token contributes one dimension, in first-occurrence order, valued
/// `count / total_tokens`. The vocabulary is per text, so two texts generally
/// produce vectors of different widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyVectorizer;

impl TermFrequencyVectorizer {
    /// Create a new term-frequency vectorizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize `text` and split it into tokens.
    pub fn tokenize(text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();
        normalized.split_whitespace().map(str::to_string).collect()
    }

    /// Compute the term-frequency vector of `text`. Never fails; text with no
    /// tokens yields an empty vector.
    pub fn vectorize(&self, text: &str) -> EmbeddingVector {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        // (token, count) in first-occurrence order
        let mut vocabulary: Vec<(&str, usize)> = Vec::new();
        for token in &tokens {
            match vocabulary.iter_mut().find(|(t, _)| *t == token.as_str()) {
                Some((_, count)) => *count += 1,
                None => vocabulary.push((token.as_str(), 1)),
            }
        }

        let total = tokens.len() as f32;
        vocabulary.into_iter().map(|(_, count)| count as f32 / total).collect()
    }
}

#[async_trait]
impl Vectorizer for TermFrequencyVectorizer {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> Option<usize> {
        None
    }
}

/// Term frequencies hashed into a fixed number of buckets.
///
/// Uses the same tokenization as [`TermFrequencyVectorizer`], but each token
/// lands in bucket `fnv1a(token) % dimensions`, so equal tokens line up across
/// texts and every vector has the same width. Collisions add up.
#[derive(Debug, Clone, Copy)]
pub struct HashedTermFrequencyVectorizer {
    dimensions: usize,
}

impl HashedTermFrequencyVectorizer {
    /// Smallest accepted bucket count.
    pub const MIN_DIMENSIONS: usize = 8;

    /// Create a vectorizer with `dimensions` buckets (at least
    /// [`MIN_DIMENSIONS`](Self::MIN_DIMENSIONS)).
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(Self::MIN_DIMENSIONS) }
    }

    /// Compute the hashed term-frequency vector of `text`. Text with no tokens
    /// yields an all-zero vector.
    pub fn vectorize(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0f32; self.dimensions];
        let tokens = TermFrequencyVectorizer::tokenize(text);
        if tokens.is_empty() {
            return vector;
        }

        let total = tokens.len() as f32;
        for token in &tokens {
            let bucket = (fnv1a_64(token.as_bytes()) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0 / total;
        }
        vector
    }
}

#[async_trait]
impl Vectorizer for HashedTermFrequencyVectorizer {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.dimensions)
    }
}

fn fnv1a_64(data: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;
    let mut hash = OFFSET;
    for b in data {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation_and_case() {
        let tokens = TermFrequencyVectorizer::tokenize("Hello, World! It's 2024.");
        assert_eq!(tokens, vec!["hello", "world", "its", "2024"]);
    }

    #[test]
    fn vectorize_counts_in_first_occurrence_order() {
        let v = TermFrequencyVectorizer.vectorize("b a b c b");
        assert_eq!(v, vec![3.0 / 5.0, 1.0 / 5.0, 1.0 / 5.0]);
    }

    #[test]
    fn empty_and_symbol_only_text_yield_empty_vector() {
        assert!(TermFrequencyVectorizer.vectorize("").is_empty());
        assert!(TermFrequencyVectorizer.vectorize("  !?  ...").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        // "café" loses the accented letter, leaving "caf"
        assert_eq!(TermFrequencyVectorizer::tokenize("Café crème"), vec!["caf", "crme"]);
    }

    #[tokio::test]
    async fn embed_matches_vectorize_and_reports_variable_width() {
        let vectorizer = TermFrequencyVectorizer::new();
        let text = "Meditation lowers cortisol; meditation improves sleep.";
        assert_eq!(vectorizer.embed(text).await.unwrap(), vectorizer.vectorize(text));
        assert_eq!(vectorizer.dimensions(), None);
    }

    #[test]
    fn hashed_vectors_have_fixed_width() {
        let vectorizer = HashedTermFrequencyVectorizer::new(64);
        assert_eq!(vectorizer.vectorize("one two three").len(), 64);
        assert_eq!(vectorizer.vectorize("").len(), 64);
        assert!(vectorizer.vectorize("").iter().all(|x| *x == 0.0));
        assert_eq!(vectorizer.dimensions(), Some(64));
    }

    #[test]
    fn hashed_frequencies_sum_to_one() {
        let v = HashedTermFrequencyVectorizer::new(32).vectorize("a b a c, d!");
        let total: f32 = v.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hashed_width_has_a_floor() {
        assert_eq!(HashedTermFrequencyVectorizer::new(0).dimensions(), Some(8));
    }
}
