//! Cosine similarity with per-pair dimension reconciliation, and top-k ranking.

use tracing::trace;

/// Right-pad `vector` with zeros to `len`. Vectors already at least `len`
/// long are returned unchanged.
pub fn pad_to_len(vector: &[f32], len: usize) -> Vec<f32> {
    let mut padded = vector.to_vec();
    if padded.len() < len {
        padded.resize(len, 0.0);
    }
    padded
}

/// Compute cosine similarity between two vectors of possibly different length.
///
/// The shorter vector is treated as zero-padded to the longer one. Returns
/// exactly 0.0 if either vector has zero magnitude (including empty vectors)
/// or the result is not finite. Sums are accumulated in `f64`, so any finite
/// `f32` input stays within range.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().max(b.len());
    let (a, b) = (pad_to_len(a, len), pad_to_len(b, len));

    let dot: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum();
    let norm_a: f64 = a.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let similarity = dot / (norm_a * norm_b);
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0) as f32
}

/// A candidate for ranking: an id, its vector, and the payload returned on a hit.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    /// Identifier of the candidate.
    pub id: String,
    /// The candidate's embedding.
    pub vector: Vec<f32>,
    /// Carried through to the output untouched.
    pub payload: T,
}

/// Rank `candidates` by cosine similarity to `probe`, most similar first.
///
/// Ties keep their input order. At most `k` results are returned; `k = 0`
/// returns nothing.
pub fn rank<T>(probe: &[f32], candidates: Vec<Candidate<T>>, k: usize) -> Vec<(T, f32)> {
    if k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(T, f32)> = candidates
        .into_iter()
        .map(|candidate| {
            let similarity = cosine_similarity(probe, &candidate.vector);
            trace!(id = %candidate.id, similarity, "scored candidate");
            (candidate.payload, similarity)
        })
        .collect();

    // sort_by is stable; similarities are always finite
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);
    scored
}
