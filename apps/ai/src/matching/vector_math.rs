//! Pure numeric routines for the matcher: cosine similarity and score normalization.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VectorError {
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Cosine of the angle between `a` and `b`, in [-1, 1].
///
/// Returns `Ok(0.0)` when either vector has zero norm (including empty vectors).
/// Accumulates in f64 so long provider vectors don't drift.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Maps similarity in [-1, 1] to a 0–100 match score.
pub fn normalize_to_score(similarity: f64) -> f64 {
    ((similarity + 1.0) * 50.0).clamp(0.0, 100.0)
}

/// Maps similarity in [-1, 1] to a 0–1 relevance.
pub fn normalize_to_relevance(similarity: f64) -> f64 {
    ((similarity + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
