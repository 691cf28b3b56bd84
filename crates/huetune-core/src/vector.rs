//! Vector math for embedding comparison.

/// Dot product over two equal-length vectors.
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm.
#[must_use]
pub fn magnitude(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity, `dot(a, b) / (|a| * |b|)`.
///
/// Returns `0.0` when either vector has zero magnitude or the lengths
/// differ, so callers never see `NaN`. The result is clamped to
/// `-1.0..=1.0` to absorb rounding error.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let denominator = magnitude(a) * magnitude(b);
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let similarity = dot(a, b) / denominator;
    if similarity.is_nan() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}
