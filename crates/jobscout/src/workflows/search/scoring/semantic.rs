//! Cosine-similarity scoring over provider embeddings.

/// Maps cosine similarity of two embedding vectors onto the 0-100 score scale.
/// Zero vectors yield 0 instead of dividing by zero.
pub(crate) fn similarity_score(a: &[f32], b: &[f32]) -> u8 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0;
    }

    let similarity = dot / (norm_a * norm_b);
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Truncates on a character boundary so provider payloads stay bounded.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
