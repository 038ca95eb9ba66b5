//! Approximate substring matching.
//!
//! A field's score is the smallest edit distance between the query and any
//! substring of the field, divided by the query length. 0 is an exact
//! occurrence, 1 means nothing lines up.

/// Floor applied to exact matches so they still weigh into a product.
pub const EXACT_MATCH_SCORE: f64 = f64::EPSILON;

/// Minimal edit distance between `pattern` and any substring of `text`.
///
/// Standard DP where the text may start matching at any column, so the
/// first row is all zeros.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = m;

    for &tc in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// A query prepared for repeated scoring.
#[derive(Debug, Clone)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.trim().to_lowercase().chars().collect(),
        }
    }

    /// Keep at most `max_chars` characters of the query.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        self.chars.truncate(max_chars);
        self
    }

    /// The normalized query text.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Normalized score in `[0, 1]` against one field value.
    pub fn score(&self, field: &str) -> f64 {
        if self.chars.is_empty() {
            return 0.0;
        }
        let text: Vec<char> = field.to_lowercase().chars().collect();
        let distance = substring_distance(&self.chars, &text);
        (distance as f64 / self.chars.len() as f64).min(1.0)
    }

    /// Score against a field if it clears `threshold`.
    pub fn matches(&self, field: &str, threshold: f64) -> Option<f64> {
        if field.is_empty() {
            return None;
        }
        let score = self.score(field);
        (score <= threshold).then_some(score)
    }
}

/// Combine per-field scores into one, lower is better.
///
/// `matched` holds `(score, weight)` pairs for the fields that matched;
/// `total_weight` is the sum over every searchable field so weights are
/// normalized the same way for every record.
pub fn combine(matched: &[(f64, f64)], total_weight: f64) -> f64 {
    if matched.is_empty() || total_weight <= 0.0 {
        return 1.0;
    }
    matched
        .iter()
        .map(|&(score, weight)| score.max(EXACT_MATCH_SCORE).powf(weight / total_weight))
        .product()
}
