use std::collections::HashSet;

/// A single accepted review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub rating: f32,
    pub text: String,
}

/// Run-wide accumulator: reviews in first-seen order plus the set of their ids.
///
/// Shared across all filters — a review seen under one filter is skipped if it
/// shows up again under another. Grows monotonically, never shrinks.
#[derive(Debug, Default)]
pub struct ReviewLedger {
    records: Vec<Review>,
    seen: HashSet<String>,
}

impl ReviewLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Append a review. Caller checks `contains` first; a duplicate push is a bug.
    pub fn push(&mut self, review: Review) {
        debug_assert!(!self.seen.contains(&review.id));
        self.seen.insert(review.id.clone());
        self.records.push(review);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All accepted reviews in insertion order.
    pub fn records(&self) -> &[Review] {
        &self.records
    }
}
