//! Promotions Data

use serde::Deserialize;

/// One listing entry produced by a store fetcher.
///
/// Feeds may carry prices and other metadata; only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPromotion {
    pub name: String,
}

impl NewPromotion {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The trimmed name, or `None` when nothing but whitespace is left.
    pub(crate) fn into_trimmed_name(self) -> Option<String> {
        let trimmed = self.name.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(trimmed.to_string())
    }
}

/// Result of replacing a store's cached snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Nothing usable was supplied; the existing snapshot was left alone.
    Skipped,

    /// The previous snapshot was swapped for a new one.
    Replaced { removed: u64, inserted: u64 },
}
