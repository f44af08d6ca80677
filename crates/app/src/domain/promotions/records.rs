//! Promotions Records

use jiff::civil::Date;

use crate::domain::stores::Store;

/// Row id of a cached promotion. Ids grow with insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromotionId(i64);

impl PromotionId {
    #[must_use]
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }
}

/// Promotion Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRecord {
    pub id: PromotionId,
    pub name: String,
    pub store: Store,
    pub captured_on: Date,
}
