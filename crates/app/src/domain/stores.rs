//! Supported Stores

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Retailers whose promotion listings are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Kaufland,
    Lidl,
}

impl Store {
    /// Every supported store, in refresh order.
    pub const ALL: [Self; 2] = [Self::Kaufland, Self::Lidl];

    /// Identifier persisted in the `store` column and accepted from forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kaufland => "kaufland",
            Self::Lidl => "lidl",
        }
    }

    /// Human-readable retailer name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Kaufland => "Kaufland",
            Self::Lidl => "Lidl",
        }
    }
}

impl Display for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown store identifier \"{0}\"")]
pub struct UnknownStoreError(pub String);

impl FromStr for Store {
    type Err = UnknownStoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        Self::ALL
            .into_iter()
            .find(|store| store.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStoreError(trimmed.to_string()))
    }
}
