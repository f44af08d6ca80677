//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map storage errors to a logged HTTP error.
pub(crate) trait ResultExt<T> {
    /// Service unavailable, for storage that may recover on retry.
    fn or_503(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_503(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::service_unavailable().brief("Promotions are temporarily unavailable")
        })
    }
}
