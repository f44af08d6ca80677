//! Shared test infrastructure.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use logs::CapturedLogs;
