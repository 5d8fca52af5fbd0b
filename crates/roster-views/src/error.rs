use roster_core::ConfigurationError;
use roster_sources::{InvalidQueryError, UpstreamFetchError};
use thiserror::Error;
use tracing::warn;

/// What every failed view shows the operator
pub const USER_FACING_ERROR: &str = "Failed to fetch customers";

/// Adapter failure. Any variant fails the whole view.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamFetchError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQueryError),
}

impl ViewError {
    /// Wrap a source failure, noting which source gave up
    pub(crate) fn upstream(err: UpstreamFetchError) -> Self {
        warn!(source = err.source_name(), error = %err, "source fetch failed");
        ViewError::Upstream(err)
    }

    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}
