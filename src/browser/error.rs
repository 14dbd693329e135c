//! Error types for browser operations.

use thiserror::Error;

use crate::error::IllegalStateError;
use crate::network::FetchError;

/// Error type for [`InterfaceBrowser`](super::InterfaceBrowser) operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser is closed.
    #[error(transparent)]
    IllegalState(#[from] IllegalStateError),

    /// The native collaborator failed to acquire or enumerate.
    #[error("Native operation failed: {0}")]
    NativeOperationFailed(#[source] FetchError),
}

impl BrowserError {
    /// Returns true for [`BrowserError::IllegalState`].
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}

impl From<FetchError> for BrowserError {
    fn from(error: FetchError) -> Self {
        Self::NativeOperationFailed(error)
    }
}
