//! Errors shared across modules.

use thiserror::Error;

/// An operation was attempted in a state that does not permit it.
///
/// Signals a programming error in the caller: reading a closed browser, or
/// asking for data the running platform never provides. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Illegal state: {reason}")]
pub struct IllegalStateError {
    reason: String,
}

impl IllegalStateError {
    /// Creates an error with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The browser has already been closed.
    #[must_use]
    pub fn closed() -> Self {
        Self::new("interface browser is closed")
    }

    /// The accessed field only exists on another platform.
    #[must_use]
    pub fn unsupported_on_platform(field: &str) -> Self {
        Self::new(format!(
            "{field} is not available on {}",
            std::env::consts::OS
        ))
    }

    /// Returns the reason text.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_message() {
        assert_eq!(
            IllegalStateError::closed().to_string(),
            "Illegal state: interface browser is closed"
        );
    }

    #[test]
    fn platform_message_names_field_and_os() {
        let err = IllegalStateError::unsupported_on_platform("platform UUID");
        assert!(err.reason().starts_with("platform UUID is not available on "));
        assert!(err.reason().ends_with(std::env::consts::OS));
    }
}
