// ============================================================================
// CargoOps Core - Domain Errors
// File: crates/cargoops-core/src/error.rs
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Role '{role}' is not allowed to open '{menu_key}'")]
    PermissionDenied { role: String, menu_key: String },

    #[error("Network error{}: {message}", status_suffix(.status))]
    Network { status: Option<u16>, message: String },

    #[error("Malformed payload for {record}: {reason}")]
    MalformedPayload { record: String, reason: String },

    #[error("Invalid transition: expected {expected}, got {received}")]
    InvalidTransition { expected: String, received: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl DomainError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        DomainError::Network { status, message: message.into() }
    }

    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::MalformedPayload { record: record.into(), reason: reason.into() }
    }

    /// HTTP-like status code carried by network failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display_with_and_without_status() {
        let with = DomainError::network(Some(503), "upstream down");
        assert_eq!(with.to_string(), "Network error (503): upstream down");
        assert_eq!(with.status(), Some(503));

        let without = DomainError::network(None, "timed out");
        assert_eq!(without.to_string(), "Network error: timed out");
        assert_eq!(without.status(), None);
    }
}
