// ============================================================================
// CargoOps Core - Session
// File: crates/cargoops-core/src/domain/session.rs
// Description: Actor identity resolved at sign-in
// ============================================================================

use std::fmt;

use cargoops_shared::utils::mask_credential;
use uuid::Uuid;

/// Actor identity resolved at sign-in, held until sign-out.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub role: String,
    pub employee_id: String,
    credential: String,
}

impl Session {
    pub fn new(role: impl Into<String>, employee_id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: role.into(),
            employee_id: employee_id.into(),
            credential: credential.into(),
        }
    }

    /// Opaque API credential, sent as-is on every request.
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("employee_id", &self.employee_id)
            .field("credential", &mask_credential(&self.credential))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credential() {
        let session = Session::new("binner", "EMP-7", "sk-live-0123456789");
        let rendered = format!("{:?}", session);
        assert!(rendered.contains("sk-l***"));
        assert!(!rendered.contains("0123456789"));
        assert_eq!(session.credential(), "sk-live-0123456789");
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = Session::new("admin", "1", "x");
        let b = Session::new("admin", "1", "x");
        assert_ne!(a.id, b.id);
    }
}
