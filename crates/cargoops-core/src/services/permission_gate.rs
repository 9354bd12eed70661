// ============================================================================
// CargoOps Core - Role Permission Gate
// File: crates/cargoops-core/src/services/permission_gate.rs
// Description: Allow/deny menu keys for the signed-in role
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::{MenuTree, RoleAllowList};
use crate::error::DomainError;

/// A menu item as rendered: disabled items stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    pub depth: usize,
    pub enabled: bool,
}

/// Gate bound to one session's role.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    allow: Arc<RoleAllowList>,
    role: String,
}

impl PermissionGate {
    pub fn new(allow: Arc<RoleAllowList>, role: impl Into<String>) -> Self {
        Self {
            allow,
            role: role.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// `isAllowed(role, key)` for an arbitrary role.
    pub fn is_allowed(&self, role: &str, menu_key: &str) -> bool {
        self.allow.allows(role, menu_key)
    }

    pub fn permits(&self, menu_key: &str) -> bool {
        self.is_allowed(&self.role, menu_key)
    }

    pub fn check(&self, menu_key: &str) -> Result<(), DomainError> {
        if self.permits(menu_key) {
            return Ok(());
        }
        warn!(role = %self.role, menu_key, "Menu access denied");
        Err(DomainError::PermissionDenied {
            role: self.role.clone(),
            menu_key: menu_key.to_string(),
        })
    }

    /// Flattened menu in tree order with per-item enablement.
    pub fn menu_entries(&self, tree: &MenuTree) -> Vec<MenuEntry> {
        tree.walk()
            .into_iter()
            .map(|(depth, node)| MenuEntry {
                key: node.key.clone(),
                label: node.label.clone(),
                depth,
                enabled: self.permits(&node.key),
            })
            .collect()
    }
}
