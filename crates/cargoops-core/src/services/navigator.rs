// ============================================================================
// CargoOps Core - Gated Navigator
// File: crates/cargoops-core/src/services/navigator.rs
// Description: Holds the current navigation state; every move passes the gate
// ============================================================================

use std::sync::Arc;

use tracing::debug;

use crate::domain::{MenuTree, NavigationState};
use crate::error::DomainError;
use crate::services::path_resolver::resolve;
use crate::services::permission_gate::{MenuEntry, PermissionGate};

/// Owner of `NavigationState`. A denied move leaves the state untouched.
#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Arc<MenuTree>,
    gate: PermissionGate,
    state: NavigationState,
}

impl Navigator {
    /// Start at the root path (the default menu key).
    pub fn new(tree: Arc<MenuTree>, gate: PermissionGate) -> Self {
        let state = resolve("/", &tree);
        Self { tree, gate, state }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Menu click or direct key invocation.
    pub fn navigate_to_key(&mut self, menu_key: &str) -> Result<&NavigationState, DomainError> {
        self.gate.check(menu_key)?;
        self.state = resolve(&format!("/{}", menu_key), &self.tree);
        debug!(menu_key = %self.state.resolved_menu_key, "Navigated by key");
        Ok(&self.state)
    }

    /// Typed or deep-linked path.
    pub fn navigate_to_path(&mut self, path: &str) -> Result<&NavigationState, DomainError> {
        let next = resolve(path, &self.tree);
        self.gate.check(&next.resolved_menu_key)?;
        debug!(path, menu_key = %next.resolved_menu_key, "Navigated by path");
        self.state = next;
        Ok(&self.state)
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.gate.menu_entries(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoleAllowList;

    fn navigator(role: &str) -> Navigator {
        let tree = Arc::new(MenuTree::warehouse().unwrap());
        let allow = Arc::new(RoleAllowList::builtin(&tree));
        Navigator::new(tree, PermissionGate::new(allow, role))
    }

    #[test]
    fn test_denied_key_leaves_state_unchanged() {
        let mut nav = navigator("binner");
        nav.navigate_to_key("binning/assign").unwrap();
        let before = nav.state().clone();

        let err = nav.navigate_to_key("dispatch/mypacking").unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied { .. }));
        assert_eq!(nav.state(), &before);
    }

    #[test]
    fn test_path_navigation_is_gated() {
        let mut nav = navigator("receiver");
        assert!(nav.navigate_to_path("/binning/assign/extra").is_err());
        assert_eq!(nav.state().resolved_menu_key, "dashboard");

        let state = nav.navigate_to_path("/receiving/soreceiving").unwrap();
        assert_eq!(state.title, "SO Receiving");
    }

    #[test]
    fn test_admin_reaches_every_key() {
        let mut nav = navigator("admin");
        let keys: Vec<String> = nav.tree().keys().map(str::to_string).collect();
        for key in keys {
            assert_eq!(nav.navigate_to_key(&key).unwrap().resolved_menu_key, key);
        }
    }

    #[test]
    fn test_unknown_key_denied_even_for_admin() {
        let mut nav = navigator("admin");
        assert!(nav.navigate_to_key("reports/weekly").is_err());
    }
}
