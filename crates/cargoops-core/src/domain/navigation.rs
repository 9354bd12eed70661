// ============================================================================
// CargoOps Core - Navigation State
// File: crates/cargoops-core/src/domain/navigation.rs
// Description: Where the console is, derived from the current path
// ============================================================================

use serde::Serialize;

/// Snapshot of where the console is. Rebuilt on every path change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub path_segments: Vec<String>,
    pub resolved_menu_key: String,
    pub breadcrumb: Vec<String>,
    pub title: String,
}

impl NavigationState {
    /// Canonical path for the resolved key (`"/binning/assign"`).
    pub fn path(&self) -> String {
        format!("/{}", self.resolved_menu_key)
    }
}
