// ============================================================================
// CargoOps Core - Role Allow-Lists
// File: crates/cargoops-core/src/domain/role.rs
// Description: Menu keys each role may open
// ============================================================================

use std::collections::{BTreeSet, HashMap};

use cargoops_shared::constants::ADMIN_ROLE;
use tracing::warn;

use super::menu::MenuTree;

/// Menu keys each role may open.
///
/// Unknown roles resolve to nothing. The admin list is always derived from the
/// menu tree at construction and cannot be supplied by callers.
#[derive(Debug, Clone, Default)]
pub struct RoleAllowList {
    lists: HashMap<String, BTreeSet<String>>,
}

impl RoleAllowList {
    /// Built-in roles of the warehouse console.
    pub fn builtin(tree: &MenuTree) -> Self {
        Self::from_entries(
            tree,
            [
                ("receiver", vec!["receiving", "receiving/soreceiving"]),
                ("tq_employee", vec!["tq", "tq/package"]),
                ("binner", vec!["binning", "binning/assign"]),
            ]
            .into_iter()
            .map(|(role, keys)| (role.to_string(), keys.into_iter().map(str::to_string).collect())),
        )
    }

    pub fn from_entries<I>(tree: &MenuTree, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut allow = Self::default();
        for (role, keys) in entries {
            allow.set_role(tree, role, keys);
        }
        allow.lists.insert(ADMIN_ROLE.to_string(), tree.keys().map(str::to_string).collect());
        allow
    }

    /// Replace (or add) role lists from configuration.
    pub fn with_overrides(mut self, tree: &MenuTree, overrides: &HashMap<String, Vec<String>>) -> Self {
        for (role, keys) in overrides {
            self.set_role(tree, role.clone(), keys.clone());
        }
        self
    }

    fn set_role(&mut self, tree: &MenuTree, role: String, keys: Vec<String>) {
        if role == ADMIN_ROLE {
            warn!("Ignoring explicit allow-list for '{}': derived from the menu tree", ADMIN_ROLE);
            return;
        }

        let mut allowed = BTreeSet::new();
        for key in keys {
            if tree.contains(&key) {
                allowed.insert(key);
            } else {
                warn!("Dropping unknown menu key '{}' from role '{}'", key, role);
            }
        }
        self.lists.insert(role, allowed);
    }

    pub fn keys_for(&self, role: &str) -> Option<&BTreeSet<String>> {
        self.lists.get(role)
    }

    pub fn allows(&self, role: &str, menu_key: &str) -> bool {
        self.lists
            .get(role)
            .is_some_and(|keys| keys.contains(menu_key))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }
}
