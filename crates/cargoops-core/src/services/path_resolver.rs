// ============================================================================
// CargoOps Core - Path Resolver
// File: crates/cargoops-core/src/services/path_resolver.rs
// Description: Maps a route path onto a menu key, breadcrumb and title
// ============================================================================

use cargoops_shared::constants::{DEFAULT_MENU_KEY, FALLBACK_PAGE_TITLE, HOME_CRUMB};

use crate::domain::{MenuTree, NavigationState};

/// Resolve a raw path. Total: every input yields a state.
///
/// Only the first two non-empty segments take part in the key; deeper
/// segments are kept in `path_segments` but ignored by the menu.
pub fn resolve(path: &str, tree: &MenuTree) -> NavigationState {
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    let resolved_menu_key = match segments.as_slice() {
        [] => DEFAULT_MENU_KEY.to_string(),
        [only] => only.clone(),
        [first, second, ..] => format!("{}/{}", first, second),
    };

    let mut breadcrumb = vec![HOME_CRUMB.to_string()];
    if let Some(first) = segments.first() {
        breadcrumb.push(tree.label(first).unwrap_or(first).to_string());
    }
    if let [first, second, ..] = segments.as_slice() {
        let key = format!("{}/{}", first, second);
        breadcrumb.push(tree.label(&key).unwrap_or(second).to_string());
    }

    let title = tree
        .label(&resolved_menu_key)
        .unwrap_or(FALLBACK_PAGE_TITLE)
        .to_string();

    NavigationState {
        path_segments: segments,
        resolved_menu_key,
        breadcrumb,
        title,
    }
}
