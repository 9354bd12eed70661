// ============================================================================
// CargoOps Core - Drill-down Workspace
// File: crates/cargoops-core/src/domain/workspace.rs
// Description: Ordered detail tabs with an active-tab pointer
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Identity of a parent business entity (storing-order id, pick-slip id).
pub type EntityId = String;

/// A reference to a parent entity whose child records are being drilled into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub entity_id: EntityId,
    /// Sequence number at which the tab was opened.
    pub opened_at: u64,
    /// Sequence number of the latest child fetch issued for this tab (0 = none).
    pub request_seq: u64,
}

/// Proof that a child fetch was issued for a tab at a given sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub entity_id: EntityId,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceAction {
    Open(EntityId),
    Switch(EntityId),
    Close(EntityId),
}

/// Open tabs in insertion order plus the active tab.
///
/// Invariants: `active` is `None` exactly when there are no tabs, otherwise it
/// names an open tab; tab ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    open_tabs: IndexMap<EntityId, Tab>,
    active: Option<EntityId>,
    seq: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Open (or re-activate) a tab. Returns `true` when a new tab was created.
    pub fn open(&mut self, entity_id: &str) -> bool {
        let created = if self.open_tabs.contains_key(entity_id) {
            false
        } else {
            let opened_at = self.next_seq();
            self.open_tabs.insert(
                entity_id.to_string(),
                Tab {
                    entity_id: entity_id.to_string(),
                    opened_at,
                    request_seq: 0,
                },
            );
            true
        };
        self.active = Some(entity_id.to_string());
        debug!(entity_id, created, tabs = self.open_tabs.len(), "workspace open");
        created
    }

    /// Activate an already-open tab. Unknown ids are ignored.
    pub fn switch(&mut self, entity_id: &str) -> bool {
        if !self.open_tabs.contains_key(entity_id) {
            debug!(entity_id, "workspace switch ignored: tab not open");
            return false;
        }
        self.active = Some(entity_id.to_string());
        true
    }

    /// Close a tab. When the active tab goes, the tab that followed it takes
    /// over, else the new last tab, else nothing.
    pub fn close(&mut self, entity_id: &str) -> bool {
        let Some(index) = self.open_tabs.get_index_of(entity_id) else {
            return false;
        };
        self.open_tabs.shift_remove_index(index);

        if self.active.as_deref() == Some(entity_id) {
            self.active = self
                .open_tabs
                .get_index(index)
                .or_else(|| self.open_tabs.last())
                .map(|(id, _)| id.clone());
        }
        debug!(entity_id, active = ?self.active, tabs = self.open_tabs.len(), "workspace close");
        true
    }

    pub fn apply(&mut self, action: &WorkspaceAction) {
        match action {
            WorkspaceAction::Open(id) => {
                self.open(id);
            }
            WorkspaceAction::Switch(id) => {
                self.switch(id);
            }
            WorkspaceAction::Close(id) => {
                self.close(id);
            }
        }
    }

    /// Record a new child fetch for an open tab and hand out its ticket.
    pub fn begin_fetch(&mut self, entity_id: &str) -> Option<FetchTicket> {
        if !self.open_tabs.contains_key(entity_id) {
            return None;
        }
        let seq = self.next_seq();
        let tab = self.open_tabs.get_mut(entity_id)?;
        tab.request_seq = seq;
        Some(FetchTicket {
            entity_id: entity_id.to_string(),
            seq,
        })
    }

    /// Whether a fetch result may still be applied: the tab is open and no
    /// newer fetch was issued for it since.
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        self.open_tabs
            .get(&ticket.entity_id)
            .is_some_and(|tab| tab.request_seq == ticket.seq)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn tab(&self, entity_id: &str) -> Option<&Tab> {
        self.open_tabs.get(entity_id)
    }

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.open_tabs.values()
    }

    pub fn tab_ids(&self) -> Vec<&str> {
        self.open_tabs.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.open_tabs.contains_key(entity_id)
    }

    pub fn len(&self) -> usize {
        self.open_tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_tabs.is_empty()
    }

    pub fn is_consistent(&self) -> bool {
        match &self.active {
            None => self.open_tabs.is_empty(),
            Some(id) => self.open_tabs.contains_key(id),
        }
    }
}

/// Pure reducer form of the workspace operations.
pub fn reduce(workspace: &Workspace, action: WorkspaceAction) -> Workspace {
    let mut next = workspace.clone();
    next.apply(&action);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(ids: &[&str]) -> Workspace {
        let mut ws = Workspace::new();
        for id in ids {
            ws.open(id);
        }
        ws
    }

    #[test]
    fn test_open_twice_keeps_one_tab() {
        let mut ws = Workspace::new();
        assert!(ws.open("sto-1"));
        assert!(!ws.open("sto-1"));
        assert_eq!(ws.tab_ids(), vec!["sto-1"]);
        assert_eq!(ws.active(), Some("sto-1"));
    }

    #[test]
    fn test_reopen_reactivates_without_moving() {
        let mut ws = opened(&["a", "b", "c"]);
        ws.open("a");
        assert_eq!(ws.tab_ids(), vec!["a", "b", "c"]);
        assert_eq!(ws.active(), Some("a"));
    }

    #[test]
    fn test_switch_unknown_is_noop() {
        let mut ws = opened(&["a", "b"]);
        assert!(!ws.switch("zzz"));
        assert_eq!(ws.active(), Some("b"));
        assert!(ws.switch("a"));
        assert_eq!(ws.active(), Some("a"));
    }

    #[test]
    fn test_close_active_prefers_next_tab() {
        let mut ws = opened(&["a", "b", "c"]);
        ws.switch("b");
        ws.close("b");
        assert_eq!(ws.active(), Some("c"));
        assert_eq!(ws.tab_ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_close_active_last_falls_back_to_new_last() {
        let mut ws = opened(&["a", "b", "c"]);
        ws.close("c");
        assert_eq!(ws.active(), Some("b"));
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut ws = opened(&["a", "b", "c"]);
        ws.close("a");
        assert_eq!(ws.active(), Some("c"));
        assert_eq!(ws.tab_ids(), vec!["b", "c"]);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut ws = opened(&["a"]);
        let before = ws.clone();
        assert!(!ws.close("b"));
        assert_eq!(ws, before);
    }

    #[test]
    fn test_close_only_tab_empties_workspace() {
        let mut ws = opened(&["a"]);
        ws.close("a");
        assert!(ws.is_empty());
        assert_eq!(ws.active(), None);
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let ws = opened(&["a"]);
        let next = reduce(&ws, WorkspaceAction::Open("b".into()));
        assert_eq!(ws.tab_ids(), vec!["a"]);
        assert_eq!(next.tab_ids(), vec!["a", "b"]);
        assert_eq!(next.active(), Some("b"));
    }

    #[test]
    fn test_ticket_rejected_after_close() {
        let mut ws = opened(&["sto-1"]);
        let ticket = ws.begin_fetch("sto-1").unwrap();
        assert!(ws.accepts(&ticket));
        ws.close("sto-1");
        assert!(!ws.accepts(&ticket));
    }

    #[test]
    fn test_ticket_rejected_after_reopen() {
        let mut ws = opened(&["sto-1"]);
        let stale = ws.begin_fetch("sto-1").unwrap();
        ws.close("sto-1");
        ws.open("sto-1");
        assert!(!ws.accepts(&stale));
        let fresh = ws.begin_fetch("sto-1").unwrap();
        assert!(ws.accepts(&fresh));
    }

    #[test]
    fn test_newer_fetch_supersedes_older() {
        let mut ws = opened(&["sto-1"]);
        let first = ws.begin_fetch("sto-1").unwrap();
        let second = ws.begin_fetch("sto-1").unwrap();
        assert!(second.seq > first.seq);
        assert!(!ws.accepts(&first));
        assert!(ws.accepts(&second));
    }

    #[test]
    fn test_begin_fetch_requires_open_tab() {
        let mut ws = Workspace::new();
        assert!(ws.begin_fetch("ghost").is_none());
    }
}

#[cfg(test)]
mod properties {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn entity_id() -> impl Strategy<Value = EntityId> {
        prop_oneof![Just("sto-1"), Just("sto-2"), Just("sto-3"), Just("ps-1"), Just("ps-2")].prop_map(str::to_string)
    }

    fn action() -> impl Strategy<Value = WorkspaceAction> {
        prop_oneof![
            entity_id().prop_map(WorkspaceAction::Open),
            entity_id().prop_map(WorkspaceAction::Switch),
            entity_id().prop_map(WorkspaceAction::Close),
        ]
    }

    /// Workspaces reachable from empty through any action sequence.
    fn workspace() -> impl Strategy<Value = Workspace> {
        prop::collection::vec(action(), 0..40)
            .prop_map(|actions| actions.into_iter().fold(Workspace::new(), |ws, a| reduce(&ws, a)))
    }

    proptest! {
        #[test]
        fn prop_every_step_keeps_invariants(actions in prop::collection::vec(action(), 0..60)) {
            let mut ws = Workspace::new();
            for action in actions {
                ws = reduce(&ws, action);
                prop_assert!(ws.is_consistent());
                let unique: HashSet<&str> = ws.tab_ids().into_iter().collect();
                prop_assert_eq!(unique.len(), ws.len());
            }
        }

        #[test]
        fn prop_open_twice_yields_one_active_tab(ws in workspace(), id in entity_id()) {
            let once = reduce(&ws, WorkspaceAction::Open(id.clone()));
            let twice = reduce(&once, WorkspaceAction::Open(id.clone()));
            prop_assert_eq!(twice.tab_ids().into_iter().filter(|t| *t == id.as_str()).count(), 1);
            prop_assert_eq!(twice.active(), Some(id.as_str()));
            prop_assert_eq!(twice.tab_ids(), once.tab_ids());
        }

        #[test]
        fn prop_closing_active_among_many_picks_a_prior_tab(ws in workspace()) {
            prop_assume!(ws.len() >= 2);
            let active = ws.active().map(str::to_string);
            prop_assert!(active.is_some());
            let active = active.unwrap_or_default();

            let next = reduce(&ws, WorkspaceAction::Close(active.clone()));
            let new_active = next.active();
            prop_assert!(new_active.is_some());
            let new_active = new_active.unwrap_or_default();
            prop_assert!(ws.contains(new_active));
            prop_assert_ne!(new_active, active.as_str());
            prop_assert_eq!(next.len(), ws.len() - 1);
        }

        #[test]
        fn prop_closing_only_tab_empties(ws in workspace(), id in entity_id()) {
            let single = ws
                .tab_ids()
                .into_iter()
                .filter(|t| *t != id.as_str())
                .fold(reduce(&ws, WorkspaceAction::Open(id.clone())), |acc, other| {
                    reduce(&acc, WorkspaceAction::Close(other.to_string()))
                });
            prop_assert_eq!(single.tab_ids(), vec![id.as_str()]);

            let empty = reduce(&single, WorkspaceAction::Close(id.clone()));
            prop_assert!(empty.is_empty());
            prop_assert_eq!(empty.active(), None);
        }
    }
}
