//! ============================================================================
//! DRILL-DOWN VIEW MODEL
//! ============================================================================
//!
//! Parent list with detail tabs, shared by the storing-order list
//! (storing order → packages) and the pick-slip pages (pick slip → pick orders).
//!
//! The view model is pure state: the shell spawns the fetches and feeds the
//! results back through `apply_parents` / `apply_children`.

use std::collections::HashMap;

use cargoops_core::services::{visible_rows, ScopedRows};
use cargoops_core::{
    ChildRecord, DomainError, EntityId, FetchOutcome, FetchTicket, ParentRecord, RecordSet, Workspace,
};
use tracing::{debug, warn};

use crate::notice::{Notice, Notices};

pub struct DrillDownViewModel<P, C> {
    parents: RecordSet<P>,
    /// Child sets per open tab; entries live exactly as long as their tab.
    children: HashMap<EntityId, RecordSet<C>>,
    workspace: Workspace,
    /// Sequence of the newest parent refresh; older results are dropped.
    refresh_seq: u64,
    filter: String,
    idle: RecordSet<C>,
}

impl<P, C> Default for DrillDownViewModel<P, C> {
    fn default() -> Self {
        Self {
            parents: RecordSet::new(),
            children: HashMap::new(),
            workspace: Workspace::new(),
            refresh_seq: 0,
            filter: String::new(),
            idle: RecordSet::new(),
        }
    }
}

fn skipped_notice(skipped: usize, what: &str, notices: &mut Notices) {
    if skipped > 0 {
        notices.push(Notice::warning(format!("{} {} record(s) could not be read", skipped, what)));
    }
}

impl<P: ParentRecord, C: ChildRecord> DrillDownViewModel<P, C> {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Parent list
    // ------------------------------------------------------------------------

    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_seq += 1;
        self.parents.start_loading();
        self.refresh_seq
    }

    /// Returns `false` when a newer refresh has been issued since `seq`.
    pub fn apply_parents(
        &mut self,
        seq: u64,
        result: Result<FetchOutcome<P>, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        if seq != self.refresh_seq {
            warn!(seq, current = self.refresh_seq, "Discarding superseded parent list");
            return false;
        }
        match result {
            Ok(outcome) => {
                skipped_notice(outcome.skipped.len(), "list", notices);
                debug!(rows = outcome.rows.len(), "Parent list loaded");
                self.parents.finish(outcome.rows);
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                self.parents.fail(e.to_string());
            }
        }
        true
    }

    pub fn parents(&self) -> &RecordSet<P> {
        &self.parents
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.trim().to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Parent rows whose id contains the filter text (case-insensitive).
    pub fn filtered_parents(&self) -> Vec<&P> {
        let needle = self.filter.to_lowercase();
        self.parents
            .rows()
            .iter()
            .filter(|p| needle.is_empty() || p.entity_id().to_lowercase().contains(&needle))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------------

    /// Open or re-activate a tab. A fetch ticket is returned only when the
    /// tab has no child data yet.
    pub fn open(&mut self, entity_id: &str) -> Option<FetchTicket> {
        let created = self.workspace.open(entity_id);
        if !created {
            return None;
        }
        self.fetch_children(entity_id)
    }

    /// Re-fetch the children of an open tab.
    pub fn fetch_children(&mut self, entity_id: &str) -> Option<FetchTicket> {
        let ticket = self.workspace.begin_fetch(entity_id)?;
        self.children
            .entry(entity_id.to_string())
            .or_default()
            .start_loading();
        Some(ticket)
    }

    pub fn switch(&mut self, entity_id: &str) -> bool {
        self.workspace.switch(entity_id)
    }

    pub fn close(&mut self, entity_id: &str) -> bool {
        let closed = self.workspace.close(entity_id);
        if closed {
            self.children.remove(entity_id);
        }
        closed
    }

    /// Attach a child fetch result, unless its tab was closed or re-fetched.
    pub fn apply_children(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FetchOutcome<C>, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        if !self.workspace.accepts(ticket) {
            warn!(entity_id = %ticket.entity_id, seq = ticket.seq, "Discarding stale child rows");
            return false;
        }
        let Some(set) = self.children.get_mut(&ticket.entity_id) else {
            return false;
        };
        match result {
            Ok(outcome) => {
                skipped_notice(outcome.skipped.len(), "detail", notices);
                set.finish(outcome.rows);
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                set.fail(e.to_string());
            }
        }
        true
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn active(&self) -> Option<&str> {
        self.workspace.active()
    }

    /// Child rows for the active tab.
    pub fn visible_children(&self) -> ScopedRows<'_, C> {
        let set = self
            .workspace
            .active()
            .and_then(|id| self.children.get(id))
            .unwrap_or(&self.idle);
        visible_rows(set, self.workspace.active())
    }

    pub fn has_children_for(&self, entity_id: &str) -> bool {
        self.children.contains_key(entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargoops_core::LoadStatus;

    #[derive(Debug, Clone, PartialEq)]
    struct Slip(&'static str);
    impl ParentRecord for Slip {
        fn entity_id(&self) -> &str {
            self.0
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Order {
        id: &'static str,
        slip: &'static str,
    }
    impl ChildRecord for Order {
        fn parent_ref(&self) -> &str {
            self.slip
        }
    }

    fn orders(rows: Vec<Order>) -> Result<FetchOutcome<Order>, DomainError> {
        Ok(FetchOutcome::new(rows))
    }

    #[test]
    fn test_only_newest_refresh_applies() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        let mut notices = Notices::new();
        let first = vm.begin_refresh();
        let second = vm.begin_refresh();

        assert!(vm.apply_parents(second, Ok(FetchOutcome::new(vec![Slip("PS-2")])), &mut notices));
        assert!(!vm.apply_parents(first, Ok(FetchOutcome::new(vec![Slip("PS-1")])), &mut notices));
        assert_eq!(vm.parents().rows(), &[Slip("PS-2")]);
    }

    #[test]
    fn test_reopen_does_not_refetch() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        assert!(vm.open("PS-1").is_some());
        assert!(vm.open("PS-1").is_none());
    }

    #[test]
    fn test_children_scoped_and_dropped_on_close() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        let mut notices = Notices::new();
        let ticket = vm.open("PS-1").unwrap();
        assert!(vm.visible_children().status.is_loading());

        let rows = vec![
            Order { id: "PO-1", slip: "PS-1" },
            Order { id: "PO-9", slip: "PS-9" },
        ];
        assert!(vm.apply_children(&ticket, orders(rows), &mut notices));
        let visible = vm.visible_children();
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].id, "PO-1");

        vm.close("PS-1");
        assert!(!vm.has_children_for("PS-1"));
        assert_eq!(vm.visible_children().status, &LoadStatus::Idle);
    }

    #[test]
    fn test_late_children_after_close_discarded() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        let mut notices = Notices::new();
        let ticket = vm.open("PS-1").unwrap();
        vm.close("PS-1");

        let applied = vm.apply_children(&ticket, orders(vec![Order { id: "PO-1", slip: "PS-1" }]), &mut notices);
        assert!(!applied);
        assert!(!vm.has_children_for("PS-1"));
    }

    #[test]
    fn test_failed_children_show_failure() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        let mut notices = Notices::new();
        let ticket = vm.open("PS-1").unwrap();
        vm.apply_children(&ticket, Err(DomainError::network(Some(502), "bad gateway")), &mut notices);

        let visible = vm.visible_children();
        assert!(visible.is_empty());
        assert!(visible.status.is_failed());
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_filter_matches_id_substring() {
        let mut vm: DrillDownViewModel<Slip, Order> = DrillDownViewModel::new();
        let mut notices = Notices::new();
        let seq = vm.begin_refresh();
        vm.apply_parents(seq, Ok(FetchOutcome::new(vec![Slip("PS-100"), Slip("PS-200")])), &mut notices);

        vm.set_filter(" ps-1 ");
        assert_eq!(vm.filtered_parents(), vec![&Slip("PS-100")]);
        vm.set_filter("");
        assert_eq!(vm.filtered_parents().len(), 2);
    }
}
