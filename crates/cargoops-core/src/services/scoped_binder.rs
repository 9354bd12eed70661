// ============================================================================
// CargoOps Core - Scoped Data Binder
// File: crates/cargoops-core/src/services/scoped_binder.rs
// Description: The active tab's slice of a child record set
// ============================================================================

use crate::domain::{ChildRecord, LoadStatus, RecordSet};

/// Rows for the active tab plus the set's load status, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedRows<'a, R> {
    pub rows: Vec<&'a R>,
    pub status: &'a LoadStatus,
}

impl<R> ScopedRows<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows whose `parent_ref` matches the active entity, in fetch order.
///
/// Loading and failed sets yield no rows. Never mutates the set.
pub fn visible_rows<'a, R: ChildRecord>(set: &'a RecordSet<R>, active: Option<&str>) -> ScopedRows<'a, R> {
    let rows = match (active, set.status()) {
        (Some(active), LoadStatus::Ready) => set
            .rows()
            .iter()
            .filter(|row| row.parent_ref() == active)
            .collect(),
        _ => Vec::new(),
    };
    ScopedRows {
        rows,
        status: set.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: u32,
        parent: &'static str,
    }

    impl ChildRecord for Row {
        fn parent_ref(&self) -> &str {
            self.parent
        }
    }

    fn set() -> RecordSet<Row> {
        RecordSet::ready(vec![
            Row { id: 1, parent: "sto-1" },
            Row { id: 2, parent: "sto-2" },
            Row { id: 3, parent: "sto-1" },
        ])
    }

    #[test]
    fn test_no_active_tab_yields_nothing() {
        let set = set();
        assert!(visible_rows(&set, None).is_empty());
    }

    #[test]
    fn test_filters_in_fetch_order() {
        let set = set();
        let scoped = visible_rows(&set, Some("sto-1"));
        let ids: Vec<_> = scoped.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(scoped.status, &LoadStatus::Ready);
    }

    #[test]
    fn test_loading_and_failed_pass_status_through() {
        let mut set = set();
        set.start_loading();
        let scoped = visible_rows(&set, Some("sto-1"));
        assert!(scoped.is_empty());
        assert!(scoped.status.is_loading());

        set.fail("503");
        let scoped = visible_rows(&set, Some("sto-1"));
        assert!(scoped.is_empty());
        assert!(scoped.status.is_failed());
    }
}
