// ============================================================================
// CargoOps Core - Record Sets
// File: crates/cargoops-core/src/domain/records.rs
// Description: Fetched lists and their load status
// ============================================================================

use serde::Serialize;

/// Where a fetched list stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

/// A record that can be opened as a drill-down tab.
pub trait ParentRecord {
    fn entity_id(&self) -> &str;
}

/// A record that belongs to a parent entity.
pub trait ChildRecord {
    fn parent_ref(&self) -> &str;
}

/// A list owned by a page: rows in fetch order plus load status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSet<R> {
    rows: Vec<R>,
    status: LoadStatus,
}

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            status: LoadStatus::Idle,
        }
    }
}

impl<R> RecordSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(rows: Vec<R>) -> Self {
        Self {
            rows,
            status: LoadStatus::Ready,
        }
    }

    /// Mark as loading. Rows from a previous load are kept until replaced.
    pub fn start_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn finish(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.status = LoadStatus::Ready;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.rows.clear();
        self.status = LoadStatus::Failed(reason.into());
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// In-place edits of fetched rows; the load status is untouched.
    pub fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
