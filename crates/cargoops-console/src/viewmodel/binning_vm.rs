//! Bin Assignment ViewModel
//!
//! Package list flattened into per-bin rows, plus on-demand bin allocation.

use cargoops_core::{binned_rows, BinMap, BinnedRow, DomainError, FetchOutcome, Package, RecordSet};

use super::list::SequencedList;
use crate::notice::{Notice, Notices};

pub struct BinningViewModel {
    packages: SequencedList<Package>,
    /// Package whose allocation request is in flight.
    pub allocating: Option<String>,
    /// Most recent successful allocation.
    pub last_allocation: Option<(String, BinMap)>,
}

impl Default for BinningViewModel {
    fn default() -> Self {
        Self {
            packages: SequencedList::new("package"),
            allocating: None,
            last_allocation: None,
        }
    }
}

impl BinningViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.packages.begin_refresh()
    }

    pub fn apply_packages(
        &mut self,
        seq: u64,
        result: Result<FetchOutcome<Package>, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        self.packages.apply(seq, result, notices)
    }

    pub fn packages(&self) -> &RecordSet<Package> {
        self.packages.set()
    }

    /// One row per allocated bin across all packages.
    pub fn rows(&self) -> Vec<BinnedRow> {
        binned_rows(self.packages.rows())
    }

    /// Validate and mark an allocation request as in flight.
    pub fn begin_allocation(&mut self, package_id: &str) -> Result<String, DomainError> {
        let package_id = package_id.trim();
        if package_id.is_empty() {
            return Err(DomainError::Rejected("Enter a package ID first".into()));
        }
        if let Some(pending) = &self.allocating {
            return Err(DomainError::Rejected(format!("Allocation for {} is still running", pending)));
        }
        self.allocating = Some(package_id.to_string());
        Ok(package_id.to_string())
    }

    /// Returns `true` on a successful allocation (the list should be reloaded).
    pub fn apply_allocation(
        &mut self,
        package_id: String,
        result: Result<BinMap, DomainError>,
        notices: &mut Notices,
    ) -> bool {
        if self.allocating.as_deref() == Some(package_id.as_str()) {
            self.allocating = None;
        }
        match result {
            Ok(bins) => {
                notices.push(Notice::success(format!(
                    "Allocated {} bin location(s) for {}",
                    bins.len(),
                    package_id
                )));
                self.last_allocation = Some((package_id, bins));
                true
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                false
            }
        }
    }
}
