//! Package Quality Check ViewModel
//!
//! Package list for technical query, a looked-up package and its pass/fail
//! verdict.

use cargoops_core::{
    find_package, DomainError, FetchOutcome, Package, PackageSummary, QualityCheck, QualityFlag, RecordSet,
};

use super::list::SequencedList;
use crate::notice::{Notice, Notices};

pub struct QualityCheckViewModel {
    packages: SequencedList<Package>,
    /// Package found by the last search.
    pub selected: Option<PackageSummary>,
    /// Verdict waiting for the server.
    pub submitting: Option<QualityCheck>,
}

impl Default for QualityCheckViewModel {
    fn default() -> Self {
        Self {
            packages: SequencedList::new("package"),
            selected: None,
            submitting: None,
        }
    }
}

impl QualityCheckViewModel {
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

    /// Select a package from the loaded list. Unknown ids warn and clear the selection.
    pub fn search(&mut self, package_id: &str, notices: &mut Notices) -> bool {
        match find_package(self.packages.rows(), package_id) {
            Ok(summary) => {
                if !summary.awaiting_check() {
                    notices.push(Notice::info(format!(
                        "{} is {}, not ready for a quality check",
                        summary.package_id, summary.status
                    )));
                }
                self.selected = Some(summary);
                true
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                self.selected = None;
                false
            }
        }
    }

    pub fn begin_check(&mut self, flag: QualityFlag, employee_id: &str) -> Result<QualityCheck, DomainError> {
        if let Some(pending) = &self.submitting {
            return Err(DomainError::Rejected(format!(
                "Quality check for {} is still running",
                pending.package_id
            )));
        }
        let package_id = self.selected.as_ref().map(|p| p.package_id.as_str()).unwrap_or_default();
        let check = QualityCheck::new(package_id, employee_id, flag)?;
        self.submitting = Some(check.clone());
        Ok(check)
    }

    /// Returns `true` when the verdict was recorded (the list should be reloaded).
    pub fn apply_check(
        &mut self,
        check: QualityCheck,
        result: Result<(), DomainError>,
        notices: &mut Notices,
    ) -> bool {
        if self.submitting.as_ref() == Some(&check) {
            self.submitting = None;
        }
        match result {
            Ok(()) => {
                notices.push(Notice::success(format!(
                    "Quality check {} recorded for {}",
                    check.flag, check.package_id
                )));
                if self.selected.as_ref().is_some_and(|p| p.package_id == check.package_id) {
                    self.selected = None;
                }
                true
            }
            Err(e) => {
                notices.push(Notice::from_error(&e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use cargoops_core::{Dimensions, READY_FOR_TQ};

    fn package(id: &str, status: &str) -> Package {
        Package {
            package_id: id.to_string(),
            storing_order_id: "SO-1".into(),
            product_id: "PROD4100".into(),
            quantity: 3,
            status: status.to_string(),
            dimensions: Dimensions::default(),
            bin_allocation: Default::default(),
            bin_current: Default::default(),
            bin_allocation_date: None,
        }
    }

    fn loaded() -> QualityCheckViewModel {
        let mut vm = QualityCheckViewModel::new();
        let mut notices = Notices::new();
        let seq = vm.begin_refresh();
        let rows = vec![package("PKG-1", READY_FOR_TQ), package("PKG-2", "OPEN")];
        vm.apply_packages(seq, Ok(FetchOutcome::new(rows)), &mut notices);
        vm
    }

    #[test]
    fn test_check_requires_selection() {
        let mut vm = loaded();
        assert!(matches!(
            vm.begin_check(QualityFlag::Pass, "TQ3101"),
            Err(DomainError::Rejected(_))
        ));
        assert!(vm.submitting.is_none());
    }

    #[test]
    fn test_search_unknown_package_warns() {
        let mut vm = loaded();
        let mut notices = Notices::new();
        assert!(vm.search("PKG-1", &mut notices));
        assert!(!vm.search("PKG-9", &mut notices));
        assert!(vm.selected.is_none());
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn test_search_package_not_ready_informs() {
        let mut vm = loaded();
        let mut notices = Notices::new();
        assert!(vm.search("PKG-2", &mut notices));
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Info);
        assert_eq!(vm.selected.as_ref().unwrap().product_id, "PROD4100");
    }

    #[test]
    fn test_pass_lifecycle() {
        let mut vm = loaded();
        let mut notices = Notices::new();
        vm.search("PKG-1", &mut notices);

        let check = vm.begin_check(QualityFlag::Pass, "TQ3101").unwrap();
        assert!(vm.begin_check(QualityFlag::Fail, "TQ3101").is_err());

        assert!(vm.apply_check(check, Ok(()), &mut notices));
        assert!(vm.submitting.is_none());
        assert!(vm.selected.is_none());
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_rejected_check_keeps_selection() {
        let mut vm = loaded();
        let mut notices = Notices::new();
        vm.search("PKG-1", &mut notices);
        let check = vm.begin_check(QualityFlag::Fail, "TQ3101").unwrap();

        let recorded = vm.apply_check(
            check,
            Err(DomainError::Rejected("Package status is not READY-FOR-TQ".into())),
            &mut notices,
        );
        assert!(!recorded);
        assert!(vm.selected.is_some());
        assert!(notices.latest().unwrap().message.contains("READY-FOR-TQ"));
    }
}
