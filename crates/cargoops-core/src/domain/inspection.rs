// ============================================================================
// CargoOps Core - Package Quality Check
// File: crates/cargoops-core/src/domain/inspection.rs
// Description: Technical-query verdicts submitted for a single package
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use super::warehouse::Package;
use crate::error::DomainError;

/// Package status that admits a quality check.
pub const READY_FOR_TQ: &str = "READY-FOR-TQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityFlag {
    Pass,
    Fail,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::Pass => "pass",
            QualityFlag::Fail => "fail",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /tq-quality-check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub package_id: String,
    pub employee_id: String,
    pub flag: QualityFlag,
}

impl QualityCheck {
    pub fn new(package_id: &str, employee_id: &str, flag: QualityFlag) -> Result<Self, DomainError> {
        let package_id = package_id.trim();
        if package_id.is_empty() {
            return Err(DomainError::Rejected("Package ID is required".into()));
        }
        Ok(Self {
            package_id: package_id.to_string(),
            employee_id: employee_id.to_string(),
            flag,
        })
    }
}

/// Product summary shown for the package under inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub package_id: String,
    pub product_id: String,
    pub ordered_quantity: u32,
    pub status: String,
}

impl PackageSummary {
    pub fn awaiting_check(&self) -> bool {
        self.status == READY_FOR_TQ
    }
}

impl From<&Package> for PackageSummary {
    fn from(package: &Package) -> Self {
        Self {
            package_id: package.package_id.clone(),
            product_id: package.product_id.clone(),
            ordered_quantity: package.quantity,
            status: package.status.clone(),
        }
    }
}

/// Look a package up by id in an already fetched list.
pub fn find_package(packages: &[Package], package_id: &str) -> Result<PackageSummary, DomainError> {
    let package_id = package_id.trim();
    if package_id.is_empty() {
        return Err(DomainError::Rejected("Enter a package ID first".into()));
    }
    packages
        .iter()
        .find(|p| p.package_id == package_id)
        .map(PackageSummary::from)
        .ok_or_else(|| DomainError::NotFound(format!("Package {}", package_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::warehouse::Dimensions;

    fn package(id: &str, status: &str) -> Package {
        Package {
            package_id: id.to_string(),
            storing_order_id: "SO-1".into(),
            product_id: "PROD1".into(),
            quantity: 5,
            status: status.to_string(),
            dimensions: Dimensions::default(),
            bin_allocation: Default::default(),
            bin_current: Default::default(),
            bin_allocation_date: None,
        }
    }

    #[test]
    fn test_flag_wire_form() {
        let check = QualityCheck::new(" PKG-1 ", "TQ3101", QualityFlag::Fail).unwrap();
        assert_eq!(check.package_id, "PKG-1");
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["flag"], "fail");
    }

    #[test]
    fn test_blank_package_rejected() {
        assert!(matches!(
            QualityCheck::new("  ", "TQ3101", QualityFlag::Pass),
            Err(DomainError::Rejected(_))
        ));
    }

    #[test]
    fn test_find_package() {
        let packages = vec![package("PKG-1", READY_FOR_TQ), package("PKG-2", "OPEN")];
        let found = find_package(&packages, "PKG-1").unwrap();
        assert_eq!(found.ordered_quantity, 5);
        assert!(found.awaiting_check());
        assert!(!find_package(&packages, "PKG-2").unwrap().awaiting_check());
        assert!(matches!(find_package(&packages, "PKG-9"), Err(DomainError::NotFound(_))));
    }
}
