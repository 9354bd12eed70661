// ============================================================================
// CargoOps Core - Warehouse Entities
// File: crates/cargoops-core/src/domain/warehouse.rs
// Description: Storing orders, packages, pick slips and their derived rows
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::records::{ChildRecord, ParentRecord};

/// Bin location → quantity, ordered by location.
pub type BinMap = BTreeMap<String, u32>;

/// Inbound shipment; parent of packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoringOrder {
    pub storing_order_id: String,
    pub customer_id: String,
    pub order_date: String,
    pub invoice_number: String,
    pub bill_of_entry_id: String,
    pub airway_bill_number: String,
    pub status: String,
    /// Employee who received the order; empty until received.
    pub receiver_id: String,
    pub received_date: String,
    pub doc_inspection_result: String,
    pub discrepancy_detail: String,
    pub package_quantity: Option<u32>,
    pub packages: Vec<String>,
}

impl ParentRecord for StoringOrder {
    fn entity_id(&self) -> &str {
        &self.storing_order_id
    }
}

impl StoringOrder {
    pub fn received_by(&self, employee_id: &str) -> bool {
        !employee_id.is_empty() && self.receiver_id == employee_id
    }

    pub fn passed_inspection(&self) -> bool {
        self.doc_inspection_result.eq_ignore_ascii_case("PASS")
    }

    /// Received date, falling back to the order date.
    pub fn effective_received_date(&self) -> &str {
        if self.received_date.is_empty() {
            &self.order_date
        } else {
            &self.received_date
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub breadth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub package_id: String,
    pub storing_order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub status: String,
    pub dimensions: Dimensions,
    pub bin_allocation: BinMap,
    pub bin_current: BinMap,
    pub bin_allocation_date: Option<NaiveDate>,
}

impl ChildRecord for Package {
    fn parent_ref(&self) -> &str {
        &self.storing_order_id
    }
}

impl Package {
    /// One row per allocated bin, joined with what is currently binned there.
    pub fn binned_rows(&self) -> Vec<BinnedRow> {
        self.bin_allocation
            .iter()
            .map(|(bin, assigned)| BinnedRow {
                package_id: self.package_id.clone(),
                status: self.status.clone(),
                product_id: self.product_id.clone(),
                bin_location: bin.clone(),
                assigned_quantity: *assigned,
                binned_quantity: self.bin_current.get(bin).copied(),
                binning_date: self.bin_allocation_date,
            })
            .collect()
    }
}

/// Flattened allocation row for the bin-assignment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinnedRow {
    pub package_id: String,
    pub status: String,
    pub product_id: String,
    pub bin_location: String,
    pub assigned_quantity: u32,
    pub binned_quantity: Option<u32>,
    pub binning_date: Option<NaiveDate>,
}

/// Binned rows for every package that has an allocation, in package order.
pub fn binned_rows(packages: &[Package]) -> Vec<BinnedRow> {
    packages.iter().flat_map(Package::binned_rows).collect()
}

/// Outbound request; parent of pick orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickSlip {
    pub pick_slip_id: String,
    pub customer_id: String,
    pub created_date: String,
    pub requested_delivery_date: String,
    pub status: String,
}

impl ParentRecord for PickSlip {
    fn entity_id(&self) -> &str {
        &self.pick_slip_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickTask {
    pub bin_id: String,
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickOrder {
    pub pick_order_id: String,
    pub pick_slip_id: String,
    pub picker_id: String,
    pub picking_zone: String,
    pub status: String,
    pub tasks: Vec<PickTask>,
    pub order_created_date: String,
    pub picked_date: Option<String>,
}

impl ChildRecord for PickOrder {
    fn parent_ref(&self) -> &str {
        &self.pick_slip_id
    }
}

/// A record dropped while decoding a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position in the response array.
    pub index: usize,
    pub reason: String,
}

/// Decoded rows plus whatever could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome<T> {
    pub rows: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> FetchOutcome<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            skipped: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(id: &str, allocation: &[(&str, u32)], current: &[(&str, u32)]) -> Package {
        Package {
            package_id: id.to_string(),
            storing_order_id: "SO-1".to_string(),
            product_id: "P-100".to_string(),
            quantity: 10,
            status: "allocated".to_string(),
            dimensions: Dimensions::default(),
            bin_allocation: allocation.iter().map(|(b, q)| (b.to_string(), *q)).collect(),
            bin_current: current.iter().map(|(b, q)| (b.to_string(), *q)).collect(),
            bin_allocation_date: NaiveDate::from_ymd_opt(2024, 3, 9),
        }
    }

    #[test]
    fn test_binned_rows_join_current() {
        let pkg = package("PKG-1", &[("A-01", 4), ("B-02", 6)], &[("A-01", 4)]);
        let rows = pkg.binned_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bin_location, "A-01");
        assert_eq!(rows[0].binned_quantity, Some(4));
        assert_eq!(rows[1].binned_quantity, None);
        assert_eq!(rows[1].binning_date.map(|d| d.to_string()), Some("2024-03-09".into()));
    }

    #[test]
    fn test_storing_order_receiving_view() {
        let order = StoringOrder {
            storing_order_id: "SO-1".into(),
            order_date: "2024-05-01".into(),
            receiver_id: "RCV2054".into(),
            doc_inspection_result: "pass".into(),
            ..StoringOrder::default()
        };
        assert!(order.received_by("RCV2054"));
        assert!(!order.received_by(""));
        assert!(order.passed_inspection());
        assert_eq!(order.effective_received_date(), "2024-05-01");
    }

    #[test]
    fn test_package_without_allocation_has_no_rows() {
        let packages = vec![package("PKG-1", &[], &[]), package("PKG-2", &[("C-03", 1)], &[])];
        let rows = binned_rows(&packages);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].package_id, "PKG-2");
    }
}
