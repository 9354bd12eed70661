// ============================================================================
// CargoOps Core - Storing-Order Receiving
// File: crates/cargoops-core/src/domain/receiving.rs
// Description: Barcode scan workflow, receipt and discrepancy update
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::DomainError;

/// Barcodes scanned when receiving a storing order, in the order they must arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanStep {
    StoringOrder,
    Invoice,
    BillOfEntry,
    AirwayBill,
}

impl ScanStep {
    pub const ALL: [ScanStep; 4] = [
        ScanStep::StoringOrder,
        ScanStep::Invoice,
        ScanStep::BillOfEntry,
        ScanStep::AirwayBill,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScanStep::StoringOrder => "Storing Order",
            ScanStep::Invoice => "Invoice",
            ScanStep::BillOfEntry => "Bill of Entry",
            ScanStep::AirwayBill => "Airway Bill",
        }
    }

    fn index(&self) -> usize {
        match self {
            ScanStep::StoringOrder => 0,
            ScanStep::Invoice => 1,
            ScanStep::BillOfEntry => 2,
            ScanStep::AirwayBill => 3,
        }
    }
}

impl fmt::Display for ScanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /storing-orders/receive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivingReceipt {
    pub storing_order_id: String,
    pub invoice_number: String,
    pub bill_of_entry_id: String,
    pub airway_bill_number: String,
    pub quantity: u32,
    pub employee_id: String,
}

/// Body of `PUT /storing-orders/discrepancy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyUpdate {
    pub storing_order_id: String,
    pub discrepancy_detail: String,
}

impl DiscrepancyUpdate {
    /// The detail may be blank, which clears it; the order id may not.
    pub fn new(storing_order_id: &str, discrepancy_detail: &str) -> Result<Self, DomainError> {
        let storing_order_id = storing_order_id.trim();
        if storing_order_id.is_empty() {
            return Err(DomainError::Rejected("Select a storing order first".into()));
        }
        Ok(Self {
            storing_order_id: storing_order_id.to_string(),
            discrepancy_detail: discrepancy_detail.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiveOutcome {
    Passed,
    Failed { discrepancy_detail: String },
}

/// Step-ordered scan state. Accepted scans are kept when a later input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWorkflow {
    scans: Vec<String>,
    quantity: u32,
}

impl Default for ScanWorkflow {
    fn default() -> Self {
        Self {
            scans: Vec::with_capacity(ScanStep::ALL.len()),
            quantity: 1,
        }
    }
}

impl ScanWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next step waiting for a scan, or `None` once all four are in.
    pub fn expected(&self) -> Option<ScanStep> {
        ScanStep::ALL.get(self.scans.len()).copied()
    }

    pub fn scan(&mut self, step: ScanStep, value: &str) -> Result<(), DomainError> {
        let expected = self.expected();
        if expected != Some(step) {
            warn!(?step, ?expected, "Out-of-order scan rejected");
            return Err(DomainError::InvalidTransition {
                expected: expected.map_or_else(|| "quantity".to_string(), |s| s.to_string()),
                received: step.to_string(),
            });
        }

        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidTransition {
                expected: format!("{} barcode", step),
                received: "empty scan".to_string(),
            });
        }

        self.scans.push(value.to_string());
        debug!(?step, "Scan accepted");
        Ok(())
    }

    /// Scan into whichever step is expected next.
    pub fn scan_next(&mut self, value: &str) -> Result<ScanStep, DomainError> {
        let step = self.expected().ok_or_else(|| DomainError::InvalidTransition {
            expected: "quantity".to_string(),
            received: "another scan".to_string(),
        })?;
        self.scan(step, value)?;
        Ok(step)
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidTransition {
                expected: "quantity of at least 1".to_string(),
                received: "0".to_string(),
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn value(&self, step: ScanStep) -> Option<&str> {
        self.scans.get(step.index()).map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.scans.len() == ScanStep::ALL.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the receipt from the scanned barcodes. Fails unless every barcode
    /// is scanned. The scans stay in place until the caller resets.
    pub fn submit(&self, employee_id: &str) -> Result<ReceivingReceipt, DomainError> {
        if !self.is_complete() {
            let expected = self.expected().map(|s| s.to_string()).unwrap_or_default();
            return Err(DomainError::InvalidTransition {
                expected,
                received: "submit".to_string(),
            });
        }

        let receipt = ReceivingReceipt {
            storing_order_id: self.scans[0].clone(),
            invoice_number: self.scans[1].clone(),
            bill_of_entry_id: self.scans[2].clone(),
            airway_bill_number: self.scans[3].clone(),
            quantity: self.quantity,
            employee_id: employee_id.to_string(),
        };
        Ok(receipt)
    }
}
