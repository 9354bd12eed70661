// ============================================================================
// CargoOps Infrastructure - Wire Records
// File: crates/cargoops-infrastructure/src/http/dto.rs
// Description: Snake-case API rows and their conversion into domain entities
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cargoops_core::{
    Dimensions, DiscrepancyUpdate, DomainError, InventoryBin, Package, PickOrder, PickSlip, QualityCheck,
    QualityFlag, ReceivingReceipt, StoringOrder,
};

use super::normalize::{
    bin_map, calendar_date, first_text, lenient_string, package_list, pick_tasks, quantity, value_text,
};

fn require_id(id: String, record: &str) -> Result<String, DomainError> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(DomainError::malformed(record, "empty identifier"));
    }
    Ok(id)
}

// Internal row types for JSON mapping

#[derive(Debug, Deserialize)]
pub struct StoringOrderRow {
    #[serde(deserialize_with = "lenient_string")]
    pub storing_order_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub invoice_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bill_of_entry_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub airway_bill_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub receiver_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub received_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doc_inspection_result: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub discrepancy_detail: String,
    #[serde(default)]
    pub package_quantity: Value,
    #[serde(default)]
    pub packages: Value,
}

impl TryFrom<StoringOrderRow> for StoringOrder {
    type Error = DomainError;

    fn try_from(row: StoringOrderRow) -> Result<Self, Self::Error> {
        Ok(StoringOrder {
            storing_order_id: require_id(row.storing_order_id, "storing order")?,
            customer_id: row.customer_id,
            order_date: row.order_date,
            invoice_number: row.invoice_number,
            bill_of_entry_id: row.bill_of_entry_id,
            airway_bill_number: row.airway_bill_number,
            status: row.status,
            receiver_id: row.receiver_id,
            received_date: row.received_date,
            doc_inspection_result: row.doc_inspection_result,
            discrepancy_detail: row.discrepancy_detail,
            package_quantity: quantity(&row.package_quantity),
            packages: package_list(&row.packages),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PackageRow {
    #[serde(deserialize_with = "lenient_string")]
    pub package_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub storing_order_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default)]
    pub height: Value,
    #[serde(default)]
    pub width: Value,
    #[serde(default)]
    pub breadth: Value,
    #[serde(default)]
    pub bin_allocation: Value,
    #[serde(default)]
    pub bin_current: Value,
    #[serde(default)]
    pub bin_allocation_date: Value,
}

fn measure(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

impl TryFrom<PackageRow> for Package {
    type Error = DomainError;

    fn try_from(row: PackageRow) -> Result<Self, Self::Error> {
        let package_id = require_id(row.package_id, "package")?;
        let bin_allocation = bin_map(&row.bin_allocation, "bin_allocation", &package_id);
        let bin_current = bin_map(&row.bin_current, "bin_current", &package_id);
        let bin_allocation_date = calendar_date(&value_text(&row.bin_allocation_date));

        Ok(Package {
            storing_order_id: row.storing_order_id,
            product_id: row.product_id,
            quantity: quantity(&row.quantity).unwrap_or_default(),
            status: row.status,
            dimensions: Dimensions {
                height: measure(&row.height),
                width: measure(&row.width),
                breadth: measure(&row.breadth),
            },
            bin_allocation,
            bin_current,
            bin_allocation_date,
            package_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PickSlipRow {
    #[serde(deserialize_with = "lenient_string")]
    pub pick_slip_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: String,
    #[serde(default)]
    pub pick_slip_created_date: Value,
    /// Older name of `pick_slip_created_date`.
    #[serde(default)]
    pub created_date: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub requested_delivery_date: String,
    #[serde(default)]
    pub pick_slip_status: Value,
    /// Older name of `pick_slip_status`.
    #[serde(default)]
    pub status: Value,
}

impl TryFrom<PickSlipRow> for PickSlip {
    type Error = DomainError;

    fn try_from(row: PickSlipRow) -> Result<Self, Self::Error> {
        Ok(PickSlip {
            pick_slip_id: require_id(row.pick_slip_id, "pick slip")?,
            customer_id: row.customer_id,
            created_date: first_text(&row.pick_slip_created_date, &row.created_date),
            requested_delivery_date: row.requested_delivery_date,
            status: first_text(&row.pick_slip_status, &row.status),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PickOrderRow {
    #[serde(deserialize_with = "lenient_string")]
    pub pick_order_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pick_slip_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub picker_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub picking_zone: String,
    #[serde(default)]
    pub pick_order_status: Value,
    /// Older name of `pick_order_status`.
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub pick_task: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_created_date: String,
    #[serde(default)]
    pub picked_date: Value,
}

impl TryFrom<PickOrderRow> for PickOrder {
    type Error = DomainError;

    fn try_from(row: PickOrderRow) -> Result<Self, Self::Error> {
        let pick_order_id = require_id(row.pick_order_id, "pick order")?;
        let tasks = pick_tasks(&row.pick_task, &pick_order_id);

        Ok(PickOrder {
            pick_slip_id: row.pick_slip_id,
            picker_id: row.picker_id,
            picking_zone: row.picking_zone,
            status: first_text(&row.pick_order_status, &row.status),
            tasks,
            order_created_date: row.order_created_date,
            picked_date: Some(value_text(&row.picked_date)).filter(|d| !d.trim().is_empty()),
            pick_order_id,
        })
    }
}

/// Body of `POST /bin-allocation`.
#[derive(Debug, Serialize)]
pub struct BinAllocationRequest<'a> {
    pub package_id: &'a str,
    pub employee_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct BinAllocationResponse {
    #[serde(default)]
    pub bin_allocation: Value,
}

/// Body of `POST /storing-orders/receive`.
#[derive(Debug, Serialize)]
pub struct ReceiveRequest<'a> {
    pub storing_order_id: &'a str,
    pub invoice_number: &'a str,
    pub bill_of_entry_id: &'a str,
    pub airway_bill_number: &'a str,
    pub quantity: u32,
    pub employee_id: &'a str,
}

impl<'a> From<&'a ReceivingReceipt> for ReceiveRequest<'a> {
    fn from(receipt: &'a ReceivingReceipt) -> Self {
        Self {
            storing_order_id: &receipt.storing_order_id,
            invoice_number: &receipt.invoice_number,
            bill_of_entry_id: &receipt.bill_of_entry_id,
            airway_bill_number: &receipt.airway_bill_number,
            quantity: receipt.quantity,
            employee_id: &receipt.employee_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReceiveFailure {
    #[serde(default, deserialize_with = "lenient_string")]
    pub discrepancy_detail: String,
}

/// Body of `PUT /storing-orders/discrepancy`.
#[derive(Debug, Serialize)]
pub struct DiscrepancyRequest<'a> {
    pub storing_order_id: &'a str,
    pub discrepancy_detail: &'a str,
}

impl<'a> From<&'a DiscrepancyUpdate> for DiscrepancyRequest<'a> {
    fn from(update: &'a DiscrepancyUpdate) -> Self {
        Self {
            storing_order_id: &update.storing_order_id,
            discrepancy_detail: &update.discrepancy_detail,
        }
    }
}

/// Body of `POST /tq-quality-check`.
#[derive(Debug, Serialize)]
pub struct QualityCheckRequest<'a> {
    pub package_id: &'a str,
    pub employee_id: &'a str,
    pub flag: QualityFlag,
}

impl<'a> From<&'a QualityCheck> for QualityCheckRequest<'a> {
    fn from(check: &'a QualityCheck) -> Self {
        Self {
            package_id: &check.package_id,
            employee_id: &check.employee_id,
            flag: check.flag,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InventoryRow {
    #[serde(deserialize_with = "lenient_string")]
    pub bin_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: String,
    #[serde(default)]
    pub quantity: Value,
}

impl TryFrom<InventoryRow> for InventoryBin {
    type Error = DomainError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        Ok(InventoryBin {
            bin_id: require_id(row.bin_id, "inventory bin")?,
            product_id: row.product_id,
            // empty bins come back without a quantity
            quantity: quantity(&row.quantity).unwrap_or_default(),
        })
    }
}
