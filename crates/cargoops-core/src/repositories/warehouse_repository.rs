// ============================================================================
// CargoOps Core - Warehouse Repository
// File: crates/cargoops-core/src/repositories/warehouse_repository.rs
// Description: Port for the remote warehouse API
// ============================================================================

use async_trait::async_trait;

use crate::domain::{
    BinMap, DiscrepancyUpdate, FetchOutcome, InventoryBin, Package, PickOrder, PickSlip, QualityCheck,
    ReceiveOutcome, ReceivingReceipt, StoringOrder,
};
use crate::error::DomainError;

/// Remote source of warehouse entities. Calls are scoped by the session the
/// implementation was built with.
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn storing_orders(&self) -> Result<FetchOutcome<StoringOrder>, DomainError>;
    async fn packages(&self, storing_order_id: Option<&str>) -> Result<FetchOutcome<Package>, DomainError>;
    async fn pick_slips(&self) -> Result<FetchOutcome<PickSlip>, DomainError>;
    async fn pick_orders(&self, pick_slip_id: Option<&str>) -> Result<FetchOutcome<PickOrder>, DomainError>;
    async fn allocate_bins(&self, package_id: &str) -> Result<BinMap, DomainError>;
    async fn receive_storing_order(&self, receipt: &ReceivingReceipt) -> Result<ReceiveOutcome, DomainError>;
    async fn save_discrepancy(&self, update: &DiscrepancyUpdate) -> Result<(), DomainError>;
    async fn submit_quality_check(&self, check: &QualityCheck) -> Result<(), DomainError>;
    async fn inventory(&self) -> Result<FetchOutcome<InventoryBin>, DomainError>;
}
