//! Application Events
//!
//! Results sent from background fetch tasks back to the shell. Every event
//! carries the mount id of the page that issued it.

use cargoops_core::{
    BinMap, DiscrepancyUpdate, DomainError, FetchOutcome, FetchTicket, InventoryBin, Package, PickOrder,
    PickSlip, QualityCheck, ReceiveOutcome, ReceivingReceipt, StoringOrder,
};

/// Identity of one page mount. A new id is issued on every page change.
pub type MountId = u64;

#[derive(Debug)]
pub enum AppEvent {
    StoringOrdersLoaded {
        mount: MountId,
        seq: u64,
        result: Result<FetchOutcome<StoringOrder>, DomainError>,
    },
    PackagesLoaded {
        mount: MountId,
        ticket: FetchTicket,
        result: Result<FetchOutcome<Package>, DomainError>,
    },
    PickSlipsLoaded {
        mount: MountId,
        seq: u64,
        result: Result<FetchOutcome<PickSlip>, DomainError>,
    },
    PickOrdersLoaded {
        mount: MountId,
        ticket: FetchTicket,
        result: Result<FetchOutcome<PickOrder>, DomainError>,
    },
    /// Unscoped package list (bin assignment and quality check pages).
    PackageListLoaded {
        mount: MountId,
        seq: u64,
        result: Result<FetchOutcome<Package>, DomainError>,
    },
    BinsAllocated {
        mount: MountId,
        package_id: String,
        result: Result<BinMap, DomainError>,
    },
    ReceiptSubmitted {
        mount: MountId,
        receipt: ReceivingReceipt,
        result: Result<ReceiveOutcome, DomainError>,
    },
    DiscrepancySaved {
        mount: MountId,
        update: DiscrepancyUpdate,
        result: Result<(), DomainError>,
    },
    QualityChecked {
        mount: MountId,
        check: QualityCheck,
        result: Result<(), DomainError>,
    },
    InventoryLoaded {
        mount: MountId,
        seq: u64,
        result: Result<FetchOutcome<InventoryBin>, DomainError>,
    },
}

impl AppEvent {
    pub fn mount(&self) -> MountId {
        match self {
            AppEvent::StoringOrdersLoaded { mount, .. }
            | AppEvent::PackagesLoaded { mount, .. }
            | AppEvent::PickSlipsLoaded { mount, .. }
            | AppEvent::PickOrdersLoaded { mount, .. }
            | AppEvent::PackageListLoaded { mount, .. }
            | AppEvent::BinsAllocated { mount, .. }
            | AppEvent::ReceiptSubmitted { mount, .. }
            | AppEvent::DiscrepancySaved { mount, .. }
            | AppEvent::QualityChecked { mount, .. }
            | AppEvent::InventoryLoaded { mount, .. } => *mount,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::StoringOrdersLoaded { .. } => "storing_orders_loaded",
            AppEvent::PackagesLoaded { .. } => "packages_loaded",
            AppEvent::PickSlipsLoaded { .. } => "pick_slips_loaded",
            AppEvent::PickOrdersLoaded { .. } => "pick_orders_loaded",
            AppEvent::PackageListLoaded { .. } => "package_list_loaded",
            AppEvent::BinsAllocated { .. } => "bins_allocated",
            AppEvent::ReceiptSubmitted { .. } => "receipt_submitted",
            AppEvent::DiscrepancySaved { .. } => "discrepancy_saved",
            AppEvent::QualityChecked { .. } => "quality_checked",
            AppEvent::InventoryLoaded { .. } => "inventory_loaded",
        }
    }
}
