//! # CargoOps Core - Domain Module
//!
//! Menu hierarchy, role allow-lists, navigation and workspace state, and the
//! warehouse entities handled by the console.

pub mod menu;
pub mod role;
pub mod navigation;
pub mod workspace;
pub mod records;
pub mod session;
pub mod warehouse;
pub mod receiving;
pub mod inspection;
pub mod inventory;

// Re-export all entities and enums
pub use menu::{MenuNode, MenuTree, MenuTreeError};
pub use role::RoleAllowList;
pub use navigation::NavigationState;
pub use workspace::{reduce, EntityId, FetchTicket, Tab, Workspace, WorkspaceAction};
pub use records::{ChildRecord, LoadStatus, ParentRecord, RecordSet};
pub use session::Session;
pub use warehouse::{
    binned_rows, BinMap, BinnedRow, Dimensions, FetchOutcome, Package, PickOrder, PickSlip, PickTask,
    SkippedRecord, StoringOrder,
};
pub use receiving::{DiscrepancyUpdate, ReceiveOutcome, ReceivingReceipt, ScanStep, ScanWorkflow};
pub use inspection::{find_package, PackageSummary, QualityCheck, QualityFlag, READY_FOR_TQ};
pub use inventory::{floor_layout, InventoryBin};
