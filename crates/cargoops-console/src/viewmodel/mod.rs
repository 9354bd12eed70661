//! ViewModel Module
//!
//! Page state behind the shell. View models never perform I/O.

pub mod binning_vm;
pub mod drill_down_vm;
pub mod inventory_vm;
pub mod list;
pub mod quality_vm;
pub mod received_vm;
pub mod receiving_vm;

pub use binning_vm::BinningViewModel;
pub use drill_down_vm::DrillDownViewModel;
pub use inventory_vm::InventoryViewModel;
pub use list::SequencedList;
pub use quality_vm::QualityCheckViewModel;
pub use received_vm::ReceivedOrdersViewModel;
pub use receiving_vm::ReceivingViewModel;
