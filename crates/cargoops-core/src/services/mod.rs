//! Domain services (navigation and workspace logic)

pub mod path_resolver;
pub mod permission_gate;
pub mod scoped_binder;
pub mod navigator;

pub use path_resolver::resolve;
pub use permission_gate::{MenuEntry, PermissionGate};
pub use scoped_binder::{visible_rows, ScopedRows};
pub use navigator::Navigator;
