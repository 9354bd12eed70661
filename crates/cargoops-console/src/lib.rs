//! # CargoOps Console
//!
//! App shell for the warehouse console: composes navigation, permission
//! gating and drill-down workspaces into page view models, and applies
//! asynchronous fetch results delivered over an event channel.

pub mod events;
pub mod notice;
pub mod shell;
pub mod viewmodel;

pub use events::{AppEvent, MountId};
pub use notice::{Notice, NoticeLevel, Notices};
pub use shell::{AppShell, Page};
