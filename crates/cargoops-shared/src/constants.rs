//! Application-wide constants

pub const DEFAULT_MENU_KEY: &str = "dashboard";
pub const HOME_CRUMB: &str = "Home";
pub const FALLBACK_PAGE_TITLE: &str = "Page Title";
pub const ADMIN_ROLE: &str = "admin";
pub const ACCESS_DENIED_MESSAGE: &str = "You are not allowed to this tab.";
pub const MAX_NOTICES: usize = 16;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_LOG_FILTER: &str = "info";
