//! User-facing notices (toasts)

use std::collections::VecDeque;

use cargoops_core::DomainError;
use cargoops_shared::constants::MAX_NOTICES;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Recoverable, user-caused failures warn; the rest are errors.
    pub fn from_error(err: &DomainError) -> Self {
        let level = match err {
            DomainError::PermissionDenied { .. }
            | DomainError::InvalidTransition { .. }
            | DomainError::Rejected(_)
            | DomainError::NotFound(_) => NoticeLevel::Warning,
            DomainError::Network { .. }
            | DomainError::MalformedPayload { .. }
            | DomainError::InternalError(_) => NoticeLevel::Error,
        };
        Self::new(level, err.to_string())
    }
}

/// Bounded queue; the oldest notice is dropped when full.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(notice);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }

    pub fn dismiss_latest(&mut self) -> Option<Notice> {
        self.queue.pop_back()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
