//! Single-slot user feedback message.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Success => write!(f, "{}", self.message),
            NotificationKind::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// Holds at most one message; setting a new one discards the previous.
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.current = Some(Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        });
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.current = Some(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
