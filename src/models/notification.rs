//! User-visible notifications.
//!
//! Every handled error and every successful mutation ends up as one of these.
//! None of them block the client; the presentation layer decides how long to
//! show them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

impl From<&AppError> for Notification {
    fn from(e: &AppError) -> Self {
        match e {
            // Absence is an answer, not a failure
            AppError::NotFound(_) => Notification::info(e.user_message()),
            _ => Notification::error(e.user_message()),
        }
    }
}

impl From<AppError> for Notification {
    fn from(e: AppError) -> Self {
        Notification::from(&e)
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Info => "info",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{}] {}", label, self.message)
    }
}
