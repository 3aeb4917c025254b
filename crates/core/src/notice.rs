//! Transient user notices

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A message shown for a bounded time, then dismissed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, shown_at: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            duration,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + self.duration
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}
