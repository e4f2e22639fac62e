//! Transient user-facing messages.
//!
//! Every submission attempt posts one notice. A notice is visible until its
//! time-to-live elapses, after which the board reports nothing.

use std::time::Duration;

use tokio::time::Instant;

/// Message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Data berhasil disimpan!";

/// Default time a notice stays visible.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

/// Longest time a notice may stay visible.
pub const MAX_TTL: Duration = Duration::from_secs(3600);

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The submission was stored.
    Success,
    /// Validation or submission failed.
    Failure,
}

/// A posted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Success or failure.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub text: String,
    expires_at: Instant,
}

impl Notice {
    /// When the notice disappears.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Holds at most one notice at a time.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NoticeBoard {
    /// Create a board whose notices live for `ttl`, capped at [`MAX_TTL`].
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: ttl.min(MAX_TTL),
            current: None,
        }
    }

    /// The configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Post a notice, replacing any previous one.
    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>) -> &Notice {
        let now = Instant::now();
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        self.current.insert(Notice {
            kind,
            text: text.into(),
            expires_at,
        })
    }

    /// The visible notice, if one is posted and not yet expired.
    #[must_use]
    pub fn current(&self) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| Instant::now() < notice.expires_at)
    }

    /// Remove the notice.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Sleep until the current notice expires, then clear it.
    pub async fn wait_until_cleared(&mut self) {
        if let Some(notice) = &self.current {
            tokio::time::sleep_until(notice.expires_at).await;
        }
        self.clear();
    }
}
