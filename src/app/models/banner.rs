//! # Banner Model
//!
//! Transient notification shown above a list. A banner either expires at a
//! fixed instant or stays until something replaces it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    message: String,
    expires_at: Option<Instant>,
}

impl Banner {
    /// Banner that disappears `duration` after `now`
    pub fn timed<S: Into<String>>(message: S, now: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Some(now + duration),
        }
    }

    /// Banner without an expiry
    pub fn sticky<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Drop `slot`'s banner once it expired. Returns true when something was removed.
pub fn expire_banner(slot: &mut Option<Banner>, now: Instant) -> bool {
    if slot.as_ref().is_some_and(|banner| banner.is_expired(now)) {
        *slot = None;
        return true;
    }
    false
}
