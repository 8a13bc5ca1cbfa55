use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::MessageTone;

/// How long a banner stays visible after its most recent post.
pub const NOTICE_TTL_SECONDS: i64 = 5;

/// One transient banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: MessageTone,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Slot-keyed transient banners.
///
/// Posting to an occupied slot replaces the pending banner and restarts its
/// dismissal deadline, so a slot never shows more than one banner and a
/// banner disappears exactly [`NOTICE_TTL_SECONDS`] after its last post.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    slots: HashMap<String, Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, slot: &str, tone: MessageTone, message: String, now: DateTime<Utc>) {
        let notice = Notice {
            tone,
            message,
            expires_at: now + Duration::seconds(NOTICE_TTL_SECONDS),
        };
        self.slots.insert(slot.to_string(), notice);
    }

    /// Banner currently visible in a slot, if its deadline has not passed.
    pub fn active(&self, slot: &str, now: DateTime<Utc>) -> Option<&Notice> {
        self.slots
            .get(slot)
            .filter(|notice| notice.expires_at > now)
    }

    /// Every banner still visible at `now`, in slot-name order.
    pub fn active_notices(&self, now: DateTime<Utc>) -> Vec<(&str, &Notice)> {
        let mut entries: Vec<(&str, &Notice)> = self
            .slots
            .iter()
            .filter(|(_, notice)| notice.expires_at > now)
            .map(|(slot, notice)| (slot.as_str(), notice))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Drop every banner whose deadline has passed; returns how many were
    /// dismissed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, notice| notice.expires_at > now);
        before - self.slots.len()
    }
}
