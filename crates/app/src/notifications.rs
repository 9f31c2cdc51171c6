//! Self-expiring notification queue.
//!
//! Each entry carries its own expiry instant; a single `sweep` per frame drops
//! everything that is due. Display order is insertion order.

use shared::events::{Notification, NotificationKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
struct Queued {
    notification: Notification,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct NotificationQueue {
    entries: VecDeque<Queued>,
    ttl: Duration,
    next_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl,
            next_id: 1,
        }
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> u64 {
        self.push_at(Instant::now(), title, message, kind)
    }

    pub fn push_at(
        &mut self,
        now: Instant,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(Queued {
            notification: Notification::new(id, title, message, kind),
            expires_at: now + self.ttl,
        });
        id
    }

    /// Remove a notification before it expires.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|q| q.notification.id != id);
        self.entries.len() != before
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|q| q.expires_at > now);
        before - self.entries.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|q| &q.notification)
    }

    /// Earliest pending expiry, for scheduling the next sweep.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|q| q.expires_at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
