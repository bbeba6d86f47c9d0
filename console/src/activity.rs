use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use sonyflake::Sonyflake;
use time::macros::format_description;
use time::OffsetDateTime;

/// The feed keeps only the most recent entries.
const FEED_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    id: u64,
    at: OffsetDateTime,
    kind: ActivityKind,
    message: String,
}

impl ActivityEntry {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time_label(&self) -> String {
        let format = format_description!("[hour]:[minute]:[second]");
        self.at
            .format(&format)
            .unwrap_or_else(|_| self.at.unix_timestamp().to_string())
    }
}

/// Bounded, newest-first activity feed plus the last observed API
/// round-trip time. Interior mutability lets the API client record
/// entries from `&self` mid-call.
pub struct ActivityLog {
    feed: Mutex<Feed>,
    ids: Sonyflake,
}

struct Feed {
    entries: VecDeque<ActivityEntry>,
    last_response_time: Option<Duration>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            feed: Mutex::new(Feed {
                entries: VecDeque::with_capacity(FEED_CAPACITY),
                last_response_time: None,
            }),
            ids: Sonyflake::new().expect("sonyflake machine id"),
        }
    }

    pub fn record(&self, kind: ActivityKind, message: impl Into<String>) {
        let entry = ActivityEntry {
            id: self.ids.next_id().unwrap_or_default(),
            at: OffsetDateTime::now_utc(),
            kind,
            message: message.into(),
        };
        match kind {
            ActivityKind::Error => {
                tracing::warn!(entry = entry.id(), message = %entry.message(), "activity");
            }
            _ => {
                tracing::debug!(entry = entry.id(), message = %entry.message(), "activity");
            }
        }

        let mut feed = self.lock();
        feed.entries.push_front(entry);
        feed.entries.truncate(FEED_CAPACITY);
    }

    pub fn set_response_time(&self, elapsed: Duration) {
        self.lock().last_response_time = Some(elapsed);
    }

    pub fn last_response_time(&self) -> Option<Duration> {
        self.lock().last_response_time
    }

    /// Snapshot of the feed, newest first.
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Feed> {
        self.feed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_is_bounded_and_newest_first() {
        let log = ActivityLog::new();
        for i in 0..25 {
            log.record(ActivityKind::Info, format!("entry {i}"));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), FEED_CAPACITY);
        assert_eq!(entries[0].message(), "entry 24");
        assert_eq!(entries[FEED_CAPACITY - 1].message(), "entry 5");

        // Entry ids are unique (newest first, so strictly decreasing)
        let ids: Vec<u64> = entries.iter().map(ActivityEntry::id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_response_time_tracking() {
        let log = ActivityLog::new();
        assert!(log.last_response_time().is_none());

        log.set_response_time(Duration::from_millis(120));
        log.set_response_time(Duration::from_millis(340));
        assert_eq!(log.last_response_time(), Some(Duration::from_millis(340)));
    }
}
