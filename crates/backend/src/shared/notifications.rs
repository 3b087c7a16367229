//! In-memory notification feed polled by the frontend toast host.

use chrono::Utc;
use contracts::shared::notifications::{Notification, NotificationVariant};
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const FEED_CAPACITY: usize = 200;

struct FeedState {
    next_id: u64,
    items: VecDeque<Notification>,
}

/// Bounded feed with monotonically increasing ids
pub struct NotificationHub {
    capacity: usize,
    state: Mutex<FeedState>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(FeedState {
                next_id: 1,
                items: VecDeque::new(),
            }),
        }
    }

    pub fn push(
        &self,
        source: &str,
        title: impl Into<String>,
        message: impl Into<String>,
        variant: NotificationVariant,
    ) -> Notification {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let notification = Notification {
            id: state.next_id,
            created_at: Utc::now(),
            title: title.into(),
            message: message.into(),
            variant,
            source: source.to_string(),
        };
        state.next_id += 1;
        state.items.push_back(notification.clone());
        while state.items.len() > self.capacity {
            state.items.pop_front();
        }
        notification
    }

    /// Entries with id greater than `after`, oldest first.
    ///
    /// A cursor this process never issued (client outlived a restart)
    /// gets the whole feed, so the client can detect the id regression.
    pub fn since(&self, after: Option<u64>) -> Vec<Notification> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let after = after.unwrap_or(0);
        let after = if after >= state.next_id { 0 } else { after };
        state
            .items
            .iter()
            .filter(|n| n.id > after)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static HUB: Lazy<NotificationHub> = Lazy::new(|| NotificationHub::new(FEED_CAPACITY));

pub fn hub() -> &'static NotificationHub {
    &HUB
}

/// Push to the global feed and mirror into the system log
pub fn notify(source: &str, title: &str, message: &str, variant: NotificationVariant) {
    let n = hub().push(source, title, message, variant);
    crate::shared::logger::log(source, &format!("#{} {}: {}", n.id, title, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_filter_by_after() {
        let hub = NotificationHub::new(10);
        let a = hub.push("kitchen", "A", "a", NotificationVariant::Default);
        let b = hub.push("kitchen", "B", "b", NotificationVariant::Destructive);
        assert!(b.id > a.id);

        let all = hub.since(None);
        assert_eq!(all.len(), 2);
        let newer = hub.since(Some(a.id));
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].title, "B");
        assert!(hub.since(Some(b.id)).is_empty());
    }

    #[test]
    fn unknown_cursor_returns_whole_feed() {
        let hub = NotificationHub::new(10);
        hub.push("kitchen", "A", "a", NotificationVariant::Default);
        hub.push("kitchen", "B", "b", NotificationVariant::Default);
        let ids: Vec<u64> = hub.since(Some(40)).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(hub.since(Some(2)).is_empty());
    }

    #[test]
    fn feed_is_bounded() {
        let hub = NotificationHub::new(3);
        for i in 0..5 {
            hub.push("test", format!("n{i}"), "", NotificationVariant::Default);
        }
        let items = hub.since(None);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "n2");
        assert_eq!(items[2].id, 5);
    }
}
