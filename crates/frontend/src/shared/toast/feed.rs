use contracts::shared::notifications::Notification;

/// Задержка между опросами ленты, мс
pub const POLL_INTERVAL_MS: u32 = 5_000;

/// Позиция клиента в ленте уведомлений бэкенда.
///
/// Первый ответ только запоминает последний id: уведомления, накопленные
/// до открытия страницы, тостами не показываются.
///
/// После перезапуска бэкенда id начинаются с 1, а сервер на незнакомый
/// курсор отдаёт всю ленту. Непустая пачка без id больше курсора означает
/// такой перезапуск: курсор сбрасывается, пачка показывается целиком.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedCursor {
    last_id: Option<u64>,
}

impl FeedCursor {
    pub fn last_id(&self) -> Option<u64> {
        self.last_id
    }

    pub fn query_path(&self) -> String {
        match self.last_id {
            Some(id) => format!("/api/notifications?after={}", id),
            None => "/api/notifications".to_string(),
        }
    }

    /// Возвращает новые уведомления в порядке id
    pub fn accept(&mut self, batch: Vec<Notification>) -> Vec<Notification> {
        let max_id = batch.iter().map(|n| n.id).max();
        let Some(last) = self.last_id else {
            self.last_id = Some(max_id.unwrap_or(0));
            return Vec::new();
        };

        let restarted = max_id.is_some_and(|max_id| max_id <= last);
        let mut fresh: Vec<Notification> = if restarted {
            batch
        } else {
            batch.into_iter().filter(|n| n.id > last).collect()
        };
        fresh.sort_by_key(|n| n.id);
        if let Some(max_id) = max_id {
            self.last_id = Some(if restarted { max_id } else { last.max(max_id) });
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::notifications::NotificationVariant;

    fn n(id: u64) -> Notification {
        Notification {
            id,
            created_at: chrono::Utc::now(),
            title: format!("t{id}"),
            message: String::new(),
            variant: NotificationVariant::Default,
            source: "kitchen".into(),
        }
    }

    #[test]
    fn first_batch_only_moves_cursor() {
        let mut cursor = FeedCursor::default();
        assert_eq!(cursor.query_path(), "/api/notifications");
        assert!(cursor.accept(vec![n(3), n(7)]).is_empty());
        assert_eq!(cursor.last_id(), Some(7));
        assert_eq!(cursor.query_path(), "/api/notifications?after=7");
    }

    #[test]
    fn empty_first_batch_starts_from_zero() {
        let mut cursor = FeedCursor::default();
        assert!(cursor.accept(Vec::new()).is_empty());
        assert_eq!(cursor.query_path(), "/api/notifications?after=0");
        let fresh = cursor.accept(vec![n(1)]);
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn later_batches_are_filtered_and_ordered() {
        let mut cursor = FeedCursor::default();
        cursor.accept(vec![n(5)]);
        let fresh = cursor.accept(vec![n(8), n(5), n(6)]);
        assert_eq!(fresh.iter().map(|n| n.id).collect::<Vec<_>>(), vec![6, 8]);
        assert_eq!(cursor.last_id(), Some(8));
        assert!(cursor.accept(Vec::new()).is_empty());
        assert_eq!(cursor.last_id(), Some(8));
    }

    #[test]
    fn backend_restart_resets_cursor() {
        let mut cursor = FeedCursor::default();
        cursor.accept(vec![n(40)]);
        assert_eq!(cursor.query_path(), "/api/notifications?after=40");

        let fresh = cursor.accept(vec![n(2), n(1)]);
        assert_eq!(fresh.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(cursor.query_path(), "/api/notifications?after=2");

        let fresh = cursor.accept(vec![n(3)]);
        assert_eq!(fresh.len(), 1);
        assert_eq!(cursor.last_id(), Some(3));
    }
}
