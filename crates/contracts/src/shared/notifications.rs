use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Вид уведомления (тоста)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// Уведомление из ленты бэкенда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Монотонно растущий номер в ленте
    pub id: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
    /// Источник: "kitchen", "inventory", "cold_storage", ...
    pub source: String,
}

/// Параметры запроса ленты
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    /// Вернуть только уведомления с id > after
    pub after: Option<u64>,
}
