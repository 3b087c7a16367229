use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Компонент, который переоценивается на каждом тике воркера.
#[async_trait]
pub trait Monitor: Send + Sync {
    /// Уникальное имя монитора (ключ в реестре).
    fn name(&self) -> &'static str;

    /// Один проход проверки на момент `now`.
    async fn tick(&self, now: DateTime<Utc>) -> Result<()>;
}
