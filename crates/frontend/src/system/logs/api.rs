use crate::shared::api_utils::{delete, get_json};
use contracts::shared::logger::LogEntry;

/// Весь журнал, новые записи первыми
pub async fn fetch_logs() -> Result<Vec<LogEntry>, String> {
    get_json("/api/logs").await
}

pub async fn clear_logs() -> Result<(), String> {
    delete("/api/logs").await
}
