//! Запись клиентских событий в системный журнал бэкенда (`POST /api/logs`)

use crate::shared::api_utils::post_unit;
use contracts::shared::logger::CreateLogRequest;
use leptos::task::spawn_local;

/// Fire-and-forget: ошибка отправки только пишется в консоль
pub fn log_to_server(category: &str, message: impl Into<String>) {
    let request = CreateLogRequest {
        source: "client".to_string(),
        category: category.to_string(),
        message: message.into(),
    };
    spawn_local(async move {
        if let Err(e) = post_unit("/api/logs", &request).await {
            log::warn!("client log not delivered: {}", e);
        }
    });
}
