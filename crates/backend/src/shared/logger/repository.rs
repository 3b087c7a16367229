use chrono::Utc;
use contracts::shared::logger::LogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::{get_connection, is_initialized};

/// Журнал событий ресторана: смены статусов заказов на кухне, движения
/// склада, расчёты зарплаты, тревоги холодильников, ошибки интерфейса.
/// Категория хранится в нормализованном виде (`kitchen`, `cold_storage`, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            source: m.source,
            category: m.category,
            message: m.message,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Категория без подписи попадает сюда
pub const GENERAL_CATEGORY: &str = "general";

/// Больше этого журнал за один запрос не отдаёт
pub const MAX_LOG_ROWS: u64 = 1_000;

/// "Cold Storage " -> "cold_storage", пустая строка -> "general"
pub fn normalize_category(raw: &str) -> String {
    let normalized = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    if normalized.is_empty() {
        GENERAL_CATEGORY.to_string()
    } else {
        normalized
    }
}

fn effective_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(MAX_LOG_ROWS).clamp(1, MAX_LOG_ROWS)
}

/// Добавить запись в лог без ожидания (внутренняя функция).
/// До открытия БД записи пишутся только в tracing.
pub fn log_event_internal(source: &str, category: &str, message: &str) {
    let category = normalize_category(category);
    tracing::info!(target: "system_log", "[{}] {}", category, message);
    if !is_initialized() || tokio::runtime::Handle::try_current().is_err() {
        return;
    }

    let source = source.to_string();
    let message = message.to_string();

    tokio::spawn(async move {
        if let Err(e) = log_event(&source, &category, &message).await {
            tracing::warn!("Failed to write system_log: {}", e);
        }
    });
}

/// Добавить запись в лог; категория нормализуется
pub async fn log_event(source: &str, category: &str, message: &str) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        timestamp: Set(now),
        source: Set(source.to_string()),
        category: Set(normalize_category(category)),
        message: Set(message.to_string()),
    };

    active.insert(conn()).await?;
    Ok(())
}

/// Последние записи журнала, новые сверху.
/// `category` сужает выборку до одного раздела (kitchen, inventory, payroll, ...).
pub async fn list_logs(category: Option<&str>, limit: Option<u64>) -> anyhow::Result<Vec<LogEntry>> {
    let mut query = Entity::find();
    if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
        query = query.filter(Column::Category.eq(normalize_category(category)));
    }
    let logs: Vec<LogEntry> = query
        .order_by_desc(Column::Id)
        .limit(effective_limit(limit))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(logs)
}

/// Очистить все записи лога
pub async fn clear_all_logs() -> anyhow::Result<()> {
    Entity::delete_many().exec(conn()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_normalized() {
        assert_eq!(normalize_category("kitchen"), "kitchen");
        assert_eq!(normalize_category("  Cold Storage "), "cold_storage");
        assert_eq!(normalize_category("UI_ERROR"), "ui_error");
        assert_eq!(normalize_category("   "), GENERAL_CATEGORY);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(effective_limit(None), MAX_LOG_ROWS);
        assert_eq!(effective_limit(Some(50)), 50);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(1_000_000)), MAX_LOG_ROWS);
    }
}
