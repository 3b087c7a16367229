pub mod repository;

use repository::log_event_internal;

/// Запись бизнес-события в журнал `system_log`
///
/// # Примеры
/// ```ignore
/// logger::log("kitchen", "Заказ ORD-0042: статус «Готов»");
/// logger::log("inventory", "Молоко: приход 12 л");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
