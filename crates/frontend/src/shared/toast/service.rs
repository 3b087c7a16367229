use crate::shared::client_log::log_to_server;
use contracts::shared::notifications::NotificationVariant;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Время жизни тоста, мс
pub const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    pub toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    /// Показывает тост и планирует его скрытие
    pub fn push(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        variant: NotificationVariant,
    ) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                title: title.into(),
                message: message.into(),
                variant,
            })
        });

        let this = *self;
        Timeout::new(AUTO_DISMISS_MS, move || this.dismiss(id)).forget();
        id
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push("Готово", message, NotificationVariant::Default);
    }

    /// Ошибка запроса к серверу
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        log_to_server("ui_error", message.clone());
        self.push("Ошибка", message, NotificationVariant::Destructive);
    }

    pub fn dismiss(&self, id: u64) {
        // Тост мог быть уже закрыт вручную
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found in context")
}
