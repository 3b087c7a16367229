use super::feed::{FeedCursor, POLL_INTERVAL_MS};
use super::service::use_toast;
use crate::shared::api_utils::get_json;
use crate::shared::icons::icon;
use contracts::shared::notifications::{Notification, NotificationVariant};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Стек тостов в правом нижнем углу + опрос ленты уведомлений бэкенда
#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    spawn_local(async move {
        let mut cursor = FeedCursor::default();
        while alive.load(Ordering::Relaxed) {
            match get_json::<Vec<Notification>>(&cursor.query_path()).await {
                Ok(batch) => {
                    for n in cursor.accept(batch) {
                        toast.push(n.title, n.message, n.variant);
                    }
                }
                // Не тост: при недоступном сервере он повторялся бы каждые 5 секунд
                Err(e) => log::warn!("notification poll failed: {}", e),
            }
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });

    view! {
        <div class="toast-host">
            <For
                each=move || toast.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    let destructive = t.variant == NotificationVariant::Destructive;
                    view! {
                        <div class="toast" class:toast--destructive=destructive role="status">
                            <div class="toast__body">
                                <div class="toast__title">{t.title}</div>
                                <div class="toast__message">{t.message}</div>
                            </div>
                            <button
                                class="toast__close"
                                title="Закрыть"
                                on:click=move |_| toast.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
