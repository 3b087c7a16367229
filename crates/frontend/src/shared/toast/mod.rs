//! Всплывающие уведомления (тосты)
//!
//! - `service` - `ToastService` в контексте приложения
//! - `feed` - курсор ленты уведомлений бэкенда
//! - `host` - отрисовка тостов и опрос ленты

pub mod feed;
pub mod host;
pub mod service;

pub use host::ToastHost;
pub use service::{use_toast, Toast, ToastService};
