use crate::app_shell::MainLayout;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tabs, sidebar and URL sync for the whole app
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());

    view! {
        <MainLayout />
        <ToastHost />
    }
}
