//! TopHeader - верхняя панель: переключатель сайдбара, название, сводка кухни

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();
    let open = move |key: &str| ctx.open_tab(key, tab_label_for_key(key));

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Restaurant Ops"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    title="Кухня"
                    on:click=move |_| open("a006_kitchen_order_board")
                >
                    {icon("kitchen")}
                </button>
                <button
                    class="top-header__icon-btn"
                    title="Сводка"
                    on:click=move |_| open("d400_operations_summary")
                >
                    {icon("bar-chart")}
                </button>
            </div>
        </div>
    }
}
