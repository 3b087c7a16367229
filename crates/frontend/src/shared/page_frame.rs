//! PageFrame — root wrapper for every page rendered inside a tab.
//!
//! Sets `id="{tab_key}--{category}"` and `data-page-category` on the root
//! element, so a page found in the DOM inspector maps straight to its module.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Таблица записей
    List,
    /// Форма одной записи
    Detail,
    /// Сводка/доска
    Dashboard,
    System,
}

impl PageCategory {
    pub fn code(&self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Detail => "detail",
            PageCategory::Dashboard => "dashboard",
            PageCategory::System => "system",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PageCategory::List | PageCategory::System => "page",
            PageCategory::Detail => "page page--detail",
            PageCategory::Dashboard => "page page--dashboard",
        }
    }
}

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a006_kitchen_order--board"`
    page_id: &'static str,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=category.css_class() data-page-category=category.code()>
            {children()}
        </div>
    }
}
