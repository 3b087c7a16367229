//! Sidebar: сворачиваемые группы меню, пункт открывает таб

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
}

fn item(key: &'static str, icon: &'static str) -> (&'static str, &'static str, &'static str) {
    (key, tab_label_for_key(key), icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "kitchen",
            label: "Кухня",
            icon: "kitchen",
            items: vec![
                item("a006_kitchen_order_board", "clock"),
                item("a006_kitchen_order", "list"),
            ],
        },
        MenuGroup {
            id: "inventory",
            label: "Склад",
            icon: "package",
            items: vec![
                item("a004_inventory_overview", "alert-triangle"),
                item("a004_inventory_item", "layers"),
                item("a003_vendor", "truck"),
            ],
        },
        MenuGroup {
            id: "staff",
            label: "Персонал",
            icon: "users",
            items: vec![
                item("a001_staff", "users"),
                item("a002_shift_week", "calendar"),
                item("a002_shift", "list"),
            ],
        },
        MenuGroup {
            id: "finance",
            label: "Финансы",
            icon: "wallet",
            items: vec![
                item("a005_expense", "receipt"),
                item("a007_payroll_entry", "wallet"),
            ],
        },
        MenuGroup {
            id: "dashboard",
            label: "Дашборд",
            icon: "bar-chart",
            items: vec![item("d400_operations_summary", "bar-chart")],
        },
        MenuGroup {
            id: "system",
            label: "Система",
            icon: "settings",
            items: vec![item("sys_logs", "file-text")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["kitchen".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let gid_show = group_id;
                let items = StoredValue::new(group.items);

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |items| {
                                    if let Some(pos) = items.iter().position(|x| x == &gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_show)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.is_active(key)
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for (key, label, _) in group.items {
                assert!(!label.is_empty(), "no label for {}", key);
            }
        }
    }
}
