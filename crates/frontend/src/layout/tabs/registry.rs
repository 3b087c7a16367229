//! Tab content registry - маппинг tab.key → View.
//!
//! Все ключи табов собраны здесь; заголовки живут в `tab_labels`.

use super::tab_labels::parse_detail_key;
use crate::dashboards::d400_operations_summary::ui::OperationsSummaryDashboard;
use crate::domain::a001_staff::ui::details::StaffDetails;
use crate::domain::a001_staff::ui::list::StaffList;
use crate::domain::a002_shift::ui::details::ShiftDetails;
use crate::domain::a002_shift::ui::list::ShiftList;
use crate::domain::a002_shift::ui::week::WeekScheduleView;
use crate::domain::a003_vendor::ui::details::VendorDetails;
use crate::domain::a003_vendor::ui::list::VendorList;
use crate::domain::a004_inventory_item::ui::details::InventoryItemDetails;
use crate::domain::a004_inventory_item::ui::list::InventoryList;
use crate::domain::a004_inventory_item::ui::overview::InventoryOverview;
use crate::domain::a005_expense::ui::details::ExpenseDetails;
use crate::domain::a005_expense::ui::list::ExpenseList;
use crate::domain::a006_kitchen_order::ui::board::KitchenBoard;
use crate::domain::a006_kitchen_order::ui::details::KitchenOrderDetails;
use crate::domain::a006_kitchen_order::ui::list::KitchenOrderList;
use crate::domain::a007_payroll_entry::ui::details::PayrollEntryDetails;
use crate::domain::a007_payroll_entry::ui::list::PayrollList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::logs::LogsPage;
use leptos::logging::log;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
///
/// `tabs_store` нужен detail-view: после сохранения или отмены таб закрывается.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        // Kitchen
        "a006_kitchen_order_board" => view! { <KitchenBoard /> }.into_any(),
        "a006_kitchen_order" => view! { <KitchenOrderList /> }.into_any(),

        // Inventory
        "a004_inventory_item" => view! { <InventoryList /> }.into_any(),
        "a004_inventory_overview" => view! { <InventoryOverview /> }.into_any(),
        "a003_vendor" => view! { <VendorList /> }.into_any(),

        // Staff
        "a001_staff" => view! { <StaffList /> }.into_any(),
        "a002_shift" => view! { <ShiftList /> }.into_any(),
        "a002_shift_week" => view! { <WeekScheduleView /> }.into_any(),

        // Finance
        "a005_expense" => view! { <ExpenseList /> }.into_any(),
        "a007_payroll_entry" => view! { <PayrollList /> }.into_any(),

        // Dashboard, system
        "d400_operations_summary" => view! { <OperationsSummaryDashboard /> }.into_any(),
        "sys_logs" => view! { <LogsPage /> }.into_any(),

        _ => match parse_detail_key(key) {
            Some((aggregate, id)) => render_detail(aggregate, id.map(str::to_string), key, tabs_store),
            None => {
                log!("Unknown tab key: '{}'", key);
                view! {
                    <div class="page">
                        <div class="placeholder">{format!("Неизвестный раздел: {}", key)}</div>
                    </div>
                }
                .into_any()
            }
        },
    }
}

fn render_detail(
    aggregate: &str,
    id: Option<String>,
    key: &str,
    tabs_store: AppGlobalContext,
) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match aggregate {
        "a001_staff" => view! { <StaffDetails id=id on_saved=close on_cancel=close /> }.into_any(),
        "a002_shift" => view! { <ShiftDetails id=id on_saved=close on_cancel=close /> }.into_any(),
        "a003_vendor" => view! { <VendorDetails id=id on_saved=close on_cancel=close /> }.into_any(),
        "a004_inventory_item" => {
            view! { <InventoryItemDetails id=id on_saved=close on_cancel=close /> }.into_any()
        }
        "a005_expense" => view! { <ExpenseDetails id=id on_saved=close on_cancel=close /> }.into_any(),
        "a006_kitchen_order" => {
            view! { <KitchenOrderDetails id=id on_saved=close on_cancel=close /> }.into_any()
        }
        // Начисления создаются только генерацией, формы «новое» нет
        "a007_payroll_entry" => match id {
            Some(id) => view! { <PayrollEntryDetails id=id on_saved=close on_cancel=close /> }.into_any(),
            None => view! { <div class="placeholder">"Начисления создаются расчётом за период"</div> }.into_any(),
        },
        _ => view! { <div class="placeholder">{aggregate.to_string()}</div> }.into_any(),
    }
}
