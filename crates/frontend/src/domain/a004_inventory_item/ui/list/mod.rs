use super::stock_level_badge;
use crate::domain::a003_vendor::ui::picker::{fetch_vendor_items, vendor_names};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_empty};
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a004_inventory_item::{InventoryItem, StockLevel};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct InventoryRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub quantity: String,
    pub min_quantity: String,
    pub level: StockLevel,
    pub value: f64,
    pub vendor: String,
    pub expiry: String,
}

impl InventoryRow {
    fn from_item(item: InventoryItem, vendors: &HashMap<String, String>) -> Self {
        Self {
            id: item.base.id.as_string(),
            quantity: format_quantity(item.quantity, &item.unit),
            min_quantity: format_quantity(item.min_quantity, &item.unit),
            level: item.stock_level(),
            value: item.stock_value(),
            vendor: item
                .vendor_ref
                .as_ref()
                .and_then(|v| vendors.get(v).cloned())
                .unwrap_or_else(|| "—".to_string()),
            expiry: format_date_opt(item.expiry_date),
            code: item.base.code,
            name: item.base.description,
            category: item.category,
        }
    }
}

/// Фильтр списка по уровню остатка
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LevelFilter {
    All,
    NeedsAttention,
}

fn matches_filter(row: &InventoryRow, filter: LevelFilter) -> bool {
    match filter {
        LevelFilter::All => true,
        LevelFilter::NeedsAttention => row.level != StockLevel::Ok,
    }
}

#[component]
pub fn InventoryList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let items = RwSignal::new(Vec::<InventoryRow>::new());
    let error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(LevelFilter::All);

    let fetch = move || {
        spawn_local(async move {
            let vendors = fetch_vendor_items()
                .await
                .map(|v| vendor_names(&v))
                .unwrap_or_default();
            match get_json::<Vec<InventoryItem>>("/api/inventory").await {
                Ok(list) => {
                    items.set(
                        list.into_iter()
                            .map(|i| InventoryRow::from_item(i, &vendors))
                            .collect(),
                    );
                    error.set(None);
                }
                Err(e) => {
                    error.set(Some(e.clone()));
                    toast.error(e);
                }
            }
        });
    };

    Effect::new(move |_| {
        if ctx.is_active("a004_inventory_item") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/inventory/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые позиции добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String, name: String| {
        spawn_local(async move {
            match delete(&format!("/api/inventory/{}", id)).await {
                Ok(()) => {
                    toast.success(format!("Позиция «{}» удалена", name));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let total_value = move || items.with(|rows| rows.iter().map(|r| r.value).sum::<f64>());

    view! {
        <PageFrame page_id="a004_inventory_item--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("layers")}
                    <h1 class="page__title">"Склад"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || items.get().len().to_string()}</span>
                    </Badge>
                    <span class="page__subtitle">{move || format!("На сумму {}", format_money(total_value()))}</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a004_inventory_item"))>
                        {icon("plus")}
                        " Новая позиция"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| filter.update(|f| {
                            *f = if *f == LevelFilter::All { LevelFilter::NeedsAttention } else { LevelFilter::All }
                        })
                    >
                        {icon("alert-triangle")}
                        {move || if filter.get() == LevelFilter::All { " Только проблемные" } else { " Все позиции" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| load_testdata()>
                        {icon("database")}
                        " Тестовые данные"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=90.0>"Код"</TableHeaderCell>
                            <TableHeaderCell min_width=200.0>"Наименование"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Категория"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Остаток"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Минимум"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Уровень"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Сумма"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Поставщик"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Годен до"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let current = filter.get();
                            items.get()
                                .into_iter()
                                .filter(|row| matches_filter(row, current))
                                .map(|row| {
                                    let id = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    let name = row.name.clone();
                                    view! {
                                        <TableRow on:dblclick=move |_| open(detail_key("a004_inventory_item", &id))>
                                            <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{row.name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.category}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{row.quantity}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{row.min_quantity}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{stock_level_badge(row.level)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_money(row.value)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{row.vendor}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.expiry}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| remove(id_for_delete.clone(), name.clone())
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_inventory_item::InventoryItemDto;

    fn row(qty: f64, min: f64) -> InventoryRow {
        let item = InventoryItem::new_for_insert(
            &InventoryItemDto {
                description: "Сливки".into(),
                unit: "л".into(),
                quantity: qty,
                min_quantity: min,
                unit_cost: 200.0,
                ..Default::default()
            },
            "INV-7".into(),
        );
        InventoryRow::from_item(item, &HashMap::new())
    }

    #[test]
    fn attention_filter_hides_healthy_rows() {
        assert!(matches_filter(&row(10.0, 2.0), LevelFilter::All));
        assert!(!matches_filter(&row(10.0, 2.0), LevelFilter::NeedsAttention));
        assert!(matches_filter(&row(1.0, 2.0), LevelFilter::NeedsAttention));
        assert!(matches_filter(&row(0.0, 2.0), LevelFilter::NeedsAttention));
    }

    #[test]
    fn row_formats_quantity_and_value() {
        let r = row(1.5, 2.0);
        assert_eq!(r.quantity, "1.5 л");
        assert_eq!(r.value, 300.0);
        assert_eq!(r.vendor, "—");
    }
}
