//! Остатки и дозаказ: три группы проблемных позиций и предложение
//! заказа по поставщикам

use super::stock_level_badge;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, title_for_key};
use crate::shared::api_utils::get_json;
use crate::shared::components::{ErrorBox, StatCard, StatTone};
use crate::shared::date_utils::{format_date_opt, today};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a004_inventory_item::InventoryItem;
use contracts::domain::common::AggregateId;
use contracts::shared::inventory_buckets::{InventoryBuckets, ReorderLine, ReorderSuggestion};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn reorder_total(suggestions: &[ReorderSuggestion]) -> f64 {
    suggestions.iter().map(|s| s.total_cost).sum()
}

/// Колонка одной группы; двойной клик открывает позицию
/// Готовые к выводу ячейки строки дозаказа
#[derive(Debug, Clone, PartialEq)]
struct ReorderCells {
    name: String,
    current: String,
    suggested: String,
    cost: String,
}

impl ReorderCells {
    fn from_line(line: &ReorderLine) -> Self {
        Self {
            name: line.item_name.clone(),
            current: format_quantity(line.current_quantity, &line.unit),
            suggested: format_quantity(line.suggested_quantity, &line.unit),
            cost: format_money(line.estimated_cost),
        }
    }
}

#[component]
fn BucketColumn(
    title: &'static str,
    #[prop(into)] items: Signal<Vec<InventoryItem>>,
    /// Показывать срок годности вместо остатка
    #[prop(optional)]
    show_expiry: bool,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let open = move |id: String| {
        let key = detail_key("a004_inventory_item", &id);
        ctx.open_tab(&key, &title_for_key(&key));
    };

    view! {
        <div class="bucket">
            <div class="bucket__header">
                <span class="bucket__title">{title}</span>
                <span class="bucket__count">{move || items.get().len()}</span>
            </div>
            {move || {
                let list = items.get();
                if list.is_empty() {
                    return view! { <div class="bucket__empty text-muted">"Пусто"</div> }.into_any();
                }
                list.into_iter()
                    .map(|item| {
                        let id = item.base.id.as_string();
                        let detail = if show_expiry {
                            format!("до {}", format_date_opt(item.expiry_date))
                        } else {
                            format!(
                                "{} / мин. {}",
                                format_quantity(item.quantity, &item.unit),
                                format_quantity(item.min_quantity, &item.unit)
                            )
                        };
                        let level = item.stock_level();
                        view! {
                            <div class="bucket__item" on:dblclick=move |_| open(id.clone())>
                                <span class="bucket__item-name">{item.base.description}</span>
                                <span class="bucket__item-detail">{detail}</span>
                                {(!show_expiry).then(|| stock_level_badge(level))}
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
pub fn InventoryOverview() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let buckets = RwSignal::new(InventoryBuckets::default());
    let reorder = RwSignal::new(Vec::<ReorderSuggestion>::new());
    let error = RwSignal::new(None::<String>);

    let fetch = move || {
        spawn_local(async move {
            let result = async {
                let b = get_json::<InventoryBuckets>("/api/inventory/buckets").await?;
                let r = get_json::<Vec<ReorderSuggestion>>("/api/inventory/reorder").await?;
                Ok::<_, String>((b, r))
            }
            .await;
            match result {
                Ok((b, r)) => {
                    buckets.set(b);
                    reorder.set(r);
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
        if ctx.is_active("a004_inventory_overview") {
            fetch();
        }
    });

    let low = Signal::derive(move || buckets.get().low_stock);
    let out = Signal::derive(move || buckets.get().out_of_stock);
    let expiring = Signal::derive(move || buckets.get().expiring_soon);

    view! {
        <PageFrame page_id="a004_inventory_item--overview" category=PageCategory::Dashboard>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("alert-triangle")}
                    <h1 class="page__title">"Остатки и дозаказ"</h1>
                    <span class="page__subtitle">{move || format!("на {}", today().format("%d.%m.%Y"))}</span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            <div class="stat-cards">
                <StatCard
                    label="Нет в наличии"
                    icon_name="package"
                    value=Signal::derive(move || out.get().len().to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(out.get().len(), true))
                />
                <StatCard
                    label="Заканчивается"
                    icon_name="layers"
                    value=Signal::derive(move || low.get().len().to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(low.get().len(), false))
                />
                <StatCard
                    label="Истекает срок"
                    icon_name="clock"
                    value=Signal::derive(move || expiring.get().len().to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(expiring.get().len(), false))
                />
                <StatCard
                    label="Дозаказ"
                    icon_name="truck"
                    value=Signal::derive(move || format_money(reorder_total(&reorder.get())))
                    tone=Signal::derive(|| StatTone::Neutral)
                    subtitle=Signal::derive(move || Some(format!("поставщиков: {}", reorder.get().len())))
                />
            </div>

            <div class="buckets">
                <BucketColumn title="Нет в наличии" items=out />
                <BucketColumn title="Заканчивается" items=low />
                <BucketColumn title="Истекает срок" items=expiring show_expiry=true />
            </div>

            <h2 class="section-title">"Предложение по дозаказу"</h2>
            {move || {
                let suggestions = reorder.get();
                if suggestions.is_empty() {
                    return view! { <div class="text-muted">"Дозаказ не нужен"</div> }.into_any();
                }
                suggestions
                    .into_iter()
                    .map(|s| {
                        let vendor = s
                            .vendor_name
                            .clone()
                            .unwrap_or_else(|| "Поставщик не указан".to_string());
                        view! {
                            <div class="reorder-group">
                                <div class="reorder-group__header">
                                    <span>{vendor}</span>
                                    <span>{format_money(s.total_cost)}</span>
                                </div>
                                <Table attr:style="width: 100%;">
                                    <TableHeader>
                                        <TableRow>
                                            <TableHeaderCell>"Позиция"</TableHeaderCell>
                                            <TableHeaderCell>"Остаток"</TableHeaderCell>
                                            <TableHeaderCell>"Заказать"</TableHeaderCell>
                                            <TableHeaderCell>"Сумма"</TableHeaderCell>
                                        </TableRow>
                                    </TableHeader>
                                    <TableBody>
                                        {s.lines
                                            .into_iter()
                                            .map(|line| {
                                                let cells = ReorderCells::from_line(&line);
                                                view! {
                                                    <TableRow>
                                                        <TableCell><TableCellLayout>{cells.name}</TableCellLayout></TableCell>
                                                        <TableCell class="table__cell--right">
                                                            <TableCellLayout>{cells.current}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell class="table__cell--right">
                                                            <TableCellLayout>{cells.suggested}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell class="table__cell--right">
                                                            <TableCellLayout>{cells.cost}</TableCellLayout>
                                                        </TableCell>
                                                    </TableRow>
                                                }
                                            })
                                            .collect_view()}
                                    </TableBody>
                                </Table>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_total_sums_groups() {
        let s = |total: f64| ReorderSuggestion {
            vendor_ref: None,
            vendor_name: None,
            lines: Vec::new(),
            total_cost: total,
        };
        assert_eq!(reorder_total(&[]), 0.0);
        assert_eq!(reorder_total(&[s(100.0), s(250.5)]), 350.5);
    }

    #[test]
    fn reorder_cells_share_unit() {
        let line = ReorderLine {
            item_id: "1".into(),
            item_name: "Молоко".into(),
            unit: "л".into(),
            current_quantity: 2.0,
            suggested_quantity: 8.5,
            estimated_cost: 1020.0,
        };
        let cells = ReorderCells::from_line(&line);
        assert_eq!(cells.name, "Молоко");
        assert_eq!(cells.current, "2 л");
        assert_eq!(cells.suggested, "8.5 л");
        assert_eq!(cells.cost, "1 020.00");
    }
}
