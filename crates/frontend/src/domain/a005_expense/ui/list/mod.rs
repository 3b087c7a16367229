use super::summary::CategoryTotals;
use crate::domain::a003_vendor::ui::picker::{fetch_vendor_items, vendor_names};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_empty};
use crate::shared::components::{DateRangeInputs, ErrorBox};
use crate::shared::date_utils::{format_date, month_start, today};
use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a005_expense::{Expense, ExpenseSummary};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct ExpenseRow {
    pub id: String,
    pub code: String,
    pub date: String,
    pub description: String,
    pub category: &'static str,
    pub payment: &'static str,
    pub vendor: String,
    pub amount: f64,
}

impl ExpenseRow {
    fn from_expense(e: Expense, vendors: &HashMap<String, String>) -> Self {
        Self {
            id: e.base.id.as_string(),
            date: format_date(e.expense_date),
            category: e.category.display_name(),
            payment: e.payment_method.display_name(),
            vendor: e
                .vendor_ref
                .as_ref()
                .and_then(|v| vendors.get(v).cloned())
                .unwrap_or_else(|| "—".to_string()),
            amount: e.amount,
            code: e.base.code,
            description: e.base.description,
        }
    }
}

#[component]
pub fn ExpenseList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let date_from = RwSignal::new(month_start(today()));
    let date_to = RwSignal::new(today());
    let items = RwSignal::new(Vec::<ExpenseRow>::new());
    let summary = RwSignal::new(None::<ExpenseSummary>);
    let error = RwSignal::new(None::<String>);

    let fetch = move || {
        let query = format!(
            "date_from={}&date_to={}",
            date_from.get_untracked(),
            date_to.get_untracked()
        );
        spawn_local(async move {
            let vendors = fetch_vendor_items()
                .await
                .map(|v| vendor_names(&v))
                .unwrap_or_default();
            let result = async {
                let list = get_json::<Vec<Expense>>(&format!("/api/expense?{}", query)).await?;
                let s = get_json::<ExpenseSummary>(&format!("/api/expense/summary?{}", query)).await?;
                Ok::<_, String>((list, s))
            }
            .await;
            match result {
                Ok((list, s)) => {
                    items.set(
                        list.into_iter()
                            .map(|e| ExpenseRow::from_expense(e, &vendors))
                            .collect(),
                    );
                    summary.set(Some(s));
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
        date_from.track();
        date_to.track();
        if ctx.is_active("a005_expense") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/expense/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые расходы добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String| {
        spawn_local(async move {
            match delete(&format!("/api/expense/{}", id)).await {
                Ok(()) => {
                    toast.success("Расход удалён");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let by_category = Signal::derive(move || {
        summary.get().map(|s| s.by_category).unwrap_or_default()
    });

    view! {
        <PageFrame page_id="a005_expense--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("receipt")}
                    <h1 class="page__title">"Расходы"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || summary.get().map(|s| format_money(s.total)).unwrap_or_default()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a005_expense"))>
                        {icon("plus")}
                        " Новый расход"
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

            <div class="filter-panel-content">
                <DateRangeInputs date_from=date_from date_to=date_to />
            </div>

            <ErrorBox error=error />

            <div class="page-content page-content--split">
                <div class="page-content__main">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=90.0>"Код"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Дата"</TableHeaderCell>
                                <TableHeaderCell min_width=220.0>"Описание"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Статья"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Оплата"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Поставщик"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Сумма"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                items.get()
                                    .into_iter()
                                    .map(|row| {
                                        let id = row.id.clone();
                                        let id_for_delete = row.id.clone();
                                        view! {
                                            <TableRow on:dblclick=move |_| open(detail_key("a005_expense", &id))>
                                                <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.date}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{row.description}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.category}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.payment}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{row.vendor}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right"><TableCellLayout>{format_money(row.amount)}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        on_click=move |_| remove(id_for_delete.clone())
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
                <div class="page-content__side">
                    <h3 class="section-title">"По статьям"</h3>
                    <CategoryTotals totals=by_category />
                </div>
            </div>
        </PageFrame>
    }
}
