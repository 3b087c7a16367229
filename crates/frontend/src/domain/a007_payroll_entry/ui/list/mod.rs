use super::{next_action, payroll_status_badge, run_action};
use crate::domain::a001_staff::ui::picker::{fetch_staff_items, names_by_id};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_json};
use crate::shared::components::{DateRangeInputs, ErrorBox};
use crate::shared::date_utils::{format_date, month_start, today};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_hours, format_money};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a007_payroll_entry::{
    PayrollEntry, PayrollGenerateRequest, PayrollGenerateResponse, PayrollStatus,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct PayrollRow {
    pub id: String,
    pub staff: String,
    pub period: String,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub status: PayrollStatus,
}

impl PayrollRow {
    /// Имя берётся из справочника; если сотрудник удалён, остаётся имя на момент расчёта
    fn from_entry(e: PayrollEntry, staff: &HashMap<String, String>) -> Self {
        Self {
            id: e.base.id.as_string(),
            staff: staff
                .get(&e.staff_ref)
                .cloned()
                .unwrap_or_else(|| e.base.description.clone()),
            period: format!("{} – {}", format_date(e.period_start), format_date(e.period_end)),
            regular_hours: e.regular_hours,
            overtime_hours: e.overtime_hours,
            gross_pay: e.gross_pay,
            deductions: e.deductions,
            net_pay: e.net_pay,
            status: e.status,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayrollTotals {
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
}

pub fn totals(rows: &[PayrollRow]) -> PayrollTotals {
    rows.iter().fold(PayrollTotals::default(), |acc, r| PayrollTotals {
        gross: acc.gross + r.gross_pay,
        deductions: acc.deductions + r.deductions,
        net: acc.net + r.net_pay,
    })
}

fn generate_message(r: &PayrollGenerateResponse) -> String {
    let mut msg = format!(
        "Создано: {}, пересчитано: {}, начислено {}",
        r.created,
        r.replaced,
        format_money(r.total_gross)
    );
    if r.skipped > 0 {
        msg.push_str(&format!(". Пропущено утверждённых: {}", r.skipped));
    }
    msg
}

#[component]
pub fn PayrollList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let date_from = RwSignal::new(month_start(today()));
    let date_to = RwSignal::new(today());
    let items = RwSignal::new(Vec::<PayrollRow>::new());
    let error = RwSignal::new(None::<String>);
    let generating = RwSignal::new(false);

    let fetch = move || {
        let path = format!(
            "/api/payroll?date_from={}&date_to={}",
            date_from.get_untracked(),
            date_to.get_untracked()
        );
        spawn_local(async move {
            let staff = fetch_staff_items()
                .await
                .map(|s| names_by_id(&s))
                .unwrap_or_default();
            match get_json::<Vec<PayrollEntry>>(&path).await {
                Ok(list) => {
                    items.set(
                        list.into_iter()
                            .map(|e| PayrollRow::from_entry(e, &staff))
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
        date_from.track();
        date_to.track();
        if ctx.is_active("a007_payroll_entry") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let generate = move || {
        let request = PayrollGenerateRequest {
            period_start: date_from.get_untracked(),
            period_end: date_to.get_untracked(),
        };
        if request.period_end < request.period_start {
            toast.error("Конец периода раньше начала");
            return;
        }
        generating.set(true);
        spawn_local(async move {
            match post_json::<_, PayrollGenerateResponse>("/api/payroll/generate", &request).await {
                Ok(r) => {
                    toast.success(generate_message(&r));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
            generating.set(false);
        });
    };

    let act = move |id: String, action: &'static str| {
        spawn_local(async move {
            match run_action(&id, action).await {
                Ok(entry) => {
                    toast.success(format!(
                        "{}: {}",
                        entry.base.description,
                        entry.status.display_name()
                    ));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String| {
        spawn_local(async move {
            match delete(&format!("/api/payroll/{}", id)).await {
                Ok(()) => {
                    toast.success("Начисление удалено");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let sums = Memo::new(move |_| items.with(|rows| totals(rows)));

    view! {
        <PageFrame page_id="a007_payroll_entry--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("wallet")}
                    <h1 class="page__title">"Зарплата"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || format!("К выплате {}", format_money(sums.get().net))}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || generating.get())
                        on_click=move |_| generate()
                    >
                        {icon("bar-chart")}
                        " Рассчитать за период"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </div>
            </div>

            <div class="filter-panel-content">
                <DateRangeInputs date_from=date_from date_to=date_to />
            </div>

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=200.0>"Сотрудник"</TableHeaderCell>
                            <TableHeaderCell min_width=180.0>"Период"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Часы"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Сверхур."</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Начислено"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Удержано"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"К выплате"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Статус"</TableHeaderCell>
                            <TableHeaderCell min_width=150.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            items.get()
                                .into_iter()
                                .map(|row| {
                                    let id = row.id.clone();
                                    let id_for_action = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    let action = next_action(row.status);
                                    let deletable = row.status == PayrollStatus::Draft;
                                    view! {
                                        <TableRow on:dblclick=move |_| open(detail_key("a007_payroll_entry", &id))>
                                            <TableCell><TableCellLayout truncate=true>{row.staff}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.period}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_hours(row.regular_hours)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_hours(row.overtime_hours)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_money(row.gross_pay)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_money(row.deductions)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_money(row.net_pay)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{payroll_status_badge(row.status)}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    {action.map(|(action, label)| {
                                                        view! {
                                                            <Button
                                                                appearance=ButtonAppearance::Secondary
                                                                size=ButtonSize::Small
                                                                on_click=move |_| act(id_for_action.clone(), action)
                                                            >
                                                                {label}
                                                            </Button>
                                                        }
                                                    })}
                                                    {deletable.then(|| view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            size=ButtonSize::Small
                                                            on_click=move |_| remove(id_for_delete.clone())
                                                        >
                                                            {icon("delete")}
                                                        </Button>
                                                    })}
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
                <div class="table-totals">
                    <span>{move || format!("Начислено: {}", format_money(sums.get().gross))}</span>
                    <span>{move || format!("Удержано: {}", format_money(sums.get().deductions))}</span>
                    <span>{move || format!("К выплате: {}", format_money(sums.get().net))}</span>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gross: f64, deductions: f64) -> PayrollRow {
        PayrollRow {
            id: "1".into(),
            staff: "Анна".into(),
            period: String::new(),
            regular_hours: 40.0,
            overtime_hours: 0.0,
            gross_pay: gross,
            deductions,
            net_pay: gross - deductions,
            status: PayrollStatus::Draft,
        }
    }

    #[test]
    fn totals_sum_all_rows() {
        let t = totals(&[row(1000.0, 100.0), row(500.0, 50.0)]);
        assert_eq!(t.gross, 1500.0);
        assert_eq!(t.deductions, 150.0);
        assert_eq!(t.net, 1350.0);
        assert_eq!(totals(&[]), PayrollTotals::default());
    }

    #[test]
    fn generate_message_mentions_skipped_only_when_present() {
        let mut r = PayrollGenerateResponse {
            created: 3,
            replaced: 1,
            skipped: 0,
            total_gross: 12000.0,
        };
        assert!(!generate_message(&r).contains("Пропущено"));
        r.skipped = 2;
        assert!(generate_message(&r).ends_with("Пропущено утверждённых: 2"));
    }
}
