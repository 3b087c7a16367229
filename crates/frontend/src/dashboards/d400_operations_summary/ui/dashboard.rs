use crate::dashboards::d400_operations_summary::api;
use crate::domain::a005_expense::ui::summary::CategoryTotals;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{DateRangeInputs, ErrorBox, StatCard, StatTone};
use crate::shared::date_utils::{format_date, format_datetime, month_start, today};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_number_with_decimals};
use crate::shared::page_frame::{PageCategory, PageFrame};
use contracts::dashboards::d400_operations_summary::OperationsSummaryResponse;
use contracts::shared::equipment::TemperatureReading;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Тон карточки расходов: сколько уходит на зарплату относительно прочих трат
fn labor_share_tone(payroll: f64, expenses: f64) -> StatTone {
    let total = payroll + expenses;
    if total <= 0.0 {
        return StatTone::Neutral;
    }
    match payroll / total {
        s if s > 0.5 => StatTone::Bad,
        s if s > 0.35 => StatTone::Warning,
        _ => StatTone::Good,
    }
}

fn out_of_range_count(readings: &[TemperatureReading]) -> usize {
    readings.iter().filter(|r| !r.in_range()).count()
}

#[component]
pub fn OperationsSummaryDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let date_from = RwSignal::new(month_start(today()));
    let date_to = RwSignal::new(today());
    let (data, set_data) = signal(None::<OperationsSummaryResponse>);
    let (temperatures, set_temperatures) = signal(Vec::<TemperatureReading>::new());
    let (loading, set_loading) = signal(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        let from = date_from.get_untracked();
        let to = date_to.get_untracked();
        set_loading.set(true);
        spawn_local(async move {
            match api::get_summary(from, to).await {
                Ok(response) => {
                    set_data.set(Some(response));
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load D400 summary: {}", e);
                    error.set(Some(e));
                }
            }
            match api::get_temperatures().await {
                Ok(readings) => set_temperatures.set(readings),
                Err(e) => log::warn!("temperatures not loaded: {}", e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        date_from.track();
        date_to.track();
        if ctx.is_active("d400_operations_summary") {
            load();
        }
    });

    let kitchen = move || data.get().map(|d| d.kitchen).unwrap_or_default();
    let inventory = move || data.get().map(|d| d.inventory).unwrap_or_default();
    let expenses_total = move || data.get().map(|d| d.expenses_total).unwrap_or_default();
    let payroll_gross = move || data.get().map(|d| d.payroll_gross).unwrap_or_default();
    let by_category = Signal::derive(move || {
        data.get().map(|d| d.expenses_by_category).unwrap_or_default()
    });

    view! {
        <PageFrame page_id="d400_operations_summary--dashboard" category=PageCategory::Dashboard>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("bar-chart")}
                    <h1 class="page__title">"Сводка"</h1>
                    {move || data.get().map(|d| view! {
                        <span class="page__subtitle">
                            {format!("{} – {}", format_date(d.date_from), format_date(d.date_to))}
                        </span>
                    })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || loading.get())
                        on_click=move |_| load()
                    >
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </div>
            </div>

            <div class="filter-panel-content">
                <DateRangeInputs date_from=date_from date_to=date_to />
            </div>

            <ErrorBox error=error />

            <h3 class="section-title">"Кухня"</h3>
            <div class="stat-grid">
                <StatCard
                    label="Заказы в работе"
                    icon_name="kitchen"
                    value=Signal::derive(move || kitchen().active_orders.to_string())
                    tone=Signal::derive(|| StatTone::Neutral)
                />
                <StatCard
                    label="Просрочено"
                    icon_name="clock"
                    value=Signal::derive(move || kitchen().overdue_orders.to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(kitchen().overdue_orders, true))
                />
                <StatCard
                    label="Выдано за период"
                    icon_name="check"
                    value=Signal::derive(move || kitchen().delivered_in_period.to_string())
                    tone=Signal::derive(|| StatTone::Good)
                />
                <StatCard
                    label="Сотрудников на смене"
                    icon_name="users"
                    value=Signal::derive(move || {
                        data.get().map(|d| d.staff_on_shift_today).unwrap_or_default().to_string()
                    })
                    tone=Signal::derive(|| StatTone::Neutral)
                    subtitle=Signal::derive(|| Some("сегодня".to_string()))
                />
            </div>

            <h3 class="section-title">"Склад"</h3>
            <div class="stat-grid">
                <StatCard
                    label="Нет в наличии"
                    icon_name="package"
                    value=Signal::derive(move || inventory().out_of_stock.to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(inventory().out_of_stock, true))
                />
                <StatCard
                    label="Заканчивается"
                    icon_name="layers"
                    value=Signal::derive(move || inventory().low_stock.to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(inventory().low_stock, false))
                />
                <StatCard
                    label="Истекает срок"
                    icon_name="alert-triangle"
                    value=Signal::derive(move || inventory().expiring_soon.to_string())
                    tone=Signal::derive(move || StatTone::for_problem_count(inventory().expiring_soon, false))
                />
                <StatCard
                    label="Стоимость запасов"
                    icon_name="database"
                    value=Signal::derive(move || format_money(inventory().stock_value))
                    tone=Signal::derive(|| StatTone::Neutral)
                />
            </div>

            <h3 class="section-title">"Финансы"</h3>
            <div class="stat-grid">
                <StatCard
                    label="Расходы"
                    icon_name="receipt"
                    value=Signal::derive(move || format_money(expenses_total()))
                    tone=Signal::derive(|| StatTone::Neutral)
                />
                <StatCard
                    label="Фонд оплаты труда"
                    icon_name="wallet"
                    value=Signal::derive(move || format_money(payroll_gross()))
                    tone=Signal::derive(move || labor_share_tone(payroll_gross(), expenses_total()))
                    subtitle=Signal::derive(move || {
                        let total = payroll_gross() + expenses_total();
                        (total > 0.0).then(|| {
                            format!(
                                "{}% от всех затрат",
                                format_number_with_decimals(payroll_gross() / total * 100.0, 0)
                            )
                        })
                    })
                />
            </div>

            <div class="page-content page-content--split">
                <div class="page-content__main">
                    <h3 class="section-title">"Расходы по статьям"</h3>
                    <CategoryTotals totals=by_category />
                </div>
                <div class="page-content__side">
                    <h3 class="section-title">
                        {icon("thermometer")}
                        " Холодильники"
                        {move || {
                            let bad = out_of_range_count(&temperatures.get());
                            (bad > 0).then(|| view! {
                                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                                    {format!("вне нормы: {}", bad)}
                                </Badge>
                            })
                        }}
                    </h3>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Оборудование"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"°C"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Норма"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Замер"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                temperatures.get()
                                    .into_iter()
                                    .map(|r| {
                                        let ok = r.in_range();
                                        view! {
                                            <TableRow class=if ok { "" } else { "table__row--alert" }>
                                                <TableCell><TableCellLayout>{r.unit.clone()}</TableCellLayout></TableCell>
                                                <TableCell class="table__cell--right">
                                                    <TableCellLayout>{format_number_with_decimals(r.celsius, 1)}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        {format!("{}…{}", r.min_celsius, r.max_celsius)}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell><TableCellLayout>{format_datetime(r.measured_at)}</TableCellLayout></TableCell>
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn labor_share_thresholds() {
        assert_eq!(labor_share_tone(0.0, 0.0), StatTone::Neutral);
        assert_eq!(labor_share_tone(300.0, 700.0), StatTone::Good);
        assert_eq!(labor_share_tone(400.0, 600.0), StatTone::Warning);
        assert_eq!(labor_share_tone(600.0, 400.0), StatTone::Bad);
    }

    #[test]
    fn counts_readings_outside_range() {
        let reading = |celsius| TemperatureReading {
            unit: "Холодильник".into(),
            celsius,
            min_celsius: 0.0,
            max_celsius: 5.0,
            measured_at: Utc::now(),
        };
        assert_eq!(out_of_range_count(&[reading(3.0), reading(6.5), reading(-1.0)]), 2);
        assert_eq!(out_of_range_count(&[]), 0);
    }
}
