//! График на неделю: семь колонок по дням, в каждой смены и сумма часов

use crate::domain::a001_staff::ui::picker::{fetch_staff_items, names_by_id};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::get_json;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::{format_date, format_time, today};
use crate::shared::icons::icon;
use crate::shared::number_format::format_hours;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use contracts::domain::a002_shift::{week_start, WeekSchedule};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Пн",
        Weekday::Tue => "Вт",
        Weekday::Wed => "Ср",
        Weekday::Thu => "Чт",
        Weekday::Fri => "Пт",
        Weekday::Sat => "Сб",
        Weekday::Sun => "Вс",
    }
}

fn week_total(schedule: &WeekSchedule) -> f64 {
    schedule.days.iter().map(|d| d.total_hours).sum()
}

#[component]
pub fn WeekScheduleView() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let monday = RwSignal::new(week_start(today()));
    let schedule = RwSignal::new(None::<WeekSchedule>);
    let names = RwSignal::new(HashMap::<String, String>::new());
    let error = RwSignal::new(None::<String>);

    let fetch = move |date: NaiveDate| {
        spawn_local(async move {
            if let Ok(staff) = fetch_staff_items().await {
                names.set(names_by_id(&staff));
            }
            match get_json::<WeekSchedule>(&format!("/api/shift/week?date={}", date)).await {
                Ok(week) => {
                    schedule.set(Some(week));
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
        let date = monday.get();
        if ctx.is_active("a002_shift_week") {
            fetch(date);
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    view! {
        <PageFrame page_id="a002_shift--week" category=PageCategory::Dashboard>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("calendar")}
                    <h1 class="page__title">"График на неделю"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || schedule.get().map(|w| format_hours(week_total(&w))).unwrap_or_default()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| monday.update(|d| *d -= Duration::days(7))>
                        {icon("chevron-left")}
                    </Button>
                    <span class="week-label">
                        {move || {
                            let start = monday.get();
                            format!("{} – {}", format_date(start), format_date(start + Duration::days(6)))
                        }}
                    </span>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| monday.update(|d| *d += Duration::days(7))>
                        {icon("chevron-right")}
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| monday.set(week_start(today()))>
                        "Текущая"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a002_shift"))>
                        {icon("plus")}
                        " Смена"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            <div class="week-grid">
                {move || {
                    let Some(week) = schedule.get() else {
                        return view! { <div class="text-muted">"Загрузка…"</div> }.into_any();
                    };
                    let names = names.get();
                    week.days
                        .into_iter()
                        .map(|day| {
                            let is_today = day.date == today();
                            let shifts = day
                                .shifts
                                .into_iter()
                                .map(|s| {
                                    let id = s.base.id.as_string();
                                    let who = names.get(&s.staff_ref).cloned().unwrap_or_else(|| s.staff_ref.clone());
                                    let time = format!("{}–{}", format_time(s.start_time), format_time(s.end_time));
                                    view! {
                                        <div
                                            class="week-grid__shift"
                                            title=s.role.display_name()
                                            on:dblclick=move |_| open(detail_key("a002_shift", &id))
                                        >
                                            <div class="week-grid__shift-time">{time}</div>
                                            <div class="week-grid__shift-who">{who}</div>
                                        </div>
                                    }
                                })
                                .collect_view();
                            view! {
                                <div class="week-grid__day" class:week-grid__day--today=is_today>
                                    <div class="week-grid__day-header">
                                        <span>{weekday_name(day.date.weekday())}</span>
                                        <span>{day.date.format("%d.%m").to_string()}</span>
                                    </div>
                                    {shifts}
                                    <div class="week-grid__day-total">{format_hours(day.total_hours)}</div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_total_sums_days() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let week = WeekSchedule::build(start, Vec::new());
        assert_eq!(week.days.len(), 7);
        assert_eq!(week_total(&week), 0.0);
        assert_eq!(weekday_name(start.weekday()), "Пн");
    }
}
