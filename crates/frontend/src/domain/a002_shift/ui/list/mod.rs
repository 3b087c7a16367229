use crate::domain::a001_staff::ui::picker::{fetch_staff_items, names_by_id, StaffSelect};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_empty};
use crate::shared::components::{DateRangeInputs, ErrorBox};
use crate::shared::date_utils::{format_date, format_time, today};
use crate::shared::icons::icon;
use crate::shared::number_format::format_hours;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use chrono::{Duration, NaiveDate};
use contracts::domain::a002_shift::Shift;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct ShiftRow {
    pub id: String,
    pub code: String,
    pub date: String,
    pub staff_name: String,
    pub role: &'static str,
    pub time: String,
    pub hours: f64,
}

impl ShiftRow {
    fn from_shift(s: Shift, names: &HashMap<String, String>) -> Self {
        let mut time = format!("{}–{}", format_time(s.start_time), format_time(s.end_time));
        if s.crosses_midnight() {
            time.push_str(" (+1)");
        }
        Self {
            id: s.base.id.as_string(),
            staff_name: names
                .get(&s.staff_ref)
                .cloned()
                .unwrap_or_else(|| s.staff_ref.clone()),
            date: format_date(s.shift_date),
            role: s.role.display_name(),
            hours: s.duration_hours(),
            time,
            code: s.base.code,
        }
    }
}

fn list_path(from: NaiveDate, to: NaiveDate, staff_ref: &str) -> String {
    let mut path = format!("/api/shift?date_from={}&date_to={}", from, to);
    if !staff_ref.is_empty() {
        path.push_str(&format!("&staff_ref={}", staff_ref));
    }
    path
}

#[component]
pub fn ShiftList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let date_from = RwSignal::new(today());
    let date_to = RwSignal::new(today() + Duration::days(6));
    let staff_filter = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<ShiftRow>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let fetch = move || {
        let path = list_path(
            date_from.get_untracked(),
            date_to.get_untracked(),
            &staff_filter.get_untracked(),
        );
        loading.set(true);
        spawn_local(async move {
            let names = match fetch_staff_items().await {
                Ok(staff) => names_by_id(&staff),
                Err(_) => HashMap::new(),
            };
            match get_json::<Vec<Shift>>(&path).await {
                Ok(list) => {
                    items.set(
                        list.into_iter()
                            .map(|s| ShiftRow::from_shift(s, &names))
                            .collect(),
                    );
                    error.set(None);
                }
                Err(e) => {
                    error.set(Some(e.clone()));
                    toast.error(e);
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        // Фильтры тоже отслеживаются: смена периода сразу перечитывает список
        date_from.track();
        date_to.track();
        staff_filter.track();
        if ctx.is_active("a002_shift") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/shift/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые смены добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String| {
        spawn_local(async move {
            match delete(&format!("/api/shift/{}", id)).await {
                Ok(()) => {
                    toast.success("Смена удалена");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let total_hours = move || items.with(|rows| rows.iter().map(|r| r.hours).sum::<f64>());

    view! {
        <PageFrame page_id="a002_shift--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("calendar")}
                    <h1 class="page__title">"Смены"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || format!("{} · {}", items.get().len(), format_hours(total_hours()))}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a002_shift"))>
                        {icon("plus")}
                        " Новая смена"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch() disabled=loading>
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
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <DateRangeInputs date_from=date_from date_to=date_to />
                    <StaffSelect
                        value=staff_filter
                        empty_label="Все сотрудники"
                        on_change=Callback::new(move |id: String| staff_filter.set(id))
                    />
                </Flex>
            </div>

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=100.0>"Код"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Дата"</TableHeaderCell>
                            <TableHeaderCell min_width=220.0>"Сотрудник"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Роль"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Время"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Часы"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let data = items.get();
                            if data.is_empty() {
                                return vec![view! {
                                    <TableRow>
                                        <TableCell attr:colspan="7">
                                            <TableCellLayout>
                                                <span class="text-muted">"Смен за период нет"</span>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }.into_any()];
                            }
                            data.into_iter()
                                .map(|row| {
                                    let id = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    view! {
                                        <TableRow on:dblclick=move |_| open(detail_key("a002_shift", &id))>
                                            <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{row.staff_name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.role}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.time}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{format_hours(row.hours)}</TableCellLayout></TableCell>
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
                                    }.into_any()
                                })
                                .collect::<Vec<_>>()
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

    #[test]
    fn list_path_includes_staff_only_when_set() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(list_path(d, d, ""), "/api/shift?date_from=2026-03-02&date_to=2026-03-02");
        assert!(list_path(d, d, "abc").ends_with("&staff_ref=abc"));
    }
}
