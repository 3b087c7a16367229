use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_empty};
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_date_opt;
use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a001_staff::Staff;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
pub struct StaffRow {
    pub id: String,
    pub code: String,
    pub full_name: String,
    pub role: &'static str,
    pub hourly_rate: String,
    pub phone: String,
    pub hire_date: String,
    pub is_active: bool,
}

impl From<Staff> for StaffRow {
    fn from(s: Staff) -> Self {
        Self {
            id: s.base.id.as_string(),
            code: s.base.code,
            full_name: s.base.description,
            role: s.role.display_name(),
            hourly_rate: format_money(s.hourly_rate),
            phone: s.phone.unwrap_or_else(|| "—".to_string()),
            hire_date: format_date_opt(s.hire_date),
            is_active: s.is_active,
        }
    }
}

#[component]
pub fn StaffList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let items = RwSignal::new(Vec::<StaffRow>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match get_json::<Vec<Staff>>("/api/staff").await {
                Ok(list) => {
                    items.set(list.into_iter().map(Into::into).collect());
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

    // Перечитываем при каждом возврате на таб: запись могли изменить в detail-табе
    Effect::new(move |_| {
        if ctx.is_active("a001_staff") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/staff/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые сотрудники добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String, name: String| {
        spawn_local(async move {
            match delete(&format!("/api/staff/{}", id)).await {
                Ok(()) => {
                    toast.success(format!("Сотрудник «{}» удалён", name));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id="a001_staff--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Сотрудники"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || items.get().len().to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a001_staff"))>
                        {icon("plus")}
                        " Новый"
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

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=100.0>"Код"</TableHeaderCell>
                            <TableHeaderCell min_width=220.0>"ФИО"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Должность"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Ставка"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Телефон"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Принят"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let data = items.get();
                            if data.is_empty() {
                                return vec![view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8">
                                            <TableCellLayout>
                                                <span class="text-muted">
                                                    {if loading.get() { "Загрузка…" } else { "Нет данных" }}
                                                </span>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }.into_any()];
                            }
                            data.into_iter()
                                .map(|row| {
                                    let id = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    let name = row.full_name.clone();
                                    view! {
                                        <TableRow on:dblclick=move |_| open(detail_key("a001_staff", &id))>
                                            <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{row.full_name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.role}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{row.hourly_rate}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.phone}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.hire_date}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if row.is_active {
                                                        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Работает"</Badge> }.into_any()
                                                    } else {
                                                        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Уволен"</Badge> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
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
