use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json, post_empty};
use crate::shared::components::ErrorBox;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a003_vendor::Vendor;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
pub struct VendorRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub contact: String,
    pub phone: String,
    pub is_active: bool,
}

impl From<Vendor> for VendorRow {
    fn from(v: Vendor) -> Self {
        Self {
            id: v.base.id.as_string(),
            code: v.base.code,
            name: v.base.description,
            category: v.category,
            contact: v.contact_person.unwrap_or_else(|| "—".to_string()),
            phone: v.phone.unwrap_or_else(|| "—".to_string()),
            is_active: v.is_active,
        }
    }
}

#[component]
pub fn VendorList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let items = RwSignal::new(Vec::<VendorRow>::new());
    let error = RwSignal::new(None::<String>);

    let fetch = move || {
        spawn_local(async move {
            match get_json::<Vec<Vendor>>("/api/vendor").await {
                Ok(list) => {
                    items.set(list.into_iter().map(Into::into).collect());
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
        if ctx.is_active("a003_vendor") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/vendor/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые поставщики добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let remove = move |id: String, name: String| {
        spawn_local(async move {
            match delete(&format!("/api/vendor/{}", id)).await {
                Ok(()) => {
                    toast.success(format!("Поставщик «{}» удалён", name));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id="a003_vendor--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("truck")}
                    <h1 class="page__title">"Поставщики"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || items.get().len().to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a003_vendor"))>
                        {icon("plus")}
                        " Новый"
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
                            <TableHeaderCell min_width=100.0>"Код"</TableHeaderCell>
                            <TableHeaderCell min_width=220.0>"Наименование"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Категория"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Контакт"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Телефон"</TableHeaderCell>
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
                                    let name = row.name.clone();
                                    view! {
                                        <TableRow
                                            class=if row.is_active { "" } else { "table__row--muted" }
                                            on:dblclick=move |_| open(detail_key("a003_vendor", &id))
                                        >
                                            <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{row.name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.category}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.contact}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.phone}</TableCellLayout></TableCell>
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
