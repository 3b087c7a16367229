use super::{priority_badge, status_badge};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{delete, get_json};
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use contracts::domain::a006_kitchen_order::{KitchenOrder, OrderPriority, OrderStatus};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
pub struct KitchenOrderRow {
    pub id: String,
    pub code: String,
    pub table: String,
    pub server: String,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub portions: u32,
    pub started: String,
    pub delivered: String,
}

impl From<KitchenOrder> for KitchenOrderRow {
    fn from(o: KitchenOrder) -> Self {
        Self {
            id: o.base.id.as_string(),
            portions: o.total_portions(),
            started: format_datetime(o.started_at),
            delivered: o
                .delivered_at
                .map(format_datetime)
                .unwrap_or_else(|| "—".to_string()),
            code: o.base.code,
            table: o.table_number,
            server: o.server_name.unwrap_or_else(|| "—".to_string()),
            status: o.status,
            priority: o.priority,
        }
    }
}

/// Все заказы, включая выданные (история смены)
#[component]
pub fn KitchenOrderList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let items = RwSignal::new(Vec::<KitchenOrderRow>::new());
    let error = RwSignal::new(None::<String>);
    let status_filter = RwSignal::new(None::<OrderStatus>);

    let fetch = move || {
        spawn_local(async move {
            match get_json::<Vec<KitchenOrder>>("/api/kitchen_order").await {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.started_at.cmp(&a.started_at));
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
        if ctx.is_active("a006_kitchen_order") {
            fetch();
        }
    });

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let remove = move |id: String, code: String| {
        spawn_local(async move {
            match delete(&format!("/api/kitchen_order/{}", id)).await {
                Ok(()) => {
                    toast.success(format!("Заказ {} удалён", code));
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <PageFrame page_id="a006_kitchen_order--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("list")}
                    <h1 class="page__title">"Заказы кухни"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || items.get().len().to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <select
                        class="picker-select"
                        on:change=move |ev| status_filter.set(OrderStatus::from_code(&event_target_value(&ev)))
                    >
                        <option value="">"Все статусы"</option>
                        {OrderStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a006_kitchen_order"))>
                        {icon("plus")}
                        " Новый заказ"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Обновить"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            <div class="page-content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=100.0>"Код"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Стол"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Официант"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Статус"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Приоритет"</TableHeaderCell>
                            <TableHeaderCell min_width=80.0>"Порций"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Принят"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Выдан"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let filter = status_filter.get();
                            items.get()
                                .into_iter()
                                .filter(|row| filter.map_or(true, |s| row.status == s))
                                .map(|row| {
                                    let id = row.id.clone();
                                    let id_for_delete = row.id.clone();
                                    let code = row.code.clone();
                                    view! {
                                        <TableRow on:dblclick=move |_| open(detail_key("a006_kitchen_order", &id))>
                                            <TableCell><TableCellLayout>{row.code}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.table}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.server}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{status_badge(row.status)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{priority_badge(row.priority)}</TableCellLayout></TableCell>
                                            <TableCell class="table__cell--right"><TableCellLayout>{row.portions}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.started}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{row.delivered}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| remove(id_for_delete.clone(), code.clone())
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
