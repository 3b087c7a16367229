//! Доска кухни: активные заказы карточками с обратным отсчётом.
//!
//! Раз в секунду пересчитываются таймеры, раз в `REFRESH_EVERY_TICKS`
//! секунд список перечитывается с сервера. Порог оповещения отслеживает
//! `OrderTimer` на каждый заказ; при пересечении показывается тост.
//! Порог берётся из настроек сервера (`[kitchen]` в config.toml), пока
//! они не загружены, действует значение по умолчанию.

use super::{change_item_status, change_status, priority_badge, status_badge};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, new_key, title_for_key};
use crate::shared::api_utils::{get_json, post_empty};
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::toast::use_toast;
use chrono::{DateTime, Utc};
use contracts::domain::a006_kitchen_order::{
    sort_for_kitchen, KitchenBoardSettings, KitchenOrder, OrderStatus,
};
use contracts::domain::common::AggregateId;
use contracts::shared::notifications::NotificationVariant;
use contracts::shared::order_timer::{OrderTimer, TimerAlert, TimerSnapshot};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;

const TICK_MS: u32 = 1_000;
const REFRESH_EVERY_TICKS: u32 = 10;

/// Прогоняет таймеры всех активных заказов и возвращает новые оповещения.
/// Таймеры заказов, которых больше нет на доске, удаляются.
/// Таймер со старым порогом пересоздаётся с `threshold_minutes`.
pub fn collect_alerts(
    orders: &[KitchenOrder],
    timers: &mut HashMap<String, OrderTimer>,
    threshold_minutes: i64,
    now: DateTime<Utc>,
) -> Vec<(String, TimerAlert)> {
    timers.retain(|id, _| orders.iter().any(|o| &o.base.id.as_string() == id));

    let mut alerts = Vec::new();
    for order in orders.iter().filter(|o| o.is_active()) {
        let timer = timers
            .entry(order.base.id.as_string())
            .or_insert_with(|| OrderTimer::new(threshold_minutes));
        if timer.threshold_minutes() != threshold_minutes {
            *timer = OrderTimer::new(threshold_minutes);
        }
        if let Some(alert) = timer.observe(&order.timer(now)) {
            alerts.push((format!("{} · {}", order.base.code, order.base.description), alert));
        }
    }
    alerts
}

pub fn alert_message(alert: &TimerAlert) -> String {
    if alert.is_overdue {
        format!("Просрочен на {} мин", alert.remaining_minutes.abs().max(1))
    } else {
        format!("До выдачи {} мин", alert.remaining_minutes)
    }
}

/// Ключ карточки включает статусы и плановое время:
/// после изменения карточка перерисовывается целиком
fn card_key(order: &KitchenOrder) -> (String, OrderStatus, DateTime<Utc>, Vec<OrderStatus>) {
    (
        order.base.id.as_string(),
        order.status,
        order.estimated_at,
        order.items.iter().map(|i| i.status).collect(),
    )
}

fn replace_order(orders: &mut Vec<KitchenOrder>, updated: KitchenOrder) {
    let id = updated.base.id;
    if updated.is_active() {
        match orders.iter_mut().find(|o| o.base.id == id) {
            Some(slot) => *slot = updated,
            None => orders.push(updated),
        }
    } else {
        orders.retain(|o| o.base.id != id);
    }
    sort_for_kitchen(orders);
}

#[component]
pub fn KitchenBoard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let orders = RwSignal::new(Vec::<KitchenOrder>::new());
    let now = RwSignal::new(Utc::now());
    let error = RwSignal::new(None::<String>);
    let timers = StoredValue::new(HashMap::<String, OrderTimer>::new());
    let settings = StoredValue::new(KitchenBoardSettings::default());

    spawn_local(async move {
        match get_json::<KitchenBoardSettings>("/api/kitchen_order/settings").await {
            Ok(loaded) => settings.set_value(loaded),
            Err(e) => log::warn!("kitchen board settings not loaded, using defaults: {}", e),
        }
    });

    let fetch = move || {
        spawn_local(async move {
            match get_json::<Vec<KitchenOrder>>("/api/kitchen_order/active").await {
                Ok(mut list) => {
                    sort_for_kitchen(&mut list);
                    orders.set(list);
                    error.set(None);
                }
                // Без тоста: опрос идёт каждые 10 секунд
                Err(e) => {
                    log::warn!("kitchen board refresh failed: {}", e);
                    error.set(Some(e));
                }
            }
        });
    };

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    spawn_local(async move {
        let mut tick: u32 = 0;
        while alive.load(Ordering::Relaxed) {
            if tick % REFRESH_EVERY_TICKS == 0 {
                fetch();
            }
            let current = Utc::now();
            now.set(current);

            let threshold = settings
                .try_get_value()
                .unwrap_or_default()
                .alert_threshold_minutes;
            let alerts = orders.with_untracked(|list| {
                timers
                    .try_update_value(|t| collect_alerts(list, t, threshold, current))
                    .unwrap_or_default()
            });
            for (title, alert) in alerts {
                let variant = if alert.is_overdue {
                    NotificationVariant::Destructive
                } else {
                    NotificationVariant::Default
                };
                toast.push(title, alert_message(&alert), variant);
            }

            tick = tick.wrapping_add(1);
            TimeoutFuture::new(TICK_MS).await;
        }
    });

    let advance = move |order_id: String, next: OrderStatus| {
        spawn_local(async move {
            match change_status(&order_id, next).await {
                Ok(updated) => orders.update(|list| replace_order(list, updated)),
                Err(e) => toast.error(e),
            }
        });
    };

    let advance_item = move |order: KitchenOrder, item_id: String, next: OrderStatus| {
        spawn_local(async move {
            match change_item_status(&order, &item_id, next).await {
                Ok(updated) => orders.update(|list| replace_order(list, updated)),
                Err(e) => toast.error(e),
            }
        });
    };

    let open = move |key: String| {
        let title = title_for_key(&key);
        ctx.open_tab(&key, &title);
    };

    let load_testdata = move || {
        spawn_local(async move {
            match post_empty("/api/kitchen_order/testdata").await {
                Ok(()) => {
                    toast.success("Тестовые заказы добавлены");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let overdue_count = move || {
        let current = now.get();
        orders.with(|list| list.iter().filter(|o| o.timer(current).is_overdue).count())
    };

    view! {
        <PageFrame page_id="a006_kitchen_order--board" category=PageCategory::Dashboard>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("kitchen")}
                    <h1 class="page__title">"Кухня"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || orders.get().len().to_string()}</span>
                    </Badge>
                    {move || {
                        let overdue = overdue_count();
                        (overdue > 0).then(|| view! {
                            <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                                {format!("просрочено: {}", overdue)}
                            </Badge>
                        })
                    }}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open(new_key("a006_kitchen_order"))>
                        {icon("plus")}
                        " Новый заказ"
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

            <div class="kitchen-board">
                <For
                    each=move || orders.get()
                    key=card_key
                    children=move |order| {
                        let order_id = order.base.id.as_string();
                        let started = order.started_at;
                        let estimated = order.estimated_at;
                        let snapshot = move || TimerSnapshot::compute(now.get(), started, estimated);
                        let next = order.status.next();
                        let detail = detail_key("a006_kitchen_order", &order_id);
                        let id_for_advance = order_id.clone();
                        let order_for_items = order.clone();

                        view! {
                            <div
                                class="kitchen-card"
                                class:kitchen-card--overdue=move || snapshot().is_overdue
                                class:kitchen-card--ready={order.status == OrderStatus::Ready}
                            >
                                <div class="kitchen-card__header" on:dblclick=move |_| open(detail.clone())>
                                    <span class="kitchen-card__table">{order.base.description.clone()}</span>
                                    <span class="kitchen-card__code">{order.base.code.clone()}</span>
                                    {priority_badge(order.priority)}
                                    {status_badge(order.status)}
                                </div>

                                <div class="kitchen-card__timer">
                                    <span class="kitchen-card__remaining">{move || snapshot().format_remaining()}</span>
                                    <div class="kitchen-card__progress">
                                        <div
                                            class="kitchen-card__progress-fill"
                                            style=move || format!("width: {:.0}%;", snapshot().progress_percent)
                                        ></div>
                                    </div>
                                    <span class="kitchen-card__eta text-muted">
                                        {format!("к {}", format_datetime(estimated))}
                                    </span>
                                </div>

                                <ul class="kitchen-card__items">
                                    {order.items.iter().map(|item| {
                                        let item_id = item.id.clone();
                                        let item_next = item.status.next();
                                        let order_for_click = order_for_items.clone();
                                        view! {
                                            <li
                                                class="kitchen-card__item"
                                                class:kitchen-card__item--done={item.status >= OrderStatus::Ready}
                                                title="Нажмите, чтобы перевести позицию дальше"
                                                on:click=move |_| {
                                                    if let Some(n) = item_next {
                                                        advance_item(order_for_click.clone(), item_id.clone(), n);
                                                    }
                                                }
                                            >
                                                <span class="kitchen-card__item-qty">{format!("{}×", item.quantity)}</span>
                                                <span class="kitchen-card__item-name">{item.name.clone()}</span>
                                                {item.notes.clone().map(|n| view! { <span class="kitchen-card__item-notes">{n}</span> })}
                                                <span class="kitchen-card__item-status">{item.status.display_name()}</span>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>

                                {order.base.comment.clone().map(|c| view! { <div class="kitchen-card__comment">{c}</div> })}

                                <div class="kitchen-card__footer">
                                    <span class="text-muted">
                                        {order.server_name.clone().unwrap_or_default()}
                                        {format!(" · {} порц.", order.total_portions())}
                                    </span>
                                    {next.map(|n| {
                                        let id = id_for_advance.clone();
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Primary
                                                size=ButtonSize::Small
                                                on_click=move |_| advance(id.clone(), n)
                                            >
                                                {icon("check")}
                                                {format!(" {}", n.display_name())}
                                            </Button>
                                        }
                                    })}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
            {move || orders.with(|list| list.is_empty()).then(|| view! {
                <div class="placeholder">"Активных заказов нет"</div>
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use contracts::shared::order_timer::DEFAULT_ALERT_THRESHOLD_MINUTES;
    use contracts::domain::a006_kitchen_order::{KitchenOrderDto, KitchenOrderItemDto};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 18, 0, 0).unwrap()
    }

    fn order(minutes: i64) -> KitchenOrder {
        KitchenOrder::new_for_insert(
            &KitchenOrderDto {
                table_number: "3".into(),
                items: vec![KitchenOrderItemDto {
                    name: "Паста".into(),
                    quantity: 2,
                    ..Default::default()
                }],
                started_at: Some(t0()),
                estimated_minutes: Some(minutes),
                ..Default::default()
            },
            "ORD-1".into(),
            t0(),
        )
    }

    #[test]
    fn alert_fires_once_when_threshold_crossed() {
        let orders = vec![order(20)];
        let mut timers = HashMap::new();

        assert!(collect_alerts(&orders, &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, t0()).is_empty());

        let near = t0() + Duration::minutes(16);
        let alerts = collect_alerts(&orders, &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, near);
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].1.is_overdue);
        assert!(alerts[0].0.starts_with("ORD-1"));

        let later = t0() + Duration::minutes(18);
        assert!(collect_alerts(&orders, &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, later).is_empty());
    }

    #[test]
    fn server_threshold_moves_alert_earlier() {
        let orders = vec![order(20)];
        let mut timers = HashMap::new();

        // 12 минут до выдачи: порог по умолчанию ещё молчит
        let at = t0() + Duration::minutes(8);
        assert!(collect_alerts(&orders, &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, at).is_empty());

        // Порог с сервера пришёл позже: таймер пересоздаётся и срабатывает
        let alerts = collect_alerts(&orders, &mut timers, 15, at);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].1.remaining_minutes, 12);
        assert_eq!(timers.values().next().map(|t| t.threshold_minutes()), Some(15));

        assert!(collect_alerts(&orders, &mut timers, 15, at + Duration::minutes(1)).is_empty());
    }

    #[test]
    fn timers_of_removed_orders_are_dropped() {
        let orders = vec![order(20)];
        let mut timers = HashMap::new();
        collect_alerts(&orders, &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, t0());
        assert_eq!(timers.len(), 1);
        collect_alerts(&[], &mut timers, DEFAULT_ALERT_THRESHOLD_MINUTES, t0());
        assert!(timers.is_empty());
    }

    #[test]
    fn delivered_order_leaves_board() {
        let mut list = vec![order(20)];
        let mut delivered = list[0].clone();
        delivered.set_status(OrderStatus::Delivered, t0()).unwrap();
        replace_order(&mut list, delivered);
        assert!(list.is_empty());
    }

    #[test]
    fn alert_message_wording() {
        let soon = TimerAlert { remaining_minutes: 4, is_overdue: false };
        let late = TimerAlert { remaining_minutes: -2, is_overdue: true };
        assert_eq!(alert_message(&soon), "До выдачи 4 мин");
        assert_eq!(alert_message(&late), "Просрочен на 2 мин");
    }
}
