//! Таймеры активных заказов кухни.
//!
//! На каждом тике для каждого активного заказа считается снимок таймера;
//! при подходе к плановому времени (или просрочке) публикуется уведомление.
//! Уведомление по заказу разовое, пока заказ не сдвинут за порог.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a006_kitchen_order::aggregate::KitchenOrder;
use contracts::domain::common::AggregateId;
use contracts::shared::notifications::NotificationVariant;
use contracts::shared::order_timer::OrderTimer;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::monitor::Monitor;
use crate::domain::a006_kitchen_order::service;
use crate::shared::notifications::notify;

/// Сработавшее оповещение по заказу
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAlert {
    pub order_id: String,
    pub code: String,
    pub table: String,
    pub remaining_minutes: i64,
    pub is_overdue: bool,
}

impl OrderAlert {
    pub fn title(&self) -> String {
        if self.is_overdue {
            format!("Заказ {} просрочен", self.code)
        } else {
            format!("Заказ {} скоро должен быть готов", self.code)
        }
    }

    pub fn message(&self) -> String {
        if self.is_overdue {
            format!(
                "{}: опоздание {} мин",
                self.table,
                self.remaining_minutes.abs()
            )
        } else {
            format!("{}: осталось {} мин", self.table, self.remaining_minutes)
        }
    }

    pub fn variant(&self) -> NotificationVariant {
        if self.is_overdue {
            NotificationVariant::Destructive
        } else {
            NotificationVariant::Default
        }
    }
}

/// Состояние таймеров по заказам (без доступа к БД)
pub struct KitchenTimerState {
    threshold_minutes: i64,
    timers: HashMap<String, OrderTimer>,
}

impl KitchenTimerState {
    pub fn new(threshold_minutes: i64) -> Self {
        Self {
            threshold_minutes,
            timers: HashMap::new(),
        }
    }

    /// Прогоняет таймеры по текущему списку заказов.
    /// Таймеры выданных и удалённых заказов забываются.
    pub fn evaluate(&mut self, orders: &[KitchenOrder], now: DateTime<Utc>) -> Vec<OrderAlert> {
        let active: Vec<&KitchenOrder> = orders.iter().filter(|o| o.is_active()).collect();
        self.timers
            .retain(|id, _| active.iter().any(|o| o.base.id.as_string() == *id));

        let mut alerts = Vec::new();
        for order in active {
            let id = order.base.id.as_string();
            let threshold = self.threshold_minutes;
            let timer = self
                .timers
                .entry(id.clone())
                .or_insert_with(|| OrderTimer::new(threshold));
            if let Some(alert) = timer.observe(&order.timer(now)) {
                alerts.push(OrderAlert {
                    order_id: id,
                    code: order.base.code.clone(),
                    table: order.base.description.clone(),
                    remaining_minutes: alert.remaining_minutes,
                    is_overdue: alert.is_overdue,
                });
            }
        }
        alerts
    }

    pub fn tracked(&self) -> usize {
        self.timers.len()
    }
}

pub struct KitchenTimerMonitor {
    state: Mutex<KitchenTimerState>,
}

impl KitchenTimerMonitor {
    pub fn new(threshold_minutes: i64) -> Self {
        Self {
            state: Mutex::new(KitchenTimerState::new(threshold_minutes)),
        }
    }
}

#[async_trait]
impl Monitor for KitchenTimerMonitor {
    fn name(&self) -> &'static str {
        "kitchen_timer"
    }

    async fn tick(&self, now: DateTime<Utc>) -> Result<()> {
        let orders = service::list_active().await?;
        let alerts = self.state.lock().await.evaluate(&orders, now);
        for alert in alerts {
            tracing::info!("Kitchen alert for {}: {}", alert.code, alert.message());
            notify("kitchen", &alert.title(), &alert.message(), alert.variant());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use contracts::domain::a006_kitchen_order::aggregate::{
        KitchenOrderDto, KitchenOrderItemDto, OrderStatus,
    };

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 18, 0, 0).unwrap()
    }

    fn order(code: &str, minutes: i64) -> KitchenOrder {
        let dto = KitchenOrderDto {
            table_number: "7".into(),
            items: vec![KitchenOrderItemDto {
                name: "Паста".into(),
                quantity: 1,
                ..Default::default()
            }],
            estimated_minutes: Some(minutes),
            ..Default::default()
        };
        KitchenOrder::new_for_insert(&dto, code.into(), t0())
    }

    #[test]
    fn alerts_once_when_close_to_estimate() {
        let mut state = KitchenTimerState::new(5);
        let orders = vec![order("ORD-0001", 20), order("ORD-0002", 60)];

        assert!(state.evaluate(&orders, t0() + Duration::minutes(10)).is_empty());
        let alerts = state.evaluate(&orders, t0() + Duration::minutes(16));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].code, "ORD-0001");
        assert_eq!(alerts[0].remaining_minutes, 4);
        assert_eq!(alerts[0].variant(), NotificationVariant::Default);
        assert_eq!(alerts[0].message(), "Стол 7: осталось 4 мин");

        assert!(state.evaluate(&orders, t0() + Duration::minutes(17)).is_empty());
    }

    #[test]
    fn first_observation_of_late_order_is_destructive() {
        let mut state = KitchenTimerState::new(5);
        let orders = vec![order("ORD-0003", 10)];
        let alerts = state.evaluate(&orders, t0() + Duration::minutes(13));
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].is_overdue);
        assert_eq!(alerts[0].variant(), NotificationVariant::Destructive);
        assert!(alerts[0].title().contains("просрочен"));
    }

    #[test]
    fn delivered_orders_are_dropped() {
        let mut state = KitchenTimerState::new(5);
        let mut orders = vec![order("ORD-0004", 20), order("ORD-0005", 20)];
        state.evaluate(&orders, t0());
        assert_eq!(state.tracked(), 2);

        orders[0]
            .set_status(OrderStatus::Delivered, t0() + Duration::minutes(1))
            .unwrap();
        let alerts = state.evaluate(&orders, t0() + Duration::minutes(18));
        assert_eq!(state.tracked(), 1);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].code, "ORD-0005");

        orders.pop();
        state.evaluate(&orders, t0() + Duration::minutes(19));
        assert_eq!(state.tracked(), 0);
    }
}
