//! Контроль остатков: уведомление при попадании позиции в «мало» или «нет в наличии».

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::a004_inventory_item::aggregate::{InventoryItem, StockLevel};
use contracts::domain::common::AggregateId;
use contracts::shared::notifications::NotificationVariant;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::monitor::Monitor;
use crate::domain::a004_inventory_item::service;
use crate::shared::notifications::notify;

#[derive(Debug, Clone, PartialEq)]
pub struct StockAlert {
    pub code: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub level: StockLevel,
}

impl StockAlert {
    pub fn title(&self) -> String {
        match self.level {
            StockLevel::OutOfStock => format!("Нет в наличии: {}", self.name),
            _ => format!("Заканчивается: {}", self.name),
        }
    }

    pub fn message(&self) -> String {
        format!("{}: остаток {} {}", self.code, self.quantity, self.unit)
    }

    pub fn variant(&self) -> NotificationVariant {
        match self.level {
            StockLevel::OutOfStock => NotificationVariant::Destructive,
            _ => NotificationVariant::Default,
        }
    }
}

/// Последний оповещённый уровень по позициям.
/// Повторное оповещение только при ухудшении; возврат в норму сбрасывает состояние.
#[derive(Default)]
pub struct InventoryLevelState {
    flagged: HashMap<String, StockLevel>,
}

impl InventoryLevelState {
    pub fn evaluate(&mut self, items: &[InventoryItem]) -> Vec<StockAlert> {
        let mut alerts = Vec::new();
        let mut seen = Vec::with_capacity(items.len());

        for item in items {
            let id = item.base.id.as_string();
            let level = item.stock_level();
            seen.push(id.clone());

            if level == StockLevel::Ok {
                self.flagged.remove(&id);
                continue;
            }

            let previous = self.flagged.insert(id, level);
            let worsened = match previous {
                None => true,
                Some(StockLevel::Low) => level == StockLevel::OutOfStock,
                Some(_) => false,
            };
            if worsened {
                alerts.push(StockAlert {
                    code: item.base.code.clone(),
                    name: item.base.description.clone(),
                    quantity: item.quantity,
                    unit: item.unit.clone(),
                    level,
                });
            }
        }

        self.flagged.retain(|id, _| seen.contains(id));
        alerts
    }
}

#[derive(Default)]
pub struct InventoryLevelMonitor {
    state: Mutex<InventoryLevelState>,
}

#[async_trait]
impl Monitor for InventoryLevelMonitor {
    fn name(&self) -> &'static str {
        "inventory_levels"
    }

    async fn tick(&self, _now: DateTime<Utc>) -> Result<()> {
        let items = service::list_all().await?;
        let alerts = self.state.lock().await.evaluate(&items);
        for alert in alerts {
            notify("inventory", &alert.title(), &alert.message(), alert.variant());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_inventory_item::aggregate::InventoryItemDto;

    fn item(qty: f64) -> InventoryItem {
        InventoryItem::new_for_insert(
            &InventoryItemDto {
                description: "Сливки 33%".into(),
                category: "Молочные".into(),
                quantity: qty,
                unit: "л".into(),
                min_quantity: 5.0,
                unit_cost: 320.0,
                ..Default::default()
            },
            "INV-100".into(),
        )
    }

    #[test]
    fn alerts_on_entering_low_and_again_on_out() {
        let mut state = InventoryLevelState::default();
        let mut cream = item(10.0);
        assert!(state.evaluate(std::slice::from_ref(&cream)).is_empty());

        cream.quantity = 4.0;
        let alerts = state.evaluate(std::slice::from_ref(&cream));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, StockLevel::Low);
        assert_eq!(alerts[0].message(), "INV-100: остаток 4 л");

        cream.quantity = 3.0;
        assert!(state.evaluate(std::slice::from_ref(&cream)).is_empty());

        cream.quantity = 0.0;
        let alerts = state.evaluate(std::slice::from_ref(&cream));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].variant(), NotificationVariant::Destructive);

        // partial restock is an improvement
        cream.quantity = 2.0;
        assert!(state.evaluate(std::slice::from_ref(&cream)).is_empty());
    }

    #[test]
    fn restock_rearms() {
        let mut state = InventoryLevelState::default();
        let mut cream = item(1.0);
        assert_eq!(state.evaluate(std::slice::from_ref(&cream)).len(), 1);
        cream.quantity = 20.0;
        assert!(state.evaluate(std::slice::from_ref(&cream)).is_empty());
        cream.quantity = 1.0;
        assert_eq!(state.evaluate(std::slice::from_ref(&cream)).len(), 1);
    }
}
