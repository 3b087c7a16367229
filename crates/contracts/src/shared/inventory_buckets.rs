//! Группы складских позиций: заканчивается, нет в наличии, истекает срок.
//! Пересчитываются из плоского списка при каждом запросе.

use crate::domain::a004_inventory_item::{InventoryItem, StockLevel};
use crate::domain::a007_payroll_entry::round_money;
use crate::domain::common::AggregateId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Срок "истекает скоро" по умолчанию, дней
pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryBuckets {
    #[serde(rename = "lowStock")]
    pub low_stock: Vec<InventoryItem>,
    #[serde(rename = "outOfStock")]
    pub out_of_stock: Vec<InventoryItem>,
    #[serde(rename = "expiringSoon")]
    pub expiring_soon: Vec<InventoryItem>,
}

impl InventoryBuckets {
    /// Позиция попадает максимум в одну из групп остатка;
    /// группа по сроку годности от них не зависит.
    pub fn classify(items: &[InventoryItem], today: NaiveDate, expiring_days: i64) -> Self {
        let mut buckets = Self::default();
        for item in items.iter().filter(|i| !i.base.metadata.is_deleted) {
            match item.stock_level() {
                StockLevel::OutOfStock => buckets.out_of_stock.push(item.clone()),
                StockLevel::Low => buckets.low_stock.push(item.clone()),
                StockLevel::Ok => {}
            }
            if item.is_expiring_within(today, expiring_days) {
                buckets.expiring_soon.push(item.clone());
            }
        }
        buckets.expiring_soon.sort_by_key(|i| i.expiry_date);
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.low_stock.is_empty() && self.out_of_stock.is_empty() && self.expiring_soon.is_empty()
    }
}

/// Предложение дозаказать одну позицию до уровня `2 × min_quantity`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderLine {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub unit: String,
    #[serde(rename = "currentQuantity")]
    pub current_quantity: f64,
    #[serde(rename = "suggestedQuantity")]
    pub suggested_quantity: f64,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: f64,
}

/// Дозаказ, сгруппированный по поставщику (`None` — поставщик не указан)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    #[serde(rename = "vendorRef")]
    pub vendor_ref: Option<String>,
    /// Заполняется сервисом по справочнику поставщиков
    #[serde(rename = "vendorName")]
    pub vendor_name: Option<String>,
    pub lines: Vec<ReorderLine>,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}

pub fn par_level(item: &InventoryItem) -> f64 {
    item.min_quantity * 2.0
}

pub fn reorder_suggestions(items: &[InventoryItem]) -> Vec<ReorderSuggestion> {
    let mut by_vendor: BTreeMap<Option<String>, Vec<ReorderLine>> = BTreeMap::new();

    for item in items
        .iter()
        .filter(|i| !i.base.metadata.is_deleted && i.stock_level() != StockLevel::Ok)
    {
        let suggested = par_level(item) - item.quantity.max(0.0);
        if suggested <= 0.0 {
            continue;
        }
        by_vendor
            .entry(item.vendor_ref.clone())
            .or_default()
            .push(ReorderLine {
                item_id: item.base.id.as_string(),
                item_name: item.base.description.clone(),
                unit: item.unit.clone(),
                current_quantity: item.quantity,
                suggested_quantity: suggested,
                estimated_cost: round_money(
                    suggested * item.unit_cost,
                ),
            });
    }

    by_vendor
        .into_iter()
        .map(|(vendor_ref, lines)| {
            let total_cost = round_money(
                lines.iter().map(|l| l.estimated_cost).sum(),
            );
            ReorderSuggestion {
                vendor_ref,
                vendor_name: None,
                lines,
                total_cost,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_inventory_item::InventoryItemDto;

    fn item(
        name: &str,
        qty: f64,
        min: f64,
        expiry: Option<NaiveDate>,
        vendor: Option<&str>,
    ) -> InventoryItem {
        InventoryItem::new_for_insert(
            &InventoryItemDto {
                description: name.into(),
                quantity: qty,
                min_quantity: min,
                unit: "кг".into(),
                unit_cost: 10.0,
                expiry_date: expiry,
                vendor_ref: vendor.map(String::from),
                ..Default::default()
            },
            format!("INV-{}", name),
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn low_and_out_are_exclusive() {
        let items = vec![
            item("a", 0.0, 5.0, None, None),
            item("b", 3.0, 5.0, None, None),
            item("c", 10.0, 5.0, None, None),
        ];
        let b = InventoryBuckets::classify(&items, day(10), 3);
        assert_eq!(b.out_of_stock.len(), 1);
        assert_eq!(b.out_of_stock[0].base.description, "a");
        assert_eq!(b.low_stock.len(), 1);
        assert_eq!(b.low_stock[0].base.description, "b");
        assert!(b.expiring_soon.is_empty());
    }

    #[test]
    fn expiring_is_independent_and_includes_expired() {
        let items = vec![
            item("old", 0.0, 1.0, Some(day(1)), None),
            item("soon", 10.0, 1.0, Some(day(13)), None),
            item("later", 10.0, 1.0, Some(day(14)), None),
        ];
        let b = InventoryBuckets::classify(&items, day(10), 3);
        let names: Vec<_> = b.expiring_soon.iter().map(|i| i.base.description.as_str()).collect();
        assert_eq!(names, vec!["old", "soon"]);
        assert_eq!(b.out_of_stock.len(), 1);
    }

    #[test]
    fn reorder_groups_by_vendor() {
        let items = vec![
            item("a", 0.0, 5.0, None, Some("v1")),
            item("b", 2.0, 5.0, None, Some("v1")),
            item("c", 1.0, 2.0, None, None),
            item("d", 50.0, 5.0, None, Some("v1")),
        ];
        let s = reorder_suggestions(&items);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].vendor_ref, None);
        assert_eq!(s[0].lines[0].suggested_quantity, 3.0);
        let v1 = &s[1];
        assert_eq!(v1.vendor_ref.as_deref(), Some("v1"));
        assert_eq!(v1.lines.len(), 2);
        assert_eq!(v1.lines[0].suggested_quantity, 10.0);
        assert_eq!(v1.lines[1].suggested_quantity, 8.0);
        assert_eq!(v1.total_cost, 180.0);
    }
}
