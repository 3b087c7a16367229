use crate::domain::common::BaseAggregate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Уникальный идентификатор складской позиции
    InventoryItemId
);

/// Уровень остатка относительно минимального
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// `quantity <= 0`
    OutOfStock,
    /// `0 < quantity <= min_quantity`
    Low,
    Ok,
}

/// Складская позиция (продукт, напиток, расходник)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub base: BaseAggregate<InventoryItemId>,

    pub category: String,
    pub quantity: f64,
    /// Единица измерения: кг, л, шт...
    pub unit: String,
    #[serde(rename = "minQuantity")]
    pub min_quantity: f64,
    #[serde(rename = "unitCost")]
    pub unit_cost: f64,
    #[serde(rename = "vendorRef")]
    pub vendor_ref: Option<String>,
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(rename = "storageLocation")]
    pub storage_location: Option<String>,
}

impl InventoryItem {
    pub fn new_for_insert(dto: &InventoryItemDto, code: String) -> Self {
        let mut item = Self {
            base: BaseAggregate::new(InventoryItemId::new_v4(), code, String::new()),
            category: String::new(),
            quantity: 0.0,
            unit: String::new(),
            min_quantity: 0.0,
            unit_cost: 0.0,
            vendor_ref: None,
            expiry_date: None,
            storage_location: None,
        };
        item.update(dto);
        item
    }

    pub fn update(&mut self, dto: &InventoryItemDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.trim().to_string();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.trim().to_string();
        self.quantity = dto.quantity;
        self.unit = dto.unit.trim().to_string();
        self.min_quantity = dto.min_quantity;
        self.unit_cost = dto.unit_cost;
        self.vendor_ref = dto.vendor_ref.clone().filter(|v| !v.trim().is_empty());
        self.expiry_date = dto.expiry_date;
        self.storage_location = dto.storage_location.clone().filter(|v| !v.trim().is_empty());
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.unit.is_empty() {
            return Err("Не указана единица измерения".into());
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err("Остаток не может быть отрицательным".into());
        }
        if !self.min_quantity.is_finite() || self.min_quantity < 0.0 {
            return Err("Минимальный остаток не может быть отрицательным".into());
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        Ok(())
    }

    pub fn stock_level(&self) -> StockLevel {
        if self.quantity <= 0.0 {
            StockLevel::OutOfStock
        } else if self.quantity <= self.min_quantity {
            StockLevel::Low
        } else {
            StockLevel::Ok
        }
    }

    /// Истекает ли срок годности не позже `today + days` (просроченные включительно)
    pub fn is_expiring_within(&self, today: NaiveDate, days: i64) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry <= today + chrono::Duration::days(days),
            None => false,
        }
    }

    /// Приход (delta > 0) или списание (delta < 0).
    /// Остаток не может уйти в минус.
    pub fn adjust(&mut self, delta: f64) -> Result<f64, String> {
        if !delta.is_finite() {
            return Err("Некорректное количество".into());
        }
        let next = self.quantity + delta;
        if next < 0.0 {
            return Err(format!(
                "Недостаточно остатка: доступно {} {}, списание {}",
                self.quantity, self.unit, -delta
            ));
        }
        self.quantity = next;
        Ok(next)
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

crate::impl_aggregate_root!(
    InventoryItem,
    InventoryItemId,
    "a004",
    "inventory_item",
    "Складская позиция",
    "Склад"
);

/// DTO для создания/обновления складской позиции
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryItemDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(rename = "minQuantity")]
    pub min_quantity: f64,
    #[serde(rename = "unitCost")]
    pub unit_cost: f64,
    #[serde(rename = "vendorRef")]
    pub vendor_ref: Option<String>,
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(rename = "storageLocation")]
    pub storage_location: Option<String>,
    pub comment: Option<String>,
}

impl From<&InventoryItem> for InventoryItemDto {
    fn from(i: &InventoryItem) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(i.base.id.as_string()),
            code: Some(i.base.code.clone()),
            description: i.base.description.clone(),
            category: i.category.clone(),
            quantity: i.quantity,
            unit: i.unit.clone(),
            min_quantity: i.min_quantity,
            unit_cost: i.unit_cost,
            vendor_ref: i.vendor_ref.clone(),
            expiry_date: i.expiry_date,
            storage_location: i.storage_location.clone(),
            comment: i.base.comment.clone(),
        }
    }
}

/// Запрос на приход/списание
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustmentRequest {
    pub delta: f64,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: f64, min: f64) -> InventoryItem {
        InventoryItem::new_for_insert(
            &InventoryItemDto {
                description: "Мука".into(),
                unit: "кг".into(),
                quantity: qty,
                min_quantity: min,
                ..Default::default()
            },
            "INV-1".into(),
        )
    }

    #[test]
    fn stock_level_thresholds() {
        assert_eq!(item(0.0, 5.0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(item(0.5, 5.0).stock_level(), StockLevel::Low);
        assert_eq!(item(5.0, 5.0).stock_level(), StockLevel::Low);
        assert_eq!(item(5.1, 5.0).stock_level(), StockLevel::Ok);
        // zero minimum: anything positive is fine
        assert_eq!(item(0.1, 0.0).stock_level(), StockLevel::Ok);
    }

    #[test]
    fn adjust_never_goes_negative() {
        let mut i = item(3.0, 1.0);
        assert_eq!(i.adjust(2.0), Ok(5.0));
        assert_eq!(i.adjust(-5.0), Ok(0.0));
        assert!(i.adjust(-0.1).is_err());
        assert_eq!(i.quantity, 0.0);
    }

    #[test]
    fn expiry_window_includes_expired() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let mut i = item(1.0, 0.0);
        assert!(!i.is_expiring_within(today, 3));
        i.expiry_date = NaiveDate::from_ymd_opt(2026, 5, 13);
        assert!(i.is_expiring_within(today, 3));
        i.expiry_date = NaiveDate::from_ymd_opt(2026, 5, 14);
        assert!(!i.is_expiring_within(today, 3));
        i.expiry_date = NaiveDate::from_ymd_opt(2026, 5, 1);
        assert!(i.is_expiring_within(today, 3));
    }

    #[test]
    fn validation_rejects_missing_unit() {
        let mut i = item(1.0, 0.0);
        assert!(i.validate().is_ok());
        i.unit.clear();
        assert!(i.validate().is_err());
    }
}
