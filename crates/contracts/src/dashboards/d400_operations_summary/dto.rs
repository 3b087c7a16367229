use crate::domain::a005_expense::CategoryTotal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Запрос сводки за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsSummaryRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Сводка по ресторану за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsSummaryResponse {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub kitchen: KitchenSummary,
    pub inventory: InventorySummary,
    pub expenses_total: f64,
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Сумма начислений, чей период пересекается с запрошенным
    pub payroll_gross: f64,
    /// Сотрудники со сменой на сегодня
    pub staff_on_shift_today: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KitchenSummary {
    pub active_orders: usize,
    pub overdue_orders: usize,
    pub delivered_in_period: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub expiring_soon: usize,
    pub stock_value: f64,
}
