pub mod a001_staff;
pub mod a002_shift;
pub mod a003_vendor;
pub mod a004_inventory_item;
pub mod a005_expense;
pub mod a006_kitchen_order;
pub mod a007_payroll_entry;
pub mod d400_operations_summary;
pub mod equipment;
pub mod logs;
pub mod notifications;

use chrono::NaiveDate;
use serde::Deserialize;

/// Необязательный период в query-строке: `?date_from=2026-04-01&date_to=2026-04-30`
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
