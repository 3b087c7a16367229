use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, Utc};
use contracts::dashboards::d400_operations_summary::{
    InventorySummary, KitchenSummary, OperationsSummaryRequest, OperationsSummaryResponse,
};
use contracts::domain::a002_shift::Shift;
use contracts::domain::a004_inventory_item::InventoryItem;
use contracts::domain::a005_expense::{Expense, ExpenseSummary};
use contracts::domain::a006_kitchen_order::KitchenOrder;
use contracts::domain::a007_payroll_entry::{round_money, PayrollEntry};
use contracts::shared::inventory_buckets::InventoryBuckets;
use std::collections::HashSet;

use crate::domain::{
    a002_shift, a004_inventory_item, a005_expense, a006_kitchen_order, a007_payroll_entry,
};
use crate::shared::config;
use crate::shared::error::ServiceError;

/// Исходные данные сводки, загруженные из БД
pub struct SummaryInputs {
    pub orders: Vec<KitchenOrder>,
    pub items: Vec<InventoryItem>,
    pub expenses: Vec<Expense>,
    pub payroll: Vec<PayrollEntry>,
    pub shifts_today: Vec<Shift>,
}

pub fn build_summary(
    request: &OperationsSummaryRequest,
    inputs: &SummaryInputs,
    now: DateTime<Utc>,
    today: NaiveDate,
    expiring_days: i64,
) -> OperationsSummaryResponse {
    let active: Vec<&KitchenOrder> = inputs.orders.iter().filter(|o| o.is_active()).collect();
    let kitchen = KitchenSummary {
        active_orders: active.len(),
        overdue_orders: active.iter().filter(|o| o.timer(now).is_overdue).count(),
        delivered_in_period: inputs
            .orders
            .iter()
            .filter_map(|o| o.delivered_at)
            .map(|at| at.with_timezone(&Local).date_naive())
            .filter(|d| *d >= request.date_from && *d <= request.date_to)
            .count(),
    };

    let buckets = InventoryBuckets::classify(&inputs.items, today, expiring_days);
    let inventory = InventorySummary {
        low_stock: buckets.low_stock.len(),
        out_of_stock: buckets.out_of_stock.len(),
        expiring_soon: buckets.expiring_soon.len(),
        stock_value: round_money(inputs.items.iter().map(|i| i.stock_value()).sum()),
    };

    let expenses = ExpenseSummary::build(request.date_from, request.date_to, &inputs.expenses);

    let payroll_gross = round_money(
        inputs
            .payroll
            .iter()
            .filter(|e| e.period_end >= request.date_from && e.period_start <= request.date_to)
            .map(|e| e.gross_pay)
            .sum(),
    );

    let staff_on_shift_today = inputs
        .shifts_today
        .iter()
        .filter(|s| s.shift_date == today)
        .map(|s| s.staff_ref.as_str())
        .collect::<HashSet<_>>()
        .len();

    OperationsSummaryResponse {
        date_from: request.date_from,
        date_to: request.date_to,
        kitchen,
        inventory,
        expenses_total: round_money(expenses.total),
        expenses_by_category: expenses.by_category,
        payroll_gross,
        staff_on_shift_today,
    }
}

/// Сводка по ресторану за период
pub async fn get_summary(request: OperationsSummaryRequest) -> Result<OperationsSummaryResponse> {
    if request.date_to < request.date_from {
        return Err(ServiceError::Validation("Дата окончания раньше даты начала".into()).into());
    }
    let today = Local::now().date_naive();
    let inputs = SummaryInputs {
        orders: a006_kitchen_order::service::list_all().await?,
        items: a004_inventory_item::service::list_all().await?,
        expenses: a005_expense::service::list(Some(request.date_from), Some(request.date_to))
            .await?,
        payroll: a007_payroll_entry::service::list(Some(request.date_from), Some(request.date_to))
            .await?,
        shifts_today: a002_shift::service::list(Some(today), Some(today), None).await?,
    };
    Ok(build_summary(
        &request,
        &inputs,
        Utc::now(),
        today,
        config::get().inventory.expiring_soon_days,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};
    use contracts::domain::a002_shift::ShiftDto;
    use contracts::domain::a004_inventory_item::InventoryItemDto;
    use contracts::domain::a005_expense::{ExpenseCategory, ExpenseDto};
    use contracts::domain::a006_kitchen_order::{KitchenOrderDto, KitchenOrderItemDto};

    fn order(started: DateTime<Utc>, minutes: i64) -> KitchenOrder {
        KitchenOrder::new_for_insert(
            &KitchenOrderDto {
                table_number: "1".into(),
                items: vec![KitchenOrderItemDto {
                    name: "Суп".into(),
                    quantity: 1,
                    ..Default::default()
                }],
                started_at: Some(started),
                estimated_minutes: Some(minutes),
                ..Default::default()
            },
            "ORD".into(),
            started,
        )
    }

    #[test]
    fn summary_counts() {
        let now = Utc::now();
        let today = Local::now().date_naive();
        let request = OperationsSummaryRequest {
            date_from: today - Duration::days(7),
            date_to: today,
        };

        let shift = |staff: &str| {
            Shift::new_for_insert(
                &ShiftDto {
                    staff_ref: staff.into(),
                    shift_date: today,
                    start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                    ..Default::default()
                },
                "SHF".into(),
            )
        };

        let inputs = SummaryInputs {
            orders: vec![
                order(now - Duration::minutes(30), 20),
                order(now - Duration::minutes(5), 20),
            ],
            items: vec![InventoryItem::new_for_insert(
                &InventoryItemDto {
                    description: "Мука".into(),
                    unit: "кг".into(),
                    quantity: 2.0,
                    min_quantity: 5.0,
                    unit_cost: 50.0,
                    ..Default::default()
                },
                "INV".into(),
            )],
            expenses: vec![Expense::new_for_insert(
                &ExpenseDto {
                    description: "Мука".into(),
                    category: ExpenseCategory::Food,
                    amount: 1500.0,
                    expense_date: today,
                    ..Default::default()
                },
                "EXP".into(),
            )],
            payroll: Vec::new(),
            shifts_today: vec![shift("a"), shift("a"), shift("b")],
        };

        let summary = build_summary(&request, &inputs, now, today, 3);
        assert_eq!(summary.kitchen.active_orders, 2);
        assert_eq!(summary.kitchen.overdue_orders, 1);
        assert_eq!(summary.inventory.low_stock, 1);
        assert_eq!(summary.inventory.stock_value, 100.0);
        assert_eq!(summary.expenses_total, 1500.0);
        assert_eq!(summary.expenses_by_category.len(), 1);
        assert_eq!(summary.staff_on_shift_today, 2);
    }
}
