use super::repository;
use crate::domain::a003_vendor;
use crate::shared::error::ServiceError;
use chrono::{Duration, Local, NaiveDate};
use contracts::domain::a005_expense::{
    Expense, ExpenseCategory, ExpenseDto, ExpenseSummary, PaymentMethod,
};
use contracts::domain::common::AggregateId;
use uuid::Uuid;

fn generate_code() -> String {
    format!("EXP-{}", &Uuid::new_v4().simple().to_string()[..8])
}

pub async fn create(dto: ExpenseDto) -> anyhow::Result<Uuid> {
    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Expense::new_for_insert(&dto, code);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ExpenseDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Некорректный ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Expense>> {
    repository::get_by_id(id).await
}

pub async fn list(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> anyhow::Result<Vec<Expense>> {
    repository::list_between(date_from, date_to).await
}

/// Итоги по статьям за период
pub async fn summary(date_from: NaiveDate, date_to: NaiveDate) -> anyhow::Result<ExpenseSummary> {
    if date_to < date_from {
        return Err(ServiceError::Validation("Конец периода раньше начала".into()).into());
    }
    let expenses = repository::list_between(Some(date_from), Some(date_to)).await?;
    Ok(ExpenseSummary::build(date_from, date_to, &expenses))
}

/// Вставка тестовых данных за последние две недели
pub async fn insert_test_data() -> anyhow::Result<()> {
    let vendors = a003_vendor::service::list_all().await?;
    let vendor = |index: usize| vendors.get(index).map(|v| v.base.id.as_string());
    let today = Local::now().date_naive();

    let data = vec![
        ("Закупка овощей", ExpenseCategory::Food, 18_450.0, 1, vendor(0), PaymentMethod::BankTransfer),
        ("Мясо на неделю", ExpenseCategory::Food, 42_300.0, 2, vendor(1), PaymentMethod::BankTransfer),
        ("Молочная продукция", ExpenseCategory::Food, 9_870.0, 4, vendor(2), PaymentMethod::Card),
        ("Напитки для бара", ExpenseCategory::Beverage, 23_100.0, 5, vendor(3), PaymentMethod::Card),
        ("Электроэнергия", ExpenseCategory::Utilities, 31_000.0, 9, None, PaymentMethod::BankTransfer),
        ("Аренда зала", ExpenseCategory::Rent, 180_000.0, 10, None, PaymentMethod::BankTransfer),
        ("Ремонт посудомоечной машины", ExpenseCategory::Maintenance, 7_500.0, 12, None, PaymentMethod::Cash),
        ("Салфетки и упаковка", ExpenseCategory::Supplies, 3_240.0, 13, None, PaymentMethod::Cash),
    ];

    for (description, category, amount, days_ago, vendor_ref, payment_method) in data {
        create(ExpenseDto {
            description: description.into(),
            category,
            amount,
            expense_date: today - Duration::days(days_ago),
            vendor_ref,
            payment_method,
            ..Default::default()
        })
        .await?;
    }

    Ok(())
}
