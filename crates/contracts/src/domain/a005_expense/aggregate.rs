use crate::domain::common::BaseAggregate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Уникальный идентификатор расхода
    ExpenseId
);

/// Статья расходов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[default]
    Food,
    Beverage,
    Supplies,
    Utilities,
    Rent,
    Maintenance,
    Payroll,
    Other,
}

impl ExpenseCategory {
    pub fn code(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Beverage => "beverage",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Payroll => "payroll",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Продукты",
            ExpenseCategory::Beverage => "Напитки",
            ExpenseCategory::Supplies => "Расходники",
            ExpenseCategory::Utilities => "Коммунальные",
            ExpenseCategory::Rent => "Аренда",
            ExpenseCategory::Maintenance => "Обслуживание",
            ExpenseCategory::Payroll => "Зарплата",
            ExpenseCategory::Other => "Прочее",
        }
    }

    pub fn all() -> Vec<ExpenseCategory> {
        vec![
            ExpenseCategory::Food,
            ExpenseCategory::Beverage,
            ExpenseCategory::Supplies,
            ExpenseCategory::Utilities,
            ExpenseCategory::Rent,
            ExpenseCategory::Maintenance,
            ExpenseCategory::Payroll,
            ExpenseCategory::Other,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }
}

/// Способ оплаты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Card,
    BankTransfer,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Наличные",
            PaymentMethod::Card => "Карта",
            PaymentMethod::BankTransfer => "Безнал",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::BankTransfer]
            .into_iter()
            .find(|m| m.code() == code)
    }
}

/// Расход (оплата поставщику, коммунальные услуги и т.п.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(flatten)]
    pub base: BaseAggregate<ExpenseId>,

    #[serde(rename = "vendorRef")]
    pub vendor_ref: Option<String>,
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(rename = "expenseDate")]
    pub expense_date: NaiveDate,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
}

impl Expense {
    pub fn new_for_insert(dto: &ExpenseDto, code: String) -> Self {
        let mut expense = Self {
            base: BaseAggregate::new(ExpenseId::new_v4(), code, String::new()),
            vendor_ref: None,
            category: dto.category,
            amount: 0.0,
            expense_date: dto.expense_date,
            payment_method: dto.payment_method,
        };
        expense.update(dto);
        expense
    }

    pub fn update(&mut self, dto: &ExpenseDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.trim().to_string();
        self.base.comment = dto.comment.clone();
        self.vendor_ref = dto.vendor_ref.clone().filter(|v| !v.trim().is_empty());
        self.category = dto.category;
        self.amount = dto.amount;
        self.expense_date = dto.expense_date;
        self.payment_method = dto.payment_method;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Описание расхода не может быть пустым".into());
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("Сумма должна быть больше нуля".into());
        }
        Ok(())
    }
}

crate::impl_aggregate_root!(Expense, ExpenseId, "a005", "expense", "Расход", "Расходы");

/// DTO для создания/обновления расхода
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "vendorRef")]
    pub vendor_ref: Option<String>,
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(rename = "expenseDate")]
    pub expense_date: NaiveDate,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    pub comment: Option<String>,
}

impl Default for ExpenseDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            vendor_ref: None,
            category: ExpenseCategory::default(),
            amount: 0.0,
            expense_date: chrono::Utc::now().date_naive(),
            payment_method: PaymentMethod::default(),
            comment: None,
        }
    }
}

impl From<&Expense> for ExpenseDto {
    fn from(e: &Expense) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(e.base.id.as_string()),
            code: Some(e.base.code.clone()),
            description: e.base.description.clone(),
            vendor_ref: e.vendor_ref.clone(),
            category: e.category,
            amount: e.amount,
            expense_date: e.expense_date,
            payment_method: e.payment_method,
            comment: e.base.comment.clone(),
        }
    }
}

/// Итог по статье расходов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: usize,
}

/// Сводка расходов за период
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSummary {
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    pub total: f64,
    #[serde(rename = "byCategory")]
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    /// Считает итоги по расходам, попадающим в `[date_from, date_to]`.
    /// Статьи отсортированы по убыванию суммы.
    pub fn build(date_from: NaiveDate, date_to: NaiveDate, expenses: &[Expense]) -> Self {
        let mut by_category: Vec<CategoryTotal> = Vec::new();
        let mut total = 0.0;
        for e in expenses
            .iter()
            .filter(|e| e.expense_date >= date_from && e.expense_date <= date_to)
        {
            total += e.amount;
            match by_category.iter_mut().find(|c| c.category == e.category) {
                Some(entry) => {
                    entry.total += e.amount;
                    entry.count += 1;
                }
                None => by_category.push(CategoryTotal {
                    category: e.category,
                    total: e.amount,
                    count: 1,
                }),
            }
        }
        by_category.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.category.cmp(&b.category))
        });
        Self {
            date_from,
            date_to,
            total,
            by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(day: u32, category: ExpenseCategory, amount: f64) -> Expense {
        Expense::new_for_insert(
            &ExpenseDto {
                description: "test".into(),
                category,
                amount,
                expense_date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
                ..Default::default()
            },
            "EXP-1".into(),
        )
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(expense(1, ExpenseCategory::Food, 0.0).validate().is_err());
        assert!(expense(1, ExpenseCategory::Food, 10.0).validate().is_ok());
    }

    #[test]
    fn summary_filters_range_and_sorts_by_total() {
        let list = vec![
            expense(1, ExpenseCategory::Food, 100.0),
            expense(2, ExpenseCategory::Rent, 500.0),
            expense(3, ExpenseCategory::Food, 50.0),
            expense(20, ExpenseCategory::Utilities, 999.0),
        ];
        let summary = ExpenseSummary::build(
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            &list,
        );
        assert_eq!(summary.total, 650.0);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, ExpenseCategory::Rent);
        assert_eq!(summary.by_category[1].total, 150.0);
        assert_eq!(summary.by_category[1].count, 2);
    }
}
