use chrono::{NaiveDate, Utc};
use contracts::domain::a005_expense::{Expense, ExpenseCategory, ExpenseId, PaymentMethod};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_expense")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub vendor_ref: Option<String>,
    pub category: String,
    pub amount: f64,
    pub expense_date: chrono::NaiveDate,
    pub payment_method: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Expense {
            base: BaseAggregate::with_metadata(
                ExpenseId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            vendor_ref: m.vendor_ref,
            category: ExpenseCategory::from_code(&m.category).unwrap_or(ExpenseCategory::Other),
            amount: m.amount,
            expense_date: m.expense_date,
            payment_method: PaymentMethod::from_code(&m.payment_method).unwrap_or_default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Expense) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        vendor_ref: Set(aggregate.vendor_ref.clone()),
        category: Set(aggregate.category.code().to_string()),
        amount: Set(aggregate.amount),
        expense_date: Set(aggregate.expense_date),
        payment_method: Set(aggregate.payment_method.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Расходы за период (границы включительно), новые сверху
pub async fn list_between(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> anyhow::Result<Vec<Expense>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(from) = date_from {
        query = query.filter(Column::ExpenseDate.gte(from));
    }
    if let Some(to) = date_to {
        query = query.filter(Column::ExpenseDate.lte(to));
    }
    let items = query
        .order_by_desc(Column::ExpenseDate)
        .order_by_asc(Column::Code)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Expense>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Expense::from).filter(|e| !e.base.metadata.is_deleted))
}

pub async fn insert(aggregate: &Expense) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Expense) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
