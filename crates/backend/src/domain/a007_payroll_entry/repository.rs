use chrono::{NaiveDate, Utc};
use contracts::domain::a007_payroll_entry::{PayrollEntry, PayrollEntryId, PayrollStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_payroll_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub staff_ref: String,
    pub period_start: chrono::NaiveDate,
    pub period_end: chrono::NaiveDate,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub hourly_rate: f64,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PayrollEntry {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        PayrollEntry {
            base: BaseAggregate::with_metadata(
                PayrollEntryId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            staff_ref: m.staff_ref,
            period_start: m.period_start,
            period_end: m.period_end,
            regular_hours: m.regular_hours,
            overtime_hours: m.overtime_hours,
            hourly_rate: m.hourly_rate,
            gross_pay: m.gross_pay,
            deductions: m.deductions,
            net_pay: m.net_pay,
            status: PayrollStatus::from_code(&m.status).unwrap_or_default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &PayrollEntry) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        staff_ref: Set(aggregate.staff_ref.clone()),
        period_start: Set(aggregate.period_start),
        period_end: Set(aggregate.period_end),
        regular_hours: Set(aggregate.regular_hours),
        overtime_hours: Set(aggregate.overtime_hours),
        hourly_rate: Set(aggregate.hourly_rate),
        gross_pay: Set(aggregate.gross_pay),
        deductions: Set(aggregate.deductions),
        net_pay: Set(aggregate.net_pay),
        status: Set(aggregate.status.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Начисления, период которых пересекается с `[date_from, date_to]`
pub async fn list_overlapping(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> anyhow::Result<Vec<PayrollEntry>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(from) = date_from {
        query = query.filter(Column::PeriodEnd.gte(from));
    }
    if let Some(to) = date_to {
        query = query.filter(Column::PeriodStart.lte(to));
    }
    let items = query
        .order_by_desc(Column::PeriodStart)
        .order_by_asc(Column::Description)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Начисления ровно за указанный период
pub async fn list_for_period(
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> anyhow::Result<Vec<PayrollEntry>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::PeriodStart.eq(period_start))
        .filter(Column::PeriodEnd.eq(period_end))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PayrollEntry>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result
        .map(PayrollEntry::from)
        .filter(|e| !e.base.metadata.is_deleted))
}

pub async fn insert(aggregate: &PayrollEntry) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &PayrollEntry) -> anyhow::Result<()> {
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
