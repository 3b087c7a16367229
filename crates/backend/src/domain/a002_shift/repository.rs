use chrono::{NaiveDate, Utc};
use contracts::domain::a001_staff::StaffRole;
use contracts::domain::a002_shift::{Shift, ShiftId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_shift")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub staff_ref: String,
    pub shift_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub role: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Shift {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Shift {
            base: BaseAggregate::with_metadata(
                ShiftId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            staff_ref: m.staff_ref,
            shift_date: m.shift_date,
            start_time: m.start_time,
            end_time: m.end_time,
            role: StaffRole::from_code(&m.role).unwrap_or_default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Shift) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        staff_ref: Set(aggregate.staff_ref.clone()),
        shift_date: Set(aggregate.shift_date),
        start_time: Set(aggregate.start_time),
        end_time: Set(aggregate.end_time),
        role: Set(aggregate.role.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Смены в диапазоне дат (границы включительно), опционально по сотруднику
pub async fn list_between(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    staff_ref: Option<&str>,
) -> anyhow::Result<Vec<Shift>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(from) = date_from {
        query = query.filter(Column::ShiftDate.gte(from));
    }
    if let Some(to) = date_to {
        query = query.filter(Column::ShiftDate.lte(to));
    }
    if let Some(staff_ref) = staff_ref {
        query = query.filter(Column::StaffRef.eq(staff_ref));
    }
    let items = query
        .order_by_asc(Column::ShiftDate)
        .order_by_asc(Column::StartTime)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Shift>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Shift::from).filter(|s| !s.base.metadata.is_deleted))
}

pub async fn insert(aggregate: &Shift) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &Shift) -> anyhow::Result<()> {
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
