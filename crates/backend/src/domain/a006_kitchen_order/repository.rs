use chrono::Utc;
use contracts::domain::a006_kitchen_order::{
    KitchenOrder, KitchenOrderId, KitchenOrderItem, OrderPriority, OrderStatus,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_kitchen_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub table_number: String,
    pub server_name: Option<String>,
    pub status: String,
    pub priority: String,
    /// Позиции заказа, JSON-массив `KitchenOrderItem`
    pub items_json: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub estimated_at: chrono::DateTime<chrono::Utc>,
    pub delivered_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for KitchenOrder {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let items: Vec<KitchenOrderItem> = serde_json::from_str(&m.items_json).unwrap_or_else(|e| {
            tracing::warn!("Order {}: broken items_json: {}", m.code, e);
            Vec::new()
        });

        KitchenOrder {
            base: BaseAggregate::with_metadata(
                KitchenOrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            table_number: m.table_number,
            server_name: m.server_name,
            status: OrderStatus::from_code(&m.status).unwrap_or_default(),
            priority: OrderPriority::from_code(&m.priority).unwrap_or_default(),
            items,
            started_at: m.started_at,
            estimated_at: m.estimated_at,
            delivered_at: m.delivered_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &KitchenOrder) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        table_number: Set(aggregate.table_number.clone()),
        server_name: Set(aggregate.server_name.clone()),
        status: Set(aggregate.status.code().to_string()),
        priority: Set(aggregate.priority.code().to_string()),
        items_json: Set(serde_json::to_string(&aggregate.items)?),
        started_at: Set(aggregate.started_at),
        estimated_at: Set(aggregate.estimated_at),
        delivered_at: Set(aggregate.delivered_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<KitchenOrder>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::StartedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Заказы, ещё не выданные гостю
pub async fn list_active() -> anyhow::Result<Vec<KitchenOrder>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.ne(OrderStatus::Delivered.code()))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<KitchenOrder>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result
        .map(KitchenOrder::from)
        .filter(|o| !o.base.metadata.is_deleted))
}

/// Все номера заказов, включая удалённые: номер не переиспользуется
pub async fn all_codes() -> anyhow::Result<Vec<String>> {
    use sea_orm::QuerySelect;
    let codes = Entity::find()
        .select_only()
        .column(Column::Code)
        .into_tuple::<String>()
        .all(conn())
        .await?;
    Ok(codes)
}

/// Id заказа с этим номером, если номер занят
pub async fn find_id_by_code(code: &str) -> anyhow::Result<Option<Uuid>> {
    let found = Entity::find()
        .filter(Column::Code.eq(code))
        .one(conn())
        .await?;
    Ok(found.and_then(|m| Uuid::parse_str(&m.id).ok()))
}

pub async fn insert(aggregate: &KitchenOrder) -> anyhow::Result<Uuid> {
    to_active(aggregate)?.insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &KitchenOrder) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
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
