use super::repository;
use crate::shared::error::ServiceError;
use crate::shared::logger;
use chrono::{DateTime, Duration, Utc};
use contracts::domain::a006_kitchen_order::{
    sort_for_kitchen, KitchenOrder, KitchenOrderDto, KitchenOrderItemDto, OrderPriority,
    OrderStatus,
};
use uuid::Uuid;

const ORDER_CODE_PREFIX: &str = "ORD-";

/// Следующий номер после наибольшего ORD-nnnn; чужие номера не учитываются
fn next_order_code<'a>(codes: impl IntoIterator<Item = &'a str>) -> String {
    let max = codes
        .into_iter()
        .filter_map(|c| c.strip_prefix(ORDER_CODE_PREFIX))
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:04}", ORDER_CODE_PREFIX, max.saturating_add(1))
}

/// Сквозной номер заказа: ORD-0001, ORD-0002, ...
async fn generate_code() -> anyhow::Result<String> {
    let codes = repository::all_codes().await?;
    Ok(next_order_code(codes.iter().map(String::as_str)))
}

/// Conflict, если номер уже у другого заказа
async fn ensure_code_free(code: &str, own_id: Option<Uuid>) -> anyhow::Result<()> {
    match repository::find_id_by_code(code).await? {
        Some(id) if Some(id) != own_id => {
            Err(ServiceError::Conflict(format!("Номер заказа {} уже занят", code)).into())
        }
        _ => Ok(()),
    }
}

pub async fn create(dto: KitchenOrderDto) -> anyhow::Result<Uuid> {
    let code = match dto.code.clone().filter(|c| !c.trim().is_empty()) {
        Some(code) => {
            ensure_code_free(&code, None).await?;
            code
        }
        None => generate_code().await?,
    };
    let mut aggregate = KitchenOrder::new_for_insert(&dto, code, Utc::now());

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    let id = repository::insert(&aggregate).await?;
    logger::log(
        "kitchen",
        &format!(
            "Новый заказ {} ({}), позиций: {}",
            aggregate.base.code,
            aggregate.base.description,
            aggregate.items.len()
        ),
    );
    Ok(id)
}

/// Обновление состава заказа. Выданный заказ не редактируется.
pub async fn update(dto: KitchenOrderDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ServiceError::Validation("Некорректный ID".into()))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !aggregate.is_active() {
        return Err(ServiceError::Conflict("Заказ уже выдан".into()).into());
    }

    aggregate.update(&dto);
    ensure_code_free(&aggregate.base.code, Some(id)).await?;
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<KitchenOrder>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<KitchenOrder>> {
    repository::list_all().await
}

/// Активные заказы в порядке приготовления
pub async fn list_active() -> anyhow::Result<Vec<KitchenOrder>> {
    let mut orders = repository::list_active().await?;
    sort_for_kitchen(&mut orders);
    Ok(orders)
}

/// Смена статуса всего заказа
pub async fn set_status(id: Uuid, status: OrderStatus) -> anyhow::Result<KitchenOrder> {
    set_status_at(id, status, Utc::now()).await
}

async fn set_status_at(
    id: Uuid,
    status: OrderStatus,
    now: DateTime<Utc>,
) -> anyhow::Result<KitchenOrder> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    let before = aggregate.status;

    aggregate
        .set_status(status, now)
        .map_err(ServiceError::Conflict)?;
    aggregate.base.before_write();
    repository::update(&aggregate).await?;

    log_transition(&aggregate, before);
    Ok(aggregate)
}

/// Смена статуса одной позиции; статус заказа пересчитывается
pub async fn set_item_status(
    id: Uuid,
    item_id: &str,
    status: OrderStatus,
) -> anyhow::Result<KitchenOrder> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    if !aggregate.items.iter().any(|i| i.id == item_id) {
        return Err(ServiceError::NotFound.into());
    }
    let before = aggregate.status;

    aggregate
        .set_item_status(item_id, status, Utc::now())
        .map_err(ServiceError::Conflict)?;
    aggregate.base.before_write();
    repository::update(&aggregate).await?;

    log_transition(&aggregate, before);
    Ok(aggregate)
}

fn log_transition(order: &KitchenOrder, before: OrderStatus) {
    if order.status == before {
        return;
    }
    tracing::info!(
        "Order {} status {} -> {}",
        order.base.code,
        before.code(),
        order.status.code()
    );
    logger::log(
        "kitchen",
        &format!(
            "{} ({}): {} → {}",
            order.base.code,
            order.base.description,
            before.display_name(),
            order.status.display_name()
        ),
    );
}

/// Несколько заказов в разных стадиях
pub async fn insert_test_data() -> anyhow::Result<()> {
    let now = Utc::now();
    let line = |name: &str, quantity: u32| KitchenOrderItemDto {
        name: name.into(),
        quantity,
        ..Default::default()
    };

    let data = vec![
        (
            "4",
            "Мария",
            OrderPriority::Normal,
            vec![line("Борщ", 2), line("Котлета по-киевски", 2)],
            3,
            20,
            None,
        ),
        (
            "7",
            "Мария",
            OrderPriority::Rush,
            vec![line("Стейк рибай", 1), line("Салат Цезарь", 1)],
            16,
            20,
            Some(OrderStatus::Preparing),
        ),
        (
            "12",
            "Денис",
            OrderPriority::High,
            vec![line("Паста карбонара", 3)],
            30,
            25,
            Some(OrderStatus::Preparing),
        ),
        (
            "2",
            "Денис",
            OrderPriority::Low,
            vec![line("Чизкейк", 2), line("Капучино", 2)],
            8,
            10,
            Some(OrderStatus::Ready),
        ),
    ];

    for (table, server, priority, items, started_minutes_ago, prep_minutes, status) in data {
        let id = create(KitchenOrderDto {
            table_number: table.into(),
            server_name: Some(server.into()),
            priority,
            items,
            started_at: Some(now - Duration::minutes(started_minutes_ago)),
            estimated_minutes: Some(prep_minutes),
            ..Default::default()
        })
        .await?;
        if let Some(status) = status {
            set_status_at(id, status, now).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_code_follows_highest_existing() {
        assert_eq!(next_order_code([]), "ORD-0001");
        // ORD-0002 удалён: счётчик всё равно идёт от максимума
        assert_eq!(next_order_code(["ORD-0001", "ORD-0003"]), "ORD-0004");
        assert_eq!(next_order_code(["ORD-0009", "ORD-0010"]), "ORD-0011");
        assert_eq!(next_order_code(["ORD-9999"]), "ORD-10000");
    }

    #[test]
    fn foreign_codes_are_ignored() {
        assert_eq!(
            next_order_code(["VIP-7", "ORD-", "ORD-+5", "ORD-12a", "ORD-0002"]),
            "ORD-0003"
        );
    }
}
