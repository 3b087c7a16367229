use super::repository;
use crate::domain::a003_vendor;
use crate::shared::config;
use crate::shared::error::ServiceError;
use crate::shared::logger;
use chrono::{Duration, Local, NaiveDate};
use contracts::domain::a004_inventory_item::{
    InventoryItem, InventoryItemDto, StockAdjustmentRequest,
};
use contracts::domain::common::AggregateId;
use contracts::shared::inventory_buckets::{
    reorder_suggestions, InventoryBuckets, ReorderSuggestion,
};
use std::collections::HashMap;
use uuid::Uuid;

fn generate_code() -> String {
    format!("INV-{}", &Uuid::new_v4().simple().to_string()[..8])
}

/// Создание складской позиции
pub async fn create(dto: InventoryItemDto) -> anyhow::Result<Uuid> {
    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = InventoryItem::new_for_insert(&dto, code);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::insert(&aggregate).await
}

/// Обновление карточки позиции
pub async fn update(dto: InventoryItemDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<InventoryItem>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<InventoryItem>> {
    repository::list_all().await
}

/// Приход или списание. Уход остатка в минус отклоняется.
pub async fn adjust(id: Uuid, request: StockAdjustmentRequest) -> anyhow::Result<InventoryItem> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let before = aggregate.quantity;
    aggregate
        .adjust(request.delta)
        .map_err(ServiceError::Validation)?;
    aggregate.base.before_write();
    repository::update(&aggregate).await?;

    logger::log(
        "inventory",
        &format!(
            "{}: {} → {} {}{}",
            aggregate.base.description,
            before,
            aggregate.quantity,
            aggregate.unit,
            request
                .reason
                .as_deref()
                .map(|r| format!(" ({})", r))
                .unwrap_or_default()
        ),
    );
    Ok(aggregate)
}

/// Группы остатков на дату
pub async fn buckets(today: NaiveDate) -> anyhow::Result<InventoryBuckets> {
    let items = repository::list_all().await?;
    Ok(InventoryBuckets::classify(
        &items,
        today,
        config::get().inventory.expiring_soon_days,
    ))
}

/// Предложения дозаказа с названиями поставщиков
pub async fn reorder() -> anyhow::Result<Vec<ReorderSuggestion>> {
    let items = repository::list_all().await?;
    let vendors: HashMap<String, String> = a003_vendor::service::list_all()
        .await?
        .into_iter()
        .map(|v| (v.base.id.as_string(), v.base.description))
        .collect();

    let mut suggestions = reorder_suggestions(&items);
    for suggestion in &mut suggestions {
        suggestion.vendor_name = suggestion
            .vendor_ref
            .as_ref()
            .and_then(|r| vendors.get(r).cloned());
    }
    Ok(suggestions)
}

/// Вставка тестовых данных (поставщики подбираются по тестовым кодам)
pub async fn insert_test_data() -> anyhow::Result<()> {
    let vendor_ref = |code: &'static str| async move {
        a003_vendor::service::get_by_code(code)
            .await
            .map(|v| v.map(|v| v.base.id.as_string()))
    };
    let greens = vendor_ref("VND-001").await?;
    let meat = vendor_ref("VND-002").await?;
    let dairy = vendor_ref("VND-003").await?;
    let bar = vendor_ref("VND-004").await?;

    let today = Local::now().date_naive();
    // код, наименование, категория, остаток, ед., минимум, цена, поставщик, срок (дней)
    let data = [
        ("INV-001", "Томаты", "Овощи", 12.0, "кг", 5.0, 180.0, &greens, Some(4)),
        ("INV-002", "Салат романо", "Овощи", 1.5, "кг", 3.0, 420.0, &greens, Some(2)),
        ("INV-003", "Говяжья вырезка", "Мясо", 0.0, "кг", 4.0, 1900.0, &meat, None),
        ("INV-004", "Куриное филе", "Мясо", 8.0, "кг", 5.0, 390.0, &meat, Some(3)),
        ("INV-005", "Сливки 33%", "Молочное", 2.0, "л", 4.0, 520.0, &dairy, Some(1)),
        ("INV-006", "Пармезан", "Молочное", 3.2, "кг", 1.0, 2600.0, &dairy, Some(40)),
        ("INV-007", "Тоник", "Напитки", 48.0, "шт", 24.0, 65.0, &bar, None),
        ("INV-008", "Лаймы", "Напитки", 0.8, "кг", 1.0, 350.0, &bar, Some(6)),
    ];

    for (code, name, category, quantity, unit, min_quantity, unit_cost, vendor, expiry_days) in
        data
    {
        create(InventoryItemDto {
            code: Some(code.into()),
            description: name.into(),
            category: category.into(),
            quantity,
            unit: unit.into(),
            min_quantity,
            unit_cost,
            vendor_ref: vendor.clone(),
            expiry_date: expiry_days.map(|d: i64| today + Duration::days(d)),
            ..Default::default()
        })
        .await?;
    }

    Ok(())
}
