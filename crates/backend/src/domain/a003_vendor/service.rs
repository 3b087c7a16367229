use super::repository;
use crate::shared::error::ServiceError;
use contracts::domain::a003_vendor::{Vendor, VendorDto};
use uuid::Uuid;

fn generate_code() -> String {
    format!("VND-{}", &Uuid::new_v4().simple().to_string()[..8])
}

/// Создание нового поставщика
pub async fn create(dto: VendorDto) -> anyhow::Result<Uuid> {
    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Vendor::new_for_insert(&dto, code);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::insert(&aggregate).await
}

/// Обновление поставщика
pub async fn update(dto: VendorDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Vendor>> {
    repository::get_by_id(id).await
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<Vendor>> {
    repository::get_by_code(code).await
}

pub async fn list_all() -> anyhow::Result<Vec<Vendor>> {
    repository::list_all().await
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let data = vec![
        VendorDto {
            code: Some("VND-001".into()),
            description: "ООО \"Зелёная грядка\"".into(),
            contact_person: Some("Сергей Петров".into()),
            phone: Some("+7 900 111-22-33".into()),
            email: Some("order@greenbed.local".into()),
            category: "Овощи и зелень".into(),
            address: Some("Овощебаза №3, склад 12".into()),
            ..Default::default()
        },
        VendorDto {
            code: Some("VND-002".into()),
            description: "Мясной двор".into(),
            contact_person: Some("Алексей Кузнецов".into()),
            phone: Some("+7 900 222-33-44".into()),
            category: "Мясо и птица".into(),
            ..Default::default()
        },
        VendorDto {
            code: Some("VND-003".into()),
            description: "Северная молочная компания".into(),
            email: Some("sales@milk-north.local".into()),
            category: "Молочная продукция".into(),
            ..Default::default()
        },
        VendorDto {
            code: Some("VND-004".into()),
            description: "Бар-Снаб".into(),
            category: "Напитки".into(),
            comment: Some("Доставка по вторникам и пятницам".into()),
            ..Default::default()
        },
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
