use super::repository;
use crate::shared::error::ServiceError;
use chrono::NaiveDate;
use contracts::domain::a001_staff::{Staff, StaffDto, StaffRole};
use uuid::Uuid;

fn generate_code() -> String {
    format!("STF-{}", &Uuid::new_v4().simple().to_string()[..8])
}

/// Создание нового сотрудника
pub async fn create(dto: StaffDto) -> anyhow::Result<Uuid> {
    let code = dto.code.clone().unwrap_or_else(generate_code);
    let mut aggregate = Staff::new_for_insert(&dto, code);

    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.base.before_write();

    repository::insert(&aggregate).await
}

/// Обновление существующего сотрудника
pub async fn update(dto: StaffDto) -> anyhow::Result<()> {
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

/// Мягкое удаление
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Staff>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Staff>> {
    repository::list_all().await
}

pub async fn list_active() -> anyhow::Result<Vec<Staff>> {
    Ok(repository::list_all()
        .await?
        .into_iter()
        .filter(|s| s.is_active)
        .collect())
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> anyhow::Result<()> {
    let staff = |code: &str, name: &str, role: StaffRole, rate: f64, email: Option<&str>| StaffDto {
        code: Some(code.into()),
        description: name.into(),
        role,
        hourly_rate: rate,
        email: email.map(String::from),
        hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        ..Default::default()
    };

    let data = vec![
        staff("STF-001", "Ольга Смирнова", StaffRole::Manager, 650.0, Some("olga@bistro.local")),
        staff("STF-002", "Игорь Ковалёв", StaffRole::Chef, 600.0, None),
        staff("STF-003", "Павел Орлов", StaffRole::LineCook, 420.0, None),
        staff("STF-004", "Мария Лебедева", StaffRole::Server, 300.0, Some("maria@bistro.local")),
        staff("STF-005", "Денис Волков", StaffRole::Bartender, 340.0, None),
        staff("STF-006", "Анна Зайцева", StaffRole::Host, 280.0, None),
    ];

    for dto in data {
        create(dto).await?;
    }

    Ok(())
}
