use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a001_staff::{Staff, StaffDto};

pub async fn fetch_by_id(id: &str) -> Result<Staff, String> {
    get_json(&format!("/api/staff/{}", id)).await
}

/// Создание или обновление; возвращает id записи
pub async fn save_form(dto: &StaffDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/staff", dto).await?;
    Ok(saved.id)
}
