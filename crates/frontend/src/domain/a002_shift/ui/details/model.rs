use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a002_shift::{Shift, ShiftDto};

pub async fn fetch_by_id(id: &str) -> Result<Shift, String> {
    get_json(&format!("/api/shift/{}", id)).await
}

/// Пересечение с другой сменой сотрудника сервер отклоняет (409) с текстом ошибки
pub async fn save_form(dto: &ShiftDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/shift", dto).await?;
    Ok(saved.id)
}
