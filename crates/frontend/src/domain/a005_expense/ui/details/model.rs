use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a005_expense::{Expense, ExpenseDto};

pub async fn fetch_by_id(id: &str) -> Result<Expense, String> {
    get_json(&format!("/api/expense/{}", id)).await
}

pub async fn save_form(dto: &ExpenseDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/expense", dto).await?;
    Ok(saved.id)
}
