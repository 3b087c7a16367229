use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a006_kitchen_order::{KitchenOrder, KitchenOrderDto};

pub async fn fetch_by_id(id: &str) -> Result<KitchenOrder, String> {
    get_json(&format!("/api/kitchen_order/{}", id)).await
}

pub async fn save_form(dto: &KitchenOrderDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/kitchen_order", dto).await?;
    Ok(saved.id)
}
