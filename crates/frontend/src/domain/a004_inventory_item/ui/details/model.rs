use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a004_inventory_item::{InventoryItem, InventoryItemDto, StockAdjustmentRequest};

pub async fn fetch_by_id(id: &str) -> Result<InventoryItem, String> {
    get_json(&format!("/api/inventory/{}", id)).await
}

pub async fn save_form(dto: &InventoryItemDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/inventory", dto).await?;
    Ok(saved.id)
}

/// Приход или списание; сервер возвращает позицию с новым остатком
pub async fn adjust(id: &str, request: &StockAdjustmentRequest) -> Result<InventoryItem, String> {
    post_json(&format!("/api/inventory/{}/adjust", id), request).await
}
