use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_inventory_item::aggregate::{
    InventoryItem, InventoryItemDto, StockAdjustmentRequest,
};
use contracts::shared::inventory_buckets::{InventoryBuckets, ReorderSuggestion};
use serde_json::json;

use crate::domain::a004_inventory_item;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/inventory
pub async fn list_all() -> ApiResult<Json<Vec<InventoryItem>>> {
    Ok(Json(a004_inventory_item::service::list_all().await?))
}

/// GET /api/inventory/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<InventoryItem>> {
    let uuid = parse_id(&id)?;
    a004_inventory_item::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/inventory
pub async fn upsert(Json(dto): Json<InventoryItemDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a004_inventory_item::service::update(dto).await?;
            id
        }
        None => a004_inventory_item::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/inventory/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a004_inventory_item::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

/// POST /api/inventory/:id/adjust
pub async fn adjust(
    Path(id): Path<String>,
    Json(request): Json<StockAdjustmentRequest>,
) -> ApiResult<Json<InventoryItem>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a004_inventory_item::service::adjust(uuid, request).await?))
}

/// GET /api/inventory/buckets
pub async fn buckets() -> ApiResult<Json<InventoryBuckets>> {
    let today = chrono::Local::now().date_naive();
    Ok(Json(a004_inventory_item::service::buckets(today).await?))
}

/// GET /api/inventory/reorder
pub async fn reorder() -> ApiResult<Json<Vec<ReorderSuggestion>>> {
    Ok(Json(a004_inventory_item::service::reorder().await?))
}

/// POST /api/inventory/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a004_inventory_item::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
