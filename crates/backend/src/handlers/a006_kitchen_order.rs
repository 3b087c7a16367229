use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a006_kitchen_order::aggregate::{
    KitchenBoardSettings, KitchenOrder, KitchenOrderDto, StatusChangeRequest,
};
use serde_json::json;

use crate::domain::a006_kitchen_order;
use crate::shared::config;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/kitchen_order
pub async fn list_all() -> ApiResult<Json<Vec<KitchenOrder>>> {
    Ok(Json(a006_kitchen_order::service::list_all().await?))
}

/// GET /api/kitchen_order/active
pub async fn list_active() -> ApiResult<Json<Vec<KitchenOrder>>> {
    Ok(Json(a006_kitchen_order::service::list_active().await?))
}

/// GET /api/kitchen_order/settings
pub async fn board_settings() -> Json<KitchenBoardSettings> {
    Json(config::get().kitchen.board_settings())
}

/// GET /api/kitchen_order/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<KitchenOrder>> {
    let uuid = parse_id(&id)?;
    a006_kitchen_order::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/kitchen_order
pub async fn upsert(Json(dto): Json<KitchenOrderDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a006_kitchen_order::service::update(dto).await?;
            id
        }
        None => a006_kitchen_order::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/kitchen_order/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a006_kitchen_order::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

/// POST /api/kitchen_order/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> ApiResult<Json<KitchenOrder>> {
    let uuid = parse_id(&id)?;
    let order = a006_kitchen_order::service::set_status(uuid, request.status).await?;
    Ok(Json(order))
}

/// POST /api/kitchen_order/:id/items/:item_id/status
pub async fn set_item_status(
    Path((id, item_id)): Path<(String, String)>,
    Json(request): Json<StatusChangeRequest>,
) -> ApiResult<Json<KitchenOrder>> {
    let uuid = parse_id(&id)?;
    let order =
        a006_kitchen_order::service::set_item_status(uuid, &item_id, request.status).await?;
    Ok(Json(order))
}

/// POST /api/kitchen_order/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a006_kitchen_order::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
