use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_vendor::aggregate::{Vendor, VendorDto};
use serde_json::json;

use crate::domain::a003_vendor;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/vendor
pub async fn list_all() -> ApiResult<Json<Vec<Vendor>>> {
    Ok(Json(a003_vendor::service::list_all().await?))
}

/// GET /api/vendor/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Vendor>> {
    let uuid = parse_id(&id)?;
    a003_vendor::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/vendor
pub async fn upsert(Json(dto): Json<VendorDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a003_vendor::service::update(dto).await?;
            id
        }
        None => a003_vendor::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/vendor/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a003_vendor::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

/// POST /api/vendor/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a003_vendor::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
