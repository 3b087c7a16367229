use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_staff::aggregate::{Staff, StaffDto};
use serde_json::json;

use crate::domain::a001_staff;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/staff
pub async fn list_all() -> ApiResult<Json<Vec<Staff>>> {
    Ok(Json(a001_staff::service::list_all().await?))
}

/// GET /api/staff/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Staff>> {
    let uuid = parse_id(&id)?;
    match a001_staff::service::get_by_id(uuid).await? {
        Some(v) => Ok(Json(v)),
        None => Err(ApiError::not_found()),
    }
}

/// POST /api/staff
pub async fn upsert(Json(dto): Json<StaffDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a001_staff::service::update(dto).await?;
            id
        }
        None => a001_staff::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/staff/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    match a001_staff::service::delete(uuid).await? {
        true => Ok(()),
        false => Err(ApiError::not_found()),
    }
}

/// POST /api/staff/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a001_staff::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
