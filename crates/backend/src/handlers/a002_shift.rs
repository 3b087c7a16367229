use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use contracts::domain::a002_shift::aggregate::{Shift, ShiftDto, WeekSchedule};
use serde::Deserialize;
use serde_json::json;

use crate::domain::a002_shift;
use crate::shared::error::{parse_id, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ShiftListQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub staff_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub date: Option<NaiveDate>,
}

/// GET /api/shift?date_from=&date_to=&staff_ref=
pub async fn list(Query(q): Query<ShiftListQuery>) -> ApiResult<Json<Vec<Shift>>> {
    let shifts = a002_shift::service::list(q.date_from, q.date_to, q.staff_ref.as_deref()).await?;
    Ok(Json(shifts))
}

/// GET /api/shift/week?date=2026-04-15
pub async fn week(Query(q): Query<WeekQuery>) -> ApiResult<Json<WeekSchedule>> {
    let date = q.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    Ok(Json(a002_shift::service::week(date).await?))
}

/// GET /api/shift/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Shift>> {
    let uuid = parse_id(&id)?;
    a002_shift::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/shift
pub async fn upsert(Json(dto): Json<ShiftDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a002_shift::service::update(dto).await?;
            id
        }
        None => a002_shift::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/shift/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a002_shift::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

/// POST /api/shift/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a002_shift::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
