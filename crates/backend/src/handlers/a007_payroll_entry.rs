use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a007_payroll_entry::aggregate::{
    PayrollAdjustmentDto, PayrollEntry, PayrollGenerateRequest, PayrollGenerateResponse,
};

use super::DateRangeQuery;
use crate::domain::a007_payroll_entry;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/payroll?date_from=&date_to=
pub async fn list(Query(q): Query<DateRangeQuery>) -> ApiResult<Json<Vec<PayrollEntry>>> {
    Ok(Json(
        a007_payroll_entry::service::list(q.date_from, q.date_to).await?,
    ))
}

/// GET /api/payroll/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<PayrollEntry>> {
    let uuid = parse_id(&id)?;
    a007_payroll_entry::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/payroll/generate
pub async fn generate(
    Json(request): Json<PayrollGenerateRequest>,
) -> ApiResult<Json<PayrollGenerateResponse>> {
    Ok(Json(a007_payroll_entry::service::generate(request).await?))
}

/// POST /api/payroll/:id — правка часов и удержаний черновика
pub async fn adjust(
    Path(id): Path<String>,
    Json(dto): Json<PayrollAdjustmentDto>,
) -> ApiResult<Json<PayrollEntry>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a007_payroll_entry::service::adjust(uuid, dto).await?))
}

/// POST /api/payroll/:id/approve
pub async fn approve(Path(id): Path<String>) -> ApiResult<Json<PayrollEntry>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a007_payroll_entry::service::approve(uuid).await?))
}

/// POST /api/payroll/:id/pay
pub async fn mark_paid(Path(id): Path<String>) -> ApiResult<Json<PayrollEntry>> {
    let uuid = parse_id(&id)?;
    Ok(Json(a007_payroll_entry::service::mark_paid(uuid).await?))
}

/// DELETE /api/payroll/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a007_payroll_entry::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}
