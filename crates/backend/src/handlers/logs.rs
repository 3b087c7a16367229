use axum::{extract::Query, http::StatusCode, Json};
use contracts::shared::logger::{CreateLogRequest, LogEntry};
use serde::Deserialize;

use crate::shared::error::ApiResult;
use crate::shared::logger;

#[derive(Debug, Deserialize)]
pub struct LogListQuery {
    pub category: Option<String>,
    pub limit: Option<u64>,
}

/// GET /api/logs?category=&limit=
pub async fn list_all(Query(q): Query<LogListQuery>) -> ApiResult<Json<Vec<LogEntry>>> {
    let logs = logger::repository::list_logs(q.category.as_deref(), q.limit).await?;
    Ok(Json(logs))
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> ApiResult<StatusCode> {
    logger::repository::log_event(&req.source, &req.category, &req.message).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/logs
pub async fn clear_all() -> ApiResult<StatusCode> {
    logger::repository::clear_all_logs().await?;
    Ok(StatusCode::OK)
}
