use axum::{extract::Query, Json};
use chrono::Datelike;
use contracts::dashboards::d400_operations_summary::dto::{
    OperationsSummaryRequest, OperationsSummaryResponse,
};

use super::DateRangeQuery;
use crate::dashboards::d400_operations_summary::service;
use crate::shared::error::ApiResult;

/// GET /api/d400/summary?date_from=&date_to=
///
/// По умолчанию — с начала текущего месяца по сегодня.
pub async fn get_summary(
    Query(q): Query<DateRangeQuery>,
) -> ApiResult<Json<OperationsSummaryResponse>> {
    let today = chrono::Local::now().date_naive();
    let request = OperationsSummaryRequest {
        date_from: q
            .date_from
            .unwrap_or_else(|| today.with_day(1).unwrap_or(today)),
        date_to: q.date_to.unwrap_or(today),
    };
    Ok(Json(service::get_summary(request).await?))
}
