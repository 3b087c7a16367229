use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use chrono::Datelike;
use contracts::domain::a005_expense::aggregate::{Expense, ExpenseDto, ExpenseSummary};
use serde_json::json;

use super::DateRangeQuery;
use crate::domain::a005_expense;
use crate::shared::error::{parse_id, ApiError, ApiResult};

/// GET /api/expense?date_from=&date_to=
pub async fn list(Query(q): Query<DateRangeQuery>) -> ApiResult<Json<Vec<Expense>>> {
    Ok(Json(a005_expense::service::list(q.date_from, q.date_to).await?))
}

/// GET /api/expense/summary?date_from=&date_to=
///
/// Без параметров — текущий месяц.
pub async fn summary(Query(q): Query<DateRangeQuery>) -> ApiResult<Json<ExpenseSummary>> {
    let today = chrono::Local::now().date_naive();
    let date_from = q
        .date_from
        .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
    let date_to = q.date_to.unwrap_or(today);
    Ok(Json(a005_expense::service::summary(date_from, date_to).await?))
}

/// GET /api/expense/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Expense>> {
    let uuid = parse_id(&id)?;
    a005_expense::service::get_by_id(uuid)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// POST /api/expense
pub async fn upsert(Json(dto): Json<ExpenseDto>) -> ApiResult<Json<serde_json::Value>> {
    let id = match dto.id.clone() {
        Some(id) => {
            a005_expense::service::update(dto).await?;
            id
        }
        None => a005_expense::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/expense/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<()> {
    let uuid = parse_id(&id)?;
    if a005_expense::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(ApiError::not_found())
    }
}

/// POST /api/expense/testdata
pub async fn insert_test_data() -> ApiResult<StatusCode> {
    a005_expense::service::insert_test_data().await?;
    Ok(StatusCode::OK)
}
