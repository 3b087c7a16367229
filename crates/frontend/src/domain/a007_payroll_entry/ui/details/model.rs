use crate::shared::api_utils::{get_json, post_json};
use contracts::domain::a007_payroll_entry::{PayrollAdjustmentDto, PayrollEntry};

pub async fn fetch_by_id(id: &str) -> Result<PayrollEntry, String> {
    get_json(&format!("/api/payroll/{}", id)).await
}

/// Сервер пересчитывает суммы и возвращает начисление целиком
pub async fn adjust(id: &str, dto: &PayrollAdjustmentDto) -> Result<PayrollEntry, String> {
    post_json(&format!("/api/payroll/{}", id), dto).await
}
