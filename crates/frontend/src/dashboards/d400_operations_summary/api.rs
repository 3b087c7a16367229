use crate::shared::api_utils::get_json;
use chrono::NaiveDate;
use contracts::dashboards::d400_operations_summary::OperationsSummaryResponse;
use contracts::shared::equipment::TemperatureReading;

const API_BASE: &str = "/api/d400";

/// Сводка по кухне, складу, расходам и персоналу за период
pub async fn get_summary(
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<OperationsSummaryResponse, String> {
    get_json(&format!(
        "{}/summary?date_from={}&date_to={}",
        API_BASE, date_from, date_to
    ))
    .await
}

/// Последние показания датчиков холодильников
pub async fn get_temperatures() -> Result<Vec<TemperatureReading>, String> {
    get_json("/api/equipment/temperatures").await
}
