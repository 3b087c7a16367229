use axum::Json;
use contracts::shared::equipment::TemperatureReading;

use crate::system::monitors::cold_storage;

/// GET /api/equipment/temperatures
pub async fn temperatures() -> Json<Vec<TemperatureReading>> {
    Json(cold_storage::latest_readings())
}
