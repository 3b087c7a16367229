use crate::shared::api_utils::{get_json, post_json, SavedId};
use contracts::domain::a003_vendor::{Vendor, VendorDto};

pub async fn fetch_by_id(id: &str) -> Result<Vendor, String> {
    get_json(&format!("/api/vendor/{}", id)).await
}

pub async fn save_form(dto: &VendorDto) -> Result<String, String> {
    let saved: SavedId = post_json("/api/vendor", dto).await?;
    Ok(saved.id)
}
