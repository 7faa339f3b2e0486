use contracts::domain::a005_vendor::aggregate::{Vendor, VendorDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_vendors() -> Result<Vec<Vendor>, ApiError> {
    api_utils::get_json("/api/vendor").await
}

pub async fn create_vendor(dto: VendorDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/vendor", &dto).await
}

pub async fn update_vendor(id: &str, dto: VendorDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/vendor/{}", id), &dto).await
}

/// 409 — по поставщику есть документы
pub async fn delete_vendor(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/vendor/{}", id)).await
}
