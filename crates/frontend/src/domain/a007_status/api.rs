use contracts::domain::a007_status::aggregate::{Status, StatusDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_statuses() -> Result<Vec<Status>, ApiError> {
    api_utils::get_json("/api/status").await
}

pub async fn create_status(dto: StatusDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/status", &dto).await
}

pub async fn update_status(id: &str, dto: StatusDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/status/{}", id), &dto).await
}

/// 409 — статус назначен документам
pub async fn delete_status(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/status/{}", id)).await
}
