use contracts::domain::a002_approver::aggregate::{Approver, ApproverDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_approvers() -> Result<Vec<Approver>, ApiError> {
    api_utils::get_json("/api/approver").await
}

pub async fn create_approver(dto: ApproverDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/approver", &dto).await
}

pub async fn update_approver(id: &str, dto: ApproverDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/approver/{}", id), &dto).await
}

/// 409 — согласующий входит в группу согласования
pub async fn delete_approver(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/approver/{}", id)).await
}
