use contracts::domain::a003_approval_group::aggregate::{ApprovalGroup, ApprovalGroupDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_approval_groups() -> Result<Vec<ApprovalGroup>, ApiError> {
    api_utils::get_json("/api/approval-group").await
}

pub async fn create_approval_group(dto: ApprovalGroupDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/approval-group", &dto).await
}

pub async fn update_approval_group(id: &str, dto: ApprovalGroupDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/approval-group/{}", id), &dto).await
}

/// 409 — группа используется в маршруте согласования
pub async fn delete_approval_group(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/approval-group/{}", id)).await
}
