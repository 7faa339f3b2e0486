use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    api_utils::get_json("/api/system/users").await
}

pub async fn create_user(dto: CreateUserDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/system/users", &dto).await
}

pub async fn update_user(dto: UpdateUserDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/system/users/{}", dto.id), &dto).await
}

pub async fn delete_user(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/system/users/{}", id)).await
}
