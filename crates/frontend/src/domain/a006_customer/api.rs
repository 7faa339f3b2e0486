use contracts::domain::a006_customer::aggregate::{Customer, CustomerDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_customers() -> Result<Vec<Customer>, ApiError> {
    api_utils::get_json("/api/customer").await
}

pub async fn create_customer(dto: CustomerDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/customer", &dto).await
}

pub async fn update_customer(id: &str, dto: CustomerDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/customer/{}", id), &dto).await
}

/// 409 — по покупателю есть документы
pub async fn delete_customer(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/customer/{}", id)).await
}
