use contracts::domain::a004_circuit::aggregate::{Circuit, CircuitDto};

use crate::shared::api_utils::{self, ApiError};

pub async fn fetch_circuits() -> Result<Vec<Circuit>, ApiError> {
    api_utils::get_json("/api/circuit").await
}

pub async fn create_circuit(dto: CircuitDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/circuit", &dto).await
}

pub async fn update_circuit(id: &str, dto: CircuitDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/circuit/{}", id), &dto).await
}

pub async fn delete_circuit(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/circuit/{}", id)).await
}
