use contracts::domain::a001_document_type::aggregate::{DocumentType, DocumentTypeDto};

use crate::shared::api_utils::{self, ApiError};

/// Загрузить все виды документов
pub async fn fetch_document_types() -> Result<Vec<DocumentType>, ApiError> {
    api_utils::get_json("/api/document-type").await
}

pub async fn create_document_type(dto: DocumentTypeDto) -> Result<(), ApiError> {
    api_utils::post_json("/api/document-type", &dto).await
}

pub async fn update_document_type(id: &str, dto: DocumentTypeDto) -> Result<(), ApiError> {
    api_utils::put_json(&format!("/api/document-type/{}", id), &dto).await
}

/// Удалить вид документа. Backend отвечает 409, если к виду привязаны
/// документы — ошибка возвращается значением и попадает в сводку.
pub async fn delete_document_type(id: &str) -> Result<(), ApiError> {
    api_utils::delete(&format!("/api/document-type/{}", id)).await
}
