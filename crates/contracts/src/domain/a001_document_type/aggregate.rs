use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор вида документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentTypeId(pub Uuid);

impl DocumentTypeId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for DocumentTypeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DocumentTypeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Вид документа (договор, счёт, акт и т.п.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    #[serde(flatten)]
    pub base: BaseAggregate<DocumentTypeId>,

    /// Префикс нумерации документов этого вида (например, "DOG")
    pub prefix: String,

    /// Срок хранения в днях (0 = бессрочно)
    #[serde(rename = "retentionDays")]
    pub retention_days: i32,

    /// Количество документов этого вида (считает backend).
    /// Вид с ненулевым счётчиком удалять нельзя.
    #[serde(rename = "documentsCount", default)]
    pub documents_count: i64,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl DocumentType {
    /// Создать новый вид документа для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        prefix: String,
        retention_days: i32,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(DocumentTypeId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            prefix,
            retention_days,
            documents_count: 0,
            is_active: true,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Можно ли удалять: вид без привязанных документов
    pub fn is_deletable(&self) -> bool {
        self.documents_count == 0
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &DocumentTypeDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.prefix = dto.prefix.clone();
        self.retention_days = dto.retention_days;
        self.is_active = dto.is_active;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if !self.prefix.trim().is_empty() {
            let ok = self.prefix.chars().all(|c| c.is_ascii_alphanumeric());
            if !ok || self.prefix.len() > 8 {
                return Err("Префикс: до 8 латинских букв/цифр".into());
            }
        }
        if self.retention_days < 0 {
            return Err("Срок хранения не может быть отрицательным".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for DocumentType {
    type Id = DocumentTypeId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "document-type"
    }

    fn element_name() -> &'static str {
        "Вид документа"
    }

    fn list_name() -> &'static str {
        "Виды документов"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления вида документа
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentTypeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub prefix: String,

    #[serde(rename = "retentionDays")]
    pub retention_days: i32,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_type_is_deletable() {
        let dt = DocumentType::new_for_insert(
            "DT-001".into(),
            "Договор".into(),
            "DOG".into(),
            0,
            None,
        );
        assert!(dt.is_deletable());
        assert!(dt.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_prefix() {
        let mut dt = DocumentType::new_for_insert(
            "DT-002".into(),
            "Счёт".into(),
            "SCH".into(),
            365,
            None,
        );
        dt.prefix = "слишком-длинный".into();
        assert!(dt.validate().is_err());
    }
}
