use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор группы согласования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalGroupId(pub Uuid);

impl ApprovalGroupId {
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

impl AggregateId for ApprovalGroupId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ApprovalGroupId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Группа согласования — именованный набор согласующих
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalGroup {
    #[serde(flatten)]
    pub base: BaseAggregate<ApprovalGroupId>,

    /// ID согласующих, входящих в группу
    #[serde(rename = "memberIds", default)]
    pub member_ids: Vec<String>,
}

impl ApprovalGroup {
    /// Создать новую группу для вставки в БД
    pub fn new_for_insert(code: String, description: String, comment: Option<String>) -> Self {
        let mut base = BaseAggregate::new(ApprovalGroupId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            member_ids: Vec::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn members_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ApprovalGroupDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.member_ids = dto.member_ids.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название группы не может быть пустым".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ApprovalGroup {
    type Id = ApprovalGroupId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "approval-group"
    }

    fn element_name() -> &'static str {
        "Группа согласования"
    }

    fn list_name() -> &'static str {
        "Группы согласования"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления группы согласования
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApprovalGroupDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,

    #[serde(rename = "memberIds", default)]
    pub member_ids: Vec<String>,

    pub comment: Option<String>,
}
