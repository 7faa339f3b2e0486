use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор согласующего
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApproverId(pub Uuid);

impl ApproverId {
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

impl AggregateId for ApproverId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ApproverId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Согласующий — сотрудник, участвующий в маршрутах согласования
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approver {
    #[serde(flatten)]
    pub base: BaseAggregate<ApproverId>,

    pub email: String,

    /// Подразделение
    pub department: String,

    /// Должность
    pub position: String,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Approver {
    /// Создать нового согласующего для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        email: String,
        department: String,
        position: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ApproverId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            email,
            department,
            position,
            is_active: true,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ApproverDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.email = dto.email.clone();
        self.department = dto.department.clone();
        self.position = dto.position.clone();
        self.is_active = dto.is_active;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("ФИО не может быть пустым".into());
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err("Некорректный email".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Approver {
    type Id = ApproverId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "approver"
    }

    fn element_name() -> &'static str {
        "Согласующий"
    }

    fn list_name() -> &'static str {
        "Согласующие"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления согласующего
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApproverDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub email: String,
    pub department: String,
    pub position: String,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    pub comment: Option<String>,
}
