use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор статуса документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusId(pub Uuid);

impl StatusId {
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

impl AggregateId for StatusId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StatusId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Тип статуса в жизненном цикле документа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    /// Начальный (черновик)
    Initial,
    /// Промежуточный (на согласовании и т.п.)
    Intermediate,
    /// Конечный (утверждён, отклонён, архив)
    Final,
}

impl StatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::Initial => "initial",
            StatusType::Intermediate => "intermediate",
            StatusType::Final => "final",
        }
    }

    /// Подпись для UI
    pub fn label(&self) -> &'static str {
        match self {
            StatusType::Initial => "Начальный",
            StatusType::Intermediate => "Промежуточный",
            StatusType::Final => "Конечный",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "initial" => Some(StatusType::Initial),
            "intermediate" => Some(StatusType::Intermediate),
            "final" => Some(StatusType::Final),
            _ => None,
        }
    }
}

/// Статус документа (черновик, на согласовании, утверждён...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    #[serde(flatten)]
    pub base: BaseAggregate<StatusId>,

    #[serde(rename = "statusType")]
    pub status_type: StatusType,

    /// Цвет бейджа в UI (#rrggbb)
    pub color: String,
}

impl Status {
    /// Создать новый статус для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        status_type: StatusType,
        color: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(StatusId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            status_type,
            color,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &StatusDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.status_type = dto.status_type;
        self.color = dto.color.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название статуса не может быть пустым".into());
        }
        if !self.color.is_empty() {
            let ok = self.color.starts_with('#')
                && self.color.len() == 7
                && self.color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !ok {
                return Err("Цвет задаётся в формате #rrggbb".into());
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Status {
    type Id = StatusId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "status"
    }

    fn element_name() -> &'static str {
        "Статус документа"
    }

    fn list_name() -> &'static str {
        "Статусы документов"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления статуса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,

    #[serde(rename = "statusType")]
    pub status_type: StatusType,

    pub color: String,
    pub comment: Option<String>,
}

impl Default for StatusDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            status_type: StatusType::Initial,
            color: "#9e9e9e".to_string(),
            comment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_type_round_trip() {
        for st in [StatusType::Initial, StatusType::Intermediate, StatusType::Final] {
            assert_eq!(StatusType::parse(st.as_str()), Some(st));
        }
        assert_eq!(StatusType::parse("draft"), None);
    }

    #[test]
    fn validate_checks_color_format() {
        let mut s = Status::new_for_insert(
            "ST-001".into(),
            "Черновик".into(),
            StatusType::Initial,
            "#aabbcc".into(),
            None,
        );
        assert!(s.validate().is_ok());
        s.color = "red".into();
        assert!(s.validate().is_err());
    }
}
