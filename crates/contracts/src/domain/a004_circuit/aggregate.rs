use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор маршрута согласования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitId(pub Uuid);

impl CircuitId {
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

impl AggregateId for CircuitId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CircuitId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Этап маршрута согласования
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CircuitStage {
    /// Порядковый номер этапа (с 1)
    pub order: u32,

    /// Название этапа ("Юристы", "Финконтроль" и т.п.)
    pub name: String,

    /// Группа согласования, обслуживающая этап
    #[serde(rename = "groupId")]
    pub group_id: String,

    /// Сколько одобрений нужно для прохождения этапа (0 = все участники группы)
    pub quorum: u32,
}

/// Маршрут согласования — последовательность этапов для вида документа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(flatten)]
    pub base: BaseAggregate<CircuitId>,

    /// Вид документа, к которому привязан маршрут
    #[serde(rename = "documentTypeId")]
    pub document_type_id: String,

    /// Название вида документа (денормализовано backend-ом для списков)
    #[serde(rename = "documentTypeName", default)]
    pub document_type_name: String,

    /// Этапы в порядке прохождения
    #[serde(default)]
    pub stages: Vec<CircuitStage>,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Circuit {
    /// Создать новый маршрут для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        document_type_id: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CircuitId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            document_type_id,
            document_type_name: String::new(),
            stages: Vec::new(),
            is_active: true,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn stages_count(&self) -> usize {
        self.stages.len()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CircuitDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.document_type_id = dto.document_type_id.clone();
        self.stages = dto.stages.clone();
        self.is_active = dto.is_active;
    }

    /// Валидация данных.
    /// Этапы должны идти подряд с 1 и ссылаться на группу.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название маршрута не может быть пустым".into());
        }
        if self.document_type_id.trim().is_empty() {
            return Err("Не указан вид документа".into());
        }
        if self.stages.is_empty() {
            return Err("Маршрут должен содержать хотя бы один этап".into());
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.order as usize != i + 1 {
                return Err(format!("Нарушен порядок этапов: этап {} имеет номер {}", i + 1, stage.order));
            }
            if stage.name.trim().is_empty() {
                return Err(format!("Этап {}: не задано название", i + 1));
            }
            if stage.group_id.trim().is_empty() {
                return Err(format!("Этап {}: не выбрана группа согласования", i + 1));
            }
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Circuit {
    type Id = CircuitId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "circuit"
    }

    fn element_name() -> &'static str {
        "Маршрут согласования"
    }

    fn list_name() -> &'static str {
        "Маршруты согласования"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления маршрута согласования
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CircuitDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,

    #[serde(rename = "documentTypeId")]
    pub document_type_id: String,

    #[serde(default)]
    pub stages: Vec<CircuitStage>,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(order: u32, name: &str) -> CircuitStage {
        CircuitStage {
            order,
            name: name.into(),
            group_id: "g1".into(),
            quorum: 0,
        }
    }

    #[test]
    fn validate_requires_contiguous_stage_order() {
        let mut c = Circuit::new_for_insert("C-001".into(), "Договоры".into(), "dt1".into(), None);
        c.stages = vec![stage(1, "Юристы"), stage(3, "Директор")];
        assert!(c.validate().is_err());

        c.stages = vec![stage(1, "Юристы"), stage(2, "Директор")];
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_requires_at_least_one_stage() {
        let c = Circuit::new_for_insert("C-002".into(), "Счета".into(), "dt2".into(), None);
        assert!(c.validate().is_err());
    }
}
