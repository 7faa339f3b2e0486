use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор покупателя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
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

impl AggregateId for CustomerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CustomerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Покупатель (контрагент-заказчик)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub base: BaseAggregate<CustomerId>,

    /// Страна регистрации (фильтруется в списке)
    pub country: String,

    /// Контактное лицо
    #[serde(rename = "contactPerson")]
    pub contact_person: String,

    #[serde(rename = "contactEmail")]
    pub contact_email: String,
}

impl Customer {
    /// Создать нового покупателя для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        country: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CustomerId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            country,
            contact_person: String::new(),
            contact_email: String::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &CustomerDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.country = dto.country.clone();
        self.contact_person = dto.contact_person.clone();
        self.contact_email = dto.contact_email.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if !self.contact_email.trim().is_empty() && !self.contact_email.contains('@') {
            return Err("Некорректный email".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Покупатель"
    }

    fn list_name() -> &'static str {
        "Покупатели"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления покупателя
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub country: String,

    #[serde(rename = "contactPerson")]
    pub contact_person: String,

    #[serde(rename = "contactEmail")]
    pub contact_email: String,

    pub comment: Option<String>,
}
