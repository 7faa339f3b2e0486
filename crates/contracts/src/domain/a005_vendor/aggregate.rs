use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор поставщика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub Uuid);

impl VendorId {
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

impl AggregateId for VendorId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(VendorId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Поставщик (контрагент-продавец)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(flatten)]
    pub base: BaseAggregate<VendorId>,

    /// Страна регистрации (ISO-название, фильтруется в списке)
    pub country: String,

    pub city: String,

    /// Налоговый номер (ИНН или зарубежный аналог)
    #[serde(rename = "taxId")]
    pub tax_id: String,

    #[serde(rename = "contactEmail")]
    pub contact_email: String,
}

impl Vendor {
    /// Создать нового поставщика для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        country: String,
        city: String,
        tax_id: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(VendorId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            country,
            city,
            tax_id,
            contact_email: String::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &VendorDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.country = dto.country.clone();
        self.city = dto.city.clone();
        self.tax_id = dto.tax_id.clone();
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

impl AggregateRoot for Vendor {
    type Id = VendorId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "vendor"
    }

    fn element_name() -> &'static str {
        "Поставщик"
    }

    fn list_name() -> &'static str {
        "Поставщики"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления поставщика
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VendorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub country: String,
    pub city: String,

    #[serde(rename = "taxId")]
    pub tax_id: String,

    #[serde(rename = "contactEmail")]
    pub contact_email: String,

    pub comment: Option<String>,
}
