//! Дескрипторы полей — единственное, что экран сообщает конвейеру о своей
//! сущности: как извлечь значение поля, участвует ли оно в поиске и какого
//! оно рода.

/// Род поля: определяет способ сравнения при сортировке
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Bool,
}

/// Значение поля, извлечённое из строки списка
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Отсутствующее значение: никогда не совпадает при поиске,
    /// при сортировке по возрастанию уходит в конец
    Missing,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// None → Missing
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(v) => FieldValue::Text(v.to_string()),
            None => FieldValue::Missing,
        }
    }

    pub fn number(value: f64) -> Self {
        FieldValue::Number(value)
    }

    /// Текстовое представление для substring-поиска.
    /// Bool и Missing в поиске не участвуют.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Bool(_) | FieldValue::Missing => None,
        }
    }
}

/// Описание одного поля сущности
pub struct FieldDescriptor<T: 'static> {
    /// Идентификатор поля (ключ сортировки и поиска по полю)
    pub id: &'static str,
    /// Подпись колонки в UI
    pub label: &'static str,
    pub kind: FieldKind,
    /// Участвует ли поле в поиске "по всем полям"
    pub searchable: bool,
    /// Извлечь значение из строки
    pub get: fn(&T) -> FieldValue,
}

/// Категориальный фильтр (страна, тип статуса и т.п.)
pub struct CategoricalFilter<T: 'static> {
    pub key: &'static str,
    pub label: &'static str,
    /// Значение категории у строки; сравнивается с выбранным точно
    pub get: fn(&T) -> String,
}

/// Статическая схема списка: поля + категориальные фильтры + политика удаления
pub struct ListSchema<T: 'static> {
    pub fields: &'static [FieldDescriptor<T>],
    pub categorical: &'static [CategoricalFilter<T>],
    /// Поле сортировки по умолчанию
    pub default_sort: &'static str,
    /// Право на удаление; None = удалять можно всё.
    /// Строки, не прошедшие предикат, исключаются из выбора.
    pub is_deletable: Option<fn(&T) -> bool>,
}

impl<T> ListSchema<T> {
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Поля, участвующие в поиске "по всем полям"
    pub fn search_fields(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Можно ли удалять строку
    pub fn deletable(&self, item: &T) -> bool {
        self.is_deletable.map(|p| p(item)).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        qty: Option<f64>,
    }

    static FIELDS: &[FieldDescriptor<Row>] = &[
        FieldDescriptor {
            id: "name",
            label: "Name",
            kind: FieldKind::Text,
            searchable: true,
            get: |r| FieldValue::text(&r.name),
        },
        FieldDescriptor {
            id: "qty",
            label: "Qty",
            kind: FieldKind::Number,
            searchable: false,
            get: |r| match r.qty {
                Some(q) => FieldValue::number(q),
                None => FieldValue::Missing,
            },
        },
    ];

    static SCHEMA: ListSchema<Row> = ListSchema {
        fields: FIELDS,
        categorical: &[],
        default_sort: "name",
        is_deletable: None,
    };

    #[test]
    fn field_lookup_by_id() {
        assert!(SCHEMA.field("qty").is_some());
        assert!(SCHEMA.field("missing").is_none());
    }

    #[test]
    fn search_fields_respect_flag() {
        let ids: Vec<&str> = SCHEMA.search_fields().map(|f| f.id).collect();
        assert_eq!(ids, vec!["name"]);
    }

    #[test]
    fn missing_value_has_no_search_text() {
        let row = Row {
            name: "x".into(),
            qty: None,
        };
        let qty = SCHEMA.field("qty").unwrap();
        assert_eq!((qty.get)(&row).search_text(), None);
    }
}
