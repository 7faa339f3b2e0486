//! Фильтрация: case-insensitive substring по полям схемы плюс
//! категориальные условия (AND) поверх текстового совпадения.

use super::fields::ListSchema;
use std::collections::HashMap;

/// Сентинель "любое значение" для категориальных фильтров
pub const ANY: &str = "";

/// Область текстового поиска
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// По всем полям с флагом searchable (логическое ИЛИ)
    All,
    /// Только по одному полю
    Field(String),
}

/// Чистая функция фильтрации. Пустой (после trim) запрос пропускает вход
/// без изменений, сохраняя порядок. Неизвестный id поля даёт пустой
/// результат, а не панику.
pub fn filter<T: Clone>(
    items: &[T],
    schema: &ListSchema<T>,
    query: &str,
    scope: &SearchScope,
    categorical: &HashMap<&'static str, String>,
) -> Vec<T> {
    let query = query.trim().to_lowercase();

    let text_pass: Vec<T> = if query.is_empty() {
        items.to_vec()
    } else {
        match scope {
            SearchScope::All => items
                .iter()
                .filter(|item| {
                    schema
                        .search_fields()
                        .any(|f| value_contains((f.get)(item).search_text(), &query))
                })
                .cloned()
                .collect(),
            SearchScope::Field(id) => match schema.field(id) {
                Some(f) => items
                    .iter()
                    .filter(|item| value_contains((f.get)(item).search_text(), &query))
                    .cloned()
                    .collect(),
                // Поле не из схемы: деградируем в "ничего не найдено"
                None => Vec::new(),
            },
        }
    };

    if schema.categorical.is_empty() || categorical.is_empty() {
        return text_pass;
    }

    text_pass
        .into_iter()
        .filter(|item| {
            schema.categorical.iter().all(|cf| {
                match categorical.get(cf.key) {
                    Some(selected) if selected != ANY => (cf.get)(item) == *selected,
                    _ => true,
                }
            })
        })
        .collect()
}

fn value_contains(value: Option<String>, query_lower: &str) -> bool {
    match value {
        Some(v) => v.to_lowercase().contains(query_lower),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_engine::fields::{
        CategoricalFilter, FieldDescriptor, FieldKind, FieldValue,
    };

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: String,
        country: String,
        qty: Option<f64>,
    }

    fn row(name: &str, country: &str, qty: Option<f64>) -> Row {
        Row {
            name: name.into(),
            country: country.into(),
            qty,
        }
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
            searchable: true,
            get: |r| match r.qty {
                Some(q) => FieldValue::number(q),
                None => FieldValue::Missing,
            },
        },
    ];

    static CATEGORICAL: &[CategoricalFilter<Row>] = &[CategoricalFilter {
        key: "country",
        label: "Country",
        get: |r| r.country.clone(),
    }];

    static SCHEMA: ListSchema<Row> = ListSchema {
        fields: FIELDS,
        categorical: CATEGORICAL,
        default_sort: "name",
        is_deletable: None,
    };

    #[test]
    fn empty_query_passes_through_preserving_order() {
        let items = vec![row("b", "RU", None), row("a", "KZ", None)];
        let out = filter(&items, &SCHEMA, "   ", &SearchScope::All, &HashMap::new());
        assert_eq!(out, items);
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let items = vec![row("Blueberry", "RU", None), row("Red", "RU", None)];
        let out = filter(&items, &SCHEMA, "blue", &SearchScope::All, &HashMap::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Blueberry");
    }

    #[test]
    fn field_scope_tests_only_named_field() {
        let items = vec![row("42", "RU", None), row("x", "RU", Some(42.0))];
        let scope = SearchScope::Field("qty".into());
        let out = filter(&items, &SCHEMA, "42", &scope, &HashMap::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "x");
    }

    #[test]
    fn unknown_field_degrades_to_no_match() {
        let items = vec![row("a", "RU", None)];
        let scope = SearchScope::Field("nope".into());
        let out = filter(&items, &SCHEMA, "a", &scope, &HashMap::new());
        assert!(out.is_empty());
    }

    #[test]
    fn missing_values_never_match() {
        let items = vec![row("x", "RU", None)];
        let scope = SearchScope::Field("qty".into());
        let out = filter(&items, &SCHEMA, "0", &scope, &HashMap::new());
        assert!(out.is_empty());
    }

    #[test]
    fn categorical_applies_after_text_as_and() {
        let items = vec![
            row("Alpha", "RU", None),
            row("Alpha", "KZ", None),
            row("Beta", "RU", None),
        ];
        let mut cat = HashMap::new();
        cat.insert("country", "RU".to_string());
        let out = filter(&items, &SCHEMA, "alpha", &SearchScope::All, &cat);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country, "RU");
    }

    #[test]
    fn any_sentinel_disables_categorical() {
        let items = vec![row("a", "RU", None), row("b", "KZ", None)];
        let mut cat = HashMap::new();
        cat.insert("country", ANY.to_string());
        let out = filter(&items, &SCHEMA, "", &SearchScope::All, &cat);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn filter_is_idempotent() {
        let items = vec![
            row("Blueberry", "RU", None),
            row("blue sky", "KZ", None),
            row("Red", "RU", None),
        ];
        let once = filter(&items, &SCHEMA, "blue", &SearchScope::All, &HashMap::new());
        let twice = filter(&once, &SCHEMA, "blue", &SearchScope::All, &HashMap::new());
        assert_eq!(once, twice);
    }
}
