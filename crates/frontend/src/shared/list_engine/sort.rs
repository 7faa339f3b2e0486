//! Сортировка: стабильная, по полю из схемы. Текст сравнивается без учёта
//! регистра (Unicode lowercase), числа — численно, bool: false < true.
//! Missing при возрастании уходит в конец (при убывании — в начало).

use super::fields::{FieldValue, ListSchema};
use std::cmp::Ordering;

/// Возвращает новый отсортированный вектор; вход не мутируется.
/// Неизвестное поле сортировки оставляет порядок как есть.
pub fn sort<T: Clone>(
    items: &[T],
    schema: &ListSchema<T>,
    field_id: &str,
    ascending: bool,
) -> Vec<T> {
    let mut result: Vec<T> = items.to_vec();
    let Some(field) = schema.field(field_id) else {
        return result;
    };

    // Vec::sort_by стабильна: равные ключи сохраняют исходный порядок
    result.sort_by(|a, b| {
        let cmp = compare_values(&(field.get)(a), &(field.get)(b));
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
    result
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Greater,
        (_, FieldValue::Missing) => Ordering::Less,
        // Разнотипные значения одного поля — дефект схемы, не падаем
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_engine::fields::{FieldDescriptor, FieldKind};

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        username: String,
        score: Option<f64>,
        tag: u32,
    }

    fn row(username: &str, score: Option<f64>, tag: u32) -> Row {
        Row {
            username: username.into(),
            score,
            tag,
        }
    }

    static FIELDS: &[FieldDescriptor<Row>] = &[
        FieldDescriptor {
            id: "username",
            label: "Username",
            kind: FieldKind::Text,
            searchable: true,
            get: |r| FieldValue::text(&r.username),
        },
        FieldDescriptor {
            id: "score",
            label: "Score",
            kind: FieldKind::Number,
            searchable: false,
            get: |r| match r.score {
                Some(s) => FieldValue::number(s),
                None => FieldValue::Missing,
            },
        },
    ];

    static SCHEMA: ListSchema<Row> = ListSchema {
        fields: FIELDS,
        categorical: &[],
        default_sort: "username",
        is_deletable: None,
    };

    #[test]
    fn text_sort_is_case_insensitive() {
        let items = vec![row("bob", None, 0), row("Alice", None, 0), row("charlie", None, 0)];
        let out = sort(&items, &SCHEMA, "username", true);
        let names: Vec<&str> = out.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "charlie"]);
    }

    #[test]
    fn direction_flips_order() {
        let items = vec![row("a", None, 0), row("b", None, 0)];
        let out = sort(&items, &SCHEMA, "username", false);
        assert_eq!(out[0].username, "b");
    }

    #[test]
    fn ties_preserve_input_order() {
        let items = vec![row("same", None, 1), row("same", None, 2), row("same", None, 3)];
        let out = sort(&items, &SCHEMA, "username", true);
        let tags: Vec<u32> = out.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![1, 2, 3]);

        let out_desc = sort(&items, &SCHEMA, "username", false);
        let tags_desc: Vec<u32> = out_desc.iter().map(|r| r.tag).collect();
        assert_eq!(tags_desc, vec![1, 2, 3]);
    }

    #[test]
    fn missing_numbers_sort_last_ascending() {
        let items = vec![row("a", None, 0), row("b", Some(2.0), 0), row("c", Some(1.0), 0)];
        let out = sort(&items, &SCHEMA, "score", true);
        let names: Vec<&str> = out.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn unknown_field_keeps_order() {
        let items = vec![row("b", None, 0), row("a", None, 0)];
        let out = sort(&items, &SCHEMA, "nope", true);
        assert_eq!(out, items);
    }

    #[test]
    fn input_is_not_mutated() {
        let items = vec![row("b", None, 0), row("a", None, 0)];
        let _ = sort(&items, &SCHEMA, "username", true);
        assert_eq!(items[0].username, "b");
    }
}
