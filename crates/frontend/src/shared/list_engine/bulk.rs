//! Массовое удаление: все запросы уходят одновременно, итог собирается
//! settle-all-джойном — отказ одного запроса не отменяет остальные.

use crate::shared::api_utils::ApiError;
use std::future::Future;

/// Итог массовой операции с разбивкой по записям
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ApiError)>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_complete_failure(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Сводка для уведомления: при частичном отказе — счётчики,
    /// а не один общий pass/fail.
    pub fn summary(&self) -> String {
        if self.is_complete_success() {
            format!("Удалено записей: {}", self.succeeded.len())
        } else if self.is_complete_failure() {
            format!("Не удалось удалить ни одной записи из {}", self.total())
        } else {
            format!(
                "Удалено {} из {}, с ошибкой: {}",
                self.succeeded.len(),
                self.total(),
                self.failed.len()
            )
        }
    }
}

/// Запустить `delete_one` для каждого id параллельно и дождаться всех.
/// Порядок в итоге соответствует порядку входных id.
pub async fn bulk_delete<F, Fut>(ids: Vec<String>, delete_one: F) -> BulkOutcome
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let tasks = ids.into_iter().map(|id| {
        let fut = delete_one(id.clone());
        async move { (id, fut.await) }
    });

    let results = futures::future::join_all(tasks).await;

    let mut outcome = BulkOutcome {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };
    for (id, result) in results {
        match result {
            Ok(()) => outcome.succeeded.push(id),
            Err(e) => outcome.failed.push((id, e)),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_engine::selection::SelectionModel;
    use futures::executor::block_on;
    use std::collections::HashSet;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partial_failure_keeps_siblings() {
        let outcome = block_on(bulk_delete(ids(&["1", "2", "3"]), |id| async move {
            if id == "3" {
                Err(ApiError::Conflict("есть зависимые документы".into()))
            } else {
                Ok(())
            }
        }));

        assert_eq!(outcome.succeeded, ids(&["1", "2"]));
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "3");
        assert!(outcome.failed[0].1.is_conflict());
        assert_eq!(outcome.summary(), "Удалено 2 из 3, с ошибкой: 1");
    }

    #[test]
    fn failed_row_is_not_selected_after_bulk_flow() {
        // Последовательность экрана: bulk_delete → сброс выбора → refetch.
        // Строка с отказом остаётся в коллекции, но отмеченной быть не должна.
        let outcome = block_on(bulk_delete(ids(&["1", "2", "3"]), |id| async move {
            if id == "3" {
                Err(ApiError::Conflict("есть зависимые документы".into()))
            } else {
                Ok(())
            }
        }));
        assert_eq!(outcome.failed[0].0, "3");

        let mut selection = SelectionModel::new();
        selection.select_all_matching(&ids(&["1", "2", "3"]));
        selection.clear();
        let survivors: HashSet<String> = ids(&["3"]).into_iter().collect();
        selection.reconcile(&survivors);

        assert!(!selection.is_selected("3"));
        assert!(selection.is_empty());
    }

    #[test]
    fn complete_success_summary() {
        let outcome = block_on(bulk_delete(ids(&["a", "b"]), |_| async { Ok(()) }));
        assert!(outcome.is_complete_success());
        assert_eq!(outcome.summary(), "Удалено записей: 2");
    }

    #[test]
    fn complete_failure_summary() {
        let outcome = block_on(bulk_delete(ids(&["a"]), |_| async {
            Err(ApiError::Http(500))
        }));
        assert!(outcome.is_complete_failure());
        assert_eq!(outcome.summary(), "Не удалось удалить ни одной записи из 1");
    }

    #[test]
    fn empty_input_is_a_noop() {
        let outcome = block_on(bulk_delete(Vec::new(), |_| async { Ok(()) }));
        assert_eq!(outcome.total(), 0);
        assert!(outcome.is_complete_success());
        assert!(!outcome.is_complete_failure());
    }
}
