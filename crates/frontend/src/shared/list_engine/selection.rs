//! Массовый выбор строк. Выбор живёт поверх страниц: переключение страницы
//! или пересортировка его не сбрасывают. Инвариант: после `reconcile`
//! выбор — всегда подмножество id последней известной коллекции.

use std::collections::HashSet;

/// Состояние чекбокса заголовка для текущей страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    None,
    /// Часть страницы выбрана — indeterminate в UI
    Partial,
    All,
}

/// Модель выбора по строковым id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    selected: HashSet<String>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Копия множества выбранных id (для реактивных замыканий UI)
    pub fn to_set(&self) -> HashSet<String> {
        self.selected.clone()
    }

    /// Переключить членство id
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Добавить все id текущей страницы
    pub fn select_page(&mut self, page_ids: &[String]) {
        for id in page_ids {
            self.selected.insert(id.clone());
        }
    }

    /// Убрать все id текущей страницы
    pub fn deselect_page(&mut self, page_ids: &[String]) {
        for id in page_ids {
            self.selected.remove(id);
        }
    }

    /// Добавить каждый id, прошедший фильтр, — не только видимую страницу
    pub fn select_all_matching(&mut self, filtered_ids: &[String]) {
        for id in filtered_ids {
            self.selected.insert(id.clone());
        }
    }

    /// Инвертировать членство каждого id страницы
    pub fn invert_page(&mut self, page_ids: &[String]) {
        for id in page_ids {
            self.toggle(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Пересечь выбор с id новой коллекции. Вызывается при каждой замене
    /// коллекции, чтобы выбор не ссылался на удалённые записи.
    pub fn reconcile(&mut self, valid_ids: &HashSet<String>) {
        self.selected.retain(|id| valid_ids.contains(id));
    }

    /// Тристейт для чекбокса в заголовке таблицы.
    /// Пустая страница — всегда `None`.
    pub fn page_state(&self, page_ids: &[String]) -> PageSelection {
        if page_ids.is_empty() {
            return PageSelection::None;
        }
        let selected_on_page = page_ids.iter().filter(|id| self.is_selected(id)).count();
        if selected_on_page == 0 {
            PageSelection::None
        } else if selected_on_page == page_ids.len() {
            PageSelection::All
        } else {
            PageSelection::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = SelectionModel::new();
        sel.toggle("a");
        assert!(sel.is_selected("a"));
        sel.toggle("a");
        assert!(!sel.is_selected("a"));
    }

    #[test]
    fn select_page_then_page_is_fully_selected() {
        let mut sel = SelectionModel::new();
        let page = ids(&["1", "2", "3"]);
        sel.select_page(&page);
        assert_eq!(sel.page_state(&page), PageSelection::All);

        sel.deselect_page(&page);
        assert_eq!(sel.page_state(&page), PageSelection::None);
    }

    #[test]
    fn partial_page_state_for_mixed_selection() {
        let mut sel = SelectionModel::new();
        sel.toggle("1");
        let page = ids(&["1", "2"]);
        assert_eq!(sel.page_state(&page), PageSelection::Partial);
    }

    #[test]
    fn empty_page_is_never_fully_selected() {
        let sel = SelectionModel::new();
        assert_eq!(sel.page_state(&[]), PageSelection::None);
    }

    #[test]
    fn select_all_matching_spans_pages() {
        // фильтр дал 5 строк при размере страницы 10 — выбраны все 5
        let mut sel = SelectionModel::new();
        sel.select_all_matching(&ids(&["1", "2", "3", "4", "5"]));
        assert_eq!(sel.len(), 5);
    }

    #[test]
    fn selection_survives_page_change_and_reorder() {
        let mut sel = SelectionModel::new();
        sel.select_page(&ids(&["7", "8"]));
        // другая страница, другой порядок — выбор не трогаем
        assert!(sel.is_selected("7"));
        assert!(sel.is_selected("8"));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn invert_page_flips_each_id() {
        let mut sel = SelectionModel::new();
        sel.toggle("1");
        sel.invert_page(&ids(&["1", "2"]));
        assert!(!sel.is_selected("1"));
        assert!(sel.is_selected("2"));
    }

    #[test]
    fn reconcile_drops_stale_ids() {
        let mut sel = SelectionModel::new();
        sel.select_page(&ids(&["1", "2", "3"]));

        let valid: HashSet<String> = ids(&["2", "3", "9"]).into_iter().collect();
        sel.reconcile(&valid);

        assert_eq!(sel.len(), 2);
        for id in sel.ids() {
            assert!(valid.contains(&id));
        }
    }

    #[test]
    fn clear_empties_selection() {
        let mut sel = SelectionModel::new();
        sel.select_page(&ids(&["1", "2"]));
        sel.clear();
        assert!(sel.is_empty());
    }
}
