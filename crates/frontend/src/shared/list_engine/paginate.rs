//! Пагинация: окно над отфильтрованной и отсортированной коллекцией.
//! Страницы нумеруются с 1; запрошенная страница всегда зажимается в
//! диапазон [1, total_pages], поэтому при данных пустая страница невозможна.

/// Результат пагинации
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// Фактическая страница после clamp (с 1)
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageView<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);
    let current_page = page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = items.get(start..end).unwrap_or(&[]).to_vec();

    PageView {
        items,
        current_page,
        total_pages,
        total_items,
    }
}

/// Страница, на которой окажется элемент с индексом `first_index` при
/// размере страницы `page_size`. Используется, чтобы при смене размера
/// страницы первый видимый элемент оставался на экране.
pub fn page_for_offset(first_index: usize, page_size: usize) -> usize {
    first_index / page_size.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn last_page_of_23_by_10_has_3_items() {
        let view = paginate(&items(23), 3, 10);
        assert_eq!(view.items, vec![20, 21, 22]);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.total_items, 23);
        assert_eq!(view.current_page, 3);
    }

    #[test]
    fn page_beyond_end_clamps_to_last() {
        let view = paginate(&items(23), 99, 10);
        assert_eq!(view.current_page, 3);
        assert_eq!(view.items.len(), 3);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let view = paginate(&items(5), 0, 10);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.items.len(), 5);
    }

    #[test]
    fn empty_collection_yields_single_empty_page() {
        let view = paginate(&items(0), 1, 10);
        assert_eq!(view.total_pages, 1);
        assert!(view.items.is_empty());
    }

    #[test]
    fn pages_concatenate_to_whole_collection() {
        let all = items(23);
        let mut seen = Vec::new();
        let total_pages = paginate(&all, 1, 10).total_pages;
        for page in 1..=total_pages {
            seen.extend(paginate(&all, page, 10).items);
        }
        assert_eq!(seen, all);
    }

    #[test]
    fn page_for_offset_keeps_first_visible_item() {
        // страница 3 при размере 10 → первый видимый индекс 20
        assert_eq!(page_for_offset(20, 25), 1);
        assert_eq!(page_for_offset(20, 10), 3);
        assert_eq!(page_for_offset(0, 50), 1);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let view = paginate(&items(3), 1, 0);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 1);
    }
}
