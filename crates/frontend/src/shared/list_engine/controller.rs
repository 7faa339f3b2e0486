//! Связка чистого конвейера с сигналами Leptos: один контроллер на экран.
//!
//! Контроллер владеет коллекцией, состоянием запроса (поиск, категории,
//! сортировка, страница) и выбором. Все мутации происходят на UI-потоке
//! после await сетевого ответа, поэтому блокировки не нужны — только
//! правильная последовательность: сначала замена коллекции, затем
//! `reconcile` выбора.

use super::fields::ListSchema;
use super::filter::{filter, SearchScope};
use super::paginate::{page_for_offset, paginate, PageView};
use super::selection::{PageSelection, SelectionModel};
use super::sort::sort;
use crate::shared::api_utils::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashMap, HashSet};
use std::future::Future;

const DEFAULT_PAGE_SIZE: usize = 25;

pub struct ListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub schema: &'static ListSchema<T>,
    get_id: fn(&T) -> String,

    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    /// Ошибка загрузки экрана; не путать с пустым результатом поиска
    pub error: RwSignal<Option<String>>,
    pub is_loaded: RwSignal<bool>,

    pub search_query: RwSignal<String>,
    pub search_scope: RwSignal<SearchScope>,
    pub categorical: RwSignal<HashMap<&'static str, String>>,
    pub sort_field: RwSignal<String>,
    pub sort_ascending: RwSignal<bool>,
    pub page: RwSignal<usize>,
    pub page_size: RwSignal<usize>,

    pub selection: RwSignal<SelectionModel>,

    /// Счётчик поколений загрузки: побеждает последний запрос,
    /// ответы устаревших поколений отбрасываются
    generation: RwSignal<u64>,
}

impl<T> Clone for ListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListController<T> where T: Clone + Send + Sync + 'static {}

impl<T> ListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(schema: &'static ListSchema<T>, get_id: fn(&T) -> String) -> Self {
        Self {
            schema,
            get_id,
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            is_loaded: RwSignal::new(false),
            search_query: RwSignal::new(String::new()),
            search_scope: RwSignal::new(SearchScope::All),
            categorical: RwSignal::new(HashMap::new()),
            sort_field: RwSignal::new(schema.default_sort.to_string()),
            sort_ascending: RwSignal::new(true),
            page: RwSignal::new(1),
            page_size: RwSignal::new(DEFAULT_PAGE_SIZE),
            selection: RwSignal::new(SelectionModel::new()),
            generation: RwSignal::new(0),
        }
    }

    pub fn id_of(&self, item: &T) -> String {
        (self.get_id)(item)
    }

    // ------------------------------------------------------------------
    // Производный конвейер (tracked: зовётся из реактивных замыканий)
    // ------------------------------------------------------------------

    /// Фильтр поверх полной коллекции
    pub fn filtered(&self) -> Vec<T> {
        let items = self.items.get();
        let query = self.search_query.get();
        let scope = self.search_scope.get();
        let categorical = self.categorical.get();
        filter(&items, self.schema, &query, &scope, &categorical)
    }

    /// Фильтр + сортировка
    pub fn sorted(&self) -> Vec<T> {
        let filtered = self.filtered();
        let field = self.sort_field.get();
        let ascending = self.sort_ascending.get();
        sort(&filtered, self.schema, &field, ascending)
    }

    /// Окно текущей страницы
    pub fn page_view(&self) -> PageView<T> {
        paginate(&self.sorted(), self.page.get(), self.page_size.get())
    }

    /// id строк текущей страницы, доступных для выбора
    pub fn visible_page_ids(&self) -> Vec<String> {
        self.eligible_ids(&self.page_view().items)
    }

    fn eligible_ids(&self, rows: &[T]) -> Vec<String> {
        rows.iter()
            .filter(|r| self.schema.deletable(r))
            .map(|r| self.id_of(r))
            .collect()
    }

    // ------------------------------------------------------------------
    // Загрузка
    // ------------------------------------------------------------------

    /// Запустить загрузку коллекции. Ответ применяется только если за время
    /// запроса не стартовала более новая загрузка (last-fetch-wins);
    /// после замены коллекции выбор сразу же реконсилируется.
    pub fn load<Fut>(self, fut: Fut)
    where
        Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
    {
        let generation = self.generation.get_untracked() + 1;
        self.generation.set(generation);
        self.loading.set(true);

        spawn_local(async move {
            let result = fut.await;
            if self.generation.get_untracked() != generation {
                // Пришёл ответ устаревшего поколения
                return;
            }
            match result {
                Ok(data) => {
                    leptos::logging::log!("Loaded {} rows", data.len());
                    let valid: HashSet<String> =
                        data.iter().map(|item| self.id_of(item)).collect();
                    self.items.set(data);
                    self.selection.update(|sel| sel.reconcile(&valid));
                    self.error.set(None);
                    self.is_loaded.set(true);
                    self.clamp_page();
                }
                Err(e) => {
                    leptos::logging::log!("Load failed: {}", e);
                    self.error.set(Some(e.to_string()));
                }
            }
            self.loading.set(false);
        });
    }

    // ------------------------------------------------------------------
    // Состояние запроса
    // ------------------------------------------------------------------

    pub fn set_search_query(&self, query: String) {
        self.search_query.set(query);
        self.page.set(1);
    }

    pub fn set_search_scope(&self, scope: SearchScope) {
        self.search_scope.set(scope);
        self.page.set(1);
    }

    pub fn set_categorical(&self, key: &'static str, value: String) {
        self.categorical.update(|map| {
            map.insert(key, value);
        });
        self.page.set(1);
    }

    /// Повторный клик по колонке переворачивает направление,
    /// новая колонка начинает с возрастания
    pub fn toggle_sort(&self, field: &str) {
        if self.sort_field.get_untracked() == field {
            self.sort_ascending.update(|v| *v = !*v);
        } else {
            self.sort_field.set(field.to_string());
            self.sort_ascending.set(true);
        }
    }

    pub fn go_to_page(&self, page: usize) {
        self.page.set(page.max(1));
    }

    /// Смена размера страницы держит первый видимый элемент на экране
    pub fn set_page_size(&self, new_size: usize) {
        let old_size = self.page_size.get_untracked().max(1);
        let first_index = (self.page.get_untracked().max(1) - 1) * old_size;
        self.page_size.set(new_size.max(1));
        self.page.set(page_for_offset(first_index, new_size));
    }

    fn clamp_page(&self) {
        let total = self.filtered_count_untracked();
        let size = self.page_size.get_untracked().max(1);
        let total_pages = ((total + size - 1) / size).max(1);
        self.page.update(|p| *p = (*p).clamp(1, total_pages));
    }

    fn filtered_count_untracked(&self) -> usize {
        let items = self.items.get_untracked();
        let query = self.search_query.get_untracked();
        let scope = self.search_scope.get_untracked();
        let categorical = self.categorical.get_untracked();
        filter(&items, self.schema, &query, &scope, &categorical).len()
    }

    // ------------------------------------------------------------------
    // Выбор
    // ------------------------------------------------------------------

    /// Переключить строку. Для строки, не проходящей политику удаления,
    /// операция — no-op.
    pub fn toggle_row(&self, id: &str) {
        let eligible = self
            .items
            .with_untracked(|items| {
                items
                    .iter()
                    .find(|item| self.id_of(item) == id)
                    .map(|item| self.schema.deletable(item))
            })
            .unwrap_or(false);
        if !eligible {
            return;
        }
        self.selection.update(|sel| sel.toggle(id));
    }

    pub fn select_visible_page(&self) {
        let ids = self.untracked_page_ids();
        self.selection.update(|sel| sel.select_page(&ids));
    }

    pub fn deselect_visible_page(&self) {
        let ids = self.untracked_page_ids();
        self.selection.update(|sel| sel.deselect_page(&ids));
    }

    /// Выбрать каждую подходящую строку текущего фильтра — все страницы
    pub fn select_all_matching(&self) {
        let rows = self.untracked_filtered();
        let ids = self.eligible_ids(&rows);
        self.selection.update(|sel| sel.select_all_matching(&ids));
    }

    pub fn invert_visible_page(&self) {
        let ids = self.untracked_page_ids();
        self.selection.update(|sel| sel.invert_page(&ids));
    }

    pub fn clear_selection(&self) {
        self.selection.update(|sel| sel.clear());
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.get_untracked().ids()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.get().len()
    }

    /// Тристейт чекбокса заголовка для текущей страницы
    pub fn page_selection_state(&self) -> PageSelection {
        let ids = self.eligible_ids(&self.page_view().items);
        self.selection.get().page_state(&ids)
    }

    fn untracked_page_ids(&self) -> Vec<String> {
        let rows = self.untracked_filtered();
        let field = self.sort_field.get_untracked();
        let ascending = self.sort_ascending.get_untracked();
        let sorted = sort(&rows, self.schema, &field, ascending);
        let view = paginate(
            &sorted,
            self.page.get_untracked(),
            self.page_size.get_untracked(),
        );
        self.eligible_ids(&view.items)
    }

    fn untracked_filtered(&self) -> Vec<T> {
        let items = self.items.get_untracked();
        let query = self.search_query.get_untracked();
        let scope = self.search_scope.get_untracked();
        let categorical = self.categorical.get_untracked();
        filter(&items, self.schema, &query, &scope, &categorical)
    }
}
