use crate::shared::list_engine::SearchScope;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEBOUNCE_MS: u32 = 300;

/// SearchInput - строка поиска с дебаунсом и выбором области поиска.
///
/// Ввод применяется через 300 мс после последнего нажатия; устаревшие
/// таймеры отбрасываются по счётчику поколений. Кнопка очистки применяет
/// пустой запрос немедленно.
#[component]
pub fn SearchInput(
    /// Применённый запрос (для подсветки активного поиска и очистки)
    #[prop(into)]
    query: Signal<String>,

    /// Текущая область поиска
    #[prop(into)]
    scope: Signal<SearchScope>,

    /// Поля, доступные для поиска: (id, подпись)
    fields: Vec<(&'static str, &'static str)>,

    on_query: Callback<String>,
    on_scope: Callback<SearchScope>,
) -> impl IntoView {
    let draft = RwSignal::new(query.get_untracked());
    let debounce_generation = StoredValue::new(0u64);

    let schedule = move |value: String| {
        let generation = debounce_generation.get_value() + 1;
        debounce_generation.set_value(generation);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DEBOUNCE_MS).await;
            if debounce_generation.get_value() == generation {
                on_query.run(value);
            }
        });
    };

    let clear = move |_| {
        debounce_generation.update_value(|g| *g += 1);
        draft.set(String::new());
        on_query.run(String::new());
    };

    view! {
        <div class="search-input">
            <select
                class="search-input__scope"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    let new_scope = if value.is_empty() {
                        SearchScope::All
                    } else {
                        SearchScope::Field(value)
                    };
                    on_scope.run(new_scope);
                }
                prop:value=move || match scope.get() {
                    SearchScope::All => String::new(),
                    SearchScope::Field(id) => id,
                }
            >
                <option value="">"Все поля"</option>
                {fields.into_iter().map(|(id, label)| {
                    view! { <option value=id>{label}</option> }
                }).collect_view()}
            </select>
            <input
                type="text"
                class=move || {
                    if query.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder="Поиск..."
                prop:value=move || draft.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.set(value.clone());
                    schedule(value);
                }
            />
            <Show when=move || !query.get().trim().is_empty()>
                <button class="search-input__clear" title="Очистить" on:click=clear>
                    "×"
                </button>
            </Show>
        </div>
    }
}
