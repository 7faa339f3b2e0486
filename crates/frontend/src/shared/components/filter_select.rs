use crate::shared::list_engine::ANY;
use leptos::prelude::*;

/// FilterSelect - выпадающий список категориального фильтра.
///
/// Пустое значение - сентинел "все", фильтр по ключу не применяется.
#[component]
pub fn FilterSelect(
    /// Подпись фильтра
    label: &'static str,

    /// Варианты значений (без пункта "все" - он добавляется сам)
    #[prop(into)]
    options: Signal<Vec<String>>,

    /// Текущее значение (ANY = не фильтровать)
    #[prop(into)]
    value: Signal<String>,

    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="filter-select">
            <label class="filter-select__label">{label}</label>
            <select
                class="filter-select__control"
                on:change=move |ev| on_change.run(event_target_value(&ev))
                prop:value=move || value.get()
            >
                <option value=ANY>"Все"</option>
                {move || options.get().into_iter().map(|opt| {
                    let selected = value.get() == opt;
                    view! {
                        <option value=opt.clone() selected=selected>{opt.clone()}</option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
