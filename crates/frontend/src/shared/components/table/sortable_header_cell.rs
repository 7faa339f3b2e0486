//! Сортируемая ячейка заголовка таблицы
//!
//! ```text
//! <SortableHeaderCell
//!     label="Код"
//!     sort_field="code"
//!     current_sort_field=Signal::derive(move || ctrl.sort_field.get())
//!     sort_ascending=Signal::derive(move || ctrl.sort_ascending.get())
//!     on_sort=Callback::new(move |field: String| ctrl.toggle_sort(&field))
//! />
//! ```

use super::{sort_indicator, sort_indicator_class};
use leptos::prelude::*;
use thaw::*;

/// Заголовок колонки с индикатором сортировки (▲▼⇅).
/// Клик по заголовку передаёт id поля наружу, направление решает контроллер.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// id поля сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки
    #[prop(into)]
    sort_ascending: Signal<bool>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field.clone();

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_field_for_click.clone())
            >
                {label}
                <span class=move || {
                    sort_indicator_class(&current_sort_field.get(), &sort_field_for_class)
                }>
                    {move || {
                        sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
