//! Чекбокс в ячейке таблицы для выбора отдельной строки

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// Чекбокс строки.
///
/// - Отображает состояние по множеству выбранных id
/// - Останавливает propagation клика, чтобы не срабатывал клик по строке
/// - Строка, не проходящая политику удаления, получает `disabled`
#[component]
pub fn TableCellCheckbox(
    /// id текущей строки
    #[prop(into)]
    item_id: String,

    /// Выбранные id
    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// Доступна ли строка для выбора
    #[prop(optional, default = true)]
    enabled: bool,

    /// Callback при переключении
    on_toggle: Callback<String>,
) -> impl IntoView {
    let item_id_for_checked = item_id.clone();
    let item_id_for_change = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                disabled=!enabled
                prop:checked=move || selected.get().contains(&item_id_for_checked)
                on:change=move |_| {
                    // чекбокс управляется состоянием, событие только сигнализирует
                    on_toggle.run(item_id_for_change.clone());
                }
            />
        </TableCell>
    }
}
