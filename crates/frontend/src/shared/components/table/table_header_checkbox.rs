//! Чекбокс в заголовке таблицы: выбрать/снять все строки текущей страницы
//!
//! ```text
//! <TableHeaderCheckbox
//!     state=Signal::derive(move || ctrl.page_selection_state())
//!     on_change=Callback::new(move |check_all: bool| {
//!         if check_all { ctrl.select_visible_page() } else { ctrl.deselect_visible_page() }
//!     })
//! />
//! ```

use crate::shared::list_engine::PageSelection;
use leptos::prelude::event_target_checked;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

/// Тристейт-чекбокс заголовка.
///
/// `indeterminate` не выражается атрибутом, только свойством DOM-элемента,
/// поэтому состояние выставляется эффектом через web_sys.
#[component]
pub fn TableHeaderCheckbox(
    /// Состояние выбора текущей страницы
    #[prop(into)]
    state: Signal<PageSelection>,

    /// Callback при клике (true = выбрать страницу, false = снять страницу)
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let current = state.get();
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(current == PageSelection::Partial);
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == PageSelection::All
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}
