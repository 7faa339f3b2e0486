//! Статусы документов: список с фильтром по типу статуса

use contracts::domain::a007_status::aggregate::{Status, StatusDto, StatusType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a007_status::api;
use crate::shared::components::{
    FilterPanel, FilterSelect, PaginationControls, SearchInput, SortableHeaderCell,
    TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::icons::icon;
use crate::shared::list_engine::{
    bulk_delete, CategoricalFilter, FieldDescriptor, FieldKind, FieldValue, ListController,
    ListSchema, SearchScope, ANY,
};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

static FIELDS: &[FieldDescriptor<Status>] = &[
    FieldDescriptor {
        id: "code",
        label: "Код",
        kind: FieldKind::Text,
        searchable: true,
        get: |s| FieldValue::text(&s.base.code),
    },
    FieldDescriptor {
        id: "description",
        label: "Название",
        kind: FieldKind::Text,
        searchable: true,
        get: |s| FieldValue::text(&s.base.description),
    },
    FieldDescriptor {
        id: "status_type",
        label: "Тип",
        kind: FieldKind::Text,
        searchable: false,
        get: |s| FieldValue::text(s.status_type.label()),
    },
    FieldDescriptor {
        id: "color",
        label: "Цвет",
        kind: FieldKind::Text,
        searchable: false,
        get: |s| FieldValue::text(&s.color),
    },
];

static CATEGORICAL: &[CategoricalFilter<Status>] = &[CategoricalFilter {
    key: "status_type",
    label: "Тип статуса",
    get: |s| s.status_type.label().to_string(),
}];

static SCHEMA: ListSchema<Status> = ListSchema {
    fields: FIELDS,
    categorical: CATEGORICAL,
    default_sort: "code",
    is_deletable: None,
};

#[component]
pub fn StatusesList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |s: &Status| s.to_string_id());
    let notifications = use_notifications();

    let show_create_form = RwSignal::new(false);
    let editing: RwSignal<Option<Status>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(true);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_statuses());

    Effect::new(move |_| {
        if !ctrl.is_loaded.get_untracked() {
            load_data();
        }
    });

    // Фиксированный набор типов, не зависит от данных
    let type_options = Signal::derive(move || {
        vec![
            StatusType::Initial.label().to_string(),
            StatusType::Intermediate.label().to_string(),
            StatusType::Final.label().to_string(),
        ]
    });
    let type_value = Signal::derive(move || {
        ctrl.categorical
            .get()
            .get("status_type")
            .cloned()
            .unwrap_or_else(|| ANY.to_string())
    });

    let selected_signal = Signal::derive(move || ctrl.selection.get().to_set());
    let sort_field_signal = Signal::derive(move || ctrl.sort_field.get());
    let sort_asc_signal = Signal::derive(move || ctrl.sort_ascending.get());
    let on_sort = Callback::new(move |field: String| ctrl.toggle_sort(&field));

    let delete_selected = move || {
        let ids = ctrl.selected_ids();
        if ids.is_empty() || deleting.get_untracked() {
            return;
        }
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Удалить выбранные статусы ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = bulk_delete(ids, |id| async move { api::delete_status(&id).await }).await;
            if outcome.is_complete_success() {
                notifications.success(outcome.summary());
            } else if outcome.is_complete_failure() {
                notifications.error(outcome.summary());
            } else {
                notifications.warning(outcome.summary());
            }
            deleting.set(false);
            ctrl.clear_selection();
            load_data();
        });
    };

    view! {
        <PageFrame page_id="a007_status--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Статусы документов"</h1>
                    <Badge>
                        {move || ctrl.filtered().len().to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_create_form.set(true)
                    >
                        {icon("plus")}
                        " Новый"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || ctrl.loading.get())
                    >
                        {icon("refresh")}
                        {move || if ctrl.loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || ctrl.error.get().map(|e| view! {
                    <div class="alert alert--error">{format!("Не удалось загрузить статусы: {}", e)}</div>
                })}

                <FilterPanel
                    is_expanded=filter_expanded
                    active_filters_count=Signal::derive(move || {
                        let search_active = usize::from(!ctrl.search_query.get().trim().is_empty());
                        let type_active = usize::from(type_value.get() != ANY);
                        search_active + type_active
                    })
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || ctrl.page_view().current_page)
                            total_pages=Signal::derive(move || ctrl.page_view().total_pages)
                            total_count=Signal::derive(move || ctrl.page_view().total_items)
                            page_size=Signal::derive(move || ctrl.page_size.get())
                            on_page_change=Callback::new(move |p| ctrl.go_to_page(p))
                            on_page_size_change=Callback::new(move |s| ctrl.set_page_size(s))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <SearchInput
                                query=Signal::derive(move || ctrl.search_query.get())
                                scope=Signal::derive(move || ctrl.search_scope.get())
                                fields=vec![
                                    ("code", "Код"),
                                    ("description", "Название"),
                                ]
                                on_query=Callback::new(move |q| ctrl.set_search_query(q))
                                on_scope=Callback::new(move |s: SearchScope| ctrl.set_search_scope(s))
                            />
                            <FilterSelect
                                label="Тип статуса"
                                options=type_options
                                value=type_value
                                on_change=Callback::new(move |v: String| ctrl.set_categorical("status_type", v))
                            />
                        </Flex>
                    }
                />

                {move || {
                    let count = ctrl.selected_count();
                    if count > 0 {
                        view! {
                            <div class="bulk-toolbar">
                                <span class="bulk-toolbar__count">
                                    {format!("Выбрано: {}", count)}
                                </span>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| ctrl.select_all_matching()
                                >
                                    "Выбрать все найденные"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| ctrl.clear_selection()
                                >
                                    "Снять выбор"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| delete_selected()
                                    disabled=Signal::derive(move || deleting.get())
                                >
                                    {icon("delete")}
                                    {move || if deleting.get() { " Удаление...".to_string() } else { format!(" Удалить ({})", ctrl.selected_count()) }}
                                </Button>
                            </div>
                        }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}

                <div class="table-wrapper">
                    <Table attr:id="a007-statuses-table" attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || ctrl.page_selection_state())
                                    on_change=Callback::new(move |check_all: bool| {
                                        if check_all {
                                            ctrl.select_visible_page();
                                        } else {
                                            ctrl.deselect_visible_page();
                                        }
                                    })
                                />
                                <SortableHeaderCell
                                    label="Код"
                                    sort_field="code"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Название"
                                    sort_field="description"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Тип"
                                    sort_field="status_type"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <TableHeaderCell>"Цвет"</TableHeaderCell>
                                <TableHeaderCell></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || ctrl.page_view().items
                                key=|s| s.to_string_id()
                                children=move |status| {
                                    let id = status.to_string_id();
                                    let status_for_edit = status.clone();
                                    let swatch_style = format!(
                                        "display:inline-block;width:14px;height:14px;border-radius:3px;background:{};",
                                        status.color
                                    );
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                selected=selected_signal
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{status.base.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {status.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {match status.status_type {
                                                        StatusType::Initial => view! { <span class="badge badge--neutral">"Начальный"</span> }.into_any(),
                                                        StatusType::Intermediate => view! { <span class="badge badge--primary">"Промежуточный"</span> }.into_any(),
                                                        StatusType::Final => view! { <span class="badge badge--success">"Конечный"</span> }.into_any(),
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style=swatch_style></span>
                                                    <span class="status-color-hex">{status.color.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(status_for_edit.clone()))
                                                    attr:title="Редактировать"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || if show_create_form.get() {
                    view! {
                        <StatusForm
                            existing=None
                            on_close=move || show_create_form.set(false)
                            on_saved=move || {
                                show_create_form.set(false);
                                load_data();
                            }
                        />
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }}

                {move || editing.get().map(|status| view! {
                    <StatusForm
                        existing=Some(status)
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}

/// Цвет проверяется в формате #rrggbb, как на стороне contracts
fn is_valid_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[component]
fn StatusForm<F1, F2>(
    existing: Option<Status>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let editing_id = existing.as_ref().map(|s| s.to_string_id());
    let title = match &existing {
        Some(s) => format!("Редактирование: {}", s.base.description),
        None => "Новый статус".to_string(),
    };

    let code = RwSignal::new(existing.as_ref().map(|s| s.base.code.clone()).unwrap_or_default());
    let description =
        RwSignal::new(existing.as_ref().map(|s| s.base.description.clone()).unwrap_or_default());
    let status_type = RwSignal::new(
        existing.as_ref().map(|s| s.status_type).unwrap_or(StatusType::Intermediate),
    );
    let color = RwSignal::new(
        existing.as_ref().map(|s| s.color.clone()).unwrap_or_else(|| "#9e9e9e".to_string()),
    );

    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        if description.get().trim().is_empty() {
            set_error.set(Some("Название не может быть пустым".into()));
            return;
        }
        if !is_valid_color(&color.get()) {
            set_error.set(Some("Цвет: ожидается формат #rrggbb".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = StatusDto {
            id: editing_id.clone(),
            code: Some(code.get()),
            description: description.get(),
            status_type: status_type.get(),
            color: color.get(),
            comment: None,
        };

        let id_for_update = editing_id.clone();
        spawn_local(async move {
            let result = match &id_for_update {
                Some(id) => api::update_status(id, dto).await,
                None => api::create_status(dto).await,
            };
            match result {
                Ok(()) => on_saved(),
                Err(e) => {
                    set_error.set(Some(format!("Ошибка сохранения: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_close()
                    >
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Код"</Label>
                        <Input value=code placeholder="ST-001" disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Название"</Label>
                        <Input value=description disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Тип статуса"</Label>
                        <select
                            class="form__select"
                            on:change=move |ev| {
                                if let Some(t) = StatusType::parse(&event_target_value(&ev)) {
                                    status_type.set(t);
                                }
                            }
                            prop:value=move || status_type.get().as_str().to_string()
                        >
                            {[StatusType::Initial, StatusType::Intermediate, StatusType::Final]
                                .into_iter()
                                .map(|t| {
                                    view! {
                                        <option
                                            value=t.as_str()
                                            selected=move || status_type.get() == t
                                        >
                                            {t.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form__group">
                        <Label>"Цвет"</Label>
                        <input
                            type="color"
                            prop:value=move || color.get()
                            on:input=move |ev| color.set(event_target_value(&ev))
                        />
                        <Input value=color placeholder="#9e9e9e" disabled=Signal::derive(move || saving.get()) />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_format_check() {
        assert!(is_valid_color("#9e9e9e"));
        assert!(is_valid_color("#FFAA00"));
        assert!(!is_valid_color("9e9e9e"));
        assert!(!is_valid_color("#9e9e9"));
        assert!(!is_valid_color("#9e9e9g"));
    }
}
