//! Маршруты согласования: список с фильтром по виду документа

use contracts::domain::a004_circuit::aggregate::Circuit;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_circuit::api;
use crate::domain::a004_circuit::ui::wizard::CircuitWizard;
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

static FIELDS: &[FieldDescriptor<Circuit>] = &[
    FieldDescriptor {
        id: "code",
        label: "Код",
        kind: FieldKind::Text,
        searchable: true,
        get: |c| FieldValue::text(&c.base.code),
    },
    FieldDescriptor {
        id: "description",
        label: "Название",
        kind: FieldKind::Text,
        searchable: true,
        get: |c| FieldValue::text(&c.base.description),
    },
    FieldDescriptor {
        id: "document_type_name",
        label: "Вид документа",
        kind: FieldKind::Text,
        searchable: true,
        get: |c| FieldValue::text(&c.document_type_name),
    },
    FieldDescriptor {
        id: "stages_count",
        label: "Этапов",
        kind: FieldKind::Number,
        searchable: false,
        get: |c| FieldValue::number(c.stages_count() as f64),
    },
    FieldDescriptor {
        id: "is_active",
        label: "Активен",
        kind: FieldKind::Bool,
        searchable: false,
        get: |c| FieldValue::Bool(c.is_active),
    },
];

static CATEGORICAL: &[CategoricalFilter<Circuit>] = &[CategoricalFilter {
    key: "document_type",
    label: "Вид документа",
    get: |c| c.document_type_name.clone(),
}];

static SCHEMA: ListSchema<Circuit> = ListSchema {
    fields: FIELDS,
    categorical: CATEGORICAL,
    default_sort: "description",
    is_deletable: None,
};

#[component]
pub fn CircuitsList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |c: &Circuit| c.to_string_id());
    let notifications = use_notifications();

    let show_wizard = RwSignal::new(false);
    let editing: RwSignal<Option<Circuit>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(true);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_circuits());

    Effect::new(move |_| {
        if !ctrl.is_loaded.get_untracked() {
            load_data();
        }
    });

    let document_type_options = Signal::derive(move || {
        let mut names: Vec<String> = ctrl
            .items
            .get()
            .iter()
            .map(|c| c.document_type_name.clone())
            .filter(|n| !n.trim().is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    });
    let document_type_value = Signal::derive(move || {
        ctrl.categorical
            .get()
            .get("document_type")
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
                w.confirm_with_message(&format!("Удалить выбранные маршруты ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = bulk_delete(ids, |id| async move { api::delete_circuit(&id).await }).await;
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
        <PageFrame page_id="a004_circuit--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Маршруты согласования"</h1>
                    <Badge>
                        {move || ctrl.filtered().len().to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_wizard.set(true)
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
                    <div class="alert alert--error">{format!("Не удалось загрузить маршруты: {}", e)}</div>
                })}

                <FilterPanel
                    is_expanded=filter_expanded
                    active_filters_count=Signal::derive(move || {
                        let search_active = usize::from(!ctrl.search_query.get().trim().is_empty());
                        let type_active = usize::from(document_type_value.get() != ANY);
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
                                    ("document_type_name", "Вид документа"),
                                ]
                                on_query=Callback::new(move |q| ctrl.set_search_query(q))
                                on_scope=Callback::new(move |s: SearchScope| ctrl.set_search_scope(s))
                            />
                            <FilterSelect
                                label="Вид документа"
                                options=document_type_options
                                value=document_type_value
                                on_change=Callback::new(move |v: String| ctrl.set_categorical("document_type", v))
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
                    <Table attr:id="a004-circuits-table" attr:style="width: 100%;">
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
                                    label="Вид документа"
                                    sort_field="document_type_name"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Этапов"
                                    sort_field="stages_count"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                    align="right"
                                />
                                <SortableHeaderCell
                                    label="Статус"
                                    sort_field="is_active"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <TableHeaderCell></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || ctrl.page_view().items
                                key=|c| c.to_string_id()
                                children=move |circuit| {
                                    let id = circuit.to_string_id();
                                    let circuit_for_edit = circuit.clone();
                                    let stage_names = circuit
                                        .stages
                                        .iter()
                                        .map(|s| s.name.clone())
                                        .collect::<Vec<_>>()
                                        .join(" → ");
                                    let stages_count = circuit.stages_count().to_string();
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                selected=selected_signal
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{circuit.base.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {circuit.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {circuit.document_type_name.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="badge badge--neutral" title=stage_names>
                                                        {stages_count}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if circuit.is_active {
                                                        view! { <span class="badge badge--success">"Активен"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Отключён"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(circuit_for_edit.clone()))
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

                {move || if show_wizard.get() {
                    view! {
                        <CircuitWizard
                            existing=None
                            on_close=move || show_wizard.set(false)
                            on_saved=move || {
                                show_wizard.set(false);
                                load_data();
                            }
                        />
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }}

                {move || editing.get().map(|circuit| view! {
                    <CircuitWizard
                        existing=Some(circuit)
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}
