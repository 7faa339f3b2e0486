//! Список видов документов — флагманский табличный экран.
//!
//! Вид с привязанными документами удалять нельзя: его чекбокс заблокирован,
//! массовые операции выбора его пропускают.

use contracts::domain::a001_document_type::aggregate::DocumentType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::{
    FilterPanel, PaginationControls, SearchInput, SortableHeaderCell, TableCellCheckbox,
    TableHeaderCheckbox,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_engine::{
    bulk_delete, FieldDescriptor, FieldKind, FieldValue, ListController, ListSchema, SearchScope,
};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

use super::details::DocumentTypeForm;
use crate::domain::a001_document_type::api;

static FIELDS: &[FieldDescriptor<DocumentType>] = &[
    FieldDescriptor {
        id: "code",
        label: "Код",
        kind: FieldKind::Text,
        searchable: true,
        get: |d| FieldValue::text(&d.base.code),
    },
    FieldDescriptor {
        id: "description",
        label: "Наименование",
        kind: FieldKind::Text,
        searchable: true,
        get: |d| FieldValue::text(&d.base.description),
    },
    FieldDescriptor {
        id: "prefix",
        label: "Префикс",
        kind: FieldKind::Text,
        searchable: true,
        get: |d| FieldValue::text(&d.prefix),
    },
    FieldDescriptor {
        id: "retention_days",
        label: "Хранение, дн.",
        kind: FieldKind::Number,
        searchable: false,
        get: |d| FieldValue::number(d.retention_days as f64),
    },
    FieldDescriptor {
        id: "documents_count",
        label: "Документов",
        kind: FieldKind::Number,
        searchable: false,
        get: |d| FieldValue::number(d.documents_count as f64),
    },
    FieldDescriptor {
        id: "is_active",
        label: "Активен",
        kind: FieldKind::Bool,
        searchable: false,
        get: |d| FieldValue::Bool(d.is_active),
    },
    FieldDescriptor {
        id: "updated_at",
        label: "Изменён",
        kind: FieldKind::Text,
        searchable: false,
        get: |d| FieldValue::text(d.base.metadata.updated_at.to_rfc3339()),
    },
];

static SCHEMA: ListSchema<DocumentType> = ListSchema {
    fields: FIELDS,
    categorical: &[],
    default_sort: "code",
    is_deletable: Some(|d| d.is_deletable()),
};

#[component]
pub fn DocumentTypesList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |d: &DocumentType| d.to_string_id());
    let notifications = use_notifications();

    let show_create_form = RwSignal::new(false);
    let editing: RwSignal<Option<DocumentType>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(true);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_document_types());

    Effect::new(move |_| {
        if !ctrl.is_loaded.get_untracked() {
            load_data();
        }
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
                w.confirm_with_message(&format!("Удалить выбранные записи ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = bulk_delete(ids, |id| async move {
                api::delete_document_type(&id).await
            })
            .await;
            if outcome.is_complete_success() {
                notifications.success(outcome.summary());
            } else if outcome.is_complete_failure() {
                notifications.error(outcome.summary());
            } else {
                notifications.warning(outcome.summary());
            }
            deleting.set(false);
            // Выбор сбрасывается целиком: строка с неудавшимся удалением
            // не должна остаться отмеченной после перезагрузки
            ctrl.clear_selection();
            load_data();
        });
    };

    view! {
        <PageFrame page_id="a001_document_type--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Виды документов"</h1>
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
                    <div class="alert alert--error">{format!("Не удалось загрузить виды документов: {}", e)}</div>
                })}

                <FilterPanel
                    is_expanded=filter_expanded
                    active_filters_count=Signal::derive(move || {
                        usize::from(!ctrl.search_query.get().trim().is_empty())
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
                        <SearchInput
                            query=Signal::derive(move || ctrl.search_query.get())
                            scope=Signal::derive(move || ctrl.search_scope.get())
                            fields=vec![
                                ("code", "Код"),
                                ("description", "Наименование"),
                                ("prefix", "Префикс"),
                            ]
                            on_query=Callback::new(move |q| ctrl.set_search_query(q))
                            on_scope=Callback::new(move |s: SearchScope| ctrl.set_search_scope(s))
                        />
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
                                    on_click=move |_| ctrl.invert_visible_page()
                                >
                                    "Инвертировать страницу"
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
                    <Table attr:id="a001-document-types-table" attr:style="width: 100%;">
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
                                    label="Наименование"
                                    sort_field="description"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Префикс"
                                    sort_field="prefix"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Хранение, дн."
                                    sort_field="retention_days"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                    align="right"
                                />
                                <SortableHeaderCell
                                    label="Документов"
                                    sort_field="documents_count"
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
                                <SortableHeaderCell
                                    label="Изменён"
                                    sort_field="updated_at"
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
                                key=|d| d.to_string_id()
                                children=move |dt| {
                                    let id = dt.to_string_id();
                                    let deletable = dt.is_deletable();
                                    let dt_for_edit = dt.clone();
                                    let updated = format_datetime(&dt.base.metadata.updated_at.to_rfc3339());
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                selected=selected_signal
                                                enabled=deletable
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{dt.base.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {dt.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{dt.prefix.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if dt.retention_days == 0 {
                                                        "бессрочно".to_string()
                                                    } else {
                                                        dt.retention_days.to_string()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if dt.documents_count > 0 {
                                                        view! {
                                                            <span class="badge badge--neutral" title="Есть привязанные документы, удаление запрещено">
                                                                {dt.documents_count.to_string()}
                                                            </span>
                                                        }.into_any()
                                                    } else {
                                                        view! { <span>"0"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if dt.is_active {
                                                        view! { <span class="badge badge--success">"Активен"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Отключён"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{updated}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(dt_for_edit.clone()))
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
                        <DocumentTypeForm
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

                {move || editing.get().map(|dt| view! {
                    <DocumentTypeForm
                        existing=Some(dt)
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}
