//! Группы согласования: список и форма с подбором участников

use contracts::domain::a002_approver::aggregate::Approver;
use contracts::domain::a003_approval_group::aggregate::{ApprovalGroup, ApprovalGroupDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;

use crate::domain::a002_approver::api as approvers_api;
use crate::domain::a003_approval_group::api;
use crate::shared::components::{
    FilterPanel, PaginationControls, SearchInput, SortableHeaderCell, TableCellCheckbox,
    TableHeaderCheckbox,
};
use crate::shared::icons::icon;
use crate::shared::list_engine::{
    bulk_delete, FieldDescriptor, FieldKind, FieldValue, ListController, ListSchema, SearchScope,
};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

static FIELDS: &[FieldDescriptor<ApprovalGroup>] = &[
    FieldDescriptor {
        id: "code",
        label: "Код",
        kind: FieldKind::Text,
        searchable: true,
        get: |g| FieldValue::text(&g.base.code),
    },
    FieldDescriptor {
        id: "description",
        label: "Название",
        kind: FieldKind::Text,
        searchable: true,
        get: |g| FieldValue::text(&g.base.description),
    },
    FieldDescriptor {
        id: "members_count",
        label: "Участников",
        kind: FieldKind::Number,
        searchable: false,
        get: |g| FieldValue::number(g.members_count() as f64),
    },
    FieldDescriptor {
        id: "comment",
        label: "Комментарий",
        kind: FieldKind::Text,
        searchable: true,
        get: |g| FieldValue::opt_text(g.base.comment.as_deref()),
    },
];

static SCHEMA: ListSchema<ApprovalGroup> = ListSchema {
    fields: FIELDS,
    categorical: &[],
    default_sort: "description",
    is_deletable: None,
};

#[component]
pub fn ApprovalGroupsList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |g: &ApprovalGroup| g.to_string_id());
    let notifications = use_notifications();

    let show_create_form = RwSignal::new(false);
    let editing: RwSignal<Option<ApprovalGroup>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_approval_groups());

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
                w.confirm_with_message(&format!("Удалить выбранные группы ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome =
                bulk_delete(ids, |id| async move { api::delete_approval_group(&id).await }).await;
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
        <PageFrame page_id="a003_approval_group--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Группы согласования"</h1>
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
                        " Новая"
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
                    <div class="alert alert--error">{format!("Не удалось загрузить группы: {}", e)}</div>
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
                                ("description", "Название"),
                                ("comment", "Комментарий"),
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
                    <Table attr:id="a003-approval-groups-table" attr:style="width: 100%;">
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
                                    label="Участников"
                                    sort_field="members_count"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                    align="right"
                                />
                                <SortableHeaderCell
                                    label="Комментарий"
                                    sort_field="comment"
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
                                key=|g| g.to_string_id()
                                children=move |group| {
                                    let id = group.to_string_id();
                                    let group_for_edit = group.clone();
                                    let members_count = group.members_count().to_string();
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                selected=selected_signal
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{group.base.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {group.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="badge badge--neutral">{members_count}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {group.base.comment.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(group_for_edit.clone()))
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
                        <ApprovalGroupForm
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

                {move || editing.get().map(|group| view! {
                    <ApprovalGroupForm
                        existing=Some(group)
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}

/// Форма группы: шапка + подбор участников из справочника согласующих
#[component]
fn ApprovalGroupForm<F1, F2>(
    existing: Option<ApprovalGroup>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let editing_id = existing.as_ref().map(|g| g.to_string_id());
    let title = match &existing {
        Some(g) => format!("Редактирование: {}", g.base.description),
        None => "Новая группа согласования".to_string(),
    };

    let code = RwSignal::new(existing.as_ref().map(|g| g.base.code.clone()).unwrap_or_default());
    let description =
        RwSignal::new(existing.as_ref().map(|g| g.base.description.clone()).unwrap_or_default());
    let comment = RwSignal::new(
        existing.as_ref().and_then(|g| g.base.comment.clone()).unwrap_or_default(),
    );
    let members: RwSignal<HashSet<String>> = RwSignal::new(
        existing
            .as_ref()
            .map(|g| g.member_ids.iter().cloned().collect())
            .unwrap_or_default(),
    );

    let approvers: RwSignal<Vec<Approver>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Справочник согласующих грузится один раз при открытии формы
    Effect::new(move |_| {
        spawn_local(async move {
            match approvers_api::fetch_approvers().await {
                Ok(mut data) => {
                    data.sort_by(|a, b| a.base.description.cmp(&b.base.description));
                    approvers.set(data);
                }
                Err(e) => {
                    set_error.set(Some(format!("Не удалось загрузить согласующих: {}", e)));
                }
            }
        });
    });

    let toggle_member = move |id: String| {
        members.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
    };

    let on_save = move |_| {
        if description.get().trim().is_empty() {
            set_error.set(Some("Название группы не может быть пустым".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = ApprovalGroupDto {
            id: editing_id.clone(),
            code: Some(code.get()),
            description: description.get(),
            member_ids: members.get().into_iter().collect(),
            comment: if comment.get().trim().is_empty() {
                None
            } else {
                Some(comment.get())
            },
        };

        let id_for_update = editing_id.clone();
        spawn_local(async move {
            let result = match &id_for_update {
                Some(id) => api::update_approval_group(id, dto).await,
                None => api::create_approval_group(dto).await,
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
            <div class="modal modal--wide" on:click=move |ev| ev.stop_propagation()>
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
                        <Input value=code placeholder="GRP-001" disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Название"</Label>
                        <Input value=description disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Комментарий"</Label>
                        <Input value=comment disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>
                            {move || format!("Участники ({})", members.get().len())}
                        </Label>
                        <div class="member-picker">
                            <For
                                each=move || approvers.get()
                                key=|a| a.to_string_id()
                                children=move |approver| {
                                    let id = approver.to_string_id();
                                    let id_for_checked = id.clone();
                                    let label = if approver.department.is_empty() {
                                        approver.base.description.clone()
                                    } else {
                                        format!("{} ({})", approver.base.description, approver.department)
                                    };
                                    view! {
                                        <label class="member-picker__row">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || members.get().contains(&id_for_checked)
                                                on:change=move |_| toggle_member(id.clone())
                                            />
                                            <span>{label}</span>
                                        </label>
                                    }
                                }
                            />
                        </div>
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
