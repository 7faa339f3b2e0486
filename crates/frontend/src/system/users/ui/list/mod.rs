//! Пользователи системы

use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
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
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::users::api;

static FIELDS: &[FieldDescriptor<User>] = &[
    FieldDescriptor {
        id: "username",
        label: "Логин",
        kind: FieldKind::Text,
        searchable: true,
        get: |u| FieldValue::text(&u.username),
    },
    FieldDescriptor {
        id: "full_name",
        label: "ФИО",
        kind: FieldKind::Text,
        searchable: true,
        get: |u| FieldValue::opt_text(u.full_name.as_deref()),
    },
    FieldDescriptor {
        id: "email",
        label: "Email",
        kind: FieldKind::Text,
        searchable: true,
        get: |u| FieldValue::opt_text(u.email.as_deref()),
    },
    FieldDescriptor {
        id: "is_admin",
        label: "Роль",
        kind: FieldKind::Bool,
        searchable: false,
        get: |u| FieldValue::Bool(u.is_admin),
    },
    FieldDescriptor {
        id: "is_active",
        label: "Статус",
        kind: FieldKind::Bool,
        searchable: false,
        get: |u| FieldValue::Bool(u.is_active),
    },
    FieldDescriptor {
        id: "created_at",
        label: "Создан",
        kind: FieldKind::Text,
        searchable: false,
        get: |u| FieldValue::text(&u.created_at),
    },
    FieldDescriptor {
        id: "last_login_at",
        label: "Последний вход",
        kind: FieldKind::Text,
        searchable: false,
        get: |u| FieldValue::opt_text(u.last_login_at.as_deref()),
    },
];

static SCHEMA: ListSchema<User> = ListSchema {
    fields: FIELDS,
    categorical: &[],
    default_sort: "username",
    is_deletable: None,
};

#[component]
pub fn UsersList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |u: &User| u.id.clone());
    let notifications = use_notifications();

    let show_create_form = RwSignal::new(false);
    let editing: RwSignal<Option<User>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_users());

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
                w.confirm_with_message(&format!("Удалить выбранных пользователей ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = bulk_delete(ids, |id| async move { api::delete_user(&id).await }).await;
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

    let format_ts_opt = |value: &Option<String>| {
        value.as_deref().map(format_datetime).unwrap_or_else(|| "-".to_string())
    };

    view! {
        <PageFrame page_id="sys_users--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Пользователи"</h1>
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
                    <div class="alert alert--error">{format!("Не удалось загрузить пользователей: {}", e)}</div>
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
                                ("username", "Логин"),
                                ("full_name", "ФИО"),
                                ("email", "Email"),
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
                    <Table attr:id="sys-users-table" attr:style="width: 100%;">
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
                                    label="Логин"
                                    sort_field="username"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="ФИО"
                                    sort_field="full_name"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Email"
                                    sort_field="email"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Роль"
                                    sort_field="is_admin"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Статус"
                                    sort_field="is_active"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Создан"
                                    sort_field="created_at"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Последний вход"
                                    sort_field="last_login_at"
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
                                key=|u| u.id.clone()
                                children=move |user| {
                                    let user_id = user.id.clone();
                                    let user_for_edit = user.clone();
                                    let created = format_datetime(&user.created_at);
                                    let last_login = format_ts_opt(&user.last_login_at);
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=user_id.clone()
                                                selected=selected_signal
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{user.username.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user.full_name.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {user.email.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if user.is_admin {
                                                        view! { <span class="badge badge--warning">"Админ"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"Пользователь"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if user.is_active {
                                                        view! { <span class="badge badge--success">"Активен"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Заблок."</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{created}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{last_login}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(user_for_edit.clone()))
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
                        <CreateUserForm
                            on_close=move || show_create_form.set(false)
                            on_created=move || {
                                show_create_form.set(false);
                                load_data();
                            }
                        />
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }}

                {move || editing.get().map(|user| view! {
                    <EditUserForm
                        user=user
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn CreateUserForm<F1, F2>(on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let is_admin = RwSignal::new(false);

    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        if username.get().trim().is_empty() {
            set_error.set(Some("Логин не может быть пустым".into()));
            return;
        }
        if password.get().len() < 8 {
            set_error.set(Some("Пароль: минимум 8 символов".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = CreateUserDto {
            username: username.get().trim().to_string(),
            password: password.get(),
            email: if email.get().trim().is_empty() {
                None
            } else {
                Some(email.get())
            },
            full_name: if full_name.get().trim().is_empty() {
                None
            } else {
                Some(full_name.get())
            },
            is_admin: is_admin.get(),
        };

        spawn_local(async move {
            match api::create_user(dto).await {
                Ok(()) => on_created(),
                Err(e) => {
                    set_error.set(Some(format!("Ошибка создания: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Новый пользователь"</h2>
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
                        <Label>"Логин"</Label>
                        <Input value=username disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Пароль"</Label>
                        <input
                            type="password"
                            class="form__input"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            prop:disabled=move || saving.get()
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input
                            value=email
                            input_type=InputType::Email
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"ФИО"</Label>
                        <Input value=full_name disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Checkbox checked=is_admin label="Администратор" />
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
                        {move || if saving.get() { "Создание..." } else { "Создать" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn EditUserForm<F1, F2>(user: User, on_close: F1, on_saved: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let email = RwSignal::new(user.email.clone().unwrap_or_default());
    let full_name = RwSignal::new(user.full_name.clone().unwrap_or_default());
    let is_admin = RwSignal::new(user.is_admin);
    let is_active = RwSignal::new(user.is_active);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let username_display = user.username.clone();

    let on_save = move |_| {
        set_saving.set(true);
        set_error.set(None);

        let dto = UpdateUserDto {
            id: user.id.clone(),
            email: if email.get().trim().is_empty() {
                None
            } else {
                Some(email.get())
            },
            full_name: if full_name.get().trim().is_empty() {
                None
            } else {
                Some(full_name.get())
            },
            is_active: is_active.get(),
            is_admin: is_admin.get(),
        };

        spawn_local(async move {
            match api::update_user(dto).await {
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
                    <h2 class="modal-title">{format!("Редактирование: {}", username_display)}</h2>
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
                        <Label>"Email"</Label>
                        <Input
                            value=email
                            input_type=InputType::Email
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"ФИО"</Label>
                        <Input
                            value=full_name
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Checkbox checked=is_admin label="Администратор" />
                    </div>

                    <div class="form__group">
                        <Checkbox checked=is_active label="Активен" />
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
