//! Поставщики: список с фильтром по стране

use contracts::domain::a005_vendor::aggregate::{Vendor, VendorDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_vendor::api;
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

static FIELDS: &[FieldDescriptor<Vendor>] = &[
    FieldDescriptor {
        id: "code",
        label: "Код",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.base.code),
    },
    FieldDescriptor {
        id: "description",
        label: "Наименование",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.base.description),
    },
    FieldDescriptor {
        id: "country",
        label: "Страна",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.country),
    },
    FieldDescriptor {
        id: "city",
        label: "Город",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.city),
    },
    FieldDescriptor {
        id: "tax_id",
        label: "ИНН",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.tax_id),
    },
    FieldDescriptor {
        id: "contact_email",
        label: "Email",
        kind: FieldKind::Text,
        searchable: true,
        get: |v| FieldValue::text(&v.contact_email),
    },
];

static CATEGORICAL: &[CategoricalFilter<Vendor>] = &[CategoricalFilter {
    key: "country",
    label: "Страна",
    get: |v| v.country.clone(),
}];

static SCHEMA: ListSchema<Vendor> = ListSchema {
    fields: FIELDS,
    categorical: CATEGORICAL,
    default_sort: "description",
    is_deletable: None,
};

#[component]
pub fn VendorsList() -> impl IntoView {
    let ctrl = ListController::new(&SCHEMA, |v: &Vendor| v.to_string_id());
    let notifications = use_notifications();

    let show_create_form = RwSignal::new(false);
    let editing: RwSignal<Option<Vendor>> = RwSignal::new(None);
    let filter_expanded = RwSignal::new(true);
    let deleting = RwSignal::new(false);

    let load_data = move || ctrl.load(api::fetch_vendors());

    Effect::new(move |_| {
        if !ctrl.is_loaded.get_untracked() {
            load_data();
        }
    });

    let country_options = Signal::derive(move || {
        let mut countries: Vec<String> = ctrl
            .items
            .get()
            .iter()
            .map(|v| v.country.clone())
            .filter(|c| !c.trim().is_empty())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    });
    let country_value = Signal::derive(move || {
        ctrl.categorical
            .get()
            .get("country")
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
                w.confirm_with_message(&format!("Удалить выбранных поставщиков ({})?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = bulk_delete(ids, |id| async move { api::delete_vendor(&id).await }).await;
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
        <PageFrame page_id="a005_vendor--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Поставщики"</h1>
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
                    <div class="alert alert--error">{format!("Не удалось загрузить поставщиков: {}", e)}</div>
                })}

                <FilterPanel
                    is_expanded=filter_expanded
                    active_filters_count=Signal::derive(move || {
                        let search_active = usize::from(!ctrl.search_query.get().trim().is_empty());
                        let country_active = usize::from(country_value.get() != ANY);
                        search_active + country_active
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
                                    ("description", "Наименование"),
                                    ("tax_id", "ИНН"),
                                    ("city", "Город"),
                                    ("contact_email", "Email"),
                                ]
                                on_query=Callback::new(move |q| ctrl.set_search_query(q))
                                on_scope=Callback::new(move |s: SearchScope| ctrl.set_search_scope(s))
                            />
                            <FilterSelect
                                label="Страна"
                                options=country_options
                                value=country_value
                                on_change=Callback::new(move |v: String| ctrl.set_categorical("country", v))
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
                    <Table attr:id="a005-vendors-table" attr:style="width: 100%;">
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
                                    label="Страна"
                                    sort_field="country"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Город"
                                    sort_field="city"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="ИНН"
                                    sort_field="tax_id"
                                    current_sort_field=sort_field_signal
                                    sort_ascending=sort_asc_signal
                                    on_sort=on_sort
                                />
                                <SortableHeaderCell
                                    label="Email"
                                    sort_field="contact_email"
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
                                key=|v| v.to_string_id()
                                children=move |vendor| {
                                    let id = vendor.to_string_id();
                                    let vendor_for_edit = vendor.clone();
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=id.clone()
                                                selected=selected_signal
                                                on_toggle=Callback::new(move |row_id: String| ctrl.toggle_row(&row_id))
                                            />
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{vendor.base.code.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {vendor.base.description.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{vendor.country.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{vendor.city.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{vendor.tax_id.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{vendor.contact_email.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(vendor_for_edit.clone()))
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
                        <VendorForm
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

                {move || editing.get().map(|vendor| view! {
                    <VendorForm
                        existing=Some(vendor)
                        on_close=move || editing.set(None)
                        on_saved=move || { editing.set(None); load_data(); }
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn VendorForm<F1, F2>(
    existing: Option<Vendor>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let editing_id = existing.as_ref().map(|v| v.to_string_id());
    let title = match &existing {
        Some(v) => format!("Редактирование: {}", v.base.description),
        None => "Новый поставщик".to_string(),
    };

    let code = RwSignal::new(existing.as_ref().map(|v| v.base.code.clone()).unwrap_or_default());
    let description =
        RwSignal::new(existing.as_ref().map(|v| v.base.description.clone()).unwrap_or_default());
    let country = RwSignal::new(existing.as_ref().map(|v| v.country.clone()).unwrap_or_default());
    let city = RwSignal::new(existing.as_ref().map(|v| v.city.clone()).unwrap_or_default());
    let tax_id = RwSignal::new(existing.as_ref().map(|v| v.tax_id.clone()).unwrap_or_default());
    let contact_email =
        RwSignal::new(existing.as_ref().map(|v| v.contact_email.clone()).unwrap_or_default());

    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        if description.get().trim().is_empty() {
            set_error.set(Some("Наименование не может быть пустым".into()));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = VendorDto {
            id: editing_id.clone(),
            code: Some(code.get()),
            description: description.get(),
            country: country.get(),
            city: city.get(),
            tax_id: tax_id.get(),
            contact_email: contact_email.get(),
            comment: None,
        };

        let id_for_update = editing_id.clone();
        spawn_local(async move {
            let result = match &id_for_update {
                Some(id) => api::update_vendor(id, dto).await,
                None => api::create_vendor(dto).await,
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
                        <Input value=code placeholder="VND-001" disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Наименование"</Label>
                        <Input value=description disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Страна"</Label>
                        <Input value=country disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Город"</Label>
                        <Input value=city disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"ИНН"</Label>
                        <Input value=tax_id disabled=Signal::derive(move || saving.get()) />
                    </div>

                    <div class="form__group">
                        <Label>"Email"</Label>
                        <Input
                            value=contact_email
                            input_type=InputType::Email
                            disabled=Signal::derive(move || saving.get())
                        />
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
