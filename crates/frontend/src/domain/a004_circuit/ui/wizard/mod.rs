//! Мастер маршрута согласования: Основное → Этапы → Проверка.
//!
//! Каждый шаг валидируется при переходе вперёд; сохранение доступно
//! только с шага проверки.

mod draft;

pub use draft::{CircuitDraft, StageDraft, WizardStep};

use contracts::domain::a001_document_type::aggregate::DocumentType;
use contracts::domain::a003_approval_group::aggregate::ApprovalGroup;
use contracts::domain::a004_circuit::aggregate::Circuit;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_document_type::api as document_types_api;
use crate::domain::a003_approval_group::api as groups_api;
use crate::domain::a004_circuit::api;
use crate::shared::icons::icon;

#[component]
pub fn CircuitWizard<F1, F2>(
    existing: Option<Circuit>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let editing_id = StoredValue::new(existing.as_ref().map(|c| c.to_string_id()));
    let title = match &existing {
        Some(c) => format!("Маршрут: {}", c.base.description),
        None => "Новый маршрут согласования".to_string(),
    };

    let draft = RwSignal::new(
        existing
            .as_ref()
            .map(CircuitDraft::from_circuit)
            .unwrap_or_else(CircuitDraft::new),
    );
    let step = RwSignal::new(WizardStep::General);

    let document_types: RwSignal<Vec<DocumentType>> = RwSignal::new(Vec::new());
    let groups: RwSignal<Vec<ApprovalGroup>> = RwSignal::new(Vec::new());

    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Справочники для селектов шагов
    Effect::new(move |_| {
        spawn_local(async move {
            match document_types_api::fetch_document_types().await {
                Ok(data) => document_types.set(data),
                Err(e) => set_error.set(Some(format!("Не удалось загрузить виды документов: {}", e))),
            }
        });
        spawn_local(async move {
            match groups_api::fetch_approval_groups().await {
                Ok(data) => groups.set(data),
                Err(e) => set_error.set(Some(format!("Не удалось загрузить группы: {}", e))),
            }
        });
    });

    let go_next = move |_| {
        let current = step.get_untracked();
        if let Err(e) = draft.get_untracked().validate_step(current) {
            set_error.set(Some(e));
            return;
        }
        set_error.set(None);
        if let Some(next) = current.next() {
            step.set(next);
        }
    };

    let go_back = move |_| {
        set_error.set(None);
        if let Some(prev) = step.get_untracked().prev() {
            step.set(prev);
        }
    };

    let on_save = move |_| {
        let current = draft.get_untracked();
        if let Err(e) = current.validate_step(WizardStep::Review) {
            set_error.set(Some(e));
            return;
        }
        set_saving.set(true);
        set_error.set(None);

        let id_for_update = editing_id.get_value();
        let dto = current.to_dto(id_for_update.clone());
        spawn_local(async move {
            let result = match &id_for_update {
                Some(id) => api::update_circuit(id, dto).await,
                None => api::create_circuit(dto).await,
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

    let group_name = move |group_id: &str| {
        groups
            .get()
            .iter()
            .find(|g| g.to_string_id() == group_id)
            .map(|g| g.base.description.clone())
            .unwrap_or_else(|| "—".to_string())
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

                <div class="wizard-steps">
                    {[WizardStep::General, WizardStep::Stages, WizardStep::Review]
                        .into_iter()
                        .map(|s| {
                            view! {
                                <span class=move || {
                                    if step.get() == s {
                                        "wizard-steps__item wizard-steps__item--current"
                                    } else {
                                        "wizard-steps__item"
                                    }
                                }>
                                    {s.title()}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    {move || match step.get() {
                        WizardStep::General => view! {
                            <div class="wizard-step">
                                <div class="form__group">
                                    <label class="form__label">"Код"</label>
                                    <input
                                        type="text"
                                        class="form__input"
                                        placeholder="C-001"
                                        prop:value=move || draft.get().code
                                        on:input=move |ev| {
                                            let v = event_target_value(&ev);
                                            draft.update(|d| d.code = v);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Название"</label>
                                    <input
                                        type="text"
                                        class="form__input"
                                        prop:value=move || draft.get().description
                                        on:input=move |ev| {
                                            let v = event_target_value(&ev);
                                            draft.update(|d| d.description = v);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Вид документа"</label>
                                    <select
                                        class="form__select"
                                        on:change=move |ev| {
                                            let v = event_target_value(&ev);
                                            draft.update(|d| d.document_type_id = v);
                                        }
                                        prop:value=move || draft.get().document_type_id
                                    >
                                        <option value="">"— не выбран —"</option>
                                        {move || document_types.get().into_iter().map(|dt| {
                                            let id = dt.to_string_id();
                                            let selected = draft.get().document_type_id == id;
                                            view! {
                                                <option value=id selected=selected>
                                                    {dt.base.description.clone()}
                                                </option>
                                            }
                                        }).collect_view()}
                                    </select>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Комментарий"</label>
                                    <input
                                        type="text"
                                        class="form__input"
                                        prop:value=move || draft.get().comment
                                        on:input=move |ev| {
                                            let v = event_target_value(&ev);
                                            draft.update(|d| d.comment = v);
                                        }
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__checkbox-label">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || draft.get().is_active
                                            on:change=move |_| draft.update(|d| d.is_active = !d.is_active)
                                        />
                                        " Активен"
                                    </label>
                                </div>
                            </div>
                        }.into_any(),

                        WizardStep::Stages => view! {
                            <div class="wizard-step">
                                {move || {
                                    let stage_count = draft.get().stages.len();
                                    draft.get().stages.into_iter().enumerate().map(|(i, stage)| {
                                        view! {
                                            <div class="stage-row">
                                                <span class="stage-row__order">{format!("{}.", i + 1)}</span>
                                                <input
                                                    type="text"
                                                    class="form__input stage-row__name"
                                                    placeholder="Название этапа"
                                                    prop:value=stage.name.clone()
                                                    on:input=move |ev| {
                                                        let v = event_target_value(&ev);
                                                        draft.update(|d| {
                                                            if let Some(s) = d.stages.get_mut(i) {
                                                                s.name = v;
                                                            }
                                                        });
                                                    }
                                                />
                                                <select
                                                    class="form__select stage-row__group"
                                                    on:change=move |ev| {
                                                        let v = event_target_value(&ev);
                                                        draft.update(|d| {
                                                            if let Some(s) = d.stages.get_mut(i) {
                                                                s.group_id = v;
                                                            }
                                                        });
                                                    }
                                                    prop:value=stage.group_id.clone()
                                                >
                                                    <option value="">"— группа —"</option>
                                                    {groups.get().into_iter().map(|g| {
                                                        let id = g.to_string_id();
                                                        let selected = stage.group_id == id;
                                                        view! {
                                                            <option value=id selected=selected>
                                                                {g.base.description.clone()}
                                                            </option>
                                                        }
                                                    }).collect_view()}
                                                </select>
                                                <input
                                                    type="number"
                                                    class="form__input stage-row__quorum"
                                                    title="Кворум (0 = все участники)"
                                                    prop:value=stage.quorum.to_string()
                                                    on:input=move |ev| {
                                                        let v: u32 = event_target_value(&ev).parse().unwrap_or(0);
                                                        draft.update(|d| {
                                                            if let Some(s) = d.stages.get_mut(i) {
                                                                s.quorum = v;
                                                            }
                                                        });
                                                    }
                                                />
                                                <button
                                                    class="stage-row__btn"
                                                    title="Вверх"
                                                    disabled=i == 0
                                                    on:click=move |_| draft.update(|d| d.move_stage_up(i))
                                                >
                                                    "↑"
                                                </button>
                                                <button
                                                    class="stage-row__btn"
                                                    title="Вниз"
                                                    disabled=i + 1 == stage_count
                                                    on:click=move |_| draft.update(|d| d.move_stage_down(i))
                                                >
                                                    "↓"
                                                </button>
                                                <button
                                                    class="stage-row__btn stage-row__btn--danger"
                                                    title="Удалить этап"
                                                    on:click=move |_| draft.update(|d| d.remove_stage(i))
                                                >
                                                    "×"
                                                </button>
                                            </div>
                                        }
                                    }).collect_view()
                                }}
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| draft.update(|d| d.add_stage())
                                >
                                    {icon("plus")}
                                    " Добавить этап"
                                </Button>
                            </div>
                        }.into_any(),

                        WizardStep::Review => view! {
                            <div class="wizard-step wizard-review">
                                {move || {
                                    let d = draft.get();
                                    let doc_type = document_types
                                        .get()
                                        .iter()
                                        .find(|dt| dt.to_string_id() == d.document_type_id)
                                        .map(|dt| dt.base.description.clone())
                                        .unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <dl class="wizard-review__summary">
                                            <dt>"Название"</dt>
                                            <dd>{d.description.clone()}</dd>
                                            <dt>"Вид документа"</dt>
                                            <dd>{doc_type}</dd>
                                            <dt>"Статус"</dt>
                                            <dd>{if d.is_active { "Активен" } else { "Отключён" }}</dd>
                                        </dl>
                                        <ol class="wizard-review__stages">
                                            {d.stages.iter().map(|s| {
                                                let quorum = if s.quorum == 0 {
                                                    "все участники".to_string()
                                                } else {
                                                    format!("кворум {}", s.quorum)
                                                };
                                                view! {
                                                    <li>
                                                        {format!("{} — {} ({})", s.name, group_name(&s.group_id), quorum)}
                                                    </li>
                                                }
                                            }).collect_view()}
                                        </ol>
                                    }
                                }}
                            </div>
                        }.into_any(),
                    }}
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=go_back
                        disabled=Signal::derive(move || step.get() == WizardStep::General || saving.get())
                    >
                        "Назад"
                    </Button>
                    {move || if step.get() == WizardStep::Review {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=on_save
                                disabled=Signal::derive(move || saving.get())
                            >
                                {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                            </Button>
                        }.into_any()
                    } else {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=go_next
                            >
                                "Далее"
                            </Button>
                        }.into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
