//! Модальная форма создания/редактирования вида документа

use contracts::domain::a001_document_type::aggregate::{DocumentType, DocumentTypeDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_document_type::api;
use crate::shared::icons::icon;

/// Валидация полей формы до отправки на backend
fn validate_form(code: &str, description: &str, prefix: &str, retention_days: i32) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Наименование не может быть пустым".into());
    }
    if code.trim().is_empty() {
        return Err("Код не может быть пустым".into());
    }
    if !prefix.trim().is_empty() {
        let ok = prefix.chars().all(|c| c.is_ascii_alphanumeric());
        if !ok || prefix.len() > 8 {
            return Err("Префикс: до 8 латинских букв/цифр".into());
        }
    }
    if retention_days < 0 {
        return Err("Срок хранения не может быть отрицательным".into());
    }
    Ok(())
}

#[component]
pub fn DocumentTypeForm<F1, F2>(
    /// None = создание, Some = редактирование
    existing: Option<DocumentType>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let editing_id = existing.as_ref().map(|dt| dt.to_string_id());
    let title = match &existing {
        Some(dt) => format!("Редактирование: {}", dt.base.description),
        None => "Новый вид документа".to_string(),
    };

    let code = RwSignal::new(
        existing.as_ref().map(|dt| dt.base.code.clone()).unwrap_or_default(),
    );
    let description = RwSignal::new(
        existing.as_ref().map(|dt| dt.base.description.clone()).unwrap_or_default(),
    );
    let prefix = RwSignal::new(
        existing.as_ref().map(|dt| dt.prefix.clone()).unwrap_or_default(),
    );
    let retention_days = RwSignal::new(
        existing
            .as_ref()
            .map(|dt| dt.retention_days.to_string())
            .unwrap_or_else(|| "0".to_string()),
    );
    let comment = RwSignal::new(
        existing
            .as_ref()
            .and_then(|dt| dt.base.comment.clone())
            .unwrap_or_default(),
    );
    let is_active = RwSignal::new(existing.as_ref().map(|dt| dt.is_active).unwrap_or(true));

    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        let days: i32 = match retention_days.get().trim().parse() {
            Ok(v) => v,
            Err(_) => {
                set_error.set(Some("Срок хранения: введите целое число".into()));
                return;
            }
        };
        if let Err(e) = validate_form(&code.get(), &description.get(), &prefix.get(), days) {
            set_error.set(Some(e));
            return;
        }

        set_saving.set(true);
        set_error.set(None);

        let dto = DocumentTypeDto {
            id: editing_id.clone(),
            code: Some(code.get()),
            description: description.get(),
            prefix: prefix.get().trim().to_string(),
            retention_days: days,
            is_active: is_active.get(),
            comment: if comment.get().trim().is_empty() {
                None
            } else {
                Some(comment.get())
            },
        };

        let id_for_update = editing_id.clone();
        spawn_local(async move {
            let result = match &id_for_update {
                Some(id) => api::update_document_type(id, dto).await,
                None => api::create_document_type(dto).await,
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
                        <Input
                            value=code
                            placeholder="DT-001"
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Наименование"</Label>
                        <Input
                            value=description
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Префикс нумерации"</Label>
                        <Input
                            value=prefix
                            placeholder="DOG"
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Срок хранения, дней (0 = бессрочно)"</Label>
                        <Input
                            value=retention_days
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>

                    <div class="form__group">
                        <Label>"Комментарий"</Label>
                        <Input
                            value=comment
                            disabled=Signal::derive(move || saving.get())
                        />
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_validation_mirrors_aggregate_rules() {
        assert!(validate_form("DT-001", "Договор", "DOG", 365).is_ok());
        assert!(validate_form("", "Договор", "DOG", 0).is_err());
        assert!(validate_form("DT-001", "", "DOG", 0).is_err());
        assert!(validate_form("DT-001", "Договор", "слишком-длинный", 0).is_err());
        assert!(validate_form("DT-001", "Договор", "DOG", -1).is_err());
    }
}
