//! Сервис уведомлений: очередь тостов с авто-скрытием.
//!
//! Контекст предоставляется в корне приложения (`App`), компоненты получают
//! его через `use_notifications()`. Успешные уведомления скрываются сами,
//! ошибки остаются до закрытия пользователем.

use leptos::prelude::*;
use leptos::task::spawn_local;

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice--success",
            NoticeKind::Warning => "notice--warning",
            NoticeKind::Error => "notice--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn notices(&self) -> Signal<Vec<Notice>> {
        self.notices.into()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into(), true);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeKind::Warning, message.into(), true);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into(), false);
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|n| n.id != id));
    }

    fn push(&self, kind: NoticeKind, message: String, auto_dismiss: bool) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notices.update(|list| {
            list.push(Notice { id, kind, message });
        });

        if auto_dismiss {
            let service = *self;
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
                service.dismiss(id);
            });
        }
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Получить сервис из контекста; паника здесь означает ошибку монтирования
/// приложения, а не ошибку времени выполнения
pub fn use_notifications() -> NotificationService {
    expect_context::<NotificationService>()
}

/// Контейнер тостов, рендерится один раз в корне приложения
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notification-host">
            <For
                each=move || service.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=format!("notice {}", notice.kind.css_modifier())>
                            <span class="notice__message">{notice.message.clone()}</span>
                            <button
                                class="notice__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
