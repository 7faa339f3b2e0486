use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::notifications::{NotificationHost, NotificationService};

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());

    view! {
        <Shell />
        <NotificationHost />
    }
}
