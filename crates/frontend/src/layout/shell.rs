//! Каркас приложения: верхняя панель, сайдбар и область контента.
//!
//! ```text
//! +------------------------------------------+
//! |              TopHeader                    |
//! +------------------------------------------+
//! |  Sidebar  |           Content            |
//! +------------------------------------------+
//! ```

use leptos::prelude::*;

use crate::domain::a001_document_type::ui::list::DocumentTypesList;
use crate::domain::a002_approver::ui::list::ApproversList;
use crate::domain::a003_approval_group::ui::list::ApprovalGroupsList;
use crate::domain::a004_circuit::ui::list::CircuitsList;
use crate::domain::a005_vendor::ui::list::VendorsList;
use crate::domain::a006_customer::ui::list::CustomersList;
use crate::domain::a007_status::ui::list::StatusesList;
use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::layout::sidebar::Sidebar;
use crate::shared::icons::icon;
use crate::system::users::ui::list::UsersList;

#[component]
fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Скрыть навигацию" } else { "Показать навигацию" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Документооборот"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__screen">
                    {move || ctx.active_screen.get().label()}
                </span>
            </div>
        </div>
    }
}

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <div
                    data-zone="left"
                    class="app-sidebar"
                    class:hidden=move || !ctx.left_open.get()
                >
                    <Sidebar />
                </div>

                <div class="app-main">
                    {move || match ctx.active_screen.get() {
                        Screen::DocumentTypes => view! { <DocumentTypesList /> }.into_any(),
                        Screen::Approvers => view! { <ApproversList /> }.into_any(),
                        Screen::ApprovalGroups => view! { <ApprovalGroupsList /> }.into_any(),
                        Screen::Circuits => view! { <CircuitsList /> }.into_any(),
                        Screen::Vendors => view! { <VendorsList /> }.into_any(),
                        Screen::Customers => view! { <CustomersList /> }.into_any(),
                        Screen::Statuses => view! { <StatusesList /> }.into_any(),
                        Screen::Users => view! { <UsersList /> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
