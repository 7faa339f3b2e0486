//! Боковая навигация: справочники и системный раздел.

use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, Screen};
use crate::shared::icons::icon;

struct MenuGroup {
    label: &'static str,
    screens: &'static [Screen],
}

static MENU_GROUPS: &[MenuGroup] = &[
    MenuGroup {
        label: "Справочники",
        screens: &[
            Screen::DocumentTypes,
            Screen::Approvers,
            Screen::ApprovalGroups,
            Screen::Circuits,
        ],
    },
    MenuGroup {
        label: "Контрагенты",
        screens: &[Screen::Vendors, Screen::Customers],
    },
    MenuGroup {
        label: "Настройки",
        screens: &[Screen::Statuses, Screen::Users],
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            {MENU_GROUPS.iter().map(|group| {
                view! {
                    <div class="app-sidebar__group">
                        <div class="app-sidebar__group-label">{group.label}</div>
                        {group.screens.iter().map(|&screen| {
                            view! {
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=move || {
                                        ctx.active_screen.get() == screen
                                    }
                                    on:click=move |_| ctx.open_screen(screen)
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(screen.icon_name())}
                                        <span>{screen.label()}</span>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
