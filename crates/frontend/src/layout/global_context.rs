use leptos::prelude::*;

/// Экран приложения. Один активный экран за раз, состояние
/// каждого списка живёт внутри его контроллера и при переключении
/// экранов сбрасывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    DocumentTypes,
    Approvers,
    ApprovalGroups,
    Circuits,
    Vendors,
    Customers,
    Statuses,
    Users,
}

impl Screen {
    pub fn key(&self) -> &'static str {
        match self {
            Screen::DocumentTypes => "a001_document_type",
            Screen::Approvers => "a002_approver",
            Screen::ApprovalGroups => "a003_approval_group",
            Screen::Circuits => "a004_circuit",
            Screen::Vendors => "a005_vendor",
            Screen::Customers => "a006_customer",
            Screen::Statuses => "a007_status",
            Screen::Users => "sys_users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::DocumentTypes => "Виды документов",
            Screen::Approvers => "Согласующие",
            Screen::ApprovalGroups => "Группы согласования",
            Screen::Circuits => "Контуры согласования",
            Screen::Vendors => "Поставщики",
            Screen::Customers => "Покупатели",
            Screen::Statuses => "Статусы",
            Screen::Users => "Пользователи",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Screen::DocumentTypes => "document",
            Screen::Approvers => "approvers",
            Screen::ApprovalGroups => "group",
            Screen::Circuits => "circuit",
            Screen::Vendors => "vendor",
            Screen::Customers => "customer",
            Screen::Statuses => "status",
            Screen::Users => "users",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active_screen: RwSignal<Screen>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active_screen: RwSignal::new(Screen::DocumentTypes),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open_screen(&self, screen: Screen) {
        leptos::logging::log!("open_screen: '{}'", screen.key());
        self.active_screen.set(screen);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
