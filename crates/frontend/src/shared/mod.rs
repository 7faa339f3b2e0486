pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_engine;
pub mod notifications;
pub mod page_frame;
pub mod page_standard;
