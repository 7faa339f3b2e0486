pub mod filter_panel;
pub mod filter_select;
pub mod pagination_controls;
pub mod search_input;
pub mod table;

pub use filter_panel::{FilterPanel, FilterTag};
pub use filter_select::FilterSelect;
pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
