//! Универсальный конвейер списков: фильтр → сортировка → пагинация →
//! массовый выбор → мутация → перезагрузка.
//!
//! Реализован один раз и используется всеми табличными экранами через
//! таблицу дескрипторов полей ([`ListSchema`]) вместо копирования
//! компараторов по экранам. Чистые функции (`filter`, `sort`, `paginate`,
//! [`SelectionModel`]) не трогают сигналы и тестируются на хосте;
//! [`ListController`] связывает их с Leptos-сигналами конкретного экрана.

pub mod bulk;
pub mod controller;
pub mod fields;
pub mod filter;
pub mod paginate;
pub mod selection;
pub mod sort;

pub use bulk::{bulk_delete, BulkOutcome};
pub use controller::ListController;
pub use fields::{CategoricalFilter, FieldDescriptor, FieldKind, FieldValue, ListSchema};
pub use filter::{filter, SearchScope, ANY};
pub use paginate::{page_for_offset, paginate, PageView};
pub use selection::{PageSelection, SelectionModel};
pub use sort::sort;
