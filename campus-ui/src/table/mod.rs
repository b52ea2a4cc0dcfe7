//! DataTable - a schema-driven table with a card-grid alternative view.
//!
//! Rows are any type implementing [`TableRow`]. Columns are declared with
//! [`DynamicColumn`], whose [`ColumnType`] picks the cell renderer. All
//! interaction state (sorting, filters, visibility, selection, paging, view
//! mode) lives in [`DataTableState`]; [`render`] turns it into a node tree.
//!
//! # Example
//!
//! ```
//! use campus_ui::table::{ColumnType, DataTableState, DynamicColumn};
//! use campus_ui::value::Record;
//!
//! let rows = vec![
//!     Record::new().set("id", 1i64).set("title", "SQL").set("price", 49.0),
//!     Record::new().set("id", 2i64).set("title", "Rust").set("price", 99.0),
//! ];
//! let mut table = DataTableState::new(rows, vec![
//!     DynamicColumn::new("title", "Title", ColumnType::Text),
//!     DynamicColumn::new("price", "Price", ColumnType::Currency),
//! ]);
//!
//! table.set_search("rust");
//! assert_eq!(table.filtered_row_count(), 1);
//! ```

mod action;
mod cell;
mod column;
mod render;
mod state;

pub use action::{ActionItem, Predicate};
pub use cell::{avatar_initials, last_path_segment, render_cell};
pub use column::{BadgeVariantFn, CellRender, ColumnType, DynamicColumn, validate_columns};
pub use render::{render, render_cards, render_pagination, render_table, render_toolbar};
pub use state::{DataTableState, PageRow, SelectionChangeHandler};

use crate::value::Value;

/// Trait for rows that can be displayed in a data table.
///
/// # Example
///
/// ```
/// use campus_ui::table::TableRow;
/// use campus_ui::value::Value;
///
/// #[derive(Clone)]
/// struct Lesson {
///     id: u32,
///     title: String,
/// }
///
/// impl TableRow for Lesson {
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "id" => self.id.into(),
///             "title" => self.title.clone().into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Value of the named field, `Value::Null` when the row has no such field.
    fn field(&self, key: &str) -> Value;
}

/// Presentation of the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Card,
}

/// Sort direction of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One active sort. Earlier entries take precedence over later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub column: String,
    pub direction: SortDirection,
}

/// Interactions emitted by table nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Header click: cycle this column's sort, dropping other sorts.
    ToggleSort(String),
    /// Modified header click: cycle this column's sort, keeping others.
    ToggleSortMulti(String),
    /// Search box edit.
    SetSearch(String),
    /// Column visibility menu entry.
    ToggleColumn(String),
    /// Row checkbox, by row key.
    ToggleRow(String),
    /// Header checkbox: select or clear the current page.
    ToggleAllPageRows,
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    SetPageSize(usize),
    SetViewMode(ViewMode),
    /// Entry `index` of the row action list, for the row with this key.
    RowAction { row: String, index: usize },
}
