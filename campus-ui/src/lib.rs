//! Headless UI components for the Campus learning platform.
//!
//! The crate owns the state and rendering logic of two components that the
//! application pages compose:
//!
//! - [`stepper`]: a numbered step sequence with gated navigation, used by the
//!   course-creation wizard.
//! - [`table`]: a schema-driven data table with sorting, filtering, paging,
//!   selection, column visibility and a card-grid view.
//!
//! Both render into a [`node::Node`] tree. Nothing here performs I/O.

pub mod error;
pub mod format;
pub mod node;
pub mod selection;
pub mod stepper;
pub mod style;
pub mod table;
pub mod validation;
pub mod value;

pub mod prelude {
    pub use crate::error::UiError;
    pub use crate::format::NumberLocale;
    pub use crate::node::{Action, CheckState, MenuItem, Node};
    pub use crate::selection::Selection;
    pub use crate::stepper::{
        Mount, NavigationBar, StepItem, StepPanel, StepStatus, StepperAction, StepperState,
    };
    pub use crate::style::{Align, BadgeVariant, Orientation, Size, Style, Variant};
    pub use crate::table::{
        ActionItem, ColumnType, DataTableState, DynamicColumn, Predicate, SortDirection,
        SortEntry, TableAction, TableRow, ViewMode,
    };
    pub use crate::validation::{FieldError, ValidationResult, Validator};
    pub use crate::value::{Record, Value};
}
