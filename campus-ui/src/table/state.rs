//! Data table state and row model.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};
use uuid::Uuid;

use crate::error::UiError;
use crate::format::{NumberLocale, parse_date};
use crate::node::CheckState;
use crate::selection::Selection;
use crate::value::Value;

use super::action::ActionItem;
use super::column::{ColumnType, DynamicColumn, validate_columns};
use super::{SortDirection, SortEntry, TableAction, TableRow, ViewMode};

/// Receives the selected rows, in data order, after every selection change.
pub type SelectionChangeHandler<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

const DEFAULT_PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];
const DEFAULT_ROW_ID_KEY: &str = "id";

/// A row with its resolved identity.
#[derive(Debug, Clone)]
struct KeyedRow<T> {
    key: String,
    row: T,
}

/// A row of the current page, as handed to renderers.
#[derive(Debug)]
pub struct PageRow<'a, T> {
    pub key: &'a str,
    pub row: &'a T,
    pub selected: bool,
}

/// State of a data table, owned by the hosting view.
///
/// The table expects all rows in memory; filtering, sorting and paging are
/// derived from the full row set on demand. Sorting, filtering, selection,
/// column visibility and view mode are independent of each other: changing
/// one never resets another. Only filter changes move the page back to the
/// first page.
pub struct DataTableState<T: TableRow> {
    rows: Vec<KeyedRow<T>>,
    columns: Vec<DynamicColumn<T>>,
    actions: Vec<ActionItem<T>>,

    sorting: Vec<SortEntry>,
    /// Active column filters by column key. Empty values are never stored.
    filters: BTreeMap<String, String>,
    /// Explicit visibility entries; columns without one are visible.
    visibility: HashMap<String, bool>,
    selection: Selection<String>,
    view_mode: ViewMode,
    page_index: usize,
    page_size: usize,

    page_size_options: Vec<usize>,
    show_checkbox: bool,
    search_column: Option<String>,
    search_placeholder: Option<String>,
    title: Option<String>,
    no_results_message: String,
    row_id_key: String,
    card_grid_cols: u8,
    locale: NumberLocale,
    on_selection_change: Option<SelectionChangeHandler<T>>,
}

impl<T: TableRow> DataTableState<T> {
    /// Create a table over `rows` with the given column schema.
    ///
    /// Columns flagged `hidden` start hidden; from then on visibility is
    /// entirely user controlled. Schema mistakes are logged, not rejected.
    pub fn new(rows: Vec<T>, columns: Vec<DynamicColumn<T>>) -> Self {
        if let Err(e) = validate_columns(&columns) {
            warn!("data table schema problem: {e}");
        }
        let visibility = columns
            .iter()
            .filter(|c| c.hidden && c.can_hide())
            .map(|c| (c.key.clone(), false))
            .collect();

        let mut state = Self {
            rows: Vec::new(),
            columns,
            actions: Vec::new(),
            sorting: Vec::new(),
            filters: BTreeMap::new(),
            visibility,
            selection: Selection::new(),
            view_mode: ViewMode::Table,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZES[0],
            page_size_options: DEFAULT_PAGE_SIZES.to_vec(),
            show_checkbox: false,
            search_column: None,
            search_placeholder: None,
            title: None,
            no_results_message: "No results.".to_string(),
            row_id_key: DEFAULT_ROW_ID_KEY.to_string(),
            card_grid_cols: 3,
            locale: NumberLocale::default(),
            on_selection_change: None,
        };
        state.set_rows(rows);
        state
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn with_actions(mut self, actions: Vec<ActionItem<T>>) -> Self {
        self.actions = actions;
        self
    }

    /// Show selection checkboxes.
    pub fn with_checkbox(mut self, show: bool) -> Self {
        self.show_checkbox = show;
        self
    }

    /// Column the search box filters on. Defaults to the first column; an
    /// unknown key is logged and the default kept.
    pub fn with_search_column(mut self, key: impl Into<String>) -> Self {
        if let Err(e) = self.set_search_column(key) {
            warn!("{e}, searching the default column");
        }
        self
    }

    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default_view(mut self, mode: ViewMode) -> Self {
        self.view_mode = mode;
        self
    }

    /// Page sizes offered in the page size menu. Empty lists are ignored.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        let options: Vec<usize> = options.into_iter().filter(|&n| n > 0).collect();
        if !options.is_empty() {
            self.page_size_options = options;
        }
        self
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.page_size = size;
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_no_results_message(mut self, message: impl Into<String>) -> Self {
        self.no_results_message = message.into();
        self
    }

    /// Field holding each row's identity. Re-resolves row keys.
    pub fn with_row_id_key(mut self, key: impl Into<String>) -> Self {
        self.row_id_key = key.into();
        let rows = self.rows.drain(..).map(|r| r.row).collect();
        self.selection.clear();
        self.set_rows(rows);
        self
    }

    /// Number of card grid columns, clamped to 1..=4.
    pub fn with_card_grid_cols(mut self, cols: u8) -> Self {
        self.card_grid_cols = cols.clamp(1, 4);
        self
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn on_selection_change(mut self, handler: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        self.on_selection_change = Some(Arc::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the row set.
    ///
    /// Row keys come from the row id field. Rows without one get a generated
    /// key that is stable until the next `set_rows`; selection of such rows
    /// does not survive a data refresh. Selected keys that no longer exist
    /// are dropped.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        let mut generated = 0usize;
        let mut seen = HashSet::with_capacity(rows.len());

        self.rows = rows
            .into_iter()
            .map(|row| {
                let id = row.field(&self.row_id_key);
                let key = match id {
                    Value::Null => None,
                    ref v => Some(v.to_display_string()).filter(|s| !s.is_empty()),
                };
                let key = match key {
                    Some(key) if seen.insert(key.clone()) => key,
                    _ => {
                        generated += 1;
                        Uuid::new_v4().to_string()
                    }
                };
                KeyedRow { key, row }
            })
            .collect();

        if generated > 0 {
            warn!(
                "{generated} row(s) without a unique '{}' field; selection for them is not stable across data refreshes",
                self.row_id_key
            );
        }

        let keys: HashSet<&str> = self.rows.iter().map(|r| r.key.as_str()).collect();
        self.selection.retain(|k| keys.contains(k.as_str()));
        self.clamp_page_index();
    }

    /// All rows, in data order.
    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|r| &r.row)
    }

    /// Row by key.
    pub fn row(&self, key: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.key == key).map(|r| &r.row)
    }

    /// Keys of all rows, in data order.
    pub fn row_keys(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.key.as_str()).collect()
    }

    pub fn columns(&self) -> &[DynamicColumn<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&DynamicColumn<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn actions(&self) -> &[ActionItem<T>] {
        &self.actions
    }

    pub fn show_checkbox(&self) -> bool {
        self.show_checkbox
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn no_results_message(&self) -> &str {
        &self.no_results_message
    }

    pub fn card_grid_cols(&self) -> u8 {
        self.card_grid_cols
    }

    pub fn locale(&self) -> &NumberLocale {
        &self.locale
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Active sorts, highest precedence first.
    pub fn sorting(&self) -> &[SortEntry] {
        &self.sorting
    }

    /// Sort direction of a column, if it is sorted.
    pub fn sort_direction(&self, key: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|s| s.column == key)
            .map(|s| s.direction)
    }

    /// Cycle a column ascending, descending, unsorted. Other sorts are
    /// dropped. Returns false for unknown or unsortable columns.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let Some(next) = self.next_direction(key) else {
            return false;
        };
        self.sorting.clear();
        if let Some(direction) = next {
            self.sorting.push(SortEntry {
                column: key.to_string(),
                direction,
            });
        }
        true
    }

    /// Like [`toggle_sort`](Self::toggle_sort) but keeps other sorts. A newly
    /// sorted column takes the lowest precedence.
    pub fn toggle_sort_multi(&mut self, key: &str) -> bool {
        let Some(next) = self.next_direction(key) else {
            return false;
        };
        match (self.sorting.iter().position(|s| s.column == key), next) {
            (Some(pos), Some(direction)) => self.sorting[pos].direction = direction,
            (Some(pos), None) => {
                self.sorting.remove(pos);
            }
            (None, Some(direction)) => self.sorting.push(SortEntry {
                column: key.to_string(),
                direction,
            }),
            (None, None) => {}
        }
        true
    }

    /// `None` if the column cannot be sorted, otherwise the direction after
    /// one more toggle (`Some(None)` meaning unsorted).
    fn next_direction(&self, key: &str) -> Option<Option<SortDirection>> {
        match self.column(key) {
            Some(column) if column.sortable => {}
            _ => {
                debug!("sort toggle on unsortable column '{key}' ignored");
                return None;
            }
        }
        Some(match self.sort_direction(key) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        })
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Column the search box filters on.
    pub fn search_column(&self) -> Option<&str> {
        self.search_column
            .as_deref()
            .or_else(|| self.columns.first().map(|c| c.key.as_str()))
    }

    /// Placeholder of the search box.
    pub fn search_placeholder(&self) -> String {
        if let Some(placeholder) = &self.search_placeholder {
            return placeholder.clone();
        }
        let label = self
            .search_column()
            .and_then(|key| self.column(key))
            .map(|c| c.label.to_lowercase())
            .unwrap_or_default();
        format!("Filter {label}...")
    }

    /// Point the search box at another column. The previous column's search
    /// text is dropped.
    pub fn set_search_column(&mut self, key: impl Into<String>) -> Result<(), UiError> {
        let key = key.into();
        if self.column(&key).is_none() {
            return Err(UiError::UnknownSearchColumn(key));
        }
        if self.search_column() != Some(key.as_str()) {
            if let Some(previous) = self.search_column().map(str::to_string) {
                self.set_column_filter(&previous, "");
            }
            self.search_column = Some(key);
        }
        Ok(())
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        self.search_column()
            .and_then(|key| self.filters.get(key))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Set the search text. An empty string clears the filter.
    pub fn set_search(&mut self, query: impl Into<String>) {
        if let Some(key) = self.search_column().map(str::to_string) {
            self.set_column_filter(&key, query);
        }
    }

    /// Case-insensitive substring filter on one column. An empty value
    /// removes the filter. Moves back to the first page.
    pub fn set_column_filter(&mut self, key: &str, query: impl Into<String>) {
        let query = query.into();
        let changed = if query.is_empty() {
            self.filters.remove(key).is_some()
        } else {
            self.filters.insert(key.to_string(), query.clone()) != Some(query)
        };
        if changed {
            trace!("filter on '{key}' changed");
            self.page_index = 0;
        }
    }

    pub fn column_filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    fn matches_filters(&self, row: &T) -> bool {
        self.filters.iter().all(|(key, query)| {
            row.field(key)
                .to_display_string()
                .to_lowercase()
                .contains(&query.to_lowercase())
        })
    }

    // -------------------------------------------------------------------------
    // Row model
    // -------------------------------------------------------------------------

    /// Indices into `self.rows` after filtering and sorting.
    fn sorted_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.matches_filters(&self.rows[i].row))
            .collect();
        if self.sorting.is_empty() {
            return indices;
        }

        let sort_keys: Vec<(ColumnType, &SortEntry)> = self
            .sorting
            .iter()
            .filter_map(|s| self.column(&s.column).map(|c| (c.kind, s)))
            .collect();

        indices.sort_by(|&a, &b| {
            let (ra, rb) = (&self.rows[a].row, &self.rows[b].row);
            for (kind, entry) in &sort_keys {
                let ord = compare_cells(
                    sort_value(*kind, ra.field(&entry.column)),
                    sort_value(*kind, rb.field(&entry.column)),
                    entry.direction,
                );
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        indices
    }

    /// Number of rows passing the filters.
    pub fn filtered_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| self.matches_filters(&r.row))
            .count()
    }

    /// Filtered and sorted rows across all pages.
    pub fn sorted_rows(&self) -> Vec<&T> {
        self.sorted_indices()
            .into_iter()
            .map(|i| &self.rows[i].row)
            .collect()
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<PageRow<'_, T>> {
        let start = self.page_index * self.page_size;
        self.sorted_indices()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .map(|i| {
                let keyed = &self.rows[i];
                PageRow {
                    key: &keyed.key,
                    row: &keyed.row,
                    selected: self.selection.is_selected(&keyed.key),
                }
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; at least one even when nothing matches.
    pub fn page_count(&self) -> usize {
        self.filtered_row_count().div_ceil(self.page_size).max(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Jump to a page, clamped to the valid range.
    pub fn set_page_index(&mut self, index: usize) -> bool {
        let index = index.min(self.page_count() - 1);
        let changed = index != self.page_index;
        self.page_index = index;
        changed
    }

    pub fn next_page(&mut self) -> bool {
        self.can_next_page() && self.set_page_index(self.page_index + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.can_previous_page() && self.set_page_index(self.page_index - 1)
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    pub fn last_page(&mut self) -> bool {
        self.set_page_index(self.page_count() - 1)
    }

    /// Change the page size, keeping the first row of the current page on
    /// screen.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 || size == self.page_size {
            return false;
        }
        let first_row = self.page_index * self.page_size;
        self.page_size = size;
        self.page_index = first_row / size;
        self.clamp_page_index();
        true
    }

    fn clamp_page_index(&mut self) {
        self.page_index = self.page_index.min(self.page_count() - 1);
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    /// Whether a column is shown. Columns that cannot be hidden always are.
    pub fn is_column_visible(&self, key: &str) -> bool {
        match self.column(key) {
            Some(column) if !column.can_hide() => true,
            Some(_) => self.visibility.get(key).copied().unwrap_or(true),
            None => false,
        }
    }

    /// Columns currently shown, in schema order.
    pub fn visible_columns(&self) -> Vec<&DynamicColumn<T>> {
        self.columns
            .iter()
            .filter(|c| self.is_column_visible(&c.key))
            .collect()
    }

    /// Columns listed in the visibility menu.
    pub fn hideable_columns(&self) -> Vec<&DynamicColumn<T>> {
        self.columns.iter().filter(|c| c.can_hide()).collect()
    }

    /// Flip a column's visibility. No-op for columns that cannot be hidden.
    pub fn toggle_column_visibility(&mut self, key: &str) -> bool {
        let visible = self.is_column_visible(key);
        self.set_column_visibility(key, !visible)
    }

    /// Show or hide a column. No-op for columns that cannot be hidden.
    pub fn set_column_visibility(&mut self, key: &str, visible: bool) -> bool {
        match self.column(key) {
            Some(column) if column.can_hide() => {}
            _ => return false,
        }
        if self.is_column_visible(key) == visible {
            return false;
        }
        self.visibility.insert(key.to_string(), visible);
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(&key.to_string())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected rows across all pages, in data order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.rows
            .iter()
            .filter(|r| self.selection.is_selected(&r.key))
            .map(|r| &r.row)
            .collect()
    }

    /// Toggle one row. Unknown keys are ignored.
    pub fn toggle_row(&mut self, key: &str) -> bool {
        if self.row(key).is_none() {
            return false;
        }
        let changed = self.selection.toggle(key.to_string());
        if changed {
            self.notify_selection();
        }
        changed
    }

    /// Header checkbox state for the current page.
    pub fn page_selection_state(&self) -> CheckState {
        let page = self.page_rows();
        let selected = page.iter().filter(|r| r.selected).count();
        if page.is_empty() || selected == 0 {
            CheckState::Unchecked
        } else if selected == page.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Select every row on the current page, or clear them if all already
    /// are. Rows on other pages keep their selection.
    pub fn toggle_all_page_rows(&mut self) -> bool {
        let select = self.page_selection_state() != CheckState::Checked;
        let keys: Vec<String> = self.page_rows().iter().map(|r| r.key.to_string()).collect();
        let mut changed = false;
        for key in keys {
            changed |= self.selection.set(key, select);
        }
        if changed {
            self.notify_selection();
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.notify_selection();
        }
        changed
    }

    fn notify_selection(&self) {
        if let Some(handler) = &self.on_selection_change {
            let rows: Vec<T> = self.selected_rows().into_iter().cloned().collect();
            handler(&rows);
        }
    }

    // -------------------------------------------------------------------------
    // View mode
    // -------------------------------------------------------------------------

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch presentation. Derived state is untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        let changed = self.view_mode != mode;
        self.view_mode = mode;
        changed
    }

    // -------------------------------------------------------------------------
    // Row actions
    // -------------------------------------------------------------------------

    /// Actions shown for `row`, with their index in the action list.
    pub fn visible_actions(&self, row: &T) -> Vec<(usize, &ActionItem<T>)> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, action)| !action.is_hidden(row))
            .collect()
    }

    /// Run action `index` on the row with `key`. Hidden or disabled actions
    /// do not run.
    pub fn invoke_action(&self, key: &str, index: usize) -> bool {
        let (Some(row), Some(action)) = (self.row(key), self.actions.get(index)) else {
            return false;
        };
        if action.is_hidden(row) || action.is_disabled(row) {
            debug!("action '{}' not available for row {key}", action.label);
            return false;
        }
        (action.on_click)(row);
        true
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Apply a rendered action. Returns whether anything changed or ran.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        match action {
            TableAction::ToggleSort(key) => self.toggle_sort(&key),
            TableAction::ToggleSortMulti(key) => self.toggle_sort_multi(&key),
            TableAction::SetSearch(query) => {
                let before = self.search().to_string();
                self.set_search(query);
                before != self.search()
            }
            TableAction::ToggleColumn(key) => self.toggle_column_visibility(&key),
            TableAction::ToggleRow(key) => self.toggle_row(&key),
            TableAction::ToggleAllPageRows => self.toggle_all_page_rows(),
            TableAction::FirstPage => self.first_page(),
            TableAction::PreviousPage => self.previous_page(),
            TableAction::NextPage => self.next_page(),
            TableAction::LastPage => self.last_page(),
            TableAction::SetPageSize(size) => self.set_page_size(size),
            TableAction::SetViewMode(mode) => self.set_view_mode(mode),
            TableAction::RowAction { row, index } => self.invoke_action(&row, index),
        }
    }
}

/// Value used for sorting: date columns compare parsed timestamps.
fn sort_value(kind: ColumnType, value: Value) -> Value {
    if kind.is_temporal() {
        parse_date(&value).map(Value::DateTime).unwrap_or(Value::Null)
    } else {
        value
    }
}

/// Nulls sort last in both directions.
fn compare_cells(a: Value, b: Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.sort_cmp(&b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

impl<T: TableRow> fmt::Debug for DataTableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTableState")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("sorting", &self.sorting)
            .field("filters", &self.filters)
            .field("selected", &self.selection.len())
            .field("view_mode", &self.view_mode)
            .field("page_index", &self.page_index)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
