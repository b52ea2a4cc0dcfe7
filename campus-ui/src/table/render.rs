//! Rendering of the data table: toolbar, table body, card grid, pagination.

use crate::node::{CheckState, Layout, MenuItem, Node};
use crate::style::{Align, Size, Style, Variant};

use super::cell::render_cell;
use super::column::DynamicColumn;
use super::state::{DataTableState, PageRow};
use super::{SortDirection, TableAction, TableRow, ViewMode};

/// Input id of the search box.
pub const SEARCH_INPUT_ID: &str = "data-table-search";

/// Render the whole table: toolbar, body in the current view mode,
/// pagination.
pub fn render<T: TableRow>(state: &DataTableState<T>) -> Node {
    let body = match state.view_mode() {
        ViewMode::Table => render_table(state),
        ViewMode::Card => render_cards(state),
    };
    Node::column_with(
        vec![render_toolbar(state), body, render_pagination(state)],
        Layout::gap(2),
    )
}

/// Title, search box, view switch and column visibility menu.
pub fn render_toolbar<T: TableRow>(state: &DataTableState<T>) -> Node {
    let mut left = Vec::new();
    if let Some(title) = state.title() {
        left.push(Node::text_styled(title, Style::new().bold()));
    }
    if state.search_column().is_some() {
        left.push(Node::Input {
            id: SEARCH_INPUT_ID.to_string(),
            value: state.search().to_string(),
            placeholder: state.search_placeholder(),
        });
    }

    let mut right = vec![
        view_button("Table", ViewMode::Table, state.view_mode()),
        view_button("Cards", ViewMode::Card, state.view_mode()),
    ];

    let hideable = state.hideable_columns();
    if !hideable.is_empty() {
        let items = hideable
            .into_iter()
            .map(|column| MenuItem::Check {
                label: column.label.clone(),
                checked: state.is_column_visible(&column.key),
                disabled: false,
                action: Some(TableAction::ToggleColumn(column.key.clone()).into()),
            })
            .collect();
        right.push(Node::Menu {
            trigger: Box::new(ghost_button("Columns", None)),
            items,
        });
    }

    Node::row_with(
        vec![
            Node::row_with(left, Layout::gap(2)),
            Node::row_with(right, Layout::gap(1)),
        ],
        Layout::spread(),
    )
}

fn view_button(label: &str, mode: ViewMode, current: ViewMode) -> Node {
    Node::Button {
        label: label.to_string(),
        icon: None,
        variant: if mode == current {
            Variant::Secondary
        } else {
            Variant::Ghost
        },
        size: Size::Sm,
        disabled: false,
        action: (mode != current).then(|| TableAction::SetViewMode(mode).into()),
    }
}

fn ghost_button(label: &str, action: Option<TableAction>) -> Node {
    Node::Button {
        label: label.to_string(),
        icon: None,
        variant: Variant::Ghost,
        size: Size::Sm,
        disabled: false,
        action: action.map(Into::into),
    }
}

/// Header row plus one row per row of the current page.
pub fn render_table<T: TableRow>(state: &DataTableState<T>) -> Node {
    let columns = state.visible_columns();
    let page = state.page_rows();
    let has_actions = !state.actions().is_empty();

    let mut header = Vec::with_capacity(columns.len() + 2);
    if state.show_checkbox() {
        header.push(Node::checkbox(
            state.page_selection_state(),
            TableAction::ToggleAllPageRows,
        ));
    }
    header.extend(columns.iter().map(|column| header_cell(state, column)));
    if has_actions {
        header.push(Node::empty());
    }

    let mut lines = vec![Node::row_with(header, Layout::gap(2))];

    if page.is_empty() {
        lines.push(Node::text_styled(
            state.no_results_message(),
            Style::new().muted().align(Align::Center),
        ));
        return Node::column(lines);
    }

    for page_row in &page {
        let mut cells = Vec::with_capacity(columns.len() + 2);
        if state.show_checkbox() {
            cells.push(row_checkbox(page_row));
        }
        cells.extend(
            columns
                .iter()
                .map(|column| cell(state, page_row.row, column)),
        );
        if has_actions {
            cells.push(row_actions(state, page_row));
        }
        lines.push(Node::row_with(cells, Layout::gap(2)));
    }
    Node::column(lines)
}

fn header_cell<T: TableRow>(state: &DataTableState<T>, column: &DynamicColumn<T>) -> Node {
    let align = if column.kind.is_numeric() {
        Align::Right
    } else {
        Align::Left
    };
    if !column.sortable {
        return Node::text_styled(column.label.clone(), Style::new().bold().align(align));
    }
    let indicator = match state.sort_direction(&column.key) {
        Some(SortDirection::Ascending) => " ↑",
        Some(SortDirection::Descending) => " ↓",
        None => "",
    };
    ghost_button(
        &format!("{}{indicator}", column.label),
        Some(TableAction::ToggleSort(column.key.clone())),
    )
}

fn cell<T: TableRow>(state: &DataTableState<T>, row: &T, column: &DynamicColumn<T>) -> Node {
    render_cell(&row.field(&column.key), row, column, state.locale())
}

fn row_checkbox<T>(page_row: &PageRow<'_, T>) -> Node {
    Node::checkbox(
        CheckState::from(page_row.selected),
        TableAction::ToggleRow(page_row.key.to_string()),
    )
}

/// The row's action menu. Hidden actions are left out; a separator is drawn
/// before flagged actions except at the top of the menu.
fn row_actions<T: TableRow>(state: &DataTableState<T>, page_row: &PageRow<'_, T>) -> Node {
    let mut items = Vec::new();
    for (index, action) in state.visible_actions(page_row.row) {
        if action.separator && !items.is_empty() {
            items.push(MenuItem::Separator);
        }
        items.push(MenuItem::Command {
            label: action.label.clone(),
            icon: action.icon.clone(),
            variant: action.variant,
            disabled: action.is_disabled(page_row.row),
            action: Some(
                TableAction::RowAction {
                    row: page_row.key.to_string(),
                    index,
                }
                .into(),
            ),
        });
    }
    if items.is_empty() {
        return Node::empty();
    }
    Node::Menu {
        trigger: Box::new(ghost_button("⋯", None)),
        items,
    }
}

/// Card grid over the current page. Each card lists every visible column as
/// a label and its cell.
pub fn render_cards<T: TableRow>(state: &DataTableState<T>) -> Node {
    let page = state.page_rows();
    if page.is_empty() {
        return Node::text_styled(
            state.no_results_message(),
            Style::new().muted().align(Align::Center),
        );
    }

    let columns = state.visible_columns();
    let has_actions = !state.actions().is_empty();

    let cards = page
        .iter()
        .map(|page_row| {
            let mut top = Vec::new();
            if state.show_checkbox() {
                top.push(row_checkbox(page_row));
            }
            if has_actions {
                top.push(row_actions(state, page_row));
            }

            let mut children = Vec::with_capacity(columns.len() + 1);
            if !top.is_empty() {
                children.push(Node::row_with(top, Layout::spread()));
            }
            children.extend(columns.iter().map(|column| {
                Node::column(vec![
                    Node::text_styled(column.label.clone(), Style::new().muted()),
                    cell(state, page_row.row, column),
                ])
            }));
            Node::Card {
                children,
                selected: page_row.selected,
            }
        })
        .collect();

    Node::Grid {
        children: cards,
        columns: state.card_grid_cols(),
    }
}

/// Selection summary, page size menu, page position and page buttons.
pub fn render_pagination<T: TableRow>(state: &DataTableState<T>) -> Node {
    let summary = Node::text_styled(
        format!(
            "{} of {} row(s) selected.",
            state.selected_count(),
            state.filtered_row_count()
        ),
        Style::new().muted(),
    );

    let page_sizes = Node::row_with(
        vec![
            Node::text("Rows per page"),
            Node::Menu {
                trigger: Box::new(ghost_button(&state.page_size().to_string(), None)),
                items: state
                    .page_size_options()
                    .iter()
                    .map(|&size| MenuItem::Check {
                        label: size.to_string(),
                        checked: size == state.page_size(),
                        disabled: false,
                        action: Some(TableAction::SetPageSize(size).into()),
                    })
                    .collect(),
            },
        ],
        Layout::gap(1),
    );

    let position = Node::text(format!(
        "Page {} of {}",
        state.page_index() + 1,
        state.page_count()
    ));

    let can_prev = state.can_previous_page();
    let can_next = state.can_next_page();
    let buttons = Node::row_with(
        vec![
            page_button("«", TableAction::FirstPage, !can_prev),
            page_button("‹", TableAction::PreviousPage, !can_prev),
            page_button("›", TableAction::NextPage, !can_next),
            page_button("»", TableAction::LastPage, !can_next),
        ],
        Layout::gap(1),
    );

    Node::row_with(
        vec![
            summary,
            Node::row_with(vec![page_sizes, position, buttons], Layout::gap(3)),
        ],
        Layout::spread(),
    )
}

fn page_button(label: &str, action: TableAction, disabled: bool) -> Node {
    Node::Button {
        label: label.to_string(),
        icon: None,
        variant: Variant::Outline,
        size: Size::Sm,
        disabled,
        action: Some(action.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Action, render_text};
    use crate::table::{ActionItem, ColumnType};
    use crate::value::{Record, Value};

    fn state() -> DataTableState<Record> {
        let rows = vec![
            Record::new().set("id", 1i64).set("title", "Rust").set("status", "draft"),
            Record::new().set("id", 2i64).set("title", "SQL").set("status", "published"),
        ];
        DataTableState::new(
            rows,
            vec![
                DynamicColumn::new("title", "Title", ColumnType::Text),
                DynamicColumn::new("status", "Status", ColumnType::Badge).enable_hiding(false),
            ],
        )
        .with_checkbox(true)
        .with_actions(vec![
            ActionItem::new("Edit", |_: &Record| {}),
            ActionItem::new("Delete", |_: &Record| {})
                .separator()
                .destructive()
                .hidden_when(|r: &Record| {
                    r.get("status").and_then(Value::as_str) == Some("published")
                }),
        ])
    }

    fn menu_labels(node: &Node) -> Vec<String> {
        match node {
            Node::Menu { items, .. } => items
                .iter()
                .map(|item| match item {
                    MenuItem::Command { label, .. } | MenuItem::Check { label, .. } => {
                        label.clone()
                    }
                    MenuItem::Separator => "---".to_string(),
                    MenuItem::Label(label) => label.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn visibility_menu_lists_only_hideable_columns() {
        let toolbar = render_toolbar(&state());
        let menu = toolbar
            .find(&|n| matches!(n, Node::Menu { .. }))
            .map(menu_labels)
            .unwrap_or_default();
        assert_eq!(menu, vec!["Title"]);
    }

    #[test]
    fn row_menu_drops_hidden_actions_and_leading_separator() {
        let state = state();
        let page = state.page_rows();
        assert_eq!(menu_labels(&row_actions(&state, &page[0])), vec!["Edit", "---", "Delete"]);
        assert_eq!(menu_labels(&row_actions(&state, &page[1])), vec!["Edit"]);
    }

    #[test]
    fn header_shows_sort_direction() {
        let mut state = state();
        state.toggle_sort("title");
        let text = render_text(&render_table(&state));
        assert!(text.contains("[Title ↑]"));
        state.toggle_sort("title");
        assert!(render_text(&render_table(&state)).contains("[Title ↓]"));
    }

    #[test]
    fn empty_page_shows_message() {
        let mut state = state().with_no_results_message("Nothing here");
        state.set_search("zzz");
        assert!(render_text(&render_table(&state)).contains("Nothing here"));
        assert!(render_text(&render_cards(&state)).contains("Nothing here"));
    }

    #[test]
    fn cards_carry_same_row_actions() {
        let state = state().with_default_view(ViewMode::Card);
        let tree = render(&state);
        assert!(tree.find(&|n| matches!(n, Node::Grid { .. })).is_some());
        assert!(tree.actions().contains(&Action::Table(TableAction::RowAction {
            row: "1".to_string(),
            index: 1,
        })));
        assert!(tree.actions().contains(&Action::Table(TableAction::ToggleRow("2".to_string()))));
    }

    #[test]
    fn single_page_disables_forward_buttons() {
        let text = render_text(&render_pagination(&state()));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("(›)"));
        assert!(text.contains("(»)"));
        assert!(text.contains("0 of 2 row(s) selected."));
    }
}
