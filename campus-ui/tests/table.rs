use std::sync::{Arc, Mutex};

use campus_ui::error::UiError;
use campus_ui::format::NumberLocale;
use campus_ui::node::{CheckState, MenuItem, Node, render_text};
use campus_ui::style::BadgeVariant;
use campus_ui::table::{
    ColumnType, DataTableState, DynamicColumn, SortDirection, TableAction, ViewMode, render,
    render_cell, render_pagination, render_toolbar,
};
use campus_ui::value::{Record, Value};

fn courses(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            Record::new()
                .set("id", i)
                .set("title", format!("Course {i}"))
                .set("price", (i * 10) as f64)
                .set("level", if i % 2 == 0 { "advanced" } else { "beginner" })
        })
        .collect()
}

fn columns() -> Vec<DynamicColumn<Record>> {
    vec![
        DynamicColumn::new("title", "Title", ColumnType::Text).enable_hiding(false),
        DynamicColumn::new("price", "Price", ColumnType::Currency),
        DynamicColumn::new("level", "Level", ColumnType::Badge),
    ]
}

fn cell_text(value: Value, column: &DynamicColumn<Record>) -> String {
    render_text(&render_cell(&value, &Record::new(), column, &NumberLocale::EN_US))
}

#[test]
fn test_currency_has_two_decimals_and_symbol() {
    let dollars = DynamicColumn::<Record>::new("price", "Price", ColumnType::Currency);
    assert_eq!(cell_text(99i64.into(), &dollars), "$99.00");
    assert_eq!(cell_text(1234.5.into(), &dollars), "$1,234.50");

    let euros = DynamicColumn::<Record>::new("price", "Price", ColumnType::Currency)
        .currency_symbol("€");
    assert_eq!(cell_text(5i64.into(), &euros), "€5.00");
}

#[test]
fn test_badge_without_mapping_uses_default_variant() {
    let column = DynamicColumn::<Record>::new("level", "Level", ColumnType::Badge);
    for value in [Value::from("draft"), Value::from(3i64), Value::from(true)] {
        let node = render_cell(&value, &Record::new(), &column, &NumberLocale::EN_US);
        assert!(matches!(
            node,
            Node::Badge {
                variant: BadgeVariant::Default,
                ..
            }
        ));
    }
}

#[test]
fn test_sort_cycles_back_to_unsorted() {
    let mut table = DataTableState::new(courses(3), columns());
    let original: Vec<String> = table.page_rows().iter().map(|r| r.key.to_string()).collect();

    assert!(table.toggle_sort("price"));
    assert_eq!(table.sort_direction("price"), Some(SortDirection::Ascending));
    assert!(table.toggle_sort("price"));
    assert_eq!(table.sort_direction("price"), Some(SortDirection::Descending));
    assert_eq!(table.page_rows()[0].key, "3");
    assert!(table.toggle_sort("price"));
    assert!(table.sorting().is_empty());

    let keys: Vec<String> = table.page_rows().iter().map(|r| r.key.to_string()).collect();
    assert_eq!(keys, original);
}

#[test]
fn test_multi_sort_uses_insertion_order() {
    let mut table = DataTableState::new(courses(4), columns());
    table.toggle_sort_multi("level");
    table.toggle_sort_multi("price");
    table.toggle_sort_multi("price");
    let keys: Vec<&str> = table.page_rows().iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["4", "2", "3", "1"]);
}

#[test]
fn test_empty_search_returns_all_rows() {
    let mut table = DataTableState::new(courses(12), columns());
    table.set_search("course 1");
    assert_eq!(table.filtered_row_count(), 4);
    table.set_search("");
    assert_eq!(table.filtered_row_count(), 12);
    assert_eq!(table.search(), "");
}

#[test]
fn test_view_mode_round_trip_keeps_state() {
    let mut table = DataTableState::new(courses(25), columns());
    table.toggle_sort("price");
    table.set_search("course");
    table.toggle_row("7");
    table.toggle_column_visibility("level");
    table.next_page();

    let before = (
        table.sorting().to_vec(),
        table.search().to_string(),
        table.selected_count(),
        table.page_index(),
        table.is_column_visible("level"),
    );

    assert!(table.dispatch(TableAction::SetViewMode(ViewMode::Card)));
    assert!(matches!(
        render(&table).find(&|n| matches!(n, Node::Grid { .. })),
        Some(_)
    ));
    assert!(table.dispatch(TableAction::SetViewMode(ViewMode::Table)));

    let after = (
        table.sorting().to_vec(),
        table.search().to_string(),
        table.selected_count(),
        table.page_index(),
        table.is_column_visible("level"),
    );
    assert_eq!(before, after);
}

#[test]
fn test_eight_rows_fit_one_page() {
    let mut table = DataTableState::new(courses(8), columns()).with_default_page_size(10);
    assert_eq!(table.page_count(), 1);
    assert!(!table.can_next_page());
    assert!(!table.next_page());

    let text = render_text(&render_pagination(&table));
    assert!(text.contains("Page 1 of 1"));
    assert!(text.contains("(›)"));
}

#[test]
fn test_empty_table_still_has_one_page() {
    let table = DataTableState::new(Vec::new(), columns());
    assert_eq!(table.page_count(), 1);
    assert!(render_text(&render(&table)).contains("No results."));
}

#[test]
fn test_unhideable_column_stays_visible() {
    let mut table = DataTableState::new(courses(2), columns());
    assert!(!table.toggle_column_visibility("title"));
    assert!(!table.dispatch(TableAction::ToggleColumn("title".into())));
    assert!(table.is_column_visible("title"));

    let toolbar = render_toolbar(&table);
    let Some(Node::Menu { items, .. }) = toolbar.find(&|n| matches!(n, Node::Menu { .. })) else {
        panic!("visibility menu missing");
    };
    let labels: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            MenuItem::Check { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Price", "Level"]);
}

#[test]
fn test_hidden_columns_are_seeded_once() {
    let mut table = DataTableState::new(
        courses(2),
        vec![
            DynamicColumn::new("title", "Title", ColumnType::Text),
            DynamicColumn::new("price", "Price", ColumnType::Currency).hidden(),
        ],
    );
    assert!(!table.is_column_visible("price"));
    assert!(table.toggle_column_visibility("price"));
    table.set_rows(courses(3));
    assert!(table.is_column_visible("price"));
}

#[test]
fn test_select_all_is_page_scoped() {
    let selected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&selected);
    let mut table = DataTableState::new(courses(15), columns())
        .with_checkbox(true)
        .on_selection_change(move |rows: &[Record]| {
            if let Ok(mut sink) = sink.lock() {
                *sink = rows.to_vec();
            }
        });

    table.toggle_row("12");
    assert!(table.toggle_all_page_rows());
    assert_eq!(table.selected_count(), 11);
    assert_eq!(table.page_selection_state(), CheckState::Checked);

    table.next_page();
    assert_eq!(table.page_selection_state(), CheckState::Indeterminate);

    table.previous_page();
    assert!(table.toggle_all_page_rows());
    assert_eq!(table.selected_count(), 1);
    assert_eq!(selected.lock().map(|rows| rows.len()).unwrap_or_default(), 1);
}

#[test]
fn test_selection_survives_sorting_and_paging() {
    let mut table = DataTableState::new(courses(15), columns()).with_checkbox(true);
    table.toggle_row("3");
    table.toggle_sort("price");
    table.toggle_sort("price");
    table.last_page();
    let row = table.page_rows().into_iter().find(|r| r.key == "3");
    assert!(row.is_some_and(|r| r.selected));
}

#[test]
fn test_row_id_key_controls_identity() {
    let rows = vec![
        Record::new().set("uuid", "a").set("title", "A"),
        Record::new().set("uuid", "b").set("title", "B"),
    ];
    let mut table = DataTableState::new(rows, columns()).with_row_id_key("uuid");
    assert!(table.toggle_row("b"));
    assert_eq!(table.row_keys(), vec!["a", "b"]);
}

#[test]
fn test_row_actions_respect_predicates() {
    use campus_ui::table::ActionItem;

    let archived = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&archived);
    let table = DataTableState::new(courses(2), columns()).with_actions(vec![
        ActionItem::new("Archive", move |row: &Record| {
            if let (Ok(mut log), Some(id)) = (log.lock(), row.get("id")) {
                log.push(id.to_display_string());
            }
        })
        .disabled_when(|row: &Record| row.get("level").and_then(Value::as_str) == Some("advanced")),
    ]);

    assert!(table.invoke_action("1", 0));
    assert!(!table.invoke_action("2", 0));
    assert!(!table.invoke_action("1", 5));
    assert_eq!(archived.lock().map(|l| l.clone()).unwrap_or_default(), vec!["1"]);
}

#[test]
fn test_mixed_value_column_sorts_without_panicking() {
    let rows: Vec<Record> = (0..300i64)
        .map(|i| {
            let score = match i % 6 {
                0 | 3 => Value::Int(i),
                1 | 4 => Value::from(i.to_string()),
                2 => Value::Float(f64::NAN),
                _ => Value::Float(i as f64),
            };
            Record::new().set("id", i).set("score", score)
        })
        .collect();
    let mut table = DataTableState::new(
        rows,
        vec![DynamicColumn::new("score", "Score", ColumnType::Number)],
    );

    assert!(table.toggle_sort("score"));
    let keys: Vec<&str> = table.page_rows().iter().map(|r| r.key).collect();
    assert_eq!(keys, ["0", "3", "5", "6", "9", "11", "12", "15", "17", "18"]);

    table.last_page();
    let keys: Vec<&str> = table.page_rows().iter().map(|r| r.key).collect();
    assert_eq!(keys, ["70", "73", "76", "79", "82", "85", "88", "91", "94", "97"]);

    assert!(table.toggle_sort("score"));
    table.first_page();
    assert_eq!(table.page_rows()[0].key, "97");
}

#[test]
fn test_generated_keys_survive_filtering_and_paging() {
    let rows: Vec<Record> = (1..=25i64)
        .map(|i| Record::new().set("title", format!("Course {i}")))
        .collect();
    let mut table = DataTableState::new(rows, columns()).with_checkbox(true);

    table.last_page();
    let key = table.page_rows()[0].key.to_string();
    assert_eq!(table.row(&key).and_then(|r| r.get("title")), Some(&Value::from("Course 21")));
    assert!(table.toggle_row(&key));

    table.set_search("course 2");
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.filtered_row_count(), 7);
    table.set_page_size(2);
    table.next_page();
    let row = table.page_rows().into_iter().find(|r| r.key == key);
    assert!(row.is_some_and(|r| r.selected));

    table.set_search("");
    assert!(table.is_selected(&key));
    assert_eq!(table.selected_count(), 1);
}

#[test]
fn test_unknown_search_column_keeps_default() {
    let mut table = DataTableState::new(courses(12), columns()).with_search_column("nope");
    assert_eq!(table.search_column(), Some("title"));
    table.set_search("course 1");
    assert_eq!(table.filtered_row_count(), 4);

    assert!(table.set_search_column("level").is_ok());
    assert_eq!(table.search_column(), Some("level"));
    assert!(matches!(
        table.set_search_column("nope"),
        Err(UiError::UnknownSearchColumn(key)) if key == "nope"
    ));
    assert_eq!(table.search_column(), Some("level"));
}
