use std::sync::{Arc, Mutex};

use campus::AppConfig;
use campus::catalog::{CatalogCommand, catalog_table, product_actions, sample_products};
use campus_ui::node::{MenuItem, Node, render_text};
use campus_ui::table::{TableAction, ViewMode, render};

fn menu_for(tree: &Node, index: usize) -> Vec<(String, bool)> {
    let mut menus = Vec::new();
    collect_menus(tree, &mut menus);
    menus
        .get(index)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    MenuItem::Command { label, disabled, .. } => Some((label.clone(), *disabled)),
                    MenuItem::Separator => Some(("---".to_string(), false)),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn collect_menus(node: &Node, out: &mut Vec<Vec<MenuItem>>) {
    if let Node::Menu { items, .. } = node {
        if items.iter().any(|i| matches!(i, MenuItem::Command { .. })) {
            out.push(items.clone());
        }
    }
    for child in node.children() {
        collect_menus(child, out);
    }
}

#[test]
fn test_catalog_renders_typed_cells() {
    let config = AppConfig::default();
    let table = catalog_table(sample_products(), &config, Vec::new());
    let text = render_text(&render(&table));
    assert!(text.contains("$49.99"));
    assert!(text.contains("<published>"));
    assert!(text.contains("1520 enrolled"));
    assert!(text.contains("No students yet"));
    assert!(text.contains("No ratings"));
    assert!(text.contains("Mar 12, 2024"));
    assert!(text.contains("0 of 6 row(s) selected."));
}

#[test]
fn test_row_menus_follow_status() {
    let table = catalog_table(sample_products(), &AppConfig::default(), product_actions(|_, _| {}));
    let tree = render(&table);

    // Published: no delete.
    assert_eq!(
        menu_for(&tree, 0),
        vec![
            ("Edit".to_string(), false),
            ("Duplicate".to_string(), false),
            ("---".to_string(), false),
            ("Archive".to_string(), false),
        ]
    );
    // Archived: archive disabled, delete offered.
    assert_eq!(
        menu_for(&tree, 3),
        vec![
            ("Edit".to_string(), false),
            ("Duplicate".to_string(), false),
            ("---".to_string(), false),
            ("Archive".to_string(), true),
            ("Delete".to_string(), false),
        ]
    );
}

#[test]
fn test_row_action_reaches_handler() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut table = catalog_table(
        sample_products(),
        &AppConfig::default(),
        product_actions(move |command, product| {
            if let Ok(mut sink) = sink.lock() {
                sink.push((command, product.id));
            }
        }),
    );

    assert!(table.dispatch(TableAction::RowAction {
        row: "3".to_string(),
        index: 3,
    }));
    // Delete is hidden on published rows.
    assert!(!table.dispatch(TableAction::RowAction {
        row: "1".to_string(),
        index: 3,
    }));
    // Archive is disabled on archived rows.
    assert!(!table.dispatch(TableAction::RowAction {
        row: "4".to_string(),
        index: 2,
    }));
    assert_eq!(
        seen.lock().map(|s| s.clone()).unwrap_or_default(),
        vec![(CatalogCommand::Delete, 3)]
    );
}

#[test]
fn test_card_view_shows_same_rows() {
    let mut table = catalog_table(sample_products(), &AppConfig::default(), Vec::new());
    table.set_search("rust");
    table.toggle_sort("price");
    table.set_view_mode(ViewMode::Card);

    let tree = render(&table);
    let Some(Node::Grid { children, columns }) = tree.find(&|n| matches!(n, Node::Grid { .. }))
    else {
        panic!("card grid missing");
    };
    assert_eq!(*columns, 3);
    assert_eq!(children.len(), 2);
    let text = render_text(&tree);
    assert!(text.find("Rust for Beginners") < text.find("Async Rust in Practice"));
}
