//! Plain-text dump of a node tree, for logs, the demo binary and tests.

use super::{CheckState, MenuItem, Node};

/// Render a node tree as plain text.
///
/// Rows join their children on one line, columns and grids stack them.
/// Hidden nodes are skipped. Disabled buttons are drawn as `(label)`,
/// enabled ones as `[label]`.
pub fn render_text(node: &Node) -> String {
    let mut lines = Vec::new();
    write_block(node, &mut lines);
    lines.join("\n")
}

fn write_block(node: &Node, lines: &mut Vec<String>) {
    match node {
        Node::Column { children, .. } | Node::Card { children, .. } => {
            for child in children {
                write_block(child, lines);
            }
        }
        Node::Grid { children, columns } => {
            let per_row = usize::from((*columns).max(1));
            for (i, child) in children.iter().enumerate() {
                if i > 0 && i % per_row == 0 {
                    lines.push(String::new());
                }
                write_block(child, lines);
            }
        }
        Node::Hidden(_) | Node::Empty => {}
        Node::Separator => lines.push("---".to_string()),
        other => {
            let line = inline(other);
            if !line.is_empty() {
                lines.push(line);
            }
        }
    }
}

fn inline(node: &Node) -> String {
    match node {
        Node::Empty | Node::Hidden(_) => String::new(),
        Node::Text { content, .. } => content.clone(),
        Node::Row { children, .. } => children
            .iter()
            .map(inline)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("  "),
        Node::Column { children, .. } | Node::Grid { children, .. } | Node::Card { children, .. } => {
            children
                .iter()
                .map(inline)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" / ")
        }
        Node::Button {
            label, disabled, ..
        } => {
            if *disabled {
                format!("({label})")
            } else {
                format!("[{label}]")
            }
        }
        Node::Checkbox { state, label, .. } => {
            let mark = match state {
                CheckState::Checked => "[x]",
                CheckState::Unchecked => "[ ]",
                CheckState::Indeterminate => "[-]",
            };
            match label {
                Some(label) => format!("{mark} {label}"),
                None => mark.to_string(),
            }
        }
        Node::Switch { on, .. } => if *on { "(on)" } else { "(off)" }.to_string(),
        Node::Badge { label, .. } => format!("<{label}>"),
        Node::Image { src, fallback, .. } => match fallback {
            Some(initials) => format!("@{initials}"),
            None => format!("img:{src}"),
        },
        Node::Link { label, .. } => label.clone(),
        Node::Input {
            value, placeholder, ..
        } => {
            if value.is_empty() {
                format!("[{placeholder}]")
            } else {
                format!("[{value}]")
            }
        }
        Node::Menu { trigger, items } => {
            let checked: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    MenuItem::Check {
                        label,
                        checked: true,
                        ..
                    } => Some(label.as_str()),
                    _ => None,
                })
                .collect();
            let trigger = inline(trigger);
            if checked.is_empty() {
                format!("{trigger}▾")
            } else {
                format!("{trigger}▾ {}", checked.join(","))
            }
        }
        Node::Separator => "|".to_string(),
    }
}
