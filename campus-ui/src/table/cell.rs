//! Cell renderers, one per column type.
//!
//! Rendering never fails. A value that does not fit its column type is shown
//! as raw text, an unparseable date as `-`, an unmapped badge value with the
//! default variant. Mismatches are reported on the `debug` log level only.

use log::debug;

use crate::format::{
    NumberLocale, format_currency, format_date, format_datetime, format_number, format_percentage,
    parse_date,
};
use crate::node::{ImageShape, Node};
use crate::style::{Align, BadgeVariant, Style};
use crate::value::Value;

use super::column::{ColumnType, DynamicColumn};

/// Placeholder for null cells when the column sets none.
const DEFAULT_PLACEHOLDER: &str = "—";

/// Placeholder for values that do not parse as dates.
const INVALID_DATE: &str = "-";

const DEFAULT_CURRENCY: &str = "$";
const DEFAULT_AVATAR_SIZE: u16 = 32;
const DEFAULT_IMAGE_SIZE: u16 = 40;

/// Lines a text cell is clamped to.
const TEXT_LINE_CLAMP: u8 = 2;

type Renderer<T> = fn(&Value, &T, &DynamicColumn<T>, &NumberLocale) -> Node;

/// Renderer for each column type. The match is exhaustive so a new column
/// type cannot be added without a renderer.
fn renderer_for<T>(kind: ColumnType) -> Renderer<T> {
    match kind {
        ColumnType::Text => render_text,
        ColumnType::Number => render_number,
        ColumnType::Currency => render_currency,
        ColumnType::Percentage => render_percentage,
        ColumnType::Image => render_image,
        ColumnType::Avatar => render_avatar,
        ColumnType::File => render_file,
        ColumnType::Toggle => render_toggle,
        ColumnType::Date => render_date,
        ColumnType::DateTime => render_datetime,
        ColumnType::Badge => render_badge,
        ColumnType::Email => render_email,
        ColumnType::Link => render_link,
        ColumnType::Custom => render_custom,
    }
}

/// Render one cell.
///
/// A column render override always wins, even for null values. Otherwise
/// null values show the placeholder and everything else goes to the
/// renderer for the column type.
pub fn render_cell<T>(
    value: &Value,
    row: &T,
    column: &DynamicColumn<T>,
    locale: &NumberLocale,
) -> Node {
    if let Some(render) = &column.render {
        return render(value, row);
    }
    if value.is_null() {
        return placeholder(column);
    }
    renderer_for::<T>(column.kind)(value, row, column, locale)
}

fn placeholder<T>(column: &DynamicColumn<T>) -> Node {
    Node::text_styled(
        column
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        Style::new().muted(),
    )
}

fn raw<T>(value: &Value, column: &DynamicColumn<T>) -> Node {
    debug!(
        "column '{}' ({:?}) got a {} value, rendering raw",
        column.key,
        column.kind,
        value.type_name()
    );
    Node::text(value.to_display_string())
}

fn numeric(content: String) -> Node {
    Node::text_styled(content, Style::new().align(Align::Right).mono())
}

fn render_text<T>(value: &Value, _: &T, _: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    Node::Text {
        content: value.to_display_string(),
        style: Style::new(),
        line_clamp: Some(TEXT_LINE_CLAMP),
    }
}

fn render_number<T>(value: &Value, _: &T, column: &DynamicColumn<T>, locale: &NumberLocale) -> Node {
    match value.as_f64() {
        Some(v) => numeric(format_number(v, 0, 3, locale)),
        None => raw(value, column),
    }
}

fn render_currency<T>(
    value: &Value,
    _: &T,
    column: &DynamicColumn<T>,
    locale: &NumberLocale,
) -> Node {
    match value.as_f64() {
        Some(v) => {
            let symbol = column.currency_symbol.as_deref().unwrap_or(DEFAULT_CURRENCY);
            numeric(format_currency(v, symbol, locale))
        }
        None => raw(value, column),
    }
}

fn render_percentage<T>(
    value: &Value,
    _: &T,
    column: &DynamicColumn<T>,
    locale: &NumberLocale,
) -> Node {
    match value.as_f64() {
        Some(v) => numeric(format_percentage(v, locale)),
        None => raw(value, column),
    }
}

fn render_date<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    match parse_date(value) {
        Some(dt) => Node::text(format_date(&dt)),
        None => invalid_date(value, column),
    }
}

fn render_datetime<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    match parse_date(value) {
        Some(dt) => Node::text(format_datetime(&dt)),
        None => invalid_date(value, column),
    }
}

fn invalid_date<T>(value: &Value, column: &DynamicColumn<T>) -> Node {
    debug!("column '{}' could not parse {value:?} as a date", column.key);
    Node::text_styled(INVALID_DATE, Style::new().muted())
}

fn render_badge<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    let variant = column
        .badge_variant
        .as_ref()
        .map(|map| map(value))
        .unwrap_or(BadgeVariant::Default);
    Node::Badge {
        label: value.to_display_string(),
        variant,
    }
}

fn render_avatar<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    let src = value.to_display_string();
    Node::Image {
        fallback: Some(avatar_initials(&src)),
        src,
        size: column.image_size.unwrap_or(DEFAULT_AVATAR_SIZE),
        shape: ImageShape::Circle,
    }
}

fn render_image<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    Node::Image {
        src: value.to_display_string(),
        size: column.image_size.unwrap_or(DEFAULT_IMAGE_SIZE),
        shape: ImageShape::Rounded,
        fallback: None,
    }
}

fn render_file<T>(value: &Value, _: &T, _: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    let href = value.to_display_string();
    let label = last_path_segment(&href).unwrap_or_else(|| "Download".to_string());
    Node::Link {
        href,
        label,
        icon: Some("file".to_string()),
        external: false,
        download: true,
    }
}

fn render_toggle<T>(value: &Value, _: &T, _: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    Node::Switch {
        on: value.is_truthy(),
        disabled: true,
    }
}

fn render_email<T>(value: &Value, _: &T, _: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    let address = value.to_display_string();
    Node::Link {
        href: format!("mailto:{address}"),
        label: address,
        icon: Some("mail".to_string()),
        external: false,
        download: false,
    }
}

fn render_link<T>(value: &Value, _: &T, _: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    let href = value.to_display_string();
    Node::Link {
        label: href.clone(),
        href,
        icon: Some("external-link".to_string()),
        external: true,
        download: false,
    }
}

fn render_custom<T>(value: &Value, _: &T, column: &DynamicColumn<T>, _: &NumberLocale) -> Node {
    debug!("custom column '{}' has no render function", column.key);
    Node::text(value.to_display_string())
}

/// Last non-empty path segment of a URL or path, query and fragment removed.
pub fn last_path_segment(href: &str) -> Option<String> {
    let path = match url::Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Fallback initials for an avatar, derived from the file name in its URL.
///
/// `https://cdn/u/jane-doe.png` gives `JD`, `avatar.jpg` gives `AV`.
pub fn avatar_initials(src: &str) -> String {
    let Some(segment) = last_path_segment(src) else {
        return "?".to_string();
    };
    let stem = match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => segment,
    };
    let words: Vec<&str> = stem
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let initials: String = match words.as_slice() {
        [] => return "?".to_string(),
        [single] => single.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };
    initials.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    fn col(kind: ColumnType) -> DynamicColumn<Record> {
        DynamicColumn::new("field", "Field", kind)
    }

    fn render(value: Value, column: &DynamicColumn<Record>) -> Node {
        render_cell(&value, &Record::new(), column, &NumberLocale::EN_US)
    }

    fn text_of(node: &Node) -> &str {
        match node {
            Node::Text { content, .. } => content,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn override_wins_over_null() {
        let column = col(ColumnType::Number).render(|_, _| Node::text("custom"));
        assert_eq!(text_of(&render(Value::Null, &column)), "custom");
    }

    #[test]
    fn null_uses_placeholder() {
        assert_eq!(text_of(&render(Value::Null, &col(ColumnType::Text))), "—");
        let column = col(ColumnType::Text).placeholder("n/a");
        assert_eq!(text_of(&render(Value::Null, &column)), "n/a");
    }

    #[test]
    fn text_is_clamped_not_cut() {
        let long = "x".repeat(500);
        match render(Value::from(long.as_str()), &col(ColumnType::Text)) {
            Node::Text {
                content,
                line_clamp,
                ..
            } => {
                assert_eq!(content.len(), 500);
                assert_eq!(line_clamp, Some(2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn numeric_columns_degrade_to_raw_text() {
        let node = render(Value::from("free"), &col(ColumnType::Currency));
        assert_eq!(text_of(&node), "free");
        let node = render(Value::Bool(true), &col(ColumnType::Percentage));
        assert_eq!(text_of(&node), "true");
    }

    #[test]
    fn currency_uses_symbol() {
        let column = col(ColumnType::Currency).currency_symbol("€");
        assert_eq!(text_of(&render(Value::Int(1250), &column)), "€1,250.00");
    }

    #[test]
    fn number_keeps_up_to_three_decimals() {
        let node = render(Value::Float(3.14159), &col(ColumnType::Number));
        assert_eq!(text_of(&node), "3.142");
    }

    #[test]
    fn invalid_date_renders_dash() {
        assert_eq!(text_of(&render(Value::from("soon"), &col(ColumnType::Date))), "-");
        let node = render(Value::from("2024-02-29 08:30"), &col(ColumnType::DateTime));
        assert_eq!(text_of(&node), "Feb 29, 2024 08:30");
    }

    #[test]
    fn toggle_is_read_only() {
        assert_eq!(
            render(Value::Int(0), &col(ColumnType::Toggle)),
            Node::Switch {
                on: false,
                disabled: true
            }
        );
    }

    #[test]
    fn links_and_files() {
        match render(
            Value::from("https://cdn.example.com/docs/syllabus.pdf?v=2"),
            &col(ColumnType::File),
        ) {
            Node::Link { label, download, .. } => {
                assert_eq!(label, "syllabus.pdf");
                assert!(download);
            }
            other => panic!("unexpected {other:?}"),
        }
        match render(Value::from("ada@example.com"), &col(ColumnType::Email)) {
            Node::Link { href, .. } => assert_eq!(href, "mailto:ada@example.com"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn avatar_sizes_and_initials() {
        match render(Value::from("https://cdn/u/jane-doe.png"), &col(ColumnType::Avatar)) {
            Node::Image { size, fallback, .. } => {
                assert_eq!(size, 32);
                assert_eq!(fallback.as_deref(), Some("JD"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match render(Value::from("/img/cover.jpg"), &col(ColumnType::Image).image_size(64)) {
            Node::Image { size, fallback, .. } => {
                assert_eq!(size, 64);
                assert_eq!(fallback, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn initials_edge_cases() {
        assert_eq!(avatar_initials("avatar.jpg"), "AV");
        assert_eq!(avatar_initials(""), "?");
        assert_eq!(avatar_initials("https://cdn.example.com/"), "?");
    }

    #[test]
    fn custom_without_render_stringifies() {
        assert_eq!(text_of(&render(Value::Int(5), &col(ColumnType::Custom))), "5");
    }
}
