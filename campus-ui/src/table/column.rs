//! Column schema.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::UiError;
use crate::node::Node;
use crate::style::BadgeVariant;
use crate::value::Value;

/// Cell renderer override: receives the cell value and the whole row.
pub type CellRender<T> = Arc<dyn Fn(&Value, &T) -> Node + Send + Sync>;

/// Maps a badge column's value to a badge variant.
pub type BadgeVariantFn = Arc<dyn Fn(&Value) -> BadgeVariant + Send + Sync>;

/// How a column presents its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Percentage,
    Image,
    Avatar,
    File,
    Toggle,
    Date,
    DateTime,
    Badge,
    Email,
    Link,
    /// Presentation comes entirely from the column's render override.
    Custom,
}

impl ColumnType {
    /// Numeric columns are right aligned.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ColumnType::Number | ColumnType::Currency | ColumnType::Percentage
        )
    }

    /// Date columns sort chronologically even when values are strings.
    pub fn is_temporal(self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }
}

/// A table column definition.
pub struct DynamicColumn<T> {
    /// Field read from each row.
    pub key: String,
    /// Header text.
    pub label: String,
    pub kind: ColumnType,
    /// Header click toggles sorting. Default: true.
    pub sortable: bool,
    /// Initially hidden. Default: false.
    pub hidden: bool,
    /// Listed in the visibility menu. Default: true.
    pub enable_hiding: bool,
    pub render: Option<CellRender<T>>,
    pub badge_variant: Option<BadgeVariantFn>,
    /// Currency prefix. Default: `$`.
    pub currency_symbol: Option<String>,
    /// Pixel size of image/avatar cells.
    pub image_size: Option<u16>,
    /// Text for null values.
    pub placeholder: Option<String>,
}

impl<T> DynamicColumn<T> {
    /// Create a column reading `key`, headed `label`.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            sortable: true,
            hidden: false,
            enable_hiding: true,
            render: None,
            badge_variant: None,
            currency_symbol: None,
            image_size: None,
            placeholder: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn enable_hiding(mut self, enable: bool) -> Self {
        self.enable_hiding = enable;
        self
    }

    /// Override the cell renderer.
    pub fn render(mut self, render: impl Fn(&Value, &T) -> Node + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn badge_variant(
        mut self,
        map: impl Fn(&Value) -> BadgeVariant + Send + Sync + 'static,
    ) -> Self {
        self.badge_variant = Some(Arc::new(map));
        self
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    pub fn image_size(mut self, size: u16) -> Self {
        self.image_size = Some(size);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Whether the user may hide this column.
    pub fn can_hide(&self) -> bool {
        self.enable_hiding
    }
}

impl<T> Clone for DynamicColumn<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind,
            sortable: self.sortable,
            hidden: self.hidden,
            enable_hiding: self.enable_hiding,
            render: self.render.clone(),
            badge_variant: self.badge_variant.clone(),
            currency_symbol: self.currency_symbol.clone(),
            image_size: self.image_size,
            placeholder: self.placeholder.clone(),
        }
    }
}

impl<T> fmt::Debug for DynamicColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicColumn")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("hidden", &self.hidden)
            .field("enable_hiding", &self.enable_hiding)
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// Check a schema for configuration mistakes that rendering would silently
/// absorb: an empty schema, duplicate keys, `custom` columns without a render
/// override.
pub fn validate_columns<T>(columns: &[DynamicColumn<T>]) -> Result<(), UiError> {
    if columns.is_empty() {
        return Err(UiError::EmptySchema);
    }
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(UiError::DuplicateColumn(column.key.clone()));
        }
        if column.kind == ColumnType::Custom && column.render.is_none() {
            return Err(UiError::MissingRenderer(column.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    #[test]
    fn defaults() {
        let col: DynamicColumn<Record> = DynamicColumn::new("title", "Title", ColumnType::Text);
        assert!(col.sortable);
        assert!(!col.hidden);
        assert!(col.enable_hiding);
    }

    #[test]
    fn validation_catches_schema_mistakes() {
        let empty: Vec<DynamicColumn<Record>> = Vec::new();
        assert!(matches!(validate_columns(&empty), Err(UiError::EmptySchema)));

        let dup = vec![
            DynamicColumn::<Record>::new("a", "A", ColumnType::Text),
            DynamicColumn::new("a", "A again", ColumnType::Number),
        ];
        assert!(matches!(validate_columns(&dup), Err(UiError::DuplicateColumn(k)) if k == "a"));

        let custom = vec![DynamicColumn::<Record>::new("c", "C", ColumnType::Custom)];
        assert!(matches!(validate_columns(&custom), Err(UiError::MissingRenderer(_))));

        let ok = vec![
            DynamicColumn::<Record>::new("c", "C", ColumnType::Custom)
                .render(|v, _| Node::text(v.to_display_string())),
        ];
        assert!(validate_columns(&ok).is_ok());
    }
}
