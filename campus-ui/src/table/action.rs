//! Per-row action menu entries.

use std::fmt;
use std::sync::Arc;

use crate::style::Variant;

/// A flag that is either fixed or computed per row.
pub enum Predicate<T> {
    Static(bool),
    Row(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Predicate<T> {
    /// Predicate computed from the row.
    pub fn row(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Predicate::Row(Arc::new(f))
    }

    /// Evaluate for `row`.
    pub fn eval(&self, row: &T) -> bool {
        match self {
            Predicate::Static(value) => *value,
            Predicate::Row(f) => f(row),
        }
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Predicate::Static(false)
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Static(value) => Predicate::Static(*value),
            Predicate::Row(f) => Predicate::Row(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Static(value) => write!(f, "Static({value})"),
            Predicate::Row(_) => f.write_str("Row(..)"),
        }
    }
}

impl<T> From<bool> for Predicate<T> {
    fn from(value: bool) -> Self {
        Predicate::Static(value)
    }
}

/// One entry in a row's action menu.
///
/// An item with `separator` set is preceded by a divider unless it is the
/// first visible entry.
pub struct ActionItem<T> {
    pub label: String,
    pub icon: Option<String>,
    pub on_click: Arc<dyn Fn(&T) + Send + Sync>,
    pub variant: Variant,
    pub separator: bool,
    pub disabled: Predicate<T>,
    pub hidden: Predicate<T>,
}

impl<T> ActionItem<T> {
    /// Create an action with a click handler.
    pub fn new(label: impl Into<String>, on_click: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            icon: None,
            on_click: Arc::new(on_click),
            variant: Variant::Default,
            separator: false,
            disabled: Predicate::default(),
            hidden: Predicate::default(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Render in the destructive variant.
    pub fn destructive(mut self) -> Self {
        self.variant = Variant::Destructive;
        self
    }

    /// Draw a divider before this entry.
    pub fn separator(mut self) -> Self {
        self.separator = true;
        self
    }

    pub fn disabled(mut self, disabled: impl Into<Predicate<T>>) -> Self {
        self.disabled = disabled.into();
        self
    }

    pub fn disabled_when(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Predicate::row(f);
        self
    }

    pub fn hidden(mut self, hidden: impl Into<Predicate<T>>) -> Self {
        self.hidden = hidden.into();
        self
    }

    pub fn hidden_when(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Predicate::row(f);
        self
    }

    pub fn is_hidden(&self, row: &T) -> bool {
        self.hidden.eval(row)
    }

    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.eval(row)
    }
}

impl<T> Clone for ActionItem<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            icon: self.icon.clone(),
            on_click: Arc::clone(&self.on_click),
            variant: self.variant,
            separator: self.separator,
            disabled: self.disabled.clone(),
            hidden: self.hidden.clone(),
        }
    }
}

impl<T> fmt::Debug for ActionItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("separator", &self.separator)
            .field("disabled", &self.disabled)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
