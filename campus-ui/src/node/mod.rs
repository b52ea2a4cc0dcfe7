//! Node types for the view tree.
//!
//! Components render into [`Node`] trees. A host (web renderer, terminal,
//! tests) walks the tree and turns it into something visible; interactive
//! nodes carry the [`Action`] the host sends back when they are activated.

mod text;

pub use text::render_text;

use crate::stepper::StepperAction;
use crate::style::{BadgeVariant, Size, Style, Variant};
use crate::table::TableAction;

/// An interaction emitted by a rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Stepper(StepperAction),
    Table(TableAction),
}

impl From<StepperAction> for Action {
    fn from(action: StepperAction) -> Self {
        Action::Stepper(action)
    }
}

impl From<TableAction> for Action {
    fn from(action: TableAction) -> Self {
        Action::Table(action)
    }
}

/// Tri-state checkbox value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    /// Some, but not all, of the governed items are checked.
    Indeterminate,
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// Shape of an image node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageShape {
    #[default]
    Rounded,
    Circle,
}

/// Container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// Space between children
    pub gap: u16,
    /// Push children apart to both ends
    pub spread: bool,
}

impl Layout {
    /// Layout with the given gap.
    pub fn gap(gap: u16) -> Self {
        Self { gap, spread: false }
    }

    /// Children pushed to both ends.
    pub fn spread() -> Self {
        Self {
            gap: 0,
            spread: true,
        }
    }
}

/// An entry of a dropdown menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    /// Non-interactive heading.
    Label(String),
    /// Horizontal rule.
    Separator,
    /// Clickable command.
    Command {
        label: String,
        icon: Option<String>,
        variant: Variant,
        disabled: bool,
        action: Option<Action>,
    },
    /// Checkable entry (column visibility, page size).
    Check {
        label: String,
        checked: bool,
        disabled: bool,
        action: Option<Action>,
    },
}

/// A node in the view tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// Empty node (renders nothing)
    #[default]
    Empty,

    /// Text content
    Text {
        content: String,
        style: Style,
        /// Visual clamp to this many lines; the content is never cut.
        line_clamp: Option<u8>,
    },

    /// Horizontal container
    Row { children: Vec<Node>, layout: Layout },

    /// Vertical container
    Column { children: Vec<Node>, layout: Layout },

    /// Responsive grid
    Grid { children: Vec<Node>, columns: u8 },

    /// Bordered card
    Card { children: Vec<Node>, selected: bool },

    /// Clickable button
    Button {
        label: String,
        icon: Option<String>,
        variant: Variant,
        size: Size,
        disabled: bool,
        action: Option<Action>,
    },

    /// Checkbox
    Checkbox {
        state: CheckState,
        label: Option<String>,
        disabled: bool,
        action: Option<Action>,
    },

    /// On/off switch
    Switch { on: bool, disabled: bool },

    /// Pill label
    Badge { label: String, variant: BadgeVariant },

    /// Image or avatar
    Image {
        src: String,
        size: u16,
        shape: ImageShape,
        /// Text shown when the image fails to load.
        fallback: Option<String>,
    },

    /// Hyperlink
    Link {
        href: String,
        label: String,
        icon: Option<String>,
        /// Opens in a new tab.
        external: bool,
        /// Triggers a download instead of navigation.
        download: bool,
    },

    /// Single-line text input
    Input {
        id: String,
        value: String,
        placeholder: String,
    },

    /// Dropdown menu behind a trigger button
    Menu {
        trigger: Box<Node>,
        items: Vec<MenuItem>,
    },

    /// Horizontal or vertical rule
    Separator,

    /// Mounted but not displayed
    Hidden(Box<Node>),
}

impl Node {
    /// Create an empty node
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            style: Style::new(),
            line_clamp: None,
        }
    }

    /// Create a text node with style
    pub fn text_styled(content: impl Into<String>, style: Style) -> Self {
        Self::Text {
            content: content.into(),
            style,
            line_clamp: None,
        }
    }

    /// Create a row node
    pub fn row(children: Vec<Node>) -> Self {
        Self::Row {
            children,
            layout: Layout::default(),
        }
    }

    /// Create a row node with layout
    pub fn row_with(children: Vec<Node>, layout: Layout) -> Self {
        Self::Row { children, layout }
    }

    /// Create a column node
    pub fn column(children: Vec<Node>) -> Self {
        Self::Column {
            children,
            layout: Layout::default(),
        }
    }

    /// Create a column node with layout
    pub fn column_with(children: Vec<Node>, layout: Layout) -> Self {
        Self::Column { children, layout }
    }

    /// Create a button node
    pub fn button(label: impl Into<String>, action: impl Into<Action>) -> Self {
        Self::Button {
            label: label.into(),
            icon: None,
            variant: Variant::Default,
            size: Size::Md,
            disabled: false,
            action: Some(action.into()),
        }
    }

    /// Create a checkbox node
    pub fn checkbox(state: CheckState, action: impl Into<Action>) -> Self {
        Self::Checkbox {
            state,
            label: None,
            disabled: false,
            action: Some(action.into()),
        }
    }

    /// Check if node is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Child nodes, in order.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Row { children, .. }
            | Self::Column { children, .. }
            | Self::Grid { children, .. }
            | Self::Card { children, .. } => children,
            Self::Menu { trigger, .. } | Self::Hidden(trigger) => {
                std::slice::from_ref(trigger.as_ref())
            }
            _ => &[],
        }
    }

    /// Depth-first search for the first node matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(pred))
    }

    /// Every action reachable from this node, menus included.
    pub fn actions(&self) -> Vec<Action> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions(&self, out: &mut Vec<Action>) {
        match self {
            Self::Button {
                action: Some(action),
                disabled: false,
                ..
            }
            | Self::Checkbox {
                action: Some(action),
                disabled: false,
                ..
            } => out.push(action.clone()),
            Self::Menu { items, .. } => {
                for item in items {
                    if let MenuItem::Command {
                        action: Some(action),
                        disabled: false,
                        ..
                    }
                    | MenuItem::Check {
                        action: Some(action),
                        disabled: false,
                        ..
                    } = item
                    {
                        out.push(action.clone());
                    }
                }
            }
            _ => {}
        }
        for child in self.children() {
            child.collect_actions(out);
        }
    }
}
