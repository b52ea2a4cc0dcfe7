//! Visual tokens shared by the rendered node tree.

/// Button and menu-item emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Secondary,
    Outline,
    Ghost,
    Destructive,
}

/// Badge colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
    Success,
    Warning,
}

/// Layout direction of the stepper indicator strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Size token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    /// Gap between siblings for this size.
    pub fn gap(self) -> u16 {
        match self {
            Size::Sm => 1,
            Size::Md => 2,
            Size::Lg => 3,
        }
    }
}

/// Horizontal alignment of text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Text styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Bold text
    pub bold: bool,
    /// Muted (secondary) text colour
    pub muted: bool,
    /// Monospace font
    pub mono: bool,
    /// Horizontal alignment
    pub align: Align,
}

impl Style {
    /// Create a new empty style
    pub const fn new() -> Self {
        Self {
            bold: false,
            muted: false,
            mono: false,
            align: Align::Left,
        }
    }

    /// Set bold
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set muted
    pub const fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Set monospace
    pub const fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    /// Set alignment
    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}
