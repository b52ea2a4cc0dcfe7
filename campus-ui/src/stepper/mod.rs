//! Stepper - a numbered sequence of steps with gated navigation.
//!
//! [`StepperState`] is owned by the hosting view and passed to the render
//! functions by reference. It tracks the active step, which steps have been
//! visited (for lazy mounting), and the registered step items.
//!
//! # Example
//!
//! ```
//! use campus_ui::stepper::{StepItem, StepperState};
//!
//! let mut stepper = StepperState::new(3, 0, false)
//!     .with_steps(vec![
//!         StepItem::new(0, "Basics"),
//!         StepItem::new(1, "Pricing"),
//!         StepItem::new(2, "Review"),
//!     ]);
//!
//! assert!(stepper.next());
//! assert_eq!(stepper.active_step(), 1);
//! assert!(!stepper.go_to_step(5));
//! ```

mod render;
mod state;

pub use render::{NavigationBar, render_indicators, render_panels};
pub use state::{FinishHandler, StepChangeHandler, StepperState};

/// Navigation requests emitted by stepper nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepperAction {
    /// Indicator click on the given step.
    GoTo(usize),
    Next,
    Previous,
    Finish,
}

/// Interaction state of a single step relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepStatus {
    /// Index below the active step.
    Completed,
    /// The active step.
    Current,
    /// Index above the active step, reachable by indicator click.
    Upcoming,
    /// Index above the active step while jumping is off.
    Disabled,
}

/// Registration of one step's indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepItem {
    /// Zero-based step index.
    pub step: usize,
    /// Indicator label.
    pub label: String,
    /// Secondary line under the label.
    pub description: Option<String>,
    /// Icon name shown instead of the step number.
    pub icon: Option<String>,
    /// Replace the number with a check mark once completed.
    pub show_check_on_complete: bool,
}

impl StepItem {
    /// Create a step item.
    pub fn new(step: usize, label: impl Into<String>) -> Self {
        Self {
            step,
            label: label.into(),
            description: None,
            icon: None,
            show_check_on_complete: true,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Keep the number (or icon) on completed steps.
    pub fn without_check(mut self) -> Self {
        self.show_check_on_complete = false;
        self
    }
}

/// When a step's content panel enters the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mount {
    /// Always in the tree, hidden while inactive.
    #[default]
    Eager,
    /// Enters the tree the first time the step is active, then stays.
    Lazy,
}

/// Content of one step.
#[derive(Debug, Clone)]
pub struct StepPanel {
    pub step: usize,
    pub mount: Mount,
    pub content: crate::node::Node,
}

impl StepPanel {
    /// Eagerly mounted panel.
    pub fn new(step: usize, content: crate::node::Node) -> Self {
        Self {
            step,
            mount: Mount::Eager,
            content,
        }
    }

    /// Lazily mounted panel.
    pub fn lazy(step: usize, content: crate::node::Node) -> Self {
        Self {
            step,
            mount: Mount::Lazy,
            content,
        }
    }
}
