//! Rendering of the stepper's indicator strip, content panels and
//! navigation bar.

use crate::node::{Layout, Node};
use crate::style::{Orientation, Style, Variant};

use super::{StepItem, StepPanel, StepStatus, StepperAction, StepperState};

/// Render the step indicators, with connectors between them.
///
/// Steps without a registered [`StepItem`] get a generic "Step n" label.
pub fn render_indicators(state: &StepperState) -> Node {
    let mut children = Vec::with_capacity(state.total_steps() * 2);

    for step in 0..state.total_steps() {
        let registered = state.steps().iter().find(|s| s.step == step);
        let fallback;
        let item = match registered {
            Some(item) => item,
            None => {
                fallback = StepItem::new(step, format!("Step {}", step + 1));
                &fallback
            }
        };
        children.push(render_indicator(state, item));
        if state.has_connector_after(step) {
            children.push(Node::Separator);
        }
    }

    let layout = Layout::gap(state.size().gap());
    match state.orientation() {
        Orientation::Horizontal => Node::row_with(children, layout),
        Orientation::Vertical => Node::column_with(children, layout),
    }
}

fn render_indicator(state: &StepperState, item: &StepItem) -> Node {
    let status = state.status_of(item.step);
    let marker = match (status, item.show_check_on_complete, &item.icon) {
        (StepStatus::Completed, true, _) => "✓".to_string(),
        (_, _, Some(icon)) => icon.clone(),
        _ => (item.step + 1).to_string(),
    };

    let variant = match status {
        StepStatus::Current => Variant::Default,
        StepStatus::Completed => Variant::Secondary,
        StepStatus::Upcoming | StepStatus::Disabled => Variant::Outline,
    };
    let clickable = state.allow_jump() && status != StepStatus::Current;

    let indicator = Node::Button {
        label: format!("{marker} {}", item.label),
        icon: None,
        variant,
        size: state.size(),
        disabled: status == StepStatus::Disabled,
        action: clickable.then_some(StepperAction::GoTo(item.step).into()),
    };

    match &item.description {
        Some(description) => Node::column(vec![
            indicator,
            Node::text_styled(description.clone(), Style::new().muted()),
        ]),
        None => indicator,
    }
}

/// Render step content.
///
/// The active panel is shown. Other panels that are mounted (eager ones, and
/// lazy ones whose step has been visited) stay in the tree as hidden nodes;
/// lazy panels never visited are left out.
pub fn render_panels(state: &StepperState, panels: Vec<StepPanel>) -> Node {
    let children = panels
        .into_iter()
        .filter(|panel| panel.step == state.active_step() || state.is_mounted(panel.step, panel.mount))
        .map(|panel| {
            if panel.step == state.active_step() {
                panel.content
            } else {
                Node::Hidden(Box::new(panel.content))
            }
        })
        .collect();
    Node::column(children)
}

/// Previous / next / finish controls.
#[derive(Debug, Clone)]
pub struct NavigationBar {
    pub prev_label: String,
    pub next_label: String,
    pub finish_label: String,
    pub hide_prev: bool,
    /// Replaces the rendered previous button.
    pub prev_button: Option<Node>,
    /// Replaces the rendered next/finish button.
    pub next_button: Option<Node>,
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self {
            prev_label: "Previous".to_string(),
            next_label: "Next".to_string(),
            finish_label: "Finish".to_string(),
            hide_prev: false,
            prev_button: None,
            next_button: None,
        }
    }
}

impl NavigationBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(
        mut self,
        prev: impl Into<String>,
        next: impl Into<String>,
        finish: impl Into<String>,
    ) -> Self {
        self.prev_label = prev.into();
        self.next_label = next.into();
        self.finish_label = finish.into();
        self
    }

    pub fn hide_prev(mut self, hide: bool) -> Self {
        self.hide_prev = hide;
        self
    }

    pub fn prev_button(mut self, node: Node) -> Self {
        self.prev_button = Some(node);
        self
    }

    pub fn next_button(mut self, node: Node) -> Self {
        self.next_button = Some(node);
        self
    }

    /// Render the bar. On the last step the next button becomes the finish
    /// button; both are disabled while the gate is closed.
    pub fn render(&self, state: &StepperState) -> Node {
        let prev = if self.hide_prev {
            Node::Empty
        } else if let Some(custom) = &self.prev_button {
            custom.clone()
        } else {
            Node::Button {
                label: self.prev_label.clone(),
                icon: None,
                variant: Variant::Outline,
                size: state.size(),
                disabled: !state.previous_enabled(),
                action: Some(StepperAction::Previous.into()),
            }
        };

        let next = if let Some(custom) = &self.next_button {
            custom.clone()
        } else {
            let (label, action) = if state.is_last() {
                (&self.finish_label, StepperAction::Finish)
            } else {
                (&self.next_label, StepperAction::Next)
            };
            Node::Button {
                label: label.clone(),
                icon: None,
                variant: Variant::Default,
                size: state.size(),
                disabled: !state.next_enabled(),
                action: Some(action.into()),
            }
        };

        Node::row_with(vec![prev, next], Layout::spread())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::render_text;

    #[test]
    fn indicators_mark_completed_steps() {
        let state = StepperState::new(3, 1, false)
            .with_steps(vec![StepItem::new(0, "Basics"), StepItem::new(1, "Pricing")])
            .with_connectors();
        let text = render_text(&render_indicators(&state));
        assert_eq!(text, "[✓ Basics]  |  [2 Pricing]  |  (3 Step 3)");
    }

    #[test]
    fn last_step_shows_finish() {
        let mut state = StepperState::new(2, 1, false);
        let bar = NavigationBar::new();
        assert_eq!(render_text(&bar.render(&state)), "[Previous]  [Finish]");
        state.set_can_go_next(false);
        assert_eq!(render_text(&bar.render(&state)), "[Previous]  (Finish)");
    }

    #[test]
    fn first_step_disables_previous() {
        let state = StepperState::new(3, 0, false);
        let text = render_text(&NavigationBar::new().render(&state));
        assert_eq!(text, "(Previous)  [Next]");
        let hidden = render_text(&NavigationBar::new().hide_prev(true).render(&state));
        assert_eq!(hidden, "[Next]");
    }

    #[test]
    fn panels_hide_inactive_and_skip_unvisited_lazy() {
        let state = StepperState::new(3, 0, false);
        let node = render_panels(
            &state,
            vec![
                StepPanel::new(0, Node::text("zero")),
                StepPanel::new(1, Node::text("one")),
                StepPanel::lazy(2, Node::text("two")),
            ],
        );
        assert_eq!(node.children().len(), 2);
        assert!(matches!(node.children()[1], Node::Hidden(_)));
    }
}
