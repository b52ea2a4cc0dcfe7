//! Stepper state.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::style::{Orientation, Size};

use super::{Mount, StepItem, StepStatus, StepperAction};

/// Called with the new index after every step change.
pub type StepChangeHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Called when the user finishes on the last step.
pub type FinishHandler = Arc<dyn Fn() + Send + Sync>;

/// State of a stepper, owned by the hosting view.
///
/// Exactly one step is active. Steps below it are completed, steps above it
/// are upcoming (or disabled when jumping is off). Navigation never fails:
/// out-of-range or disallowed targets are ignored and reported as `false`.
pub struct StepperState {
    active_step: usize,
    total_steps: usize,
    allow_jump: bool,
    can_go_next: bool,
    orientation: Orientation,
    size: Size,
    /// Registered indicators, sorted by step index.
    steps: Vec<StepItem>,
    /// Step indices followed by a connector.
    connectors: BTreeSet<usize>,
    /// Steps that have been active at least once.
    visited: BTreeSet<usize>,
    on_step_change: Option<StepChangeHandler>,
    on_finish: Option<FinishHandler>,
}

impl StepperState {
    /// Create a stepper with `total_steps` steps.
    ///
    /// A zero step count is raised to one and `initial_step` is clamped into
    /// `0..total_steps`.
    pub fn new(total_steps: usize, initial_step: usize, allow_jump: bool) -> Self {
        if total_steps == 0 {
            warn!("stepper created with zero steps, using one");
        }
        let total_steps = total_steps.max(1);
        let active_step = initial_step.min(total_steps - 1);
        if active_step != initial_step {
            debug!("initial step {initial_step} clamped to {active_step}");
        }

        Self {
            active_step,
            total_steps,
            allow_jump,
            can_go_next: true,
            orientation: Orientation::default(),
            size: Size::default(),
            steps: Vec::new(),
            connectors: BTreeSet::new(),
            visited: BTreeSet::from([active_step]),
            on_step_change: None,
            on_finish: None,
        }
    }

    /// Register step items, replacing any registered so far.
    pub fn with_steps(mut self, steps: Vec<StepItem>) -> Self {
        self.steps.clear();
        for step in steps {
            self.register_step(step);
        }
        self
    }

    /// Draw a connector after every step but the last.
    pub fn with_connectors(mut self) -> Self {
        self.connectors = (0..self.total_steps - 1).collect();
        self
    }

    /// Set the indicator orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the size token.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the initial next/finish gate.
    pub fn with_can_go_next(mut self, can_go_next: bool) -> Self {
        self.can_go_next = can_go_next;
        self
    }

    /// Set the step-change callback.
    pub fn on_step_change(mut self, handler: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_step_change = Some(Arc::new(handler));
        self
    }

    /// Set the finish callback.
    pub fn on_finish(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_finish = Some(Arc::new(handler));
        self
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register one step indicator. A later registration for the same index
    /// replaces the earlier one; indices past the last step are ignored.
    pub fn register_step(&mut self, item: StepItem) {
        if item.step >= self.total_steps {
            warn!(
                "step {} registered on a stepper with {} steps, ignoring",
                item.step, self.total_steps
            );
            return;
        }
        match self.steps.binary_search_by_key(&item.step, |s| s.step) {
            Ok(pos) => self.steps[pos] = item,
            Err(pos) => self.steps.insert(pos, item),
        }
    }

    /// Register a connector drawn after `step`.
    pub fn register_connector(&mut self, step: usize) {
        if step + 1 < self.total_steps {
            self.connectors.insert(step);
        }
    }

    /// Registered step items, sorted by index.
    pub fn steps(&self) -> &[StepItem] {
        &self.steps
    }

    /// Whether a connector follows `step`.
    pub fn has_connector_after(&self, step: usize) -> bool {
        self.connectors.contains(&step)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn allow_jump(&self) -> bool {
        self.allow_jump
    }

    pub fn can_go_next(&self) -> bool {
        self.can_go_next
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_first(&self) -> bool {
        self.active_step == 0
    }

    pub fn is_last(&self) -> bool {
        self.active_step + 1 == self.total_steps
    }

    /// Update the next/finish gate, typically after re-validating the
    /// active step.
    pub fn set_can_go_next(&mut self, can_go_next: bool) {
        self.can_go_next = can_go_next;
    }

    /// Turn indicator jumping on or off.
    pub fn set_allow_jump(&mut self, allow_jump: bool) {
        self.allow_jump = allow_jump;
    }

    /// Status of `step` relative to the active step.
    pub fn status_of(&self, step: usize) -> StepStatus {
        if step < self.active_step {
            StepStatus::Completed
        } else if step == self.active_step {
            StepStatus::Current
        } else if self.allow_jump {
            StepStatus::Upcoming
        } else {
            StepStatus::Disabled
        }
    }

    /// Whether the previous button is enabled.
    pub fn previous_enabled(&self) -> bool {
        !self.is_first()
    }

    /// Whether the next (or finish, on the last step) button is enabled.
    pub fn next_enabled(&self) -> bool {
        self.can_go_next
    }

    /// Whether a panel for `step` with the given policy is in the tree.
    pub fn is_mounted(&self, step: usize, mount: Mount) -> bool {
        match mount {
            Mount::Eager => step < self.total_steps,
            Mount::Lazy => self.visited.contains(&step),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Move to `target`.
    ///
    /// Ignored when `target` is already active, out of range, or (with
    /// jumping off) not adjacent to the active step. Returns whether the
    /// active step changed.
    pub fn go_to_step(&mut self, target: usize) -> bool {
        if target == self.active_step {
            return false;
        }
        if target >= self.total_steps {
            debug!("step {target} out of range (total {})", self.total_steps);
            return false;
        }
        if !self.allow_jump && target.abs_diff(self.active_step) != 1 {
            debug!(
                "jump from {} to {target} refused, jumping disabled",
                self.active_step
            );
            return false;
        }
        self.activate(target);
        true
    }

    /// Advance one step. Refused on the last step or while the gate is closed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next || self.is_last() {
            return false;
        }
        self.go_to_step(self.active_step + 1)
    }

    /// Go back one step. Refused on the first step.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.go_to_step(self.active_step - 1)
    }

    /// Finish on the last step. Calls the finish callback without changing
    /// the active step.
    pub fn finish(&mut self) -> bool {
        if !self.is_last() || !self.can_go_next {
            return false;
        }
        debug!("stepper finished at step {}", self.active_step);
        if let Some(handler) = &self.on_finish {
            handler();
        }
        true
    }

    /// Indicator click. Only effective when jumping is on, in which case any
    /// step may be reached directly.
    pub fn click_step(&mut self, step: usize) -> bool {
        self.allow_jump && self.go_to_step(step)
    }

    /// Controlled-mode update from the host, e.g. after reading the step
    /// from the URL. Clamps and does not fire the change callback.
    pub fn sync_active_step(&mut self, step: usize) {
        let step = step.min(self.total_steps - 1);
        self.active_step = step;
        self.visited.insert(step);
    }

    /// Apply a rendered action.
    pub fn dispatch(&mut self, action: StepperAction) -> bool {
        match action {
            StepperAction::GoTo(step) => self.click_step(step),
            StepperAction::Next => self.next(),
            StepperAction::Previous => self.previous(),
            StepperAction::Finish => self.finish(),
        }
    }

    fn activate(&mut self, step: usize) {
        self.active_step = step;
        self.visited.insert(step);
        if let Some(handler) = &self.on_step_change {
            handler(step);
        }
    }
}

impl fmt::Debug for StepperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperState")
            .field("active_step", &self.active_step)
            .field("total_steps", &self.total_steps)
            .field("allow_jump", &self.allow_jump)
            .field("can_go_next", &self.can_go_next)
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn statuses_follow_active_step() {
        let mut stepper = StepperState::new(4, 1, false);
        assert_eq!(stepper.status_of(0), StepStatus::Completed);
        assert_eq!(stepper.status_of(1), StepStatus::Current);
        assert_eq!(stepper.status_of(2), StepStatus::Disabled);
        stepper.set_allow_jump(true);
        assert_eq!(stepper.status_of(3), StepStatus::Upcoming);
    }

    #[test]
    fn registration_keeps_steps_sorted_and_replaces() {
        let mut stepper = StepperState::new(3, 0, false);
        stepper.register_step(StepItem::new(2, "C"));
        stepper.register_step(StepItem::new(0, "A"));
        stepper.register_step(StepItem::new(0, "A2"));
        stepper.register_step(StepItem::new(9, "out"));
        let labels: Vec<&str> = stepper.steps().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A2", "C"]);
    }

    #[test]
    fn lazy_panels_stay_mounted_after_visit() {
        let mut stepper = StepperState::new(3, 0, false);
        assert!(!stepper.is_mounted(1, Mount::Lazy));
        stepper.next();
        stepper.previous();
        assert!(stepper.is_mounted(1, Mount::Lazy));
        assert!(!stepper.is_mounted(2, Mount::Lazy));
        assert!(stepper.is_mounted(2, Mount::Eager));
    }

    #[test]
    fn sync_does_not_fire_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut stepper = StepperState::new(3, 0, false).on_step_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        stepper.sync_active_step(7);
        assert_eq!(stepper.active_step(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
