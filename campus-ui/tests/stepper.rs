use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use campus_ui::node::{Node, render_text};
use campus_ui::stepper::{
    Mount, NavigationBar, StepItem, StepPanel, StepStatus, StepperAction, StepperState,
    render_indicators, render_panels,
};

fn counting() -> (Arc<AtomicUsize>, impl Fn(usize) + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&calls);
    (calls, move |_| {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_initial_step_is_clamped() {
    for total in 1..6 {
        for initial in [total, total + 1, total * 10, usize::MAX] {
            let state = StepperState::new(total, initial, false);
            assert_eq!(state.active_step(), total - 1);
        }
    }
}

#[test]
fn test_zero_steps_becomes_one() {
    let mut state = StepperState::new(0, 3, true);
    assert_eq!(state.total_steps(), 1);
    assert_eq!(state.active_step(), 0);
    assert!(!state.next());
    assert!(state.finish());
}

#[test]
fn test_go_to_active_step_never_fires_callback() {
    let (calls, handler) = counting();
    let mut state = StepperState::new(4, 2, true).on_step_change(handler);
    assert!(!state.go_to_step(2));
    assert!(!state.click_step(2));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(state.go_to_step(0));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clicks_ignored_without_jumping() {
    let (calls, handler) = counting();
    let mut state = StepperState::new(5, 0, false).on_step_change(handler);
    assert!(!state.click_step(3));
    assert!(!state.click_step(1));
    assert!(!state.dispatch(StepperAction::GoTo(4)));
    assert_eq!(state.active_step(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.status_of(3), StepStatus::Disabled);
}

#[test]
fn test_jumping_reaches_any_step() {
    let mut state = StepperState::new(5, 0, true);
    assert!(state.click_step(4));
    assert_eq!(state.active_step(), 4);
    assert_eq!(state.status_of(2), StepStatus::Completed);
    assert!(state.click_step(1));
    assert_eq!(state.status_of(3), StepStatus::Upcoming);
}

#[test]
fn test_next_and_previous_bounds() {
    let mut state = StepperState::new(3, 0, false);
    assert!(!state.previous());
    assert!(state.next());
    assert!(state.next());
    assert!(!state.next());
    assert_eq!(state.active_step(), 2);
    assert!(state.previous());
    assert_eq!(state.active_step(), 1);
}

#[test]
fn test_gate_blocks_next_and_finish() {
    let finished = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&finished);
    let mut state = StepperState::new(2, 0, false)
        .with_can_go_next(false)
        .on_finish(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert!(!state.next());
    state.set_can_go_next(true);
    assert!(state.next());
    state.set_can_go_next(false);
    assert!(!state.finish());
    state.set_can_go_next(true);
    assert!(state.finish());
    assert_eq!(finished.load(Ordering::SeqCst), 1);
    assert!(state.previous());
}

#[test]
fn test_sync_active_step_is_silent() {
    let (calls, handler) = counting();
    let mut state = StepperState::new(4, 0, false).on_step_change(handler);
    state.sync_active_step(9);
    assert_eq!(state.active_step(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_navigation_bar_swaps_next_for_finish() {
    let mut state = StepperState::new(2, 0, false);
    let bar = NavigationBar::new();
    assert_eq!(render_text(&bar.render(&state)), "(Previous)  [Next]");
    state.next();
    assert_eq!(render_text(&bar.render(&state)), "[Previous]  [Finish]");
    state.set_can_go_next(false);
    assert_eq!(render_text(&bar.render(&state)), "[Previous]  (Finish)");
}

#[test]
fn test_indicators_mark_completed_steps() {
    let state = StepperState::new(3, 1, false)
        .with_steps(vec![
            StepItem::new(0, "Basics"),
            StepItem::new(1, "Details").icon("pencil"),
        ])
        .with_connectors();
    let text = render_text(&render_indicators(&state));
    assert_eq!(text, "[✓ Basics]  |  [pencil Details]  |  (3 Step 3)");
}

#[test]
fn test_lazy_panels_mount_on_first_visit() {
    let mut state = StepperState::new(3, 0, true);
    let panels = || {
        vec![
            StepPanel::new(0, Node::text("zero")),
            StepPanel::lazy(1, Node::text("one")),
            StepPanel::lazy(2, Node::text("two")),
        ]
    };
    assert_eq!(render_panels(&state, panels()).children().len(), 1);

    state.go_to_step(2);
    state.go_to_step(0);
    let tree = render_panels(&state, panels());
    assert_eq!(tree.children().len(), 2);
    assert!(matches!(tree.children()[1], Node::Hidden(_)));
    assert!(state.is_mounted(2, Mount::Lazy));
    assert!(!state.is_mounted(1, Mount::Lazy));
}
