//! Course-creation wizard.
//!
//! Four steps (basics, details, pricing, review) over a [`CourseDraft`]. The
//! current step's validation result drives the stepper's next/finish gate,
//! and the step index is mirrored in the page URL's `step` query parameter so
//! a reload lands on the same step.

use campus_ui::node::{Layout, Node};
use campus_ui::stepper::{NavigationBar, StepItem, StepPanel, StepperAction, StepperState};
use campus_ui::stepper::{render_indicators, render_panels};
use campus_ui::style::Style;
use campus_ui::validation::{ValidationResult, Validator};
use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::AppError;

/// Query parameter holding the step index.
pub const STEP_PARAM: &str = "step";

/// Course categories offered in the basics step.
pub const CATEGORIES: [&str; 4] = ["Development", "Design", "Business", "Marketing"];

const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basics = 0,
    Details = 1,
    Pricing = 2,
    Review = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basics,
        WizardStep::Details,
        WizardStep::Pricing,
        WizardStep::Review,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::Details => "Details",
            Self::Pricing => "Pricing",
            Self::Review => "Review",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Basics => "Title and category",
            Self::Details => "Description and instructor",
            Self::Pricing => "Price and discount",
            Self::Review => "Check and publish",
        }
    }
}

/// Form state while the wizard is open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub slug: String,
    /// Index into [`CATEGORIES`].
    pub category: Option<usize>,
    pub description: String,
    pub instructor_email: String,
    pub price: Option<Decimal>,
    /// Discount in percent.
    pub discount: Option<f64>,
    pub accept_terms: bool,
}

/// Payload submitted when the wizard finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    pub instructor_email: String,
    pub price: Decimal,
    pub discount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// The wizard: a stepper, the draft, and the current step's errors.
pub struct CourseWizard {
    stepper: StepperState,
    draft: CourseDraft,
    slug_pattern: Regex,
    result: ValidationResult,
    created: Option<NewCourse>,
}

impl CourseWizard {
    /// Open the wizard on `initial_step` (clamped).
    pub fn new(initial_step: usize) -> Result<Self, AppError> {
        let steps = WizardStep::ALL
            .iter()
            .map(|step| StepItem::new(step.index(), step.label()).description(step.description()))
            .collect();
        let stepper = StepperState::new(WizardStep::ALL.len(), initial_step, false)
            .with_steps(steps)
            .with_connectors()
            .on_step_change(|step| debug!("wizard moved to step {step}"));

        let mut wizard = Self {
            stepper,
            draft: CourseDraft::default(),
            slug_pattern: Regex::new(SLUG_PATTERN)?,
            result: ValidationResult::Valid,
            created: None,
        };
        wizard.revalidate();
        Ok(wizard)
    }

    /// Open the wizard on the step named in `url`'s query, or the first step.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let mut wizard = Self::new(0)?;
        wizard.restore_from_url(url)?;
        Ok(wizard)
    }

    pub fn stepper(&self) -> &StepperState {
        &self.stepper
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.stepper.active_step()).unwrap_or(WizardStep::Basics)
    }

    /// Course produced by the last successful finish.
    pub fn created(&self) -> Option<&NewCourse> {
        self.created.as_ref()
    }

    /// Validation result of the current step.
    pub fn validation(&self) -> &ValidationResult {
        &self.result
    }

    /// Edit the draft and re-check the current step.
    pub fn update(&mut self, edit: impl FnOnce(&mut CourseDraft)) {
        edit(&mut self.draft);
        self.revalidate();
    }

    /// Validate one step of the draft.
    pub fn validate_step(&self, step: WizardStep) -> ValidationResult {
        let d = &self.draft;
        match step {
            WizardStep::Basics => Validator::new()
                .field(&d.title, "title")
                .required("Title is required")
                .min_length(5, "Title must be at least 5 characters")
                .max_length(120, "Title must be at most 120 characters")
                .field(&d.slug, "slug")
                .required("Slug is required")
                .pattern(
                    self.slug_pattern.clone(),
                    "Use lowercase letters, digits and dashes",
                )
                .field(&d.category, "category")
                .selected("Pick a category")
                .validate(),
            WizardStep::Details => Validator::new()
                .field(&d.description, "description")
                .required("Description is required")
                .min_length(20, "Description must be at least 20 characters")
                .field(&d.instructor_email, "instructor_email")
                .required("Instructor email is required")
                .email("Enter a valid email address")
                .validate(),
            WizardStep::Pricing => Validator::new()
                .field(&d.price, "price")
                .present("Price is required")
                .range(0.0, 10_000.0, "Price must be between 0 and 10,000")
                .field(&d.discount, "discount")
                .range(0.0, 100.0, "Discount must be between 0 and 100")
                .validate(),
            WizardStep::Review => Validator::new()
                .field(&d.accept_terms, "accept_terms")
                .checked("Accept the publishing terms")
                .validate(),
        }
    }

    fn revalidate(&mut self) {
        self.result = self.validate_step(self.current_step());
        self.stepper.set_can_go_next(self.result.is_valid());
    }

    /// Apply a navigation action. Returns whether the step changed or the
    /// wizard finished. Finishing goes through [`finish`](Self::finish), so
    /// the course is available from [`created`](Self::created).
    pub fn dispatch(&mut self, action: StepperAction) -> bool {
        if action == StepperAction::Finish {
            return self.finish().is_some();
        }
        let changed = self.stepper.dispatch(action);
        self.revalidate();
        changed
    }

    pub fn next(&mut self) -> bool {
        self.dispatch(StepperAction::Next)
    }

    pub fn previous(&mut self) -> bool {
        self.dispatch(StepperAction::Previous)
    }

    /// Finish on the review step. Every step must validate.
    pub fn finish(&mut self) -> Option<NewCourse> {
        if let Some(step) = WizardStep::ALL
            .into_iter()
            .find(|&step| self.validate_step(step).is_invalid())
        {
            debug!("cannot finish, {} step is invalid", step.label());
            return None;
        }
        if !self.stepper.finish() {
            return None;
        }

        let d = &self.draft;
        let course = NewCourse {
            id: Uuid::new_v4(),
            title: d.title.trim().to_string(),
            slug: d.slug.clone(),
            category: d
                .category
                .and_then(|i| CATEGORIES.get(i))
                .map(|c| c.to_string())
                .unwrap_or_default(),
            description: d.description.trim().to_string(),
            instructor_email: d.instructor_email.clone(),
            price: d.price.unwrap_or_default().round_dp(2),
            discount: d.discount,
            created_at: Utc::now(),
        };
        info!("course '{}' created as {}", course.title, course.id);
        self.created = Some(course.clone());
        Some(course)
    }

    /// Jump to the step in `url`'s `step` parameter (clamped). A missing or
    /// non-numeric parameter leaves the step alone.
    pub fn restore_from_url(&mut self, url: &str) -> Result<(), AppError> {
        let url = Url::parse(url)?;
        let step = url
            .query_pairs()
            .find(|(key, _)| key == STEP_PARAM)
            .and_then(|(_, value)| value.parse::<usize>().ok());
        if let Some(step) = step {
            self.stepper.sync_active_step(step);
            self.revalidate();
        }
        Ok(())
    }

    /// `base` with its `step` parameter set to the current step. Other
    /// parameters are kept.
    pub fn step_url(&self, base: &str) -> Result<String, AppError> {
        let mut url = Url::parse(base)?;
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != STEP_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(STEP_PARAM, &self.stepper.active_step().to_string());
        Ok(url.into())
    }

    /// Indicators, the current step's form summary, errors and navigation.
    pub fn render(&self) -> Node {
        let panels = WizardStep::ALL
            .iter()
            .map(|&step| StepPanel::lazy(step.index(), self.render_step(step)))
            .collect();

        let errors = self
            .result
            .errors()
            .iter()
            .map(|e| Node::text_styled(format!("! {}", e.message), Style::new().muted()))
            .collect();

        Node::column_with(
            vec![
                render_indicators(&self.stepper),
                render_panels(&self.stepper, panels),
                Node::column(errors),
                NavigationBar::new()
                    .labels("Back", "Continue", "Publish")
                    .render(&self.stepper),
            ],
            Layout::gap(1),
        )
    }

    fn render_step(&self, step: WizardStep) -> Node {
        let d = &self.draft;
        let field = |label: &str, value: String| {
            Node::row(vec![
                Node::text_styled(format!("{label}:"), Style::new().bold()),
                Node::text(value),
            ])
        };
        let lines = match step {
            WizardStep::Basics => vec![
                field("Title", d.title.clone()),
                field("Slug", d.slug.clone()),
                field(
                    "Category",
                    d.category
                        .and_then(|i| CATEGORIES.get(i))
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                ),
            ],
            WizardStep::Details => vec![
                field("Description", d.description.clone()),
                field("Instructor", d.instructor_email.clone()),
            ],
            WizardStep::Pricing => vec![
                field("Price", d.price.map(|p| p.to_string()).unwrap_or_default()),
                field(
                    "Discount",
                    d.discount.map(|p| format!("{p}%")).unwrap_or_default(),
                ),
            ],
            WizardStep::Review => vec![
                field("Course", d.title.clone()),
                field("Terms accepted", if d.accept_terms { "yes" } else { "no" }.to_string()),
            ],
        };
        Node::column(lines)
    }
}
