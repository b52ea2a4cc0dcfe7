//! Course catalog rows and the admin table schema.

use std::fmt;
use std::sync::Arc;

use campus_ui::node::Node;
use campus_ui::style::{BadgeVariant, Style};
use campus_ui::table::{ActionItem, ColumnType, DataTableState, DynamicColumn, TableRow};
use campus_ui::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Publication state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course as listed in the admin catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub thumbnail: Option<String>,
    pub instructor_avatar: Option<String>,
    pub price: Decimal,
    /// Discount in percent.
    pub discount: Option<Decimal>,
    pub rating: Option<f64>,
    pub enrolled: u32,
    pub status: ProductStatus,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub syllabus: Option<String>,
    pub support_email: Option<String>,
    pub landing_url: Option<String>,
}

impl Product {
    /// Price after discount, rounded to cents.
    pub fn effective_price(&self) -> Decimal {
        match self.discount {
            Some(pct) if pct > Decimal::ZERO => {
                let factor = (Decimal::ONE_HUNDRED - pct.min(Decimal::ONE_HUNDRED)) / Decimal::ONE_HUNDRED;
                (self.price * factor).round_dp(2)
            }
            _ => self.price,
        }
    }
}

impl TableRow for Product {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Int(i64::try_from(self.id).unwrap_or(i64::MAX)),
            "title" => self.title.clone().into(),
            "thumbnail" => self.thumbnail.clone().into(),
            "instructor_avatar" => self.instructor_avatar.clone().into(),
            "price" => self.price.into(),
            "discount" => self.discount.and_then(|d| d.to_f64()).into(),
            "rating" => self.rating.into(),
            "enrolled" => self.enrolled.into(),
            "status" => self.status.as_str().into(),
            "published" => self.published.into(),
            "created_at" => self.created_at.into(),
            "syllabus" => self.syllabus.clone().into(),
            "support_email" => self.support_email.clone().into(),
            "landing_url" => self.landing_url.clone().into(),
            _ => Value::Null,
        }
    }
}

/// Parse a product list from JSON.
pub fn load_products(json: &str) -> Result<Vec<Product>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Badge colour for a status cell.
pub fn status_badge(value: &Value) -> BadgeVariant {
    match value.as_str() {
        Some("published") => BadgeVariant::Success,
        Some("draft") => BadgeVariant::Warning,
        Some("archived") => BadgeVariant::Secondary,
        _ => BadgeVariant::Default,
    }
}

/// Column schema of the admin catalog.
pub fn product_columns(config: &AppConfig) -> Vec<DynamicColumn<Product>> {
    vec![
        DynamicColumn::new("thumbnail", "", ColumnType::Image)
            .sortable(false)
            .enable_hiding(false)
            .image_size(48),
        DynamicColumn::new("title", "Title", ColumnType::Text).enable_hiding(false),
        DynamicColumn::new("instructor_avatar", "Instructor", ColumnType::Avatar).sortable(false),
        DynamicColumn::new("price", "Price", ColumnType::Currency)
            .currency_symbol(config.currency_symbol.clone()),
        DynamicColumn::new("discount", "Discount", ColumnType::Percentage).hidden(),
        DynamicColumn::new("rating", "Rating", ColumnType::Number).placeholder("No ratings"),
        DynamicColumn::new("enrolled", "Students", ColumnType::Custom).render(|value, _| {
            match value.as_f64() {
                Some(n) if n > 0.0 => Node::text(format!("{} enrolled", value.to_display_string())),
                _ => Node::text_styled("No students yet", Style::new().muted()),
            }
        }),
        DynamicColumn::new("status", "Status", ColumnType::Badge).badge_variant(status_badge),
        DynamicColumn::new("published", "Live", ColumnType::Toggle),
        DynamicColumn::new("created_at", "Created", ColumnType::Date),
        DynamicColumn::new("syllabus", "Syllabus", ColumnType::File)
            .sortable(false)
            .hidden(),
        DynamicColumn::new("support_email", "Support", ColumnType::Email).hidden(),
        DynamicColumn::new("landing_url", "Landing page", ColumnType::Link)
            .sortable(false)
            .hidden(),
    ]
}

/// Row action picked from the catalog's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCommand {
    Edit,
    Duplicate,
    Archive,
    Delete,
}

/// Row actions of the admin catalog. `handler` receives the command and the
/// row it was picked on.
pub fn product_actions(
    handler: impl Fn(CatalogCommand, &Product) + Send + Sync + 'static,
) -> Vec<ActionItem<Product>> {
    let handler = Arc::new(handler);
    let on = |command: CatalogCommand| {
        let handler = Arc::clone(&handler);
        move |product: &Product| handler(command, product)
    };

    vec![
        ActionItem::new("Edit", on(CatalogCommand::Edit)).icon("pencil"),
        ActionItem::new("Duplicate", on(CatalogCommand::Duplicate)).icon("copy"),
        ActionItem::new("Archive", on(CatalogCommand::Archive))
            .icon("archive")
            .separator()
            .disabled_when(|p: &Product| p.status == ProductStatus::Archived),
        ActionItem::new("Delete", on(CatalogCommand::Delete))
            .icon("trash")
            .destructive()
            .hidden_when(|p: &Product| p.status == ProductStatus::Published),
    ]
}

/// The admin catalog table, configured from `config`.
pub fn catalog_table(
    products: Vec<Product>,
    config: &AppConfig,
    actions: Vec<ActionItem<Product>>,
) -> DataTableState<Product> {
    DataTableState::new(products, product_columns(config))
        .with_actions(actions)
        .with_checkbox(true)
        .with_title("Courses")
        .with_search_column("title")
        .with_search_placeholder("Search courses...")
        .with_no_results_message("No courses found.")
        .with_page_size_options(config.page_size_options.clone())
        .with_default_page_size(config.page_size)
        .with_card_grid_cols(config.card_grid_cols)
        .with_locale(config.number_locale())
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// A small fixed catalog for the demo binary and tests.
pub fn sample_products() -> Vec<Product> {
    let course = |id: u64, title: &str, price: i64, status: ProductStatus| Product {
        id,
        title: title.to_string(),
        thumbnail: Some(format!("https://cdn.campus.test/courses/{id}.jpg")),
        instructor_avatar: Some(format!("https://cdn.campus.test/avatars/instructor-{id}.png")),
        price: Decimal::new(price, 2),
        discount: None,
        rating: None,
        enrolled: 0,
        status,
        published: status == ProductStatus::Published,
        created_at: date(2024, 1, 1),
        syllabus: None,
        support_email: Some("support@campus.test".to_string()),
        landing_url: Some(format!("https://campus.test/courses/{id}")),
    };

    vec![
        Product {
            discount: Some(Decimal::from(20)),
            rating: Some(4.8),
            enrolled: 1520,
            created_at: date(2024, 3, 12),
            syllabus: Some("https://cdn.campus.test/syllabi/rust-basics.pdf".to_string()),
            ..course(1, "Rust for Beginners", 4999, ProductStatus::Published)
        },
        Product {
            rating: Some(4.5),
            enrolled: 830,
            created_at: date(2024, 5, 2),
            ..course(2, "Async Rust in Practice", 7900, ProductStatus::Published)
        },
        Product {
            created_at: date(2024, 9, 20),
            ..course(3, "SQL Fundamentals", 2900, ProductStatus::Draft)
        },
        Product {
            rating: Some(3.9),
            enrolled: 210,
            created_at: date(2023, 11, 8),
            ..course(4, "Legacy Web Forms", 1900, ProductStatus::Archived)
        },
        Product {
            discount: Some(Decimal::new(125, 1)),
            rating: Some(4.9),
            enrolled: 2045,
            created_at: date(2024, 7, 30),
            ..course(5, "Designing Data Systems", 12900, ProductStatus::Published)
        },
        Product {
            thumbnail: None,
            created_at: date(2024, 10, 1),
            ..course(6, "Intro to Statistics", 0, ProductStatus::Draft)
        },
    ]
}
