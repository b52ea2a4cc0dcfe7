use std::collections::VecDeque;

use async_trait::async_trait;
use campus::cart::Cart;
use campus::catalog::{CatalogCommand, catalog_table, product_actions, sample_products};
use campus::payment::{
    CallbackParams, PaymentError, PaymentStatus, PaymentStatusSource, verify_callback,
};
use campus::wizard::CourseWizard;
use campus::{AppConfig, AppError, paths};
use campus_ui::node::render_text;
use campus_ui::table::{TableAction, ViewMode, render};
use log::{error, info};
use rust_decimal::Decimal;
use simplelog::{Config, WriteLogger};
use tokio::sync::Mutex;

/// Replays a fixed sequence of backend answers, then reports pending.
struct ScriptedSource {
    replies: Mutex<VecDeque<Result<PaymentStatus, PaymentError>>>,
}

#[async_trait]
impl PaymentStatusSource for ScriptedSource {
    async fn status(&self, _payment_id: &str) -> Result<PaymentStatus, PaymentError> {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(PaymentStatus::Pending))
    }
}

fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    if let Err(e) = paths::rotate_logs() {
        eprintln!("Log rotation failed: {e}");
    }
    let Some(path) = paths::log_file() else {
        eprintln!("No cache directory, logging disabled");
        return Ok(());
    };
    let log_file = paths::create_log_file(&path)?;
    WriteLogger::init(config.level_filter(), Config::default(), log_file)
        .expect("Failed to initialize logger");
    Ok(())
}

fn load_config() -> AppConfig {
    let Some(path) = paths::config_file() else {
        return AppConfig::default();
    };
    match AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring {}: {e}", path.display());
            AppConfig::default()
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    // Catalog
    let actions = product_actions(|command, product| match command {
        CatalogCommand::Delete => info!("delete requested for course {}", product.id),
        other => info!("{other:?} course {}", product.id),
    });
    let mut table = catalog_table(sample_products(), &config, actions);
    table.toggle_sort("price");
    println!("{}\n", render_text(&render(&table)));

    table.dispatch(TableAction::SetSearch("rust".to_string()));
    table.dispatch(TableAction::ToggleAllPageRows);
    table.dispatch(TableAction::SetViewMode(ViewMode::Card));
    println!("{}\n", render_text(&render(&table)));

    // Course wizard
    let mut wizard = CourseWizard::from_url("https://campus.test/courses/new?step=0")?;
    wizard.update(|d| {
        d.title = "Practical Rust Services".to_string();
        d.slug = "practical-rust-services".to_string();
        d.category = Some(0);
    });
    wizard.next();
    wizard.update(|d| {
        d.description = "Build, test and ship async services in Rust.".to_string();
        d.instructor_email = "instructor@campus.test".to_string();
    });
    wizard.next();
    wizard.update(|d| d.price = Some(Decimal::new(8900, 2)));
    wizard.next();
    wizard.update(|d| d.accept_terms = true);
    println!("{}\n", render_text(&wizard.render()));
    println!("{}", wizard.step_url("https://campus.test/courses/new")?);
    if let Some(course) = wizard.finish() {
        println!("Created: {}", serde_json::to_string_pretty(&course).unwrap_or_default());
    }

    // Checkout
    let products = sample_products();
    let mut cart = Cart::new();
    cart.add(&products[0], 1);
    cart.add(&products[4], 2);
    cart.apply_coupon("WELCOME10", Decimal::from(10))?;
    let locale = config.number_locale();
    println!(
        "\nCart: {} item(s), total {}",
        cart.item_count(),
        cart.formatted_total(&config.currency_symbol, &locale)
    );

    let params = CallbackParams::from_url(
        "https://campus.test/checkout/callback?payment_id=pay_1001&status=success",
    )?;
    let source = ScriptedSource {
        replies: Mutex::new(VecDeque::from([
            Err(PaymentError::Lookup("gateway timeout".to_string())),
            Ok(PaymentStatus::Pending),
            Ok(PaymentStatus::Succeeded),
        ])),
    };
    let outcome = verify_callback(&source, &params, &config.poll_config()).await;
    println!("Payment {}: {outcome:?}", params.payment_id);
    Ok(())
}

#[tokio::main]
async fn main() {
    let config = load_config();
    if let Err(e) = init_logging(&config) {
        eprintln!("Logging disabled: {e}");
    }
    info!("campus starting, api {}", config.api_url);

    if let Err(e) = run(config).await {
        error!("{e}");
        eprintln!("Error: {}", e);
    }
}
