//! Application error type.

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::payment::PaymentError;

/// Top-level error for the campus application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error(transparent)]
    Ui(#[from] campus_ui::error::UiError),

    /// A built-in validation pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
