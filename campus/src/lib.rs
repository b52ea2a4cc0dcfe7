//! Campus application layer.
//!
//! Hosts the `campus-ui` components: the admin course catalog table, the
//! course-creation wizard, the shopping cart and the payment callback check.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod payment;
pub mod wizard;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
