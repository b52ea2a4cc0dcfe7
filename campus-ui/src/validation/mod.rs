//! Form validation.
//!
//! A fluent API that checks field values against rules and reports the
//! first failure of each field. The course wizard uses it to decide whether
//! the current step may advance.
//!
//! # Example
//!
//! ```
//! use campus_ui::validation::Validator;
//!
//! let title = String::from("Rust");
//! let email = String::from("instructor@example.com");
//! let accepted = false;
//!
//! let result = Validator::new()
//!     .field(&title, "title")
//!         .required("Title is required")
//!         .min_length(5, "Title must be at least 5 characters")
//!     .field(&email, "email")
//!         .email("Please enter a valid email")
//!     .field(&accepted, "terms")
//!         .checked("You must accept the terms")
//!     .validate();
//!
//! assert!(result.is_invalid());
//! assert_eq!(result.errors().len(), 2);
//! assert!(result.error_for("email").is_none());
//! ```

mod result;
mod validatable;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use validatable::Validatable;
pub use validator::{FieldBuilder, Validator};
