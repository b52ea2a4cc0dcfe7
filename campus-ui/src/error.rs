//! Error types

/// Errors raised by the parts of the crate that do not render.
///
/// Rendering and navigation never fail; they degrade to placeholders. These
/// errors come from schema checks and data loading only.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A table was configured without any columns.
    #[error("column schema is empty")]
    EmptySchema,

    /// Two columns share the same key.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// A `custom` column has no render override.
    #[error("custom column '{0}' has no render function")]
    MissingRenderer(String),

    /// The search column does not name a column in the schema.
    #[error("unknown search column: {0}")]
    UnknownSearchColumn(String),

    /// Row data could not be decoded.
    #[error("invalid row data: {0}")]
    Json(#[from] serde_json::Error),
}
