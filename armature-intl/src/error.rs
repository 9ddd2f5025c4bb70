//! Error types for intl operations

use thiserror::Error;

/// Errors that can occur while configuring or serving translations.
///
/// Unresolved keys are never errors: they degrade to the key itself.
#[derive(Debug, Error)]
pub enum IntlError {
    /// Construction-time misconfiguration
    #[error("Invalid intl configuration: {0}")]
    InvalidConfig(String),

    /// Selected locale has no catalog and the strict policy is active
    #[error("No catalog for locale {locale} (default locale catalog also missing)")]
    MissingLocale { locale: String },

    /// Catalog entry that is neither a string nor a mapping, or a path conflict
    #[error("Invalid catalog entry at '{path}': {reason}")]
    InvalidCatalog { path: String, reason: String },

    /// Namespace does not select a subtree
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntlError {
    pub(crate) fn invalid_catalog(path: impl Into<String>, reason: impl Into<String>) -> Self {
        IntlError::InvalidCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
