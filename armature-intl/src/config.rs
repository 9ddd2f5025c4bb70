//! Intl configuration
//!
//! Supported locales, the default locale and the policy applied when a
//! selected locale has no catalog.

use crate::{IntlError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Behavior when neither the selected nor the default locale has a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLocalePolicy {
    /// Serve from an empty catalog; every key resolves to itself
    #[default]
    Fallback,
    /// Fail the request with [`IntlError::MissingLocale`]
    Strict,
}

/// Intl configuration.
///
/// # Example
///
/// ```
/// use armature_intl::{IntlConfig, MissingLocalePolicy};
///
/// let config = IntlConfig::new(["en-US", "id-ID", "fr-FR"], "en-US")
///     .with_missing_locale(MissingLocalePolicy::Strict);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntlConfig {
    /// Supported locale tags; order breaks base-language ties
    pub locales: Vec<String>,
    /// Locale used when negotiation finds no match
    pub default_locale: String,
    /// Missing catalog handling
    pub missing_locale: MissingLocalePolicy,
}

impl Default for IntlConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en-US".to_string()],
            default_locale: "en-US".to_string(),
            missing_locale: MissingLocalePolicy::Fallback,
        }
    }
}

impl IntlConfig {
    /// Create a configuration with the fallback policy.
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.into(),
            missing_locale: MissingLocalePolicy::Fallback,
        }
    }

    /// Set the supported locales
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default locale
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Set the missing catalog policy
    pub fn with_missing_locale(mut self, policy: MissingLocalePolicy) -> Self {
        self.missing_locale = policy;
        self
    }

    /// Check the configuration is usable.
    ///
    /// The locale list must be non-empty and contain the default locale.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            return Err(IntlError::InvalidConfig(
                "at least one locale must be supported".to_string(),
            ));
        }

        if let Some(blank) = self.locales.iter().find(|l| l.trim().is_empty()) {
            return Err(IntlError::InvalidConfig(format!(
                "locale tags must not be blank, got {blank:?}"
            )));
        }

        if !self.locales.contains(&self.default_locale) {
            return Err(IntlError::InvalidConfig(format!(
                "default locale {} is not one of the supported locales [{}]",
                self.default_locale,
                self.locales.join(", ")
            )));
        }

        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// - `ARMATURE_INTL_LOCALES` - comma-separated supported locales
    /// - `ARMATURE_INTL_DEFAULT_LOCALE` - default locale (first locale if unset)
    /// - `ARMATURE_INTL_STRICT=1|true` - use [`MissingLocalePolicy::Strict`]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ARMATURE_INTL_LOCALES") {
            let locales: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if let Some(first) = locales.first() {
                config.default_locale = first.clone();
            }
            config.locales = locales;
        }

        if let Some(default_locale) = lookup("ARMATURE_INTL_DEFAULT_LOCALE") {
            config.default_locale = default_locale.trim().to_string();
        }

        let strict = lookup("ARMATURE_INTL_STRICT")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        if strict {
            config.missing_locale = MissingLocalePolicy::Strict;
        }

        config.validate()?;
        Ok(config)
    }
}
