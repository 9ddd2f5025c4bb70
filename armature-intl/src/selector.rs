//! Locale Selection
//!
//! Strategies for choosing the active locale of a request.

use crate::locale::Negotiator;
use std::collections::HashMap;

/// Request headers, keyed by lowercased header name.
pub type Headers = HashMap<String, String>;

/// Header read by the default selector.
pub const ACCEPT_LANGUAGE: &str = "accept-language";

/// Locale selector trait
///
/// Implement this trait to replace `Accept-Language` negotiation, e.g. to
/// read a cookie or a user profile. The returned tag is used as is: it is
/// not checked against the supported locales.
pub trait LocaleSelector: Send + Sync {
    /// Select the locale for a request
    fn select(&self, headers: &Headers) -> String;
}

impl<F> LocaleSelector for F
where
    F: Fn(&Headers) -> String + Send + Sync,
{
    fn select(&self, headers: &Headers) -> String {
        self(headers)
    }
}

/// Header-based selector
///
/// Negotiates the `accept-language` header against the supported locales.
#[derive(Debug, Clone)]
pub struct AcceptLanguageSelector {
    negotiator: Negotiator,
}

impl AcceptLanguageSelector {
    /// Create a selector from a negotiator
    ///
    /// # Examples
    ///
    /// ```
    /// use armature_intl::{AcceptLanguageSelector, Headers, LocaleSelector, Negotiator};
    ///
    /// let selector = AcceptLanguageSelector::new(Negotiator::new(&["en-US", "fr-FR"], "en-US"));
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("accept-language".to_string(), "fr-CA".to_string());
    /// assert_eq!(selector.select(&headers), "fr-FR");
    /// ```
    pub fn new(negotiator: Negotiator) -> Self {
        Self { negotiator }
    }
}

impl LocaleSelector for AcceptLanguageSelector {
    fn select(&self, headers: &Headers) -> String {
        let header = headers.get(ACCEPT_LANGUAGE).map(String::as_str);
        let locale = self.negotiator.select(header);
        tracing::debug!(header = ?header, locale, "negotiated locale");
        locale.to_string()
    }
}
