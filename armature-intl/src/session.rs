//! Request-scoped translation access
//!
//! [`Intl`] is built once from a configuration and a set of catalogs and
//! shared by every request. Per request it selects a locale and hands out
//! an [`IntlAccessor`] bound to that locale's catalog and, optionally, to a
//! namespace.

use crate::catalog::{Catalog, Lookup, resolve};
use crate::config::{IntlConfig, MissingLocalePolicy};
use crate::interpolate::{Params, interpolate};
use crate::locale::Negotiator;
use crate::selector::{AcceptLanguageSelector, Headers, LocaleSelector};
use crate::{IntlError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Name under which request middleware stores the accessor.
pub const INTL_CONTEXT_KEY: &str = "intl";

struct Inner {
    config: IntlConfig,
    catalogs: HashMap<String, Arc<Catalog>>,
    selector: Arc<dyn LocaleSelector>,
    custom_selector: bool,
    empty: Arc<Catalog>,
}

/// Shared translation service.
///
/// Cheap to clone; catalogs are never mutated after [`IntlBuilder::build`].
///
/// # Example
///
/// ```
/// use armature_intl::{Catalog, Headers, Intl, IntlConfig, Params};
///
/// let intl = Intl::builder(IntlConfig::new(["en-US", "fr-FR"], "en-US"))
///     .catalog("en-US", Catalog::from_json(r#"{"global": {"hi": "Hello {name}!"}}"#).unwrap())
///     .catalog("fr-FR", Catalog::from_json(r#"{"global": {"hi": "Bonjour {name}!"}}"#).unwrap())
///     .build()
///     .unwrap();
///
/// let mut headers = Headers::new();
/// headers.insert("accept-language".to_string(), "fr-CA,en;q=0.5".to_string());
///
/// let t = intl.scope(Some("global")).accessor(&headers).unwrap();
/// let params = Params::new().with("name", "Alice");
/// assert_eq!(t.get("hi", Some(&params)), "Bonjour Alice!");
/// assert_eq!(t.get("missing", None), "missing");
/// ```
#[derive(Clone)]
pub struct Intl {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Intl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intl")
            .field("config", &self.inner.config)
            .field("catalogs", &self.inner.catalogs.keys().collect::<Vec<_>>())
            .field("custom_selector", &self.inner.custom_selector)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Intl`].
pub struct IntlBuilder {
    config: IntlConfig,
    catalogs: HashMap<String, Catalog>,
    selector: Option<Arc<dyn LocaleSelector>>,
}

impl IntlBuilder {
    /// Add the catalog for a locale, replacing any previous one.
    pub fn catalog(mut self, locale: impl Into<String>, catalog: Catalog) -> Self {
        self.catalogs.insert(locale.into(), catalog);
        self
    }

    /// Add a catalog parsed from JSON text.
    pub fn catalog_json(self, locale: impl Into<String>, json: &str) -> Result<Self> {
        Ok(self.catalog(locale, Catalog::from_json(json)?))
    }

    /// Replace `Accept-Language` negotiation with a custom selector.
    ///
    /// Its result is trusted: it is not checked against the supported
    /// locales, only used to look up a catalog.
    pub fn selector(mut self, selector: impl LocaleSelector + 'static) -> Self {
        self.selector = Some(Arc::new(selector));
        self
    }

    /// Validate the configuration and freeze the catalogs.
    pub fn build(self) -> Result<Intl> {
        self.config.validate()?;

        for locale in self.catalogs.keys() {
            if !self.config.locales.contains(locale) {
                tracing::debug!(locale = %locale, "catalog registered for an unsupported locale");
            }
        }

        let custom_selector = self.selector.is_some();
        let selector = self.selector.unwrap_or_else(|| {
            Arc::new(AcceptLanguageSelector::new(Negotiator::new(
                self.config.locales.as_slice(),
                self.config.default_locale.clone(),
            )))
        });

        let catalogs = self
            .catalogs
            .into_iter()
            .map(|(locale, catalog)| (locale, Arc::new(catalog)))
            .collect();

        Ok(Intl {
            inner: Arc::new(Inner {
                config: self.config,
                catalogs,
                selector,
                custom_selector,
                empty: Arc::new(Catalog::new()),
            }),
        })
    }
}

impl Intl {
    /// Start building an intl service.
    pub fn builder(config: IntlConfig) -> IntlBuilder {
        IntlBuilder {
            config,
            catalogs: HashMap::new(),
            selector: None,
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &IntlConfig {
        &self.inner.config
    }

    /// Active locale for a request.
    pub fn select_locale(&self, headers: &Headers) -> String {
        self.inner.selector.select(headers)
    }

    /// Catalog serving `locale`.
    ///
    /// Falls back to the default locale's catalog, then to an empty one;
    /// under [`MissingLocalePolicy::Strict`] the last step is an error.
    pub fn catalog_for(&self, locale: &str) -> Result<Arc<Catalog>> {
        let inner = &self.inner;
        if let Some(catalog) = inner.catalogs.get(locale) {
            return Ok(Arc::clone(catalog));
        }

        let default_locale = &inner.config.default_locale;
        if let Some(catalog) = inner.catalogs.get(default_locale) {
            tracing::debug!(locale, default_locale = %default_locale, "no catalog for locale, using default locale");
            return Ok(Arc::clone(catalog));
        }

        match inner.config.missing_locale {
            MissingLocalePolicy::Strict => Err(IntlError::MissingLocale {
                locale: locale.to_string(),
            }),
            MissingLocalePolicy::Fallback => {
                tracing::warn!(locale, default_locale = %default_locale, "no catalog for locale or default locale, serving keys");
                Ok(Arc::clone(&inner.empty))
            }
        }
    }

    /// Accessor factory bound to a namespace.
    ///
    /// The namespace is not validated; see [`Intl::scope_checked`].
    pub fn scope(&self, namespace: Option<&str>) -> IntlScope {
        IntlScope {
            intl: self.clone(),
            namespace: namespace.map(Arc::from),
        }
    }

    /// Accessor factory bound to a namespace that must name a group in the
    /// default locale's catalog.
    pub fn scope_checked(&self, namespace: &str) -> Result<IntlScope> {
        let names_group = self
            .inner
            .catalogs
            .get(&self.inner.config.default_locale)
            .is_some_and(|catalog| catalog.subtree(namespace).is_some());

        if !names_group {
            return Err(IntlError::InvalidNamespace(namespace.to_string()));
        }

        Ok(self.scope(Some(namespace)))
    }

    /// Accessor without a namespace.
    pub fn accessor(&self, headers: &Headers) -> Result<IntlAccessor> {
        self.scope(None).accessor(headers)
    }

    /// Translate a key for an explicit locale, outside any request.
    pub fn translate(&self, locale: &str, key: &str, params: Option<&Params>) -> Result<String> {
        let catalog = self.catalog_for(locale)?;
        Ok(crate::interpolate::translate(&catalog, key, params))
    }

    /// Messages of the default locale that `locale`'s own catalog lacks.
    pub fn missing_keys(&self, locale: &str) -> Vec<String> {
        let inner = &self.inner;
        let Some(reference) = inner.catalogs.get(&inner.config.default_locale) else {
            return Vec::new();
        };

        match inner.catalogs.get(locale) {
            Some(catalog) => reference
                .keys()
                .into_iter()
                .filter(|key| !catalog.contains(key))
                .collect(),
            None => reference.keys(),
        }
    }
}

/// Namespace-bound accessor factory.
#[derive(Debug, Clone)]
pub struct IntlScope {
    intl: Intl,
    namespace: Option<Arc<str>>,
}

impl IntlScope {
    /// The bound namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Select the locale and catalog for a request.
    pub fn accessor(&self, headers: &Headers) -> Result<IntlAccessor> {
        let locale = self.intl.select_locale(headers);
        let catalog = self.intl.catalog_for(&locale)?;

        Ok(IntlAccessor {
            locale,
            catalog,
            namespace: self.namespace.clone(),
        })
    }
}

/// Per-request translation accessor.
#[derive(Debug, Clone)]
pub struct IntlAccessor {
    locale: String,
    catalog: Arc<Catalog>,
    namespace: Option<Arc<str>>,
}

impl IntlAccessor {
    /// Locale selected for the request.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Bound namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Translate a key.
    ///
    /// Missing keys come back as the key itself, never qualified with the
    /// namespace.
    pub fn get(&self, key: &str, params: Option<&Params>) -> String {
        match resolve(&self.catalog, self.namespace(), key) {
            Lookup::Found(message) => interpolate(message, params),
            Lookup::NotFound(path) => {
                tracing::debug!(locale = %self.locale, path = %path, "message not found");
                if self.namespace.is_some() {
                    key.to_string()
                } else {
                    interpolate(&path, params)
                }
            }
        }
    }
}
