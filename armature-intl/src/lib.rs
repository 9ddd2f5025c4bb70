//! Locale Negotiation and Message Resolution for Armature
//!
//! Serves translated messages to request handlers:
//!
//! - **Locale Negotiation**: Pick the best supported locale from `Accept-Language`
//! - **Message Catalogs**: Nested, immutable message trees per locale
//! - **Namespaces**: Resolve keys relative to a catalog subtree
//! - **Interpolation**: Substitute `{name}` placeholders from parameters
//!
//! # Quick Start
//!
//! ```rust
//! use armature_intl::{Catalog, Headers, Intl, IntlConfig, Params};
//!
//! let intl = Intl::builder(IntlConfig::new(["en-US", "id-ID"], "en-US"))
//!     .catalog_json("en-US", r#"{"global": {"greeting": "Hello {name}!"}}"#)?
//!     .catalog_json("id-ID", r#"{"global": {"greeting": "Halo {name}!"}}"#)?
//!     .build()?;
//!
//! // Once per request
//! let mut headers = Headers::new();
//! headers.insert("accept-language".to_string(), "id;q=0.9,en;q=0.8".to_string());
//! let t = intl.accessor(&headers)?;
//!
//! let params = Params::new().with("name", "Budi");
//! assert_eq!(t.get("global.greeting", Some(&params)), "Halo Budi!");
//!
//! // Missing keys degrade to the key itself
//! assert_eq!(t.get("global.unknown", None), "global.unknown");
//! # Ok::<(), armature_intl::IntlError>(())
//! ```
//!
//! # Accept-Language Negotiation
//!
//! ```rust
//! use armature_intl::negotiate_locale;
//!
//! let supported = ["en-US", "fr-FR"];
//! assert_eq!(negotiate_locale(Some("fr-FR;q=0.7,en-US;q=0.9"), &supported, "fr-FR"), "en-US");
//! assert_eq!(negotiate_locale(Some("fr-CA"), &supported, "en-US"), "fr-FR");
//! ```
//!
//! # Namespaces
//!
//! ```rust
//! use armature_intl::{Headers, Intl, IntlConfig};
//!
//! let intl = Intl::builder(IntlConfig::default())
//!     .catalog_json("en-US", r#"{"errors": {"not_found": "Not found."}}"#)?
//!     .build()?;
//!
//! let errors = intl.scope_checked("errors")?;
//! let t = errors.accessor(&Headers::new())?;
//! assert_eq!(t.get("not_found", None), "Not found.");
//! assert_eq!(t.get("gone", None), "gone");
//! # Ok::<(), armature_intl::IntlError>(())
//! ```

mod catalog;
mod config;
mod error;
mod interpolate;
mod locale;
mod selector;
mod session;

pub use catalog::{Catalog, Lookup, Node, resolve};
pub use config::{IntlConfig, MissingLocalePolicy};
pub use error::IntlError;
pub use interpolate::{ParamValue, Params, interpolate, translate};
pub use locale::{
    COMMON_LOCALES, Negotiator, PreferenceEntry, negotiate_locale, parse_preferences,
};
pub use selector::{ACCEPT_LANGUAGE, AcceptLanguageSelector, Headers, LocaleSelector};
pub use session::{INTL_CONTEXT_KEY, Intl, IntlAccessor, IntlBuilder, IntlScope};

/// Result type for intl operations
pub type Result<T> = std::result::Result<T, IntlError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Catalog, Headers, Intl, IntlAccessor, IntlConfig, IntlError, LocaleSelector,
        MissingLocalePolicy, Params, Result, interpolate, negotiate_locale,
    };
}
