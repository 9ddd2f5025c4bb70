//! Integration tests for armature-intl

use armature_intl::*;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn test_catalogs() -> Vec<(&'static str, Catalog)> {
    vec![
        (
            "en-US",
            Catalog::try_from(json!({
                "global": {
                    "welcome": "Welcome to our application!",
                    "goodbye": "Thank you for visiting!",
                    "user_greeting": "Hello {name}!",
                    "complex_message": "You have {count} new {type} in your {location}."
                },
                "errors": {
                    "not_found": "The requested resource was not found.",
                    "server_error": "An unexpected error occurred. Please try again later.",
                    "validation_error": "Field {field} is required."
                },
                "nested": { "deep": { "message": "This is a deeply nested message" } }
            }))
            .unwrap(),
        ),
        (
            "id-ID",
            Catalog::try_from(json!({
                "global": {
                    "welcome": "Selamat datang di aplikasi kami!",
                    "goodbye": "Terima kasih telah mengunjungi!",
                    "user_greeting": "Halo {name}!",
                    "complex_message": "Anda memiliki {count} {type} baru di {location} Anda."
                },
                "errors": {
                    "not_found": "Sumber daya yang diminta tidak ditemukan.",
                    "validation_error": "Field {field} wajib diisi."
                },
                "nested": { "deep": { "message": "Ini adalah pesan yang sangat dalam" } }
            }))
            .unwrap(),
        ),
        (
            "fr-FR",
            Catalog::try_from(json!({
                "global": {
                    "welcome": "Bienvenue dans notre application!",
                    "goodbye": "Merci de votre visite!",
                    "user_greeting": "Bonjour {name}!"
                },
                "errors": { "validation_error": "Le champ {field} est requis." }
            }))
            .unwrap(),
        ),
    ]
}

fn create_intl(selector: Option<fn(&Headers) -> String>) -> Intl {
    let mut builder = Intl::builder(IntlConfig::new(["en-US", "id-ID", "fr-FR"], "en-US"));
    for (locale, catalog) in test_catalogs() {
        builder = builder.catalog(locale, catalog);
    }
    if let Some(selector) = selector {
        builder = builder.selector(selector);
    }
    builder.build().unwrap()
}

fn request(accept_language: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    if let Some(value) = accept_language {
        headers.insert("accept-language".to_string(), value.to_string());
    }
    headers
}

#[test]
fn test_default_locale_without_header() {
    let intl = create_intl(None);

    let t = intl.scope(Some("global")).accessor(&request(None)).unwrap();
    assert_eq!(t.get("welcome", None), "Welcome to our application!");

    let t = intl.accessor(&request(None)).unwrap();
    assert_eq!(t.get("global.welcome", None), "Welcome to our application!");
}

#[test]
fn test_detects_locale_from_accept_language() {
    let intl = create_intl(None);
    let scope = intl.scope(Some("global"));

    let cases = [
        (Some("id-ID,id;q=0.9,en;q=0.8"), "Selamat datang di aplikasi kami!"),
        (Some("fr-FR,fr;q=0.9,en;q=0.8"), "Bienvenue dans notre application!"),
        (Some("en-US,en;q=0.9"), "Welcome to our application!"),
        (Some("de-DE,ja-JP"), "Welcome to our application!"),
        (Some("fr-CA"), "Bienvenue dans notre application!"),
        (None, "Welcome to our application!"),
    ];

    for (header, expected) in cases {
        let t = scope.accessor(&request(header)).unwrap();
        assert_eq!(t.get("welcome", None), expected, "header {header:?}");
    }
}

#[test]
fn test_custom_selector() {
    fn always_indonesian(_: &Headers) -> String {
        "id-ID".to_string()
    }

    let intl = create_intl(Some(always_indonesian as fn(&Headers) -> String));
    let t = intl.scope(Some("global")).accessor(&request(Some("fr-FR"))).unwrap();

    assert_eq!(t.get("welcome", None), "Selamat datang di aplikasi kami!");
    assert_eq!(t.get("goodbye", None), "Terima kasih telah mengunjungi!");
}

#[test]
fn test_custom_selector_receives_headers() {
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_by_selector = Arc::clone(&seen);

    let mut builder = Intl::builder(IntlConfig::new(["en-US", "id-ID", "fr-FR"], "en-US"));
    for (locale, catalog) in test_catalogs() {
        builder = builder.catalog(locale, catalog);
    }
    let intl = builder
        .selector(move |headers: &Headers| {
            seen_by_selector.fetch_add(1, Ordering::SeqCst);
            let header = headers.get(ACCEPT_LANGUAGE).map(String::as_str);
            assert_eq!(header, Some("id-ID,id;q=0.9,en;q=0.8"));
            negotiate_locale(header, &["en-US", "id-ID", "fr-FR"], "en-US").to_string()
        })
        .build()
        .unwrap();

    let t = intl
        .scope(Some("global"))
        .accessor(&request(Some("id-ID,id;q=0.9,en;q=0.8")))
        .unwrap();

    assert_eq!(t.get("welcome", None), "Selamat datang di aplikasi kami!");
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_namespaces() {
    let intl = create_intl(None);
    let headers = request(None);

    let global = intl.scope(Some("global")).accessor(&headers).unwrap();
    assert_eq!(global.get("goodbye", None), "Thank you for visiting!");

    let errors = intl.scope(Some("errors")).accessor(&headers).unwrap();
    assert_eq!(errors.get("not_found", None), "The requested resource was not found.");
    assert_eq!(
        errors.get("server_error", None),
        "An unexpected error occurred. Please try again later."
    );

    let nested = intl.scope(Some("nested")).accessor(&headers).unwrap();
    assert_eq!(nested.get("deep.message", None), "This is a deeply nested message");
    assert_eq!(nested.namespace(), Some("nested"));
}

#[test]
fn test_parameter_interpolation() {
    let intl = create_intl(None);
    let t = intl.scope(Some("global")).accessor(&request(None)).unwrap();

    let params = Params::from([("name", "John")]);
    assert_eq!(t.get("user_greeting", Some(&params)), "Hello John!");

    let params = Params::new()
        .with("count", 5)
        .with("type", "messages")
        .with("location", "inbox");
    assert_eq!(
        t.get("complex_message", Some(&params)),
        "You have 5 new messages in your inbox."
    );

    let params = Params::new().with("count", 5).with("type", "messages");
    assert_eq!(
        t.get("complex_message", Some(&params)),
        "You have 5 new messages in your {location}."
    );

    let params = Params::new()
        .with("count", 42)
        .with("type", true)
        .with("location", ParamValue::Null);
    assert_eq!(
        t.get("complex_message", Some(&params)),
        "You have 42 new true in your {location}."
    );
}

#[test]
fn test_parameters_follow_locale() {
    let intl = create_intl(None);
    let t = intl.scope(Some("errors")).accessor(&request(Some("id"))).unwrap();

    let params = Params::from([("field", "email")]);
    assert_eq!(t.get("validation_error", Some(&params)), "Field email wajib diisi.");
}

#[test]
fn test_missing_keys_degrade_to_key() {
    let intl = create_intl(None);

    let scoped = intl.scope(Some("global")).accessor(&request(None)).unwrap();
    assert_eq!(scoped.get("non_existent_key", None), "non_existent_key");

    let errors = intl.scope(Some("errors")).accessor(&request(None)).unwrap();
    assert_eq!(errors.get("x.y.z", None), "x.y.z");

    let root = intl.accessor(&request(None)).unwrap();
    assert_eq!(root.get("non_existent.nested.key", None), "non_existent.nested.key");
    assert_eq!(root.get("nested.deep", None), "nested.deep");
}

#[test]
fn test_partial_catalog_does_not_fall_back_per_key() {
    let intl = create_intl(None);
    let t = intl.scope(Some("errors")).accessor(&request(Some("fr-FR"))).unwrap();

    // fr-FR has a catalog, so its gaps are not filled from en-US
    assert_eq!(t.get("not_found", None), "not_found");
    assert_eq!(intl.missing_keys("fr-FR").len(), 4);
}

#[test]
fn test_empty_catalogs() {
    let intl = Intl::builder(IntlConfig::new(["en-US"], "en-US"))
        .build()
        .unwrap();

    let t = intl.accessor(&request(Some("en-US"))).unwrap();
    assert_eq!(t.get("any.key", None), "any.key");
}

#[test]
fn test_strict_policy() {
    let config = IntlConfig::new(["en-US", "id-ID"], "en-US")
        .with_missing_locale(MissingLocalePolicy::Strict);
    let intl = Intl::builder(config)
        .catalog("id-ID", Catalog::new().with("title", "Beranda").unwrap())
        .build()
        .unwrap();

    let t = intl.accessor(&request(Some("id-ID"))).unwrap();
    assert_eq!(t.get("title", None), "Beranda");

    let err = intl.accessor(&request(Some("en-US"))).unwrap_err();
    assert!(err.to_string().contains("en-US"));
}

#[test]
fn test_context_key() {
    assert_eq!(INTL_CONTEXT_KEY, "intl");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let intl = create_intl(None);
    let headers = [
        ("id-ID", "Selamat datang di aplikasi kami!"),
        ("fr-FR", "Bienvenue dans notre application!"),
        ("en-US", "Welcome to our application!"),
        ("ja-JP", "Welcome to our application!"),
    ];

    let mut handles = Vec::new();
    for i in 0..64 {
        let intl = intl.clone();
        let (header, expected) = headers[i % headers.len()];
        handles.push(tokio::spawn(async move {
            let t = intl.scope(Some("global")).accessor(&request(Some(header))).unwrap();
            assert_eq!(t.get("welcome", None), expected);
            t.locale().to_string()
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let locale = handle.await.unwrap();
        let expected = match headers[i % headers.len()].0 {
            "ja-JP" => "en-US",
            other => other,
        };
        assert_eq!(locale, expected);
    }
}
