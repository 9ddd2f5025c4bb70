//! Message Catalogs
//!
//! A catalog is an immutable tree of translated strings for one locale.
//! Leaves are messages, branches group them; both are addressed by
//! dot-separated paths such as `errors.validation.required`.

use crate::{IntlError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A node of a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A message
    Leaf(String),
    /// A group of messages
    Branch(Catalog),
}

/// Translated messages for a single locale.
///
/// # Example
///
/// ```
/// use armature_intl::Catalog;
///
/// let catalog = Catalog::from_json(r#"{
///     "global": { "welcome": "Welcome!" },
///     "errors": { "not_found": "Not found." }
/// }"#).unwrap();
///
/// assert!(catalog.contains("global.welcome"));
/// assert_eq!(catalog.resolve(None, "errors.not_found").value(), "Not found.");
/// assert_eq!(catalog.resolve(None, "errors.missing").value(), "errors.missing");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Catalog {
    entries: BTreeMap<String, Node>,
}

/// Outcome of resolving a path inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The path names a message
    Found(&'a str),
    /// The path is absent or names a group; carries the full path looked up
    NotFound(String),
}

impl Lookup<'_> {
    /// Whether a message was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The message, or the full path when not found.
    pub fn value(&self) -> &str {
        match self {
            Lookup::Found(msg) => *msg,
            Lookup::NotFound(path) => path.as_str(),
        }
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Add a message at a dotted path, creating groups along the way.
    ///
    /// Fails when the path runs through an existing message or would
    /// replace an existing group.
    pub fn insert(&mut self, path: &str, message: impl Into<String>) -> Result<()> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(IntlError::invalid_catalog(path, "empty path segment"));
        }

        let Some((last, parents)) = segments.split_last() else {
            return Err(IntlError::invalid_catalog(path, "empty path"));
        };

        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let node = current
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| Node::Branch(Catalog::new()));
            current = match node {
                Node::Branch(group) => group,
                Node::Leaf(_) => {
                    return Err(IntlError::invalid_catalog(
                        segments[..=depth].join("."),
                        "path passes through a message",
                    ));
                }
            };
        }

        if let Some(Node::Branch(_)) = current.entries.get(*last) {
            return Err(IntlError::invalid_catalog(path, "a group already exists here"));
        }

        current
            .entries
            .insert((*last).to_string(), Node::Leaf(message.into()));
        Ok(())
    }

    /// Builder-style [`Catalog::insert`].
    pub fn with(mut self, path: &str, message: impl Into<String>) -> Result<Self> {
        self.insert(path, message)?;
        Ok(self)
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk a dotted path to a node.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut node = self.entries.get(segments.next()?)?;

        for segment in segments {
            match node {
                Node::Branch(group) => node = group.entries.get(segment)?,
                Node::Leaf(_) => return None,
            }
        }

        Some(node)
    }

    /// Whether a dotted path names a message.
    pub fn contains(&self, path: &str) -> bool {
        matches!(self.get(path), Some(Node::Leaf(_)))
    }

    /// The group a namespace selects, if it names one.
    pub fn subtree(&self, namespace: &str) -> Option<&Catalog> {
        match self.get(namespace)? {
            Node::Branch(group) => Some(group),
            Node::Leaf(_) => None,
        }
    }

    /// Dotted paths of every message, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys("", &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.entries {
            let path = join_path(prefix, name);
            match node {
                Node::Leaf(_) => out.push(path),
                Node::Branch(group) => group.collect_keys(&path, out),
            }
        }
    }

    /// Resolve a key, optionally relative to a namespace.
    ///
    /// See [`resolve`].
    pub fn resolve<'a>(&'a self, namespace: Option<&str>, key: &str) -> Lookup<'a> {
        resolve(self, namespace, key)
    }

    fn from_object(map: serde_json::Map<String, Value>, prefix: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (name, value) in map {
            let path = join_path(prefix, &name);
            if name.is_empty() || name.contains('.') {
                return Err(IntlError::invalid_catalog(
                    path,
                    "names must be non-empty and must not contain '.'",
                ));
            }

            let node = match value {
                Value::String(msg) => Node::Leaf(msg),
                Value::Object(group) => Node::Branch(Self::from_object(group, &path)?),
                other => {
                    return Err(IntlError::invalid_catalog(
                        path,
                        format!("expected a string or an object, found {}", value_kind(&other)),
                    ));
                }
            };
            entries.insert(name, node);
        }

        Ok(Self { entries })
    }
}

impl TryFrom<Value> for Catalog {
    type Error = IntlError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_object(map, ""),
            other => Err(IntlError::invalid_catalog(
                "<root>",
                format!("expected an object, found {}", value_kind(&other)),
            )),
        }
    }
}

/// Resolve `key` inside `catalog`, relative to `namespace` when given.
///
/// A missing segment, or a path ending on a group rather than a message,
/// yields [`Lookup::NotFound`] carrying the full (namespace-qualified) path.
pub fn resolve<'a>(catalog: &'a Catalog, namespace: Option<&str>, key: &str) -> Lookup<'a> {
    let full_path = match namespace {
        Some(ns) => format!("{ns}.{key}"),
        None => key.to_string(),
    };

    match catalog.get(&full_path) {
        Some(Node::Leaf(msg)) => Lookup::Found(msg.as_str()),
        _ => Lookup::NotFound(full_path),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
