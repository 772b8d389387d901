//! # Core Data Models
//!
//! Defines the configuration item model and the wire types shared by the
//! three operations. The central concern of every type here is secret
//! hygiene: a [`ConfigItem::Secret`]'s stored text must never appear in any
//! serialized or displayed form, only in the file written to disk.
//!
//! ## Redaction invariants
//!
//! - `Serialize` for [`ConfigItem`] always substitutes [`REDACTED`] for the
//!   `secret` field. There is no serializer that emits the stored text.
//! - [`ConfigItem::display_value`] returns the `public` text (or
//!   [`REDACTED`]) for secrets; only [`ConfigItem::stored_value`] yields
//!   the on-disk text, and it is consumed solely by the materializer.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Marker substituted for secret text in every displayed or serialized form.
pub const REDACTED: &str = "[redacted]";

/// One configuration entry.
///
/// Parsed from a loosely-typed JSON value: a bare string becomes `Plain`,
/// an object with a `secret` field (and optional `public` field) becomes
/// `Secret`. Any other JSON shape, or any other key inside the object, is
/// a parse error.
///
/// # Example
///
/// ```rust
/// use keytree_core::models::{ConfigItem, REDACTED};
///
/// let plain: ConfigItem = serde_json::from_str(r#""hello""#).unwrap();
/// assert_eq!(plain.stored_value(), "hello");
/// assert_eq!(plain.display_value(), "hello");
///
/// let secret: ConfigItem = serde_json::from_str(r#"{"secret": "hunter2"}"#).unwrap();
/// assert_eq!(secret.stored_value(), "hunter2");
/// assert_eq!(secret.display_value(), REDACTED);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigItem {
    /// A value whose on-disk and displayed forms are identical.
    Plain(String),

    /// A value materialized verbatim but displayed redacted.
    Secret {
        /// The on-disk text. Never serialized, never displayed.
        secret: String,

        /// Optional display text shown in place of the secret.
        public: Option<String>,
    },
}

impl ConfigItem {
    /// The text written to disk for this item.
    pub fn stored_value(&self) -> &str {
        match self {
            ConfigItem::Plain(value) => value,
            ConfigItem::Secret { secret, .. } => secret,
        }
    }

    /// The text shown in metadata and diagnostics for this item.
    ///
    /// For a `Secret` without a `public` field this is the literal
    /// [`REDACTED`] marker.
    pub fn display_value(&self) -> &str {
        match self {
            ConfigItem::Plain(value) => value,
            ConfigItem::Secret { public, .. } => public.as_deref().unwrap_or(REDACTED),
        }
    }
}

impl Serialize for ConfigItem {
    /// Serializes the item with its secret text redacted.
    ///
    /// This impl is used both for re-displaying a source definition in
    /// diagnostics and as the hash input of the canonical encoder, so the
    /// `secret` field is always emitted as the [`REDACTED`] marker. The
    /// `public` field is emitted verbatim when present.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ConfigItem::Plain(value) => serializer.serialize_str(value),
            ConfigItem::Secret { public, .. } => {
                let len = if public.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("secret", REDACTED)?;
                if let Some(public) = public {
                    map.serialize_entry("public", public)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConfigItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ItemVisitor)
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = ConfigItem;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string or an object with a \"secret\" field")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ConfigItem::Plain(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ConfigItem::Plain(value))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut secret: Option<String> = None;
        let mut public: Option<String> = None;
        let mut unrecognized: Vec<String> = Vec::new();

        // Drain the whole object before erroring so the diagnostic can name
        // every unrecognized key, not just the first one encountered.
        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "secret" => secret = Some(access.next_value()?),
                "public" => public = Some(access.next_value()?),
                _ => {
                    access.next_value::<de::IgnoredAny>()?;
                    unrecognized.push(key);
                }
            }
        }

        if !unrecognized.is_empty() {
            return Err(de::Error::custom(format!(
                "unrecognized key(s) in secret item: {}",
                unrecognized.join(", ")
            )));
        }

        let secret = secret.ok_or_else(|| de::Error::missing_field("secret"))?;
        Ok(ConfigItem::Secret { secret, public })
    }
}

/// The full configuration map, keyed by relative output path.
///
/// Held in a `BTreeMap` so every iteration (canonical encoding, file
/// writes, metadata) observes the same key-sorted order regardless of the
/// order keys appeared in the input document.
pub type SourceMap = BTreeMap<String, ConfigItem>;

/// An opaque content version: a 160-bit digest rendered as lowercase hex.
///
/// Versions carry no semantics beyond equality. On the wire they appear as
/// `{"ref": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Lowercase hex digest of the canonical source encoding.
    #[serde(rename = "ref")]
    pub digest: String,
}

impl Version {
    /// Wraps an already-rendered hex digest.
    pub fn new(digest: impl Into<String>) -> Self {
        Version {
            digest: digest.into(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digest)
    }
}

/// The input document shared by all three operations.
///
/// Constructed once from stdin at process start, consumed by exactly one
/// operation, and discarded. Nothing persists between invocations.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// The configuration map to version and (for materialize) write out.
    pub source: SourceMap,

    /// A previously-known version, if the caller has one.
    ///
    /// Only consulted by validation; operations always report the freshly
    /// computed version, never this one.
    #[serde(default)]
    pub version: Option<Version>,
}

impl Request {
    /// Parses a request from the raw input document.
    ///
    /// # Errors
    ///
    /// [`crate::error::KeytreeError::Input`] when the document is not valid
    /// JSON or does not match the expected shape; the message names the
    /// structural problem (all unrecognized item keys at once).
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// One `(name, value)` pair of the materialize response's metadata list.
///
/// The `value` is always the item's display text, never its stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// The configuration key.
    pub name: String,

    /// The item's display (public) text.
    pub value: String,
}
