//! # Canonical Source Encoding
//!
//! Produces a deterministic byte sequence for a [`SourceMap`], used only as
//! hash input by the version engine. Semantically equal maps (same keys,
//! same items, any insertion order) always encode to identical bytes.
//!
//! Determinism comes from two fixed choices:
//!
//! 1. Keys are emitted in sorted order. The map is a `BTreeMap`, so the
//!    sort is inherent to iteration rather than a separate step.
//! 2. Items are emitted through their serde `Serialize` impl, which is a
//!    fixed function of the item's full structure (including whether a
//!    secret's `public` field is present).
//!
//! ## The redaction quirk
//!
//! Because the encoder reuses the redacting `Serialize` impl, a `Secret`'s
//! stored text never reaches the hasher: it is replaced by the
//! `"[redacted]"` marker before encoding. Two sources that differ only in
//! secret text therefore share a version. The version identifies the
//! public shape of the source, not the secret text; callers that rotate a
//! secret without changing its shape keep the same version. Do not "fix"
//! this by hashing the stored text.

use crate::models::SourceMap;

/// Encodes a source map into its canonical byte form.
///
/// The output is compact JSON of the key-sorted map with secrets redacted.
///
/// # Example
///
/// ```rust
/// use keytree_core::canonical::canonical_bytes;
/// use keytree_core::models::{ConfigItem, SourceMap};
///
/// let mut forward = SourceMap::new();
/// forward.insert("a".into(), ConfigItem::Plain("1".into()));
/// forward.insert("b".into(), ConfigItem::Plain("2".into()));
///
/// let mut reverse = SourceMap::new();
/// reverse.insert("b".into(), ConfigItem::Plain("2".into()));
/// reverse.insert("a".into(), ConfigItem::Plain("1".into()));
///
/// assert_eq!(canonical_bytes(&forward), canonical_bytes(&reverse));
/// assert_eq!(canonical_bytes(&forward), br#"{"a":"1","b":"2"}"#);
/// ```
pub fn canonical_bytes(map: &SourceMap) -> Vec<u8> {
    // Strings and string-field structs only; serialization cannot fail.
    serde_json::to_vec(map).expect("source map serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigItem;

    fn plain(value: &str) -> ConfigItem {
        ConfigItem::Plain(value.to_string())
    }

    #[test]
    fn test_empty_map() {
        assert_eq!(canonical_bytes(&SourceMap::new()), b"{}");
    }

    #[test]
    fn test_keys_sorted() {
        let mut map = SourceMap::new();
        map.insert("zulu".to_string(), plain("1"));
        map.insert("alpha".to_string(), plain("2"));
        assert_eq!(canonical_bytes(&map), br#"{"alpha":"2","zulu":"1"}"#);
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let mut a = SourceMap::new();
        a.insert("x".to_string(), plain("1"));
        a.insert("y".to_string(), plain("2"));

        let mut b = SourceMap::new();
        b.insert("y".to_string(), plain("2"));
        b.insert("x".to_string(), plain("1"));

        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_secret_text_never_encoded() {
        let mut map = SourceMap::new();
        map.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "very-secret".to_string(),
                public: None,
            },
        );
        let bytes = canonical_bytes(&map);
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("very-secret"), "leaked secret: {}", text);
        assert_eq!(text, r#"{"token":{"secret":"[redacted]"}}"#);
    }

    #[test]
    fn test_differing_secrets_encode_identically() {
        // The stored secret text does not participate in the encoding,
        // so these two maps are canonically equal.
        let mut a = SourceMap::new();
        a.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "first".to_string(),
                public: Some("p".to_string()),
            },
        );

        let mut b = SourceMap::new();
        b.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "second".to_string(),
                public: Some("p".to_string()),
            },
        );

        assert_eq!(canonical_bytes(&a), canonical_bytes(&b));
    }

    #[test]
    fn test_public_presence_changes_encoding() {
        let mut with_public = SourceMap::new();
        with_public.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "s".to_string(),
                public: Some("[redacted]".to_string()),
            },
        );

        let mut without_public = SourceMap::new();
        without_public.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "s".to_string(),
                public: None,
            },
        );

        assert_ne!(
            canonical_bytes(&with_public),
            canonical_bytes(&without_public)
        );
    }
}
