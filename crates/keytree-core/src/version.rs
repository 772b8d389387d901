//! # Version Engine
//!
//! Derives the content version of a source map and validates a
//! caller-supplied version against it.
//!
//! The version is the SHA-1 digest (160 bits, lowercase hex) of the
//! canonical source encoding. Validation is deliberately non-fatal: a
//! mismatch is an operator-visible warning, never an abort, and every
//! operation reports the freshly computed version regardless.

use crate::canonical::canonical_bytes;
use crate::models::{Request, SourceMap, Version};
use sha1::{Digest, Sha1};
use tracing::warn;

/// Computes the content version of a source map.
///
/// Pure function of the map's keys and item structure: equal maps always
/// yield the same digest, independent of insertion order.
///
/// # Example
///
/// ```rust
/// use keytree_core::models::SourceMap;
/// use keytree_core::version::compute_version;
///
/// let empty = compute_version(&SourceMap::new());
/// assert_eq!(empty.digest.len(), 40);
/// assert_eq!(empty, compute_version(&SourceMap::new()));
/// ```
pub fn compute_version(map: &SourceMap) -> Version {
    let mut hasher = Sha1::new();
    hasher.update(canonical_bytes(map));
    Version::new(hex::encode(hasher.finalize()))
}

/// Checks a request's supplied version against the recomputed one.
///
/// Absent version: trivially fine. Present and matching: fine. Present and
/// mismatched: logs a warning naming the supplied version and a
/// pretty-printed, secret-redacted rendering of the current source, then
/// returns normally — the caller proceeds with the recomputed version.
pub fn validate(request: &Request) {
    let Some(supplied) = &request.version else {
        return;
    };

    let current = compute_version(&request.source);
    if *supplied == current {
        return;
    }

    let rendered = serde_json::to_string_pretty(&request.source)
        .expect("source map serialization cannot fail");
    warn!(
        "supplied version {} does not match the given source (now {}); \
         continuing with the recomputed version. source:\n{}",
        supplied, current, rendered
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigItem;

    fn map_of(entries: &[(&str, &str)]) -> SourceMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigItem::Plain(v.to_string())))
            .collect()
    }

    #[test]
    fn test_empty_map_version_is_stable() {
        // SHA-1 of the canonical encoding "{}".
        assert_eq!(
            compute_version(&SourceMap::new()).digest,
            "bf21a9e8fbc5a3846fb05b4fa0859e0917b2202f"
        );
    }

    #[test]
    fn test_known_digest() {
        // SHA-1 of r#"{"k":"v"}"#.
        assert_eq!(
            compute_version(&map_of(&[("k", "v")])).digest,
            "a6d884843f57ee12a695952daaa2cc24099ab372"
        );
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let version = compute_version(&map_of(&[("a", "b")]));
        assert_eq!(version.digest.len(), 40);
        assert!(version
            .digest
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_order_independence() {
        let forward = map_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let reverse = map_of(&[("c", "3"), ("b", "2"), ("a", "1")]);
        assert_eq!(compute_version(&forward), compute_version(&reverse));
    }

    #[test]
    fn test_different_values_differ() {
        assert_ne!(
            compute_version(&map_of(&[("a", "1")])),
            compute_version(&map_of(&[("a", "2")]))
        );
    }

    #[test]
    fn test_secret_items_hash_by_redacted_form() {
        let mut a = SourceMap::new();
        a.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "one".to_string(),
                public: None,
            },
        );

        let mut b = SourceMap::new();
        b.insert(
            "token".to_string(),
            ConfigItem::Secret {
                secret: "two".to_string(),
                public: None,
            },
        );

        // Secret text does not participate in the version.
        assert_eq!(compute_version(&a), compute_version(&b));
        assert_eq!(
            compute_version(&a).digest,
            "a956b42824bc87c9d47f89d329b639021acda61e"
        );
    }

    #[test]
    fn test_validate_accepts_absent_version() {
        let request = Request {
            source: map_of(&[("a", "1")]),
            version: None,
        };
        validate(&request);
    }

    #[test]
    fn test_validate_accepts_matching_version() {
        let source = map_of(&[("a", "1")]);
        let request = Request {
            version: Some(compute_version(&source)),
            source,
        };
        validate(&request);
    }

    #[test]
    fn test_validate_mismatch_does_not_panic_or_abort() {
        let request = Request {
            source: map_of(&[("a", "1")]),
            version: Some(Version::new("0000000000000000000000000000000000000000")),
        };
        // Mismatch is a logged warning only; control returns normally.
        validate(&request);
    }
}
