//! # keytree — Versioned Configuration Materialization
//!
//! keytree is a pipeline-automation resource that exposes an arbitrary
//! key/value configuration map as a filesystem directory, derives a stable
//! content version for the map, and lets secret values display differently
//! in the orchestration UI than they are written to disk.
//!
//! ## Components
//!
//! 1. **Item model** ([`models`]) — one entry per configuration key, either
//!    plain text or secret-with-public-display.
//!
//! 2. **Canonical encoder** ([`canonical`]) — order-independent byte
//!    encoding of the full map, used only as hash input.
//!
//! 3. **Version engine** ([`version`]) — SHA-1 digest of the canonical
//!    encoding, plus non-fatal validation of a caller-supplied version.
//!
//! 4. **Materializer** ([`materialize`]) — writes one file per key under a
//!    target directory and builds the redacted metadata list.
//!
//! 5. **Operation handlers** ([`ops`]) — `identify`, `materialize`, and
//!    `acknowledge`, composing the above into the request/response
//!    contract of the transport.
//!
//! ## Data flow
//!
//! ```text
//! input document (source map + optional prior version)
//!        │
//!        ▼
//!   Item model ──▶ Version engine ──▶ [materialize only] Materializer
//!                        │                     │
//!                        ▼                     ▼
//!               output document (version + optional metadata)
//! ```
//!
//! ## Secret hygiene
//!
//! A `Secret` item's stored text reaches exactly one place: the file
//! written by the materializer. Every serialized form — metadata, error
//! rendering, and the hash input itself — substitutes the `"[redacted]"`
//! marker. One consequence: two sources differing only in secret text
//! share a version (see [`canonical`]).
//!
//! ## Usage
//!
//! ```rust
//! use keytree_core::models::Request;
//! use keytree_core::ops;
//!
//! let request = Request::from_json(
//!     r#"{"source": {"greeting": "hello", "token": {"secret": "s"}}}"#,
//! )
//! .unwrap();
//!
//! let versions = ops::identify(&request);
//! assert_eq!(versions.len(), 1);
//! assert_eq!(versions[0], ops::acknowledge(&request).version);
//! ```

pub mod canonical;
pub mod error;
pub mod materialize;
pub mod models;
pub mod ops;
pub mod version;

pub use error::{KeytreeError, Result};
pub use models::{ConfigItem, MetadataEntry, Request, SourceMap, Version, REDACTED};
