//! # Operation Handlers
//!
//! The three stateless entry points composing the version engine and the
//! materializer. Each handler is a pure function of its request (plus, for
//! materialize, filesystem side effects); nothing carries over between
//! invocations.

use crate::error::{KeytreeError, Result};
use crate::models::{MetadataEntry, Request, Version};
use crate::version::{compute_version, validate};
use serde::Serialize;
use std::path::Path;

/// Response document of the materialize operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializeResponse {
    /// The freshly computed content version of the source.
    pub version: Version,

    /// One redacted `(name, value)` entry per configuration key, sorted.
    pub metadata: Vec<MetadataEntry>,
}

/// Response document of the acknowledge operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcknowledgeResponse {
    /// The content version corresponding to the given source.
    pub version: Version,
}

/// Reports the content version of the request's source map.
///
/// Always a single-element list: the transport convention is "versions
/// since the given one", but this resource models a flat identity, so the
/// answer collapses to exactly the current version. Any supplied prior
/// version is ignored.
pub fn identify(request: &Request) -> Vec<Version> {
    vec![compute_version(&request.source)]
}

/// Writes the source map under `target_dir` and reports version + metadata.
///
/// Validation runs first for its diagnostic side effect only — a mismatch
/// between the supplied and recomputed version warns but never blocks, and
/// the response always carries the recomputed version.
///
/// # Errors
///
/// [`KeytreeError::MissingTargetDir`] if no directory was supplied, before
/// any filesystem work; otherwise any materialization failure propagates.
pub fn materialize(request: &Request, target_dir: Option<&Path>) -> Result<MaterializeResponse> {
    let target_dir = target_dir.ok_or(KeytreeError::MissingTargetDir)?;

    validate(request);
    let metadata = crate::materialize::materialize(&request.source, target_dir)?;

    Ok(MaterializeResponse {
        version: compute_version(&request.source),
        metadata,
    })
}

/// Confirms the content version of the given source without touching disk.
///
/// The outbound counterpart of materialize: it exists so the caller learns
/// which version corresponds to the source it handed over. No directory is
/// read or written.
pub fn acknowledge(request: &Request) -> AcknowledgeResponse {
    AcknowledgeResponse {
        version: compute_version(&request.source),
    }
}
