//! Inputs for object configuration operations: ACL and tagging.

use crate::types::{ObjectAcl, Tagging};

/// Input for `PutObjectAcl`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectAclInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-object-acl`. Required.
    pub acl: Option<ObjectAcl>,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `GetObjectAcl`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectAclInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `PutObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectTaggingInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body: the `<Tagging>` document. An empty tag set is a
    /// validation error.
    pub tagging: Tagging,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `GetObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectTaggingInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `DeleteObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectTaggingInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}
