//! Inputs for object data operations.

use std::collections::HashMap;

use crate::request::RequestBody;
use crate::types::{
    MetadataDirective, ObjectAcl, ObjectIdentifier, RestoreTier, StorageClass, TaggingDirective,
};

/// Input for `PutObject`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<ObjectAcl>,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// HTTP header: `Cache-Control`.
    pub cache_control: Option<String>,
    /// HTTP header: `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// HTTP header: `Content-Encoding`.
    pub content_encoding: Option<String>,
    /// HTTP header: `Content-MD5`. When unset, the MD5 step computes one.
    pub content_md5: Option<String>,
    /// HTTP header: `Content-Type`. When unset, inferred from the key.
    pub content_type: Option<String>,
    /// HTTP header: `Expires`.
    pub expires: Option<String>,
    /// HTTP header: `x-oss-server-side-encryption`.
    pub server_side_encryption: Option<String>,
    /// HTTP header: `x-oss-server-side-encryption-key-id`.
    pub sse_kms_key_id: Option<String>,
    /// HTTP header: `x-oss-tagging` (URL-encoded `k=v&...` string).
    pub tagging: Option<String>,
    /// HTTP header: `x-oss-forbid-overwrite`.
    pub forbid_overwrite: Option<bool>,
    /// HTTP header: `x-oss-traffic-limit` (bit/s); zero means unlimited and
    /// is not sent.
    pub traffic_limit: i64,
    /// HTTP header: `x-oss-callback` (base64 callback descriptor).
    pub callback: Option<String>,
    /// HTTP header: `x-oss-callback-var` (base64 custom variables).
    pub callback_var: Option<String>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
    /// HTTP payload body.
    pub body: RequestBody,
}

/// Input for `GetObject`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `Range`.
    pub range: Option<String>,
    /// HTTP header: `If-Modified-Since`.
    pub if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `If-Unmodified-Since`.
    pub if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `If-Match`.
    pub if_match: Option<String>,
    /// HTTP header: `If-None-Match`.
    pub if_none_match: Option<String>,
    /// HTTP header: `Accept-Encoding`.
    pub accept_encoding: Option<String>,
    /// HTTP header: `x-oss-traffic-limit`; zero means unlimited.
    pub traffic_limit: i64,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
    /// HTTP query: `x-oss-process` (inline processing, e.g. image resize).
    pub process: Option<String>,
    /// HTTP query: `response-content-type`.
    pub response_content_type: Option<String>,
    /// HTTP query: `response-cache-control`.
    pub response_cache_control: Option<String>,
    /// HTTP query: `response-content-disposition`.
    pub response_content_disposition: Option<String>,
}

/// Input for `CopyObject`.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectInput {
    /// HTTP label (URI path): destination bucket.
    pub bucket: String,
    /// HTTP label (URI path): destination key.
    pub key: String,
    /// Source bucket; formatted into `x-oss-copy-source`.
    pub source_bucket: String,
    /// Source key; path-escaped into `x-oss-copy-source`.
    pub source_key: String,
    /// Source version; appended to `x-oss-copy-source` as `?versionId=`.
    pub source_version_id: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-match`.
    pub source_if_match: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-none-match`.
    pub source_if_none_match: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-modified-since`.
    pub source_if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `x-oss-copy-source-if-unmodified-since`.
    pub source_if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `x-oss-metadata-directive`.
    pub metadata_directive: Option<MetadataDirective>,
    /// HTTP header: `x-oss-tagging-directive`.
    pub tagging_directive: Option<TaggingDirective>,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<ObjectAcl>,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// HTTP header: `x-oss-server-side-encryption`.
    pub server_side_encryption: Option<String>,
    /// HTTP header: `x-oss-tagging`.
    pub tagging: Option<String>,
    /// HTTP header: `x-oss-forbid-overwrite`.
    pub forbid_overwrite: Option<bool>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// Input for `AppendObject`.
#[derive(Debug, Clone, Default)]
pub struct AppendObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `position`. Always sent; zero starts a new appendable
    /// object.
    pub position: i64,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<ObjectAcl>,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// HTTP header: `Cache-Control`.
    pub cache_control: Option<String>,
    /// HTTP header: `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// HTTP header: `Content-Encoding`.
    pub content_encoding: Option<String>,
    /// HTTP header: `Content-MD5`.
    pub content_md5: Option<String>,
    /// HTTP header: `Content-Type`. When unset, inferred from the key.
    pub content_type: Option<String>,
    /// HTTP header: `x-oss-traffic-limit`; zero means unlimited.
    pub traffic_limit: i64,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
    /// HTTP payload body.
    pub body: RequestBody,
}

/// Input for `HeadObject`.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `If-Modified-Since`.
    pub if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `If-Unmodified-Since`.
    pub if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `If-Match`.
    pub if_match: Option<String>,
    /// HTTP header: `If-None-Match`.
    pub if_none_match: Option<String>,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `GetObjectMeta`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectMetaInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `DeleteObject`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `DeleteObjects` (batch delete with an XML manifest body).
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP payload body: the `<Delete>` manifest entries, in order.
    /// An empty list is a validation error, not an empty manifest.
    pub objects: Vec<ObjectIdentifier>,
    /// `<Quiet>` element: suppress per-key results in the response.
    pub quiet: bool,
    /// HTTP query: `encoding-type`.
    pub encoding_type: Option<crate::types::EncodingType>,
}

/// Input for `PutSymlink`.
#[derive(Debug, Clone, Default)]
pub struct PutSymlinkInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path): the symlink key.
    pub key: String,
    /// HTTP header: `x-oss-symlink-target`.
    pub target: String,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<ObjectAcl>,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// HTTP header: `x-oss-forbid-overwrite`.
    pub forbid_overwrite: Option<bool>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// Input for `GetSymlink`.
#[derive(Debug, Clone, Default)]
pub struct GetSymlinkInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
}

/// Input for `RestoreObject`.
#[derive(Debug, Clone, Default)]
pub struct RestoreObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `versionId`.
    pub version_id: Option<String>,
    /// `<Days>` element of the `<RestoreRequest>` body; zero sends no body
    /// and the service applies its default.
    pub days: i64,
    /// `<JobParameters><Tier>` element; requires `days`.
    pub tier: Option<RestoreTier>,
}

/// Input for `ProcessObject` (asynchronous processing instruction).
#[derive(Debug, Clone, Default)]
pub struct ProcessObjectInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP payload body: `x-oss-process=<instruction>` (form-encoded, not a
    /// query parameter).
    pub process: String,
}
