//! Inputs for multipart upload operations.

use std::collections::HashMap;

use crate::request::RequestBody;
use crate::types::{CompletedPart, EncodingType, ObjectAcl, StorageClass};

/// Input for `InitiateMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct InitiateMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<StorageClass>,
    /// HTTP header: `Cache-Control`.
    pub cache_control: Option<String>,
    /// HTTP header: `Content-Disposition`.
    pub content_disposition: Option<String>,
    /// HTTP header: `Content-Encoding`.
    pub content_encoding: Option<String>,
    /// HTTP header: `Content-Type`. When unset, inferred from the key.
    pub content_type: Option<String>,
    /// HTTP header: `x-oss-server-side-encryption`.
    pub server_side_encryption: Option<String>,
    /// HTTP header: `x-oss-forbid-overwrite`.
    pub forbid_overwrite: Option<bool>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
    /// HTTP query: `encoding-type`.
    pub encoding_type: Option<EncodingType>,
}

/// Input for `UploadPart`.
#[derive(Debug, Clone, Default)]
pub struct UploadPartInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP query: `partNumber`. Parts number from 1; zero is absent and
    /// fails required validation.
    pub part_number: i32,
    /// HTTP header: `Content-MD5`. When unset, the MD5 step computes one.
    pub content_md5: Option<String>,
    /// HTTP header: `x-oss-traffic-limit`; zero means unlimited.
    pub traffic_limit: i64,
    /// HTTP payload body.
    pub body: RequestBody,
}

/// Input for `UploadPartCopy`.
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyInput {
    /// HTTP label (URI path): destination bucket.
    pub bucket: String,
    /// HTTP label (URI path): destination key.
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP query: `partNumber`.
    pub part_number: i32,
    /// Source bucket; formatted into `x-oss-copy-source`.
    pub source_bucket: String,
    /// Source key; path-escaped into `x-oss-copy-source`.
    pub source_key: String,
    /// Source version; appended to `x-oss-copy-source` as `?versionId=`.
    pub source_version_id: Option<String>,
    /// HTTP header: `x-oss-copy-source-range`.
    pub source_range: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-match`.
    pub source_if_match: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-none-match`.
    pub source_if_none_match: Option<String>,
    /// HTTP header: `x-oss-copy-source-if-modified-since`.
    pub source_if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `x-oss-copy-source-if-unmodified-since`.
    pub source_if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
}

/// Input for `CompleteMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP payload body: the `<CompleteMultipartUpload>` part list.
    /// Serialized sorted ascending by part number; an empty list is a
    /// validation error.
    pub parts: Vec<CompletedPart>,
    /// HTTP header: `x-oss-object-acl`.
    pub acl: Option<ObjectAcl>,
    /// HTTP header: `x-oss-forbid-overwrite`.
    pub forbid_overwrite: Option<bool>,
    /// HTTP header: `x-oss-callback`.
    pub callback: Option<String>,
    /// HTTP header: `x-oss-callback-var`.
    pub callback_var: Option<String>,
}

/// Input for `AbortMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
}

/// Input for `ListParts`.
#[derive(Debug, Clone, Default)]
pub struct ListPartsInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP label (URI path).
    pub key: String,
    /// HTTP query: `uploadId`.
    pub upload_id: String,
    /// HTTP query: `max-parts`; zero leaves the service default.
    pub max_parts: i32,
    /// HTTP query: `part-number-marker`; zero starts from the beginning.
    pub part_number_marker: i32,
    /// HTTP query: `encoding-type`.
    pub encoding_type: Option<EncodingType>,
}
