//! Outputs for multipart upload operations.

use crate::response::ResponseMeta;
use crate::types::{EncodingType, UploadedPart};

/// Output for `InitiateMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct InitiateMultipartUploadOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Bucket>`.
    pub bucket: Option<String>,
    /// `<Key>`; URL-decoded when `encoding_type` is `url`.
    pub key: Option<String>,
    /// `<UploadId>`.
    pub upload_id: Option<String>,
    /// `<EncodingType>` declared by the response body.
    pub encoding_type: Option<EncodingType>,
}

/// Output for `UploadPart`.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
    /// Common status and header state; the part's ETag is the promoted meta
    /// field.
    pub meta: ResponseMeta,
}

/// Output for `UploadPartCopy`.
#[derive(Debug, Clone, Default)]
pub struct UploadPartCopyOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<CopyPartResult><ETag>`.
    pub etag: Option<String>,
    /// `<CopyPartResult><LastModified>`.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Output for `CompleteMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Location>`.
    pub location: Option<String>,
    /// `<Bucket>`.
    pub bucket: Option<String>,
    /// `<Key>`.
    pub key: Option<String>,
    /// `<ETag>`: the composite object ETag.
    pub etag: Option<String>,
    /// The callback endpoint's JSON reply, when the request carried a
    /// callback.
    pub callback_result: Option<serde_json::Value>,
}

/// Output for `AbortMultipartUpload`.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
}

/// Output for `ListParts`.
#[derive(Debug, Clone, Default)]
pub struct ListPartsOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Bucket>`.
    pub bucket: Option<String>,
    /// `<Key>`; URL-decoded when `encoding_type` is `url`.
    pub key: Option<String>,
    /// `<UploadId>`.
    pub upload_id: Option<String>,
    /// `<NextPartNumberMarker>`.
    pub next_part_number_marker: Option<i32>,
    /// `<MaxParts>`.
    pub max_parts: Option<i32>,
    /// `<IsTruncated>`.
    pub is_truncated: Option<bool>,
    /// `<EncodingType>` declared by the response body.
    pub encoding_type: Option<EncodingType>,
    /// `<Part>` entries in document order.
    pub parts: Vec<UploadedPart>,
}
