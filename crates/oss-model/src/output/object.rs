//! Outputs for object data operations.

use std::collections::HashMap;

use crate::response::ResponseMeta;
use crate::types::{DeletedObject, EncodingType};

/// Output for `PutObject`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// The callback endpoint's JSON reply, when the request carried a
    /// callback. The shape is caller-defined, so it stays generic.
    pub callback_result: Option<serde_json::Value>,
}

/// Output for `GetObject`.
///
/// The object content itself stays on the transport response; this struct
/// carries the decoded metadata only.
#[derive(Debug, Clone, Default)]
pub struct GetObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
    /// HTTP header: `x-oss-object-type`.
    pub object_type: Option<String>,
    /// HTTP header: `x-oss-restore`.
    pub restore: Option<String>,
    /// HTTP header: `x-oss-tagging-count`.
    pub tag_count: Option<i32>,
    /// HTTP header: `x-oss-process-status`.
    pub process_status: Option<String>,
}

/// Output for `CopyObject`.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<CopyObjectResult><ETag>`.
    pub etag: Option<String>,
    /// `<CopyObjectResult><LastModified>`.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `x-oss-copy-source-version-id`.
    pub source_version_id: Option<String>,
}

/// Output for `AppendObject`.
#[derive(Debug, Clone, Default)]
pub struct AppendObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// HTTP header: `x-oss-next-append-position`.
    pub next_position: Option<i64>,
}

/// Output for `HeadObject`.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
    /// HTTP header: `x-oss-object-type`.
    pub object_type: Option<String>,
    /// HTTP header: `x-oss-restore`.
    pub restore: Option<String>,
    /// HTTP header: `x-oss-expiration`.
    pub expiration: Option<String>,
}

/// Output for `GetObjectMeta`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectMetaOutput {
    /// Common status and header state; ETag, length, and Last-Modified are
    /// the promoted meta fields.
    pub meta: ResponseMeta,
}

/// Output for `DeleteObject`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectOutput {
    /// Common status and header state; version id and delete marker are the
    /// promoted meta fields.
    pub meta: ResponseMeta,
}

/// Output for `DeleteObjects`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Deleted>` entries; empty in quiet mode.
    pub deleted: Vec<DeletedObject>,
    /// `<EncodingType>` declared by the response body.
    pub encoding_type: Option<EncodingType>,
}

/// Output for `PutSymlink`.
#[derive(Debug, Clone, Default)]
pub struct PutSymlinkOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
}

/// Output for `GetSymlink`.
#[derive(Debug, Clone, Default)]
pub struct GetSymlinkOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// HTTP header: `x-oss-symlink-target`.
    pub target: Option<String>,
    /// HTTP prefix headers: `x-oss-meta-`.
    pub metadata: HashMap<String, String>,
}

/// Output for `RestoreObject`.
#[derive(Debug, Clone, Default)]
pub struct RestoreObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// HTTP header: `x-oss-object-restore-priority`.
    pub restore_priority: Option<String>,
}

/// Output for `ProcessObject`.
///
/// The body is externally-defined JSON; the well-known fields are promoted,
/// the raw document is retained.
#[derive(Debug, Clone, Default)]
pub struct ProcessObjectOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// JSON field `bucket`.
    pub bucket: Option<String>,
    /// JSON field `object`.
    pub object: Option<String>,
    /// JSON field `fileSize`.
    pub file_size: Option<i64>,
    /// JSON field `status`.
    pub process_status: Option<String>,
    /// The full JSON document.
    pub raw: Option<serde_json::Value>,
}
