//! Outputs for object configuration operations: ACL and tagging.

use crate::response::ResponseMeta;
use crate::types::{Owner, Tag};

/// Output for `PutObjectAcl`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectAclOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
}

/// Output for `GetObjectAcl`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectAclOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<AccessControlPolicy><Owner>`.
    pub owner: Option<Owner>,
    /// `<AccessControlList><Grant>`: the canned ACL string.
    pub grant: Option<String>,
}

/// Output for `PutObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct PutObjectTaggingOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
}

/// Output for `GetObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct GetObjectTaggingOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Tagging><TagSet>` entries in document order.
    pub tags: Vec<Tag>,
}

/// Output for `DeleteObjectTagging`.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectTaggingOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
}
