//! Outputs for listing operations.

use crate::response::ResponseMeta;
use crate::types::{EncodingType, ListedObject};

/// Output for `ListObjects`.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsOutput {
    /// Common status and header state.
    pub meta: ResponseMeta,
    /// `<Name>`: the bucket listed.
    pub name: Option<String>,
    /// `<Prefix>`; URL-decoded when `encoding_type` is `url`.
    pub prefix: Option<String>,
    /// `<Marker>`; URL-decoded when `encoding_type` is `url`.
    pub marker: Option<String>,
    /// `<NextMarker>`; URL-decoded when `encoding_type` is `url`.
    pub next_marker: Option<String>,
    /// `<Delimiter>`; URL-decoded when `encoding_type` is `url`.
    pub delimiter: Option<String>,
    /// `<MaxKeys>`.
    pub max_keys: Option<i32>,
    /// `<IsTruncated>`.
    pub is_truncated: Option<bool>,
    /// `<EncodingType>` declared by the response body.
    pub encoding_type: Option<EncodingType>,
    /// `<Contents>` entries in document order; keys URL-decoded when
    /// `encoding_type` is `url`.
    pub objects: Vec<ListedObject>,
    /// `<CommonPrefixes><Prefix>` entries; URL-decoded when `encoding_type`
    /// is `url`.
    pub common_prefixes: Vec<String>,
}
