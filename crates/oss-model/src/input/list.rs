//! Inputs for listing operations.

use crate::types::EncodingType;

/// Input for `ListObjects`.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsInput {
    /// HTTP label (URI path).
    pub bucket: String,
    /// HTTP query: `prefix`.
    pub prefix: Option<String>,
    /// HTTP query: `marker`.
    pub marker: Option<String>,
    /// HTTP query: `delimiter`.
    pub delimiter: Option<String>,
    /// HTTP query: `max-keys`; zero leaves the service default.
    pub max_keys: i32,
    /// HTTP query: `encoding-type`.
    pub encoding_type: Option<EncodingType>,
}
