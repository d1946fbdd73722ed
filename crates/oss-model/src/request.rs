//! The outbound operation envelope handed to the transport.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use http::{HeaderMap, Method};

/// The request payload.
///
/// Bodies are fully buffered: every payload this SDK constructs (object
/// bytes supplied by the caller, generated XML manifests, form bodies) fits
/// the buffered model, and it keeps Content-MD5 computable without a second
/// pass over a stream. A streaming variant can be added behind this enum
/// without touching the marshal pipeline.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body. Valid for read-type and bodyless operations.
    #[default]
    Empty,
    /// A buffered body.
    Full(Bytes),
}

impl RequestBody {
    /// Returns true if there is no payload or the payload has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Full(b) => b.is_empty(),
        }
    }

    /// The buffered bytes, if a payload is present.
    #[must_use]
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Empty => None,
            Self::Full(b) => Some(b),
        }
    }

    /// The payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Full(b) => b.len(),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(data: Bytes) -> Self {
        Self::Full(data)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(data: Vec<u8>) -> Self {
        Self::Full(data.into())
    }
}

impl From<&'static [u8]> for RequestBody {
    fn from(data: &'static [u8]) -> Self {
        Self::Full(Bytes::from_static(data))
    }
}

/// The in-flight outbound request, populated by the marshal pipeline and
/// consumed by the transport.
///
/// Header writes are last-write-wins; query parameters are kept sorted
/// (sub-resources such as `acl` or `uploads` carry an empty value). The
/// [`metadata`](Self::metadata) bag carries cross-step signals and never
/// reaches the wire.
#[derive(Debug, Default)]
pub struct OssRequest {
    /// The operation name (e.g. `PutObject`).
    pub operation: &'static str,
    /// The HTTP method.
    pub method: Method,
    /// Target bucket. Must be non-empty when the operation requires one.
    pub bucket: String,
    /// Target object key. Must be non-empty when the operation requires one.
    pub key: String,
    /// Outbound headers.
    pub headers: HeaderMap,
    /// Query parameters; empty values denote bare sub-resources.
    pub params: BTreeMap<String, String>,
    /// The request payload; ownership passes to the transport.
    pub body: RequestBody,
    /// Cross-step signaling, e.g. [`Self::FLAG_SKIP_CONTENT_TYPE`].
    pub metadata: HashMap<String, String>,
}

impl OssRequest {
    /// Metadata key set when automatic content-type inference must not run.
    pub const FLAG_SKIP_CONTENT_TYPE: &'static str = "skip-auto-content-type";

    /// Create an envelope for the given operation.
    #[must_use]
    pub fn new(operation: &'static str, method: Method) -> Self {
        Self {
            operation,
            method,
            ..Self::default()
        }
    }

    /// Add a bare sub-resource query parameter (`?acl`, `?uploads`, ...).
    pub fn sub_resource(&mut self, name: &str) {
        self.params.insert(name.to_string(), String::new());
    }

    /// Whether a cross-step flag is set.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.metadata.contains_key(flag)
    }

    /// Set a cross-step flag.
    pub fn set_flag(&mut self, flag: &str) {
        self.metadata.insert(flag.to_string(), String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_empty_body() {
        let req = OssRequest::new("GetObject", Method::GET);
        assert!(req.body.is_empty());
        assert!(req.body.bytes().is_none());
    }

    #[test]
    fn test_should_distinguish_empty_payload_from_no_payload() {
        let body = RequestBody::from(Vec::new());
        assert!(body.is_empty());
        assert!(body.bytes().is_some());
    }

    #[test]
    fn test_should_store_sub_resource_with_empty_value() {
        let mut req = OssRequest::new("PutObjectAcl", Method::PUT);
        req.sub_resource("acl");
        assert_eq!(req.params.get("acl").map(String::as_str), Some(""));
    }
}
