//! The inbound operation result produced by the transport and consumed by
//! the unmarshal pipeline.

use std::fmt;
use std::io::{self, Read};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::error::OssError;

/// A response body stream.
///
/// Read-to-completion and drop happen in exactly one unmarshal step; the
/// wrapper exists so typed results never hold a raw reader.
pub struct ResponseBody {
    reader: Box<dyn Read + Send>,
}

impl ResponseBody {
    /// Wrap an arbitrary synchronous reader.
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Wrap an in-memory buffer.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::new(io::Cursor::new(data.into()))
    }

    /// Read the stream to completion.
    pub fn read_all(mut self) -> io::Result<Bytes> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf.into())
    }

    /// Drain the stream without retaining its content.
    pub fn drain(mut self) -> io::Result<u64> {
        io::copy(&mut self.reader, &mut io::sink())
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

/// One HTTP exchange's inbound half: status line, headers, and an optional
/// body stream.
///
/// Created by the transport per exchange; the unmarshal pipeline consumes
/// the body exactly once via [`take_body`](Self::take_body).
#[derive(Debug)]
pub struct OssResponse {
    /// The HTTP status code.
    pub status_code: StatusCode,
    /// The status text from the response line, verbatim.
    pub status: String,
    /// Response headers; lookups are case-insensitive.
    pub headers: HeaderMap,
    body: Option<ResponseBody>,
    consumed: bool,
}

impl OssResponse {
    /// Create a bodyless response.
    #[must_use]
    pub fn new(status_code: StatusCode, status: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            status_code,
            status: status.into(),
            headers,
            body: None,
            consumed: false,
        }
    }

    /// Attach a body stream.
    #[must_use]
    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Take ownership of the body stream.
    ///
    /// Returns `Ok(None)` when the transport attached no body. A second call
    /// is a programming error and fails with [`OssError::BodyConsumed`].
    pub fn take_body(&mut self) -> Result<Option<ResponseBody>, OssError> {
        if self.consumed {
            return Err(OssError::BodyConsumed);
        }
        self.consumed = true;
        Ok(self.body.take())
    }

    /// Whether the error-status range applies (anything outside 2xx).
    #[must_use]
    pub fn is_error_status(&self) -> bool {
        !self.status_code.is_success()
    }
}

/// Common response state embedded in every Output struct.
///
/// Populated by the header-copy unmarshal step before any body decoding, so
/// it survives body-decode failures.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// Numeric HTTP status.
    pub status_code: u16,
    /// Status text, verbatim from the response line.
    pub status: String,
    /// The full response header set.
    pub headers: HeaderMap,
    /// HTTP header: `x-oss-request-id`.
    pub request_id: Option<String>,
    /// HTTP header: `ETag`.
    pub etag: Option<String>,
    /// HTTP header: `x-oss-version-id`.
    pub version_id: Option<String>,
    /// HTTP header: `x-oss-delete-marker`.
    pub delete_marker: Option<bool>,
    /// HTTP header: `Content-Length`.
    pub content_length: Option<i64>,
    /// HTTP header: `Content-Type`.
    pub content_type: Option<String>,
    /// HTTP header: `Last-Modified`.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// HTTP header: `x-oss-storage-class`.
    pub storage_class: Option<crate::types::StorageClass>,
    /// HTTP header: `x-oss-server-side-encryption`.
    pub server_side_encryption: Option<String>,
    /// HTTP header: `x-oss-server-side-encryption-key-id`.
    pub sse_kms_key_id: Option<String>,
    /// HTTP header: `x-oss-hash-crc64ecma`.
    pub hash_crc64: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_return_none_when_no_body_attached() {
        let mut resp = OssResponse::new(StatusCode::NO_CONTENT, "No Content", HeaderMap::new());
        assert!(resp.take_body().expect("first take").is_none());
    }

    #[test]
    fn test_should_reject_second_body_take() {
        let mut resp = OssResponse::new(StatusCode::OK, "OK", HeaderMap::new())
            .with_body(ResponseBody::from_bytes(&b"payload"[..]));
        let body = resp.take_body().expect("first take").expect("body present");
        assert_eq!(body.read_all().expect("read").as_ref(), b"payload");
        assert!(matches!(resp.take_body(), Err(OssError::BodyConsumed)));
    }

    #[test]
    fn test_should_flag_error_status_range() {
        let resp = OssResponse::new(StatusCode::NOT_FOUND, "NoSuchBucket", HeaderMap::new());
        assert!(resp.is_error_status());
        let resp = OssResponse::new(StatusCode::OK, "OK", HeaderMap::new());
        assert!(!resp.is_error_status());
    }
}
