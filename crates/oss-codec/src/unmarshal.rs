//! The response unmarshal pipeline.
//!
//! Each Output type declares an ordered step list. The pipeline copies the
//! status line into the output's meta first, runs the header step, and only
//! then touches the body, so header-derived state survives any body-decode
//! failure. An error-range status short-circuits the body steps: the body,
//! if any, is parsed as a service `<Error>` document instead.

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use percent_encoding::percent_decode_str;

use oss_model::response::ResponseMeta;
use oss_model::types::StorageClass;
use oss_model::{OssError, OssResponse};
use oss_xml::{OssXmlDecode, from_xml, parse_error_document};

/// A single stage of an operation's unmarshal pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmarshalStep {
    /// Copy the response headers into the output's meta and run the
    /// operation's header hook.
    Header,
    /// Consume and discard the body.
    DiscardBody,
    /// Decode the body as the operation's XML result document.
    BodyXml,
    /// Decode the body as a JSON document.
    BodyDefault,
    /// Decode the body as a callback endpoint's JSON reply, when present.
    BodyCallback,
    /// Percent-decode key-like fields when the response declared
    /// `encoding-type=url`.
    DecodeUrl,
}

/// An operation output that can be populated from an [`OssResponse`].
pub trait OssUnmarshal: Default {
    /// The unmarshal steps for this operation, in execution order.
    fn steps() -> &'static [UnmarshalStep];

    /// The common status and header state.
    fn meta_mut(&mut self) -> &mut ResponseMeta;

    /// Hook for operation-specific header fields.
    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        let _ = headers;
        Ok(())
    }

    /// Decode the operation's XML result document.
    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        let _ = body;
        Err(OssError::decode("operation has no XML result document"))
    }

    /// Decode the operation's JSON result document.
    fn apply_json(&mut self, value: serde_json::Value) -> Result<(), OssError> {
        let _ = value;
        Ok(())
    }

    /// Record the callback endpoint's JSON reply.
    fn apply_callback(&mut self, value: serde_json::Value) {
        let _ = value;
    }

    /// Percent-decode the fields the `encoding-type=url` contract covers.
    fn decode_url_fields(&mut self) -> Result<(), OssError> {
        Ok(())
    }
}

/// Run the operation's unmarshal pipeline over a response.
///
/// Populates `out` in place so the status line and header state remain
/// available to the caller even when the result is an error.
///
/// # Errors
///
/// Returns [`OssError::Service`] when an error status carries a parsable
/// `<Error>` document, [`OssError::Status`] when it does not, and
/// [`OssError::Decode`] when a success body does not match the operation's
/// schema.
pub fn unmarshal_response<T: OssUnmarshal>(
    out: &mut T,
    resp: &mut OssResponse,
) -> Result<(), OssError> {
    {
        let meta = out.meta_mut();
        meta.status_code = resp.status_code.as_u16();
        meta.status = resp.status.clone();
    }

    for step in T::steps() {
        match step {
            UnmarshalStep::Header => apply_header_step(out, resp)?,
            _ => {
                if resp.is_error_status() {
                    return Err(error_from_response(resp));
                }
                apply_body_step(out, resp, *step)?;
            }
        }
    }
    if resp.is_error_status() {
        return Err(error_from_response(resp));
    }

    tracing::debug!(
        status = resp.status_code.as_u16(),
        output = std::any::type_name::<T>(),
        "unmarshaled response"
    );
    Ok(())
}

fn apply_header_step<T: OssUnmarshal>(out: &mut T, resp: &OssResponse) -> Result<(), OssError> {
    let meta = out.meta_mut();
    meta.headers = resp.headers.clone();
    meta.request_id = header_str(&resp.headers, "x-oss-request-id");
    meta.etag = header_str(&resp.headers, "etag");
    meta.version_id = header_str(&resp.headers, "x-oss-version-id");
    meta.delete_marker = header_bool(&resp.headers, "x-oss-delete-marker");
    meta.content_length = header_parse(&resp.headers, "content-length");
    meta.content_type = header_str(&resp.headers, "content-type");
    meta.last_modified = header_timestamp(&resp.headers, "last-modified");
    meta.storage_class =
        header_str(&resp.headers, "x-oss-storage-class").map(|s| StorageClass::from(s.as_str()));
    meta.server_side_encryption = header_str(&resp.headers, "x-oss-server-side-encryption");
    meta.sse_kms_key_id = header_str(&resp.headers, "x-oss-server-side-encryption-key-id");
    meta.hash_crc64 = header_parse(&resp.headers, "x-oss-hash-crc64ecma");
    out.apply_headers(&resp.headers)
}

fn apply_body_step<T: OssUnmarshal>(
    out: &mut T,
    resp: &mut OssResponse,
    step: UnmarshalStep,
) -> Result<(), OssError> {
    match step {
        UnmarshalStep::Header => Ok(()),
        UnmarshalStep::DiscardBody => {
            if let Some(body) = resp.take_body()? {
                body.drain().map_err(|e| OssError::decode(e.to_string()))?;
            }
            Ok(())
        }
        UnmarshalStep::BodyXml => {
            let data = read_body(resp)?;
            if data.is_empty() {
                return Ok(());
            }
            out.apply_xml(&data)
        }
        UnmarshalStep::BodyDefault => {
            let data = read_body(resp)?;
            if data.is_empty() {
                return Ok(());
            }
            let value = serde_json::from_slice(&data)
                .map_err(|e| OssError::decode(format!("invalid JSON body: {e}")))?;
            out.apply_json(value)
        }
        UnmarshalStep::BodyCallback => {
            let data = read_body(resp)?;
            if data.is_empty() {
                return Ok(());
            }
            let value = serde_json::from_slice(&data)
                .map_err(|e| OssError::decode(format!("invalid callback reply: {e}")))?;
            out.apply_callback(value);
            Ok(())
        }
        UnmarshalStep::DecodeUrl => out.decode_url_fields(),
    }
}

fn read_body(resp: &mut OssResponse) -> Result<Bytes, OssError> {
    match resp.take_body()? {
        Some(body) => body
            .read_all()
            .map_err(|e| OssError::decode(e.to_string())),
        None => Ok(Bytes::new()),
    }
}

fn error_from_response(resp: &mut OssResponse) -> OssError {
    let status_code = resp.status_code.as_u16();
    let status = resp.status.clone();
    let data = read_body(resp).unwrap_or_default();
    if !data.is_empty() {
        if let Ok(service) = parse_error_document(&data, status_code) {
            return OssError::Service(service);
        }
    }
    OssError::Status {
        status_code,
        status,
    }
}

/// Decode an XML result document into a fresh output, keeping the current
/// meta.
pub(crate) fn decode_xml_into<T>(out: &mut T, body: &[u8]) -> Result<(), OssError>
where
    T: OssUnmarshal + OssXmlDecode,
{
    let mut decoded: T = from_xml(body).map_err(|e| OssError::decode(e.to_string()))?;
    std::mem::swap(decoded.meta_mut(), out.meta_mut());
    *out = decoded;
    Ok(())
}

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

/// Read a header as a string, when present and valid UTF-8.
pub fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Read and parse a header value.
pub fn header_parse<F: FromStr>(headers: &HeaderMap, name: &str) -> Option<F> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

/// Read a boolean header (`true` / `false`).
pub fn header_bool(headers: &HeaderMap, name: &str) -> Option<bool> {
    match headers.get(name).and_then(|v| v.to_str().ok()) {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Read a timestamp header, accepting the formats services actually send.
pub fn header_timestamp(headers: &HeaderMap, name: &str) -> Option<DateTime<Utc>> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
}

/// Parse a timestamp, trying RFC 2822, the HTTP-date GMT form, then
/// RFC 3339.
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%a, %d %b %Y %H:%M:%S GMT")
                .map(|ndt| ndt.and_utc())
        })
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .ok()
}

/// Collect `x-oss-meta-*` headers into a map, prefix stripped.
pub fn collect_user_metadata(headers: &HeaderMap) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    for (name, value) in headers {
        if let Some(key) = name.as_str().strip_prefix("x-oss-meta-") {
            if let Ok(v) = value.to_str() {
                metadata.insert(key.to_string(), v.to_string());
            }
        }
    }
    metadata
}

/// Strictly percent-decode a response field.
///
/// Every `%` must start a two-hex-digit escape and the decoded bytes must be
/// UTF-8; anything else is a decode error rather than a silent passthrough.
pub fn decode_url_component(s: &str) -> Result<String, OssError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(OssError::decode(format!("invalid percent escape in {s:?}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    percent_decode_str(s)
        .decode_utf8()
        .map(|c| c.into_owned())
        .map_err(|e| OssError::decode(format!("decoded field is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, StatusCode};
    use oss_model::response::ResponseBody;

    #[derive(Debug, Default)]
    struct ProbeOutput {
        meta: ResponseMeta,
        xml_calls: u32,
    }

    impl OssUnmarshal for ProbeOutput {
        fn steps() -> &'static [UnmarshalStep] {
            &[UnmarshalStep::Header, UnmarshalStep::BodyXml]
        }

        fn meta_mut(&mut self) -> &mut ResponseMeta {
            &mut self.meta
        }

        fn apply_xml(&mut self, _body: &[u8]) -> Result<(), OssError> {
            self.xml_calls += 1;
            Ok(())
        }
    }

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).expect("value"));
        headers
    }

    #[test]
    fn test_should_populate_meta_on_error_without_body() {
        let headers = headers_with("x-oss-request-id", "5C06A3B67B8B5A3DA422****");
        let mut resp = OssResponse::new(StatusCode::NOT_FOUND, "Not Found", headers);
        let mut out = ProbeOutput::default();
        let err = unmarshal_response(&mut out, &mut resp).expect_err("must fail");

        assert!(matches!(err, OssError::Status { status_code: 404, .. }));
        assert_eq!(out.meta.status_code, 404);
        assert_eq!(out.meta.status, "Not Found");
        assert_eq!(
            out.meta.request_id.as_deref(),
            Some("5C06A3B67B8B5A3DA422****")
        );
        assert_eq!(out.xml_calls, 0);
    }

    #[test]
    fn test_should_surface_service_error_document() {
        let body = br"<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message></Error>";
        let mut resp = OssResponse::new(StatusCode::NOT_FOUND, "Not Found", HeaderMap::new())
            .with_body(ResponseBody::from_bytes(&body[..]));
        let mut out = ProbeOutput::default();
        let err = unmarshal_response(&mut out, &mut resp).expect_err("must fail");

        match err {
            OssError::Service(se) => {
                assert_eq!(se.status_code, 404);
                assert_eq!(se.code, "NoSuchKey");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_should_skip_xml_decode_for_empty_success_body() {
        let mut resp = OssResponse::new(StatusCode::OK, "OK", HeaderMap::new());
        let mut out = ProbeOutput::default();
        unmarshal_response(&mut out, &mut resp).expect("unmarshal");
        assert_eq!(out.xml_calls, 0);
    }

    #[test]
    fn test_should_decode_xml_body_on_success() {
        let mut resp = OssResponse::new(StatusCode::OK, "OK", HeaderMap::new())
            .with_body(ResponseBody::from_bytes(&b"<R/>"[..]));
        let mut out = ProbeOutput::default();
        unmarshal_response(&mut out, &mut resp).expect("unmarshal");
        assert_eq!(out.xml_calls, 1);
    }

    #[test]
    fn test_should_overwrite_promoted_fields_on_repeat_header_step() {
        let headers = headers_with("etag", "\"D41D8CD98F00B204E9800998ECF8427E\"");
        let resp = OssResponse::new(StatusCode::OK, "OK", headers);
        let mut out = ProbeOutput::default();
        apply_header_step(&mut out, &resp).expect("first");
        apply_header_step(&mut out, &resp).expect("second");
        assert_eq!(
            out.meta.etag.as_deref(),
            Some("\"D41D8CD98F00B204E9800998ECF8427E\"")
        );
    }

    #[test]
    fn test_should_parse_http_date_formats() {
        let want = "2023-02-24 09:24:34 UTC";
        for s in [
            "Fri, 24 Feb 2023 09:24:34 GMT",
            "Fri, 24 Feb 2023 09:24:34 +0000",
            "2023-02-24T09:24:34Z",
        ] {
            let got = parse_http_date(s).expect("parse");
            assert_eq!(got.to_string(), want, "input {s}");
        }
        assert!(parse_http_date("not a date").is_none());
    }

    #[test]
    fn test_should_collect_metadata_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-oss-meta-author", HeaderValue::from_static("alice"));
        headers.insert("x-oss-meta-flag", HeaderValue::from_static("1"));
        headers.insert("x-oss-request-id", HeaderValue::from_static("req"));
        let metadata = collect_user_metadata(&headers);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("author").map(String::as_str), Some("alice"));
    }

    #[test]
    fn test_should_decode_url_encoded_key_marker() {
        let got = decode_url_component("demo%2Fgp-%0C%0A%0B").expect("decode");
        assert_eq!(got, "demo/gp-\u{c}\n\u{b}");
    }

    #[test]
    fn test_should_keep_plus_signs_when_decoding() {
        assert_eq!(decode_url_component("a+b").expect("decode"), "a+b");
    }

    #[test]
    fn test_should_reject_truncated_percent_escape() {
        for s in ["bad%2", "bad%", "bad%zz"] {
            assert!(
                matches!(decode_url_component(s), Err(OssError::Decode(_))),
                "input {s}"
            );
        }
    }
}
