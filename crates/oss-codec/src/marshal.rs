//! The field-driven request marshaler.
//!
//! Each Input type declares a descriptor table ([`FieldSpec`]) naming where
//! every field goes on the wire. [`marshal_request`] validates required
//! fields up front, then projects the table into an [`OssRequest`], lets the
//! operation add anything the table cannot express, attaches the payload,
//! and finally runs the operation's [`MarshalStep`]s.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use http::{HeaderName, HeaderValue, Method};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use oss_model::{OssError, OssRequest, RequestBody};

use crate::steps::MarshalStep;

/// A field value lifted out of an Input struct, normalized to the four wire
/// representations.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Sent verbatim.
    Str(String),
    /// Sent in decimal.
    Int(i64),
    /// Sent as `true` / `false`.
    Bool(bool),
    /// Sent as an HTTP-date (`Mon, 02 Jan 2006 15:04:05 GMT`).
    Time(DateTime<Utc>),
}

impl FieldValue {
    fn into_wire(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => if b { "true" } else { "false" }.to_string(),
            Self::Time(t) => format_http_date(&t),
        }
    }
}

/// Where a field lands on the wire.
#[derive(Debug, Clone, Copy)]
pub enum WireKind {
    /// The bucket path label.
    Bucket,
    /// The object key path label.
    Key,
    /// An HTTP header with the given (lowercase) name.
    Header(&'static str),
    /// A query parameter with the given name.
    Query(&'static str),
    /// Validated by the table but projected by `marshal_extra` or a step
    /// (composite headers, generated bodies).
    Virtual,
}

/// One row of an operation's descriptor table.
pub struct FieldSpec<T: ?Sized> {
    /// The field name used in validation errors.
    pub name: &'static str,
    /// Wire destination.
    pub kind: WireKind,
    /// Whether an absent value fails validation before any projection.
    pub required: bool,
    /// Lift the value out of the input; `None` means absent.
    pub get: fn(&T) -> Option<FieldValue>,
}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// An operation input that can be marshaled into an [`OssRequest`].
pub trait OssMarshal {
    /// The operation name.
    const OPERATION: &'static str;
    /// The HTTP method.
    const METHOD: Method;

    /// The descriptor table for this operation.
    fn field_specs() -> &'static [FieldSpec<Self>];

    /// Bare sub-resource query parameters (`?acl`, `?uploads`, ...).
    fn sub_resources() -> &'static [&'static str] {
        &[]
    }

    /// Hook for projections the table cannot express, such as the
    /// user-metadata prefix headers or the composite copy source.
    fn marshal_extra(&self, _req: &mut OssRequest) -> Result<(), OssError> {
        Ok(())
    }

    /// The request payload. Steps run after this and may replace it.
    fn payload(&self) -> Result<RequestBody, OssError> {
        Ok(RequestBody::Empty)
    }

    /// The marshal steps for this operation, in execution order.
    fn steps(&self) -> Vec<MarshalStep> {
        Vec::new()
    }
}

/// Marshal an operation input into the outbound envelope.
///
/// Required fields are validated in table order before any wire state is
/// built, so a missing field never produces a half-populated request.
///
/// # Errors
///
/// Returns [`OssError::MissingRequiredField`] when a required field is
/// absent, or [`OssError::InvalidInput`] when a value cannot be encoded.
pub fn marshal_request<T: OssMarshal + 'static>(input: &T) -> Result<OssRequest, OssError> {
    let specs = T::field_specs();
    for spec in specs {
        if spec.required && (spec.get)(input).is_none() {
            return Err(OssError::MissingRequiredField(spec.name));
        }
    }

    let mut req = OssRequest::new(T::OPERATION, T::METHOD);
    for name in T::sub_resources() {
        req.sub_resource(name);
    }
    for spec in specs {
        let Some(value) = (spec.get)(input) else {
            continue;
        };
        let wire = value.into_wire();
        match spec.kind {
            WireKind::Bucket => req.bucket = wire,
            WireKind::Key => req.key = wire,
            WireKind::Header(name) => set_header(&mut req, name, &wire)?,
            WireKind::Query(name) => {
                req.params.insert(name.to_string(), wire);
            }
            WireKind::Virtual => {}
        }
    }

    input.marshal_extra(&mut req)?;
    req.body = input.payload()?;
    for step in input.steps() {
        step.apply(&mut req)?;
    }

    tracing::debug!(
        operation = req.operation,
        method = %req.method,
        bucket = %req.bucket,
        key = %req.key,
        "marshaled request"
    );
    Ok(req)
}

/// Set a header from a static lowercase name and a dynamic value.
pub(crate) fn set_header(
    req: &mut OssRequest,
    name: &'static str,
    value: &str,
) -> Result<(), OssError> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| OssError::invalid_input(format!("invalid value for header {name}")))?;
    req.headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Project the user-metadata map onto `x-oss-meta-*` headers.
pub(crate) fn apply_user_metadata(
    req: &mut OssRequest,
    metadata: &HashMap<String, String>,
) -> Result<(), OssError> {
    for (key, value) in metadata {
        let name = format!("x-oss-meta-{}", key.to_ascii_lowercase());
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| OssError::invalid_input(format!("invalid metadata key {key}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| OssError::invalid_input(format!("invalid metadata value for {key}")))?;
        req.headers.insert(name, value);
    }
    Ok(())
}

// Path escaping for the copy-source header: keep '/' and the RFC 3986
// unreserved characters, encode everything else (including '+').
const COPY_SOURCE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Format the `x-oss-copy-source` header value.
///
/// The key is path-escaped segment by segment; the version id, when present,
/// is appended verbatim as `?versionId=`.
#[must_use]
pub fn format_copy_source(bucket: &str, key: &str, version_id: Option<&str>) -> String {
    let escaped = utf8_percent_encode(key, COPY_SOURCE_SET);
    match version_id {
        Some(v) => format!("/{bucket}/{escaped}?versionId={v}"),
        None => format!("/{bucket}/{escaped}"),
    }
}

/// Format a timestamp as an HTTP-date.
#[must_use]
pub fn format_http_date(t: &DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_should_format_http_date_in_gmt() {
        let t = Utc.with_ymd_and_hms(2023, 2, 24, 9, 24, 34).unwrap();
        assert_eq!(format_http_date(&t), "Fri, 24 Feb 2023 09:24:34 GMT");
    }

    #[test]
    fn test_should_escape_copy_source_key() {
        let src = format_copy_source("src-bucket", "dir 1/ab+c.txt", None);
        assert_eq!(src, "/src-bucket/dir%201/ab%2Bc.txt");
    }

    #[test]
    fn test_should_append_version_to_copy_source() {
        let src = format_copy_source("b", "k", Some("CAEQNhiBgM0BYiIDc0YQ"));
        assert_eq!(src, "/b/k?versionId=CAEQNhiBgM0BYiIDc0YQ");
    }

    #[test]
    fn test_should_render_field_values() {
        assert_eq!(FieldValue::Str("x".to_string()).into_wire(), "x");
        assert_eq!(FieldValue::Int(819_200).into_wire(), "819200");
        assert_eq!(FieldValue::Bool(true).into_wire(), "true");
        assert_eq!(FieldValue::Bool(false).into_wire(), "false");
    }

    #[test]
    fn test_should_reject_non_ascii_header_value() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        let err = set_header(&mut req, "cache-control", "bad\nvalue").expect_err("must fail");
        assert!(matches!(err, OssError::InvalidInput(_)));
    }

    #[test]
    fn test_should_lowercase_metadata_keys() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        let mut meta = HashMap::new();
        meta.insert("Client-Side-Encryption-Key".to_string(), "v1".to_string());
        apply_user_metadata(&mut req, &meta).expect("apply");
        assert_eq!(
            req.headers
                .get("x-oss-meta-client-side-encryption-key")
                .and_then(|v| v.to_str().ok()),
            Some("v1")
        );
    }
}
