//! The error taxonomy for the marshal/unmarshal core.
//!
//! Five distinct failure classes, all surfaced to the immediate caller with
//! no retries and no logging side effects:
//!
//! - [`OssError::MissingRequiredField`]: local, pre-flight validation.
//! - [`OssError::InvalidInput`]: local, malformed input to a marshal step.
//! - [`OssError::Service`]: remote, with a parsed `<Error>` document.
//! - [`OssError::Status`]: remote, error status but no usable document.
//! - [`OssError::Decode`]: local, response body did not match the schema
//!   expected for a success status.

use std::collections::BTreeMap;

/// Errors returned by the marshal and unmarshal pipelines.
#[derive(Debug, thiserror::Error)]
pub enum OssError {
    /// A field marked required on the input had no value.
    ///
    /// The message format is standardized: it always contains the text
    /// `missing required field` followed by the declared field name.
    #[error("missing required field, {0}")]
    MissingRequiredField(&'static str),

    /// A marshal step was given input it cannot encode.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The service returned an error status with a parsable error document.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service returned an error status with no body (or an empty one).
    #[error("service returned {status_code} {status}")]
    Status {
        /// The HTTP status code.
        status_code: u16,
        /// The status text from the response line.
        status: String,
    },

    /// The response body for a success status could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A second unmarshal step tried to consume an already-consumed body.
    #[error("response body already consumed")]
    BodyConsumed,
}

impl OssError {
    /// Build an [`OssError::InvalidInput`] from anything displayable.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`OssError::Decode`] from anything displayable.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// A structured error parsed from the service's `<Error>` document.
///
/// The fixed fields mirror the documented schema (`Code`, `Message`,
/// `RequestId`, `HostId`, `EC`); anything else the service includes lands in
/// [`extra`](Self::extra) so callers can inspect undocumented detail.
#[derive(Debug, Clone, Default, thiserror::Error)]
#[error("oss service error: status {status_code}, code {code:?}, message {message:?}, request id {request_id:?}")]
pub struct ServiceError {
    /// HTTP status code of the response carrying the document.
    pub status_code: u16,
    /// The `<Code>` element.
    pub code: String,
    /// The `<Message>` element.
    pub message: String,
    /// The `<RequestId>` element.
    pub request_id: String,
    /// The `<HostId>` element.
    pub host_id: String,
    /// The `<EC>` diagnostics code, when present.
    pub ec: Option<String>,
    /// Any additional scalar elements in the document.
    pub extra: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_include_field_name_in_required_error() {
        let err = OssError::MissingRequiredField("Bucket");
        let text = err.to_string();
        assert!(text.contains("missing required field"));
        assert!(text.contains("Bucket"));
    }

    #[test]
    fn test_should_format_service_error_with_code() {
        let err = OssError::from(ServiceError {
            status_code: 403,
            code: "AccessDenied".to_string(),
            ..ServiceError::default()
        });
        assert!(err.to_string().contains("AccessDenied"));
        assert!(err.to_string().contains("403"));
    }
}
