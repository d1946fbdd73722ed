//! Parser for the service `<Error>` document.
//!
//! Error responses carry a small XML body whose exact field set varies by
//! error code; the well-known fields are promoted and everything else is
//! kept in `extra`.

use oss_model::error::ServiceError;

use crate::error::XmlError;
use crate::tree::{XmlNode, decode_tree};

/// Parse a service error body into a [`ServiceError`].
///
/// The document root must be `<Error>`. Unknown scalar children are
/// preserved in `extra` so callers can inspect error-specific details.
///
/// # Errors
///
/// Returns `XmlError` if the body is not well-formed XML or the `<Error>`
/// root is missing.
pub fn parse_error_document(body: &[u8], status_code: u16) -> Result<ServiceError, XmlError> {
    let root = decode_tree(body)?;
    let Some(XmlNode::Object(doc)) = root.get("Error") else {
        return Err(XmlError::MissingElement("Error".to_string()));
    };

    let mut err = ServiceError {
        status_code,
        ..ServiceError::default()
    };
    for (name, node) in doc.iter() {
        let Some(text) = node.as_str() else {
            continue;
        };
        match name {
            "Code" => err.code = text.to_string(),
            "Message" => err.message = text.to_string(),
            "RequestId" => err.request_id = text.to_string(),
            "HostId" => err.host_id = text.to_string(),
            "EC" => err.ec = Some(text.to_string()),
            _ => {
                err.extra.insert(name.to_string(), text.to_string());
            }
        }
    }
    Ok(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_access_denied_error() {
        let body = br#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>The bucket you access does not belong to you.</Message>
  <RequestId>5DECB1F6F3150D373335D8D2</RequestId>
  <HostId>demo.oss-cn-hangzhou.aliyuncs.com</HostId>
</Error>"#;
        let err = parse_error_document(body, 403).expect("parse");
        assert_eq!(err.status_code, 403);
        assert_eq!(err.code, "AccessDenied");
        assert_eq!(err.message, "The bucket you access does not belong to you.");
        assert_eq!(err.request_id, "5DECB1F6F3150D373335D8D2");
        assert_eq!(err.host_id, "demo.oss-cn-hangzhou.aliyuncs.com");
        assert_eq!(err.ec, None);
    }

    #[test]
    fn test_should_keep_unknown_fields_in_extra() {
        let body = br"<Error>
  <Code>SignatureDoesNotMatch</Code>
  <Message>The request signature we calculated does not match.</Message>
  <RequestId>65467C42E001B4333337****</RequestId>
  <HostId>oss-cn-hangzhou.aliyuncs.com</HostId>
  <StringToSign>GET\n\n\n</StringToSign>
  <SignatureProvided>RizTbeKC/QlwxINq8xEdUPowc84=</SignatureProvided>
  <EC>0002-00000040</EC>
</Error>";
        let err = parse_error_document(body, 403).expect("parse");
        assert_eq!(err.code, "SignatureDoesNotMatch");
        assert_eq!(err.ec.as_deref(), Some("0002-00000040"));
        assert_eq!(
            err.extra.get("SignatureProvided").map(String::as_str),
            Some("RizTbeKC/QlwxINq8xEdUPowc84=")
        );
        assert!(err.extra.contains_key("StringToSign"));
    }

    #[test]
    fn test_should_keep_escaped_characters_in_message() {
        let body = br"<Error>
  <Code>InvalidArgument</Code>
  <Message>Part number must be an integer between 1 &amp; 10000, inclusive</Message>
  <ArgumentValue>a&lt;b&gt;c</ArgumentValue>
</Error>";
        let err = parse_error_document(body, 400).expect("parse");
        assert_eq!(
            err.message,
            "Part number must be an integer between 1 & 10000, inclusive"
        );
        assert_eq!(
            err.extra.get("ArgumentValue").map(String::as_str),
            Some("a<b>c")
        );
    }

    #[test]
    fn test_should_trim_padded_element_text() {
        // Some error bodies carry pretty-printed whitespace around values.
        let body = b"<Error><Code>\n    NoSuchKey\n  </Code><Message> not found </Message></Error>";
        let err = parse_error_document(body, 404).expect("parse");
        assert_eq!(err.code, "NoSuchKey");
        assert_eq!(err.message, "not found");
    }

    #[test]
    fn test_should_reject_non_error_root() {
        let body = b"<NotError><Code>x</Code></NotError>";
        let err = parse_error_document(body, 500).expect_err("must fail");
        assert!(matches!(err, XmlError::MissingElement(_)));
    }

    #[test]
    fn test_should_reject_truncated_body() {
        let body = b"<Error><Code>AccessDen";
        assert!(parse_error_document(body, 403).is_err());
    }
}
