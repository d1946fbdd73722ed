//! Pluggable marshal steps.
//!
//! Steps run after field projection, in the order the operation lists them,
//! and mutate the request envelope in place. Each variant carries the data
//! it needs, so a step list is inert until applied.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::header;
use md5::{Digest, Md5};

use oss_model::types::ObjectIdentifier;
use oss_model::{OssError, OssRequest, RequestBody};
use oss_xml::delete_manifest_xml;

/// A single post-projection transformation of the outbound request.
#[derive(Debug, Clone)]
pub enum MarshalStep {
    /// Infer `Content-Type` from the key's extension when the caller set
    /// none. Skipped when [`OssRequest::FLAG_SKIP_CONTENT_TYPE`] is set.
    InferContentType {
        /// The object key whose extension drives the lookup.
        key: String,
    },
    /// Compute `Content-MD5` over the buffered payload when the caller set
    /// none.
    ContentMd5,
    /// Build the `<Delete>` manifest body for a batch delete.
    DeleteManifest {
        /// The manifest entries, in caller order.
        objects: Vec<ObjectIdentifier>,
        /// Suppress per-key results in the response.
        quiet: bool,
    },
    /// Build the `x-oss-process=<instruction>` form body.
    ProcessBody {
        /// The processing instruction, passed through verbatim.
        process: String,
    },
}

impl MarshalStep {
    /// Apply this step to the request.
    ///
    /// # Errors
    ///
    /// Returns [`OssError::MissingRequiredField`] for an empty delete
    /// manifest, or [`OssError::InvalidInput`] when generated content cannot
    /// be encoded.
    pub fn apply(&self, req: &mut OssRequest) -> Result<(), OssError> {
        match self {
            Self::InferContentType { key } => infer_content_type(req, key),
            Self::ContentMd5 => content_md5(req),
            Self::DeleteManifest { objects, quiet } => delete_manifest(req, objects, *quiet),
            Self::ProcessBody { process } => {
                req.body = RequestBody::from(format!("x-oss-process={process}").into_bytes());
                Ok(())
            }
        }
    }
}

fn infer_content_type(req: &mut OssRequest, key: &str) -> Result<(), OssError> {
    if req.headers.contains_key(header::CONTENT_TYPE)
        || req.has_flag(OssRequest::FLAG_SKIP_CONTENT_TYPE)
    {
        return Ok(());
    }
    let mime = mime_guess::from_path(key)
        .first_raw()
        .unwrap_or("application/octet-stream");
    tracing::debug!(key, mime, "inferred content type");
    crate::marshal::set_header(req, "content-type", mime)
}

fn content_md5(req: &mut OssRequest) -> Result<(), OssError> {
    if req.headers.contains_key("content-md5") {
        return Ok(());
    }
    let Some(data) = req.body.bytes() else {
        return Ok(());
    };
    let digest = Md5::digest(data);
    crate::marshal::set_header(req, "content-md5", &BASE64.encode(digest))
}

fn delete_manifest(
    req: &mut OssRequest,
    objects: &[ObjectIdentifier],
    quiet: bool,
) -> Result<(), OssError> {
    if objects.is_empty() {
        return Err(OssError::MissingRequiredField("Objects"));
    }
    let xml = delete_manifest_xml(objects, quiet)
        .map_err(|e| OssError::invalid_input(e.to_string()))?;
    req.body = RequestBody::from(xml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_should_infer_content_type_from_extension() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        MarshalStep::InferContentType {
            key: "photos/cat.jpg".to_string(),
        }
        .apply(&mut req)
        .expect("apply");
        assert_eq!(
            req.headers.get("content-type").and_then(|v| v.to_str().ok()),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_should_not_override_caller_content_type() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        crate::marshal::set_header(&mut req, "content-type", "application/x-custom")
            .expect("set");
        MarshalStep::InferContentType {
            key: "cat.jpg".to_string(),
        }
        .apply(&mut req)
        .expect("apply");
        assert_eq!(
            req.headers.get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/x-custom")
        );
    }

    #[test]
    fn test_should_skip_inference_when_flagged() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        req.set_flag(OssRequest::FLAG_SKIP_CONTENT_TYPE);
        MarshalStep::InferContentType {
            key: "cat.jpg".to_string(),
        }
        .apply(&mut req)
        .expect("apply");
        assert!(req.headers.get("content-type").is_none());
    }

    #[test]
    fn test_should_fall_back_to_octet_stream() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        MarshalStep::InferContentType {
            key: "no-extension".to_string(),
        }
        .apply(&mut req)
        .expect("apply");
        assert_eq!(
            req.headers.get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn test_should_compute_md5_over_body() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        req.body = RequestBody::from(b"hello oss".to_vec());
        MarshalStep::ContentMd5.apply(&mut req).expect("apply");
        // base64(md5("hello oss"))
        let got = req
            .headers
            .get("content-md5")
            .and_then(|v| v.to_str().ok())
            .expect("header set");
        assert_eq!(got, BASE64.encode(Md5::digest(b"hello oss")));
    }

    #[test]
    fn test_should_keep_caller_md5() {
        let mut req = OssRequest::new("PutObject", Method::PUT);
        req.body = RequestBody::from(b"data".to_vec());
        crate::marshal::set_header(&mut req, "content-md5", "caller-value").expect("set");
        MarshalStep::ContentMd5.apply(&mut req).expect("apply");
        assert_eq!(
            req.headers.get("content-md5").and_then(|v| v.to_str().ok()),
            Some("caller-value")
        );
    }

    #[test]
    fn test_should_skip_md5_without_body() {
        let mut req = OssRequest::new("DeleteObject", Method::DELETE);
        MarshalStep::ContentMd5.apply(&mut req).expect("apply");
        assert!(req.headers.get("content-md5").is_none());
    }

    #[test]
    fn test_should_reject_empty_delete_manifest() {
        let mut req = OssRequest::new("DeleteObjects", Method::POST);
        let err = MarshalStep::DeleteManifest {
            objects: Vec::new(),
            quiet: false,
        }
        .apply(&mut req)
        .expect_err("must fail");
        assert!(err.to_string().contains("missing required field"));
        assert!(err.to_string().contains("Objects"));
    }

    #[test]
    fn test_should_build_manifest_body() {
        let mut req = OssRequest::new("DeleteObjects", Method::POST);
        MarshalStep::DeleteManifest {
            objects: vec![ObjectIdentifier {
                key: "a.txt".to_string(),
                version_id: None,
            }],
            quiet: true,
        }
        .apply(&mut req)
        .expect("apply");
        let body = String::from_utf8(req.body.bytes().expect("body").to_vec()).expect("utf8");
        assert!(body.contains("<Quiet>true</Quiet>"));
        assert!(body.contains("<Key>a.txt</Key>"));
    }

    #[test]
    fn test_should_build_process_form_body() {
        let mut req = OssRequest::new("ProcessObject", Method::POST);
        MarshalStep::ProcessBody {
            process: "image/resize,w_100|sys/saveas,o_dGVzdA".to_string(),
        }
        .apply(&mut req)
        .expect("apply");
        assert_eq!(
            req.body.bytes().expect("body").as_ref(),
            b"x-oss-process=image/resize,w_100|sys/saveas,o_dGVzdA"
        );
    }
}
