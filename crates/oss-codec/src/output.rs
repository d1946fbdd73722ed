//! Unmarshal step lists and hooks for every operation output.

use http::HeaderMap;

use oss_model::OssError;
use oss_model::output::{
    AbortMultipartUploadOutput, AppendObjectOutput, CompleteMultipartUploadOutput,
    CopyObjectOutput, DeleteObjectOutput, DeleteObjectTaggingOutput, DeleteObjectsOutput,
    GetObjectAclOutput, GetObjectMetaOutput, GetObjectOutput, GetObjectTaggingOutput,
    GetSymlinkOutput, HeadObjectOutput, InitiateMultipartUploadOutput, ListObjectsOutput,
    ListPartsOutput, ProcessObjectOutput, PutObjectAclOutput, PutObjectOutput,
    PutObjectTaggingOutput, PutSymlinkOutput, RestoreObjectOutput, UploadPartCopyOutput,
    UploadPartOutput,
};
use oss_model::response::ResponseMeta;
use oss_model::types::EncodingType;
use oss_xml::from_xml;

use crate::unmarshal::{
    OssUnmarshal, UnmarshalStep, collect_user_metadata, decode_url_component, decode_xml_into,
    header_parse, header_str,
};

const HEADER_ONLY: &[UnmarshalStep] = &[UnmarshalStep::Header];
const HEADER_DISCARD: &[UnmarshalStep] = &[UnmarshalStep::Header, UnmarshalStep::DiscardBody];
const HEADER_XML: &[UnmarshalStep] = &[UnmarshalStep::Header, UnmarshalStep::BodyXml];
const HEADER_XML_URL: &[UnmarshalStep] = &[
    UnmarshalStep::Header,
    UnmarshalStep::BodyXml,
    UnmarshalStep::DecodeUrl,
];

fn decode_opt(field: &mut Option<String>) -> Result<(), OssError> {
    if let Some(value) = field.take() {
        *field = Some(decode_url_component(&value)?);
    }
    Ok(())
}

impl OssUnmarshal for PutObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        &[UnmarshalStep::Header, UnmarshalStep::BodyCallback]
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_callback(&mut self, value: serde_json::Value) {
        self.callback_result = Some(value);
    }
}

impl OssUnmarshal for GetObjectOutput {
    // The object content stays on the response for the caller to stream.
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_ONLY
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.metadata = collect_user_metadata(headers);
        self.object_type = header_str(headers, "x-oss-object-type");
        self.restore = header_str(headers, "x-oss-restore");
        self.tag_count = header_parse(headers, "x-oss-tagging-count");
        self.process_status = header_str(headers, "x-oss-process-status");
        Ok(())
    }
}

impl OssUnmarshal for CopyObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.source_version_id = header_str(headers, "x-oss-copy-source-version-id");
        Ok(())
    }

    // Field copy rather than wholesale replacement: the header hook has
    // already populated source_version_id.
    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        let decoded: Self = from_xml(body).map_err(|e| OssError::decode(e.to_string()))?;
        self.etag = decoded.etag;
        self.last_modified = decoded.last_modified;
        Ok(())
    }
}

impl OssUnmarshal for AppendObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.next_position = header_parse(headers, "x-oss-next-append-position");
        Ok(())
    }
}

impl OssUnmarshal for HeadObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_ONLY
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.metadata = collect_user_metadata(headers);
        self.object_type = header_str(headers, "x-oss-object-type");
        self.restore = header_str(headers, "x-oss-restore");
        self.expiration = header_str(headers, "x-oss-expiration");
        Ok(())
    }
}

impl OssUnmarshal for GetObjectMetaOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_ONLY
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for DeleteObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for DeleteObjectsOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML_URL
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }

    fn decode_url_fields(&mut self) -> Result<(), OssError> {
        if self.encoding_type != Some(EncodingType::Url) {
            return Ok(());
        }
        for entry in &mut self.deleted {
            entry.key = decode_url_component(&entry.key)?;
        }
        Ok(())
    }
}

impl OssUnmarshal for ListObjectsOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML_URL
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }

    fn decode_url_fields(&mut self) -> Result<(), OssError> {
        if self.encoding_type != Some(EncodingType::Url) {
            return Ok(());
        }
        decode_opt(&mut self.prefix)?;
        decode_opt(&mut self.marker)?;
        decode_opt(&mut self.next_marker)?;
        decode_opt(&mut self.delimiter)?;
        for object in &mut self.objects {
            object.key = decode_url_component(&object.key)?;
        }
        for prefix in &mut self.common_prefixes {
            *prefix = decode_url_component(prefix)?;
        }
        Ok(())
    }
}

impl OssUnmarshal for PutObjectAclOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for GetObjectAclOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }
}

impl OssUnmarshal for PutSymlinkOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for GetSymlinkOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.target = header_str(headers, "x-oss-symlink-target");
        self.metadata = collect_user_metadata(headers);
        Ok(())
    }
}

impl OssUnmarshal for RestoreObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_headers(&mut self, headers: &HeaderMap) -> Result<(), OssError> {
        self.restore_priority = header_str(headers, "x-oss-object-restore-priority");
        Ok(())
    }
}

impl OssUnmarshal for ProcessObjectOutput {
    fn steps() -> &'static [UnmarshalStep] {
        &[UnmarshalStep::Header, UnmarshalStep::BodyDefault]
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_json(&mut self, value: serde_json::Value) -> Result<(), OssError> {
        self.bucket = value
            .get("bucket")
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned);
        self.object = value
            .get("object")
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned);
        self.file_size = value.get("fileSize").and_then(serde_json::Value::as_i64);
        self.process_status = value
            .get("status")
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned);
        self.raw = Some(value);
        Ok(())
    }
}

impl OssUnmarshal for PutObjectTaggingOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for GetObjectTaggingOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }
}

impl OssUnmarshal for DeleteObjectTaggingOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for InitiateMultipartUploadOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML_URL
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }

    fn decode_url_fields(&mut self) -> Result<(), OssError> {
        if self.encoding_type != Some(EncodingType::Url) {
            return Ok(());
        }
        decode_opt(&mut self.key)
    }
}

impl OssUnmarshal for UploadPartOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for UploadPartCopyOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }
}

impl OssUnmarshal for CompleteMultipartUploadOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    // A completion with a callback returns the callback endpoint's JSON
    // reply instead of the usual XML document.
    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        if body.trim_ascii_start().first() == Some(&b'{') {
            let value = serde_json::from_slice(body)
                .map_err(|e| OssError::decode(format!("invalid callback reply: {e}")))?;
            self.callback_result = Some(value);
            return Ok(());
        }
        let decoded: Self = from_xml(body).map_err(|e| OssError::decode(e.to_string()))?;
        self.location = decoded.location;
        self.bucket = decoded.bucket;
        self.key = decoded.key;
        self.etag = decoded.etag;
        Ok(())
    }
}

impl OssUnmarshal for AbortMultipartUploadOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_DISCARD
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }
}

impl OssUnmarshal for ListPartsOutput {
    fn steps() -> &'static [UnmarshalStep] {
        HEADER_XML_URL
    }

    fn meta_mut(&mut self) -> &mut ResponseMeta {
        &mut self.meta
    }

    fn apply_xml(&mut self, body: &[u8]) -> Result<(), OssError> {
        decode_xml_into(self, body)
    }

    fn decode_url_fields(&mut self) -> Result<(), OssError> {
        if self.encoding_type != Some(EncodingType::Url) {
            return Ok(());
        }
        decode_opt(&mut self.key)
    }
}
