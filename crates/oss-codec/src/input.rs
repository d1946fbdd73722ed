//! Descriptor tables and marshal hooks for every operation input.
//!
//! Each impl is a flat table naming where every field goes on the wire,
//! plus the hooks the table cannot express: user-metadata prefix headers,
//! the composite copy-source header, generated XML payloads, and the
//! operation's marshal steps.

use http::Method;

use oss_model::input::{
    AbortMultipartUploadInput, AppendObjectInput, CompleteMultipartUploadInput, CopyObjectInput,
    DeleteObjectInput, DeleteObjectTaggingInput, DeleteObjectsInput, GetObjectAclInput,
    GetObjectInput, GetObjectMetaInput, GetObjectTaggingInput, GetSymlinkInput,
    HeadObjectInput, InitiateMultipartUploadInput, ListObjectsInput, ListPartsInput,
    ProcessObjectInput, PutObjectAclInput, PutObjectInput, PutObjectTaggingInput,
    PutSymlinkInput, RestoreObjectInput, UploadPartCopyInput, UploadPartInput,
};
use oss_model::{OssError, OssRequest, RequestBody};
use oss_xml::{complete_multipart_xml, restore_request_xml, tagging_xml};

use crate::marshal::{
    FieldSpec, FieldValue, OssMarshal, WireKind, apply_user_metadata, format_copy_source,
    set_header,
};
use crate::steps::MarshalStep;

// Accessor helpers shared by the tables. Absence is `None`; zero numeric
// fields are absent unless the operation says otherwise.

fn text(s: &str) -> Option<FieldValue> {
    (!s.is_empty()).then(|| FieldValue::Str(s.to_string()))
}

fn opt_text(s: &Option<String>) -> Option<FieldValue> {
    s.clone().map(FieldValue::Str)
}

fn opt_time(t: &Option<chrono::DateTime<chrono::Utc>>) -> Option<FieldValue> {
    t.map(FieldValue::Time)
}

fn opt_flag(b: &Option<bool>) -> Option<FieldValue> {
    b.map(FieldValue::Bool)
}

fn positive(n: i64) -> Option<FieldValue> {
    (n > 0).then_some(FieldValue::Int(n))
}

impl OssMarshal for PutObjectInput {
    const OPERATION: &'static str = "PutObject";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<PutObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: false, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "StorageClass", kind: WireKind::Header("x-oss-storage-class"), required: false, get: |v| v.storage_class.map(|s| FieldValue::Str(s.to_string())) },
            FieldSpec { name: "CacheControl", kind: WireKind::Header("cache-control"), required: false, get: |v| opt_text(&v.cache_control) },
            FieldSpec { name: "ContentDisposition", kind: WireKind::Header("content-disposition"), required: false, get: |v| opt_text(&v.content_disposition) },
            FieldSpec { name: "ContentEncoding", kind: WireKind::Header("content-encoding"), required: false, get: |v| opt_text(&v.content_encoding) },
            FieldSpec { name: "ContentMd5", kind: WireKind::Header("content-md5"), required: false, get: |v| opt_text(&v.content_md5) },
            FieldSpec { name: "ContentType", kind: WireKind::Header("content-type"), required: false, get: |v| opt_text(&v.content_type) },
            FieldSpec { name: "Expires", kind: WireKind::Header("expires"), required: false, get: |v| opt_text(&v.expires) },
            FieldSpec { name: "ServerSideEncryption", kind: WireKind::Header("x-oss-server-side-encryption"), required: false, get: |v| opt_text(&v.server_side_encryption) },
            FieldSpec { name: "SseKmsKeyId", kind: WireKind::Header("x-oss-server-side-encryption-key-id"), required: false, get: |v| opt_text(&v.sse_kms_key_id) },
            FieldSpec { name: "Tagging", kind: WireKind::Header("x-oss-tagging"), required: false, get: |v| opt_text(&v.tagging) },
            FieldSpec { name: "ForbidOverwrite", kind: WireKind::Header("x-oss-forbid-overwrite"), required: false, get: |v| opt_flag(&v.forbid_overwrite) },
            FieldSpec { name: "TrafficLimit", kind: WireKind::Header("x-oss-traffic-limit"), required: false, get: |v| positive(v.traffic_limit) },
            FieldSpec { name: "Callback", kind: WireKind::Header("x-oss-callback"), required: false, get: |v| opt_text(&v.callback) },
            FieldSpec { name: "CallbackVar", kind: WireKind::Header("x-oss-callback-var"), required: false, get: |v| opt_text(&v.callback_var) },
        ];
        SPECS
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        apply_user_metadata(req, &self.metadata)
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        Ok(self.body.clone())
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![
            MarshalStep::InferContentType { key: self.key.clone() },
            MarshalStep::ContentMd5,
        ]
    }
}

impl OssMarshal for GetObjectInput {
    const OPERATION: &'static str = "GetObject";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<GetObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Range", kind: WireKind::Header("range"), required: false, get: |v| opt_text(&v.range) },
            FieldSpec { name: "IfModifiedSince", kind: WireKind::Header("if-modified-since"), required: false, get: |v| opt_time(&v.if_modified_since) },
            FieldSpec { name: "IfUnmodifiedSince", kind: WireKind::Header("if-unmodified-since"), required: false, get: |v| opt_time(&v.if_unmodified_since) },
            FieldSpec { name: "IfMatch", kind: WireKind::Header("if-match"), required: false, get: |v| opt_text(&v.if_match) },
            FieldSpec { name: "IfNoneMatch", kind: WireKind::Header("if-none-match"), required: false, get: |v| opt_text(&v.if_none_match) },
            FieldSpec { name: "AcceptEncoding", kind: WireKind::Header("accept-encoding"), required: false, get: |v| opt_text(&v.accept_encoding) },
            FieldSpec { name: "TrafficLimit", kind: WireKind::Header("x-oss-traffic-limit"), required: false, get: |v| positive(v.traffic_limit) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
            FieldSpec { name: "Process", kind: WireKind::Query("x-oss-process"), required: false, get: |v| opt_text(&v.process) },
            FieldSpec { name: "ResponseContentType", kind: WireKind::Query("response-content-type"), required: false, get: |v| opt_text(&v.response_content_type) },
            FieldSpec { name: "ResponseCacheControl", kind: WireKind::Query("response-cache-control"), required: false, get: |v| opt_text(&v.response_cache_control) },
            FieldSpec { name: "ResponseContentDisposition", kind: WireKind::Query("response-content-disposition"), required: false, get: |v| opt_text(&v.response_content_disposition) },
        ];
        SPECS
    }
}

impl OssMarshal for CopyObjectInput {
    const OPERATION: &'static str = "CopyObject";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<CopyObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "SourceBucket", kind: WireKind::Virtual, required: true, get: |v| text(&v.source_bucket) },
            FieldSpec { name: "SourceKey", kind: WireKind::Virtual, required: true, get: |v| text(&v.source_key) },
            FieldSpec { name: "SourceIfMatch", kind: WireKind::Header("x-oss-copy-source-if-match"), required: false, get: |v| opt_text(&v.source_if_match) },
            FieldSpec { name: "SourceIfNoneMatch", kind: WireKind::Header("x-oss-copy-source-if-none-match"), required: false, get: |v| opt_text(&v.source_if_none_match) },
            FieldSpec { name: "SourceIfModifiedSince", kind: WireKind::Header("x-oss-copy-source-if-modified-since"), required: false, get: |v| opt_time(&v.source_if_modified_since) },
            FieldSpec { name: "SourceIfUnmodifiedSince", kind: WireKind::Header("x-oss-copy-source-if-unmodified-since"), required: false, get: |v| opt_time(&v.source_if_unmodified_since) },
            FieldSpec { name: "MetadataDirective", kind: WireKind::Header("x-oss-metadata-directive"), required: false, get: |v| v.metadata_directive.map(|d| FieldValue::Str(d.to_string())) },
            FieldSpec { name: "TaggingDirective", kind: WireKind::Header("x-oss-tagging-directive"), required: false, get: |v| v.tagging_directive.map(|d| FieldValue::Str(d.to_string())) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: false, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "StorageClass", kind: WireKind::Header("x-oss-storage-class"), required: false, get: |v| v.storage_class.map(|s| FieldValue::Str(s.to_string())) },
            FieldSpec { name: "ServerSideEncryption", kind: WireKind::Header("x-oss-server-side-encryption"), required: false, get: |v| opt_text(&v.server_side_encryption) },
            FieldSpec { name: "Tagging", kind: WireKind::Header("x-oss-tagging"), required: false, get: |v| opt_text(&v.tagging) },
            FieldSpec { name: "ForbidOverwrite", kind: WireKind::Header("x-oss-forbid-overwrite"), required: false, get: |v| opt_flag(&v.forbid_overwrite) },
        ];
        SPECS
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        let source = format_copy_source(
            &self.source_bucket,
            &self.source_key,
            self.source_version_id.as_deref(),
        );
        set_header(req, "x-oss-copy-source", &source)?;
        apply_user_metadata(req, &self.metadata)
    }
}

impl OssMarshal for AppendObjectInput {
    const OPERATION: &'static str = "AppendObject";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<AppendObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            // Always sent; zero starts a new appendable object.
            FieldSpec { name: "Position", kind: WireKind::Query("position"), required: true, get: |v| Some(FieldValue::Int(v.position)) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: false, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "StorageClass", kind: WireKind::Header("x-oss-storage-class"), required: false, get: |v| v.storage_class.map(|s| FieldValue::Str(s.to_string())) },
            FieldSpec { name: "CacheControl", kind: WireKind::Header("cache-control"), required: false, get: |v| opt_text(&v.cache_control) },
            FieldSpec { name: "ContentDisposition", kind: WireKind::Header("content-disposition"), required: false, get: |v| opt_text(&v.content_disposition) },
            FieldSpec { name: "ContentEncoding", kind: WireKind::Header("content-encoding"), required: false, get: |v| opt_text(&v.content_encoding) },
            FieldSpec { name: "ContentMd5", kind: WireKind::Header("content-md5"), required: false, get: |v| opt_text(&v.content_md5) },
            FieldSpec { name: "ContentType", kind: WireKind::Header("content-type"), required: false, get: |v| opt_text(&v.content_type) },
            FieldSpec { name: "TrafficLimit", kind: WireKind::Header("x-oss-traffic-limit"), required: false, get: |v| positive(v.traffic_limit) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["append"]
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        apply_user_metadata(req, &self.metadata)
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        Ok(self.body.clone())
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![
            MarshalStep::InferContentType { key: self.key.clone() },
            MarshalStep::ContentMd5,
        ]
    }
}

impl OssMarshal for HeadObjectInput {
    const OPERATION: &'static str = "HeadObject";
    const METHOD: Method = Method::HEAD;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<HeadObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "IfModifiedSince", kind: WireKind::Header("if-modified-since"), required: false, get: |v| opt_time(&v.if_modified_since) },
            FieldSpec { name: "IfUnmodifiedSince", kind: WireKind::Header("if-unmodified-since"), required: false, get: |v| opt_time(&v.if_unmodified_since) },
            FieldSpec { name: "IfMatch", kind: WireKind::Header("if-match"), required: false, get: |v| opt_text(&v.if_match) },
            FieldSpec { name: "IfNoneMatch", kind: WireKind::Header("if-none-match"), required: false, get: |v| opt_text(&v.if_none_match) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }
}

impl OssMarshal for GetObjectMetaInput {
    const OPERATION: &'static str = "GetObjectMeta";
    const METHOD: Method = Method::HEAD;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<GetObjectMetaInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["objectMeta"]
    }
}

impl OssMarshal for DeleteObjectInput {
    const OPERATION: &'static str = "DeleteObject";
    const METHOD: Method = Method::DELETE;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<DeleteObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }
}

impl OssMarshal for DeleteObjectsInput {
    const OPERATION: &'static str = "DeleteObjects";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<DeleteObjectsInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            // An empty manifest is a validation error, not an empty body.
            FieldSpec { name: "Objects", kind: WireKind::Virtual, required: true, get: |v| (!v.objects.is_empty()).then_some(FieldValue::Bool(true)) },
            FieldSpec { name: "EncodingType", kind: WireKind::Query("encoding-type"), required: false, get: |v| v.encoding_type.map(|e| FieldValue::Str(e.to_string())) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["delete"]
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![
            MarshalStep::DeleteManifest {
                objects: self.objects.clone(),
                quiet: self.quiet,
            },
            MarshalStep::ContentMd5,
        ]
    }
}

impl OssMarshal for ListObjectsInput {
    const OPERATION: &'static str = "ListObjects";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<ListObjectsInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Prefix", kind: WireKind::Query("prefix"), required: false, get: |v| opt_text(&v.prefix) },
            FieldSpec { name: "Marker", kind: WireKind::Query("marker"), required: false, get: |v| opt_text(&v.marker) },
            FieldSpec { name: "Delimiter", kind: WireKind::Query("delimiter"), required: false, get: |v| opt_text(&v.delimiter) },
            FieldSpec { name: "MaxKeys", kind: WireKind::Query("max-keys"), required: false, get: |v| positive(i64::from(v.max_keys)) },
            FieldSpec { name: "EncodingType", kind: WireKind::Query("encoding-type"), required: false, get: |v| v.encoding_type.map(|e| FieldValue::Str(e.to_string())) },
        ];
        SPECS
    }
}

impl OssMarshal for PutObjectAclInput {
    const OPERATION: &'static str = "PutObjectAcl";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<PutObjectAclInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: true, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["acl"]
    }
}

impl OssMarshal for GetObjectAclInput {
    const OPERATION: &'static str = "GetObjectAcl";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<GetObjectAclInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["acl"]
    }
}

impl OssMarshal for PutSymlinkInput {
    const OPERATION: &'static str = "PutSymlink";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<PutSymlinkInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Target", kind: WireKind::Header("x-oss-symlink-target"), required: true, get: |v| text(&v.target) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: false, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "StorageClass", kind: WireKind::Header("x-oss-storage-class"), required: false, get: |v| v.storage_class.map(|s| FieldValue::Str(s.to_string())) },
            FieldSpec { name: "ForbidOverwrite", kind: WireKind::Header("x-oss-forbid-overwrite"), required: false, get: |v| opt_flag(&v.forbid_overwrite) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["symlink"]
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        apply_user_metadata(req, &self.metadata)
    }
}

impl OssMarshal for GetSymlinkInput {
    const OPERATION: &'static str = "GetSymlink";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<GetSymlinkInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["symlink"]
    }
}

impl OssMarshal for RestoreObjectInput {
    const OPERATION: &'static str = "RestoreObject";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<RestoreObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["restore"]
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        // Zero days sends no body; the service applies its default window.
        if self.days <= 0 {
            return Ok(RequestBody::Empty);
        }
        let xml = restore_request_xml(self.days, self.tier)
            .map_err(|e| OssError::invalid_input(e.to_string()))?;
        Ok(RequestBody::from(xml))
    }
}

impl OssMarshal for ProcessObjectInput {
    const OPERATION: &'static str = "ProcessObject";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<ProcessObjectInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Process", kind: WireKind::Virtual, required: true, get: |v| text(&v.process) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["x-oss-process"]
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![MarshalStep::ProcessBody {
            process: self.process.clone(),
        }]
    }
}

impl OssMarshal for PutObjectTaggingInput {
    const OPERATION: &'static str = "PutObjectTagging";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<PutObjectTaggingInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "Tagging", kind: WireKind::Virtual, required: true, get: |v| (!v.tagging.tags.is_empty()).then_some(FieldValue::Bool(true)) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["tagging"]
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        let xml = tagging_xml(&self.tagging).map_err(|e| OssError::invalid_input(e.to_string()))?;
        Ok(RequestBody::from(xml))
    }
}

impl OssMarshal for GetObjectTaggingInput {
    const OPERATION: &'static str = "GetObjectTagging";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<GetObjectTaggingInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["tagging"]
    }
}

impl OssMarshal for DeleteObjectTaggingInput {
    const OPERATION: &'static str = "DeleteObjectTagging";
    const METHOD: Method = Method::DELETE;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<DeleteObjectTaggingInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "VersionId", kind: WireKind::Query("versionId"), required: false, get: |v| opt_text(&v.version_id) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["tagging"]
    }
}

impl OssMarshal for InitiateMultipartUploadInput {
    const OPERATION: &'static str = "InitiateMultipartUpload";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<InitiateMultipartUploadInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "StorageClass", kind: WireKind::Header("x-oss-storage-class"), required: false, get: |v| v.storage_class.map(|s| FieldValue::Str(s.to_string())) },
            FieldSpec { name: "CacheControl", kind: WireKind::Header("cache-control"), required: false, get: |v| opt_text(&v.cache_control) },
            FieldSpec { name: "ContentDisposition", kind: WireKind::Header("content-disposition"), required: false, get: |v| opt_text(&v.content_disposition) },
            FieldSpec { name: "ContentEncoding", kind: WireKind::Header("content-encoding"), required: false, get: |v| opt_text(&v.content_encoding) },
            FieldSpec { name: "ContentType", kind: WireKind::Header("content-type"), required: false, get: |v| opt_text(&v.content_type) },
            FieldSpec { name: "ServerSideEncryption", kind: WireKind::Header("x-oss-server-side-encryption"), required: false, get: |v| opt_text(&v.server_side_encryption) },
            FieldSpec { name: "ForbidOverwrite", kind: WireKind::Header("x-oss-forbid-overwrite"), required: false, get: |v| opt_flag(&v.forbid_overwrite) },
            FieldSpec { name: "EncodingType", kind: WireKind::Query("encoding-type"), required: false, get: |v| v.encoding_type.map(|e| FieldValue::Str(e.to_string())) },
        ];
        SPECS
    }

    fn sub_resources() -> &'static [&'static str] {
        &["uploads"]
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        apply_user_metadata(req, &self.metadata)
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![MarshalStep::InferContentType { key: self.key.clone() }]
    }
}

impl OssMarshal for UploadPartInput {
    const OPERATION: &'static str = "UploadPart";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<UploadPartInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "UploadId", kind: WireKind::Query("uploadId"), required: true, get: |v| text(&v.upload_id) },
            // Parts number from 1; zero is absent.
            FieldSpec { name: "PartNumber", kind: WireKind::Query("partNumber"), required: true, get: |v| positive(i64::from(v.part_number)) },
            FieldSpec { name: "ContentMd5", kind: WireKind::Header("content-md5"), required: false, get: |v| opt_text(&v.content_md5) },
            FieldSpec { name: "TrafficLimit", kind: WireKind::Header("x-oss-traffic-limit"), required: false, get: |v| positive(v.traffic_limit) },
        ];
        SPECS
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        Ok(self.body.clone())
    }

    fn steps(&self) -> Vec<MarshalStep> {
        vec![MarshalStep::ContentMd5]
    }
}

impl OssMarshal for UploadPartCopyInput {
    const OPERATION: &'static str = "UploadPartCopy";
    const METHOD: Method = Method::PUT;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<UploadPartCopyInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "UploadId", kind: WireKind::Query("uploadId"), required: true, get: |v| text(&v.upload_id) },
            FieldSpec { name: "PartNumber", kind: WireKind::Query("partNumber"), required: true, get: |v| positive(i64::from(v.part_number)) },
            FieldSpec { name: "SourceBucket", kind: WireKind::Virtual, required: true, get: |v| text(&v.source_bucket) },
            FieldSpec { name: "SourceKey", kind: WireKind::Virtual, required: true, get: |v| text(&v.source_key) },
            FieldSpec { name: "SourceRange", kind: WireKind::Header("x-oss-copy-source-range"), required: false, get: |v| opt_text(&v.source_range) },
            FieldSpec { name: "SourceIfMatch", kind: WireKind::Header("x-oss-copy-source-if-match"), required: false, get: |v| opt_text(&v.source_if_match) },
            FieldSpec { name: "SourceIfNoneMatch", kind: WireKind::Header("x-oss-copy-source-if-none-match"), required: false, get: |v| opt_text(&v.source_if_none_match) },
            FieldSpec { name: "SourceIfModifiedSince", kind: WireKind::Header("x-oss-copy-source-if-modified-since"), required: false, get: |v| opt_time(&v.source_if_modified_since) },
            FieldSpec { name: "SourceIfUnmodifiedSince", kind: WireKind::Header("x-oss-copy-source-if-unmodified-since"), required: false, get: |v| opt_time(&v.source_if_unmodified_since) },
        ];
        SPECS
    }

    fn marshal_extra(&self, req: &mut OssRequest) -> Result<(), OssError> {
        let source = format_copy_source(
            &self.source_bucket,
            &self.source_key,
            self.source_version_id.as_deref(),
        );
        set_header(req, "x-oss-copy-source", &source)
    }
}

impl OssMarshal for CompleteMultipartUploadInput {
    const OPERATION: &'static str = "CompleteMultipartUpload";
    const METHOD: Method = Method::POST;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<CompleteMultipartUploadInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "UploadId", kind: WireKind::Query("uploadId"), required: true, get: |v| text(&v.upload_id) },
            FieldSpec { name: "Parts", kind: WireKind::Virtual, required: true, get: |v| (!v.parts.is_empty()).then_some(FieldValue::Bool(true)) },
            FieldSpec { name: "Acl", kind: WireKind::Header("x-oss-object-acl"), required: false, get: |v| v.acl.map(|a| FieldValue::Str(a.to_string())) },
            FieldSpec { name: "ForbidOverwrite", kind: WireKind::Header("x-oss-forbid-overwrite"), required: false, get: |v| opt_flag(&v.forbid_overwrite) },
            FieldSpec { name: "Callback", kind: WireKind::Header("x-oss-callback"), required: false, get: |v| opt_text(&v.callback) },
            FieldSpec { name: "CallbackVar", kind: WireKind::Header("x-oss-callback-var"), required: false, get: |v| opt_text(&v.callback_var) },
        ];
        SPECS
    }

    fn payload(&self) -> Result<RequestBody, OssError> {
        let xml = complete_multipart_xml(&self.parts)
            .map_err(|e| OssError::invalid_input(e.to_string()))?;
        Ok(RequestBody::from(xml))
    }
}

impl OssMarshal for AbortMultipartUploadInput {
    const OPERATION: &'static str = "AbortMultipartUpload";
    const METHOD: Method = Method::DELETE;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<AbortMultipartUploadInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "UploadId", kind: WireKind::Query("uploadId"), required: true, get: |v| text(&v.upload_id) },
        ];
        SPECS
    }
}

impl OssMarshal for ListPartsInput {
    const OPERATION: &'static str = "ListParts";
    const METHOD: Method = Method::GET;

    fn field_specs() -> &'static [FieldSpec<Self>] {
        const SPECS: &[FieldSpec<ListPartsInput>] = &[
            FieldSpec { name: "Bucket", kind: WireKind::Bucket, required: true, get: |v| text(&v.bucket) },
            FieldSpec { name: "Key", kind: WireKind::Key, required: true, get: |v| text(&v.key) },
            FieldSpec { name: "UploadId", kind: WireKind::Query("uploadId"), required: true, get: |v| text(&v.upload_id) },
            FieldSpec { name: "MaxParts", kind: WireKind::Query("max-parts"), required: false, get: |v| positive(i64::from(v.max_parts)) },
            FieldSpec { name: "PartNumberMarker", kind: WireKind::Query("part-number-marker"), required: false, get: |v| positive(i64::from(v.part_number_marker)) },
            FieldSpec { name: "EncodingType", kind: WireKind::Query("encoding-type"), required: false, get: |v| v.encoding_type.map(|e| FieldValue::Str(e.to_string())) },
        ];
        SPECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oss_model::types::{CompletedPart, ObjectAcl, ObjectIdentifier, Tag, Tagging};

    use crate::marshal::marshal_request;

    fn header<'a>(req: &'a OssRequest, name: &str) -> Option<&'a str> {
        req.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_should_fail_on_missing_bucket_before_projection() {
        let input = PutObjectInput {
            key: "a.txt".to_string(),
            ..PutObjectInput::default()
        };
        let err = marshal_request(&input).expect_err("must fail");
        let text = err.to_string();
        assert!(text.contains("missing required field"));
        assert!(text.contains("Bucket"));
    }

    #[test]
    fn test_should_send_traffic_limit_in_decimal() {
        let input = PutObjectInput {
            bucket: "demo".to_string(),
            key: "a.txt".to_string(),
            traffic_limit: 819_200,
            ..PutObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(header(&req, "x-oss-traffic-limit"), Some("819200"));
    }

    #[test]
    fn test_should_omit_zero_traffic_limit() {
        let input = GetObjectInput {
            bucket: "demo".to_string(),
            key: "a.txt".to_string(),
            ..GetObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert!(req.headers.get("x-oss-traffic-limit").is_none());
    }

    #[test]
    fn test_should_infer_content_type_for_put() {
        let input = PutObjectInput {
            bucket: "demo".to_string(),
            key: "report.pdf".to_string(),
            ..PutObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(header(&req, "content-type"), Some("application/pdf"));
    }

    #[test]
    fn test_should_keep_explicit_content_type() {
        let input = PutObjectInput {
            bucket: "demo".to_string(),
            key: "report.pdf".to_string(),
            content_type: Some("text/plain".to_string()),
            ..PutObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(header(&req, "content-type"), Some("text/plain"));
    }

    #[test]
    fn test_should_escape_plus_in_copy_source() {
        let input = CopyObjectInput {
            bucket: "dst".to_string(),
            key: "copy.txt".to_string(),
            source_bucket: "src".to_string(),
            source_key: "a+b c.txt".to_string(),
            ..CopyObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(
            header(&req, "x-oss-copy-source"),
            Some("/src/a%2Bb%20c.txt")
        );
    }

    #[test]
    fn test_should_require_copy_source_bucket() {
        let input = CopyObjectInput {
            bucket: "dst".to_string(),
            key: "copy.txt".to_string(),
            source_key: "a.txt".to_string(),
            ..CopyObjectInput::default()
        };
        let err = marshal_request(&input).expect_err("must fail");
        assert!(err.to_string().contains("SourceBucket"));
    }

    #[test]
    fn test_should_always_send_append_position() {
        let input = AppendObjectInput {
            bucket: "demo".to_string(),
            key: "log".to_string(),
            position: 0,
            ..AppendObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(req.params.get("position").map(String::as_str), Some("0"));
        assert_eq!(req.params.get("append").map(String::as_str), Some(""));
    }

    #[test]
    fn test_should_build_delete_manifest_with_md5() {
        let input = DeleteObjectsInput {
            bucket: "demo".to_string(),
            objects: vec![
                ObjectIdentifier { key: "a".to_string(), version_id: None },
                ObjectIdentifier {
                    key: "b".to_string(),
                    version_id: Some("CAEQNhiBgM0BYiIDc0YQ".to_string()),
                },
            ],
            quiet: false,
            ..DeleteObjectsInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.params.get("delete").map(String::as_str), Some(""));
        assert!(req.headers.get("content-md5").is_some());
        let body = String::from_utf8(req.body.bytes().expect("body").to_vec()).expect("utf8");
        assert!(body.starts_with("<Delete>"));
        assert!(body.contains("<VersionId>CAEQNhiBgM0BYiIDc0YQ</VersionId>"));
    }

    #[test]
    fn test_should_reject_empty_delete_batch() {
        let input = DeleteObjectsInput {
            bucket: "demo".to_string(),
            ..DeleteObjectsInput::default()
        };
        let err = marshal_request(&input).expect_err("must fail");
        assert!(err.to_string().contains("Objects"));
    }

    #[test]
    fn test_should_require_acl_value() {
        let input = PutObjectAclInput {
            bucket: "demo".to_string(),
            key: "a.txt".to_string(),
            acl: None,
            ..PutObjectAclInput::default()
        };
        let err = marshal_request(&input).expect_err("must fail");
        assert!(err.to_string().contains("Acl"));

        let input = PutObjectAclInput {
            acl: Some(ObjectAcl::PublicRead),
            ..input
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(header(&req, "x-oss-object-acl"), Some("public-read"));
        assert_eq!(req.params.get("acl").map(String::as_str), Some(""));
    }

    #[test]
    fn test_should_reject_zero_part_number() {
        let input = UploadPartInput {
            bucket: "demo".to_string(),
            key: "a.bin".to_string(),
            upload_id: "UPLOAD".to_string(),
            part_number: 0,
            ..UploadPartInput::default()
        };
        let err = marshal_request(&input).expect_err("must fail");
        assert!(err.to_string().contains("PartNumber"));
    }

    #[test]
    fn test_should_sort_completion_parts_ascending() {
        let input = CompleteMultipartUploadInput {
            bucket: "demo".to_string(),
            key: "a.bin".to_string(),
            upload_id: "UPLOAD".to_string(),
            parts: vec![
                CompletedPart { part_number: 3, etag: "E3".to_string() },
                CompletedPart { part_number: 1, etag: "E1".to_string() },
                CompletedPart { part_number: 2, etag: "E2".to_string() },
            ],
            ..CompleteMultipartUploadInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        let body = String::from_utf8(req.body.bytes().expect("body").to_vec()).expect("utf8");
        let p1 = body.find("<PartNumber>1</PartNumber>").expect("part 1");
        let p2 = body.find("<PartNumber>2</PartNumber>").expect("part 2");
        let p3 = body.find("<PartNumber>3</PartNumber>").expect("part 3");
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn test_should_build_process_body_not_query() {
        let input = ProcessObjectInput {
            bucket: "demo".to_string(),
            key: "in.jpg".to_string(),
            process: "image/resize,w_100".to_string(),
        };
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(
            req.params.get("x-oss-process").map(String::as_str),
            Some("")
        );
        assert_eq!(
            req.body.bytes().expect("body").as_ref(),
            b"x-oss-process=image/resize,w_100"
        );
    }

    #[test]
    fn test_should_send_tagging_document() {
        let input = PutObjectTaggingInput {
            bucket: "demo".to_string(),
            key: "a.txt".to_string(),
            tagging: Tagging {
                tags: vec![Tag { key: "team".to_string(), value: "infra".to_string() }],
            },
            ..PutObjectTaggingInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        let body = String::from_utf8(req.body.bytes().expect("body").to_vec()).expect("utf8");
        assert!(body.contains("<Key>team</Key>"));

        let empty = PutObjectTaggingInput {
            bucket: "demo".to_string(),
            key: "a.txt".to_string(),
            ..PutObjectTaggingInput::default()
        };
        assert!(marshal_request(&empty).is_err());
    }

    #[test]
    fn test_should_skip_restore_body_for_default_window() {
        let input = RestoreObjectInput {
            bucket: "demo".to_string(),
            key: "cold.bin".to_string(),
            ..RestoreObjectInput::default()
        };
        let req = marshal_request(&input).expect("marshal");
        assert!(req.body.bytes().is_none());
        assert_eq!(req.params.get("restore").map(String::as_str), Some(""));
    }

    #[test]
    fn test_should_project_user_metadata_prefix_headers() {
        let mut input = PutSymlinkInput {
            bucket: "demo".to_string(),
            key: "link".to_string(),
            target: "real.txt".to_string(),
            ..PutSymlinkInput::default()
        };
        input.metadata.insert("owner".to_string(), "alice".to_string());
        let req = marshal_request(&input).expect("marshal");
        assert_eq!(header(&req, "x-oss-symlink-target"), Some("real.txt"));
        assert_eq!(header(&req, "x-oss-meta-owner"), Some("alice"));
    }
}
