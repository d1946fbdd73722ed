//! Typed readers for fixed result-document schemas.
//!
//! This module provides the [`OssXmlDecode`] trait and implementations for
//! the Output structs whose payload is a known XML document. Each
//! implementation reads child elements until the matching end tag; the
//! common status/header state (`meta`) is left untouched and merged by the
//! unmarshal pipeline.

use quick_xml::Reader;
use quick_xml::events::Event;

use oss_model::output::{
    CompleteMultipartUploadOutput, CopyObjectOutput, DeleteObjectsOutput, GetObjectAclOutput,
    GetObjectTaggingOutput, InitiateMultipartUploadOutput, ListObjectsOutput, ListPartsOutput,
    UploadPartCopyOutput,
};
use oss_model::types::{
    DeletedObject, EncodingType, ListedObject, Owner, StorageClass, Tag, UploadedPart,
};

use crate::error::XmlError;

/// Trait for decoding result documents from XML.
///
/// The reader is positioned just after the opening tag of the element; the
/// implementation reads all child content and returns when the matching end
/// tag is consumed.
pub trait OssXmlDecode: Sized {
    /// Deserialize an instance from the given XML reader.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed.
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Decode a document into a typed value.
///
/// Finds the root element and delegates to the type's [`OssXmlDecode`]
/// implementation.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed or has no root element.
pub fn from_xml<T: OssXmlDecode>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    // Skip the declaration and find the root element.
    loop {
        match reader.read_event()? {
            Event::Start(_) => {
                return T::decode_xml(&mut reader);
            }
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_string()));
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

/// Read the text content of the current element and consume its end tag.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            // References arrive as their own events, outside Text.
            Event::GeneralRef(e) => {
                let resolved =
                    crate::tree::resolve_reference(&e).map_err(XmlError::ParseError)?;
                text.push_str(&resolved);
            }
            Event::End(_) => {
                return Ok(text);
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Read the current element's tag name as UTF-8.
fn tag_name(e: &quick_xml::events::BytesStart<'_>) -> Result<String, XmlError> {
    std::str::from_utf8(e.name().as_ref())
        .map(ToOwned::to_owned)
        .map_err(|err| XmlError::ParseError(err.to_string()))
}

/// Parse a boolean from XML text ("true"/"false").
fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

/// Parse an i32 from XML text.
fn parse_i32(s: &str) -> Result<i32, XmlError> {
    s.parse::<i32>()
        .map_err(|e| XmlError::ParseError(format!("invalid i32 '{s}': {e}")))
}

/// Parse an i64 from XML text.
fn parse_i64(s: &str) -> Result<i64, XmlError> {
    s.parse::<i64>()
        .map_err(|e| XmlError::ParseError(format!("invalid i64 '{s}': {e}")))
}

/// Parse an ISO 8601 timestamp from XML text.
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            // The OSS format: 2023-02-03T16:45:09.000Z
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

/// Parse the `<EncodingType>` element; only `url` is defined.
fn parse_encoding_type(s: &str) -> Option<EncodingType> {
    (s == "url").then_some(EncodingType::Url)
}

// ---------------------------------------------------------------------------
// OssXmlDecode implementations
// ---------------------------------------------------------------------------

impl OssXmlDecode for CopyObjectOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "ETag" => out.etag = Some(read_text_content(reader)?),
                    "LastModified" => {
                        out.last_modified = Some(parse_timestamp(&read_text_content(reader)?)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in CopyObjectResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for UploadPartCopyOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "ETag" => out.etag = Some(read_text_content(reader)?),
                    "LastModified" => {
                        out.last_modified = Some(parse_timestamp(&read_text_content(reader)?)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in CopyPartResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for InitiateMultipartUploadOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Bucket" => out.bucket = Some(read_text_content(reader)?),
                    "Key" => out.key = Some(read_text_content(reader)?),
                    "UploadId" => out.upload_id = Some(read_text_content(reader)?),
                    "EncodingType" => {
                        out.encoding_type = parse_encoding_type(&read_text_content(reader)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in InitiateMultipartUploadResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for CompleteMultipartUploadOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Location" => out.location = Some(read_text_content(reader)?),
                    "Bucket" => out.bucket = Some(read_text_content(reader)?),
                    "Key" => out.key = Some(read_text_content(reader)?),
                    "ETag" => out.etag = Some(read_text_content(reader)?),
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in CompleteMultipartUploadResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for DeletedObject {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Key" => out.key = read_text_content(reader)?,
                    "VersionId" => out.version_id = Some(read_text_content(reader)?),
                    "DeleteMarker" => {
                        out.delete_marker = Some(parse_bool(&read_text_content(reader)?)?);
                    }
                    "DeleteMarkerVersionId" => {
                        out.delete_marker_version_id = Some(read_text_content(reader)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Deleted".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for DeleteObjectsOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Deleted" => out.deleted.push(DeletedObject::decode_xml(reader)?),
                    "EncodingType" => {
                        out.encoding_type = parse_encoding_type(&read_text_content(reader)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in DeleteResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for Owner {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "ID" => out.id = Some(read_text_content(reader)?),
                    "DisplayName" => out.display_name = Some(read_text_content(reader)?),
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Owner".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for ListedObject {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Key" => out.key = read_text_content(reader)?,
                    "LastModified" => {
                        out.last_modified = Some(parse_timestamp(&read_text_content(reader)?)?);
                    }
                    "ETag" => out.etag = Some(read_text_content(reader)?),
                    "Size" => out.size = Some(parse_i64(&read_text_content(reader)?)?),
                    "StorageClass" => {
                        out.storage_class =
                            Some(StorageClass::from(read_text_content(reader)?.as_str()));
                    }
                    "Owner" => out.owner = Some(Owner::decode_xml(reader)?),
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Contents".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for ListObjectsOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Name" => out.name = Some(read_text_content(reader)?),
                    "Prefix" => out.prefix = Some(read_text_content(reader)?),
                    "Marker" => out.marker = Some(read_text_content(reader)?),
                    "NextMarker" => out.next_marker = Some(read_text_content(reader)?),
                    "Delimiter" => out.delimiter = Some(read_text_content(reader)?),
                    "MaxKeys" => out.max_keys = Some(parse_i32(&read_text_content(reader)?)?),
                    "IsTruncated" => {
                        out.is_truncated = Some(parse_bool(&read_text_content(reader)?)?);
                    }
                    "EncodingType" => {
                        out.encoding_type = parse_encoding_type(&read_text_content(reader)?);
                    }
                    "Contents" => out.objects.push(ListedObject::decode_xml(reader)?),
                    "CommonPrefixes" => {
                        if let Some(prefix) = read_common_prefix(reader)? {
                            out.common_prefixes.push(prefix);
                        }
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in ListBucketResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

/// Read one `<CommonPrefixes><Prefix>...</Prefix></CommonPrefixes>` group.
fn read_common_prefix(reader: &mut Reader<&[u8]>) -> Result<Option<String>, XmlError> {
    let mut prefix = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if tag_name(&e)? == "Prefix" {
                    prefix = Some(read_text_content(reader)?);
                } else {
                    skip_element(reader)?;
                }
            }
            Event::End(_) => return Ok(prefix),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF in CommonPrefixes".to_string(),
                ));
            }
            _ => {}
        }
    }
}

impl OssXmlDecode for UploadedPart {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "PartNumber" => out.part_number = parse_i32(&read_text_content(reader)?)?,
                    "ETag" => out.etag = read_text_content(reader)?,
                    "Size" => out.size = parse_i64(&read_text_content(reader)?)?,
                    "LastModified" => {
                        out.last_modified = Some(parse_timestamp(&read_text_content(reader)?)?);
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Part".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for ListPartsOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Bucket" => out.bucket = Some(read_text_content(reader)?),
                    "Key" => out.key = Some(read_text_content(reader)?),
                    "UploadId" => out.upload_id = Some(read_text_content(reader)?),
                    "NextPartNumberMarker" => {
                        out.next_part_number_marker =
                            Some(parse_i32(&read_text_content(reader)?)?);
                    }
                    "MaxParts" => out.max_parts = Some(parse_i32(&read_text_content(reader)?)?),
                    "IsTruncated" => {
                        out.is_truncated = Some(parse_bool(&read_text_content(reader)?)?);
                    }
                    "EncodingType" => {
                        out.encoding_type = parse_encoding_type(&read_text_content(reader)?);
                    }
                    "Part" => out.parts.push(UploadedPart::decode_xml(reader)?),
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in ListPartsResult".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for Tag {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Key" => out.key = read_text_content(reader)?,
                    "Value" => out.value = read_text_content(reader)?,
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Tag".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for GetObjectTaggingOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "TagSet" => {
                        loop {
                            match reader.read_event()? {
                                Event::Start(e) => {
                                    if tag_name(&e)? == "Tag" {
                                        out.tags.push(Tag::decode_xml(reader)?);
                                    } else {
                                        skip_element(reader)?;
                                    }
                                }
                                Event::End(_) => break,
                                Event::Eof => {
                                    return Err(XmlError::UnexpectedElement(
                                        "unexpected EOF in TagSet".to_string(),
                                    ));
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Tagging".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl OssXmlDecode for GetObjectAclOutput {
    fn decode_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut out = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => match tag_name(&e)?.as_str() {
                    "Owner" => out.owner = Some(Owner::decode_xml(reader)?),
                    "AccessControlList" => {
                        loop {
                            match reader.read_event()? {
                                Event::Start(e) => {
                                    if tag_name(&e)? == "Grant" {
                                        out.grant = Some(read_text_content(reader)?);
                                    } else {
                                        skip_element(reader)?;
                                    }
                                }
                                Event::End(_) => break,
                                Event::Eof => {
                                    return Err(XmlError::UnexpectedElement(
                                        "unexpected EOF in AccessControlList".to_string(),
                                    ));
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => skip_element(reader)?,
                },
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in AccessControlPolicy".to_string(),
                    ));
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_decode_copy_result() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<CopyObjectResult>
  <ETag>"598A4C31..."</ETag>
  <LastModified>2023-02-24T08:42:32.000Z</LastModified>
</CopyObjectResult>"#;
        let out: CopyObjectOutput = from_xml(xml).expect("decode");
        assert_eq!(out.etag.as_deref(), Some("\"598A4C31...\""));
        let lm = out.last_modified.expect("last modified");
        assert_eq!(lm.format("%Y-%m-%d").to_string(), "2023-02-24");
    }

    #[test]
    fn test_should_decode_initiate_result() {
        let xml = br"<InitiateMultipartUploadResult>
  <Bucket>demo</Bucket>
  <Key>photos/a.jpg</Key>
  <UploadId>0004B999EF518A1FE585B0C9360DC4C8</UploadId>
</InitiateMultipartUploadResult>";
        let out: InitiateMultipartUploadOutput = from_xml(xml).expect("decode");
        assert_eq!(out.bucket.as_deref(), Some("demo"));
        assert_eq!(out.key.as_deref(), Some("photos/a.jpg"));
        assert_eq!(
            out.upload_id.as_deref(),
            Some("0004B999EF518A1FE585B0C9360DC4C8")
        );
    }

    #[test]
    fn test_should_decode_delete_result_entries_in_order() {
        let xml = br"<DeleteResult>
  <Deleted><Key>first</Key></Deleted>
  <Deleted><Key>second</Key><DeleteMarker>true</DeleteMarker></Deleted>
</DeleteResult>";
        let out: DeleteObjectsOutput = from_xml(xml).expect("decode");
        assert_eq!(out.deleted.len(), 2);
        assert_eq!(out.deleted[0].key, "first");
        assert_eq!(out.deleted[1].key, "second");
        assert_eq!(out.deleted[1].delete_marker, Some(true));
    }

    #[test]
    fn test_should_decode_list_result_with_common_prefixes() {
        let xml = br"<ListBucketResult>
  <Name>demo</Name>
  <Prefix>photos/</Prefix>
  <MaxKeys>100</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>photos/a.jpg</Key>
    <Size>344606</Size>
    <StorageClass>IA</StorageClass>
    <Owner><ID>00220120222</ID></Owner>
  </Contents>
  <CommonPrefixes><Prefix>photos/2023/</Prefix></CommonPrefixes>
  <CommonPrefixes><Prefix>photos/2024/</Prefix></CommonPrefixes>
</ListBucketResult>";
        let out: ListObjectsOutput = from_xml(xml).expect("decode");
        assert_eq!(out.name.as_deref(), Some("demo"));
        assert_eq!(out.max_keys, Some(100));
        assert_eq!(out.is_truncated, Some(false));
        assert_eq!(out.objects.len(), 1);
        assert_eq!(out.objects[0].key, "photos/a.jpg");
        assert_eq!(out.objects[0].size, Some(344_606));
        assert_eq!(
            out.objects[0].storage_class,
            Some(StorageClass::InfrequentAccess)
        );
        assert_eq!(
            out.common_prefixes,
            vec!["photos/2023/".to_string(), "photos/2024/".to_string()]
        );
    }

    #[test]
    fn test_should_decode_tagging_document() {
        let xml = br"<Tagging><TagSet>
  <Tag><Key>a</Key><Value>1</Value></Tag>
  <Tag><Key>b</Key><Value>2</Value></Tag>
</TagSet></Tagging>";
        let out: GetObjectTaggingOutput = from_xml(xml).expect("decode");
        assert_eq!(out.tags.len(), 2);
        assert_eq!(out.tags[0].key, "a");
        assert_eq!(out.tags[1].value, "2");
    }

    #[test]
    fn test_should_decode_acl_policy() {
        let xml = br"<AccessControlPolicy>
  <Owner><ID>1234</ID><DisplayName>user</DisplayName></Owner>
  <AccessControlList><Grant>public-read</Grant></AccessControlList>
</AccessControlPolicy>";
        let out: GetObjectAclOutput = from_xml(xml).expect("decode");
        assert_eq!(out.owner.as_ref().and_then(|o| o.id.as_deref()), Some("1234"));
        assert_eq!(out.grant.as_deref(), Some("public-read"));
    }

    #[test]
    fn test_should_decode_list_parts() {
        let xml = br"<ListPartsResult>
  <Bucket>demo</Bucket>
  <UploadId>UPLOAD</UploadId>
  <IsTruncated>false</IsTruncated>
  <Part><PartNumber>1</PartNumber><ETag>&quot;A1&quot;</ETag><Size>5242880</Size></Part>
  <Part><PartNumber>2</PartNumber><ETag>&quot;B2&quot;</ETag><Size>1024</Size></Part>
</ListPartsResult>";
        let out: ListPartsOutput = from_xml(xml).expect("decode");
        assert_eq!(out.parts.len(), 2);
        assert_eq!(out.parts[0].part_number, 1);
        assert_eq!(out.parts[0].etag, "\"A1\"");
        assert_eq!(out.parts[1].size, 1024);
    }

    #[test]
    fn test_should_resolve_entity_references_in_text() {
        let xml = br"<ListBucketResult>
  <Contents><Key>a&amp;b</Key></Contents>
  <NextMarker>dir&#x2F;a&lt;b</NextMarker>
</ListBucketResult>";
        let out: ListObjectsOutput = from_xml(xml).expect("decode");
        assert_eq!(out.objects[0].key, "a&b");
        assert_eq!(out.next_marker.as_deref(), Some("dir/a<b"));
    }

    #[test]
    fn test_should_fail_on_missing_root() {
        let err = from_xml::<CopyObjectOutput>(b"   ").expect_err("must fail");
        assert!(matches!(err, XmlError::MissingElement(_)));
    }
}
