//! Request-body writers.
//!
//! OSS request bodies carry no XML declaration; each writer emits the exact
//! document the wire contract names.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesText;

use oss_model::types::{CompletedPart, ObjectIdentifier, RestoreTier, Tagging};

use crate::error::XmlError;

/// Build the batch-delete manifest:
///
/// ```xml
/// <Delete><Quiet>false</Quiet><Object><Key>k</Key></Object>...</Delete>
/// ```
///
/// Entry order is preserved; `VersionId` is emitted only when present.
///
/// # Errors
///
/// Returns `XmlError` if writing fails.
pub fn delete_manifest_xml(objects: &[ObjectIdentifier], quiet: bool) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer.create_element("Delete").write_inner_content(|w| {
        write_text_element(w, "Quiet", if quiet { "true" } else { "false" })?;
        for object in objects {
            w.create_element("Object").write_inner_content(|w| {
                write_text_element(w, "Key", &object.key)?;
                if let Some(version_id) = &object.version_id {
                    write_text_element(w, "VersionId", version_id)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })?;

    Ok(buf)
}

/// Build the multipart completion body:
///
/// ```xml
/// <CompleteMultipartUpload><Part><PartNumber>1</PartNumber><ETag>...</ETag></Part>...</CompleteMultipartUpload>
/// ```
///
/// Parts are serialized sorted ascending by part number regardless of input
/// order. ETag text is escaped in the service's canonical form (`&#34;` for
/// quotes).
///
/// # Errors
///
/// Returns `XmlError` if writing fails.
pub fn complete_multipart_xml(parts: &[CompletedPart]) -> Result<Vec<u8>, XmlError> {
    let mut sorted: Vec<&CompletedPart> = parts.iter().collect();
    sorted.sort_by_key(|p| p.part_number);

    let mut buf = Vec::with_capacity(256);
    let mut writer = Writer::new(&mut buf);

    writer
        .create_element("CompleteMultipartUpload")
        .write_inner_content(|w| {
            for part in sorted {
                w.create_element("Part").write_inner_content(|w| {
                    write_text_element(w, "PartNumber", &part.part_number.to_string())?;
                    w.create_element("ETag")
                        .write_text_content(BytesText::from_escaped(escape_text(&part.etag)))?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    Ok(buf)
}

/// Build the archive restore body:
///
/// ```xml
/// <RestoreRequest><Days>1</Days><JobParameters><Tier>Standard</Tier></JobParameters></RestoreRequest>
/// ```
///
/// `JobParameters` is emitted only when a tier is given.
///
/// # Errors
///
/// Returns `XmlError` if writing fails.
pub fn restore_request_xml(days: i64, tier: Option<RestoreTier>) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(128);
    let mut writer = Writer::new(&mut buf);

    writer
        .create_element("RestoreRequest")
        .write_inner_content(|w| {
            write_text_element(w, "Days", &days.to_string())?;
            if let Some(tier) = tier {
                w.create_element("JobParameters").write_inner_content(|w| {
                    write_text_element(w, "Tier", tier.as_str())
                })?;
            }
            Ok(())
        })?;

    Ok(buf)
}

/// Build the object tagging body:
///
/// ```xml
/// <Tagging><TagSet><Tag><Key>k</Key><Value>v</Value></Tag>...</TagSet></Tagging>
/// ```
///
/// # Errors
///
/// Returns `XmlError` if writing fails.
pub fn tagging_xml(tagging: &Tagging) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(128);
    let mut writer = Writer::new(&mut buf);

    writer.create_element("Tagging").write_inner_content(|w| {
        w.create_element("TagSet").write_inner_content(|w| {
            for tag in &tagging.tags {
                w.create_element("Tag").write_inner_content(|w| {
                    write_text_element(w, "Key", &tag.key)?;
                    write_text_element(w, "Value", &tag.value)?;
                    Ok(())
                })?;
            }
            Ok(())
        })?;
        Ok(())
    })?;

    Ok(buf)
}

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Escape text the way the service canonicalizes it: numeric references for
/// quotes (`&#34;`, `&#39;`) and named entities for the markup characters.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).expect("valid UTF-8")
    }

    #[test]
    fn test_should_build_delete_manifest_in_input_order() {
        let objects = vec![
            ObjectIdentifier {
                key: "b".to_string(),
                version_id: None,
            },
            ObjectIdentifier {
                key: "a".to_string(),
                version_id: Some("v1".to_string()),
            },
        ];
        let xml = delete_manifest_xml(&objects, false).expect("serialize");
        let text = utf8(&xml);

        assert!(text.starts_with("<Delete><Quiet>false</Quiet>"));
        let b_pos = text.find("<Key>b</Key>").expect("b present");
        let a_pos = text.find("<Key>a</Key>").expect("a present");
        assert!(b_pos < a_pos, "input order must be preserved");
        assert!(text.contains("<VersionId>v1</VersionId>"));
    }

    #[test]
    fn test_should_serialize_quiet_flag_as_boolean_element() {
        let objects = vec![ObjectIdentifier {
            key: "k".to_string(),
            version_id: None,
        }];
        let xml = delete_manifest_xml(&objects, true).expect("serialize");
        assert!(utf8(&xml).contains("<Quiet>true</Quiet>"));
    }

    #[test]
    fn test_should_sort_parts_ascending_and_escape_etags() {
        let parts = vec![
            CompletedPart {
                part_number: 3,
                etag: "\"E3\"".to_string(),
            },
            CompletedPart {
                part_number: 1,
                etag: "\"E1\"".to_string(),
            },
            CompletedPart {
                part_number: 2,
                etag: "\"E2\"".to_string(),
            },
        ];
        let xml = complete_multipart_xml(&parts).expect("serialize");
        let text = utf8(&xml);

        let p1 = text.find("<PartNumber>1</PartNumber>").expect("part 1");
        let p2 = text.find("<PartNumber>2</PartNumber>").expect("part 2");
        let p3 = text.find("<PartNumber>3</PartNumber>").expect("part 3");
        assert!(p1 < p2 && p2 < p3, "parts must be ascending");
        assert!(text.contains("<ETag>&#34;E1&#34;</ETag>"));
    }

    #[test]
    fn test_should_build_restore_request_with_tier() {
        let xml = restore_request_xml(3, Some(RestoreTier::Bulk)).expect("serialize");
        assert_eq!(
            utf8(&xml),
            "<RestoreRequest><Days>3</Days><JobParameters><Tier>Bulk</Tier></JobParameters></RestoreRequest>"
        );
    }

    #[test]
    fn test_should_omit_job_parameters_without_tier() {
        let xml = restore_request_xml(1, None).expect("serialize");
        assert_eq!(utf8(&xml), "<RestoreRequest><Days>1</Days></RestoreRequest>");
    }

    #[test]
    fn test_should_build_tagging_document() {
        let tagging = Tagging {
            tags: vec![oss_model::types::Tag {
                key: "team".to_string(),
                value: "infra".to_string(),
            }],
        };
        let xml = tagging_xml(&tagging).expect("serialize");
        assert_eq!(
            utf8(&xml),
            "<Tagging><TagSet><Tag><Key>team</Key><Value>infra</Value></Tag></TagSet></Tagging>"
        );
    }
}
