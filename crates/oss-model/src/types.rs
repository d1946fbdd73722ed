//! Shared wire types: enums with their exact OSS string form, and the small
//! structs that appear inside XML documents.

use serde::{Deserialize, Serialize};

/// Canned ACL for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectAcl {
    /// Inherit the bucket ACL.
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "public-read")]
    PublicRead,
    #[serde(rename = "public-read-write")]
    PublicReadWrite,
}

impl ObjectAcl {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
        }
    }
}

impl std::fmt::Display for ObjectAcl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ObjectAcl {
    fn from(s: &str) -> Self {
        match s {
            "private" => Self::Private,
            "public-read" => Self::PublicRead,
            "public-read-write" => Self::PublicReadWrite,
            _ => Self::default(),
        }
    }
}

/// Storage class of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageClass {
    /// Default variant.
    #[default]
    Standard,
    #[serde(rename = "IA")]
    InfrequentAccess,
    Archive,
    ColdArchive,
    DeepColdArchive,
}

impl StorageClass {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::InfrequentAccess => "IA",
            Self::Archive => "Archive",
            Self::ColdArchive => "ColdArchive",
            Self::DeepColdArchive => "DeepColdArchive",
        }
    }
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StorageClass {
    fn from(s: &str) -> Self {
        match s {
            "IA" => Self::InfrequentAccess,
            "Archive" => Self::Archive,
            "ColdArchive" => Self::ColdArchive,
            "DeepColdArchive" => Self::DeepColdArchive,
            _ => Self::default(),
        }
    }
}

/// Restore tier for archived objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RestoreTier {
    Expedited,
    /// Default variant.
    #[default]
    Standard,
    Bulk,
}

impl RestoreTier {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expedited => "Expedited",
            Self::Standard => "Standard",
            Self::Bulk => "Bulk",
        }
    }
}

impl std::fmt::Display for RestoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RestoreTier {
    fn from(s: &str) -> Self {
        match s {
            "Expedited" => Self::Expedited,
            "Bulk" => Self::Bulk,
            _ => Self::default(),
        }
    }
}

/// Response encoding applied by the service to key-like string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EncodingType {
    /// Percent-encoding of keys, markers, prefixes, and delimiters.
    #[default]
    #[serde(rename = "url")]
    Url,
}

impl EncodingType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
        }
    }
}

impl std::fmt::Display for EncodingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a copy takes metadata from the source or the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetadataDirective {
    /// Default variant.
    #[default]
    #[serde(rename = "COPY")]
    Copy,
    #[serde(rename = "REPLACE")]
    Replace,
}

impl MetadataDirective {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Replace => "REPLACE",
        }
    }
}

impl std::fmt::Display for MetadataDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a copy takes tags from the source or the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaggingDirective {
    /// Default variant.
    #[default]
    #[serde(rename = "COPY")]
    Copy,
    #[serde(rename = "REPLACE")]
    Replace,
}

impl TaggingDirective {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Replace => "REPLACE",
        }
    }
}

impl std::fmt::Display for TaggingDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Structs appearing in XML documents
// ---------------------------------------------------------------------------

/// A single `<Tag>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// An object tag set (`<Tagging><TagSet>...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tagging {
    pub tags: Vec<Tag>,
}

/// Owner information (`<Owner>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// One entry of a batch-delete manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIdentifier {
    /// The object key.
    pub key: String,
    /// Version to delete; omitted from the manifest when `None`.
    pub version_id: Option<String>,
}

/// A part reference submitted with a multipart completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedPart {
    pub part_number: i32,
    pub etag: String,
}

/// A part entry of a `<ListPartsResult>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedPart {
    pub part_number: i32,
    pub etag: String,
    pub size: i64,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// A `<Contents>` entry of a `<ListBucketResult>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListedObject {
    pub key: String,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    pub etag: Option<String>,
    pub size: Option<i64>,
    pub storage_class: Option<StorageClass>,
    pub owner: Option<Owner>,
}

/// A `<Deleted>` entry of a batch-delete `<DeleteResult>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedObject {
    pub key: String,
    pub version_id: Option<String>,
    pub delete_marker: Option<bool>,
    pub delete_marker_version_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_round_trip_storage_class_strings() {
        for sc in [
            StorageClass::Standard,
            StorageClass::InfrequentAccess,
            StorageClass::Archive,
            StorageClass::ColdArchive,
            StorageClass::DeepColdArchive,
        ] {
            assert_eq!(StorageClass::from(sc.as_str()), sc);
        }
    }

    #[test]
    fn test_should_use_lowercase_acl_values() {
        assert_eq!(ObjectAcl::PublicRead.as_str(), "public-read");
        assert_eq!(ObjectAcl::from("public-read-write"), ObjectAcl::PublicReadWrite);
    }
}
