//! XML layer for the OSS client SDK.
//!
//! This crate handles conversion between model types and the OSS XML wire
//! format, plus a schema-free decoder for flexible shapes.
//!
//! # Key components
//!
//! - [`XmlNode`]/[`decode_tree`]: a streaming decoder that builds a generic
//!   tree from any XML document without a predeclared schema, preserving the
//!   attribute/element distinction and grouping repeated siblings.
//! - [`OssXmlDecode`] trait and [`from_xml`] for parsing fixed result
//!   schemas into Output structs.
//! - [`serialize`]: request-body writers (delete manifest, multipart
//!   completion, restore request, tagging).
//! - [`parse_error_document`] for the service `<Error>` schema, built on the
//!   generic tree so undocumented fields are retained.
//!
//! # OSS XML conventions
//!
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 (`2023-02-03T16:45:09.000Z`)
//! - Request bodies carry no XML declaration

pub mod deserialize;
pub mod error;
pub mod error_doc;
pub mod serialize;
pub mod tree;

pub use deserialize::{OssXmlDecode, from_xml};
pub use error::XmlError;
pub use error_doc::parse_error_document;
pub use serialize::{
    complete_multipart_xml, delete_manifest_xml, restore_request_xml, tagging_xml,
};
pub use tree::{XmlMap, XmlNode, decode_tree};
