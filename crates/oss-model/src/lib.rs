//! Data model for the OSS client SDK.
//!
//! This crate defines the typed surface the marshaling engine works with:
//!
//! - Per-operation Input structs ([`input`]) and Output structs ([`output`]).
//!   Input fields carry doc comments naming their wire destination
//!   (`HTTP header: ...`, `HTTP query: ...`, `HTTP payload body`); the
//!   descriptor tables in `oss-codec` follow those destinations.
//! - Shared wire types ([`types`]): enums with their exact OSS string
//!   representation, and the small structs that appear in XML documents.
//! - The operation envelope [`OssRequest`] and operation result
//!   [`OssResponse`] exchanged with the transport ([`request`], [`response`]).
//! - The unified error taxonomy [`OssError`] ([`error`]).
//!
//! The transport (URL construction, signing, retries, sockets) is a separate
//! collaborator; this crate never touches it.

#![allow(clippy::struct_excessive_bools)]

pub mod error;
pub mod input;
pub mod output;
pub mod request;
pub mod response;
pub mod types;

pub use error::{OssError, ServiceError};
pub use request::{OssRequest, RequestBody};
pub use response::{OssResponse, ResponseBody, ResponseMeta};
