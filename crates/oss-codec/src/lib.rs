//! Request marshaling and response unmarshaling for the OSS object API.
//!
//! The marshal side turns a typed Input struct into an [`oss_model::OssRequest`]
//! by projecting a per-operation descriptor table (headers, query parameters,
//! path labels) and then running the operation's ordered
//! [`MarshalStep`]s. The unmarshal side populates a typed Output struct from
//! an [`oss_model::OssResponse`] through an ordered [`UnmarshalStep`] list,
//! always copying status and headers before any body decoding.

pub mod input;
pub mod marshal;
pub mod output;
pub mod steps;
pub mod unmarshal;

pub use marshal::{FieldSpec, FieldValue, OssMarshal, WireKind, marshal_request};
pub use steps::MarshalStep;
pub use unmarshal::{OssUnmarshal, UnmarshalStep, unmarshal_response};
