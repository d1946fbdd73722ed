//! Per-operation Input structs.
//!
//! Every struct is a flat record created by the caller and read-only to the
//! marshaler. Field doc comments name the wire destination; the descriptor
//! tables in `oss-codec` follow them.

mod config;
mod list;
mod multipart;
mod object;

pub use config::*;
pub use list::*;
pub use multipart::*;
pub use object::*;
