//! Per-operation Output structs.
//!
//! Every struct embeds [`ResponseMeta`](crate::response::ResponseMeta) for
//! the common status/header state and adds the operation's typed fields.
//! Optional fields distinguish absent from empty.

mod config;
mod list;
mod multipart;
mod object;

pub use config::*;
pub use list::*;
pub use multipart::*;
pub use object::*;
