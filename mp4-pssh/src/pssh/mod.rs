//! Mp4 `PSSH` box parser.

mod ids;
mod pssh_parser;

pub use ids::{DrmSystem, KeyId, SystemId};
pub use pssh_parser::{Pssh, PsshBox, boxes, parse};
