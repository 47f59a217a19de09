#![cfg_attr(docsrs, feature(doc_cfg))]

//! This crate extracts DRM metadata from mp4 `PSSH` (Protection System Specific Header) boxes.
//!
//! The input is the raw initialization data handed out by a demuxer: zero or more
//! concatenated ISO-BMFF boxes. Every `pssh` box found at the top level contributes its
//! system id and, for version 1 boxes, its CENC key ids. Other boxes are skipped.
//!
//! Parsing never fails. Truncated or malformed boxes simply contribute nothing.
//!
//! ```
//! let data = hex::decode(concat!(
//!     "00000028", "70737368", "00000000",
//!     "edef8ba979d64acea3c827dcd51d21ed",
//!     "00000008", "0102030405060708",
//! ))
//! .unwrap();
//!
//! let pssh = mp4_pssh::parse(&data);
//! assert_eq!(pssh.system_ids.len(), 1);
//! assert_eq!(pssh.system_ids[0].to_string(), "edef8ba979d64acea3c827dcd51d21ed");
//! assert!(pssh.cenc_key_ids.is_empty());
//! ```
//!
//! # Optional Features
//!
//! The following are a list of [Cargo features](https://doc.rust-lang.org/stable/cargo/reference/features.html#the-features-section) that can be
//! enabled or disabled:
//!
//! - **serde**: Implements `Serialize` for [`Pssh`], [`SystemId`] and [`KeyId`].

mod error;
mod parser;
mod pssh;
mod reader;

pub use error::Error;
pub use parser::*;
pub use pssh::{DrmSystem, KeyId, Pssh, PsshBox, SystemId, boxes, parse};
pub use reader::Reader;

/// A `Result` alias where the `Err` case is `mp4_pssh::Error`.
pub type Result<T> = std::result::Result<T, Error>;
