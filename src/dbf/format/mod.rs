//! Binary format layer for dbf table files.
//!
//! This is the mid-level layer bridging raw file I/O and the high-level
//! [`Dbf`](crate::dbf::reader::Dbf) reader.
//!
//! # Module Organization
//!
//! - [`layout`]: declarative fixed-size region decoding
//! - [`registry`]: signature byte to layout-family resolution
//! - [`prolog`]: file header decoding
//! - [`field`]: field-descriptor decoding
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌──────────────────────┐
//! │  Prolog (32 bytes)   │ ← registry::detect_dialect(), prolog::decode()
//! ├──────────────────────┤
//! │  Field descriptors   │ ← field::decode(), one per field
//! │  (32 bytes each)     │
//! ├──────────────────────┤
//! │  0x0D terminator     │
//! ├──────────────────────┤
//! │  Records             │ ← fixed width, 1-byte deletion marker
//! │  (len_rec each)      │   followed by the field values
//! └──────────────────────┘
//! ```

pub mod field;
pub mod layout;
pub mod prolog;
pub mod registry;

/// Byte closing the field-descriptor table.
pub const HEADER_TERMINATOR: u8 = b'\r';

/// Marker value flagging a record slot as logically deleted.
pub const DELETED_MARKER: u8 = b'*';
