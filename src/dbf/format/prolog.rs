//! Prolog (file header) decoding.
//!
//! # Classic layout (32 bytes)
//! ```text
//! [1]  signature          format discriminant
//! [3]  year/month/day     last update, raw bytes
//! [4]  records            record slot count (LE u32)
//! [2]  len_head           total header length (LE u16)
//! [2]  len_rec            bytes per record (LE u16)
//! [2]  reserved
//! [1]  incomplete transaction flag
//! [1]  encryption flag
//! [12] multi-user reserved area
//! [1]  mdx flag
//! [1]  code page
//! [2]  reserved
//! ```

use std::io::Read;

use log::info;

use crate::dbf::format::layout::{Layout, Rule};
use crate::dbf::format::registry::Dialect;
use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::Prolog;

/// Classic header region at the start of the file.
pub static PROLOG_LAYOUT: Layout = Layout::new(
    "prolog",
    &[
        ("signature", Rule::U8),
        ("year", Rule::Byte),
        ("month", Rule::Byte),
        ("day", Rule::Byte),
        ("records", Rule::U32),
        ("len_head", Rule::U16),
        ("len_rec", Rule::U16),
        ("reserved1", Rule::Bytes(2)),
        ("incomplete_transaction", Rule::Flag),
        ("encrypted", Rule::Flag),
        ("reserved2", Rule::Bytes(12)),
        ("mdx_exists", Rule::Flag),
        ("code_page", Rule::U8),
        ("reserved3", Rule::Bytes(2)),
    ],
);

/// Visual FoxPro header: the classic region plus a language-driver name.
/// Decoded only far enough to report the dialect as unsupported.
pub static FOXPRO_PROLOG_LAYOUT: Layout = Layout::new(
    "prolog",
    &[
        ("signature", Rule::U8),
        ("year", Rule::Byte),
        ("month", Rule::Byte),
        ("day", Rule::Byte),
        ("records", Rule::U32),
        ("len_head", Rule::U16),
        ("len_rec", Rule::U16),
        ("reserved1", Rule::Bytes(2)),
        ("incomplete_transaction", Rule::Flag),
        ("encrypted", Rule::Flag),
        ("reserved2", Rule::Bytes(12)),
        ("mdx_exists", Rule::Flag),
        ("code_page", Rule::U8),
        ("reserved3", Rule::Bytes(2)),
        ("language_driver", Rule::Bytes(32)),
        ("reserved4", Rule::Bytes(4)),
    ],
);

/// Decodes the header region at the current position and derives the
/// field-descriptor count from the declared header length.
///
/// `len_head` covers the prolog itself, every descriptor and the one
/// terminator byte; what remains after subtracting prolog and terminator
/// must divide evenly into descriptors or the file is not a dbf table.
pub fn decode<R: Read>(source: &mut R, dialect: Dialect) -> Result<Prolog> {
    let layout = dialect.prolog_layout();
    let raw = layout.read_from(source)?;

    let len_head = raw.u16("len_head")?;
    let field_size = dialect.field_layout().size();

    let table_bytes = (len_head as usize)
        .checked_sub(layout.size() + 1)
        .ok_or(DbfError::InconsistentHeader {
            len_head,
            field_size,
        })?;
    if table_bytes % field_size != 0 {
        return Err(DbfError::InconsistentHeader {
            len_head,
            field_size,
        });
    }

    let prolog = Prolog {
        signature: raw.u8("signature")?,
        last_update: [raw.byte("year")?, raw.byte("month")?, raw.byte("day")?],
        records_count: raw.u32("records")?,
        len_head,
        len_rec: raw.u16("len_rec")?,
        incomplete_transaction: raw.flag("incomplete_transaction")?,
        encrypted: raw.flag("encrypted")?,
        mdx_exists: raw.flag("mdx_exists")?,
        code_page: raw.u8("code_page")?,
        fields_count: table_bytes / field_size,
    };

    info!(
        "Prolog decoded: signature={:#04x}, {} record slots, {} fields, code page {}",
        prolog.signature, prolog.records_count, prolog.fields_count, prolog.code_page
    );

    Ok(prolog)
}
