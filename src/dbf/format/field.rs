//! Field-descriptor decoding.
//!
//! Descriptors follow the prolog back to back, one fixed-size region per
//! field, closed by the header terminator byte.

use std::io::Read;

use encoding_rs::Encoding;
use log::trace;

use crate::dbf::format::layout::{Layout, Rule};
use crate::dbf::format::registry::Dialect;
use crate::dbf::types::error::Result;
use crate::dbf::types::models::{Field, FieldType};

/// Classic field descriptor, 32 bytes.
pub static FIELD_LAYOUT: Layout = Layout::new(
    "field descriptor",
    &[
        ("name", Rule::Bytes(11)),
        ("type", Rule::Byte),
        ("reserved1", Rule::Bytes(4)),
        ("length", Rule::Byte),
        ("decimal_count", Rule::U8),
        ("reserved2", Rule::Bytes(13)),
        ("mdx", Rule::Flag),
    ],
);

/// Visual FoxPro field descriptor, 48 bytes. Present for size accounting
/// when classifying a file; FoxPro tables themselves are rejected before
/// any descriptor is read.
pub static FOXPRO_FIELD_LAYOUT: Layout = Layout::new(
    "field descriptor",
    &[
        ("name", Rule::Bytes(32)),
        ("type", Rule::Byte),
        ("length", Rule::Byte),
        ("decimal_count", Rule::U8),
        ("reserved1", Rule::Bytes(2)),
        ("mdx", Rule::Flag),
        ("reserved2", Rule::Bytes(2)),
        ("autoincrement", Rule::U32),
        ("reserved3", Rule::Bytes(4)),
    ],
);

/// Decodes one descriptor at the current position and binds the table's
/// resolved text encoding onto it.
pub fn decode<R: Read>(
    source: &mut R,
    dialect: Dialect,
    encoding: &'static Encoding,
    lowercase_names: bool,
) -> Result<Field> {
    let raw = dialect.field_layout().read_from(source)?;

    // The name slot is padded with NULs after the name proper.
    let name_bytes = trim_trailing_nuls(raw.bytes("name")?);
    let mut name = String::from_utf8_lossy(name_bytes).into_owned();
    if lowercase_names {
        name = name.to_lowercase();
    }

    let field = Field::new(
        name,
        FieldType::from(raw.byte("type")?),
        raw.byte("length")? as usize,
        raw.u8("decimal_count")?,
        raw.flag("mdx")?,
        encoding,
    );

    trace!(
        "Field decoded: `{}` type {} width {} decimals {}",
        field.name(),
        field.field_type,
        field.length,
        field.decimal_count
    );
    Ok(field)
}

fn trim_trailing_nuls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
