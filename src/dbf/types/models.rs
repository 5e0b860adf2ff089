//! Core data structures for dbf table components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The decoded file header (prolog)
//! - Field descriptors and their declared types
//! - The per-table row schema

use std::fmt;

use encoding_rs::Encoding;

use crate::dbf::cast;
use crate::dbf::codepage;
use crate::dbf::types::error::Result;
use crate::dbf::types::value::FieldValue;

/// Decoded file header.
///
/// Everything after `len_rec` is bookkeeping the writer left behind;
/// it is surfaced as-is and never interpreted beyond encoding selection.
#[derive(Debug, Clone)]
pub struct Prolog {
    /// Format discriminant byte, first byte of the file.
    pub signature: u8,
    /// Raw last-update year/month/day bytes as stored. The epoch offset
    /// of the year byte varies by writer, so no date is derived.
    pub last_update: [u8; 3],
    /// Number of record slots in the file, deleted ones included.
    pub records_count: u32,
    /// Total header length in bytes: prolog, descriptors and terminator.
    pub len_head: u16,
    /// Declared bytes per record, deletion marker included.
    pub len_rec: u16,
    pub incomplete_transaction: bool,
    pub encrypted: bool,
    pub mdx_exists: bool,
    /// Language-driver byte selecting the text encoding.
    pub code_page: u8,
    /// Number of field descriptors, derived from `len_head`.
    pub fields_count: usize,
}

impl Prolog {
    /// Text encoding declared by the code-page byte, if it is a known one.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        codepage::encoding_for_code_page(self.code_page)
    }
}

/// Declared type code of a field descriptor.
///
/// Codes outside the classic set are carried as [`FieldType::Other`] and
/// their values pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 'C': text.
    Character,
    /// 'D': calendar date stored as `YYYYMMDD` text.
    Date,
    /// 'N': integer, or fixed-point decimal when the descriptor declares
    /// a nonzero decimal count.
    Numeric,
    /// 'F': floating-point number.
    Float,
    /// 'L': boolean flag.
    Logical,
    /// 'M': block index into the companion memo file.
    Memo,
    /// Any other type code.
    Other(u8),
}

impl From<u8> for FieldType {
    fn from(code: u8) -> Self {
        match code {
            b'C' => Self::Character,
            b'D' => Self::Date,
            b'N' => Self::Numeric,
            b'F' => Self::Float,
            b'L' => Self::Logical,
            b'M' => Self::Memo,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Character => b'C',
            Self::Date => b'D',
            Self::Numeric => b'N',
            Self::Float => b'F',
            Self::Logical => b'L',
            Self::Memo => b'M',
            Self::Other(code) => *code,
        };
        write!(f, "{}", code as char)
    }
}

/// One decoded field descriptor.
///
/// The name is frozen once the descriptor table has been read; duplicate
/// resolution during table construction is the only rename that ever
/// happens, so the name is exposed read-only.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    /// Declared type code.
    pub field_type: FieldType,
    /// Declared value width in bytes.
    pub length: usize,
    /// Digits right of the decimal point, meaningful for 'N' fields.
    pub decimal_count: u8,
    /// Whether an .mdx index covers this field.
    pub mdx: bool,
    /// Encoding used to decode this field's text, bound at open time.
    pub encoding: &'static Encoding,
}

impl Field {
    pub(crate) fn new(
        name: String,
        field_type: FieldType,
        length: usize,
        decimal_count: u8,
        mdx: bool,
        encoding: &'static Encoding,
    ) -> Self {
        Self {
            name,
            field_type,
            length,
            decimal_count,
            mdx,
            encoding,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Casts one raw value slice per this field's declared type.
    ///
    /// The slice must be exactly [`length`](Self::length) bytes, cut from
    /// the record body at this field's position.
    pub fn cast(&self, raw: &[u8]) -> Result<FieldValue> {
        match self.field_type {
            FieldType::Character => Ok(cast::character(self, raw)),
            FieldType::Date => cast::date(self, raw),
            FieldType::Numeric => cast::numeric(self, raw),
            FieldType::Float => cast::float(self, raw),
            FieldType::Logical => Ok(cast::logical(self, raw)),
            FieldType::Memo => cast::memo(self, raw),
            FieldType::Other(_) => Ok(FieldValue::Raw(raw.to_vec())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, duplicate-free list of field names shared by every row of
/// one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    names: Vec<String>,
}

impl RowSchema {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Field names in descriptor order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a field name within the schema.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
