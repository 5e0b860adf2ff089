//! Decoded field values and rows.

use std::fmt;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::dbf::types::models::RowSchema;

/// A single decoded field value.
///
/// Absent values (blank field text, or `'?'` for logicals) are `None`
/// inside the matching variant rather than a shared null type, so the
/// variant always reflects the column's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 'C': text with surrounding whitespace stripped.
    Character(String),
    /// 'D': calendar date, no time or zone.
    Date(Option<NaiveDate>),
    /// 'N' with a zero decimal count.
    Integer(Option<i64>),
    /// 'N' with a nonzero decimal count. Arbitrary precision, so the
    /// stored digits survive exactly as written.
    Decimal(Option<BigDecimal>),
    /// 'F'.
    Float(Option<f64>),
    /// 'L': `None` when the flag byte is blank or `'?'`.
    Logical(Option<bool>),
    /// 'M': block index into the companion memo file. The block content
    /// itself is never resolved.
    Memo(Option<u64>),
    /// Unrecognized type code; bytes pass through unchanged, padding
    /// included.
    Raw(Vec<u8>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Character(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => *d,
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => *i,
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Self::Decimal(d) => d.as_ref(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => *f,
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Logical(b) => *b,
            _ => None,
        }
    }

    pub fn as_memo_index(&self) -> Option<u64> {
        match self {
            Self::Memo(m) => *m,
            _ => None,
        }
    }

    /// True when the value is the absent marker of its type.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            Self::Date(None)
                | Self::Integer(None)
                | Self::Decimal(None)
                | Self::Float(None)
                | Self::Logical(None)
                | Self::Memo(None)
        )
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character(s) => write!(f, "{}", s),
            Self::Date(Some(d)) => write!(f, "{}", d),
            Self::Integer(Some(i)) => write!(f, "{}", i),
            Self::Decimal(Some(d)) => write!(f, "{}", d),
            Self::Float(Some(x)) => write!(f, "{}", x),
            Self::Logical(Some(b)) => write!(f, "{}", b),
            Self::Memo(Some(m)) => write!(f, "{}", m),
            Self::Raw(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            _ => Ok(()),
        }
    }
}

/// One decoded record: field values in schema order.
///
/// Rows share their table's schema through an [`Arc`], so per-row cost is
/// the values alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<RowSchema>,
    values: Vec<FieldValue>,
}

impl Row {
    pub(crate) fn new(schema: Arc<RowSchema>, values: Vec<FieldValue>) -> Self {
        Self { schema, values }
    }

    /// Looks a value up by field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Values in descriptor order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// `(name, value)` pairs in descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
