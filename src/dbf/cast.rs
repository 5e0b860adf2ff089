//! Field value casting.
//!
//! Pure conversions from a field's raw byte slice to a typed value.
//! Every cast first decodes the bytes with the field's bound encoding
//! and strips surrounding whitespace (values are space-padded to their
//! declared width, numerics usually on the left). Blank text degrades
//! to the absent marker of the target type instead of failing; text
//! that is present but malformed is a [`DbfError::Decode`].

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::Field;
use crate::dbf::types::value::FieldValue;

/// Dates are stored as text in this exact form, e.g. `20200131`.
const DATE_FORMAT: &str = "%Y%m%d";

/// Decodes `raw` with the field's encoding, lossily replacing unmappable
/// bytes, and strips surrounding whitespace.
pub(crate) fn text(field: &Field, raw: &[u8]) -> String {
    let (decoded, _, _) = field.encoding.decode(raw);
    decoded.trim().to_string()
}

/// 'C': the stripped text itself.
pub fn character(field: &Field, raw: &[u8]) -> FieldValue {
    FieldValue::Character(text(field, raw))
}

/// 'D': `YYYYMMDD` text to a calendar date.
pub fn date(field: &Field, raw: &[u8]) -> Result<FieldValue> {
    let value = text(field, raw);
    if value.is_empty() {
        return Ok(FieldValue::Date(None));
    }
    let parsed = NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| decode_error(field, "date", &value))?;
    Ok(FieldValue::Date(Some(parsed)))
}

/// 'N': fixed-point decimal when the descriptor declares decimal digits,
/// plain integer otherwise.
pub fn numeric(field: &Field, raw: &[u8]) -> Result<FieldValue> {
    let value = text(field, raw);
    if field.decimal_count != 0 {
        if value.is_empty() {
            return Ok(FieldValue::Decimal(None));
        }
        let parsed = value
            .parse::<BigDecimal>()
            .map_err(|_| decode_error(field, "decimal", &value))?;
        Ok(FieldValue::Decimal(Some(parsed)))
    } else {
        if value.is_empty() {
            return Ok(FieldValue::Integer(None));
        }
        let parsed = value
            .parse::<i64>()
            .map_err(|_| decode_error(field, "integer", &value))?;
        Ok(FieldValue::Integer(Some(parsed)))
    }
}

/// 'F': floating-point text.
pub fn float(field: &Field, raw: &[u8]) -> Result<FieldValue> {
    let value = text(field, raw);
    if value.is_empty() {
        return Ok(FieldValue::Float(None));
    }
    let parsed = value
        .parse::<f64>()
        .map_err(|_| decode_error(field, "float", &value))?;
    Ok(FieldValue::Float(Some(parsed)))
}

/// 'L': case-insensitive flag byte. `'t'` and `'y'` are true, `'?'` and
/// blank are unknown, everything else is false.
pub fn logical(field: &Field, raw: &[u8]) -> FieldValue {
    let value = text(field, raw).to_lowercase();
    if value.is_empty() || value == "?" {
        return FieldValue::Logical(None);
    }
    FieldValue::Logical(Some(value == "t" || value == "y"))
}

/// 'M': block index into the companion memo file.
pub fn memo(field: &Field, raw: &[u8]) -> Result<FieldValue> {
    let value = text(field, raw);
    if value.is_empty() {
        return Ok(FieldValue::Memo(None));
    }
    let parsed = value
        .parse::<u64>()
        .map_err(|_| decode_error(field, "memo index", &value))?;
    Ok(FieldValue::Memo(Some(parsed)))
}

fn decode_error(field: &Field, kind: &'static str, value: &str) -> DbfError {
    DbfError::Decode {
        field: field.name().to_string(),
        kind,
        value: value.to_string(),
    }
}
