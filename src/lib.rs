//! # dbf-reader
//!
//! A read-only decoder for dBase (.dbf) table files.
//! Handles the classic dBASE III/IV/5 layout family, decoding the fixed
//! header, the field-descriptor table and the record area into typed
//! values. Visual FoxPro tables are detected and rejected.
//!
//! **Note:** Companion memo files (.dbt) are not resolved; memo fields
//! yield their block index.
pub mod dbf;

// Re-export the main types for convenience
pub use dbf::{
    format::registry::Dialect,
    iter::Rows,
    reader::Dbf,
    types::{
        error::{DbfError, Result},
        models::{Field, FieldType, Prolog, RowSchema},
        value::{FieldValue, Row},
    },
};
