//! Core dbf table reader module.

pub mod cast;
pub mod codepage;
pub mod format;
pub mod iter;
pub mod reader;
pub mod types;

pub use reader::Dbf;
pub use types::error::{DbfError, Result};
