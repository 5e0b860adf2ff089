//! Custom error types for the dbf-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum DbfError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The source ended before a fixed-size region could be read in full.
    #[error("Truncated source: {region} requires {expected} bytes")]
    Truncated {
        region: &'static str,
        expected: usize,
    },

    /// The declared header length does not leave room for a whole number
    /// of field descriptors. The file is not a dbf table or is corrupted.
    #[error("Header length {len_head} does not hold a whole number of {field_size}-byte field descriptors")]
    InconsistentHeader { len_head: u16, field_size: usize },

    /// The byte after the last field descriptor is not the 0x0D terminator.
    #[error("Header termination byte not found, got {found:#04x} (signature {signature:#04x})")]
    MissingTerminator { signature: u8, found: u8 },

    /// The signature byte maps to a recognized but unimplemented layout family.
    #[error("FoxPro tables are not supported (signature {0:#04x})")]
    UnsupportedVariant(u8),

    /// A field's bytes cannot be parsed as the type its descriptor declares.
    #[error("Field `{field}`: cannot parse {kind} from {value:?}")]
    Decode {
        field: String,
        kind: &'static str,
        value: String,
    },

    /// A layout accessor asked for an entry the layout does not declare,
    /// or asked for it under the wrong scalar kind.
    #[error("Layout `{region}` has no `{name}` entry of the requested kind")]
    LayoutMismatch {
        region: &'static str,
        name: &'static str,
    },
}

/// A convenience `Result` type alias using the crate's `DbfError` type.
pub type Result<T> = std::result::Result<T, DbfError>;
