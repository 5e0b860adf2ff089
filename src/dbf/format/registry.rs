//! Format variant detection.
//!
//! The first byte of a dbf file names its dialect. Two layout families
//! exist: the classic one shared by every dBASE III/IV/5 era writer, and
//! the wider Visual FoxPro one. FoxPro tables are recognized so they can
//! be rejected with a precise error instead of a garbled decode.

use std::io::{Read, Seek, SeekFrom};

use byteorder::ReadBytesExt;
use log::{debug, warn};

use crate::dbf::format::layout::{self, Layout};
use crate::dbf::format::{field, prolog};
use crate::dbf::types::error::{DbfError, Result};

/// Signature bytes documented for the classic family: dBASE III through
/// 5, with and without memo files, SMT variants and FoxBASE.
const CLASSIC_SIGNATURES: &[u8] = &[
    0x02, 0x03, 0x04, 0x43, 0x63, 0x83, 0x8B, 0x8C, 0xCB, 0xE5, 0xEB, 0xF5, 0xFB,
];

/// Signature bytes exclusive to Visual FoxPro.
const FOXPRO_SIGNATURES: &[u8] = &[0x30, 0x31];

/// Layout family selected by the signature byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// The shared dBASE III/IV/5 layout.
    Classic,
    /// Visual FoxPro; classified but not decoded.
    FoxPro,
}

impl Dialect {
    /// Classifies a signature byte. Anything outside the FoxPro-exclusive
    /// set shares the classic layout.
    pub fn from_signature(signature: u8) -> Self {
        if FOXPRO_SIGNATURES.contains(&signature) {
            Dialect::FoxPro
        } else {
            Dialect::Classic
        }
    }

    /// Header layout of this dialect.
    pub fn prolog_layout(self) -> &'static Layout {
        match self {
            Dialect::Classic => &prolog::PROLOG_LAYOUT,
            Dialect::FoxPro => &prolog::FOXPRO_PROLOG_LAYOUT,
        }
    }

    /// Field-descriptor layout of this dialect.
    pub fn field_layout(self) -> &'static Layout {
        match self {
            Dialect::Classic => &field::FIELD_LAYOUT,
            Dialect::FoxPro => &field::FOXPRO_FIELD_LAYOUT,
        }
    }
}

/// Reads the signature byte, resolves the dialect, and seeks back to the
/// start so the prolog decoder sees the whole header.
///
/// Unknown signatures resolve to the classic layout with a warning; in
/// practice they are written by obscure classic-compatible tools far more
/// often than by anything with a different layout.
pub fn detect_dialect<R: Read + Seek>(source: &mut R) -> Result<Dialect> {
    let signature = source
        .read_u8()
        .map_err(|e| layout::truncated(e, "signature", 1))?;
    source.seek(SeekFrom::Start(0))?;

    match Dialect::from_signature(signature) {
        Dialect::FoxPro => Err(DbfError::UnsupportedVariant(signature)),
        Dialect::Classic => {
            if CLASSIC_SIGNATURES.contains(&signature) {
                debug!("Signature {:#04x} resolved to the classic layout", signature);
            } else {
                warn!(
                    "Unrecognized signature {:#04x}; proceeding with the classic layout",
                    signature
                );
            }
            Ok(Dialect::Classic)
        }
    }
}
