//! Declarative fixed-size region decoding.
//!
//! Every structured region of a dbf file (the prolog, each field
//! descriptor) is a fixed-width little-endian record. Rather than
//! hand-writing one reader per region, each region is described once as
//! a [`Layout`]: an ordered list of named [`Rule`]s. The total byte size
//! of a layout is computed at compile time, so adding a dialect means
//! adding a table, not a parser.

use std::io;
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};

use crate::dbf::types::error::{DbfError, Result};

/// A single decoding rule within a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Fixed-width byte string, kept raw.
    Bytes(usize),
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer, little-endian.
    U16,
    /// Unsigned 32-bit integer, little-endian.
    U32,
    /// Single-byte boolean flag; any nonzero value reads as true.
    Flag,
    /// Single raw byte.
    Byte,
}

impl Rule {
    /// Byte width this rule consumes.
    pub const fn width(self) -> usize {
        match self {
            Rule::Bytes(n) => n,
            Rule::U8 | Rule::Flag | Rule::Byte => 1,
            Rule::U16 => 2,
            Rule::U32 => 4,
        }
    }
}

/// An ordered, named sequence of rules describing one binary region.
#[derive(Debug)]
pub struct Layout {
    name: &'static str,
    entries: &'static [(&'static str, Rule)],
    size: usize,
}

impl Layout {
    /// Builds a layout and computes its total size in const context.
    pub const fn new(name: &'static str, entries: &'static [(&'static str, Rule)]) -> Self {
        let mut size = 0;
        let mut i = 0;
        while i < entries.len() {
            size += entries[i].1.width();
            i += 1;
        }
        Self {
            name,
            entries,
            size,
        }
    }

    /// Total byte size of the region this layout describes.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Region name used in error reports.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads exactly [`size`](Self::size) bytes from `source` and decodes
    /// them rule by rule. A short read is fatal.
    pub fn read_from<R: Read>(&'static self, source: &mut R) -> Result<RawRecord> {
        let mut buf = vec![0u8; self.size];
        source
            .read_exact(&mut buf)
            .map_err(|e| truncated(e, self.name, self.size))?;
        self.decode(&buf)
    }

    /// Decodes a buffer that must hold the whole region.
    pub fn decode(&'static self, buf: &[u8]) -> Result<RawRecord> {
        if buf.len() != self.size {
            return Err(DbfError::Truncated {
                region: self.name,
                expected: self.size,
            });
        }

        let mut values = Vec::with_capacity(self.entries.len());
        let mut offset = 0;
        for (_, rule) in self.entries {
            let width = rule.width();
            let raw = &buf[offset..offset + width];
            values.push(match rule {
                Rule::Bytes(_) => RawScalar::Bytes(raw.to_vec()),
                Rule::U8 => RawScalar::U8(raw[0]),
                Rule::U16 => RawScalar::U16(LittleEndian::read_u16(raw)),
                Rule::U32 => RawScalar::U32(LittleEndian::read_u32(raw)),
                Rule::Flag => RawScalar::Flag(raw[0] != 0),
                Rule::Byte => RawScalar::Byte(raw[0]),
            });
            offset += width;
        }

        Ok(RawRecord {
            layout: self,
            values,
        })
    }
}

/// A raw scalar produced by one layout rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawScalar {
    U8(u8),
    U16(u16),
    U32(u32),
    Flag(bool),
    Byte(u8),
    Bytes(Vec<u8>),
}

/// One decoded region: rule name → raw scalar, in layout order.
///
/// Accessors are typed; asking for an entry under the wrong kind (or for
/// a name the layout never declared) is a [`DbfError::LayoutMismatch`],
/// which points at drift between a layout table and its consumer.
#[derive(Debug)]
pub struct RawRecord {
    layout: &'static Layout,
    values: Vec<RawScalar>,
}

impl RawRecord {
    pub fn u8(&self, name: &'static str) -> Result<u8> {
        match self.lookup(name)? {
            RawScalar::U8(v) => Ok(*v),
            _ => Err(self.mismatch(name)),
        }
    }

    pub fn u16(&self, name: &'static str) -> Result<u16> {
        match self.lookup(name)? {
            RawScalar::U16(v) => Ok(*v),
            _ => Err(self.mismatch(name)),
        }
    }

    pub fn u32(&self, name: &'static str) -> Result<u32> {
        match self.lookup(name)? {
            RawScalar::U32(v) => Ok(*v),
            _ => Err(self.mismatch(name)),
        }
    }

    pub fn flag(&self, name: &'static str) -> Result<bool> {
        match self.lookup(name)? {
            RawScalar::Flag(v) => Ok(*v),
            _ => Err(self.mismatch(name)),
        }
    }

    pub fn byte(&self, name: &'static str) -> Result<u8> {
        match self.lookup(name)? {
            RawScalar::Byte(v) => Ok(*v),
            _ => Err(self.mismatch(name)),
        }
    }

    pub fn bytes(&self, name: &'static str) -> Result<&[u8]> {
        match self.lookup(name)? {
            RawScalar::Bytes(v) => Ok(v.as_slice()),
            _ => Err(self.mismatch(name)),
        }
    }

    fn lookup(&self, name: &'static str) -> Result<&RawScalar> {
        self.layout
            .entries
            .iter()
            .position(|(n, _)| *n == name)
            .map(|i| &self.values[i])
            .ok_or_else(|| self.mismatch(name))
    }

    fn mismatch(&self, name: &'static str) -> DbfError {
        DbfError::LayoutMismatch {
            region: self.layout.name,
            name,
        }
    }
}

/// Maps a short read onto [`DbfError::Truncated`]; any other I/O failure
/// passes through unchanged.
pub(crate) fn truncated(err: io::Error, region: &'static str, expected: usize) -> DbfError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        DbfError::Truncated { region, expected }
    } else {
        DbfError::Io(err)
    }
}
