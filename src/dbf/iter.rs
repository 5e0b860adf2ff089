//! Row iteration.
//!
//! # Example
//! ```no_run
//! # use dbf_reader::Dbf;
//! # let mut dbf = Dbf::open("table.dbf", None, true).unwrap();
//! for result in dbf.rows() {
//!     let row = result.unwrap();
//!     for (name, value) in row.iter() {
//!         println!("{}: {}", name, value);
//!     }
//! }
//! ```

use std::io::{Read, Seek};

use super::reader::Dbf;
use super::types::error::Result;
use super::types::value::Row;

/// Pull-based iterator over a table's non-deleted records.
///
/// Yields one [`Row`] per live record slot. Slots whose deletion marker
/// is set are consumed and skipped. The slot cursor belongs to the
/// table, not this handle, so the sequence is single-pass: a later
/// [`Dbf::rows`] call resumes, it never restarts. An `Err` item is
/// always the last; a failed table yields nothing further.
///
/// Created by [`Dbf::rows`].
pub struct Rows<'a, R: Read + Seek> {
    dbf: &'a mut Dbf<R>,
}

impl<'a, R: Read + Seek> Rows<'a, R> {
    pub(super) fn new(dbf: &'a mut Dbf<R>) -> Self {
        Self { dbf }
    }
}

impl<R: Read + Seek> Iterator for Rows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.dbf.next_row()
    }
}
