use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use encoding_rs::Encoding;
use log::{debug, info, trace};

use super::codepage;
use super::format::registry::Dialect;
use super::format::{field, layout, prolog, registry, DELETED_MARKER, HEADER_TERMINATOR};
use super::iter::Rows;
use super::types::error::{DbfError, Result};
use super::types::models::{Field, Prolog, RowSchema};
use super::types::value::Row;

/// A read-only view over one dbf table.
///
/// Owns the underlying byte source for its whole lifetime; dropping the
/// table releases it. The record cursor lives on the table, so row
/// iteration is forward-only: dropping a [`Rows`] iterator and asking
/// for another resumes where the first stopped. To start over, reopen
/// the source.
#[derive(Debug)]
pub struct Dbf<R> {
    source: R,
    prolog: Prolog,
    fields: Vec<Field>,
    schema: Arc<RowSchema>,

    /// Record slots consumed so far, deleted ones included.
    slots_read: u32,
    /// Bytes per record body, the deletion marker excluded.
    body_bytes: usize,
    /// Set once a slot fails to read or cast; the iteration is over.
    failed: bool,
}

impl Dbf<BufReader<File>> {
    /// Opens a table from a filesystem path.
    ///
    /// # Arguments
    /// * `path` - File path to the .dbf file
    /// * `encoding` - Optional explicit text encoding override
    /// * `lowercase_names` - Lowercase field names while reading descriptors
    pub fn open(
        path: impl AsRef<Path>,
        encoding: Option<&'static Encoding>,
        lowercase_names: bool,
    ) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening dbf table: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), encoding, lowercase_names)
    }
}

impl<R: Read + Seek> Dbf<R> {
    /// Opens a table over any seekable byte source.
    ///
    /// Priority for determining text encoding (highest → lowest):
    /// 1. `encoding` - explicit override provided by caller/CLI
    /// 2. Code page declared in the prolog
    /// 3. cp866, the hard-coded fallback
    ///
    /// # Errors
    /// Returns an error if:
    /// - The source cannot be read or ends early
    /// - The signature byte names a FoxPro table
    /// - The header length or terminator byte is inconsistent
    pub fn from_reader(
        mut source: R,
        encoding: Option<&'static Encoding>,
        lowercase_names: bool,
    ) -> Result<Self> {
        // Step 1: Classify the layout family from the signature byte
        let dialect = registry::detect_dialect(&mut source)?;

        // Step 2: Decode the prolog
        let prolog = prolog::decode(&mut source, dialect)?;

        // Step 3: Resolve the text encoding once for the whole table
        let resolved = encoding
            .or_else(|| prolog.encoding())
            .unwrap_or_else(codepage::default_encoding);
        debug!("Text encoding resolved to {}", resolved.name());

        // Step 4: Decode the field-descriptor table and its terminator
        let (fields, schema) =
            read_fields(&mut source, dialect, &prolog, resolved, lowercase_names)?;

        let body_bytes = fields.iter().map(|f| f.length).sum();

        Ok(Self {
            source,
            prolog,
            fields,
            schema: Arc::new(schema),
            slots_read: 0,
            body_bytes,
            failed: false,
        })
    }

    /// The decoded file header.
    pub fn prolog(&self) -> &Prolog {
        &self.prolog
    }

    /// Field descriptors in file order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The field-name schema shared by every row of this table.
    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    /// Returns an iterator over the remaining non-deleted records.
    ///
    /// Deleted slots are consumed and skipped, never yielded.
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows::new(self)
    }

    /// Releases the table and hands back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Advances past slots until a live record is decoded or the slot
    /// count declared by the prolog is exhausted. Errors are terminal:
    /// once a slot has failed, every later call returns `None`.
    pub(crate) fn next_row(&mut self) -> Option<Result<Row>> {
        if self.failed {
            return None;
        }
        while self.slots_read < self.prolog.records_count {
            self.slots_read += 1;
            match self.read_slot() {
                Ok(Some(row)) => return Some(Ok(row)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }

    /// Reads one record slot. `Ok(None)` means the slot was deleted; the
    /// body is read either way, so the cursor stays record-aligned and a
    /// short file surfaces as `Truncated` even inside a deleted slot.
    fn read_slot(&mut self) -> Result<Option<Row>> {
        let mut marker = [0u8; 1];
        self.source
            .read_exact(&mut marker)
            .map_err(|e| layout::truncated(e, "deletion marker", 1))?;

        let mut body = vec![0u8; self.body_bytes];
        self.source
            .read_exact(&mut body)
            .map_err(|e| layout::truncated(e, "record", self.body_bytes))?;

        if marker[0] == DELETED_MARKER {
            trace!(
                "Slot {} flagged deleted; discarding {} bytes",
                self.slots_read,
                self.body_bytes
            );
            return Ok(None);
        }

        let mut values = Vec::with_capacity(self.fields.len());
        let mut offset = 0;
        for field in &self.fields {
            let raw = &body[offset..offset + field.length];
            values.push(field.cast(raw)?);
            offset += field.length;
        }

        Ok(Some(Row::new(Arc::clone(&self.schema), values)))
    }
}

/// Decodes exactly `fields_count` descriptors, de-duplicates their names,
/// and confirms the terminator byte that closes the header.
fn read_fields<R: Read>(
    source: &mut R,
    dialect: Dialect,
    prolog: &Prolog,
    encoding: &'static Encoding,
    lowercase_names: bool,
) -> Result<(Vec<Field>, RowSchema)> {
    let mut fields: Vec<Field> = Vec::with_capacity(prolog.fields_count);
    let mut names: Vec<String> = Vec::with_capacity(prolog.fields_count);

    for _ in 0..prolog.fields_count {
        let mut field = field::decode(source, dialect, encoding, lowercase_names)?;

        // Duplicate names would make row lookup ambiguous; suffix with
        // underscores until the name is unique within this table.
        if names.iter().any(|n| n == field.name()) {
            let mut renamed = field.name().to_string();
            while names.iter().any(|n| *n == renamed) {
                renamed.push('_');
            }
            debug!(
                "Duplicate field name `{}` renamed to `{}`",
                field.name(),
                renamed
            );
            field.set_name(renamed);
        }

        names.push(field.name().to_string());
        fields.push(field);
    }

    let mut terminator = [0u8; 1];
    source
        .read_exact(&mut terminator)
        .map_err(|e| layout::truncated(e, "header terminator", 1))?;
    if terminator[0] != HEADER_TERMINATOR {
        return Err(DbfError::MissingTerminator {
            signature: prolog.signature,
            found: terminator[0],
        });
    }

    debug!("{} field descriptors read", fields.len());
    Ok((fields, RowSchema::new(names)))
}
