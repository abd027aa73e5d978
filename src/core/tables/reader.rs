//! Header-keyed CSV table reader
//!
//! The first record of a table names its columns. Every following record is
//! produced as a [`Row`] mapping those names to the record's fields, together
//! with its 1-based data line number. Reading is lazy and stops at the first
//! malformed record.

use crate::core::error::LoadError;
use std::collections::HashMap;
use std::io::Read;
use std::ops::ControlFlow;

/// One data record keyed by header column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Field for `column`, or `None` when the record was too short to have it
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Field for `column`, empty when absent
    #[must_use]
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    /// Whether `column` holds a non-empty value
    #[must_use]
    pub fn is_set(&self, column: &str) -> bool {
        !self.value(column).is_empty()
    }

    /// Number of columns present in this row
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row carries no columns at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// How a [`Rows::visit`] pass ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every row was produced
    Exhausted,
    /// The visitor asked to stop before the end
    Stopped,
}

/// Entry point for reading a table
pub struct TableReader;

impl TableReader {
    /// Start reading a table held in memory
    ///
    /// # Errors
    /// Returns [`LoadError::MissingHeader`] or [`LoadError::Header`] when the
    /// header line cannot be read.
    pub fn from_text<'a>(table: &str, text: &'a str) -> Result<Rows<&'a [u8]>, LoadError> {
        Self::from_reader(table, text.as_bytes())
    }

    /// Start reading a table from any byte source
    ///
    /// # Errors
    /// Returns [`LoadError::MissingHeader`] or [`LoadError::Header`] when the
    /// header line cannot be read.
    pub fn from_reader<R: Read>(table: &str, input: R) -> Result<Rows<R>, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers().map_err(|source| LoadError::Header {
            table: table.to_string(),
            source,
        })?;
        if headers.is_empty() {
            return Err(LoadError::MissingHeader {
                table: table.to_string(),
            });
        }
        let headers: Vec<String> = headers.iter().map(str::to_string).collect();

        Ok(Rows {
            table: table.to_string(),
            headers,
            records: reader.into_records(),
            line: 0,
            done: false,
        })
    }
}

/// Lazy sequence of `(line, row)` pairs; fused after the first error
pub struct Rows<R> {
    table: String,
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<R>,
    line: usize,
    done: bool,
}

impl<R: Read> Rows<R> {
    /// Column names taken from the header line
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Feed every row to `visit` until it breaks or the input runs out
    ///
    /// Rows handed to `visit` before an error stay with the caller; nothing is
    /// read after `visit` returns [`ControlFlow::Break`].
    ///
    /// # Errors
    /// Returns the first [`LoadError::Row`] met while reading.
    pub fn visit<F>(self, mut visit: F) -> Result<Completion, LoadError>
    where
        F: FnMut(usize, Row) -> ControlFlow<()>,
    {
        for item in self {
            let (line, row) = item?;
            if visit(line, row).is_break() {
                return Ok(Completion::Stopped);
            }
        }
        Ok(Completion::Exhausted)
    }
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<(usize, Row), LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let record = match self.records.next() {
            None => {
                self.done = true;
                return None;
            }
            Some(Err(source)) => {
                self.done = true;
                return Some(Err(LoadError::Row {
                    table: self.table.clone(),
                    line: self.line + 1,
                    source,
                }));
            }
            Some(Ok(record)) => record,
        };

        self.line += 1;
        let fields = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column.clone(), field.to_string()))
            .collect();

        Some(Ok((self.line, Row { fields })))
    }
}
