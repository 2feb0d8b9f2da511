//! Read side of the workbook collaborator, backed by `calamine`.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::error::{TabularError, TabularResult};
use crate::types::TIMESTAMP_FORMAT;

/// A workbook opened for reading (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).
///
/// The source bytes are owned by the handle and released when it is dropped, on every exit path.
pub struct SourceWorkbook {
    inner: Sheets<Cursor<Vec<u8>>>,
}

impl SourceWorkbook {
    /// Read `source` to the end and open it as a workbook.
    pub fn open(mut source: impl Read) -> TabularResult<Self> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    /// Open a workbook file.
    pub fn open_path(path: impl AsRef<Path>) -> TabularResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Open a workbook held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> TabularResult<Self> {
        let inner = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(TabularError::Open)?;
        Ok(Self { inner })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    /// Name of the first sheet, if the workbook has any.
    pub fn first_sheet(&self) -> Option<String> {
        self.inner.sheet_names().into_iter().next()
    }

    /// Load the rows of `sheet` as cell text.
    ///
    /// Rows are reported from sheet row 1 and cells from column `A`, so positions are absolute
    /// even when the used range starts further in. Trailing empty cells are trimmed.
    pub fn rows(&mut self, sheet: &str) -> TabularResult<Rows> {
        let available = self.sheet_names();
        if !available.iter().any(|s| s == sheet) {
            return Err(TabularError::SheetNotFound {
                sheet: sheet.to_string(),
                available,
            });
        }

        let range = self
            .inner
            .worksheet_range(sheet)
            .map_err(|source| TabularError::RowIterator {
                sheet: sheet.to_string(),
                source,
            })?;

        Ok(Rows {
            inner: range_to_text_rows(&range).into_iter(),
        })
    }
}

/// Cursor over the rows of one sheet, each row being its cells' text.
#[derive(Debug)]
pub struct Rows {
    inner: std::vec::IntoIter<Vec<String>>,
}

impl Iterator for Rows {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows {}

fn range_to_text_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_text));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }
    rows
}

/// Text form of a cell as the reader sees it.
///
/// Whole floats print without a fractional part (`25.0` -> `"25"`), and date-times use the
/// timestamp field format so they coerce back into timestamp fields.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => ndt.format(TIMESTAMP_FORMAT).to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
