//! Write side of the workbook collaborator, serialized with `rust_xlsxwriter`.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{ExcelDateTime, Format};

use crate::error::{TabularError, TabularResult};
use crate::types::CellValue;

use super::cell_ref::parse_cell_ref;

const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

// Largest magnitude an f64 number cell holds without losing integer precision (2^53).
const MAX_EXACT_NUMBER: u64 = 1 << 53;

/// An in-memory workbook under construction.
///
/// Cells are buffered per sheet and only turned into xlsx when the workbook is serialized
/// ([`Workbook::write_to`], [`Workbook::to_bytes`], [`Workbook::save`]). The handle owns plain
/// values, so it can be moved to another thread for serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

/// One named sheet of a [`Workbook`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    // (row, column), both 0-based.
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl Sheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
        }
    }

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows up to and including the last row holding a non-empty cell.
    ///
    /// Matches the row count of the serialized sheet.
    pub fn row_count(&self) -> usize {
        self.cells
            .last_key_value()
            .map(|(&(row, _), _)| row as usize + 1)
            .unwrap_or(0)
    }

    /// Value at an `A1`-style reference, if one was set.
    pub fn cell(&self, reference: &str) -> Option<&CellValue> {
        let key = cell_key(reference)?;
        self.cells.get(&key)
    }

    /// Values of one 1-based row, from column `A` up to the last set cell.
    pub fn row(&self, row: usize) -> Vec<CellValue> {
        let Some(row0) = row.checked_sub(1).and_then(|r| u32::try_from(r).ok()) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (&(_, col), value) in self.cells.range((row0, 0)..=(row0, u16::MAX)) {
            out.resize(col as usize, CellValue::Empty);
            out.push(value.clone());
        }
        out
    }
}

impl Workbook {
    /// An empty workbook with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet named `name`. Adding a name that already exists is a no-op.
    pub fn new_sheet(&mut self, name: &str) -> &mut Sheet {
        let idx = match self.sheets.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx]
    }

    /// The sheet named `name`, if it exists.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in creation order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Set the value of one cell, e.g. `set_cell_value("Sheet1", "C12", 42i64)`.
    ///
    /// Setting [`CellValue::Empty`] clears the cell.
    pub fn set_cell_value(
        &mut self,
        sheet: &str,
        reference: &str,
        value: impl Into<CellValue>,
    ) -> TabularResult<()> {
        let key = cell_key(reference).ok_or_else(|| TabularError::InvalidCellReference {
            reference: reference.to_string(),
        })?;
        let idx = self
            .sheets
            .iter()
            .position(|s| s.name == sheet)
            .ok_or_else(|| TabularError::SheetNotFound {
                sheet: sheet.to_string(),
                available: self.sheet_names(),
            })?;
        match value.into() {
            CellValue::Empty => {
                self.sheets[idx].cells.remove(&key);
            }
            value => {
                self.sheets[idx].cells.insert(key, value);
            }
        }
        Ok(())
    }

    /// Serialize as xlsx into `sink`.
    pub fn write_to<W: Write>(&self, mut sink: W) -> TabularResult<()> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Serialize as xlsx into a byte buffer.
    pub fn to_bytes(&self) -> TabularResult<Vec<u8>> {
        let mut book = self.build()?;
        Ok(book.save_to_buffer()?)
    }

    /// Serialize as xlsx into a file.
    pub fn save(&self, path: impl AsRef<Path>) -> TabularResult<()> {
        let mut book = self.build()?;
        book.save(path.as_ref())?;
        Ok(())
    }

    fn build(&self) -> TabularResult<rust_xlsxwriter::Workbook> {
        let mut book = rust_xlsxwriter::Workbook::new();
        let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

        for sheet in &self.sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(sheet.name.as_str())?;

            for (&(row, col), value) in &sheet.cells {
                match value {
                    CellValue::Empty => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s.as_str())?;
                    }
                    // Integers an f64 cannot hold exactly are kept as text, which reads back
                    // through the same integer coercion.
                    CellValue::Int(v) if v.unsigned_abs() > MAX_EXACT_NUMBER => {
                        worksheet.write_string(row, col, v.to_string())?;
                    }
                    CellValue::Int(v) => {
                        worksheet.write_number(row, col, *v as f64)?;
                    }
                    CellValue::UInt(v) if *v > MAX_EXACT_NUMBER => {
                        worksheet.write_string(row, col, v.to_string())?;
                    }
                    CellValue::UInt(v) => {
                        worksheet.write_number(row, col, *v as f64)?;
                    }
                    CellValue::Float(v) => {
                        worksheet.write_number(row, col, *v)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    CellValue::DateTime(dt) => {
                        let excel =
                            ExcelDateTime::parse_from_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string())?;
                        worksheet.write_datetime_with_format(row, col, &excel, &datetime_format)?;
                    }
                }
            }
        }

        Ok(book)
    }
}

fn cell_key(reference: &str) -> Option<(u32, u16)> {
    let (column, row) = parse_cell_ref(reference)?;
    Some((u32::try_from(row - 1).ok()?, u16::try_from(column - 1).ok()?))
}
