//! Sheet rows -> typed records.

use std::io::Read;
use std::path::Path;

use crate::error::{TabularError, TabularResult};
use crate::normalize::normalize;
use crate::schema::{Record, Schema};
use crate::sheet::cell_ref::MAX_COLUMNS;
use crate::sheet::SourceWorkbook;

use super::observability::{report, MappingContext, MappingOperation};
use super::options::{ReadOptions, SheetSelection};

/// Read the selected sheet of `source` into records of type `T`.
///
/// Behavior:
/// - Row 1 is the header row; each header cell is normalized (BOM, whitespace, wrapping quotes)
///   and matched exactly against field labels
/// - Rows whose cells are all empty are skipped
/// - Columns whose header matches no label are ignored
/// - Cell text that does not coerce leaves the field at its default (`None` when nullable)
///
/// Any structural failure (not a workbook, missing sheet, unreadable rows) aborts the read and
/// no partial result is returned.
///
/// ```no_run
/// use sheet_records::impl_record;
/// use sheet_records::mapping::{read, ReadOptions};
///
/// #[derive(Debug, Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
/// impl_record!(Person { name: "Name", 2; age: "Age", 1; });
///
/// # fn main() -> Result<(), sheet_records::TabularError> {
/// let file = std::fs::File::open("people.xlsx")?;
/// let people: Vec<Person> = read(file, &ReadOptions::sheet("People"))?;
/// println!("rows={}", people.len());
/// # Ok(())
/// # }
/// ```
pub fn read<T: Record>(source: impl Read, options: &ReadOptions) -> TabularResult<Vec<T>> {
    observed(MappingOperation::Read, options, || {
        let mut workbook = SourceWorkbook::open(source)?;
        read_workbook(&mut workbook, &options.sheet)
    })
}

/// [`read`] from a file path.
pub fn read_path<T: Record>(path: impl AsRef<Path>, options: &ReadOptions) -> TabularResult<Vec<T>> {
    observed(MappingOperation::Read, options, || {
        let mut workbook = SourceWorkbook::open_path(path)?;
        read_workbook(&mut workbook, &options.sheet)
    })
}

/// Header-matched read from an already opened workbook.
pub fn read_workbook<T: Record>(
    workbook: &mut SourceWorkbook,
    sheet: &SheetSelection,
) -> TabularResult<Vec<T>> {
    let sheet = resolve_sheet(workbook, sheet)?;
    let schema = T::schema();
    let labels = schema.label_index();

    let mut rows = workbook.rows(&sheet)?;
    let header = rows.next().unwrap_or_default();
    let projection: Vec<Option<usize>> = header
        .iter()
        .map(|h| labels.get(normalize(h)).copied())
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for cells in rows {
        if is_blank(&cells) {
            continue;
        }
        records.push(project_row(&schema, &cells, &projection));
    }
    Ok(records)
}

/// Read records by column position instead of header text.
///
/// Row 1 is skipped. Column *n* (1-based) feeds the field whose ordinal is *n*; columns with no
/// such field are ignored, as are fields without a valid ordinal.
pub fn read_positional<T: Record>(source: impl Read, options: &ReadOptions) -> TabularResult<Vec<T>> {
    observed(MappingOperation::ReadPositional, options, || {
        let mut workbook = SourceWorkbook::open(source)?;
        let sheet = resolve_sheet(&workbook, &options.sheet)?;
        let schema = T::schema();
        let by_ordinal = schema.ordinal_index();

        let width = by_ordinal.keys().copied().max().unwrap_or(0).clamp(0, MAX_COLUMNS as i64);
        let projection: Vec<Option<usize>> = (1..=width).map(|n| by_ordinal.get(&n).copied()).collect();

        let mut rows = workbook.rows(&sheet)?;
        rows.next();
        let mut records = Vec::with_capacity(rows.len());
        for cells in rows {
            if is_blank(&cells) {
                continue;
            }
            records.push(project_row(&schema, &cells, &projection));
        }
        Ok(records)
    })
}

/// Hand every row of the selected sheet (header included) to `on_row` as raw cell text.
///
/// Stops at the first callback error and returns it; the observer sees that as
/// [`TabularError::ScanAborted`]. On success returns the number of rows visited.
pub fn for_each_row<E, F>(source: impl Read, options: &ReadOptions, mut on_row: F) -> Result<usize, E>
where
    E: From<TabularError>,
    F: FnMut(&[String]) -> Result<(), E>,
{
    let ctx = MappingContext::new(MappingOperation::Scan, options.sheet.to_string());
    let opened = SourceWorkbook::open(source).and_then(|mut workbook| {
        let sheet = resolve_sheet(&workbook, &options.sheet)?;
        workbook.rows(&sheet)
    });
    let rows = match opened {
        Ok(rows) => rows,
        Err(e) => {
            report(options.observer.as_ref(), options.alert_at_or_above, &ctx, Err(&e));
            return Err(E::from(e));
        }
    };

    let mut visited = 0;
    for cells in rows {
        if let Err(e) = on_row(&cells) {
            let aborted = TabularError::ScanAborted { rows: visited };
            report(options.observer.as_ref(), options.alert_at_or_above, &ctx, Err(&aborted));
            return Err(e);
        }
        visited += 1;
    }

    report(options.observer.as_ref(), options.alert_at_or_above, &ctx, Ok(visited));
    Ok(visited)
}

/// Sheet names of the workbook in `source`, in workbook order.
pub fn sheet_names(source: impl Read) -> TabularResult<Vec<String>> {
    Ok(SourceWorkbook::open(source)?.sheet_names())
}

fn observed<T>(
    operation: MappingOperation,
    options: &ReadOptions,
    run: impl FnOnce() -> TabularResult<Vec<T>>,
) -> TabularResult<Vec<T>> {
    let ctx = MappingContext::new(operation, options.sheet.to_string());
    let result = run();
    report(
        options.observer.as_ref(),
        options.alert_at_or_above,
        &ctx,
        result.as_ref().map(Vec::len),
    );
    result
}

fn resolve_sheet(workbook: &SourceWorkbook, selection: &SheetSelection) -> TabularResult<String> {
    match selection {
        SheetSelection::Named(name) => Ok(name.clone()),
        SheetSelection::First => workbook.first_sheet().ok_or_else(|| TabularError::SheetNotFound {
            sheet: selection.to_string(),
            available: Vec::new(),
        }),
    }
}

fn project_row<T: Record>(schema: &Schema<T>, cells: &[String], projection: &[Option<usize>]) -> T {
    let mut record = T::default();
    for (cell, field) in cells.iter().zip(projection) {
        let Some(idx) = *field else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        schema.fields()[idx].apply_text(&mut record, cell);
    }
    record
}

fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|c| c.is_empty())
}
