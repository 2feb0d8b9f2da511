//! Typed records -> a populated sheet.

use crate::error::{TabularError, TabularResult};
use crate::schema::Record;
use crate::sheet::{cell_ref, Workbook};

use super::observability::{report, MappingContext, MappingOperation};
use super::options::WriteOptions;

/// Write `records` into a sheet named `sheet_name` of a fresh workbook.
///
/// Row 1 holds the field labels; record *i* (0-based) goes to row *i + 2*. Columns are laid out
/// by ascending ordinal, so the layout depends only on the record type. Fails with
/// [`TabularError::EmptyInput`] when `records` is empty.
///
/// ```rust
/// use sheet_records::impl_record;
/// use sheet_records::mapping::write;
///
/// #[derive(Debug, Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
/// impl_record!(Person { name: "Name", 2; age: "Age", 1; });
///
/// let people = vec![Person { name: "Ada".into(), age: 36 }];
/// let workbook = write(&people, "People").unwrap();
/// assert_eq!(workbook.sheet("People").unwrap().row_count(), 2);
/// ```
pub fn write<T: Record>(records: &[T], sheet_name: &str) -> TabularResult<Workbook> {
    write_with_options(records, &WriteOptions::sheet(sheet_name))
}

/// [`write`] with observer reporting.
pub fn write_with_options<T: Record>(records: &[T], options: &WriteOptions) -> TabularResult<Workbook> {
    let ctx = MappingContext::new(MappingOperation::Write, options.sheet_name.as_str());
    let mut workbook = Workbook::new();
    let result = write_sheet(&mut workbook, &options.sheet_name, records).map(|()| workbook);
    report(
        options.observer.as_ref(),
        options.alert_at_or_above,
        &ctx,
        result.as_ref().map(|_| records.len()),
    );
    result
}

/// Add a sheet named `sheet_name` holding `records` to an existing workbook.
///
/// Writing into a sheet that already exists overwrites the cells it covers.
pub fn write_sheet<T: Record>(
    workbook: &mut Workbook,
    sheet_name: &str,
    records: &[T],
) -> TabularResult<()> {
    if records.is_empty() {
        return Err(TabularError::EmptyInput);
    }

    workbook.new_sheet(sheet_name);
    let schema = T::schema();
    let columns = schema.writing_order();

    for (position, field) in columns.iter().enumerate() {
        workbook.set_cell_value(sheet_name, &cell_ref(position + 1, 1), field.label())?;
    }

    for (row, record) in records.iter().enumerate() {
        for (position, field) in columns.iter().enumerate() {
            workbook.set_cell_value(
                sheet_name,
                &cell_ref(position + 1, row + 2),
                field.render(record),
            )?;
        }
    }
    Ok(())
}
