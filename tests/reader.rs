use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;

use sheet_records::impl_record;
use sheet_records::mapping::{
    for_each_row, read, read_path, read_positional, sheet_names, ReadOptions, SheetSelection,
};
use sheet_records::TabularError;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheet-records-{name}-{nanos}.xlsx"))
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    age: i64,
    city: String,
    score: Option<f64>,
}

impl_record!(Person {
    name: "Name", 1;
    age: "Age", 2;
    city: "City", 3;
    score: "Score", 4;
});

#[derive(Debug, Default, Clone, PartialEq)]
struct MaybeAge {
    name: String,
    age: Option<i64>,
}

impl_record!(MaybeAge {
    name: "Name";
    age: "Age";
});

/// Header row with encoding noise, one unmatched column, a fully blank row and bad cells.
fn noisy_people_xlsx() -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();

    ws.write_string(0, 0, "\u{feff}Name").unwrap();
    ws.write_string(0, 1, "\"Age\"").unwrap();
    ws.write_string(0, 2, "Unknown").unwrap();
    ws.write_string(0, 3, " City ").unwrap();
    ws.write_string(0, 4, "Score").unwrap();

    ws.write_string(1, 0, "John Doe").unwrap();
    ws.write_number(1, 1, 25).unwrap();
    ws.write_string(1, 2, "ignored").unwrap();
    ws.write_string(1, 3, "New York").unwrap();
    ws.write_string(1, 4, "98.5").unwrap();

    // Row 3 stays blank.

    ws.write_string(3, 0, "Jane Doe").unwrap();
    ws.write_string(3, 1, "abc").unwrap();
    ws.write_string(3, 3, "Paris").unwrap();
    ws.write_string(3, 4, "n/a").unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn read_matches_normalized_headers_and_skips_blank_rows() {
    let bytes = noisy_people_xlsx();
    let people: Vec<Person> = read(bytes.as_slice(), &ReadOptions::sheet("People")).unwrap();

    assert_eq!(
        people,
        vec![
            Person {
                name: "John Doe".to_string(),
                age: 25,
                city: "New York".to_string(),
                score: Some(98.5),
            },
            Person {
                name: "Jane Doe".to_string(),
                age: 0,
                city: "Paris".to_string(),
                score: None,
            },
        ]
    );
}

#[test]
fn unparsable_cell_becomes_none_for_nullable_field() {
    let bytes = noisy_people_xlsx();
    let rows: Vec<MaybeAge> = read(bytes.as_slice(), &ReadOptions::sheet("People")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].age, Some(25));
    assert_eq!(rows[1].age, None);
    assert_eq!(rows[1].name, "Jane Doe");
}

#[test]
fn missing_sheet_is_reported_with_available_names() {
    let bytes = noisy_people_xlsx();
    let err = read::<Person>(bytes.as_slice(), &ReadOptions::sheet("Nope")).unwrap_err();
    match err {
        TabularError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "Nope");
            assert_eq!(available, ["People"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn default_options_read_sheet1() {
    let bytes = noisy_people_xlsx();
    let err = read::<Person>(bytes.as_slice(), &ReadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("sheet 'Sheet1' not found"));
}

#[test]
fn first_sheet_selection_picks_workbook_order() {
    let bytes = noisy_people_xlsx();
    let opts = ReadOptions {
        sheet: SheetSelection::First,
        ..Default::default()
    };
    let people: Vec<Person> = read(bytes.as_slice(), &opts).unwrap();
    assert_eq!(people.len(), 2);
}

#[test]
fn garbage_input_is_an_open_error() {
    let err = read::<Person>(&b"definitely not a workbook"[..], &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, TabularError::Open(_)));
}

#[test]
fn read_path_reads_a_saved_file() {
    let path = tmp_file("people");
    std::fs::write(&path, noisy_people_xlsx()).unwrap();

    let people: Vec<Person> = read_path(&path, &ReadOptions::sheet("People")).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].city, "New York");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_path_missing_file_is_io_error() {
    let err = read_path::<Person>(tmp_file("absent"), &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, TabularError::Io(_)));
}

#[test]
fn three_rows_with_blank_middle_yield_two_records() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(1, 0, "a").unwrap();
    ws.write_string(2, 0, "").unwrap();
    ws.write_string(3, 0, "c").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows: Vec<MaybeAge> = read(bytes.as_slice(), &ReadOptions::default()).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
}

#[test]
fn whitespace_only_row_still_produces_a_record() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(0, 1, "Extra").unwrap();
    ws.write_string(1, 1, " ").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows: Vec<MaybeAge> = read(bytes.as_slice(), &ReadOptions::default()).unwrap();
    assert_eq!(rows, vec![MaybeAge::default()]);
}

#[test]
fn cells_beyond_the_header_are_ignored() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(1, 0, "a").unwrap();
    ws.write_string(1, 5, "stray").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows: Vec<MaybeAge> = read(bytes.as_slice(), &ReadOptions::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "a");
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Flags {
    active: bool,
    legacy: bool,
    seen: Option<NaiveDateTime>,
    due: NaiveDateTime,
}

impl_record!(Flags {
    active: "Active";
    legacy: "Legacy";
    seen: "Seen";
    due: "Due";
});

#[test]
fn booleans_and_timestamps_coerce_from_text_cells() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Active").unwrap();
    ws.write_string(0, 1, "Legacy").unwrap();
    ws.write_string(0, 2, "Seen").unwrap();
    ws.write_string(0, 3, "Due").unwrap();

    ws.write_string(1, 0, "TRUE").unwrap();
    ws.write_boolean(1, 1, false).unwrap();
    ws.write_string(1, 2, "2024-03-01 08:30:00").unwrap();
    ws.write_string(1, 3, "tomorrow").unwrap();

    ws.write_boolean(2, 0, true).unwrap();
    ws.write_string(2, 1, "maybe").unwrap();
    ws.write_string(2, 2, "01/03/2024").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows: Vec<Flags> = read(bytes.as_slice(), &ReadOptions::default()).unwrap();
    let seen = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();

    assert_eq!(
        rows,
        vec![
            Flags {
                active: true,
                legacy: false,
                seen: Some(seen),
                due: NaiveDateTime::default(),
            },
            Flags {
                active: true,
                legacy: false,
                seen: None,
                due: NaiveDateTime::default(),
            },
        ]
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Positional {
    code: String,
    qty: u32,
    label: String,
}

impl_record!(Positional {
    code: "Code", 1;
    qty: "Quantity", 2;
    label: "Label";
});

#[test]
fn read_positional_maps_columns_by_ordinal() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    // Headers deliberately do not match the labels.
    ws.write_string(0, 0, "col-a").unwrap();
    ws.write_string(0, 1, "col-b").unwrap();
    ws.write_string(0, 2, "col-c").unwrap();
    ws.write_string(1, 0, "X-1").unwrap();
    ws.write_number(1, 1, 12).unwrap();
    ws.write_string(1, 2, "not mapped").unwrap();
    ws.write_string(3, 0, "X-2").unwrap();
    ws.write_string(3, 1, "-3").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let rows: Vec<Positional> = read_positional(bytes.as_slice(), &ReadOptions::default()).unwrap();
    assert_eq!(
        rows,
        vec![
            Positional {
                code: "X-1".to_string(),
                qty: 12,
                label: String::new(),
            },
            Positional {
                code: "X-2".to_string(),
                qty: 0,
                label: String::new(),
            },
        ]
    );

    let by_header: Vec<Positional> = read(bytes.as_slice(), &ReadOptions::default()).unwrap();
    assert_eq!(by_header, vec![Positional::default(), Positional::default()]);
}

#[derive(Debug)]
enum ScanError {
    Tabular(TabularError),
    Stop(usize),
}

impl From<TabularError> for ScanError {
    fn from(e: TabularError) -> Self {
        ScanError::Tabular(e)
    }
}

#[test]
fn for_each_row_sees_header_and_blank_rows() {
    let bytes = noisy_people_xlsx();
    let mut seen = Vec::new();
    let visited = for_each_row(
        bytes.as_slice(),
        &ReadOptions::sheet("People"),
        |cells: &[String]| -> Result<(), ScanError> {
            seen.push(cells.to_vec());
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(visited, 4);
    assert_eq!(seen[0][0], "\u{feff}Name");
    assert!(seen[2].is_empty());
    assert_eq!(seen[3], ["Jane Doe", "abc", "", "Paris", "n/a"]);
}

#[test]
fn for_each_row_stops_at_first_callback_error() {
    let bytes = noisy_people_xlsx();
    let mut calls = 0;
    let err = for_each_row(bytes.as_slice(), &ReadOptions::sheet("People"), |_: &[String]| {
        calls += 1;
        if calls == 2 {
            Err(ScanError::Stop(calls))
        } else {
            Ok(())
        }
    })
    .unwrap_err();

    assert!(matches!(err, ScanError::Stop(2)));
    assert_eq!(calls, 2);
}

#[test]
fn for_each_row_surfaces_structural_errors() {
    let bytes = noisy_people_xlsx();
    let err = for_each_row(bytes.as_slice(), &ReadOptions::sheet("Missing"), |_: &[String]| {
        Ok::<(), ScanError>(())
    })
    .unwrap_err();
    assert!(matches!(err, ScanError::Tabular(TabularError::SheetNotFound { .. })));
}

#[test]
fn sheet_names_lists_workbook_order() {
    let mut wb = Workbook::new();
    wb.add_worksheet().set_name("First").unwrap();
    wb.add_worksheet().set_name("Second").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    assert_eq!(sheet_names(bytes.as_slice()).unwrap(), ["First", "Second"]);
}
