#![cfg(feature = "http")]

use std::collections::HashMap;
use std::io::{self, Read};

use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue};

use sheet_records::impl_record;
use sheet_records::mapping::{read, write, ReadOptions};
use sheet_records::web::{
    into_response, read_upload, send_stream, ResponseSink, UploadedFile, XLSX_CONTENT_TYPE,
};
use sheet_records::{TabularError, Workbook};

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    name: String,
    age: i64,
}

impl_record!(Person {
    name: "Name", 1;
    age: "Age", 2;
});

fn people() -> Vec<Person> {
    vec![
        Person {
            name: "Ada".to_string(),
            age: 36,
        },
        Person {
            name: "Linus".to_string(),
            age: 54,
        },
    ]
}

/// Sink that drains the body as soon as it is handed over.
#[derive(Default)]
struct BufferedSink {
    headers: HashMap<HeaderName, HeaderValue>,
    body: Vec<u8>,
}

impl ResponseSink for BufferedSink {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn send_stream(&mut self, mut body: Box<dyn Read + Send>) -> io::Result<()> {
        body.read_to_end(&mut self.body)?;
        Ok(())
    }
}

/// Sink that keeps the body for a later read.
#[derive(Default)]
struct DeferredSink {
    body: Option<Box<dyn Read + Send>>,
}

impl ResponseSink for DeferredSink {
    fn set_header(&mut self, _name: HeaderName, _value: HeaderValue) {}

    fn send_stream(&mut self, body: Box<dyn Read + Send>) -> io::Result<()> {
        self.body = Some(body);
        Ok(())
    }
}

#[test]
fn into_response_carries_download_headers() {
    let wb = write(&people(), "People").unwrap();
    let response = into_response(&wb, "people.xlsx").unwrap();

    assert_eq!(response.headers()[CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=people.xlsx"
    );

    let back: Vec<Person> = read(response.body().as_slice(), &ReadOptions::sheet("People")).unwrap();
    assert_eq!(back, people());
}

#[test]
fn into_response_rejects_unrepresentable_filename() {
    let wb = write(&people(), "People").unwrap();
    let err = into_response(&wb, "bad\nname.xlsx").unwrap_err();
    assert!(matches!(err, TabularError::Http(_)));
}

#[test]
fn send_stream_delivers_a_readable_workbook() {
    let mut sink = BufferedSink::default();
    send_stream(&mut sink, write(&people(), "People").unwrap(), "people.xlsx").unwrap();

    assert_eq!(sink.headers[&CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        sink.headers[&CONTENT_DISPOSITION],
        "attachment; filename=people.xlsx"
    );
    let back: Vec<Person> = read(sink.body.as_slice(), &ReadOptions::sheet("People")).unwrap();
    assert_eq!(back, people());
}

#[test]
fn send_stream_body_can_be_read_later() {
    let mut sink = DeferredSink::default();
    send_stream(&mut sink, write(&people(), "People").unwrap(), "people.xlsx").unwrap();

    let mut body = sink.body.take().unwrap();
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes).unwrap();
    let back: Vec<Person> = read(bytes.as_slice(), &ReadOptions::sheet("People")).unwrap();
    assert_eq!(back.len(), 2);
}

#[test]
fn serialization_failure_reaches_the_sink() {
    let mut wb = Workbook::new();
    wb.new_sheet("bad/name");

    let mut sink = BufferedSink::default();
    let err = send_stream(&mut sink, wb, "broken.xlsx").unwrap_err();
    match err {
        TabularError::Io(e) => assert!(e.to_string().contains("xlsx error"), "{e}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn send_stream_rejects_unrepresentable_filename() {
    let mut sink = BufferedSink::default();
    let wb = write(&people(), "People").unwrap();
    let err = send_stream(&mut sink, wb, "bad\nname.xlsx").unwrap_err();
    assert!(matches!(err, TabularError::Http(_)));
    assert!(sink.headers.is_empty());
}

#[test]
fn read_upload_maps_the_named_part() {
    let bytes = write(&people(), "Sheet1").unwrap().to_bytes().unwrap();
    let form = vec![
        UploadedFile::new("avatar", vec![0xff]),
        UploadedFile::new("file", bytes)
            .with_file_name("people.xlsx")
            .with_content_type(XLSX_CONTENT_TYPE),
    ];

    let rows: Vec<Person> = read_upload(&form, "file", &ReadOptions::default()).unwrap();
    assert_eq!(rows, people());

    let err = read_upload::<Person, _>(&form, "missing", &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, TabularError::MissingUpload { .. }));
}
