//! HTTP-adjacent helpers (feature `http`).
//!
//! - [`into_response`]: buffer a workbook into an `http::Response` download
//! - [`send_stream`]: stream a workbook into any [`ResponseSink`] through an in-memory [`pipe`]
//! - [`request_file`] / [`read_upload`]: pull an uploaded workbook out of decoded multipart data

mod pipe;
mod upload;

use std::io::{self, Read};
use std::thread;

use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Response};

use crate::error::TabularResult;
use crate::sheet::Workbook;

pub use pipe::{pipe, PipeReader, PipeWriter};
pub use upload::{read_upload, request_file, MultipartForm, UploadedFile};

/// MIME type of an xlsx workbook.
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Chunks buffered between the serializing thread and the response body.
const STREAM_PIPE_CAPACITY: usize = 8;

/// `Content-Disposition` value that prompts a download named `filename`.
pub fn content_disposition(filename: &str) -> String {
    format!("attachment; filename={filename}")
}

/// Serialize `workbook` into a download response with the xlsx content type.
///
/// Fails with [`crate::TabularError::Http`] if `filename` cannot be carried in a header.
pub fn into_response(workbook: &Workbook, filename: &str) -> TabularResult<Response<Vec<u8>>> {
    let body = workbook.to_bytes()?;
    let response = Response::builder()
        .header(CONTENT_TYPE, XLSX_CONTENT_TYPE)
        .header(CONTENT_DISPOSITION, content_disposition(filename))
        .body(body)?;
    Ok(response)
}

/// A response under construction that can take headers and a streamed body.
pub trait ResponseSink {
    /// Set (or replace) one response header.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Hand over the body. The sink may read it now or keep it and read it later.
    fn send_stream(&mut self, body: Box<dyn Read + Send>) -> io::Result<()>;
}

/// Stream `workbook` into `sink` as a download named `filename`.
///
/// A producer thread serializes the workbook into one end of a [`pipe`] while the sink reads
/// the other. If serialization fails, the pipe is closed with that error, so the sink's read
/// fails instead of ending in a silently truncated body.
pub fn send_stream<S>(sink: &mut S, workbook: Workbook, filename: &str) -> TabularResult<()>
where
    S: ResponseSink + ?Sized,
{
    let disposition =
        HeaderValue::from_str(&content_disposition(filename)).map_err(http::Error::from)?;
    sink.set_header(CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE));
    sink.set_header(CONTENT_DISPOSITION, disposition);

    let (writer, reader) = pipe(STREAM_PIPE_CAPACITY);
    thread::Builder::new()
        .name("xlsx-stream".to_string())
        .spawn(move || produce(&workbook, writer))?;

    sink.send_stream(Box::new(reader))?;
    Ok(())
}

fn produce(workbook: &Workbook, mut writer: PipeWriter) {
    match workbook.write_to(&mut writer) {
        Ok(()) => writer.close(),
        Err(err) => writer.close_with_error(io::Error::other(err.to_string())),
    }
}
