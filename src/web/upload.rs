//! Multipart upload extraction.

use std::collections::HashMap;
use std::io::Cursor;

use crate::error::{TabularError, TabularResult};
use crate::mapping::{read, ReadOptions};
use crate::schema::Record;

/// One file part of a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    /// Form field the file was submitted under.
    pub field: String,
    /// File name sent by the client, if any.
    pub file_name: Option<String>,
    /// Content type sent by the client, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload of `bytes` under form field `field`.
    pub fn new(field: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            bytes,
            ..Default::default()
        }
    }

    /// Set the client-supplied file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the client-supplied content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reader over the uploaded bytes, usable as a read source.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }
}

/// Decoded multipart form data that can hand out uploaded files by field name.
///
/// Web frameworks decode multipart bodies themselves; implement this for whatever they produce.
pub trait MultipartForm {
    /// The file submitted under `field`, if any.
    fn file(&self, field: &str) -> Option<&UploadedFile>;
}

impl MultipartForm for [UploadedFile] {
    fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.iter().find(|f| f.field == field)
    }
}

impl MultipartForm for Vec<UploadedFile> {
    fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.as_slice().file(field)
    }
}

impl MultipartForm for HashMap<String, UploadedFile> {
    fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.get(field)
    }
}

/// A request whose body is already-decoded form data.
impl<B: MultipartForm> MultipartForm for http::Request<B> {
    fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.body().file(field)
    }
}

/// The uploaded file under `field`, or [`TabularError::MissingUpload`].
pub fn request_file<'a, F>(form: &'a F, field: &str) -> TabularResult<&'a UploadedFile>
where
    F: MultipartForm + ?Sized,
{
    form.file(field).ok_or_else(|| TabularError::MissingUpload {
        field: field.to_string(),
    })
}

/// Read records from the workbook uploaded under `field`.
pub fn read_upload<T, F>(form: &F, field: &str, options: &ReadOptions) -> TabularResult<Vec<T>>
where
    T: Record,
    F: MultipartForm + ?Sized,
{
    let upload = request_file(form, field)?;
    read(upload.reader(), options)
}
