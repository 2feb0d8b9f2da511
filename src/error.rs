use thiserror::Error;

/// Convenience result type for mapping operations.
pub type TabularResult<T> = Result<T, TabularError>;

/// Error type returned by the reader, the writer and the workbook collaborators.
///
/// Only structural failures are errors. A cell whose text cannot be coerced into its field's
/// type is not reported here: the field keeps its default (or becomes `None` when nullable) and
/// the read continues.
#[derive(Debug, Error)]
pub enum TabularError {
    /// Underlying I/O error while reading a source or writing a sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source bytes are not a workbook the reader understands.
    #[error("cannot open workbook: {0}")]
    Open(#[source] calamine::Error),

    /// The requested sheet does not exist in the workbook.
    #[error("sheet '{sheet}' not found. sheets={available:?}")]
    SheetNotFound { sheet: String, available: Vec<String> },

    /// The writer was given zero records, so there is nothing to lay out.
    #[error("no records to write")]
    EmptyInput,

    /// The sheet exists but its rows could not be loaded.
    #[error("failed to read rows of sheet '{sheet}': {source}")]
    RowIterator {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// A row callback returned an error and stopped a scan. Only reported to observers: the
    /// caller gets the callback's own error back.
    #[error("scan stopped by the row callback after {rows} rows")]
    ScanAborted { rows: usize },

    /// A cell reference is not of the form `<ColumnLetters><Row>` within sheet bounds.
    #[error("invalid cell reference '{reference}'")]
    InvalidCellReference { reference: String },

    /// Serializing the in-memory workbook failed.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "http")]
    /// An HTTP response could not be assembled (e.g. a filename that is not a valid header value).
    #[error("http error: {0}")]
    Http(#[from] http::Error),

    /// No uploaded file was found under the requested multipart field.
    #[error("no uploaded file for form field '{field}'")]
    MissingUpload { field: String },
}
