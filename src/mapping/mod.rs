//! The two mapping pipelines between sheets and records.
//!
//! - [`read`] / [`read_path`] / [`read_workbook`]: header-matched rows -> records
//! - [`read_positional`]: ordinal-positioned rows -> records
//! - [`for_each_row`]: raw row text to a callback
//! - [`write`] / [`write_with_options`] / [`write_sheet`]: records -> sheet
//!
//! Both directions share the record's [`crate::schema::Schema`]. Outcomes can be reported to a
//! [`MappingObserver`] configured on [`ReadOptions`] / [`WriteOptions`].

mod coerce;
mod observability;
mod options;
mod reader;
mod writer;

pub use coerce::coerce;
pub use observability::{
    severity_for_error, CompositeObserver, MappingContext, MappingObserver, MappingOperation,
    MappingSeverity, MappingStats, StdErrObserver,
};
pub use options::{ReadOptions, SheetSelection, WriteOptions, DEFAULT_SHEET};
pub use reader::{for_each_row, read, read_path, read_positional, read_workbook, sheet_names};
pub use writer::{write, write_sheet, write_with_options};
