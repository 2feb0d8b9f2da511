//! Workbook collaborators.
//!
//! [`SourceWorkbook`] opens existing workbooks and yields row text; [`Workbook`] buffers cells
//! and serializes xlsx. The mapping layer only talks to these two types and to the `A1`
//! reference helpers in [`cell_ref`].

pub mod cell_ref;
mod source;
mod workbook;

pub use cell_ref::{cell_ref, column_name, column_number, parse_cell_ref};
pub use source::{Rows, SourceWorkbook};
pub use workbook::{Sheet, Workbook};
