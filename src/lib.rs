//! `sheet-records` maps spreadsheet sheets to and from collections of typed Rust records.
//!
//! A record type lists its mapped fields once, each with a column **label** and an optional
//! **ordinal** ([`impl_record!`]). From that single description:
//!
//! - the **reader** ([`mapping::read`]) matches the header row (row 1) against labels, coerces
//!   each cell's text into the field's type and yields one record per non-blank row;
//! - the **writer** ([`mapping::write`]) lays columns out by ascending ordinal, writes the labels
//!   into row 1 and one record per following row.
//!
//! ## Field types
//!
//! | Rust type | Semantic type |
//! |---|---|
//! | `String` | text |
//! | `i8`..`i64`, `isize` | signed integer |
//! | `u8`..`u64`, `usize` | unsigned integer |
//! | `f32`, `f64` | floating point |
//! | `bool` | boolean |
//! | `chrono::NaiveDateTime` | timestamp (`YYYY-MM-DD HH:MM:SS`) |
//! | [`schema::Nested<T>`] (`T: FromStr + Display`) | nested text |
//!
//! `Option<T>` makes any of these nullable. Reading is best-effort per cell: text that does not
//! coerce leaves a non-nullable field at its default and sets a nullable one to `None`. Only
//! structural problems (not a workbook, missing sheet, unreadable rows) are errors.
//!
//! ## Example: write, then read back
//!
//! ```rust
//! use sheet_records::impl_record;
//! use sheet_records::mapping::{read, write, ReadOptions};
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//!     city: String,
//! }
//!
//! impl_record!(Person {
//!     name: "Name", 3;
//!     age: "Age", 1;
//!     city: "City", 2;
//! });
//!
//! # fn main() -> Result<(), sheet_records::TabularError> {
//! let people = vec![
//!     Person { name: "John Doe".into(), age: 25, city: "New York".into() },
//!     Person { name: "Jane Doe".into(), age: 30, city: "San Francisco".into() },
//! ];
//!
//! let workbook = write(&people, "People")?;
//! let bytes = workbook.to_bytes()?;
//!
//! let back: Vec<Person> = read(bytes.as_slice(), &ReadOptions::sheet("People"))?;
//! assert_eq!(back, people);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: record descriptions ([`schema::Record`], [`schema::FieldValue`])
//! - [`mapping`]: the reader and writer, options and observer hooks
//! - [`sheet`]: workbook collaborators and `A1` cell references
//! - [`normalize`]: header text normalization
//! - [`types`]: semantic types, cell values and coercion outcomes
//! - `web` (feature `http`): download responses and multipart uploads
//! - [`error`]: the shared error type

pub mod error;
#[cfg(feature = "http")]
pub mod web;
pub mod mapping;
pub mod normalize;
pub mod schema;
pub mod sheet;
pub mod types;

pub use error::{TabularError, TabularResult};
pub use schema::{Record, Schema};
pub use sheet::Workbook;
