//! Core value types shared by the reader and the writer.
//!
//! Every mapped field has a [`SemanticType`]. Reading turns cell text into a [`Coerced`] outcome
//! for that type; writing turns a field back into a [`CellValue`].

use chrono::NaiveDateTime;

/// The only text layout accepted for timestamp fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Semantic type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// UTF-8 text, assigned as-is.
    Text,
    /// Base-10 signed integer.
    SignedInteger,
    /// Base-10 unsigned integer.
    UnsignedInteger,
    /// Decimal floating point number.
    Float,
    /// `true`/`false` (also `t`/`f`/`1`/`0`), case-insensitive.
    Boolean,
    /// Date and time in [`TIMESTAMP_FORMAT`].
    Timestamp,
    /// A structured value carried through its text representation.
    NestedText,
}

/// A single value as stored in (or produced for) a sheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value. Written as an absent cell.
    #[default]
    Empty,
    /// UTF-8 string.
    Text(String),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer.
    UInt(u64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Naive date-time (no timezone).
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::UInt(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// Outcome of coercing one cell's text into a field's [`SemanticType`].
///
/// `Absent` is not an error. Whether it becomes a zero value or a true null is decided by the
/// receiving field (see [`crate::schema::FieldValue::apply`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// The text parsed; the value is tagged with the matching [`CellValue`] variant.
    Value(CellValue),
    /// The text did not parse as the requested type.
    Absent,
}

impl Coerced {
    /// Returns `true` for [`Coerced::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Coerced::Absent)
    }
}
