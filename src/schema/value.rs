use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::types::{CellValue, Coerced, SemanticType};

/// A Rust type that can sit behind a mapped column.
///
/// The implementing type fixes the field's [`SemanticType`] and whether it is nullable.
/// `Option<T>` is the nullable form of every supported `T`.
pub trait FieldValue: Sized {
    /// Semantic type used to coerce cell text for this field.
    const SEMANTIC_TYPE: SemanticType;

    /// Whether absence is represented as a true null (`None`).
    const NULLABLE: bool = false;

    /// Convert a coerced value into `Self`, or `None` if it does not fit (wrong tag or out of
    /// range for a narrower integer type).
    fn from_coerced(value: CellValue) -> Option<Self>;

    /// Current value as a cell value for writing.
    fn to_cell(&self) -> CellValue;

    /// Store a coercion outcome on this field.
    ///
    /// Non-nullable fields keep their current value when the outcome is absent. Since every row
    /// starts from `Default`, that is the zero value.
    fn apply(&mut self, outcome: Coerced) {
        if let Coerced::Value(value) = outcome {
            if let Some(value) = Self::from_coerced(value) {
                *self = value;
            }
        }
    }
}

/// Nullable field: `None` is written as an empty cell and read back from one.
///
/// An empty cell carries no value, so `Some("")` on an `Option<String>` is written as an empty
/// cell too and reads back as `None`.
impl<T: FieldValue> FieldValue for Option<T> {
    const SEMANTIC_TYPE: SemanticType = T::SEMANTIC_TYPE;
    const NULLABLE: bool = true;

    fn from_coerced(value: CellValue) -> Option<Self> {
        T::from_coerced(value).map(Some)
    }

    fn to_cell(&self) -> CellValue {
        match self {
            Some(v) => v.to_cell(),
            None => CellValue::Empty,
        }
    }

    /// Absent (or out-of-range) outcomes clear the field, so a failed parse never leaves a
    /// stale value behind.
    fn apply(&mut self, outcome: Coerced) {
        *self = match outcome {
            Coerced::Value(value) => T::from_coerced(value),
            Coerced::Absent => None,
        };
    }
}

impl FieldValue for String {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Text;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::Text(self.clone())
    }
}

macro_rules! signed_field_value {
    ($($t:ty),* $(,)?) => {$(
        impl FieldValue for $t {
            const SEMANTIC_TYPE: SemanticType = SemanticType::SignedInteger;

            fn from_coerced(value: CellValue) -> Option<Self> {
                match value {
                    CellValue::Int(v) => <$t>::try_from(v).ok(),
                    _ => None,
                }
            }

            fn to_cell(&self) -> CellValue {
                CellValue::Int(*self as i64)
            }
        }
    )*};
}

macro_rules! unsigned_field_value {
    ($($t:ty),* $(,)?) => {$(
        impl FieldValue for $t {
            const SEMANTIC_TYPE: SemanticType = SemanticType::UnsignedInteger;

            fn from_coerced(value: CellValue) -> Option<Self> {
                match value {
                    CellValue::UInt(v) => <$t>::try_from(v).ok(),
                    _ => None,
                }
            }

            fn to_cell(&self) -> CellValue {
                CellValue::UInt(*self as u64)
            }
        }
    )*};
}

signed_field_value!(i8, i16, i32, i64, isize);
unsigned_field_value!(u8, u16, u32, u64, usize);

impl FieldValue for f64 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Float;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::Float(*self)
    }
}

impl FieldValue for f32 {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Float;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Float(v) => Some(v as f32),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::Float(f64::from(*self))
    }
}

impl FieldValue for bool {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Boolean;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::Bool(*self)
    }
}

impl FieldValue for NaiveDateTime {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Timestamp;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::DateTime(*self)
    }
}

/// A structured field value carried through its text form.
///
/// Reading parses the raw cell text with `T::from_str`; writing stores `T`'s `Display` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nested<T>(pub T);

impl<T> FieldValue for Nested<T>
where
    T: FromStr + fmt::Display,
{
    const SEMANTIC_TYPE: SemanticType = SemanticType::NestedText;

    fn from_coerced(value: CellValue) -> Option<Self> {
        match value {
            CellValue::Text(s) => s.parse::<T>().ok().map(Nested),
            _ => None,
        }
    }

    fn to_cell(&self) -> CellValue {
        CellValue::Text(self.0.to_string())
    }
}
