//! Cell text -> typed value coercion.

use chrono::NaiveDateTime;

use crate::types::{CellValue, Coerced, SemanticType, TIMESTAMP_FORMAT};

/// Coerce one cell's text into `semantic_type`.
///
/// Never fails: text that does not parse comes back as [`Coerced::Absent`]. Numbers are parsed
/// as written (no trimming), so `" 25"` is absent for an integer field.
pub fn coerce(text: &str, semantic_type: SemanticType) -> Coerced {
    let parsed = match semantic_type {
        SemanticType::Text | SemanticType::NestedText => Some(CellValue::Text(text.to_string())),
        SemanticType::SignedInteger => text.parse::<i64>().ok().map(CellValue::Int),
        SemanticType::UnsignedInteger => text.parse::<u64>().ok().map(CellValue::UInt),
        SemanticType::Float => text.parse::<f64>().ok().map(CellValue::Float),
        SemanticType::Boolean => parse_bool(text).map(CellValue::Bool),
        SemanticType::Timestamp => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .ok()
            .map(CellValue::DateTime),
    };

    match parsed {
        Some(value) => Coerced::Value(value),
        None => Coerced::Absent,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
