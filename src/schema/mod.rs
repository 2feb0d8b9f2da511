//! Record schemas: which fields map to which sheet columns.
//!
//! A record type describes itself once through [`Record::schema`], normally generated by
//! [`impl_record!`](crate::impl_record). Each entry pairs a [`ColumnAnnotation`] (label and
//! optional ordinal) with accessors for one struct field; the field's Rust type fixes its
//! [`SemanticType`] and nullability through [`FieldValue`].
//!
//! ```rust
//! use sheet_records::impl_record;
//! use sheet_records::schema::Record;
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     name: String,
//!     age: i64,
//!     city: Option<String>,
//!     scratch: u32, // not mapped
//! }
//!
//! impl_record!(Person {
//!     name: "Name", 3;
//!     age: "Age", 1;
//!     city: "City", "2";
//! });
//!
//! let schema = Person::schema();
//! let order: Vec<&str> = schema.writing_order().iter().map(|f| f.label()).collect();
//! assert_eq!(order, ["Age", "City", "Name"]);
//! ```

mod macros;
mod value;

use std::collections::HashMap;
use std::fmt;

use crate::mapping::coerce;
use crate::types::{CellValue, Coerced, SemanticType};

pub use value::{FieldValue, Nested};

/// A record type that can be read from and written to a sheet.
///
/// Reading starts every row from `Self::default()`, so unmapped fields and cells that fail to
/// coerce keep their default values.
pub trait Record: Default + 'static {
    /// Describe the mapped fields of this type, in declaration order.
    fn schema() -> Schema<Self>;
}

/// Declared column metadata for one field: a display label and an optional ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAnnotation {
    label: String,
    ordinal: Option<i64>,
}

impl ColumnAnnotation {
    /// Annotate a field with a column label and no ordinal.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ordinal: None,
        }
    }

    /// Set the column ordinal.
    ///
    /// Accepts either an integer or its text form. Text that does not parse as an integer leaves
    /// the field without a valid ordinal.
    pub fn ordinal(mut self, ordinal: impl fmt::Display) -> Self {
        self.ordinal = ordinal.to_string().trim().parse::<i64>().ok();
        self
    }

    /// Declared column label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The ordinal, if one was given and parsed as an integer.
    pub fn declared_ordinal(&self) -> Option<i64> {
        self.ordinal
    }
}

type ApplyFn<T> = Box<dyn Fn(&mut T, Coerced) + Send + Sync>;
type RenderFn<T> = Box<dyn Fn(&T) -> CellValue + Send + Sync>;

/// One mapped field of record type `T`.
pub struct FieldDescriptor<T> {
    annotation: ColumnAnnotation,
    semantic_type: SemanticType,
    nullable: bool,
    apply: ApplyFn<T>,
    render: RenderFn<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Bind an annotation to a struct field through a pair of accessors.
    pub fn bind<F>(
        annotation: ColumnAnnotation,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: FieldValue + 'static,
    {
        Self {
            annotation,
            semantic_type: F::SEMANTIC_TYPE,
            nullable: F::NULLABLE,
            apply: Box::new(move |record: &mut T, outcome: Coerced| get_mut(record).apply(outcome)),
            render: Box::new(move |record: &T| get(record).to_cell()),
        }
    }
}

impl<T> FieldDescriptor<T> {
    /// Column label this field is matched and written under.
    pub fn label(&self) -> &str {
        self.annotation.label()
    }

    /// The declared ordinal, if it was present and parsed as an integer.
    pub fn ordinal(&self) -> Option<i64> {
        self.annotation.declared_ordinal()
    }

    /// Ordinal used for column placement: a missing or invalid ordinal counts as `0`.
    pub fn effective_ordinal(&self) -> i64 {
        self.ordinal().unwrap_or(0)
    }

    /// Semantic type used to coerce cell text for this field.
    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    /// Whether a failed coercion clears the field (`None`) rather than leaving its zero value.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Coerce `text` to this field's type and store the outcome on `record`.
    pub fn apply_text(&self, record: &mut T, text: &str) {
        (self.apply)(record, coerce(text, self.semantic_type));
    }

    /// Store an already-coerced outcome on `record`.
    pub fn apply(&self, record: &mut T, outcome: Coerced) {
        (self.apply)(record, outcome);
    }

    /// Current value of this field on `record`, as a cell value.
    pub fn render(&self, record: &T) -> CellValue {
        (self.render)(record)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("label", &self.label())
            .field("ordinal", &self.ordinal())
            .field("semantic_type", &self.semantic_type)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// Ordered field descriptors of a record type.
pub struct Schema<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> Schema<T> {
    /// Build a schema from descriptors in declaration order.
    ///
    /// Descriptors with an empty label are dropped: they can be neither matched nor written.
    pub fn new(fields: Vec<FieldDescriptor<T>>) -> Self {
        Self {
            fields: fields.into_iter().filter(|f| !f.label().is_empty()).collect(),
        }
    }

    /// Descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is mapped.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.label())
    }

    /// Returns the index of the first descriptor carrying `label`, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.label() == label)
    }

    /// Label -> descriptor index. When two fields share a label the first declared wins.
    pub fn label_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, f) in self.fields.iter().enumerate() {
            index.entry(f.label()).or_insert(i);
        }
        index
    }

    /// Valid ordinal -> descriptor index. Fields without a valid ordinal are left out; the first
    /// declared field wins a shared ordinal.
    pub fn ordinal_index(&self) -> HashMap<i64, usize> {
        let mut index = HashMap::with_capacity(self.fields.len());
        for (i, f) in self.fields.iter().enumerate() {
            if let Some(ordinal) = f.ordinal() {
                index.entry(ordinal).or_insert(i);
            }
        }
        index
    }

    /// Descriptors in column order: ascending effective ordinal, ties in declaration order.
    ///
    /// Fields without a valid ordinal sort as ordinal `0`, ahead of every positive ordinal.
    pub fn writing_order(&self) -> Vec<&FieldDescriptor<T>> {
        let mut ordered: Vec<&FieldDescriptor<T>> = self.fields.iter().collect();
        ordered.sort_by_key(|f| f.effective_ordinal());
        ordered
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}
