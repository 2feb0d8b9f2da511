/// Implement [`Record`](crate::schema::Record) for a struct by listing its mapped fields.
///
/// Each entry is `field: "Label"` or `field: "Label", ordinal;` where `ordinal` is an integer or
/// integer text. Fields that are not listed are ignored when reading and writing.
///
/// ```rust
/// use sheet_records::impl_record;
///
/// #[derive(Debug, Default)]
/// struct Invoice {
///     number: u32,
///     customer: String,
///     total: Option<f64>,
/// }
///
/// impl_record!(Invoice {
///     number: "Invoice No", 1;
///     customer: "Customer", 2;
///     total: "Total", 3;
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $( $field:ident : $label:expr $(, $ordinal:expr)? );* $(;)? }) => {
        impl $crate::schema::Record for $ty {
            fn schema() -> $crate::schema::Schema<Self> {
                $crate::schema::Schema::new(vec![
                    $(
                        $crate::schema::FieldDescriptor::bind(
                            $crate::schema::ColumnAnnotation::new($label) $( .ordinal($ordinal) )?,
                            |record: &Self| &record.$field,
                            |record: &mut Self| &mut record.$field,
                        ),
                    )*
                ])
            }
        }
    };
}
