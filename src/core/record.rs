//! The record abstraction the query engine operates on

use crate::core::field::FieldValue;
use crate::core::item::Variant;
use uuid::Uuid;

/// Base trait for every collection element the engine can filter and sort.
///
/// Records are immutable inputs: the engine only ever reads them through
/// this trait. Field access is dynamic and null-safe, so a record missing a
/// field simply fails the facets that need it.
///
/// # Example
///
/// ```rust,ignore
/// impl Record for Customer {
///     fn id(&self) -> Uuid {
///         self.id
///     }
///
///     fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
///         match field {
///             "name" => Some(FieldValue::Text(&self.name)),
///             "orders" => Some(FieldValue::Integer(self.orders as i64)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Send + Sync {
    /// Get the unique, stable identifier of this record
    fn id(&self) -> Uuid;

    /// Get the value of a specific field by name, `None` when absent
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>>;

    /// The record's logical variant list
    ///
    /// Records without variants keep the default empty list.
    fn variants(&self) -> Vec<&Variant> {
        Vec::new()
    }
}
