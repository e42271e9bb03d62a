//! Sortable-field registry.
//!
//! Each record type registers, once per process, the fields that clients may
//! sort by. A registration maps a field name to a typed accessor, so sorting
//! by name never needs reflection and an unknown name is simply absent from
//! the table.
//!
//! # Example
//!
//! ```
//! use once_cell::sync::Lazy;
//! use sift::{is_sortable, sortable_fields, Sortable, SortableFields, Value};
//!
//! struct Location {
//!     name: String,
//!     country: String,
//!     population: Option<i32>,
//! }
//!
//! static LOCATION_FIELDS: Lazy<SortableFields<Location>> = Lazy::new(|| {
//!     SortableFields::<Location>::builder()
//!         .field("Name", |l| Value::String(&l.name))
//!         .field("Country", |l| Value::String(&l.country))
//!         .field("Population", |l| l.population.map(Value::from).unwrap_or(Value::None))
//!         .build()
//! });
//!
//! impl Sortable for Location {
//!     fn sortable_fields() -> &'static SortableFields<Self> {
//!         &LOCATION_FIELDS
//!     }
//! }
//!
//! assert!(is_sortable::<Location>("Population"));
//! assert!(!is_sortable::<Location>("population"));
//! assert_eq!(sortable_fields::<Location>().len(), 3);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::value::Value;

/// Typed accessor for one field of a record.
pub type Accessor<T> = for<'a> fn(&'a T) -> Value<'a>;

/// The sortable fields of one record type, in registration order.
pub struct SortableFields<T> {
    fields: Vec<(&'static str, Accessor<T>)>,
}

impl<T> SortableFields<T> {
    /// Starts a registration.
    pub fn builder() -> SortableFieldsBuilder<T> {
        SortableFieldsBuilder { fields: Vec::new() }
    }

    /// A table with no sortable fields.
    pub fn empty() -> Self {
        SortableFields { fields: Vec::new() }
    }

    /// Field names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// The set of registered field names.
    pub fn field_names(&self) -> BTreeSet<&'static str> {
        self.names().collect()
    }

    /// Whether `name` is a registered sortable field. Names match exactly.
    pub fn contains(&self, name: &str) -> bool {
        self.accessor(name).is_some()
    }

    /// The accessor registered for `name`.
    pub fn accessor(&self, name: &str) -> Option<Accessor<T>> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, accessor)| *accessor)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> Default for SortableFields<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for SortableFields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builder for [`SortableFields`].
pub struct SortableFieldsBuilder<T> {
    fields: Vec<(&'static str, Accessor<T>)>,
}

impl<T> SortableFieldsBuilder<T> {
    /// Registers a sortable field. Registering a name twice keeps the last
    /// accessor in the position of the first registration.
    pub fn field(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(entry) => entry.1 = accessor,
            None => self.fields.push((name, accessor)),
        }
        self
    }

    pub fn build(self) -> SortableFields<T> {
        SortableFields {
            fields: self.fields,
        }
    }
}

/// Record types that expose a sortable-field table.
///
/// Implementations return a process-wide table, usually a
/// `once_cell::sync::Lazy` static, so the registration runs once.
pub trait Sortable: Sized + 'static {
    fn sortable_fields() -> &'static SortableFields<Self>;
}

/// The sortable field names of `T`.
pub fn sortable_fields<T: Sortable>() -> BTreeSet<&'static str> {
    T::sortable_fields().field_names()
}

/// Whether `name` is a sortable field of `T`.
pub fn is_sortable<T: Sortable>(name: &str) -> bool {
    T::sortable_fields().contains(name)
}
