//! Request-side contracts shared by every search.
//!
//! Each concrete search defines its own parameter struct (query text plus
//! whatever structured filters it supports) and implements [`HasSorting`] and
//! [`HasPaging`] so the shared sort and paginate stages can read it.

use serde::{Deserialize, Serialize};

use crate::ordering::SortDirection;
use crate::paging::PagingDirective;

/// Sort column as bound from a request: both parts are free-form strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortColumn {
    pub name: Option<String>,
    pub direction: Option<String>,
}

impl SortColumn {
    pub fn new(name: impl Into<String>, direction: SortDirection) -> Self {
        SortColumn {
            name: Some(name.into()),
            direction: Some(direction.as_str().to_string()),
        }
    }

    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortDirection::Asc)
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortDirection::Desc)
    }

    /// The validated directive, if the name is non-blank and the direction
    /// parses. The name is kept as given, so only an exactly registered
    /// name will sort.
    pub fn directive(&self) -> Option<SortDirective> {
        let field = self.name.as_deref().filter(|n| !n.trim().is_empty())?;
        let direction = self.direction.as_deref()?.parse().ok()?;
        Some(SortDirective {
            field: field.to_string(),
            direction,
        })
    }
}

/// A well-formed sort request: field name and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

/// Parameters that may carry a sort column.
pub trait HasSorting {
    fn sort_by(&self) -> Option<&SortColumn>;

    /// True when a well-formed directive is present. Says nothing about
    /// whether the field is sortable.
    fn has_sort(&self) -> bool {
        self.sort_directive().is_some()
    }

    fn sort_directive(&self) -> Option<SortDirective> {
        self.sort_by().and_then(SortColumn::directive)
    }
}

/// Parameters that may carry a paging directive.
pub trait HasPaging {
    fn paging(&self) -> Option<&PagingDirective>;
}
