//! The search pipeline.
//!
//! [`SearchHandler`] is written once and specialized per record type. A
//! handler supplies the data source and, optionally, the free-text and
//! structured-filter stages; sorting and pagination are shared:
//!
//! ```text
//! source → apply_text → apply_filters → apply_sorting → paginate
//! ```
//!
//! No stage fails. Absent or malformed input turns the stage into a no-op,
//! and every such fallback is reported as a `debug` event.
//!
//! # Example
//!
//! ```
//! use once_cell::sync::Lazy;
//! use sift::{
//!     HasPaging, HasSorting, PagingDirective, SearchHandler, SortColumn, Sortable,
//!     SortableFields, TextQuery, Value,
//! };
//!
//! #[derive(Clone)]
//! struct City {
//!     name: String,
//! }
//!
//! static CITY_FIELDS: Lazy<SortableFields<City>> = Lazy::new(|| {
//!     SortableFields::<City>::builder()
//!         .field("Name", |c| Value::String(&c.name))
//!         .build()
//! });
//!
//! impl Sortable for City {
//!     fn sortable_fields() -> &'static SortableFields<Self> {
//!         &CITY_FIELDS
//!     }
//! }
//!
//! #[derive(Default)]
//! struct CityParams {
//!     query: Option<String>,
//!     sort_by: Option<SortColumn>,
//!     paging: Option<PagingDirective>,
//! }
//!
//! impl HasSorting for CityParams {
//!     fn sort_by(&self) -> Option<&SortColumn> {
//!         self.sort_by.as_ref()
//!     }
//! }
//!
//! impl HasPaging for CityParams {
//!     fn paging(&self) -> Option<&PagingDirective> {
//!         self.paging.as_ref()
//!     }
//! }
//!
//! struct CitySearch(Vec<City>);
//!
//! impl SearchHandler for CitySearch {
//!     type Params = CityParams;
//!     type Record = City;
//!
//!     fn source(&self) -> &[City] {
//!         &self.0
//!     }
//!
//!     fn apply_text<'a>(&self, records: Vec<&'a City>, params: &CityParams) -> Vec<&'a City> {
//!         match TextQuery::parse(params.query.as_deref()) {
//!             Some(query) => records.into_iter().filter(|c| query.is_match(&c.name)).collect(),
//!             None => records,
//!         }
//!     }
//! }
//!
//! let search = CitySearch(
//!     ["Lyon", "Oslo", "Lagos"].iter().map(|n| City { name: n.to_string() }).collect(),
//! );
//! let params = CityParams {
//!     query: Some("L".into()),
//!     sort_by: Some(SortColumn::asc("Name")),
//!     ..Default::default()
//! };
//!
//! let page = search.handle(Some(&params));
//! let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["Lagos", "Lyon", "Oslo"]);
//! ```

use crate::ordering::sort_by_accessor;
use crate::paging::{paginate_with, PageLimits, Paginated};
use crate::params::{HasPaging, HasSorting};
use crate::registry::Sortable;

/// A search over one record type.
pub trait SearchHandler {
    type Params: HasSorting + HasPaging;
    type Record: Sortable + Clone;

    /// The full, unfiltered candidate set.
    fn source(&self) -> &[Self::Record];

    /// Free-text stage. Keeps everything by default.
    fn apply_text<'a>(
        &self,
        records: Vec<&'a Self::Record>,
        _params: &Self::Params,
    ) -> Vec<&'a Self::Record> {
        records
    }

    /// Structured-filter stage. Keeps everything by default.
    fn apply_filters<'a>(
        &self,
        records: Vec<&'a Self::Record>,
        _params: &Self::Params,
    ) -> Vec<&'a Self::Record> {
        records
    }

    /// Sort stage, driven by the record type's sortable-field registry.
    fn apply_sorting<'a>(
        &self,
        records: Vec<&'a Self::Record>,
        params: &Self::Params,
    ) -> Vec<&'a Self::Record> {
        sort_records(records, params)
    }

    fn page_limits(&self) -> PageLimits {
        PageLimits::default()
    }

    /// Runs the pipeline. `None` parameters yield the empty first page
    /// without touching the source.
    fn handle(&self, params: Option<&Self::Params>) -> Paginated<Self::Record> {
        let limits = self.page_limits();
        let Some(params) = params else {
            tracing::debug!("no search parameters, returning empty page");
            return Paginated::empty(&limits);
        };

        let records: Vec<&Self::Record> = self.source().iter().collect();
        let fetched = records.len();

        let records = self.apply_text(records, params);
        let after_text = records.len();

        let records = self.apply_filters(records, params);
        let after_filters = records.len();

        let records = self.apply_sorting(records, params);

        let (page, size) = match params.paging() {
            Some(paging) => (paging.page, paging.size),
            None => (1, limits.default_size as i64),
        };
        if limits.page(page) as i64 != page || limits.page_size(size) as i64 != size {
            tracing::debug!(page, size, "paging directive normalized");
        }

        let result = paginate_with(records, page, size, &limits).map(Clone::clone);
        tracing::trace!(
            fetched,
            after_text,
            after_filters,
            page = result.page,
            total_pages = result.total_pages,
            "search complete"
        );
        result
    }
}

/// Sorts by the directive in `sorting` when it names a sortable field of `T`.
/// Otherwise the order is left unchanged.
pub fn sort_records<'a, T, P>(mut records: Vec<&'a T>, sorting: &P) -> Vec<&'a T>
where
    T: Sortable,
    P: HasSorting + ?Sized,
{
    let Some(directive) = sorting.sort_directive() else {
        if sorting.sort_by().is_some() {
            tracing::debug!(sort = ?sorting.sort_by(), "ignoring malformed sort column");
        }
        return records;
    };

    match T::sortable_fields().accessor(&directive.field) {
        Some(accessor) => sort_by_accessor(&mut records, accessor, directive.direction),
        None => tracing::debug!(
            field = %directive.field,
            record = std::any::type_name::<T>(),
            "ignoring sort on unregistered field"
        ),
    }
    records
}

/// A search request bound to a parameter type.
///
/// Mirrors the request/handler split: the request carries (possibly absent)
/// parameters and is sent to any handler accepting them.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest<P> {
    parameters: Option<P>,
}

impl<P> SearchRequest<P> {
    pub fn new(parameters: P) -> Self {
        SearchRequest {
            parameters: Some(parameters),
        }
    }

    /// A request with no parameters.
    pub fn empty() -> Self {
        SearchRequest { parameters: None }
    }

    pub fn parameters(&self) -> Option<&P> {
        self.parameters.as_ref()
    }

    pub fn send<H>(&self, handler: &H) -> Paginated<H::Record>
    where
        H: SearchHandler<Params = P>,
    {
        handler.handle(self.parameters.as_ref())
    }
}

impl<P> From<Option<P>> for SearchRequest<P> {
    fn from(parameters: Option<P>) -> Self {
        SearchRequest { parameters }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use once_cell::sync::Lazy;

    use super::*;
    use crate::paging::PagingDirective;
    use crate::params::SortColumn;
    use crate::registry::SortableFields;
    use crate::value::{Number, Value};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        rank: i64,
    }

    static ITEM_FIELDS: Lazy<SortableFields<Item>> = Lazy::new(|| {
        SortableFields::<Item>::builder()
            .field("rank", |i| Value::Number(Number::I64(i.rank)))
            .build()
    });

    impl Sortable for Item {
        fn sortable_fields() -> &'static SortableFields<Self> {
            &ITEM_FIELDS
        }
    }

    #[derive(Default)]
    struct Params {
        sort: Option<SortColumn>,
        paging: Option<PagingDirective>,
    }

    impl HasSorting for Params {
        fn sort_by(&self) -> Option<&SortColumn> {
            self.sort.as_ref()
        }
    }

    impl HasPaging for Params {
        fn paging(&self) -> Option<&PagingDirective> {
            self.paging.as_ref()
        }
    }

    struct Counting {
        items: Vec<Item>,
        reads: Cell<usize>,
    }

    impl SearchHandler for Counting {
        type Params = Params;
        type Record = Item;

        fn source(&self) -> &[Item] {
            self.reads.set(self.reads.get() + 1);
            &self.items
        }
    }

    fn handler() -> Counting {
        Counting {
            items: vec![
                Item { name: "a", rank: 3 },
                Item { name: "b", rank: 1 },
                Item { name: "c", rank: 2 },
            ],
            reads: Cell::new(0),
        }
    }

    fn names(page: &Paginated<Item>) -> Vec<&'static str> {
        page.items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn absent_parameters_short_circuit() {
        let handler = handler();
        let page = handler.handle(None);
        assert!(page.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 0);
        assert_eq!(handler.reads.get(), 0);
    }

    #[test]
    fn default_paging_when_absent() {
        let page = handler().handle(Some(&Params::default()));
        assert_eq!(names(&page), vec!["a", "b", "c"]);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn sorts_registered_field() {
        let params = Params {
            sort: Some(SortColumn::desc("rank")),
            ..Default::default()
        };
        assert_eq!(names(&handler().handle(Some(&params))), vec!["a", "c", "b"]);
    }

    #[test]
    fn unregistered_sort_field_keeps_order() {
        let params = Params {
            sort: Some(SortColumn::asc("name")),
            ..Default::default()
        };
        assert_eq!(names(&handler().handle(Some(&params))), vec!["a", "b", "c"]);
    }

    #[test]
    fn paging_is_applied_after_sort() {
        let params = Params {
            sort: Some(SortColumn::asc("rank")),
            paging: Some(PagingDirective::new(2, 2)),
        };
        let page = handler().handle(Some(&params));
        assert_eq!(names(&page), vec!["a"]);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn request_dispatches_to_handler() {
        let handler = handler();
        let request = SearchRequest::new(Params {
            paging: Some(PagingDirective::new(1, 1)),
            ..Default::default()
        });
        assert_eq!(names(&request.send(&handler)), vec!["a"]);

        let empty: SearchRequest<Params> = SearchRequest::empty();
        assert!(empty.send(&handler).is_empty());
        assert!(empty.parameters().is_none());
    }
}
