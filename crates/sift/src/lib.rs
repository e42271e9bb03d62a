//! Sift - generic search, filter, sort and pagination for in-memory records.
//!
//! Sift runs a fixed pipeline over a borrowed slice of records:
//!
//! ```text
//! source → free-text filter → structured filters → sort → paginate
//! ```
//!
//! - [`SearchHandler`] is the pipeline, written once. A concrete search
//!   supplies the source and overrides the two filter stages.
//! - [`SortableFields`] is the per-type registry of fields clients may sort
//!   by, each backed by a typed [`Accessor`].
//! - [`paginate`] slices a result into a [`Paginated`] page.
//!
//! # Failing open
//!
//! No stage returns an error. A blank query, an unknown filter value, a sort
//! on an unregistered field or an out-of-range page size all degrade to a
//! no-op or a default, and are reported as `tracing` debug events. Strict
//! parsers ([`parse_option`], `SortDirection::from_str`) are available to
//! callers who would rather reject such input.
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{paginate, sort_by_accessor, SortDirection, Value};
//!
//! let cities = vec!["Oslo", "Lagos", "Lyon"];
//! let mut refs: Vec<&&str> = cities.iter().collect();
//! sort_by_accessor(&mut refs, |c| Value::String(c), SortDirection::Asc);
//!
//! let page = paginate(refs, 1, 2);
//! assert_eq!(page.items, [&"Lagos", &"Lyon"]);
//! assert_eq!(page.total_pages, 2);
//! assert!(page.has_next);
//! ```

mod error;
mod filter;
mod links;
mod options;
mod ordering;
mod paging;
mod params;
mod pipeline;
mod registry;
mod value;

pub use error::{ParseError, Result};
pub use filter::{Clause, Criteria, Op, Operand, TextQuery};
pub use links::{is_sorted_by, page_link, sort_link, ParamKeys, QueryParams};
pub use options::{option_list, parse_option, parse_option_lenient, DisplayOption, SelectOption};
pub use ordering::{compare_values, sort_by_accessor, SortDirection};
pub use paging::{
    page_window, paginate, paginate_with, PageLimits, Paginated, PagingDirective,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use params::{HasPaging, HasSorting, SortColumn, SortDirective};
pub use pipeline::{sort_records, SearchHandler, SearchRequest};
pub use registry::{
    is_sortable, sortable_fields, Accessor, Sortable, SortableFields, SortableFieldsBuilder,
};
pub use value::{Number, Value};
