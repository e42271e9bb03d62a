//! Location search: free text over the name, a population bucket filter.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sift::{
    parse_option_lenient, Clause, Criteria, DisplayOption, HasPaging, HasSorting, Op, PageLimits,
    PagingDirective, SearchHandler, SortColumn, Sortable, SortableFields, TextQuery, Value,
};

/// Population ranges offered by the filter. Buckets overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationBucket {
    LessThan100K,
    LessThan500K,
    MoreThan500K,
    MoreThan1M,
}

impl DisplayOption for PopulationBucket {
    const KIND: &'static str = "population bucket";
    const ALL: &'static [Self] = &[
        PopulationBucket::LessThan100K,
        PopulationBucket::LessThan500K,
        PopulationBucket::MoreThan500K,
        PopulationBucket::MoreThan1M,
    ];

    fn name(self) -> &'static str {
        match self {
            PopulationBucket::LessThan100K => "LessThan100K",
            PopulationBucket::LessThan500K => "LessThan500K",
            PopulationBucket::MoreThan500K => "MoreThan500K",
            PopulationBucket::MoreThan1M => "MoreThan1M",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PopulationBucket::LessThan100K => "Up to 100K",
            PopulationBucket::LessThan500K => "Up to 500K",
            PopulationBucket::MoreThan500K => "500K+",
            PopulationBucket::MoreThan1M => "1m+",
        }
    }
}

impl PopulationBucket {
    /// The comparison a population must pass to fall in this bucket.
    pub fn bound(self) -> (Op, i64) {
        match self {
            PopulationBucket::LessThan100K => (Op::Lt, 100_000),
            PopulationBucket::LessThan500K => (Op::Lt, 500_000),
            PopulationBucket::MoreThan500K => (Op::Gte, 500_000),
            PopulationBucket::MoreThan1M => (Op::Gte, 1_000_000),
        }
    }

    /// Whether `population` falls in this bucket. Unknown populations never do.
    pub fn contains(self, population: Option<i32>) -> bool {
        let (op, threshold) = self.bound();
        population.is_some_and(|p| op.eval_ordering(i64::from(p).cmp(&threshold)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub population: Option<i32>,
}

fn name_of(l: &Location) -> Value<'_> {
    Value::String(&l.name)
}

fn country_of(l: &Location) -> Value<'_> {
    Value::String(&l.country)
}

fn population_of(l: &Location) -> Value<'_> {
    l.population.map_or(Value::None, Value::from)
}

static LOCATION_FIELDS: Lazy<SortableFields<Location>> = Lazy::new(|| {
    SortableFields::<Location>::builder()
        .field("Name", name_of)
        .field("Country", country_of)
        .field("Population", population_of)
        .build()
});

impl Sortable for Location {
    fn sortable_fields() -> &'static SortableFields<Self> {
        &LOCATION_FIELDS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationParams {
    pub query: Option<String>,
    /// Bucket variant name, e.g. `MoreThan1M`.
    pub population: Option<String>,
    pub sort_by: Option<SortColumn>,
    pub paging: Option<PagingDirective>,
}

impl HasSorting for LocationParams {
    fn sort_by(&self) -> Option<&SortColumn> {
        self.sort_by.as_ref()
    }
}

impl HasPaging for LocationParams {
    fn paging(&self) -> Option<&PagingDirective> {
        self.paging.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct LocationSearch {
    locations: Arc<[Location]>,
    limits: PageLimits,
}

impl LocationSearch {
    pub fn new(locations: impl Into<Arc<[Location]>>) -> Self {
        LocationSearch {
            locations: locations.into(),
            limits: PageLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl SearchHandler for LocationSearch {
    type Params = LocationParams;
    type Record = Location;

    fn source(&self) -> &[Location] {
        &self.locations
    }

    fn apply_text<'a>(
        &self,
        records: Vec<&'a Location>,
        params: &LocationParams,
    ) -> Vec<&'a Location> {
        match TextQuery::parse(params.query.as_deref()) {
            Some(query) => records
                .into_iter()
                .filter(|l| query.is_match(&l.name))
                .collect(),
            None => records,
        }
    }

    fn apply_filters<'a>(
        &self,
        records: Vec<&'a Location>,
        params: &LocationParams,
    ) -> Vec<&'a Location> {
        let bucket = parse_option_lenient::<PopulationBucket>(params.population.as_deref());
        let clause = bucket.map(|bucket| {
            let (op, threshold) = bucket.bound();
            Clause::new("population", population_of, op, threshold)
        });
        if let Some(clause) = &clause {
            tracing::debug!(filter = %clause, "filtering locations");
        }
        Criteria::new().and_maybe(clause).apply(records)
    }

    fn page_limits(&self) -> PageLimits {
        self.limits
    }
}
