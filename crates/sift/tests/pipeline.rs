//! End-to-end pipeline tests, including the fail-open contract: bad input
//! degrades to a no-op and never errors.

use once_cell::sync::Lazy;
use sift::{
    parse_option_lenient, Clause, Criteria, DisplayOption, HasPaging, HasSorting, Op, Operand,
    PagingDirective, SearchHandler, SearchRequest, SortColumn, Sortable, SortableFields,
    TextQuery, Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Complete,
    Cancelled,
}

impl DisplayOption for State {
    const KIND: &'static str = "state";
    const ALL: &'static [Self] = &[State::Active, State::Complete, State::Cancelled];

    fn name(self) -> &'static str {
        match self {
            State::Active => "Active",
            State::Complete => "Complete",
            State::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Member {
    name: String,
    email: String,
    state: State,
    archived: bool,
}

fn member(name: &str, state: State) -> Member {
    Member {
        name: name.to_string(),
        email: format!("{}@example.org", name.to_lowercase()),
        state,
        archived: false,
    }
}

fn state_of(m: &Member) -> Value<'_> {
    Value::Enum(m.state.discriminant())
}

fn archived_of(m: &Member) -> Value<'_> {
    Value::Bool(m.archived)
}

static MEMBER_FIELDS: Lazy<SortableFields<Member>> = Lazy::new(|| {
    SortableFields::<Member>::builder()
        .field("name", |m| Value::String(&m.name))
        .field("state", state_of)
        .build()
});

impl Sortable for Member {
    fn sortable_fields() -> &'static SortableFields<Self> {
        &MEMBER_FIELDS
    }
}

#[derive(Debug, Default)]
struct MemberParams {
    query: Option<String>,
    state: Option<String>,
    archived: Option<bool>,
    sort_by: Option<SortColumn>,
    paging: Option<PagingDirective>,
}

impl HasSorting for MemberParams {
    fn sort_by(&self) -> Option<&SortColumn> {
        self.sort_by.as_ref()
    }
}

impl HasPaging for MemberParams {
    fn paging(&self) -> Option<&PagingDirective> {
        self.paging.as_ref()
    }
}

struct MemberSearch {
    members: Vec<Member>,
}

impl SearchHandler for MemberSearch {
    type Params = MemberParams;
    type Record = Member;

    fn source(&self) -> &[Member] {
        &self.members
    }

    fn apply_text<'a>(&self, records: Vec<&'a Member>, params: &MemberParams) -> Vec<&'a Member> {
        match TextQuery::parse(params.query.as_deref()) {
            Some(query) => records
                .into_iter()
                .filter(|m| query.matches_any([m.name.as_str(), m.email.as_str()]))
                .collect(),
            None => records,
        }
    }

    fn apply_filters<'a>(
        &self,
        records: Vec<&'a Member>,
        params: &MemberParams,
    ) -> Vec<&'a Member> {
        let state = parse_option_lenient::<State>(params.state.as_deref())
            .map(|s| Clause::new("state", state_of, Op::Eq, Operand::Enum(s.discriminant())));
        let archived = params
            .archived
            .map(|a| Clause::new("archived", archived_of, Op::Eq, a));

        Criteria::new()
            .and_maybe(state)
            .and_maybe(archived)
            .apply(records)
    }
}

fn search() -> MemberSearch {
    MemberSearch {
        members: vec![
            member("Ann", State::Active),
            member("Ben", State::Complete),
            member("Cid", State::Active),
        ],
    }
}

fn names(search: &MemberSearch, params: &MemberParams) -> Vec<String> {
    search
        .handle(Some(params))
        .items
        .into_iter()
        .map(|m| m.name)
        .collect()
}

#[test]
fn filter_then_sort_descending() {
    let params = MemberParams {
        state: Some("Active".to_string()),
        sort_by: Some(SortColumn::desc("name")),
        paging: Some(PagingDirective::new(1, 10)),
        ..Default::default()
    };

    assert_eq!(names(&search(), &params), vec!["Cid", "Ann"]);
}

#[test]
fn free_text_matches_any_field_ignoring_case() {
    let by_name = MemberParams {
        query: Some("bE".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&search(), &by_name), vec!["Ben"]);

    let by_email = MemberParams {
        query: Some("@EXAMPLE".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&search(), &by_email).len(), 3);
}

#[test]
fn blank_query_passes_everything() {
    let params = MemberParams {
        query: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Ben", "Cid"]);
}

#[test]
fn unparseable_filter_value_is_ignored() {
    let params = MemberParams {
        state: Some("Paused".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Ben", "Cid"]);
}

#[test]
fn boolean_filter_applies() {
    let mut search = search();
    search.members[1].archived = true;
    let params = MemberParams {
        archived: Some(true),
        ..Default::default()
    };
    assert_eq!(names(&search, &params), vec!["Ben"]);
}

#[test]
fn unknown_sort_field_keeps_source_order() {
    let params = MemberParams {
        sort_by: Some(SortColumn::desc("email")),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Ben", "Cid"]);
}

#[test]
fn padded_sort_field_keeps_source_order() {
    let params = MemberParams {
        sort_by: Some(SortColumn::desc(" name ")),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Ben", "Cid"]);
}

#[test]
fn query_is_matched_with_its_whitespace() {
    let params = MemberParams {
        query: Some("cid@".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Cid"]);

    let padded = MemberParams {
        query: Some(" cid@".to_string()),
        ..Default::default()
    };
    assert!(names(&search(), &padded).is_empty());
}

#[test]
fn malformed_sort_direction_keeps_source_order() {
    let params = MemberParams {
        sort_by: Some(SortColumn {
            name: Some("name".to_string()),
            direction: Some("sideways".to_string()),
        }),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Ben", "Cid"]);
}

#[test]
fn enum_sort_is_stable_across_ties() {
    let params = MemberParams {
        sort_by: Some(SortColumn::asc("state")),
        ..Default::default()
    };
    assert_eq!(names(&search(), &params), vec!["Ann", "Cid", "Ben"]);
}

#[test]
fn out_of_range_page_size_uses_default() {
    let params = MemberParams {
        paging: Some(PagingDirective::new(0, 500)),
        ..Default::default()
    };
    let page = search().handle(Some(&params));
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.len(), 3);
}

#[test]
fn page_beyond_range_is_empty_not_an_error() {
    let params = MemberParams {
        paging: Some(PagingDirective::new(7, 2)),
        ..Default::default()
    };
    let page = search().handle(Some(&params));
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 2);
    assert!(!page.has_next);
}

#[test]
fn empty_source_yields_empty_page() {
    let search = MemberSearch { members: vec![] };
    let page = search.handle(Some(&MemberParams::default()));
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_previous);
}

#[test]
fn request_without_parameters_is_empty() {
    let request: SearchRequest<MemberParams> = None.into();
    let page = request.send(&search());
    assert!(page.is_empty());
    assert_eq!(page.page, 1);
}
