//! People search: free text over names and email, filters on state and the
//! archived flag.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sift::{
    parse_option_lenient, Clause, Criteria, DisplayOption, HasPaging, HasSorting, Op, Operand,
    PageLimits, PagingDirective, SearchHandler, SortColumn, Sortable, SortableFields, TextQuery,
    Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserState {
    Active,
    Complete,
    Cancelled,
}

impl DisplayOption for UserState {
    const KIND: &'static str = "user state";
    const ALL: &'static [Self] = &[UserState::Active, UserState::Complete, UserState::Cancelled];

    fn name(self) -> &'static str {
        match self {
            UserState::Active => "Active",
            UserState::Complete => "Complete",
            UserState::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub given_name: String,
    pub family_name: String,
    pub email_address: String,
    pub is_archived: bool,
    pub state: UserState,
}

impl Person {
    fn given_name(&self) -> Value<'_> {
        Value::String(&self.given_name)
    }

    fn family_name(&self) -> Value<'_> {
        Value::String(&self.family_name)
    }

    fn email_address(&self) -> Value<'_> {
        Value::String(&self.email_address)
    }

    fn state(&self) -> Value<'_> {
        Value::Enum(self.state.discriminant())
    }

    fn is_archived(&self) -> Value<'_> {
        Value::Bool(self.is_archived)
    }
}

static PERSON_FIELDS: Lazy<SortableFields<Person>> = Lazy::new(|| {
    SortableFields::<Person>::builder()
        .field("GivenName", Person::given_name)
        .field("FamilyName", Person::family_name)
        .field("EmailAddress", Person::email_address)
        .field("State", Person::state)
        .field("IsArchived", Person::is_archived)
        .build()
});

impl Sortable for Person {
    fn sortable_fields() -> &'static SortableFields<Self> {
        &PERSON_FIELDS
    }
}

/// Parameters of a people search.
///
/// `state` selects a single state; `states` selects any of several. Both
/// may be given, in which case a person must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleParams {
    pub query: Option<String>,
    pub state: Option<String>,
    pub states: Vec<String>,
    pub is_archived: Option<bool>,
    pub sort_by: Option<SortColumn>,
    pub paging: Option<PagingDirective>,
}

impl HasSorting for PeopleParams {
    fn sort_by(&self) -> Option<&SortColumn> {
        self.sort_by.as_ref()
    }
}

impl HasPaging for PeopleParams {
    fn paging(&self) -> Option<&PagingDirective> {
        self.paging.as_ref()
    }
}

impl PeopleParams {
    fn criteria(&self) -> Criteria<Person> {
        let state = parse_option_lenient::<UserState>(self.state.as_deref()).map(|state| {
            Clause::new(
                "state",
                Person::state,
                Op::Eq,
                Operand::Enum(state.discriminant()),
            )
        });

        let selected: Vec<u32> = self
            .states
            .iter()
            .filter_map(|s| parse_option_lenient::<UserState>(Some(s.as_str())))
            .map(UserState::discriminant)
            .collect();
        let states = (!selected.is_empty())
            .then(|| Clause::new("states", Person::state, Op::In, selected));

        let archived = self
            .is_archived
            .map(|archived| Clause::new("is_archived", Person::is_archived, Op::Eq, archived));

        Criteria::new()
            .and_maybe(state)
            .and_maybe(states)
            .and_maybe(archived)
    }
}

/// Search over a shared set of people.
#[derive(Debug, Clone)]
pub struct PeopleSearch {
    people: Arc<[Person]>,
    limits: PageLimits,
}

impl PeopleSearch {
    pub fn new(people: impl Into<Arc<[Person]>>) -> Self {
        PeopleSearch {
            people: people.into(),
            limits: PageLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl SearchHandler for PeopleSearch {
    type Params = PeopleParams;
    type Record = Person;

    fn source(&self) -> &[Person] {
        &self.people
    }

    fn apply_text<'a>(&self, records: Vec<&'a Person>, params: &PeopleParams) -> Vec<&'a Person> {
        let Some(query) = TextQuery::parse(params.query.as_deref()) else {
            return records;
        };
        records
            .into_iter()
            .filter(|p| {
                query.matches_any([
                    p.given_name.as_str(),
                    p.family_name.as_str(),
                    p.email_address.as_str(),
                ])
            })
            .collect()
    }

    fn apply_filters<'a>(
        &self,
        records: Vec<&'a Person>,
        params: &PeopleParams,
    ) -> Vec<&'a Person> {
        let criteria = params.criteria();
        if !criteria.is_empty() {
            tracing::debug!(filters = %criteria.describe(), "filtering people");
        }
        criteria.apply(records)
    }

    fn page_limits(&self) -> PageLimits {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(given: &str, family: &str, state: UserState, archived: bool) -> Person {
        Person {
            given_name: given.to_string(),
            family_name: family.to_string(),
            email_address: format!(
                "{}.{}@example.com",
                given.to_lowercase(),
                family.to_lowercase()
            ),
            is_archived: archived,
            state,
        }
    }

    fn search() -> PeopleSearch {
        PeopleSearch::new(vec![
            person("Ann", "Lee", UserState::Active, false),
            person("Ben", "Okafor", UserState::Complete, true),
            person("Cid", "Lehmann", UserState::Cancelled, false),
            person("Dana", "Price", UserState::Active, true),
        ])
    }

    fn given_names(params: PeopleParams) -> Vec<String> {
        search()
            .handle(Some(&params))
            .items
            .into_iter()
            .map(|p| p.given_name)
            .collect()
    }

    #[test]
    fn registers_every_field() {
        let names: Vec<_> = Person::sortable_fields().names().collect();
        assert_eq!(
            names,
            ["GivenName", "FamilyName", "EmailAddress", "State", "IsArchived"]
        );
    }

    #[test]
    fn query_matches_family_name() {
        let params = PeopleParams {
            query: Some("LEH".to_string()),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Cid"]);

        let common = PeopleParams {
            query: Some("LE".to_string()),
            ..Default::default()
        };
        assert_eq!(given_names(common).len(), 4);
    }

    #[test]
    fn query_matches_email() {
        let params = PeopleParams {
            query: Some("okafor@".to_string()),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Ben"]);
    }

    #[test]
    fn state_filter_ignores_case() {
        let params = PeopleParams {
            state: Some("active".to_string()),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Ann", "Dana"]);
    }

    #[test]
    fn states_filter_selects_any() {
        let params = PeopleParams {
            states: vec!["Complete".into(), "Bogus".into(), "Cancelled".into()],
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Ben", "Cid"]);
    }

    #[test]
    fn unparseable_states_are_a_no_op() {
        let params = PeopleParams {
            states: vec!["Bogus".into()],
            ..Default::default()
        };
        assert_eq!(given_names(params).len(), 4);
    }

    #[test]
    fn filters_combine() {
        let params = PeopleParams {
            state: Some("Active".to_string()),
            is_archived: Some(true),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Dana"]);
    }

    #[test]
    fn sorts_by_family_name_descending() {
        let params = PeopleParams {
            sort_by: Some(SortColumn::desc("FamilyName")),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Dana", "Ben", "Cid", "Ann"]);
    }

    #[test]
    fn sorts_booleans_false_first() {
        let params = PeopleParams {
            sort_by: Some(SortColumn::asc("IsArchived")),
            ..Default::default()
        };
        assert_eq!(given_names(params), ["Ann", "Cid", "Ben", "Dana"]);
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "query": "a",
            "sort_by": {"name": "State", "direction": "desc"},
            "paging": {"page": 2}
        }"#;
        let params: PeopleParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.query.as_deref(), Some("a"));
        assert_eq!(params.paging, Some(PagingDirective::new(2, 10)));
        assert!(params.has_sort());
    }
}
