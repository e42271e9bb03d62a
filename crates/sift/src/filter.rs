//! Filter predicates for the free-text and structured-filter stages.
//!
//! A [`Clause`] pairs a field accessor with an [`Op`] and an [`Operand`].
//! [`Criteria`] combines clauses with fixed logic:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//! ```
//!
//! [`TextQuery`] is the case-insensitive substring matcher behind free-text
//! search.

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};

use crate::registry::Accessor;
use crate::value::{Number, Value};

/// Comparison operator for a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal. Strings compare case-sensitively.
    Eq,
    /// Not equal.
    Ne,
    /// Case-insensitive substring match. Strings only.
    Contains,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Enum membership.
    In,
}

impl Op {
    /// Evaluates an ordering-based operator.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::Contains | Op::In => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Contains => "contains",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owned comparison value stored in a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    String(String),
    Number(Number),
    Enum(u32),
    /// Set of enum discriminants (for `In`).
    EnumSet(Vec<u32>),
    Bool(bool),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::String(s) => write!(f, "'{s}'"),
            Operand::Number(Number::I64(n)) => write!(f, "{n}"),
            Operand::Number(Number::U64(n)) => write!(f, "{n}"),
            Operand::Number(Number::F64(n)) => write!(f, "{n}"),
            Operand::Enum(d) => write!(f, "#{d}"),
            Operand::EnumSet(set) => {
                let items: Vec<String> = set.iter().map(|d| format!("#{d}")).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Operand::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(n.into())
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(n.into())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Vec<u32>> for Operand {
    fn from(set: Vec<u32>) -> Self {
        Operand::EnumSet(set)
    }
}

/// A single predicate over one field of `T`.
pub struct Clause<T> {
    field: &'static str,
    accessor: Accessor<T>,
    op: Op,
    operand: Operand,
}

impl<T> Clause<T> {
    /// Creates a clause. `field` is only used to describe the clause.
    pub fn new(
        field: &'static str,
        accessor: Accessor<T>,
        op: Op,
        operand: impl Into<Operand>,
    ) -> Self {
        Clause {
            field,
            accessor,
            op,
            operand: operand.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluates this clause against a record.
    pub fn matches(&self, item: &T) -> bool {
        self.test(&(self.accessor)(item))
    }

    /// Evaluates this clause against an already extracted value.
    ///
    /// Type mismatches and missing values never match.
    pub fn test(&self, value: &Value<'_>) -> bool {
        match (&self.operand, value) {
            (Operand::String(pattern), Value::String(s)) => match self.op {
                Op::Contains => contains_ignore_case(s, pattern),
                op => op.eval_ordering((*s).cmp(pattern.as_str())),
            },
            (Operand::Number(clause), Value::Number(field)) => field
                .compare(*clause)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            (Operand::Enum(clause), Value::Enum(field)) => match self.op {
                Op::Eq => field == clause,
                Op::Ne => field != clause,
                _ => false,
            },
            (Operand::EnumSet(set), Value::Enum(field)) => {
                self.op == Op::In && set.contains(field)
            }
            (Operand::Bool(clause), Value::Bool(field)) => match self.op {
                Op::Eq => field == clause,
                Op::Ne => field != clause,
                _ => false,
            },
            _ => false,
        }
    }
}

impl<T> std::fmt::Debug for Clause<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clause")
            .field("field", &self.field)
            .field("op", &self.op)
            .field("operand", &self.operand)
            .finish()
    }
}

impl<T> std::fmt::Display for Clause<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.operand)
    }
}

/// AND/OR group of clauses.
///
/// An empty group matches everything.
pub struct Criteria<T> {
    all: Vec<Clause<T>>,
    any: Vec<Clause<T>>,
}

impl<T> Default for Criteria<T> {
    fn default() -> Self {
        Criteria {
            all: Vec::new(),
            any: Vec::new(),
        }
    }
}

impl<T> Criteria<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause every match must satisfy.
    pub fn and(mut self, clause: Clause<T>) -> Self {
        self.all.push(clause);
        self
    }

    /// Adds a clause of which at least one must be satisfied.
    pub fn or(mut self, clause: Clause<T>) -> Self {
        self.any.push(clause);
        self
    }

    /// Adds an AND clause only when `clause` is `Some`.
    pub fn and_maybe(self, clause: Option<Clause<T>>) -> Self {
        match clause {
            Some(clause) => self.and(clause),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }

    pub fn matches(&self, item: &T) -> bool {
        self.all.iter().all(|clause| clause.matches(item))
            && (self.any.is_empty() || self.any.iter().any(|clause| clause.matches(item)))
    }

    /// Keeps the records that match, preserving their order.
    pub fn apply<'a>(&self, records: Vec<&'a T>) -> Vec<&'a T> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|item| self.matches(item))
            .collect()
    }

    /// Human-readable summary, e.g. `state eq #0, archived eq false`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self.all.iter().map(ToString::to_string).collect();
        if !self.any.is_empty() {
            let any: Vec<String> = self.any.iter().map(ToString::to_string).collect();
            parts.push(format!("({})", any.join(" or ")));
        }
        parts.join(", ")
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive substring matcher for free-text search.
#[derive(Debug, Clone)]
pub struct TextQuery {
    text: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    Lowercase(String),
}

impl TextQuery {
    /// Builds a matcher from a raw query.
    ///
    /// Returns `None` for absent, empty or whitespace-only input, which means
    /// "no text filtering". Any other input is matched as given, surrounding
    /// whitespace included.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let text = raw?;
        if text.trim().is_empty() {
            return None;
        }

        let matcher = match RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Matcher::Pattern(pattern),
            Err(err) => {
                tracing::debug!(%err, "text query too large for a pattern, using lowercase scan");
                Matcher::Lowercase(text.to_lowercase())
            }
        };

        Some(TextQuery {
            text: text.to_string(),
            matcher,
        })
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_match(&self, field: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(pattern) => pattern.is_match(field),
            Matcher::Lowercase(needle) => field.to_lowercase().contains(needle.as_str()),
        }
    }

    /// True if any of `fields` contains the query.
    pub fn matches_any<'s>(&self, fields: impl IntoIterator<Item = &'s str>) -> bool {
        fields.into_iter().any(|field| self.is_match(field))
    }
}
