//! Enumerated filter options.
//!
//! Structured filters are usually backed by a small enum. [`DisplayOption`]
//! gives such an enum a stable variant name (what the query string carries),
//! a display label, and a discriminant for [`Value::Enum`](crate::Value).

use serde::Serialize;

use crate::error::{ParseError, Result};

/// An enum usable as a filter option.
///
/// ```
/// use sift::{parse_option, DisplayOption};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Bucket {
///     Small,
///     Large,
/// }
///
/// impl DisplayOption for Bucket {
///     const KIND: &'static str = "bucket";
///     const ALL: &'static [Self] = &[Bucket::Small, Bucket::Large];
///
///     fn name(self) -> &'static str {
///         match self {
///             Bucket::Small => "Small",
///             Bucket::Large => "Large",
///         }
///     }
///
///     fn label(self) -> &'static str {
///         match self {
///             Bucket::Small => "Up to 100K",
///             Bucket::Large => "1m+",
///         }
///     }
/// }
///
/// assert_eq!(parse_option::<Bucket>("large"), Ok(Bucket::Large));
/// assert_eq!(Bucket::Large.discriminant(), 1);
/// ```
pub trait DisplayOption: Copy + Eq + 'static {
    /// What the options are, for error messages.
    const KIND: &'static str;

    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Variant name, as carried in requests.
    fn name(self) -> &'static str;

    /// Label for display. Defaults to the variant name.
    fn label(self) -> &'static str {
        self.name()
    }

    /// Position of the variant in [`Self::ALL`].
    fn discriminant(self) -> u32 {
        Self::ALL
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0) as u32
    }
}

/// Parses a variant name, ignoring case and surrounding whitespace.
pub fn parse_option<E: DisplayOption>(value: &str) -> Result<E> {
    let wanted = value.trim();
    E::ALL
        .iter()
        .copied()
        .find(|option| option.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseError::Option {
            kind: E::KIND,
            value: value.to_string(),
        })
}

/// Lenient parse used by filter stages: blank or unknown input is `None`.
pub fn parse_option_lenient<E: DisplayOption>(value: Option<&str>) -> Option<E> {
    let value = value.filter(|v| !v.trim().is_empty())?;
    match parse_option(value) {
        Ok(option) => Some(option),
        Err(err) => {
            tracing::debug!(%err, "ignoring filter value");
            None
        }
    }
}

/// Entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub text: &'static str,
    pub value: &'static str,
    pub selected: bool,
}

/// Builds select-list entries for every variant of `E`, marking the ones
/// whose name appears in `selected`.
pub fn option_list<E, S>(selected: &[S]) -> Vec<SelectOption>
where
    E: DisplayOption,
    S: AsRef<str>,
{
    E::ALL
        .iter()
        .map(|option| SelectOption {
            text: option.label(),
            value: option.name(),
            selected: selected.iter().any(|s| s.as_ref() == option.name()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

        fn label(self) -> &'static str {
            match self {
                State::Cancelled => "Cancelled by user",
                other => other.name(),
            }
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_option::<State>("Active"), Ok(State::Active));
        assert_eq!(parse_option::<State>(" complete "), Ok(State::Complete));
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert_eq!(
            parse_option::<State>("Paused"),
            Err(ParseError::Option {
                kind: "state",
                value: "Paused".to_string()
            })
        );
    }

    #[test]
    fn lenient_parse_swallows_bad_input() {
        assert_eq!(parse_option_lenient::<State>(None), None);
        assert_eq!(parse_option_lenient::<State>(Some("  ")), None);
        assert_eq!(parse_option_lenient::<State>(Some("Paused")), None);
        assert_eq!(
            parse_option_lenient::<State>(Some("cancelled")),
            Some(State::Cancelled)
        );
    }

    #[test]
    fn discriminants_follow_declaration_order() {
        assert_eq!(State::Active.discriminant(), 0);
        assert_eq!(State::Cancelled.discriminant(), 2);
    }

    #[test]
    fn option_list_marks_selected() {
        let list = option_list::<State, _>(&["Complete"]);
        assert_eq!(list.len(), 3);
        assert_eq!(
            list[1],
            SelectOption {
                text: "Complete",
                value: "Complete",
                selected: true
            }
        );
        assert!(!list[0].selected);
        assert_eq!(list[2].text, "Cancelled by user");
    }

    #[test]
    fn option_list_with_nothing_selected() {
        let none: [&str; 0] = [];
        assert!(option_list::<State, _>(&none).iter().all(|o| !o.selected));
    }
}
