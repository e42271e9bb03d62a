//! Query-string helpers for sort and pagination links.
//!
//! A presentation layer re-renders the current URL with one or two
//! parameters changed. [`QueryParams`] keeps the decoded pairs in their
//! original order so that links stay stable.

use crate::ordering::SortDirection;

/// Names of the query parameters that carry paging and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamKeys {
    pub page: &'static str,
    pub size: &'static str,
    pub sort_by: &'static str,
    pub sort_dir: &'static str,
}

impl Default for ParamKeys {
    fn default() -> Self {
        ParamKeys {
            page: "page",
            size: "size",
            sort_by: "sort",
            sort_dir: "dir",
        }
    }
}

/// Ordered, decoded query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// Undecodable pairs are kept verbatim.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();
        QueryParams { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to a single value, in the position of its first occurrence.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Removes every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the pairs back into a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Whether `column` is the currently sorted column.
pub fn is_sorted_by(params: &QueryParams, keys: &ParamKeys, column: &str) -> bool {
    params.get(keys.sort_by) == Some(column)
}

/// Parameters for a column-header link.
///
/// Re-clicking the column that is currently sorted ascending flips it to
/// descending; every other click sorts ascending. The page parameter is
/// dropped so a new sort starts at page 1.
pub fn sort_link(params: &QueryParams, keys: &ParamKeys, column: &str) -> QueryParams {
    let mut next = params.clone();
    next.remove(keys.page);

    let currently_asc = is_sorted_by(params, keys, column)
        && params
            .get(keys.sort_dir)
            .and_then(|dir| dir.parse::<SortDirection>().ok())
            == Some(SortDirection::Asc);
    let direction = if currently_asc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    next.set(keys.sort_by, column);
    next.set(keys.sort_dir, direction.as_str());
    next
}

/// Parameters for a pagination link, preserving everything else.
pub fn page_link(
    params: &QueryParams,
    keys: &ParamKeys,
    page: usize,
    size: Option<usize>,
) -> QueryParams {
    let mut next = params.clone();
    next.set(keys.page, page.to_string());
    if let Some(size) = size {
        next.set(keys.size, size.to_string());
    }
    next
}
