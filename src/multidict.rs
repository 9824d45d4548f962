//! # Multi-value containers
//!
//! Query strings, headers and cookies can repeat a key. [`MultiDict`] keeps
//! every pair in arrival order; [`parse_multi_dict`] collapses it into the
//! single-valued JSON object that model validation expects.
//!
//! ```rust
//! use opspec::multidict::{parse_multi_dict, MultiDict};
//! use serde_json::json;
//!
//! let query = MultiDict::from_query("tag=a&tag=b&limit=10");
//! assert_eq!(
//!     serde_json::Value::Object(parse_multi_dict(&query)),
//!     json!({ "tag": ["a", "b"], "limit": "10" })
//! );
//! ```

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Ordered key/value pairs where a key may occur more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiDict {
    pairs: Vec<(String, String)>,
}

impl MultiDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a form-urlencoded query string. A leading `?` is ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Split a `Cookie` header value (`a=1; b=2`) into pairs.
    pub fn from_cookie_header(header: &str) -> Self {
        header
            .split(';')
            .filter_map(|pair| {
                let mut parts = pair.trim().splitn(2, '=');
                let name = parts.next()?.trim();
                if name.is_empty() {
                    return None;
                }
                let value = parts.next().unwrap_or("").trim();
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values grouped per key, keys in order of first occurrence.
    pub fn grouped(&self) -> Vec<(&str, Vec<&str>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for (key, value) in self.iter() {
            match index.get(key) {
                Some(&slot) => groups[slot].1.push(value),
                None => {
                    index.insert(key, groups.len());
                    groups.push((key, vec![value]));
                }
            }
        }
        groups
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MultiDict {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Collapse a [`MultiDict`] into one JSON value per key.
///
/// A key seen once maps to its string value; a key seen more than once maps
/// to the array of its values in arrival order.
pub fn parse_multi_dict(input: &MultiDict) -> Map<String, Value> {
    input
        .grouped()
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                Value::String(values.remove(0).to_string())
            } else {
                Value::Array(
                    values
                        .into_iter()
                        .map(|v| Value::String(v.to_string()))
                        .collect(),
                )
            };
            (key.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_decodes() {
        let query = MultiDict::from_query("?name=J%C3%BCrgen&q=a+b");
        assert_eq!(query.get("name"), Some("Jürgen"));
        assert_eq!(query.get("q"), Some("a b"));
    }

    #[test]
    fn test_from_cookie_header() {
        let cookies = MultiDict::from_cookie_header("a=b; c=d;  ; flag");
        assert_eq!(cookies.get("a"), Some("b"));
        assert_eq!(cookies.get("c"), Some("d"));
        assert_eq!(cookies.get("flag"), Some(""));
        assert_eq!(cookies.len(), 3);
    }

    #[test]
    fn test_grouped_keeps_first_occurrence_order() {
        let dict: MultiDict = vec![("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        assert_eq!(dict.grouped(), vec![("b", vec!["1", "3"]), ("a", vec!["2"])]);
        assert_eq!(dict.get_all("b"), vec!["1", "3"]);
    }
}
