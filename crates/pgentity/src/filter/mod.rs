//! Runtime filters: validation against the property list and compilation to
//! positional SQL conditions.
//!
//! Filters arrive as a JSON object keyed by property name:
//!
//! ```json
//! { "name": { "value": "John", "matchMode": "startsWith" },
//!   "age":  { "value": 30,     "matchMode": "gte" } }
//! ```
//!
//! Key order is kept because it decides placeholder ordinals and the order
//! of conditions in the WHERE clause.

pub mod compile;
pub mod match_mode;
pub mod validate;

pub use compile::{Compiled, compile};
pub use match_mode::{Comparator, MatchMode};
pub use validate::clean_filters;

use crate::value::Value;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One filter entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub value: Value,
    /// `None` when absent or not a known mode; such filters are dropped.
    #[serde(default, deserialize_with = "lenient_match_mode")]
    pub match_mode: Option<MatchMode>,
}

impl Filter {
    pub fn new(value: impl Into<Value>, match_mode: MatchMode) -> Self {
        Self {
            value: value.into(),
            match_mode: Some(match_mode),
        }
    }
}

fn lenient_match_mode<'de, D>(deserializer: D) -> Result<Option<MatchMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => MatchMode::parse(&s),
        _ => None,
    })
}

/// Filters in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Vec<(String, Filter)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. A key already present is replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, filter: Filter) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = filter,
            None => self.0.push((key, filter)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, filter: Filter) -> Self {
        self.insert(key, filter);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Filter> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.0.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Filter) -> bool) {
        self.0.retain(|(k, f)| keep(k.as_str(), f));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Filter)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, Filter)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, f) in iter {
            filters.insert(k, f);
        }
        filters
    }
}

impl IntoIterator for Filters {
    type Item = (String, Filter);
    type IntoIter = std::vec::IntoIter<(String, Filter)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Filters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, f) in &self.0 {
            map.serialize_entry(k, f)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Filters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FiltersVisitor;

        impl<'de> Visitor<'de> for FiltersVisitor {
            type Value = Filters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property name to filter")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Filters, A::Error> {
                let mut filters = Filters::new();
                while let Some((key, filter)) = access.next_entry::<String, Filter>()? {
                    filters.insert(key, filter);
                }
                Ok(filters)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Filters, E> {
                Ok(Filters::new())
            }
        }

        deserializer.deserialize_any(FiltersVisitor)
    }
}

#[cfg(test)]
mod tests;
