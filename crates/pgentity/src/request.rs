//! Body of a list request: paging, sorting and filters.

use crate::clause::SortOrder;
use crate::filter::Filters;
use serde::{Deserialize, Deserializer, Serialize};

/// Parameters of [`SqlEntity::get`](crate::SqlEntity::get).
///
/// ```
/// use pgentity::{SelectRequest, SortOrder};
///
/// let req: SelectRequest = serde_json::from_str(
///     r#"{"first": 20, "rows": 10, "sortField": "name", "sortOrder": -1, "pagination": true}"#,
/// ).unwrap();
/// assert_eq!(req.sort_order, SortOrder::Desc);
/// assert_eq!(req.rows, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectRequest {
    #[serde(deserialize_with = "zero_if_null")]
    pub first: u64,
    /// `None` or `0` means no limit.
    pub rows: Option<u64>,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub filters: Filters,
    /// Add a window count of all matching rows to the response.
    #[serde(deserialize_with = "false_if_null")]
    pub pagination: bool,
}

impl SelectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, first: u64, rows: u64) -> Self {
        self.first = first;
        self.rows = Some(rows);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn paginate(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }
}

fn zero_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(d)?.unwrap_or(0))
}

fn false_if_null<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_defaults() {
        let req: SelectRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, SelectRequest::default());
        assert_eq!(req.sort_order, SortOrder::Asc);
    }

    #[test]
    fn nulls_are_defaults() {
        let req: SelectRequest = serde_json::from_str(
            r#"{"first": null, "rows": null, "sortField": null, "sortOrder": null, "filters": null, "pagination": null}"#,
        )
        .unwrap();
        assert_eq!(req, SelectRequest::default());
    }

    #[test]
    fn filters_keep_order() {
        let req: SelectRequest = serde_json::from_str(
            r#"{"filters": {"name": {"value": "J", "matchMode": "startsWith"},
                            "age": {"value": 30, "matchMode": "gte"}}}"#,
        )
        .unwrap();
        assert_eq!(req.filters.keys().collect::<Vec<_>>(), vec!["name", "age"]);
    }
}
