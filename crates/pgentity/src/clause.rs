//! WHERE / ORDER BY / LIMIT fragments appended after `SELECT ... FROM ...`.
//!
//! Every fragment is either empty or starts with a space, so they can be
//! concatenated directly. The order is always WHERE, ORDER BY, LIMIT/OFFSET.

use crate::ident::quote_ident;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Joins conditions in a WHERE clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"DESC"` and `-1` mean descending; anything else (including `null`) is
/// ascending.
impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let desc = match &raw {
            serde_json::Value::String(s) => s == "DESC",
            serde_json::Value::Number(n) => n.as_i64() == Some(-1),
            _ => false,
        };
        Ok(if desc { SortOrder::Desc } else { SortOrder::Asc })
    }
}

/// `" WHERE c1 AND c2 ..."`, or empty when there are no conditions.
pub fn where_clause(conditions: &[String], op: LogicalOperator) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let sep = format!(" {} ", op.as_str());
    format!(" WHERE {}", conditions.join(&sep))
}

/// `" ORDER BY <field> <ASC|DESC>"`, or empty without a sort field.
pub fn order_by(field: Option<&str>, order: SortOrder) -> String {
    match field {
        Some(field) if !field.is_empty() => {
            format!(" ORDER BY {} {}", quote_ident(field), order.as_str())
        }
        _ => String::new(),
    }
}

/// `" LIMIT <rows> OFFSET <first>"`, or empty when `rows` is absent or zero.
pub fn limit(rows: Option<u64>, first: u64) -> String {
    match rows {
        Some(rows) if rows > 0 => format!(" LIMIT {rows} OFFSET {first}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragments() {
        assert_eq!(where_clause(&[], LogicalOperator::And), "");
        assert_eq!(order_by(None, SortOrder::Desc), "");
        assert_eq!(order_by(Some(""), SortOrder::Desc), "");
        assert_eq!(limit(None, 20), "");
        assert_eq!(limit(Some(0), 20), "");
    }

    #[test]
    fn where_joins_with_operator() {
        let conds = vec!["a = $1".to_string(), "b = $2".to_string()];
        assert_eq!(where_clause(&conds, LogicalOperator::And), " WHERE a = $1 AND b = $2");
        assert_eq!(where_clause(&conds, LogicalOperator::Or), " WHERE a = $1 OR b = $2");
    }

    #[test]
    fn order_by_quotes_field() {
        assert_eq!(order_by(Some("name"), SortOrder::Asc), " ORDER BY name ASC");
        assert_eq!(
            order_by(Some("createdAt"), SortOrder::Desc),
            r#" ORDER BY "createdAt" DESC"#
        );
    }

    #[test]
    fn limit_with_offset() {
        assert_eq!(limit(Some(10), 0), " LIMIT 10 OFFSET 0");
        assert_eq!(limit(Some(25), 50), " LIMIT 25 OFFSET 50");
    }

    #[test]
    fn sort_order_from_json() {
        let parse = |s: &str| serde_json::from_str::<SortOrder>(s).unwrap();
        assert_eq!(parse(r#""DESC""#), SortOrder::Desc);
        assert_eq!(parse("-1"), SortOrder::Desc);
        assert_eq!(parse(r#""ASC""#), SortOrder::Asc);
        assert_eq!(parse(r#""desc""#), SortOrder::Asc);
        assert_eq!(parse("1"), SortOrder::Asc);
        assert_eq!(parse("null"), SortOrder::Asc);
    }
}
