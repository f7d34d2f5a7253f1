//! A compiled statement: SQL text plus positional arguments.

use crate::value::Value;
use serde::Serialize;
use tokio_postgres::types::ToSql;

/// SQL text with `$1..$n` placeholders and the values bound to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statement {
    pub query: String,
    pub args: Vec<Value>,
}

impl Statement {
    pub fn new(query: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            query: query.into(),
            args,
        }
    }

    /// Arguments as references compatible with tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    /// Number of distinct placeholders in the query text.
    pub fn placeholder_count(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        let bytes = self.query.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    seen.insert(&self.query[start..end]);
                }
                i = end.max(start);
            } else {
                i += 1;
            }
        }
        seen.len()
    }
}

/// `"$start, $start+1, ..."` for `count` placeholders.
pub(crate) fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_list() {
        assert_eq!(placeholders(1, 3), "$1, $2, $3");
        assert_eq!(placeholders(5, 1), "$5");
        assert_eq!(placeholders(1, 0), "");
    }

    #[test]
    fn counts_distinct_placeholders() {
        let stmt = Statement::new("UPDATE t SET a = CASE WHEN id = $1 THEN $3 END WHERE id IN ($1, $2)", vec![]);
        assert_eq!(stmt.placeholder_count(), 3);
        let stmt = Statement::new("SELECT * FROM t WHERE name LIKE %$12%", vec![]);
        assert_eq!(stmt.placeholder_count(), 1);
    }
}
